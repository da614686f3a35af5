//! JSON Schema contracts for the camp solver's public input/output shapes.
//!
//! Schema-only mirrors of `camp_core`'s types, kept separate rather than
//! derived in place, so that adding `schemars::JsonSchema` to the core
//! never forces a schema-breaking release purely to satisfy this crate.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionContract {
    Morning,
    Afternoon,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct DemographicsContract {
    pub name: String,
    pub age_years: u32,
    pub age_months: u32,
    pub gender: String,
    #[serde(default)]
    pub spoken_languages: Vec<String>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct DaySchedule {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub lunch: String,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct WeeklyScheduleContract {
    #[serde(default)]
    pub monday: DaySchedule,
    #[serde(default)]
    pub tuesday: DaySchedule,
    #[serde(default)]
    pub wednesday: DaySchedule,
    #[serde(default)]
    pub thursday: DaySchedule,
    #[serde(default)]
    pub friday: DaySchedule,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct CamperContract {
    #[serde(flatten)]
    pub demographics: DemographicsContract,
    pub grade: String,
    #[serde(default)]
    pub pair_with: Vec<String>,
    #[serde(default)]
    pub avoid_with: Vec<String>,
    #[serde(default)]
    pub siblings: Vec<String>,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub attends_summer_school: bool,
    #[serde(default)]
    pub attends_summer_camp: bool,
    #[serde(default)]
    pub morning_group: Option<u32>,
    #[serde(default)]
    pub afternoon_group: Option<u32>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct CounselorContract {
    #[serde(flatten)]
    pub demographics: DemographicsContract,
    #[serde(default)]
    pub pair_with: Vec<String>,
    #[serde(default)]
    pub avoid_with: Vec<String>,
    #[serde(default)]
    pub morning_group: Option<u32>,
    #[serde(default)]
    pub afternoon_group: Option<u32>,
    pub schedule: WeeklyScheduleContract,
    #[serde(default)]
    pub preferred_age_group: Option<String>,
    #[serde(default)]
    pub years_of_experience: u32,
    #[serde(default)]
    pub is_speciality: bool,
    #[serde(default)]
    pub works_summer_school: bool,
    #[serde(default)]
    pub works_summer_camp: bool,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct DatasetContract {
    #[serde(default)]
    pub campers: Vec<CamperContract>,
    #[serde(default)]
    pub counselors: Vec<CounselorContract>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct SolverParamsContract {
    pub min_group_size: u32,
    pub max_group_size: u32,
    pub camper_per_counselor: u32,
    pub min_counselors_per_group: u32,
    pub grade_band_width: u8,
}

/// Returns the JSON Schema for the solver's input dataset.
pub fn dataset_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(DatasetContract))
        .expect("schemars output is always valid JSON")
}

/// Returns the JSON Schema for [`SolverParamsContract`].
pub fn solver_params_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(SolverParamsContract))
        .expect("schemars output is always valid JSON")
}

/// Converts a schema-validated dataset into `camp_core`'s working type.
/// The two shapes share an identical wire format (grade codes included),
/// so the conversion is a serialize/deserialize round trip rather than a
/// field-by-field mapping that would drift from the schema over time.
pub fn into_core_dataset(
    contract: DatasetContract,
) -> Result<camp_core::models::Dataset, serde_json::Error> {
    let value = serde_json::to_value(contract)?;
    serde_json::from_value(value)
}

/// Converts a schema-validated parameter set into `camp_core`'s
/// [`camp_core::config::SolverParams`].
pub fn into_core_params(
    contract: SolverParamsContract,
) -> Result<camp_core::config::SolverParams, serde_json::Error> {
    let value = serde_json::to_value(contract)?;
    serde_json::from_value(value)
}
