//! Data models for the camp group-assignment solver.
//!
//! These types mirror the input records produced by an external CSV→record
//! ingestion layer (out of scope for this crate — see `original_source`
//! parsing conventions this shape is grounded on) and the output records the
//! solver pipeline produces.

use serde::{Deserialize, Serialize};

/// Attributes shared by every person in the dataset.
///
/// Modeled as a standalone struct rather than a base class: `Camper` and
/// `Counselor` each embed one via `#[serde(flatten)]` instead of inheriting
/// from a common `Person` type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Demographics {
    /// Unique identifier for this person. Must be non-empty and unique
    /// across all campers or all counselors in a dataset.
    pub name: String,
    pub age_years: u32,
    pub age_months: u32,
    /// Open tag, at least `"M"`/`"F"`. Values outside that pair are carried
    /// through but ignored by `gender_balance_score`.
    pub gender: String,
    #[serde(default)]
    pub spoken_languages: Vec<String>,
}

/// A normalized camp grade, K through 6.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    #[serde(rename = "K")]
    Kindergarten,
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "5")]
    Fifth,
    #[serde(rename = "6")]
    Sixth,
}

impl Grade {
    /// Maps a grade to its normalized integer 0..=6 (`GRADE_MAP` in the
    /// original implementation).
    pub fn normalized(self) -> u8 {
        match self {
            Grade::Kindergarten => 0,
            Grade::First => 1,
            Grade::Second => 2,
            Grade::Third => 3,
            Grade::Fourth => 4,
            Grade::Fifth => 5,
            Grade::Sixth => 6,
        }
    }

    /// Maps a grade to its scoring age-band (`GRADE_TO_AGE_GROUP`).
    pub fn age_band(self) -> &'static str {
        match self {
            Grade::Kindergarten | Grade::First => "K-1",
            Grade::Second | Grade::Third => "2-3",
            Grade::Fourth | Grade::Fifth | Grade::Sixth => "4-6",
        }
    }
}

/// A single weekday's working hours. An empty `start` or `end` means the
/// counselor is unavailable that day.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DaySchedule {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub lunch: String,
}

impl DaySchedule {
    pub fn is_available(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}

/// A counselor's working hours across the camp week.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WeeklySchedule {
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

impl WeeklySchedule {
    /// True iff at least one weekday has both a start and end time.
    pub fn has_any_availability(&self) -> bool {
        [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
        ]
        .iter()
        .any(|d| d.is_available())
    }
}

/// A camper to be placed into a morning and/or afternoon group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Camper {
    #[serde(flatten)]
    pub demographics: Demographics,
    pub grade: Grade,
    /// Hard constraint: must share a group with each of these names.
    #[serde(default)]
    pub pair_with: Vec<String>,
    /// Hard constraint: must not share a group with any of these names.
    #[serde(default)]
    pub avoid_with: Vec<String>,
    /// Soft, scoring-only.
    #[serde(default)]
    pub siblings: Vec<String>,
    /// Soft, scoring-only.
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub attends_summer_school: bool,
    #[serde(default)]
    pub attends_summer_camp: bool,
    /// Locked morning group index, if pre-assigned.
    #[serde(default)]
    pub morning_group: Option<u32>,
    /// Locked afternoon group index, if pre-assigned.
    #[serde(default)]
    pub afternoon_group: Option<u32>,
}

impl Camper {
    pub fn name(&self) -> &str {
        &self.demographics.name
    }

    /// Session-specific group lock, or `None` if unlocked for that session.
    pub fn group_lock(&self, session: Session) -> Option<u32> {
        match session {
            Session::Morning => self.morning_group,
            Session::Afternoon => self.afternoon_group,
        }
    }

    /// Morning serves camp-only campers; afternoon serves all camp attendees.
    pub fn is_eligible(&self, session: Session) -> bool {
        match session {
            Session::Morning => self.attends_summer_camp && !self.attends_summer_school,
            Session::Afternoon => self.attends_summer_camp,
        }
    }
}

/// A counselor available to staff morning and/or afternoon groups.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Counselor {
    #[serde(flatten)]
    pub demographics: Demographics,
    #[serde(default)]
    pub pair_with: Vec<String>,
    #[serde(default)]
    pub avoid_with: Vec<String>,
    #[serde(default)]
    pub morning_group: Option<u32>,
    #[serde(default)]
    pub afternoon_group: Option<u32>,
    pub schedule: WeeklySchedule,
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

impl Counselor {
    pub fn name(&self) -> &str {
        &self.demographics.name
    }

    pub fn group_lock(&self, session: Session) -> Option<u32> {
        match session {
            Session::Morning => self.morning_group,
            Session::Afternoon => self.afternoon_group,
        }
    }

    fn works_session(&self, session: Session) -> bool {
        match session {
            Session::Morning => self.works_summer_school,
            Session::Afternoon => self.works_summer_camp,
        }
    }

    pub fn is_eligible(&self, session: Session) -> bool {
        self.works_session(session) && self.schedule.has_any_availability()
    }
}

/// One of the two daily scheduling sessions. Determines camper/counselor
/// eligibility and which group-lock field is consulted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Morning,
    Afternoon,
}

impl Session {
    pub fn as_str(self) -> &'static str {
        match self {
            Session::Morning => "morning",
            Session::Afternoon => "afternoon",
        }
    }
}

/// The full, already-parsed input population. This is where the core's
/// contract begins; tabular ingestion into this shape is an external
/// collaborator's job.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Dataset {
    #[serde(default)]
    pub campers: Vec<Camper>,
    #[serde(default)]
    pub counselors: Vec<Counselor>,
}
