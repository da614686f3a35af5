//! Scalar solver configuration.
//!
//! `CampCSSolver` has historically been constructed with two different
//! defaults (12/18 and 10/20 for `min_group_size`/`max_group_size`) and no
//! way to tell which one is canonical. Rather than pick a silent global
//! default, both are exposed as named constructors; callers choose
//! explicitly.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Morning sessions always run a fixed number of groups.
pub const MORNING_NUM_GROUPS: u32 = 5;

/// Afternoon group count is chosen dynamically within this range.
pub const AFTERNOON_GROUP_COUNT_MIN: u32 = 8;
pub const AFTERNOON_GROUP_COUNT_MAX: u32 = 10;

/// Scalar parameters shared by the RBL builder and the CSP solver.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    pub min_group_size: u32,
    pub max_group_size: u32,
    pub camper_per_counselor: u32,
    pub min_counselors_per_group: u32,
    pub grade_band_width: u8,
}

impl SolverParams {
    /// The narrower of the two source defaults (12/18), matching the
    /// constants used for afternoon group-count selection in §4.2.
    pub fn afternoon_defaults() -> Self {
        Self {
            min_group_size: 12,
            max_group_size: 18,
            camper_per_counselor: 10,
            min_counselors_per_group: 2,
            grade_band_width: 2,
        }
    }

    /// The wider of the two source defaults (10/20).
    pub fn relaxed_defaults() -> Self {
        Self {
            min_group_size: 10,
            max_group_size: 20,
            camper_per_counselor: 10,
            min_counselors_per_group: 2,
            grade_band_width: 2,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_group_size > self.max_group_size {
            return Err(ConfigError::InvertedGroupSizeBounds {
                min: self.min_group_size,
                max: self.max_group_size,
            });
        }
        if self.camper_per_counselor == 0 {
            return Err(ConfigError::ZeroCamperPerCounselor);
        }
        if self.min_counselors_per_group == 0 {
            return Err(ConfigError::ZeroMinCounselorsPerGroup);
        }
        Ok(())
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self::afternoon_defaults()
    }
}
