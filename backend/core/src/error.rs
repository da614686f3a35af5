//! Crate-wide error types, one per fallible layer.
//!
//! Structural and configuration errors propagate out of the core as
//! `Result::Err`. Search exhaustion and staffing shortfalls are *not*
//! modeled as errors here — they are distinct outcome values returned from
//! `Ok` (see `solver::SolveOutcome` and `solver::StaffingOutcome`) since
//! they are expected, recoverable-at-the-caller-level results, not bugs.

use thiserror::Error;

/// Fatal, structural problems discovered while reducing a dataset into
/// RBL form. These indicate a contradiction in the input, not a search
/// failure, so they are raised as errors rather than returned as values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RblError {
    /// A must-pair component's members have no group in common.
    #[error(
        "component rooted at {root:?} has an empty domain (members: {members:?})"
    )]
    EmptyDomain { root: String, members: Vec<String> },

    /// A camper's pair_with and avoid_with both resolve to the same
    /// component — they cannot simultaneously be forced together and apart.
    #[error(
        "camper {camper:?} both must-pair and must-avoid into the same component via {other:?}"
    )]
    Contradiction { camper: String, other: String },
}

/// Invalid solver configuration, detected synchronously at construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("num_groups must be greater than zero")]
    ZeroGroups,

    #[error("min_group_size ({min}) must not exceed max_group_size ({max})")]
    InvertedGroupSizeBounds { min: u32, max: u32 },

    #[error("camper_per_counselor must be greater than zero")]
    ZeroCamperPerCounselor,

    #[error("min_counselors_per_group must be greater than zero")]
    ZeroMinCounselorsPerGroup,
}
