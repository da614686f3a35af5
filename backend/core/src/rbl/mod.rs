//! The reduction layer ("RBL"): normalizes a dataset into constraint-ready
//! entities for a given session before the CSP solver runs.

mod builder;
mod dsu;

pub use builder::{
    build_camper_rbl, build_counselor_rbl, eligible_camper_count, eligible_counselor_count,
    select_afternoon_group_count, CamperRbl, CounselorRbl,
};
pub use dsu::UnionFind;

use crate::config::{SolverParams, MORNING_NUM_GROUPS};
use crate::error::RblError;
use crate::models::{Dataset, Session};

/// Derives `num_groups` for the session, then builds both the camper and
/// counselor RBLs at that group count. Morning always runs
/// `MORNING_NUM_GROUPS`; afternoon picks the largest feasible count via
/// [`select_afternoon_group_count`].
pub fn build_session_rbl(
    dataset: &Dataset,
    session: Session,
    params: &SolverParams,
) -> Result<(CamperRbl, CounselorRbl), RblError> {
    let num_groups = match session {
        Session::Morning => MORNING_NUM_GROUPS,
        Session::Afternoon => {
            let campers = eligible_camper_count(dataset, session);
            let counselors = eligible_counselor_count(dataset, session);
            select_afternoon_group_count(campers, counselors, params)
        }
    };

    let camper_rbl = build_camper_rbl(dataset, session, num_groups)?;
    let counselor_rbl = build_counselor_rbl(dataset, session, num_groups);
    Ok((camper_rbl, counselor_rbl))
}
