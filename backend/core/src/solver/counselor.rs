//! Greedy counselor-to-group assignment: the second solver phase, run after
//! the camper CSP has produced a feasible grouping. No backtracking — groups
//! are staffed in ascending index order, each taking the first `needed`
//! still-unassigned eligible counselors; a group that cannot be fully
//! staffed fails the whole phase immediately.

use std::collections::BTreeMap;

use crate::config::SolverParams;
use crate::rbl::CounselorRbl;

/// Outcome of the staffing phase. Running out of counselors to cover every
/// group's minimum is a recoverable outcome, not an error.
#[derive(Debug, Clone)]
pub enum StaffingOutcome {
    Staffed(BTreeMap<String, u32>),
    Understaffed,
}

fn needed_counselors(campers: u32, params: &SolverParams) -> u32 {
    if campers == 0 {
        return 0;
    }
    campers
        .div_ceil(params.camper_per_counselor)
        .max(params.min_counselors_per_group)
}

/// Walks groups in ascending index order. For each, takes the first `needed`
/// counselors (in name order) still unassigned and eligible for that group.
/// If a group doesn't have enough eligible counselors left, the phase fails
/// immediately as `Understaffed` rather than under-staffing that group.
pub fn assign_counselors(
    counselor_rbl: &CounselorRbl,
    group_campers: &[u32],
    params: &SolverParams,
) -> StaffingOutcome {
    let mut assignment = BTreeMap::new();
    let mut used = std::collections::BTreeSet::new();

    for (g, &campers) in group_campers.iter().enumerate() {
        let g = g as u32;
        let needed = needed_counselors(campers, params);
        if needed == 0 {
            continue;
        }

        let eligible: Vec<&String> = counselor_rbl
            .counselor_domain
            .iter()
            .filter(|(name, domain)| !used.contains(name.as_str()) && domain.contains(&g))
            .map(|(name, _)| name)
            .collect();

        if (eligible.len() as u32) < needed {
            log::warn!(
                "group {g} needs {needed} counselors but only {} are eligible and unassigned",
                eligible.len()
            );
            return StaffingOutcome::Understaffed;
        }

        for name in eligible.into_iter().take(needed as usize) {
            assignment.insert(name.clone(), g);
            used.insert(name.clone());
        }
    }

    StaffingOutcome::Staffed(assignment)
}
