//! Backtracking constraint solver for summer-camp group and counselor
//! assignment.
//!
//! Pipeline: `Dataset -> RBL(session) -> CspSolver::solve -> assign_counselors
//! -> score_solution`. Each stage's recoverable failure (an unsatisfiable
//! camper search, a staffing shortfall) is returned as a plain enum value;
//! only malformed input data is a `Result::Err`.

pub mod config;
pub mod error;
pub mod models;
pub mod rbl;
pub mod scoring;
pub mod solver;

use std::collections::BTreeMap;

use config::SolverParams;
use error::RblError;
use models::{Dataset, Session};
use rbl::{build_session_rbl, CamperRbl};
use scoring::ScoreBreakdown;
use solver::{assign_counselors, CamperSolution, CspSolver, SolveOutcome, StaffingOutcome};

/// The full outcome of running both solver phases and scoring for one
/// session. Either hard phase can fail without it being an error: the
/// dataset may simply admit no feasible grouping, or admit one too large to
/// staff.
#[derive(Debug, Clone)]
pub enum SessionResult {
    /// Both phases succeeded; the assignment is scored.
    Solved {
        camper_assignment: BTreeMap<String, u32>,
        campers_by_group: BTreeMap<u32, Vec<String>>,
        counselor_assignment: BTreeMap<String, u32>,
        score: ScoreBreakdown,
    },
    /// The camper CSP search exhausted every branch without finding a
    /// feasible grouping.
    CamperSearchExhausted,
    /// A feasible grouping was found but there weren't enough eligible
    /// counselors to staff it.
    StaffingShortfall {
        camper_assignment: BTreeMap<String, u32>,
        campers_by_group: BTreeMap<u32, Vec<String>>,
    },
}

/// Runs the complete pipeline for one session: builds the reduction layer,
/// solves the camper CSP, staffs the result, and scores it.
///
/// Returns `Err` only for malformed input (a locked camper pinned outside
/// the group range, or a `pair_with`/`avoid_with` contradiction within one
/// must-pair component) — never for an ordinary unsatisfiable or
/// understaffed dataset, which are [`SessionResult`] variants instead.
pub fn solve_session(
    dataset: &Dataset,
    session: Session,
    params: &SolverParams,
) -> Result<SessionResult, RblError> {
    let (camper_rbl, counselor_rbl) = build_session_rbl(dataset, session, params)?;

    let solver = CspSolver::new(&camper_rbl, &counselor_rbl, dataset, params);
    let CamperSolution {
        assignment: camper_assignment,
        group_campers,
    } = match solver.solve() {
        SolveOutcome::Feasible(solution) => solution,
        SolveOutcome::Infeasible => return Ok(SessionResult::CamperSearchExhausted),
    };

    let campers_by_group = expand_group_members(&camper_rbl, &camper_assignment);

    match assign_counselors(&counselor_rbl, &group_campers, params) {
        StaffingOutcome::Staffed(counselor_assignment) => {
            let score = scoring::score_solution(dataset, &campers_by_group, &counselor_assignment);
            Ok(SessionResult::Solved {
                camper_assignment,
                campers_by_group,
                counselor_assignment,
                score,
            })
        }
        StaffingOutcome::Understaffed => Ok(SessionResult::StaffingShortfall {
            camper_assignment,
            campers_by_group,
        }),
    }
}

/// Expands a component-root assignment into full group -> camper-name
/// rosters, for the scorer and for any caller-facing report.
fn expand_group_members(
    camper_rbl: &CamperRbl,
    assignment: &BTreeMap<String, u32>,
) -> BTreeMap<u32, Vec<String>> {
    let mut by_group: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for (root, &group) in assignment {
        let members = &camper_rbl.components[root];
        by_group.entry(group).or_default().extend(members.clone());
    }
    for members in by_group.values_mut() {
        members.sort();
    }
    by_group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Camper, Counselor, Demographics, Grade, WeeklySchedule};

    fn camper(name: &str, grade: Grade) -> Camper {
        Camper {
            demographics: Demographics {
                name: name.to_string(),
                age_years: 8,
                age_months: 0,
                gender: "F".to_string(),
                spoken_languages: vec![],
            },
            grade,
            pair_with: vec![],
            avoid_with: vec![],
            siblings: vec![],
            friends: vec![],
            attends_summer_school: false,
            attends_summer_camp: true,
            morning_group: None,
            afternoon_group: None,
        }
    }

    fn counselor(name: &str) -> Counselor {
        Counselor {
            demographics: Demographics {
                name: name.to_string(),
                age_years: 25,
                age_months: 0,
                gender: "F".to_string(),
                spoken_languages: vec![],
            },
            pair_with: vec![],
            avoid_with: vec![],
            morning_group: None,
            afternoon_group: None,
            schedule: WeeklySchedule {
                monday: crate::models::DaySchedule {
                    start: "09:00".into(),
                    end: "15:00".into(),
                    lunch: "12:00".into(),
                },
                ..Default::default()
            },
            preferred_age_group: None,
            years_of_experience: 1,
            is_speciality: false,
            works_summer_school: true,
            works_summer_camp: true,
        }
    }

    #[test]
    fn end_to_end_solves_a_small_dataset() {
        let campers: Vec<Camper> = (0..12).map(|i| camper(&format!("c{i}"), Grade::Second)).collect();
        let counselors: Vec<Counselor> = (0..2).map(|i| counselor(&format!("s{i}"))).collect();
        let dataset = Dataset { campers, counselors };
        let params = SolverParams {
            min_group_size: 1,
            max_group_size: 20,
            camper_per_counselor: 10,
            min_counselors_per_group: 1,
            grade_band_width: 2,
        };

        match solve_session(&dataset, Session::Afternoon, &params).unwrap() {
            SessionResult::Solved {
                campers_by_group, ..
            } => {
                let total: usize = campers_by_group.values().map(|v| v.len()).sum();
                assert_eq!(total, 12);
            }
            other => panic!("expected a solved session, got {other:?}"),
        }
    }

    #[test]
    fn contradictory_lock_surfaces_as_an_error() {
        let mut a = camper("A", Grade::Second);
        a.pair_with = vec!["B".to_string()];
        a.afternoon_group = Some(0);
        let mut b = camper("B", Grade::Second);
        b.afternoon_group = Some(1);
        let dataset = Dataset {
            campers: vec![a, b],
            counselors: vec![],
        };
        let params = SolverParams::afternoon_defaults();
        let err = solve_session(&dataset, Session::Afternoon, &params).unwrap_err();
        assert!(matches!(err, RblError::EmptyDomain { .. }));
    }

    #[test]
    fn understaffed_dataset_is_reported_not_errored() {
        let campers: Vec<Camper> = (0..12).map(|i| camper(&format!("c{i}"), Grade::Second)).collect();
        let dataset = Dataset {
            campers,
            counselors: vec![],
        };
        let params = SolverParams {
            min_group_size: 1,
            max_group_size: 20,
            camper_per_counselor: 10,
            min_counselors_per_group: 1,
            grade_band_width: 2,
        };
        match solve_session(&dataset, Session::Afternoon, &params).unwrap() {
            SessionResult::StaffingShortfall { .. } => {}
            other => panic!("expected a staffing shortfall, got {other:?}"),
        }
    }
}
