//! Backtracking CSP solver: assigns camper components to groups under hard
//! constraints, using MRV variable ordering, least-loaded value ordering,
//! and staffing-feasibility pruning.

use std::collections::BTreeMap;

use crate::config::SolverParams;
use crate::models::Dataset;
use crate::rbl::{CamperRbl, CounselorRbl};

/// A completed camper assignment: component root -> group index.
pub type CamperAssignment = BTreeMap<String, u32>;

/// Result of a CSP search. Search exhaustion is a recoverable outcome, not
/// an error — it is returned as a value, never via `Result::Err`.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Feasible(CamperSolution),
    Infeasible,
}

/// A feasible camper assignment together with the per-group camper counts
/// the solver accumulated, which the counselor phase and scorer both need.
#[derive(Debug, Clone)]
pub struct CamperSolution {
    pub assignment: CamperAssignment,
    /// Camper headcount per group index.
    pub group_campers: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
struct GroupState {
    campers: u32,
    /// Treated as a stack: backtracking always pops exactly as many grades
    /// as the most recent assign pushed, because assign/unassign calls are
    /// strictly nested by the recursion.
    grades: Vec<u8>,
    components: Vec<String>,
}

/// Backtracking search over camper components for a single session.
pub struct CspSolver<'a> {
    camper_rbl: &'a CamperRbl,
    counselor_rbl: &'a CounselorRbl,
    params: &'a SolverParams,
    component_sizes: BTreeMap<String, u32>,
    component_grades: BTreeMap<String, Vec<u8>>,
    groups: Vec<GroupState>,
    assignment: CamperAssignment,
}

impl<'a> CspSolver<'a> {
    pub fn new(
        camper_rbl: &'a CamperRbl,
        counselor_rbl: &'a CounselorRbl,
        dataset: &Dataset,
        params: &'a SolverParams,
    ) -> Self {
        let grade_by_name: BTreeMap<&str, u8> = dataset
            .campers
            .iter()
            .map(|c| (c.name(), c.grade.normalized()))
            .collect();

        let mut component_sizes = BTreeMap::new();
        let mut component_grades = BTreeMap::new();
        for (root, members) in &camper_rbl.components {
            component_sizes.insert(root.clone(), members.len() as u32);
            component_grades.insert(
                root.clone(),
                members.iter().map(|m| grade_by_name[m.as_str()]).collect(),
            );
        }

        Self {
            camper_rbl,
            counselor_rbl,
            params,
            component_sizes,
            component_grades,
            groups: vec![GroupState::default(); camper_rbl.num_groups as usize],
            assignment: CamperAssignment::new(),
        }
    }

    /// Runs the backtracking search to completion, returning the first
    /// feasible assignment found or `Infeasible` if the search space is
    /// exhausted.
    pub fn solve(mut self) -> SolveOutcome {
        if self.backtrack() {
            let group_campers = self.groups.iter().map(|g| g.campers).collect();
            SolveOutcome::Feasible(CamperSolution {
                assignment: self.assignment,
                group_campers,
            })
        } else {
            log::debug!("CSP search exhausted without a feasible assignment");
            SolveOutcome::Infeasible
        }
    }

    fn backtrack(&mut self) -> bool {
        if self.assignment.len() == self.camper_rbl.components.len() {
            return true;
        }

        let root = self.select_next_component();
        let mut candidates: Vec<u32> = self.camper_rbl.comp_domain[&root].iter().copied().collect();
        candidates.sort_by_key(|&g| self.groups[g as usize].campers);

        for g in candidates {
            if self.violates_group_size(&root, g) {
                continue;
            }
            if self.violates_grade_band(&root, g) {
                continue;
            }
            if self.violates_avoid(&root, g) {
                continue;
            }

            self.assign(&root, g);

            if self.violates_future_counselor_feasibility()
                || self.violates_group_counselor_cap(g)
                || self.violates_extreme_imbalance(g)
            {
                self.unassign(&root, g);
                continue;
            }

            if self.backtrack() {
                return true;
            }

            self.unassign(&root, g);
        }

        false
    }

    /// MRV: smallest domain first, ties broken by largest component first,
    /// then by root name for full determinism.
    fn select_next_component(&self) -> String {
        self.camper_rbl
            .components
            .keys()
            .filter(|r| !self.assignment.contains_key(r.as_str()))
            .min_by_key(|r| {
                let domain_len = self.camper_rbl.comp_domain[r.as_str()].len();
                let size = self.component_sizes[r.as_str()];
                (domain_len, std::cmp::Reverse(size), (*r).clone())
            })
            .expect("backtrack only calls this when components remain unassigned")
            .clone()
    }

    fn violates_group_size(&self, root: &str, g: u32) -> bool {
        self.groups[g as usize].campers + self.component_sizes[root] > self.params.max_group_size
    }

    fn violates_grade_band(&self, root: &str, g: u32) -> bool {
        let existing = &self.groups[g as usize].grades;
        if existing.is_empty() {
            return false;
        }
        let incoming = &self.component_grades[root];
        let min_g = *existing.iter().min().unwrap();
        let max_g = *existing.iter().max().unwrap();
        let inc_min = *incoming.iter().min().unwrap();
        let inc_max = *incoming.iter().max().unwrap();
        let new_min = min_g.min(inc_min);
        let new_max = max_g.max(inc_max);
        (new_max - new_min) as u32 > self.params.grade_band_width as u32
    }

    fn violates_avoid(&self, root: &str, g: u32) -> bool {
        let Some(avoided) = self.camper_rbl.comp_avoid.get(root) else {
            return false;
        };
        self.groups[g as usize]
            .components
            .iter()
            .any(|other| avoided.contains(other))
    }

    fn needed_counselors(&self, campers: u32) -> u32 {
        campers
            .div_ceil(self.params.camper_per_counselor)
            .max(self.params.min_counselors_per_group)
    }

    fn violates_future_counselor_feasibility(&self) -> bool {
        let total_counselors = self.counselor_rbl.counselor_domain.len() as u32;
        let needed: u32 = self
            .groups
            .iter()
            .filter(|g| g.campers > 0)
            .map(|g| self.needed_counselors(g.campers))
            .sum();
        needed > total_counselors
    }

    fn violates_group_counselor_cap(&self, g: u32) -> bool {
        let campers = self.groups[g as usize].campers;
        if campers == 0 {
            return false;
        }
        let needed = self.needed_counselors(campers);
        let possible = self
            .counselor_rbl
            .counselor_domain
            .values()
            .filter(|dom| dom.contains(&g))
            .count() as u32;
        needed > possible
    }

    fn violates_extreme_imbalance(&self, g: u32) -> bool {
        self.groups[g as usize].campers > self.params.max_group_size
    }

    fn assign(&mut self, root: &str, g: u32) {
        self.assignment.insert(root.to_string(), g);
        let group = &mut self.groups[g as usize];
        group.campers += self.component_sizes[root];
        group.grades.extend(self.component_grades[root].iter());
        group.components.push(root.to_string());
    }

    fn unassign(&mut self, root: &str, g: u32) {
        self.assignment.remove(root);
        let group = &mut self.groups[g as usize];
        group.campers -= self.component_sizes[root];
        let n = self.component_grades[root].len();
        group.grades.truncate(group.grades.len() - n);
        group.components.retain(|r| r != root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Camper, Dataset, Demographics, Grade, Session};
    use crate::rbl::{build_camper_rbl, build_counselor_rbl};

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

    #[test]
    fn minimal_feasible_single_group() {
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
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 1).unwrap();
        let counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 1);
        let solver = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        match solver.solve() {
            SolveOutcome::Feasible(sol) => {
                assert_eq!(sol.assignment.len(), 12);
                assert!(sol.assignment.values().all(|&g| g == 0));
            }
            SolveOutcome::Infeasible => panic!("expected a feasible solution"),
        }
    }

    #[test]
    fn hard_pair_forces_co_grouping() {
        let mut a = camper("A", Grade::Second);
        a.pair_with = vec!["B".to_string()];
        let b = camper("B", Grade::Second);
        let mut c = camper("C", Grade::Third);
        c.pair_with = vec!["D".to_string()];
        let d = camper("D", Grade::Third);
        let dataset = Dataset {
            campers: vec![a, b, c, d],
            counselors: vec![],
        };
        let params = SolverParams {
            min_group_size: 1,
            max_group_size: 2,
            camper_per_counselor: 10,
            min_counselors_per_group: 0.max(1),
            grade_band_width: 2,
        };
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 2).unwrap();
        let counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 2);
        let solver = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        match solver.solve() {
            SolveOutcome::Feasible(sol) => {
                let ab_root = &sol.assignment[&"A".to_string()];
                assert_eq!(&sol.assignment["B"], ab_root);
                let cd_root = &sol.assignment["C"];
                assert_eq!(&sol.assignment["D"], cd_root);
                assert_ne!(ab_root, cd_root);
            }
            SolveOutcome::Infeasible => panic!("expected a feasible solution"),
        }
    }

    #[test]
    fn hard_avoid_splits_across_groups() {
        let mut a = camper("A", Grade::Second);
        a.avoid_with = vec!["B".to_string()];
        let b = camper("B", Grade::Second);
        let c = camper("C", Grade::Second);
        let d = camper("D", Grade::Second);
        let dataset = Dataset {
            campers: vec![a, b, c, d],
            counselors: vec![],
        };
        let params = SolverParams {
            min_group_size: 1,
            max_group_size: 2,
            camper_per_counselor: 10,
            min_counselors_per_group: 1,
            grade_band_width: 2,
        };
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 2).unwrap();
        let counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 2);
        let solver = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        match solver.solve() {
            SolveOutcome::Feasible(sol) => {
                assert_ne!(sol.assignment["A"], sol.assignment["B"]);
            }
            SolveOutcome::Infeasible => panic!("expected a feasible solution"),
        }
    }

    #[test]
    fn grade_band_violation_is_rejected() {
        let a = camper("A", Grade::Kindergarten);
        let b = camper("B", Grade::Fourth);
        let dataset = Dataset {
            campers: vec![a, b],
            counselors: vec![],
        };
        let params = SolverParams {
            min_group_size: 1,
            max_group_size: 20,
            camper_per_counselor: 10,
            min_counselors_per_group: 1,
            grade_band_width: 2,
        };
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 1).unwrap();
        let counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 1);
        let solver = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        assert!(matches!(solver.solve(), SolveOutcome::Infeasible));
    }

    #[test]
    fn locked_group_is_respected() {
        let mut x = camper("X", Grade::Second);
        x.afternoon_group = Some(3);
        let rest: Vec<Camper> = (0..3).map(|i| camper(&format!("c{i}"), Grade::Second)).collect();
        let mut campers = vec![x];
        campers.extend(rest);
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
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 5).unwrap();
        let counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 5);
        let solver = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        match solver.solve() {
            SolveOutcome::Feasible(sol) => assert_eq!(sol.assignment["X"], 3),
            SolveOutcome::Infeasible => panic!("expected a feasible solution"),
        }
    }

    #[test]
    fn staffing_infeasibility_is_pruned_without_full_exploration() {
        let campers: Vec<Camper> = (0..50).map(|i| camper(&format!("c{i}"), Grade::Second)).collect();
        let dataset = Dataset {
            campers,
            counselors: vec![],
        };
        let params = SolverParams {
            min_group_size: 1,
            max_group_size: 30,
            camper_per_counselor: 10,
            min_counselors_per_group: 2,
            grade_band_width: 2,
        };
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 2).unwrap();
        // Only 1 counselor total, but each group needs >= 2 -> infeasible.
        let mut counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 2);
        counselor_rbl
            .counselor_domain
            .insert("only-one".to_string(), [0u32, 1].into_iter().collect());
        let solver = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        assert!(matches!(solver.solve(), SolveOutcome::Infeasible));
    }

    #[test]
    fn single_group_with_mutual_avoid_is_infeasible() {
        let mut a = camper("A", Grade::Second);
        a.avoid_with = vec!["B".to_string()];
        let b = camper("B", Grade::Second);
        let dataset = Dataset {
            campers: vec![a, b],
            counselors: vec![],
        };
        let params = SolverParams {
            min_group_size: 1,
            max_group_size: 20,
            camper_per_counselor: 10,
            min_counselors_per_group: 1,
            grade_band_width: 2,
        };
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 1).unwrap();
        let counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 1);
        let solver = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        assert!(matches!(solver.solve(), SolveOutcome::Infeasible));
    }

    #[test]
    fn empty_dataset_solves_trivially() {
        let dataset = Dataset::default();
        let params = SolverParams::afternoon_defaults();
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 1).unwrap();
        let counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 1);
        assert_eq!(camper_rbl.components.len(), 0);
        let solver = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        match solver.solve() {
            SolveOutcome::Feasible(sol) => assert!(sol.assignment.is_empty()),
            SolveOutcome::Infeasible => panic!("empty dataset should solve trivially"),
        }
    }

    #[test]
    fn determinism_across_runs() {
        let mut campers = vec![];
        for i in 0..20 {
            campers.push(camper(&format!("c{i}"), Grade::Third));
        }
        let dataset = Dataset {
            campers,
            counselors: vec![],
        };
        let params = SolverParams::afternoon_defaults();
        let camper_rbl = build_camper_rbl(&dataset, Session::Afternoon, 2).unwrap();
        let counselor_rbl = build_counselor_rbl(&dataset, Session::Afternoon, 2);

        let solver1 = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        let solver2 = CspSolver::new(&camper_rbl, &counselor_rbl, &dataset, &params);
        let (SolveOutcome::Feasible(a), SolveOutcome::Feasible(b)) = (solver1.solve(), solver2.solve())
        else {
            panic!("expected feasible solutions");
        };
        assert_eq!(a.assignment, b.assignment);
    }
}
