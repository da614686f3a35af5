//! RBL ("reduction layer") construction: contracts hard must-pair cliques
//! into components, intersects member eligibility into a component domain,
//! promotes avoid edges to the component level, and derives the domain each
//! counselor is eligible for.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{SolverParams, AFTERNOON_GROUP_COUNT_MAX, AFTERNOON_GROUP_COUNT_MIN};
use crate::error::RblError;
use crate::models::{Dataset, Session};

use super::dsu::UnionFind;

/// Per-session reduction of the camper population into must-pair
/// components with group domains and avoid edges.
#[derive(Debug, Clone)]
pub struct CamperRbl {
    pub session: Session,
    pub num_groups: u32,
    /// root name -> sorted member names.
    pub components: BTreeMap<String, Vec<String>>,
    /// root name -> admissible group indices.
    pub comp_domain: BTreeMap<String, BTreeSet<u32>>,
    /// root name -> other component roots it must not share a group with.
    pub comp_avoid: BTreeMap<String, BTreeSet<String>>,
}

/// Per-session counselor eligibility.
#[derive(Debug, Clone)]
pub struct CounselorRbl {
    pub session: Session,
    /// counselor name -> admissible group indices. Ineligible counselors
    /// are omitted entirely rather than mapped to an empty set.
    pub counselor_domain: BTreeMap<String, BTreeSet<u32>>,
}

fn full_domain(num_groups: u32) -> BTreeSet<u32> {
    (0..num_groups).collect()
}

fn domain_for_lock(lock: Option<u32>, num_groups: u32) -> BTreeSet<u32> {
    match lock {
        Some(g) => BTreeSet::from([g]),
        None => full_domain(num_groups),
    }
}

/// Builds the camper-side RBL for a session at a fixed `num_groups`.
pub fn build_camper_rbl(
    dataset: &Dataset,
    session: Session,
    num_groups: u32,
) -> Result<CamperRbl, RblError> {
    let eligible: BTreeMap<&str, &crate::models::Camper> = dataset
        .campers
        .iter()
        .filter(|c| c.is_eligible(session))
        .map(|c| (c.name(), c))
        .collect();

    let mut uf = UnionFind::new();
    for name in eligible.keys() {
        uf.insert(name);
    }
    for camper in eligible.values() {
        for mate in &camper.pair_with {
            if eligible.contains_key(mate.as_str()) {
                uf.union(camper.name(), mate);
            }
        }
    }

    let mut components: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for &name in eligible.keys() {
        let root = uf.find(name);
        components.entry(root).or_default().push(name.to_string());
    }
    for members in components.values_mut() {
        members.sort();
    }

    let mut comp_domain: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();
    for (root, members) in &components {
        let mut domain: Option<BTreeSet<u32>> = None;
        for member in members {
            let camper = eligible[member.as_str()];
            let member_domain = domain_for_lock(camper.group_lock(session), num_groups);
            domain = Some(match domain {
                None => member_domain,
                Some(acc) => acc.intersection(&member_domain).copied().collect(),
            });
        }
        let domain = domain.unwrap_or_default();
        if domain.is_empty() {
            return Err(RblError::EmptyDomain {
                root: root.clone(),
                members: members.clone(),
            });
        }
        comp_domain.insert(root.clone(), domain);
    }

    let mut comp_avoid: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for camper in eligible.values() {
        for other_name in &camper.avoid_with {
            if !eligible.contains_key(other_name.as_str()) {
                continue;
            }
            let rc = uf.find(camper.name());
            let ra = uf.find(other_name);
            if ra == rc {
                return Err(RblError::Contradiction {
                    camper: camper.name().to_string(),
                    other: other_name.clone(),
                });
            }
            comp_avoid.entry(rc.clone()).or_default().insert(ra.clone());
            comp_avoid.entry(ra).or_default().insert(rc);
        }
    }

    Ok(CamperRbl {
        session,
        num_groups,
        components,
        comp_domain,
        comp_avoid,
    })
}

/// Builds the counselor-side RBL for a session at a fixed `num_groups`.
pub fn build_counselor_rbl(dataset: &Dataset, session: Session, num_groups: u32) -> CounselorRbl {
    let mut counselor_domain = BTreeMap::new();
    for counselor in &dataset.counselors {
        if !counselor.is_eligible(session) {
            continue;
        }
        let domain = domain_for_lock(counselor.group_lock(session), num_groups);
        counselor_domain.insert(counselor.name().to_string(), domain);
    }
    CounselorRbl {
        session,
        counselor_domain,
    }
}

/// Number of campers eligible for `session`.
pub fn eligible_camper_count(dataset: &Dataset, session: Session) -> u32 {
    dataset
        .campers
        .iter()
        .filter(|c| c.is_eligible(session))
        .count() as u32
}

/// Number of counselors eligible for `session`.
pub fn eligible_counselor_count(dataset: &Dataset, session: Session) -> u32 {
    dataset
        .counselors
        .iter()
        .filter(|c| c.is_eligible(session))
        .count() as u32
}

/// Chooses the largest afternoon group count in
/// `[AFTERNOON_GROUP_COUNT_MIN, AFTERNOON_GROUP_COUNT_MAX]` that is
/// feasible under size and staffing bounds, falling back to the minimum if
/// none qualify (letting the CSP solver fail downstream instead).
pub fn select_afternoon_group_count(
    num_campers: u32,
    num_counselors: u32,
    params: &SolverParams,
) -> u32 {
    let feasible = (AFTERNOON_GROUP_COUNT_MIN..=AFTERNOON_GROUP_COUNT_MAX)
        .rev()
        .find(|&g| {
            let size_ok = g * params.min_group_size <= num_campers
                && num_campers <= g * params.max_group_size;
            let camper_ratio_need = num_campers.div_ceil(params.camper_per_counselor);
            let staffing_need = camper_ratio_need.max(g * params.min_counselors_per_group);
            size_ok && num_counselors >= staffing_need
        });

    match feasible {
        Some(g) => {
            log::debug!("afternoon group count {g} selected for {num_campers} campers, {num_counselors} counselors");
            g
        }
        None => {
            log::warn!(
                "no feasible afternoon group count for {num_campers} campers / {num_counselors} counselors; \
                 defaulting to {AFTERNOON_GROUP_COUNT_MIN} and deferring to the CSP solver"
            );
            AFTERNOON_GROUP_COUNT_MIN
        }
    }
}
