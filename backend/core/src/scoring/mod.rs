//! Objective scoring: soft preferences scored after both solver phases have
//! produced a hard-feasible assignment. Purely additive, never pruning or
//! influencing search — it only explains how good a feasible solution is.

use std::collections::BTreeMap;

use crate::models::Dataset;

const PREFERRED_AGE_MATCH: f64 = 10.0;
const LANGUAGE_MATCH: f64 = 2.0;
const PAIR_WITH: f64 = 8.0;
const AVOID_WITH: f64 = -15.0;

const FRIEND_TOGETHER: f64 = 5.0;
const LANGUAGE_MATCH_COUNSELOR: f64 = 3.0;
const GENDER_BALANCE: f64 = 10.0;

/// A single entity's (counselor, camper, or group's) contribution to the
/// total score, with a human-readable trail of what produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityScore {
    pub name: String,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// The full scoring breakdown for a feasible solution.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub counselor_entries: Vec<EntityScore>,
    pub camper_entries: Vec<EntityScore>,
    pub group_entries: Vec<EntityScore>,
}

/// Scores a complete solution: counselor-side preferences, camper-side
/// preferences, and per-group gender balance.
pub fn score_solution(
    dataset: &Dataset,
    campers_by_group: &BTreeMap<u32, Vec<String>>,
    counselor_assignment: &BTreeMap<String, u32>,
) -> ScoreBreakdown {
    let counselor_entries = score_counselors(dataset, campers_by_group, counselor_assignment);
    let camper_entries = score_campers(dataset, campers_by_group, counselor_assignment);
    let group_entries = score_groups(dataset, campers_by_group);

    let total = counselor_entries.iter().map(|e| e.score).sum::<f64>()
        + camper_entries.iter().map(|e| e.score).sum::<f64>()
        + group_entries.iter().map(|e| e.score).sum::<f64>();

    ScoreBreakdown {
        total,
        counselor_entries,
        camper_entries,
        group_entries,
    }
}

/// Per-group language multiset: group index -> (language -> camper count in
/// that group speaking it). A camper speaking two languages contributes to
/// both counts.
fn group_language_counts(
    dataset: &Dataset,
    campers_by_group: &BTreeMap<u32, Vec<String>>,
) -> BTreeMap<u32, BTreeMap<String, u32>> {
    let campers_by_name: BTreeMap<&str, &crate::models::Camper> = dataset
        .campers
        .iter()
        .map(|c| (c.name(), c))
        .collect();

    campers_by_group
        .iter()
        .map(|(&group, members)| {
            let mut counts: BTreeMap<String, u32> = BTreeMap::new();
            for member in members {
                if let Some(camper) = campers_by_name.get(member.as_str()) {
                    for language in &camper.demographics.spoken_languages {
                        *counts.entry(language.clone()).or_insert(0) += 1;
                    }
                }
            }
            (group, counts)
        })
        .collect()
}

fn score_counselors(
    dataset: &Dataset,
    campers_by_group: &BTreeMap<u32, Vec<String>>,
    counselor_assignment: &BTreeMap<String, u32>,
) -> Vec<EntityScore> {
    let campers_by_name: BTreeMap<&str, &crate::models::Camper> = dataset
        .campers
        .iter()
        .map(|c| (c.name(), c))
        .collect();
    let language_counts = group_language_counts(dataset, campers_by_group);

    dataset
        .counselors
        .iter()
        .filter_map(|counselor| {
            let group = *counselor_assignment.get(counselor.name())?;
            let group_members = campers_by_group.get(&group).cloned().unwrap_or_default();

            let mut score = 0.0;
            let mut reasons = Vec::new();

            if let Some(preferred) = &counselor.preferred_age_group {
                let matches = group_members
                    .iter()
                    .filter(|name| {
                        campers_by_name
                            .get(name.as_str())
                            .is_some_and(|c| c.grade.age_band() == preferred)
                    })
                    .count();
                if matches > 0 {
                    score += matches as f64 * PREFERRED_AGE_MATCH;
                    reasons.push(format!("{matches} preferred-age-band campers"));
                }
            }

            let counts = language_counts.get(&group);
            let language_matches: u32 = counselor
                .demographics
                .spoken_languages
                .iter()
                .map(|language| counts.and_then(|c| c.get(language)).copied().unwrap_or(0))
                .sum();
            if language_matches > 0 {
                score += language_matches as f64 * LANGUAGE_MATCH;
                reasons.push(format!("{language_matches} shared-language occurrences"));
            }

            let pair_matches = counselor
                .pair_with
                .iter()
                .filter(|name| counselor_assignment.get(name.as_str()) == Some(&group))
                .count();
            if pair_matches > 0 {
                score += pair_matches as f64 * PAIR_WITH;
                reasons.push(format!("{pair_matches} requested pairings honored"));
            }

            let avoid_matches = counselor
                .avoid_with
                .iter()
                .filter(|name| counselor_assignment.get(name.as_str()) == Some(&group))
                .count();
            if avoid_matches > 0 {
                score += avoid_matches as f64 * AVOID_WITH;
                reasons.push(format!("{avoid_matches} avoided campers present"));
            }

            Some(EntityScore {
                name: counselor.name().to_string(),
                score,
                reasons,
            })
        })
        .collect()
}

fn score_campers(
    dataset: &Dataset,
    campers_by_group: &BTreeMap<u32, Vec<String>>,
    counselor_assignment: &BTreeMap<String, u32>,
) -> Vec<EntityScore> {
    let group_by_camper: BTreeMap<&str, u32> = campers_by_group
        .iter()
        .flat_map(|(&g, members)| members.iter().map(move |m| (m.as_str(), g)))
        .collect();

    let counselors_by_group: BTreeMap<u32, Vec<&crate::models::Counselor>> = dataset
        .counselors
        .iter()
        .filter_map(|c| counselor_assignment.get(c.name()).map(|&g| (g, c)))
        .fold(BTreeMap::new(), |mut acc, (g, c)| {
            acc.entry(g).or_default().push(c);
            acc
        });

    dataset
        .campers
        .iter()
        .filter_map(|camper| {
            let group = *group_by_camper.get(camper.name())?;
            let group_members = &campers_by_group[&group];

            let mut score = 0.0;
            let mut reasons = Vec::new();

            let friend_matches = camper
                .friends
                .iter()
                .filter(|f| group_members.contains(f))
                .count();
            if friend_matches > 0 {
                score += friend_matches as f64 * FRIEND_TOGETHER;
                reasons.push(format!("{friend_matches} friends in the same group"));
            }

            let assigned_counselors = counselors_by_group.get(&group).cloned().unwrap_or_default();
            let shared_language_counselors = assigned_counselors
                .iter()
                .filter(|c| {
                    c.demographics
                        .spoken_languages
                        .iter()
                        .any(|l| camper.demographics.spoken_languages.contains(l))
                })
                .count();
            if shared_language_counselors > 0 {
                score += shared_language_counselors as f64 * LANGUAGE_MATCH_COUNSELOR;
                reasons.push(format!(
                    "{shared_language_counselors} counselors share a language"
                ));
            }

            Some(EntityScore {
                name: camper.name().to_string(),
                score,
                reasons,
            })
        })
        .collect()
}

fn score_groups(
    dataset: &Dataset,
    campers_by_group: &BTreeMap<u32, Vec<String>>,
) -> Vec<EntityScore> {
    let genders_by_name: BTreeMap<&str, &str> = dataset
        .campers
        .iter()
        .map(|c| (c.name(), c.demographics.gender.as_str()))
        .collect();

    campers_by_group
        .iter()
        .map(|(group, members)| {
            let genders: Vec<&str> = members
                .iter()
                .filter_map(|m| genders_by_name.get(m.as_str()).copied())
                .collect();
            let balance = gender_balance_score(&genders);
            (
                group,
                EntityScore {
                    name: format!("group-{group}"),
                    score: balance * GENDER_BALANCE,
                    reasons: vec![format!("gender balance {balance:.2}")],
                },
            )
        })
        .map(|(_, entry)| entry)
        .collect()
}

/// 1.0 for a perfectly balanced M/F split, 0.0 for an all-one-gender group.
/// Tags outside `"M"`/`"F"` are counted toward the group total but do not
/// otherwise influence the ratio.
fn gender_balance_score(genders: &[&str]) -> f64 {
    if genders.is_empty() {
        return 0.0;
    }
    let male = genders.iter().filter(|&&g| g == "M").count() as f64;
    let female = genders.iter().filter(|&&g| g == "F").count() as f64;
    let total = genders.len() as f64;
    if male + female == 0.0 {
        return 0.0;
    }
    1.0 - (male - female).abs() / total
}
