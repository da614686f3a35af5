//! Shared test utilities for camp-core integration tests.

use camp_core::models::{Camper, Counselor, DaySchedule, Demographics, Grade, WeeklySchedule};

#[allow(dead_code)]
pub fn camper(name: &str, grade: Grade) -> Camper {
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

#[allow(dead_code)]
pub fn counselor(name: &str) -> Counselor {
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
            monday: DaySchedule {
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
