use std::sync::OnceLock;

use regex::Regex;

use crate::models::resume::WorkExperience;

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(1[89]\d{2}|2\d{3})\b").expect("valid year regex"))
}

/// Pulls a four-digit year out of a free-form date such as `2015-06`, `Jun 2015`
/// or `2015`. Returns `None` for values like `Present` or an empty field.
pub fn start_year(date: &str) -> Option<i32> {
    year_pattern()
        .captures(date)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Years of experience = `current_year` minus the earliest parseable start year.
/// Zero when no entry has a usable start date. Never negative.
pub fn years_of_experience(work: &[WorkExperience], current_year: i32) -> u32 {
    work.iter()
        .filter_map(|job| start_year(&job.start_date))
        .min()
        .map(|earliest| (current_year - earliest).max(0) as u32)
        .unwrap_or(0)
}
