//! Request field checks. Pure functions, independent of store state.
//!
//! Lengths are counted in characters after trimming surrounding whitespace.

use regex::Regex;

pub const NAME_MAX_CHARS: usize = 100;
pub const TITLE_MAX_CHARS: usize = 200;
pub const SUMMARY_MAX_CHARS: usize = 1000;
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 10;

fn non_blank_within(value: &str, max_chars: usize) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= max_chars
}

pub fn valid_name(name: &str) -> bool {
    non_blank_within(name, NAME_MAX_CHARS)
}

/// `local@domain` with exactly one `@`, a non-empty local part and a `.` in the domain.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@]+@[^@]*\.[^@]*$").is_ok_and(|re| re.is_match(email))
}

pub fn valid_title(title: &str) -> bool {
    non_blank_within(title, TITLE_MAX_CHARS)
}

pub fn valid_summary(summary: &str) -> bool {
    non_blank_within(summary, SUMMARY_MAX_CHARS)
}

pub fn valid_rating(rating: i64) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&rating)
}
