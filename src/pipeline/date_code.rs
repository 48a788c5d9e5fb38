//! Date code derivation for output file naming.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;

/// First long-form date in the report, e.g. `October 3, 2024`.
static LONG_FORM_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2}),\s+(\d{4})",
    )
    .expect("valid regex")
});

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Derives the 6-character `MMDDYY` date code used in output file names.
///
/// Uses the first recognizable long-form date in the extracted text, or the
/// current local date when none is present.
pub fn derive_date_code(text: &str) -> String {
    if let Some(captures) = LONG_FORM_DATE.captures(text) {
        let month_name = captures[1].to_lowercase();
        let month = MONTHS
            .iter()
            .position(|name| *name == month_name)
            .map(|index| index + 1)
            .unwrap_or(1);
        let day: u32 = captures[2].parse().unwrap_or(1);
        let year: u32 = captures[3].parse().unwrap_or(0);

        return format!("{:02}{:02}{:02}", month, day, year % 100);
    }

    Local::now().format("%m%d%y").to_string()
}
