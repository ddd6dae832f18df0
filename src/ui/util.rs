use chrono::NaiveDate;
use rust_decimal::Decimal;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format an expense amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`. Amounts are stored as non-negative
/// magnitudes, so no sign handling is needed.
pub(crate) fn format_amount(val: Decimal) -> String {
    let formatted = format!("{val:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    format!("${with_commas}.{dec_part}")
}

/// Human-readable period label, e.g. `(2024, 6)` → `"July 2024"`.
/// `month0` is zero-based.
pub(crate) fn period_title(year: i32, month0: u32) -> String {
    let name = MONTH_NAMES.get(month0 as usize).unwrap_or(&"?");
    format!("{name} {year}")
}

/// Short day label for chart axes, e.g. `"Jul 05"`.
pub(crate) fn day_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Short month label for chart axes, e.g. `"Jul 24"`.
pub(crate) fn month_label(date: NaiveDate) -> String {
    date.format("%b %y").to_string()
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep the cursor
/// visible within a page of `page` rows.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep the cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
