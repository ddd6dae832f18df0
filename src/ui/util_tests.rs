#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    // multi-byte UTF-8 must not be split mid-character
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_plain() {
    assert_eq!(format_amount(dec!(42.50)), "$42.50");
}

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_rounds_to_cents() {
    assert_eq!(format_amount(dec!(9.999)), "$10.00");
}

// ── period and day labels ─────────────────────────────────────

#[test]
fn test_period_title() {
    assert_eq!(period_title(2024, 6), "July 2024");
    assert_eq!(period_title(2024, 0), "January 2024");
    assert_eq!(period_title(2023, 11), "December 2023");
}

#[test]
fn test_day_label() {
    let date = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
    assert_eq!(day_label(date), "Jul 05");
}

#[test]
fn test_month_label() {
    let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    assert_eq!(month_label(date), "Jul 24");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_cursor() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!((index, scroll), (1, 0));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (9, 5);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!((index, scroll), (9, 5));
}

#[test]
fn test_scroll_down_advances_window() {
    let (mut index, mut scroll) = (4, 0);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!((index, scroll), (5, 1));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_up_saturates_at_zero() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
}

#[test]
fn test_scroll_to_top() {
    let (mut index, mut scroll) = (7, 5);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}
