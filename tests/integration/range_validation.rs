//! Integration tests for date range validation

use chrono::NaiveDate;
use vessel_track_downloader::range::{parse_date, validate, DateRange, RangeError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const TODAY: (i32, u32, u32) = (2025, 12, 27);

fn today() -> NaiveDate {
    date(TODAY.0, TODAY.1, TODAY.2)
}

#[test]
fn test_half_year_range() {
    assert_eq!(validate("2022-01-08", "2022-07-08", today()), Ok(181));
}

#[test]
fn test_multi_year_range_ending_yesterday() {
    let range = DateRange::new("2022-01-08", "2025-12-26", today()).unwrap();
    assert_eq!(range.days(), 1448);
    assert_eq!(range.start(), date(2022, 1, 8));
    assert_eq!(range.end(), date(2025, 12, 26));
}

#[test]
fn test_leap_day_is_counted() {
    assert_eq!(validate("2024-02-28", "2024-03-01", today()), Ok(2));
    assert_eq!(validate("2023-02-28", "2023-03-01", today()), Ok(1));
}

#[test]
fn test_end_before_start_is_invalid() {
    assert_eq!(
        validate("2022-02-01", "2022-01-31", today()),
        Err(RangeError::InvalidRange {
            start: date(2022, 2, 1),
            end: date(2022, 1, 31),
        })
    );
}

#[test]
fn test_end_today_is_rejected() {
    assert_eq!(
        validate("2025-01-01", "2025-12-27", today()),
        Err(RangeError::TodayAsEnd { end: today() })
    );
}

#[test]
fn test_single_day_today_is_rejected() {
    assert!(matches!(
        DateRange::new(today(), today(), today()),
        Err(RangeError::TodayAsEnd { .. })
    ));
}

#[test]
fn test_inverted_check_runs_before_today_check() {
    // Both rules are broken; the inverted range is reported
    assert!(matches!(
        validate("2025-12-28", "2025-12-27", today()),
        Err(RangeError::InvalidRange { .. })
    ));
}

#[test]
fn test_future_end_is_accepted() {
    assert_eq!(validate("2025-12-27", "2025-12-28", today()), Ok(1));
}

#[test]
fn test_malformed_dates_are_format_errors() {
    for input in ["2022/01/08", "08-01-2022", "2022-13-01", "2022-02-30", "", "yesterday"] {
        match validate(input, "2022-07-08", today()) {
            Err(RangeError::Format { input: got, .. }) => assert_eq!(got, input),
            other => panic!("{input:?} gave {other:?}"),
        }
    }
}

#[test]
fn test_malformed_end_reported_even_with_valid_start() {
    assert!(matches!(
        validate("2022-01-08", "2022-7-8x", today()),
        Err(RangeError::Format { .. })
    ));
}

#[test]
fn test_parsed_dates_and_strings_agree() {
    let from_str = DateRange::new("2023-05-01", "2023-06-01", today()).unwrap();
    let from_dates = DateRange::new(
        parse_date("2023-05-01").unwrap(),
        parse_date("2023-06-01").unwrap(),
        today(),
    )
    .unwrap();
    assert_eq!(from_str, from_dates);
    assert_eq!(from_str.to_string(), "2023-05-01..2023-06-01");
}
