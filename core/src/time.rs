use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::error::{Result, TardyError};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Parses a calendar date relative to `today`.
///
/// Accepts `YYYY-MM-DD`, `today`/`tod`, `yesterday`/`yes`, `-Nd`/`-Nw`
/// offsets into the past, and weekday names. A weekday resolves to the most
/// recent such day, today included, since tardiness is recorded after the fact.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TardyError::validation("date must not be empty"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (-Nd, -Nw)
    if let Some(rest) = input.strip_prefix('-') {
        if rest.len() >= 2 {
            let (num_str, unit) = rest.split_at(rest.len() - 1);
            let digits = !num_str.is_empty() && num_str.bytes().all(|b| b.is_ascii_digit());
            if let Some(count) = num_str.parse::<u32>().ok().filter(|_| digits) {
                let offset = match unit {
                    "d" => Duration::try_days(count as i64),
                    "w" => Duration::try_weeks(count as i64),
                    _ => {
                        return Err(TardyError::validation(format!(
                            "unknown unit in relative date: {}",
                            unit
                        )))
                    }
                };
                return offset
                    .and_then(|offset| today.checked_sub_signed(offset))
                    .ok_or_else(|| {
                        TardyError::validation(format!("relative date out of range: {}", input))
                    });
            }
        }
    }

    // 3. Weekday names
    if let Ok(target) = parse_weekday_str(input) {
        let back = (today.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7;
        return Ok(today - Duration::days(back as i64));
    }

    // 4. Standard format
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| TardyError::validation(format!("could not parse date: {}", input)))
}

fn parse_weekday_str(s: &str) -> std::result::Result<Weekday, ()> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_week_bounds_for_every_weekday() {
        // 2024-01-01 is a Monday.
        for offset in 0..7 {
            let date = d(2024, 1, 1) + Duration::days(offset);
            assert_eq!(week_start(date), d(2024, 1, 1));
            assert_eq!(week_end(date), d(2024, 1, 7));
        }
    }

    #[test]
    fn test_week_spanning_year_boundary() {
        // Wednesday 2025-01-01 belongs to the week starting Monday 2024-12-30.
        assert_eq!(week_start(d(2025, 1, 1)), d(2024, 12, 30));
        assert_eq!(week_end(d(2025, 1, 1)), d(2025, 1, 5));
    }

    #[test]
    fn test_parse_keywords_and_offsets() {
        let today = d(2024, 1, 10); // Wednesday
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date("YES", today).unwrap(), d(2024, 1, 9));
        assert_eq!(parse_date("-3d", today).unwrap(), d(2024, 1, 7));
        assert_eq!(parse_date("-1w", today).unwrap(), d(2024, 1, 3));
        assert!(parse_date("-3x", today).is_err());
    }

    #[test]
    fn test_relative_offsets_out_of_range_or_signed() {
        let today = d(2024, 1, 10);
        assert!(parse_date("-9999999999d", today).unwrap_err().is_validation());
        assert!(parse_date("-4000000000w", today).unwrap_err().is_validation());
        assert!(parse_date("-99999999d", today).unwrap_err().is_validation());
        assert!(parse_date("--5d", today).unwrap_err().is_validation());
        assert!(parse_date("-+5d", today).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_weekday_looks_back() {
        let today = d(2024, 1, 10); // Wednesday
        assert_eq!(parse_date("wed", today).unwrap(), today);
        assert_eq!(parse_date("mon", today).unwrap(), d(2024, 1, 8));
        assert_eq!(parse_date("thursday", today).unwrap(), d(2024, 1, 4));
    }

    #[test]
    fn test_parse_iso_and_garbage() {
        let today = d(2024, 1, 10);
        assert_eq!(parse_date("2023-12-31", today).unwrap(), d(2023, 12, 31));
        assert!(parse_date("31/12/2023", today).unwrap_err().is_validation());
        assert!(parse_date("", today).is_err());
    }
}
