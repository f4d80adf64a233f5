use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use tardy_core::{expand_key, parse_args, parse_date, AddEntry};

const KNOWN_KEYS: [&str; 3] = ["date", "minutes", "manager"];
const KEY_ALIASES: [(&str, &str); 3] = [("min", "minutes"), ("mg", "manager"), ("mgr", "manager")];

/// Builds an add request from `name words... key:value...` arguments.
///
/// `date` defaults to today. `minutes` is required and kept signed so the
/// service reports negative values itself.
pub fn build_entry(args: &[String], today: NaiveDate) -> Result<AddEntry> {
    let parsed = parse_args(args);
    if parsed.name.trim().is_empty() {
        bail!("employee name is required");
    }

    let mut fields = HashMap::new();
    for (key, value) in parsed.metadata {
        let full_key = expand_key(&key, &KNOWN_KEYS, &KEY_ALIASES)?;
        if fields.insert(full_key.clone(), value).is_some() {
            bail!("'{}' given more than once", full_key);
        }
    }

    let date = match fields.get("date") {
        Some(d) => parse_date(d, today)?,
        None => today,
    };

    let minutes = fields
        .get("minutes")
        .ok_or_else(|| anyhow!("minutes late is required (min:<n>)"))?;
    let minutes: i64 = minutes
        .trim()
        .parse()
        .with_context(|| format!("minutes late must be a whole number, got '{}'", minutes))?;

    let mut entry = AddEntry::new(parsed.name, date, minutes);
    if let Some(manager) = fields.get("manager").filter(|m| !m.trim().is_empty()) {
        entry = entry.with_manager(manager.trim());
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn today() -> NaiveDate {
        // Wednesday
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    #[test]
    fn test_full_entry() {
        let entry = build_entry(&args(&["Jane", "Doe", "d:yes", "mi:15", "mgr:Dana"]), today()).unwrap();
        assert_eq!(entry.name, "Jane Doe");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(entry.minutes_late, 15);
        assert_eq!(entry.manager_override.as_deref(), Some("Dana"));
    }

    #[test]
    fn test_date_defaults_to_today() {
        let entry = build_entry(&args(&["Ann", "min:5"]), today()).unwrap();
        assert_eq!(entry.date, today());
        assert_eq!(entry.manager_override, None);
    }

    #[test]
    fn test_negative_minutes_pass_through() {
        let entry = build_entry(&args(&["Ann", "min:-5"]), today()).unwrap();
        assert_eq!(entry.minutes_late, -5);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(build_entry(&args(&["min:5"]), today()).is_err());
        assert!(build_entry(&args(&["Ann"]), today()).is_err());
        assert!(build_entry(&args(&["Ann", "min:abc"]), today()).is_err());
        assert!(build_entry(&args(&["Ann", "m:5"]), today()).is_err());
        assert!(build_entry(&args(&["Ann", "min:5", "minutes:6"]), today()).is_err());
        assert!(build_entry(&args(&["Ann", "min:5", "date:someday"]), today()).is_err());
    }
}
