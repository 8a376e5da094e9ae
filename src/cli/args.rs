//! Prefix-style argument parsing (`d/Lunch t/Work c/Food`).

use chrono::{Local, NaiveDate};

use crate::ledger::MonthKey;

use super::core::CommandError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Arguments split into bare positionals and `prefix/value` fields.
///
/// Words following a field that carry no known prefix are appended to that
/// field's value, so `d/Lunch with team` reads as one description.
#[derive(Debug, Default, PartialEq)]
pub struct ArgMap {
    positional: Vec<String>,
    fields: Vec<(&'static str, String)>,
}

impl ArgMap {
    pub fn parse(args: &[&str], prefixes: &[&'static str]) -> Self {
        let mut map = ArgMap::default();
        for token in args {
            if let Some((prefix, value)) = split_prefix(token, prefixes) {
                map.fields.push((prefix, value.to_string()));
            } else if let Some((_, value)) = map.fields.last_mut() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(token);
            } else {
                map.positional.push(token.to_string());
            }
        }
        map
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Last value given for `prefix`.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| *name == prefix)
            .map(|(_, value)| value.trim())
    }

    pub fn all(&self, prefix: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(name, _)| *name == prefix)
            .map(|(_, value)| value.trim().to_string())
            .collect()
    }

    pub fn has(&self, prefix: &str) -> bool {
        self.fields.iter().any(|(name, _)| *name == prefix)
    }

    pub fn require(&self, prefix: &str, what: &str) -> Result<&str, CommandError> {
        match self.get(prefix) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(CommandError::InvalidArguments(format!(
                "missing {what} (use {prefix}/...)"
            ))),
        }
    }
}

fn split_prefix<'a>(token: &'a str, prefixes: &[&'static str]) -> Option<(&'static str, &'a str)> {
    let (head, tail) = token.split_once('/')?;
    prefixes
        .iter()
        .find(|prefix| prefix.eq_ignore_ascii_case(head))
        .map(|prefix| (*prefix, tail))
}

pub fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let trimmed = raw.trim().trim_start_matches('$');
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not a valid amount"
        ))),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a date in YYYY-MM-DD format"))
    })
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Reads `m/` and `y/`, defaulting each to the current month and year.
pub fn parse_month(args: &ArgMap) -> Result<MonthKey, CommandError> {
    let current = MonthKey::current();
    let month = match args.get("m") {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a valid month"))
        })?,
        None => current.month,
    };
    let year = match args.get("y") {
        Some(raw) => raw.parse::<i32>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a valid year"))
        })?,
        None => current.year,
    };
    Ok(MonthKey::new(month, year)?)
}

/// A single 1-based position or an inclusive `start-end` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positions {
    Single(usize),
    Range(usize, usize),
}

pub fn parse_positions(raw: &str) -> Result<Positions, CommandError> {
    let invalid =
        || CommandError::InvalidArguments(format!("`{raw}` is not a valid index or range"));
    match raw.trim().split_once('-') {
        Some((start, end)) => {
            let start = start.trim().parse().map_err(|_| invalid())?;
            let end = end.trim().parse().map_err(|_| invalid())?;
            Ok(Positions::Range(start, end))
        }
        None => raw.trim().parse().map(Positions::Single).map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_absorb_following_words() {
        let args = ArgMap::parse(
            &["3000", "d/Monthly", "salary", "t/Work", "t/Main", "job"],
            &["d", "t"],
        );
        assert_eq!(args.positional(), ["3000"]);
        assert_eq!(args.get("d"), Some("Monthly salary"));
        assert_eq!(args.all("t"), ["Work", "Main job"]);
        assert!(!args.has("c"));
    }

    #[test]
    fn unknown_prefixes_stay_literal() {
        let args = ArgMap::parse(&["d/Rent", "n/a"], &["d"]);
        assert_eq!(args.get("d"), Some("Rent n/a"));
    }

    #[test]
    fn require_reports_missing_field() {
        let args = ArgMap::parse(&["12"], &["d"]);
        let err = args.require("d", "description").unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn amounts_must_be_non_negative_numbers() {
        assert_eq!(parse_amount("25.50").unwrap(), 25.5);
        assert_eq!(parse_amount("$4").unwrap(), 4.0);
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn positions_accept_single_and_range() {
        assert_eq!(parse_positions("3").unwrap(), Positions::Single(3));
        assert_eq!(parse_positions("2-4").unwrap(), Positions::Range(2, 4));
        assert!(parse_positions("x-4").is_err());
        assert!(parse_positions("").is_err());
    }

    #[test]
    fn month_arguments_are_validated() {
        let args = ArgMap::parse(&["m/4", "y/2025"], &["m", "y"]);
        assert_eq!(parse_month(&args).unwrap(), MonthKey::new(4, 2025).unwrap());

        let args = ArgMap::parse(&["m/13"], &["m", "y"]);
        assert!(parse_month(&args).is_err());
    }

    #[test]
    fn dates_use_iso_format() {
        assert_eq!(
            parse_date("2025-04-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
        assert!(parse_date("01/04/2025").is_err());
    }
}
