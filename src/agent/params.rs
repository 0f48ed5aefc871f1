//! Reading parameter values out of free-text goals.
//!
//! Values come from two places, in priority order:
//!
//! 1. explicit `name=value` / `name: value` pairs, which let a goal supply
//!    any parameter an action schema declares;
//! 2. recognisers for things people actually write: ISO dates, relative
//!    stays ("next weekend", "tomorrow for 2 nights"), guest counts,
//!    `room-101`-style ids, UUIDs and capitalised names after "for"/"under".

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static KEY_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b([A-Za-z_][A-Za-z0-9_]*)\s*[=:]\s*("([^"]*)"|'([^']*)'|[^\s,;]+)"#).unwrap()
});
static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").unwrap());
static NIGHTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s+nights?\b").unwrap());
static GUESTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)\s+(?:guests?|people|persons?|adults?)\b").unwrap()
});
static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\b").unwrap()
});
static PERSON_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:for|under|named|name is|guest)\s+([A-Z][A-Za-z'\-]+(?:\s+[A-Z][A-Za-z'\-]+)*)")
        .unwrap()
});
/// Capitalised words the date recognisers own; never part of a name.
const DATE_WORDS: &[&str] = &[
    "next", "this", "weekend", "week", "tomorrow", "today", "tonight",
];
static NEXT_WEEKEND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bnext\s+weekend\b").unwrap());
static THIS_WEEKEND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:this\s+)?weekend\b").unwrap());
static NEXT_WEEK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bnext\s+week\b").unwrap());
static TOMORROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btomorrow\b").unwrap());
static TODAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:today|tonight)\b").unwrap());

/// A date range read from the goal; `end` is exclusive (the check-out day).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Everything recognised in one goal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalValues {
    /// Explicit `name=value` pairs, keyed by lowercase name.
    pub explicit: HashMap<String, String>,
    pub stay: Option<DateRange>,
    pub guests: Option<u32>,
    pub uuid: Option<String>,
    pub person_name: Option<String>,
    text: String,
}

impl GoalValues {
    /// Scan `goal`, resolving relative dates against `today`.
    pub fn extract(goal: &str, today: NaiveDate) -> Self {
        let explicit = KEY_VALUE
            .captures_iter(goal)
            .filter_map(|caps| {
                let key = caps.get(1)?.as_str().to_ascii_lowercase();
                let value = caps
                    .get(3)
                    .or_else(|| caps.get(4))
                    .or_else(|| caps.get(2))?
                    .as_str()
                    .to_string();
                Some((key, value))
            })
            .collect();

        Self {
            explicit,
            stay: parse_stay(goal, today),
            guests: GUESTS
                .captures(goal)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok()),
            uuid: UUID.find(goal).map(|m| m.as_str().to_ascii_lowercase()),
            person_name: person_name(goal),
            text: goal.to_string(),
        }
    }

    /// Explicit value for `name`, if the goal spelled one out.
    pub fn explicit(&self, name: &str) -> Option<&str> {
        self.explicit.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// First `<prefix>-<rest>` token in the goal, e.g. `room-101` for `room_id`.
    pub fn prefixed_id(&self, prefix: &str) -> Option<String> {
        let pattern = format!(r"(?i)\b{}-[A-Za-z0-9]+\b", regex::escape(prefix));
        Regex::new(&pattern)
            .ok()?
            .find(&self.text)
            .map(|m| m.as_str().to_ascii_lowercase())
    }
}

/// First capitalised name after "for"/"under"/..., minus date words.
fn person_name(goal: &str) -> Option<String> {
    PERSON_NAME.captures_iter(goal).find_map(|caps| {
        let words: Vec<&str> = caps
            .get(1)?
            .as_str()
            .split_whitespace()
            .take_while(|w| !DATE_WORDS.contains(&w.to_ascii_lowercase().as_str()))
            .collect();
        (!words.is_empty()).then(|| words.join(" "))
    })
}

/// Read a stay out of the goal text.
///
/// Two ISO dates give start and end; one ISO date or a relative phrase
/// gives the start. "for N nights" sets the length, which defaults to one
/// night, or the full Friday → Sunday span for weekend phrases.
pub fn parse_stay(goal: &str, today: NaiveDate) -> Option<DateRange> {
    let nights = NIGHTS
        .captures(goal)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .filter(|n| *n > 0);

    let iso: Vec<NaiveDate> = ISO_DATE
        .captures_iter(goal)
        .filter_map(|c| NaiveDate::parse_from_str(&c[1], "%Y-%m-%d").ok())
        .collect();

    let (start, default_end) = if let Some(&start) = iso.first() {
        (start, iso.get(1).copied())
    } else {
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        if NEXT_WEEKEND.is_match(goal) {
            let friday = monday + Duration::days(7 + 4);
            (friday, Some(friday + Duration::days(2)))
        } else if THIS_WEEKEND.is_match(goal) {
            let friday = monday + Duration::days(4);
            let start = friday.max(today);
            (start, Some((monday + Duration::days(6)).max(start + Duration::days(1))))
        } else if NEXT_WEEK.is_match(goal) {
            let next_monday = monday + Duration::days(7);
            (next_monday, Some(next_monday + Duration::days(7)))
        } else if TOMORROW.is_match(goal) {
            (today + Duration::days(1), None)
        } else if TODAY.is_match(goal) {
            (today, None)
        } else {
            return None;
        }
    };

    let end = match (nights, default_end) {
        (Some(n), _) => Duration::try_days(n).and_then(|d| start.checked_add_signed(d))?,
        (None, Some(end)) if end > start => end,
        _ => start.checked_add_signed(Duration::days(1))?,
    };

    Some(DateRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // 2026-10-19 is a Monday.
    const MONDAY: &str = "2026-10-19";

    #[test]
    fn test_next_weekend_is_friday_to_sunday_of_next_week() {
        let stay = parse_stay("Find available rooms for next weekend", date(MONDAY)).unwrap();
        assert_eq!(stay.start, date("2026-10-30"));
        assert_eq!(stay.end, date("2026-11-01"));

        // Same answer from any day of the current week.
        let stay = parse_stay("next weekend", date("2026-10-25")).unwrap();
        assert_eq!(stay.start, date("2026-10-30"));
    }

    #[test]
    fn test_this_weekend() {
        let stay = parse_stay("rooms this weekend", date(MONDAY)).unwrap();
        assert_eq!(stay.start, date("2026-10-23"));
        assert_eq!(stay.end, date("2026-10-25"));

        // On Sunday the weekend has one night left.
        let stay = parse_stay("rooms this weekend", date("2026-10-25")).unwrap();
        assert_eq!(stay.start, date("2026-10-25"));
        assert_eq!(stay.end, date("2026-10-26"));
    }

    #[test]
    fn test_next_week_and_nights() {
        let stay = parse_stay("something next week", date("2026-10-21")).unwrap();
        assert_eq!(stay.start, date("2026-10-26"));
        assert_eq!(stay.end, date("2026-11-02"));

        let stay = parse_stay("a room tomorrow for 3 nights", date(MONDAY)).unwrap();
        assert_eq!(stay.start, date("2026-10-20"));
        assert_eq!(stay.end, date("2026-10-23"));

        let stay = parse_stay("tonight", date(MONDAY)).unwrap();
        assert_eq!(stay.end, date("2026-10-20"));
    }

    #[test]
    fn test_iso_dates_win_over_relative_phrases() {
        let stay = parse_stay("from 2026-12-24 to 2026-12-27, not next weekend", date(MONDAY))
            .unwrap();
        assert_eq!(stay.start, date("2026-12-24"));
        assert_eq!(stay.end, date("2026-12-27"));

        let stay = parse_stay("arriving 2026-12-24 for 2 nights", date(MONDAY)).unwrap();
        assert_eq!(stay.end, date("2026-12-26"));
    }

    #[test]
    fn test_no_dates() {
        assert!(parse_stay("list all rooms", date(MONDAY)).is_none());
    }

    #[test]
    fn test_extract_values() {
        let values = GoalValues::extract(
            "Book room-202 for Ada Lovelace next weekend, 2 guests",
            date(MONDAY),
        );
        assert_eq!(values.person_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(values.guests, Some(2));
        assert_eq!(values.prefixed_id("room").as_deref(), Some("room-202"));
        assert!(values.stay.is_some());
        assert!(values.uuid.is_none());
    }

    #[test]
    fn test_extract_explicit_pairs_and_uuid() {
        let values = GoalValues::extract(
            r#"Cancel booking 3F2504E0-4F89-11D3-9A0C-0305E82C3301 reason="changed plans" guests=4"#,
            date(MONDAY),
        );
        assert_eq!(
            values.uuid.as_deref(),
            Some("3f2504e0-4f89-11d3-9a0c-0305e82c3301")
        );
        assert_eq!(values.explicit("reason"), Some("changed plans"));
        assert_eq!(values.explicit("GUESTS"), Some("4"));
    }

    #[test]
    fn test_oversized_night_count_yields_no_stay() {
        assert!(parse_stay("a room tomorrow for 100000000 nights", date(MONDAY)).is_none());
        assert!(parse_stay("a room tomorrow for 999999999999999 nights", date(MONDAY)).is_none());

        let values =
            GoalValues::extract("a room tomorrow for 100000000 nights", date(MONDAY));
        assert!(values.stay.is_none());
    }

    #[test]
    fn test_date_words_are_not_names() {
        let values = GoalValues::extract("Book room-101 for Next Weekend", date(MONDAY));
        assert!(values.person_name.is_none());

        let values = GoalValues::extract("Book room-101 for Tomorrow", date(MONDAY));
        assert!(values.person_name.is_none());

        let values =
            GoalValues::extract("Book room-101 for Ada Lovelace Next Weekend", date(MONDAY));
        assert_eq!(values.person_name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_lowercase_words_after_for_are_not_names() {
        let values = GoalValues::extract("Find available rooms for next weekend", date(MONDAY));
        assert!(values.person_name.is_none());
    }
}
