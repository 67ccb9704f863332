// File: ./src/model/codec.rs
// The dateString data type: DD/MM/YYYY matching, parsing and formatting
use crate::model::grid::CellValue;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

// Unanchored on purpose: type inference has always accepted the pattern
// anywhere inside a longer string, and stored data relies on it.
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").unwrap());

/// Edit input as handed over by a grid cell editor. `new_value` is whatever
/// the editor produced, which may be null.
#[derive(Debug, Clone, Default)]
pub struct EditInput {
    pub new_value: Option<CellValue>,
}

impl EditInput {
    pub fn text(s: &str) -> Self {
        Self {
            new_value: Some(CellValue::Text(s.to_string())),
        }
    }
}

/// The `dateString` data type definition.
///
/// There is exactly one variant, so the hook points a grid consumes (value
/// parser, value formatter, type matcher, date bridge) are plain methods on
/// this struct rather than a trait object.
///
/// Every operation is a pure function of its input. None of them can fail:
/// invalid or ambiguous input degrades to an absent result (`None`, `false`,
/// `""`) so an editing surface can silently reject the input and let the user
/// retry, instead of tearing down the cell editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateStringCodec;

impl DateStringCodec {
    /// Classifies an arbitrary cell value. Only text can be a date string;
    /// null and every non-text value are rejected outright.
    pub fn matches(&self, value: &CellValue) -> bool {
        match value {
            CellValue::Text(s) => DATE_PATTERN.is_match(s),
            _ => false,
        }
    }

    /// Gate for edit commits: returns the raw text unchanged when it holds
    /// the date pattern, otherwise no stored value. Never reformats.
    pub fn parse_edit_value(&self, input: &EditInput) -> Option<String> {
        match &input.new_value {
            Some(CellValue::Text(s)) if DATE_PATTERN.is_match(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Stored values are already in canonical form, so display is a
    /// pass-through; an absent value renders as an empty cell.
    pub fn format_for_display(&self, value: Option<&str>) -> String {
        value.unwrap_or("").to_string()
    }

    /// Bridge into a grid's generic date-filtering subsystem. Splits on `/`
    /// and reads the segments day-first. Anything other than exactly three
    /// segments is "no value", as are segments that fail integer parsing or
    /// day/month/year combinations chrono rejects.
    pub fn to_calendar_date(&self, text: Option<&str>) -> Option<NaiveDate> {
        let text = text?;
        if text.is_empty() {
            return None;
        }
        let parts: Vec<&str> = text.split('/').collect();
        if parts.len() != 3 {
            return None;
        }
        let day = parts[0].parse::<u32>().ok()?;
        let month = parts[1].parse::<u32>().ok()?;
        let year = parts[2].parse::<i32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Inverse bridge: day and month zero-padded to two digits, year printed
    /// as-is (four digits for any contemporary date, never padded or
    /// truncated).
    pub fn from_calendar_date(&self, date: Option<NaiveDate>) -> Option<String> {
        let date = date?;
        Some(format!(
            "{:02}/{:02}/{}",
            date.day(),
            date.month(),
            date.year()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> DateStringCodec {
        DateStringCodec
    }

    #[test]
    fn matches_classifies_text_only() {
        assert!(codec().matches(&CellValue::Text("31/12/2023".into())));
        assert!(!codec().matches(&CellValue::Text("2023-12-31".into())));
        assert!(!codec().matches(&CellValue::Null));
        assert!(!codec().matches(&CellValue::Number(123.0)));
        assert!(!codec().matches(&CellValue::Bool(true)));
    }

    #[test]
    fn matches_is_unanchored() {
        // Historical leniency: a date embedded in a longer string matches.
        assert!(codec().matches(&CellValue::Text("due 05/01/2024 latest".into())));
        // 3-digit day still contains a valid 2/2/4 window starting one char in.
        assert!(codec().matches(&CellValue::Text("105/01/2024".into())));
    }

    #[test]
    fn parse_edit_value_is_a_gate_not_a_transformer() {
        assert_eq!(
            codec().parse_edit_value(&EditInput::text("05/01/2024")),
            Some("05/01/2024".to_string())
        );
        assert_eq!(codec().parse_edit_value(&EditInput::text("2024-01-05")), None);
        assert_eq!(codec().parse_edit_value(&EditInput::default()), None);
        assert_eq!(
            codec().parse_edit_value(&EditInput {
                new_value: Some(CellValue::Number(20240105.0))
            }),
            None
        );
    }

    #[test]
    fn format_for_display_passes_through() {
        assert_eq!(codec().format_for_display(None), "");
        assert_eq!(codec().format_for_display(Some("05/01/2024")), "05/01/2024");
    }

    #[test]
    fn to_calendar_date_reads_day_first() {
        let d = codec().to_calendar_date(Some("05/01/2024"));
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn to_calendar_date_accepts_unpadded_segments() {
        let d = codec().to_calendar_date(Some("5/1/2024"));
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn to_calendar_date_rejects_wrong_segment_count() {
        assert_eq!(codec().to_calendar_date(None), None);
        assert_eq!(codec().to_calendar_date(Some("")), None);
        assert_eq!(codec().to_calendar_date(Some("05-01-2024")), None);
        assert_eq!(codec().to_calendar_date(Some("05/01/2024/7")), None);
        assert_eq!(codec().to_calendar_date(Some("05/2024")), None);
    }

    #[test]
    fn to_calendar_date_rejects_impossible_dates() {
        // "31/02/2024" matches as a string but chrono refuses to build it.
        assert!(codec().matches(&CellValue::Text("31/02/2024".into())));
        assert_eq!(codec().to_calendar_date(Some("31/02/2024")), None);
    }

    #[test]
    fn from_calendar_date_zero_pads() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(codec().from_calendar_date(d), Some("05/01/2024".to_string()));
        assert_eq!(codec().from_calendar_date(None), None);
    }

    #[test]
    fn round_trip_is_stable_for_canonical_strings() {
        for s in ["05/01/2024", "31/12/1999", "29/02/2020", "01/10/2031"] {
            let date = codec().to_calendar_date(Some(s));
            assert_eq!(codec().from_calendar_date(date).as_deref(), Some(s));
        }
    }

    #[test]
    fn round_trip_preserves_date_components() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 23).unwrap();
        let s = codec().from_calendar_date(Some(d)).unwrap();
        assert_eq!(codec().to_calendar_date(Some(&s)), Some(d));
    }

    #[test]
    fn formatted_output_always_matches_the_pattern() {
        let codec = codec();
        for (y, m, d) in [(2024, 1, 5), (1987, 11, 30), (2100, 2, 1)] {
            let date = NaiveDate::from_ymd_opt(y, m, d);
            let s = codec.from_calendar_date(date).unwrap();
            assert!(codec.matches(&CellValue::Text(s)));
        }
    }
}
