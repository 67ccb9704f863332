// File: ./src/model/grid.rs
// Column/row model with codec-backed type inference, edits and date filtering
use crate::model::codec::{DateStringCodec, EditInput};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single cell as it arrives from a JSON row record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Plain rendering for columns that are not handed to a data type
    /// definition. Whole numbers drop the trailing ".0".
    pub fn render(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// One row, keyed by column field.
pub type Record = BTreeMap<String, CellValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    DateString,
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub field: String,
    pub header_name: String,
    pub editable: bool,
    pub column_type: ColumnType,
}

impl ColumnDef {
    /// "task_due_date" -> "Task Due Date"
    fn header_from_field(field: &str) -> String {
        field
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// An in-memory grid: ordered columns over row records, with the dateString
/// codec plugged in for classification, edit gating, display and the date
/// filter bridge.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    pub codec: DateStringCodec,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Record>,
}

impl Grid {
    /// Builds a grid from row records. Columns come from the union of row
    /// keys; each column's type is decided by running the codec's matcher
    /// against the first non-null value seen in that column (the same
    /// inference a grid widget performs when registering a custom data type).
    pub fn from_records(rows: Vec<Record>) -> Self {
        let codec = DateStringCodec;
        let mut fields: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !fields.iter().any(|f| f == key) {
                    fields.push(key.clone());
                }
            }
        }

        let columns = fields
            .into_iter()
            .map(|field| {
                let sample = rows
                    .iter()
                    .filter_map(|r| r.get(&field))
                    .find(|v| !v.is_null());
                let column_type = match sample {
                    Some(v) if codec.matches(v) => ColumnType::DateString,
                    _ => ColumnType::Text,
                };
                ColumnDef {
                    header_name: ColumnDef::header_from_field(&field),
                    field,
                    editable: true,
                    column_type,
                }
            })
            .collect();

        Self {
            codec,
            columns,
            rows,
        }
    }

    pub fn column(&self, field: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// First date-typed column, used as the target of the quick date filters.
    pub fn date_filter_field(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.column_type == ColumnType::DateString)
            .map(|c| c.field.as_str())
    }

    /// What a cell shows on screen. Date columns go through the codec's
    /// formatter (absent -> empty cell), everything else renders plainly.
    pub fn display_value(&self, row: usize, field: &str) -> String {
        let cell = self.rows.get(row).and_then(|r| r.get(field));
        match self.column(field).map(|c| c.column_type) {
            Some(ColumnType::DateString) => self
                .codec
                .format_for_display(cell.and_then(CellValue::as_text)),
            _ => cell.map(CellValue::render).unwrap_or_default(),
        }
    }

    /// Commits an edit. Date columns run the codec's edit gate: an input
    /// without the date pattern leaves the cell untouched and reports the
    /// rejection, so the editing surface can let the user retry. Text columns
    /// accept any text as-is.
    pub fn commit_edit(&mut self, row: usize, field: &str, input: EditInput) -> bool {
        let Some(col) = self.column(field) else {
            return false;
        };
        if !col.editable || row >= self.rows.len() {
            return false;
        }
        let parsed = match col.column_type {
            ColumnType::DateString => self.codec.parse_edit_value(&input).map(CellValue::Text),
            ColumnType::Text => input.new_value.and_then(|v| match v {
                CellValue::Text(s) => Some(CellValue::Text(s)),
                _ => None,
            }),
        };
        match parsed {
            Some(value) => {
                self.rows[row].insert(field.to_string(), value);
                true
            }
            None => false,
        }
    }

    /// Row indices whose cell in `field` parses to a date inside the
    /// half-open window `[from, to)`. Cells the codec cannot bridge to a
    /// calendar date fall outside every window.
    pub fn date_range_indices(&self, field: &str, from: NaiveDate, to: NaiveDate) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                let text = r.get(field).and_then(CellValue::as_text);
                match self.codec.to_calendar_date(text) {
                    Some(d) => d >= from && d < to,
                    None => false,
                }
            })
            .map(|(i, _)| i)
            .collect()
    }
}

/// Quick filters over the grid's date column, mirroring a dashboard's
/// last-week / now / next-week buttons. Weeks start on Monday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    #[default]
    All,
    LastWeek,
    ThisWeek,
    NextWeek,
}

impl DateFilter {
    pub fn cycle(self) -> Self {
        match self {
            DateFilter::All => DateFilter::LastWeek,
            DateFilter::LastWeek => DateFilter::ThisWeek,
            DateFilter::ThisWeek => DateFilter::NextWeek,
            DateFilter::NextWeek => DateFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateFilter::All => "All",
            DateFilter::LastWeek => "Last Week",
            DateFilter::ThisWeek => "This Week",
            DateFilter::NextWeek => "Next Week",
        }
    }

    /// Half-open `[start, end)` window relative to `today`, or None for All.
    pub fn window(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let week_start =
            today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let week = Duration::days(7);
        match self {
            DateFilter::All => None,
            DateFilter::LastWeek => Some((week_start - week, week_start)),
            DateFilter::ThisWeek => Some((week_start, week_start + week)),
            DateFilter::NextWeek => Some((week_start + week, week_start + week + week)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample_grid() -> Grid {
        Grid::from_records(vec![
            record(&[
                ("shot", CellValue::Text("ep01_sh010".into())),
                ("due", CellValue::Text("05/01/2024".into())),
                ("frames", CellValue::Number(96.0)),
            ]),
            record(&[
                ("shot", CellValue::Text("ep01_sh020".into())),
                ("due", CellValue::Text("12/01/2024".into())),
                ("frames", CellValue::Number(120.0)),
            ]),
        ])
    }

    #[test]
    fn inference_marks_date_columns() {
        let grid = sample_grid();
        assert_eq!(grid.column("due").unwrap().column_type, ColumnType::DateString);
        assert_eq!(grid.column("shot").unwrap().column_type, ColumnType::Text);
        assert_eq!(grid.column("frames").unwrap().column_type, ColumnType::Text);
        assert_eq!(grid.date_filter_field(), Some("due"));
    }

    #[test]
    fn header_names_are_derived_from_fields() {
        let grid = Grid::from_records(vec![record(&[(
            "task_due_date",
            CellValue::Text("01/02/2024".into()),
        )])]);
        assert_eq!(grid.columns[0].header_name, "Task Due Date");
    }

    #[test]
    fn rejected_edit_leaves_cell_untouched() {
        let mut grid = sample_grid();
        assert!(!grid.commit_edit(0, "due", EditInput::text("2024-01-05")));
        assert_eq!(grid.display_value(0, "due"), "05/01/2024");
        assert!(grid.commit_edit(0, "due", EditInput::text("09/01/2024")));
        assert_eq!(grid.display_value(0, "due"), "09/01/2024");
    }

    #[test]
    fn date_range_is_half_open() {
        let grid = sample_grid();
        let from = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        assert_eq!(grid.date_range_indices("due", from, to), vec![0]);
    }

    #[test]
    fn filter_windows_align_to_monday() {
        // 2024-01-10 is a Wednesday.
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let (start, end) = DateFilter::ThisWeek.window(today).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let (last_start, last_end) = DateFilter::LastWeek.window(today).unwrap();
        assert_eq!(last_start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(last_end, start);
        assert_eq!(DateFilter::All.window(today), None);
    }

    #[test]
    fn cycle_visits_every_filter() {
        let mut f = DateFilter::All;
        for expected in [
            DateFilter::LastWeek,
            DateFilter::ThisWeek,
            DateFilter::NextWeek,
            DateFilter::All,
        ] {
            f = f.cycle();
            assert_eq!(f, expected);
        }
    }
}
