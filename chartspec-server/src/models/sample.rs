//! Sample dataset the viewer page draws charts from.
//!
//! Field names line up with the request defaults (`x`, `y`, `category`,
//! `value`) so a bare `/api/chart-spec` renders something sensible.

use chrono::{Days, NaiveDate};
use serde::Serialize;

const YS: [i64; 10] = [10, 15, 7, 20, 12, 18, 25, 15, 8, 14];
const VALUES: [i64; 10] = [15, 8, 20, 12, 30, 18, 5, 22, 28, 15];
const CATEGORIES: [&str; 2] = ["A", "B"];

/// One row of the sample dataset
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleRow {
    pub x: i64,
    pub y: i64,
    pub category: &'static str,
    pub value: i64,
    pub date: NaiveDate,
}

/// Ten daily rows starting 2023-01-01, alternating between categories A and B
pub fn sample_rows() -> Vec<SampleRow> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();

    YS.iter()
        .zip(VALUES.iter())
        .enumerate()
        .map(|(i, (&y, &value))| SampleRow {
            x: i as i64 + 1,
            y,
            category: CATEGORIES[i % CATEGORIES.len()],
            value,
            date: start + Days::new(i as u64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows() {
        let rows = sample_rows();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].category, "A");
        assert_eq!(rows[1].category, "B");
        assert_eq!(rows[9].x, 10);
    }

    #[test]
    fn test_row_json_shape() {
        let rows = sample_rows();
        assert_eq!(
            serde_json::to_value(&rows[0]).unwrap(),
            json!({"x": 1, "y": 10, "category": "A", "value": 15, "date": "2023-01-01"})
        );
        assert_eq!(serde_json::to_value(&rows[9]).unwrap()["date"], "2023-01-10");
    }
}
