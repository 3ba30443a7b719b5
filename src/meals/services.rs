use time::{format_description::FormatItem, macros::format_description, Date, Time};

use crate::meals::dto::DailySummary;
use crate::meals::repo_types::MealLogRow;

const DATE_FMT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FMT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

/// Parse a `YYYY-MM-DD` query parameter.
pub fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, DATE_FMT)
}

pub fn fmt_date(d: Date) -> String {
    d.format(DATE_FMT).unwrap_or_default()
}

pub fn fmt_time(t: Time) -> String {
    t.format(TIME_FMT).unwrap_or_default()
}

/// Quantity-weighted nutrient totals over one day's logs. An empty day
/// yields null totals rather than zeros, matching the SQL `SUM` of no rows.
pub fn summarize(rows: &[MealLogRow]) -> DailySummary {
    if rows.is_empty() {
        return DailySummary::default();
    }
    let mut summary = DailySummary {
        total_calories: Some(0.0),
        total_protein: Some(0.0),
        total_carbs: Some(0.0),
        total_fat: Some(0.0),
        total_fiber: Some(0.0),
    };
    for row in rows {
        let add = |acc: &mut Option<f64>, per_serving: f64| {
            *acc = Some(acc.unwrap_or(0.0) + per_serving * row.quantity);
        };
        add(&mut summary.total_calories, row.calories);
        add(&mut summary.total_protein, row.protein);
        add(&mut summary.total_carbs, row.carbohydrates);
        add(&mut summary.total_fat, row.fat);
        add(&mut summary.total_fiber, row.fiber);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};
    use uuid::Uuid;

    fn row(quantity: f64, calories: f64, protein: f64) -> MealLogRow {
        MealLogRow {
            id: Uuid::new_v4(),
            food_id: 1,
            meal_type: "lunch".into(),
            quantity,
            log_date: date!(2026 - 08 - 25),
            log_time: time!(12:30:00),
            name: "Dal Tadka".into(),
            calories,
            protein,
            carbohydrates: 20.0,
            fat: 5.0,
            fiber: 4.0,
        }
    }

    #[test]
    fn empty_day_yields_null_totals() {
        let summary = summarize(&[]);
        assert_eq!(summary, DailySummary::default());
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["total_calories"].is_null());
    }

    #[test]
    fn totals_are_quantity_weighted() {
        let rows = vec![row(2.0, 150.0, 9.0), row(0.5, 300.0, 12.0)];
        let summary = summarize(&rows);
        assert_eq!(summary.total_calories, Some(2.0 * 150.0 + 0.5 * 300.0));
        assert_eq!(summary.total_protein, Some(2.0 * 9.0 + 0.5 * 12.0));
        assert_eq!(summary.total_carbs, Some(2.5 * 20.0));
        assert_eq!(summary.total_fat, Some(2.5 * 5.0));
        assert_eq!(summary.total_fiber, Some(2.5 * 4.0));
    }

    #[test]
    fn single_log_equals_scaled_serving() {
        let summary = summarize(&[row(1.5, 100.0, 10.0)]);
        assert_eq!(summary.total_calories, Some(150.0));
        assert_eq!(summary.total_protein, Some(15.0));
    }

    #[test]
    fn parses_and_formats_dates() {
        let d = parse_date("2026-08-25").expect("valid date");
        assert_eq!(fmt_date(d), "2026-08-25");
        assert!(parse_date("25/08/2026").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn formats_times() {
        assert_eq!(fmt_time(time!(09:05:01)), "09:05:01");
    }
}
