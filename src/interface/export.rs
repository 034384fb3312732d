use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::models::{MealSlot, WeekPlan, Weekday};
use crate::planner::{GroceryItem, PlanReport};

/// Flat CSV row for one planned meal.
#[derive(Debug, Serialize)]
struct WeekRow<'a> {
    day: u8,
    weekday: Weekday,
    slot: MealSlot,
    meal_id: &'a str,
    meal_name: &'a str,
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    cook_time: u32,
}

/// Write the week as CSV, one row per planned meal.
pub fn write_week_csv<W: Write>(writer: W, week: &WeekPlan<'_>) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for day in &week.days {
        for planned in &day.meals {
            let meal = planned.meal;
            csv.serialize(WeekRow {
                day: day.day,
                weekday: day.weekday,
                slot: planned.slot,
                meal_id: &meal.id,
                meal_name: &meal.name,
                calories: meal.calories,
                protein: meal.protein,
                fat: meal.fat,
                carbs: meal.carbs,
                cook_time: meal.cook_time,
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// Write the grocery list as CSV (`name,quantity,unit`).
pub fn write_grocery_csv<W: Write>(writer: W, items: &[GroceryItem]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for item in items {
        csv.serialize(item)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the full report as pretty JSON.
pub fn write_report_json<W: Write>(writer: W, report: &PlanReport<'_>) -> Result<()> {
    let mut writer = writer;
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn save_week_csv<P: AsRef<Path>>(path: P, week: &WeekPlan<'_>) -> Result<()> {
    let path = path.as_ref();
    write_week_csv(BufWriter::new(File::create(path)?), week)?;
    info!(path = %path.display(), "wrote week plan CSV");
    Ok(())
}

pub fn save_grocery_csv<P: AsRef<Path>>(path: P, items: &[GroceryItem]) -> Result<()> {
    let path = path.as_ref();
    write_grocery_csv(BufWriter::new(File::create(path)?), items)?;
    info!(path = %path.display(), "wrote grocery CSV");
    Ok(())
}

pub fn save_report_json<P: AsRef<Path>>(path: P, report: &PlanReport<'_>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_report_json(&mut writer, report)?;
    writer.flush()?;
    info!(path = %path.display(), "wrote plan report JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::PlannerConfig;
    use crate::nutrition::TrainerTargets;
    use crate::planner::{build_plan, PlanRequest, TargetRequest};
    use std::fs;
    use tempfile::tempdir;

    fn request() -> PlanRequest {
        PlanRequest::new(TargetRequest::Trainer(TrainerTargets::new(2000.0)))
    }

    #[test]
    fn test_week_csv_has_row_per_meal() {
        let catalog = Catalog::builtin().unwrap();
        let report = build_plan(&catalog, &request(), &PlannerConfig::default()).unwrap();

        let mut buf = Vec::new();
        write_week_csv(&mut buf, &report.week).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("day,weekday,slot,meal_id"));
        assert_eq!(lines.len(), 1 + 7 * 3);
        assert!(lines[1].starts_with("1,Mon,breakfast,"));
    }

    #[test]
    fn test_grocery_csv_units_are_lowercase() {
        let items = vec![GroceryItem {
            name: "rice".to_string(),
            quantity: 150.0,
            unit: crate::models::Unit::G,
        }];
        let mut buf = Vec::new();
        write_grocery_csv(&mut buf, &items).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "name,quantity,unit\nrice,150.0,g\n"
        );
    }

    #[test]
    fn test_report_json_file_parses_back() {
        let catalog = Catalog::builtin().unwrap();
        let report = build_plan(&catalog, &request(), &PlannerConfig::default()).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        save_report_json(&path, &report).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["week"].as_array().map(|d| d.len()), Some(7));
        assert_eq!(value["relaxation"], "strict");
        assert_eq!(value["allergenSafe"], true);
        assert_eq!(value["mealsPerDay"], 3);
        assert!(value["targets"]["targetCalories"].is_number());
        assert!(value["targets"].get("target_calories").is_none());
        assert!(value["week"][0]["totalCalories"].is_number());
    }
}
