use crate::catalog::{Catalog, RelaxationLevel};
use crate::models::{MealRecord, MealSlot, WeekPlan};
use crate::nutrition::MacroTargets;
use crate::planner::{GroceryItem, PlanReport};

/// Display the week plan as a per-day table.
pub fn display_week_plan(week: &WeekPlan<'_>) {
    if week.is_empty() {
        println!("No week plan generated.");
        return;
    }

    println!();
    println!("=== Week Plan ===");

    // Find max meal name length for alignment
    let max_name_len = week.meals().map(|m| m.name.len()).max().unwrap_or(10);

    for day in &week.days {
        println!();
        println!("{} (day {}) - {} kcal", day.weekday, day.day, day.total_calories);
        for planned in &day.meals {
            let meal = planned.meal;
            println!(
                "  {:<9} {:<width$} {:>5.0} kcal | P {:>3.0} F {:>3.0} C {:>3.0} | {:>2} min",
                planned.slot.as_str(),
                meal.name,
                meal.calories,
                meal.protein,
                meal.fat,
                meal.carbs,
                meal.cook_time,
                width = max_name_len
            );
        }
    }

    let days = week.days.len().max(1) as f64;
    println!();
    println!("--- Summary ---");
    println!("Distinct meals: {}", week.usage_counts().len());
    println!("Week calories: {}", week.total_calories());
    println!("Average per day: {:.0}", week.total_calories() as f64 / days);
    println!();
}

/// Display daily calorie and macro targets.
pub fn display_targets(targets: &MacroTargets) {
    println!();
    println!("=== Daily Targets ===");
    if let (Some(bmr), Some(tdee)) = (targets.bmr, targets.tdee) {
        println!("BMR:      {:>6.0} kcal", bmr);
        println!("TDEE:     {:>6.0} kcal", tdee);
    }
    println!("Target:   {:>6.0} kcal", targets.target_calories);
    println!("Protein:  {:>6.0} g", targets.protein_g);
    println!("Fat:      {:>6.0} g", targets.fat_g);
    println!("Carbs:    {:>6.0} g", targets.carbs_g);
    println!();
}

/// Display the aggregated grocery list.
pub fn display_grocery_list(items: &[GroceryItem]) {
    if items.is_empty() {
        println!("Grocery list: (empty)");
        return;
    }

    println!();
    println!("=== Grocery List ({} items) ===", items.len());
    println!();

    let max_name_len = items.iter().map(|i| i.name.len()).max().unwrap_or(10);
    for item in items {
        println!(
            "  {:<width$} {:>8.1} {}",
            item.name,
            item.quantity,
            item.unit,
            width = max_name_len
        );
    }
    println!();
}

/// Display catalog meals, one line each.
pub fn display_catalog(meals: &[&MealRecord], title: &str) {
    if meals.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} meals) ===", title, meals.len());
    println!();

    for meal in meals {
        let tags: Vec<&str> = meal.diet_tags.iter().map(|d| d.as_str()).collect();
        let allergens: Vec<&str> = meal.allergens.iter().map(|a| a.as_str()).collect();
        println!(
            "  [{}] {} ({}) - {:.0} kcal, P:{:.0} F:{:.0} C:{:.0}, {} min, diet: {}, allergens: {}",
            meal.slot,
            meal.name,
            meal.id,
            meal.calories,
            meal.protein,
            meal.fat,
            meal.carbs,
            meal.cook_time,
            tags.join("/"),
            if allergens.is_empty() {
                "-".to_string()
            } else {
                allergens.join(", ")
            }
        );
    }

    println!();
}

/// Display the whole catalog grouped by slot order.
pub fn display_full_catalog(catalog: &Catalog) {
    let meals: Vec<&MealRecord> = MealSlot::ALL
        .iter()
        .flat_map(|slot| catalog.by_slot(*slot))
        .collect();
    display_catalog(&meals, "Catalog");
}

/// Display a full planning report: notices, targets, week and groceries.
pub fn display_report(report: &PlanReport<'_>) {
    if !report.allergen_safe {
        println!("WARNING: no meal avoids your allergens; showing the full catalog.");
    } else if report.relaxation != RelaxationLevel::Strict {
        println!("Note: filters relaxed ({}) to find enough meals.", report.relaxation);
    }
    if !report.unrecognized_exclusions.is_empty() {
        println!(
            "Ignored unknown exclusions: {}",
            report.unrecognized_exclusions.join(", ")
        );
    }

    display_targets(&report.targets);
    display_week_plan(&report.week);
    display_grocery_list(&report.grocery);
}
