use std::str::FromStr;

use clap::ValueEnum;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::{Allergen, Diet, Dislike};
use crate::nutrition::calculator::{COOK_TIME_RANGE, TRAINER_CALORIES_RANGE};
use crate::nutrition::{check_range, Activity, Biometrics, Goal, Sex, TrainerTargets};
use crate::planner::{PlanRequest, TargetRequest};

/// Minimum Jaro-Winkler score for an ingredient suggestion.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Most suggestions offered for one typed favorite.
pub const MAX_SUGGESTIONS: usize = 5;

/// Ingredient names close to `input`, best match first.
///
/// An exact case-insensitive hit is returned alone.
pub fn suggest_ingredients(input: &str, names: &[String]) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    if let Some(exact) = names.iter().find(|n| n.to_lowercase() == needle) {
        return vec![exact.clone()];
    }

    let mut candidates: Vec<(&String, f64)> = names
        .iter()
        .map(|n| (n, jaro_winkler(&n.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(n, _)| n.clone())
        .collect()
}

/// Parse a typed number, rejecting anything else as invalid input.
pub fn parse_number<T: FromStr>(label: &str, input: &str) -> Result<T> {
    let input = input.trim();
    input
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid number for {}: '{}'", label, input)))
}

/// Comma-separated list, trimmed, empty entries dropped.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn prompt_number<T: FromStr>(label: &str, default: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(label)
        .default(default.to_string())
        .interact_text()?;
    parse_number(label, &input)
}

/// Select one value of a clap value enum, listed by its CLI name.
fn prompt_choice<T: ValueEnum + PartialEq>(label: &str, default: T) -> Result<T> {
    let variants = T::value_variants();
    let options: Vec<String> = variants
        .iter()
        .map(|v| {
            v.to_possible_value()
                .map(|p| p.get_name().to_string())
                .unwrap_or_default()
        })
        .collect();
    let default_idx = variants.iter().position(|v| *v == default).unwrap_or(0);

    let selection = Select::new()
        .with_prompt(label)
        .items(&options)
        .default(default_idx)
        .interact()?;

    Ok(variants.get(selection).cloned().unwrap_or(default))
}

/// Prompt for a daily calorie target.
pub fn prompt_target_calories() -> Result<f64> {
    let kcal: f64 = prompt_number("Daily calorie target", "2000")?;
    check_range("target calories", kcal, &TRAINER_CALORIES_RANGE)?;
    Ok(kcal)
}

/// Prompt for the body data used by the calculated targets path.
pub fn prompt_biometrics() -> Result<Biometrics> {
    let bio = Biometrics {
        sex: prompt_choice("Sex", Sex::Male)?,
        age: prompt_number("Age (years)", "30")?,
        height_cm: prompt_number("Height (cm)", "175")?,
        weight_kg: prompt_number("Weight (kg)", "75")?,
        activity: prompt_choice("Activity level", Activity::default())?,
        goal: prompt_choice("Goal", Goal::default())?,
    };
    bio.validate()?;
    Ok(bio)
}

/// Ask whether to calculate targets from body data or take a calorie number.
pub fn prompt_target_request() -> Result<TargetRequest> {
    let options = ["Calculate from body data", "Enter daily calories"];
    let selection = Select::new()
        .with_prompt("Calorie target")
        .items(&options)
        .default(0)
        .interact()?;

    if selection == 0 {
        Ok(TargetRequest::Biometrics(prompt_biometrics()?))
    } else {
        Ok(TargetRequest::Trainer(TrainerTargets::new(prompt_target_calories()?)))
    }
}

/// Prompt for the diet.
pub fn prompt_diet(default: Diet) -> Result<Diet> {
    let options: Vec<&str> = Diet::ALL.iter().map(|d| d.as_str()).collect();
    let default_idx = Diet::ALL.iter().position(|d| *d == default).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Diet")
        .items(&options)
        .default(default_idx)
        .interact()?;

    Ok(Diet::ALL.get(selection).copied().unwrap_or_default())
}

/// Prompt for meals per day (3 to 5).
pub fn prompt_meals_per_day(default: u8) -> Result<u8> {
    let options = ["3", "4", "5"];
    let default_idx = usize::from(default.clamp(3, 5) - 3);

    let selection = Select::new()
        .with_prompt("Meals per day")
        .items(&options)
        .default(default_idx)
        .interact()?;

    Ok(3 + selection as u8)
}

/// Prompt for the cook-time ceiling in minutes.
pub fn prompt_cook_time(default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Maximum cook time (minutes)")
        .default(default.to_string())
        .interact_text()?;

    let minutes: u32 = parse_number("cook time (min)", &input)?;
    check_range("cook time (min)", minutes, &COOK_TIME_RANGE)?;
    Ok(minutes)
}

/// Prompt for allergens and dislikes in one multi-select.
pub fn prompt_exclusions() -> Result<Vec<String>> {
    let options: Vec<String> = Allergen::ALL
        .iter()
        .map(|a| format!("allergen: {}", a))
        .chain(Dislike::ALL.iter().map(|d| format!("dislike: {}", d)))
        .collect();
    let values: Vec<&str> = Allergen::ALL
        .iter()
        .map(|a| a.as_str())
        .chain(Dislike::ALL.iter().map(|d| d.as_str()))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Allergens and dislikes to avoid (space to toggle)")
        .items(&options)
        .interact()?;

    Ok(picked
        .into_iter()
        .filter_map(|i| values.get(i).map(|v| v.to_string()))
        .collect())
}

/// Prompt for liked cuisines as a comma-separated list.
pub fn prompt_cuisine_likes() -> Result<Vec<String>> {
    let input: String = Input::new()
        .with_prompt("Cuisines you like, comma separated (or press Enter to skip)")
        .allow_empty(true)
        .interact_text()?;
    Ok(split_list(&input))
}

/// Prompt for favorite ingredients with fuzzy matching.
pub fn prompt_favorites(ingredient_names: &[String]) -> Result<Vec<String>> {
    let mut favorites = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Enter a favorite ingredient (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        let suggestions = suggest_ingredients(input, ingredient_names);

        if suggestions.is_empty() {
            println!("No matching ingredient found for '{}'", input);
            continue;
        }

        if suggestions.len() == 1 {
            let name = &suggestions[0];
            let exact = name.eq_ignore_ascii_case(input);
            let confirm = exact
                || Confirm::new()
                    .with_prompt(format!("Did you mean '{}'?", name))
                    .default(true)
                    .interact()?;

            if confirm {
                favorites.push(name.clone());
                println!("Added: {}", name);
            }
        } else {
            let mut selection_options = suggestions.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            if let Some(name) = suggestions.get(selection) {
                favorites.push(name.clone());
                println!("Added: {}", name);
            }
        }
    }

    Ok(favorites)
}

/// Fill in the planning preferences interactively, starting from `request`.
pub fn collect_plan_preferences(catalog: &Catalog, mut request: PlanRequest) -> Result<PlanRequest> {
    request.diet = prompt_diet(request.diet)?;
    request.meals_per_day = prompt_meals_per_day(request.meals_per_day)?;
    request.cook_time = prompt_cook_time(request.cook_time)?;
    request.exclusions.extend(prompt_exclusions()?);
    request.cuisine_likes.extend(prompt_cuisine_likes()?);
    request
        .favorites
        .extend(prompt_favorites(&catalog.ingredient_names())?);
    Ok(request)
}
