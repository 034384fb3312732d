use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::{PlanError, Result};
use crate::models::constraints::DEFAULT_COOK_TIME;
use crate::models::{Diet, MealSlot};
use crate::nutrition::{Activity, Biometrics, Goal, Sex, TrainerTargets};
use crate::planner::{PlanRequest, TargetRequest};

/// Meal Plan Maker: builds a seven-day meal plan and grocery list from a
/// meal catalog, your calorie target and your food restrictions.
#[derive(Parser, Debug)]
#[command(name = "meal_plan_maker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Meal catalog JSON file. The built-in catalog is used when omitted.
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Planner config JSON file (band, repetition cap, water rule, seed).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "meal_plan_maker_rs=debug". RUST_LOG wins.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a week plan (default; interactive when run without arguments).
    Plan(PlanArgs),

    /// Show calorie and macro targets only.
    Macros(TargetArgs),

    /// List catalog meals.
    Catalog {
        /// Only meals for this slot.
        #[arg(long, value_enum)]
        slot: Option<MealSlot>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanArgs {
            interactive: true,
            ..PlanArgs::default()
        })
    }
}

/// Where the calorie target comes from: body data or a trainer's numbers.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    #[arg(long, value_enum)]
    pub sex: Option<Sex>,

    /// Age in years.
    #[arg(long)]
    pub age: Option<u32>,

    /// Height in cm.
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kg.
    #[arg(long)]
    pub weight: Option<f64>,

    #[arg(long, value_enum, default_value_t = Activity::Moderate)]
    pub activity: Activity,

    #[arg(long, value_enum, default_value_t = Goal::Maintain)]
    pub goal: Goal,

    /// Trainer mode: fixed daily calories (skips the BMR calculation).
    #[arg(long)]
    pub target_calories: Option<f64>,

    /// Trainer mode: protein grams per day.
    #[arg(long)]
    pub protein: Option<f64>,

    /// Trainer mode: fat grams per day.
    #[arg(long)]
    pub fat: Option<f64>,

    /// Trainer mode: protein grams per kg body weight.
    #[arg(long)]
    pub protein_per_kg: Option<f64>,

    /// Trainer mode: fat grams per kg body weight.
    #[arg(long)]
    pub fat_per_kg: Option<f64>,
}

impl TargetArgs {
    /// True when neither trainer calories nor any body data were given.
    pub fn is_empty(&self) -> bool {
        self.target_calories.is_none()
            && self.sex.is_none()
            && self.age.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    pub fn to_request(&self) -> Result<TargetRequest> {
        if let Some(target_calories) = self.target_calories {
            return Ok(TargetRequest::Trainer(TrainerTargets {
                target_calories,
                protein_g: self.protein,
                fat_g: self.fat,
                protein_per_kg: self.protein_per_kg,
                fat_per_kg: self.fat_per_kg,
                weight_kg: self.weight,
            }));
        }

        match (self.sex, self.age, self.height, self.weight) {
            (Some(sex), Some(age), Some(height_cm), Some(weight_kg)) => {
                Ok(TargetRequest::Biometrics(Biometrics {
                    sex,
                    age,
                    height_cm,
                    weight_kg,
                    activity: self.activity,
                    goal: self.goal,
                }))
            }
            _ => Err(PlanError::InvalidInput(
                "give --target-calories, or all of --sex, --age, --height and --weight"
                    .to_string(),
            )),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Meals per day (3 to 5).
    #[arg(short, long, default_value_t = 3)]
    pub meals: u8,

    #[arg(long, value_enum, default_value_t = Diet::None)]
    pub diet: Diet,

    /// Allergens or dislikes to avoid, comma separated (e.g. "peanuts,tofu").
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Maximum cook time in minutes.
    #[arg(long, default_value_t = DEFAULT_COOK_TIME)]
    pub cook_time: u32,

    /// Preferred cuisines, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub cuisine: Vec<String>,

    /// Favorite ingredients, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub favorite: Vec<String>,

    /// Seed for breaking ties between equally good meals.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ask for preferences interactively.
    #[arg(short, long)]
    pub interactive: bool,

    /// Write the full report as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write the week plan as CSV.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the grocery list as CSV.
    #[arg(long)]
    pub grocery_csv: Option<PathBuf>,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            targets: TargetArgs::default(),
            meals: 3,
            diet: Diet::None,
            exclude: Vec::new(),
            cook_time: DEFAULT_COOK_TIME,
            cuisine: Vec::new(),
            favorite: Vec::new(),
            seed: None,
            interactive: false,
            json: None,
            csv: None,
            grocery_csv: None,
        }
    }
}

impl PlanArgs {
    /// Request built from the flags, with the given target source.
    pub fn to_request(&self, targets: TargetRequest) -> PlanRequest {
        PlanRequest {
            targets,
            meals_per_day: self.meals,
            diet: self.diet,
            exclusions: self.exclude.clone(),
            cook_time: self.cook_time,
            cuisine_likes: self.cuisine.clone(),
            favorites: self.favorite.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_flags() {
        let cli = Cli::try_parse_from([
            "meal_plan_maker",
            "plan",
            "--target-calories",
            "2100",
            "--meals",
            "4",
            "--exclude",
            "peanuts,tofu",
            "--diet",
            "vegetarian",
            "--seed",
            "7",
        ])
        .unwrap();

        let Some(Command::Plan(args)) = cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(args.meals, 4);
        assert_eq!(args.exclude, vec!["peanuts".to_string(), "tofu".to_string()]);
        assert_eq!(args.diet, Diet::Vegetarian);
        assert_eq!(args.seed, Some(7));

        let request = args.to_request(args.targets.to_request().unwrap());
        assert!(matches!(request.targets, TargetRequest::Trainer(_)));
    }

    #[test]
    fn test_biometrics_need_all_fields() {
        let args = TargetArgs {
            sex: Some(Sex::Female),
            age: Some(30),
            ..TargetArgs::default()
        };
        assert!(matches!(args.to_request(), Err(PlanError::InvalidInput(_))));

        let args = TargetArgs {
            height: Some(170.0),
            weight: Some(65.0),
            ..args
        };
        assert!(matches!(
            args.to_request(),
            Ok(TargetRequest::Biometrics(_))
        ));
    }

    #[test]
    fn test_default_command_is_interactive_plan() {
        let Command::Plan(args) = Command::default() else {
            panic!("expected plan command");
        };
        assert!(args.interactive);
        assert!(args.targets.is_empty());
    }
}
