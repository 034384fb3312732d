pub mod export;
pub mod prompts;
pub mod render;

pub use export::{
    save_grocery_csv, save_report_json, save_week_csv, write_grocery_csv, write_report_json,
    write_week_csv,
};
pub use prompts::{
    collect_plan_preferences, parse_number, prompt_biometrics, prompt_cook_time,
    prompt_cuisine_likes, prompt_diet, prompt_exclusions, prompt_favorites, prompt_meals_per_day,
    prompt_target_calories, prompt_target_request, split_list, suggest_ingredients,
};
pub use render::{
    display_catalog, display_full_catalog, display_grocery_list, display_report, display_targets,
    display_week_plan,
};
