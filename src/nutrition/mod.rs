pub mod calculator;

pub use calculator::{
    calculate_all, check_range, goal_calories, macros_for_calories, manual_targets,
    mifflin_st_jeor_bmr, tdee_from_bmr, Activity, Biometrics, Goal, MacroTargets, Sex,
    TrainerTargets,
};
