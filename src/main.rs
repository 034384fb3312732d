use clap::Parser;
use tracing::debug;

use meal_plan_maker_rs::catalog::Catalog;
use meal_plan_maker_rs::cli::{Cli, Command, PlanArgs, TargetArgs};
use meal_plan_maker_rs::config::PlannerConfig;
use meal_plan_maker_rs::error::Result;
use meal_plan_maker_rs::interface::{
    collect_plan_preferences, display_catalog, display_full_catalog, display_report,
    display_targets, prompt_target_request, save_grocery_csv, save_report_json, save_week_csv,
};
use meal_plan_maker_rs::logging::init_logging;
use meal_plan_maker_rs::models::MealSlot;
use meal_plan_maker_rs::planner::build_plan;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        let code = if e.is_user_correctable() { 2 } else { 1 };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    debug!(meals = catalog.len(), "catalog ready");

    let config = match &cli.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };

    match cli.command.unwrap_or_default() {
        Command::Plan(args) => cmd_plan(&catalog, config, &args),
        Command::Macros(args) => cmd_macros(&args),
        Command::Catalog { slot } => cmd_catalog(&catalog, slot),
    }
}

/// Build and show a week plan, writing any requested exports.
fn cmd_plan(catalog: &Catalog, config: PlannerConfig, args: &PlanArgs) -> Result<()> {
    let targets = if args.interactive && args.targets.is_empty() {
        prompt_target_request()?
    } else {
        args.targets.to_request()?
    };

    let mut request = args.to_request(targets);
    if args.interactive {
        request = collect_plan_preferences(catalog, request)?;
    }

    let config = config.with_seed(args.seed);
    let report = build_plan(catalog, &request, &config)?;
    display_report(&report);

    if let Some(path) = &args.json {
        save_report_json(path, &report)?;
        println!("Report written to {}", path.display());
    }
    if let Some(path) = &args.csv {
        save_week_csv(path, &report.week)?;
        println!("Week plan written to {}", path.display());
    }
    if let Some(path) = &args.grocery_csv {
        save_grocery_csv(path, &report.grocery)?;
        println!("Grocery list written to {}", path.display());
    }

    Ok(())
}

/// Show targets without planning.
fn cmd_macros(args: &TargetArgs) -> Result<()> {
    let targets = args.to_request()?.resolve()?;
    display_targets(&targets);
    Ok(())
}

/// List catalog meals, optionally for one slot.
fn cmd_catalog(catalog: &Catalog, slot: Option<MealSlot>) -> Result<()> {
    match slot {
        Some(slot) => {
            let meals = catalog.by_slot(slot);
            display_catalog(&meals, &format!("Catalog: {}", slot));
        }
        None => display_full_catalog(catalog),
    }
    Ok(())
}
