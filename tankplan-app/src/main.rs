use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use tankplan_core::{
    logger::{summarize_log, EvaluationLogger},
    validation::validate_tank_parameters,
    CompatibilityEngine, SelectionBuilder, Thresholds,
};

mod config;
mod report;

/// Checks a planned aquarium stocking against a catalog of fish, invertebrates and plants.
#[derive(Debug, Parser)]
#[command(name = "tankplan", version, subcommand_negates_reqs = true)]
struct Cli {
    /// Catalog directory with fish/, plants/ and invertebrates/ subdirectories.
    #[arg(long, required = true)]
    catalog: Option<String>,
    /// Plan file describing the tank and the picks.
    #[arg(long, required = true)]
    plan: Option<String>,
    /// Optional YAML file overriding the evaluation thresholds.
    #[arg(long)]
    thresholds: Option<String>,
    /// Append the evaluation to this CSV log.
    #[arg(long)]
    log: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarise a CSV evaluation log.
    Summary {
        #[arg(long)]
        log: String,
    },
}

fn run_evaluation(cli: &Cli) -> Result<bool> {
    let catalog_dir = cli.catalog.as_deref().context("--catalog is required")?;
    let plan_path = cli.plan.as_deref().context("--plan is required")?;

    let thresholds = match &cli.thresholds {
        Some(path) => {
            println!("Loading thresholds from '{}'...", path);
            Thresholds::load(path)?
        }
        None => Thresholds::default(),
    };

    let catalog = config::Catalog::load(catalog_dir)?;
    for issue in catalog.validation_issues() {
        println!("  [catalog] {}", issue);
    }

    let plan = config::Plan::load(plan_path)?;
    let plan_id = plan.id(plan_path);
    let tank = plan.tank.as_ref().map(|section| section.to_parameters()).transpose()?;
    if let Some(tank) = &tank {
        for problem in validate_tank_parameters(tank) {
            println!("  [tank] {}", problem);
        }
    }

    let selection = SelectionBuilder::new(&catalog.organisms)
        .with_picks(plan.picks())
        .build()
        .with_context(|| format!("Failed to build selection for plan '{}'", plan_id))?;

    let engine = CompatibilityEngine::new(thresholds);
    println!(
        "Capacity limits: warn at {}%, fail above {}%",
        engine.thresholds().capacity_warning_percent,
        engine.thresholds().capacity_error_percent
    );
    let result = engine.evaluate(&selection, tank.as_ref());
    report::write_report(&mut io::stdout().lock(), &plan_id, tank.as_ref(), &result)?;

    if let Some(log_path) = &cli.log {
        let mut logger = EvaluationLogger::new(log_path)
            .with_context(|| format!("Failed to open evaluation log: {}", log_path))?;
        logger.log_evaluation(&plan_id, tank.as_ref(), &result)?;
        println!("Evaluation appended to '{}'", log_path);
    }

    Ok(result.is_compatible)
}

fn main() -> Result<()> {
    println!("--- Tank Planner ---");
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::Summary { log }) => {
            let summary = summarize_log(log)?;
            report::print_summary(log, &summary);
        }
        None => {
            if !run_evaluation(&cli)? {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
