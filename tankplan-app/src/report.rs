use std::io::{self, Write};
use tankplan_core::{
    analysis::{CompatibilityResult, PairCompatibility},
    logger::LogSummary,
    parameters::ParameterCompatibility,
};
use tankplan_schemas::{environment::TankParameters, units::liters_to_gallons};

fn write_parameter<W: Write>(
    out: &mut W,
    label: &str,
    unit: &str,
    report: &ParameterCompatibility,
) -> io::Result<()> {
    let status = if report.is_compatible { "ok" } else { "PROBLEM" };
    match &report.ideal_range {
        Some(range) => writeln!(
            out,
            "  {:<12} [{:>7}] ideal {}{} to {}{} ({})",
            label, status, range.min, unit, range.max, unit, report.description
        ),
        None => writeln!(out, "  {:<12} [{:>7}] {}", label, status, report.description),
    }
}

fn write_pairs<W: Write>(out: &mut W, label: &str, pairs: &PairCompatibility) -> io::Result<()> {
    if pairs.incompatible_pairs.is_empty() {
        return writeln!(out, "  {}: no conflicts", label);
    }
    writeln!(out, "  {}:", label)?;
    for conflict in &pairs.incompatible_pairs {
        writeln!(
            out,
            "    - {} / {}: {} [{:?}]",
            conflict.item_a,
            conflict.item_b,
            conflict.reason,
            conflict.severity()
        )?;
    }
    Ok(())
}

fn write_section<W: Write>(
    out: &mut W,
    heading: &str,
    marker: &str,
    lines: &[String],
) -> io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n{}:", heading)?;
    for line in lines {
        writeln!(out, "  {} {}", marker, line)?;
    }
    Ok(())
}

/// Writes a human-readable evaluation report for one plan. Everything goes to `out`, so
/// headings and their entries stay together when output is redirected.
pub fn write_report<W: Write>(
    out: &mut W,
    plan_id: &str,
    tank: Option<&TankParameters>,
    result: &CompatibilityResult,
) -> io::Result<()> {
    writeln!(out, "\n--- Compatibility Report: {} ---", plan_id)?;
    if let Some(tank) = tank {
        writeln!(
            out,
            "Tank volume: {:.1} L ({:.1} gal)",
            tank.volume,
            liters_to_gallons(tank.volume)
        )?;
    }
    writeln!(out, "Tank usage: {}%", result.tank_usage_percent)?;
    if let Some(schedule) = &result.water_change {
        writeln!(
            out,
            "Suggested water changes: {}% every {} days",
            schedule.change_percent, schedule.frequency_days
        )?;
    }

    writeln!(out, "\nWater parameters:")?;
    write_parameter(out, "Temperature", "°C", &result.temperature_compatibility)?;
    write_parameter(out, "pH", "", &result.ph_compatibility)?;
    write_parameter(out, "Hardness", " dGH", &result.hardness_compatibility)?;

    writeln!(out, "\nPairings:")?;
    write_pairs(out, "Livestock", &result.fish_compatibility)?;
    write_pairs(out, "Plants", &result.plant_compatibility)?;

    write_section(out, "Errors", "✗", &result.errors)?;
    write_section(out, "Warnings", "!", &result.warnings)?;
    write_section(out, "Not evaluated", "?", &result.omissions)?;

    let verdict = if result.is_compatible { "COMPATIBLE" } else { "NOT COMPATIBLE" };
    writeln!(out, "\nVerdict: {}", verdict)
}

pub fn print_summary(log_path: &str, summary: &LogSummary) {
    println!("\n--- Evaluation Log Summary: {} ---", log_path);
    println!("Evaluations:        {}", summary.evaluations);
    println!("Compatible:         {}", summary.compatible);
    println!("Errors reported:    {}", summary.total_errors);
    println!("Warnings reported:  {}", summary.total_warnings);
    println!("Peak tank usage:    {}%", summary.peak_usage_percent);
}
