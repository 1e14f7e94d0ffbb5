use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::simulation::{PlaythroughRecord, StrategyAggregate};

#[derive(Serialize)]
struct JsonReport<'a> {
    aggregates: &'a [StrategyAggregate],
    playthroughs: &'a [PlaythroughRecord],
}

pub fn generate_console_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[PlaythroughRecord],
    aggregates: &[StrategyAggregate],
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Playthrough Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "======================".cyan())?;

    let failed = records.iter().filter(|r| !r.passed()).count();
    writeln!(writer, "Total playthroughs: {}", records.len())?;
    writeln!(writer, "Invariant failures: {}", failed.to_string().red())?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for aggregate in aggregates {
        writeln!(writer, "{}", aggregate.strategy.bold())?;
        writeln!(
            writer,
            "   Wins: {}/{} ({:.1}%)",
            aggregate.wins,
            aggregate.runs,
            aggregate.win_rate * 100.0
        )?;
        match aggregate.mean_days_to_win {
            Some(days) => writeln!(writer, "   Mean days to win: {days:.1}")?,
            None => writeln!(writer, "   Mean days to win: -")?,
        }
        writeln!(
            writer,
            "   Mean units gathered: {:.1}",
            aggregate.mean_units_gathered
        )?;
        writeln!(
            writer,
            "   Craft success rate: {:.1}%",
            aggregate.craft_success_rate * 100.0
        )?;
        writeln!(writer)?;
    }

    for record in records.iter().filter(|r| !r.passed()) {
        writeln!(
            writer,
            "{} {} on {} ({})",
            "❌ FAIL".red(),
            record.strategy.bold(),
            record.share_code,
            record.seed
        )?;
        for violation in &record.violations {
            writeln!(writer, "     • {}", violation.red())?;
        }
    }

    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[PlaythroughRecord],
    aggregates: &[StrategyAggregate],
) -> Result<()> {
    let report = JsonReport {
        aggregates,
        playthroughs: records,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[PlaythroughRecord],
    aggregates: &[StrategyAggregate],
) -> Result<()> {
    writeln!(writer, "# Lithos Playthrough Results\n")?;

    writeln!(writer, "## Strategies\n")?;
    writeln!(
        writer,
        "| Strategy | Runs | Wins | Win rate | Mean days to win | Craft success |"
    )?;
    writeln!(writer, "|---|---|---|---|---|---|")?;
    for aggregate in aggregates {
        let days = aggregate
            .mean_days_to_win
            .map_or_else(|| "-".to_string(), |d| format!("{d:.1}"));
        writeln!(
            writer,
            "| {} | {} | {} | {:.1}% | {} | {:.1}% |",
            aggregate.strategy,
            aggregate.runs,
            aggregate.wins,
            aggregate.win_rate * 100.0,
            days,
            aggregate.craft_success_rate * 100.0
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "## Playthroughs\n")?;
    for record in records {
        let status = if record.passed() { "✅" } else { "❌" };
        let result = if record.won { "won" } else { "unfinished" };
        writeln!(
            writer,
            "- {status} **{}** `{}`: {result} after {} days, {} units gathered",
            record.strategy, record.share_code, record.days, record.metrics.units_gathered
        )?;
        for violation in &record.violations {
            writeln!(writer, "  - {violation}")?;
        }
    }
    Ok(())
}
