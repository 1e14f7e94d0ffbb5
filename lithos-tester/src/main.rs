mod logic;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{
    GameplayStrategy, PlaythroughRecord, SeedInfo, StrategyAggregate, aggregate_playthroughs,
    resolve_seed_inputs, run_playthrough, split_csv,
};

#[derive(Debug, Parser)]
#[command(name = "lithos-tester", version = "0.1.0")]
#[command(about = "Automated playthroughs and balance reports for Project Lithos")]
struct Args {
    /// Strategies to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    strategies: String,

    /// List all available strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Seeds to run (comma-separated integers or LT- share codes, or `all`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Give up on a playthrough after this many in-game days
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Print one line per playthrough as it finishes
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_strategies(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let strategies = expand_strategies(&args.strategies)?;
    let seed_infos = resolve_seed_inputs(&split_csv(&args.seeds))?;

    let records = run_all(&args, &strategies, &seed_infos);
    let aggregates = aggregate_playthroughs(&records);

    write_reports(&args, &records, &aggregates, start_time)?;

    if records.iter().any(|r| !r.passed()) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_strategies(args: &Args) -> Result<bool> {
    if !args.list_strategies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available strategies:")?;
    for strategy in GameplayStrategy::ALL {
        writeln!(
            output_target.writer(),
            "  {:12} - {}",
            strategy.label().to_lowercase(),
            strategy.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🪨 Lithos Automated Tester".bright_cyan().bold());
    println!("{}", "==========================".cyan());
}

fn expand_strategies(arg: &str) -> Result<Vec<GameplayStrategy>> {
    let mut strategies = Vec::new();
    for token in split_csv(arg) {
        let picked = if token.eq_ignore_ascii_case("all") {
            GameplayStrategy::ALL.to_vec()
        } else {
            vec![token.parse::<GameplayStrategy>().map_err(|e| anyhow!(e))?]
        };
        for strategy in picked {
            if !strategies.contains(&strategy) {
                strategies.push(strategy);
            }
        }
    }
    if strategies.is_empty() {
        strategies.extend(GameplayStrategy::ALL);
    }
    Ok(strategies)
}

fn run_all(
    args: &Args,
    strategies: &[GameplayStrategy],
    seed_infos: &[SeedInfo],
) -> Vec<PlaythroughRecord> {
    let mut records = Vec::with_capacity(strategies.len() * seed_infos.len());
    for &strategy in strategies {
        for seed_info in seed_infos {
            let record = run_playthrough(strategy, seed_info, args.days);
            if args.verbose {
                let status = if record.won {
                    "won".green()
                } else {
                    "unfinished".yellow()
                };
                println!(
                    "  [{} {}] {} on day {}",
                    strategy.label().bold(),
                    record.share_code,
                    status,
                    record.days
                );
            }
            records.push(record);
        }
    }
    records
}

fn write_reports(
    args: &Args,
    records: &[PlaythroughRecord],
    aggregates: &[StrategyAggregate],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, records, aggregates)?,
        "markdown" => {
            logic::reports::generate_markdown_report(&mut output_target, records, aggregates)?;
        }
        _ => {
            logic::reports::generate_console_report(
                &mut output_target,
                records,
                aggregates,
                start_time.elapsed(),
            )?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            strategies: "all".to_string(),
            list_strategies: false,
            seeds: "1337".to_string(),
            days: 3,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn expand_strategies_handles_all_and_names() {
        assert_eq!(expand_strategies("all").unwrap(), GameplayStrategy::ALL.to_vec());
        assert_eq!(
            expand_strategies("artisan, random").unwrap(),
            vec![GameplayStrategy::Artisan, GameplayStrategy::Random]
        );
        assert_eq!(expand_strategies("").unwrap().len(), 3);
        assert!(expand_strategies("speedrun").is_err());
    }

    #[test]
    fn run_all_covers_every_pair() {
        let args = base_args();
        let seeds = resolve_seed_inputs(&["1".to_string(), "2".to_string()]).unwrap();
        let records = run_all(&args, &GameplayStrategy::ALL, &seeds);
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r.days <= args.days + 1));
    }

    #[test]
    fn output_target_writes_to_file() {
        let path = std::env::temp_dir().join(format!("lithos-output-{}", std::process::id()));
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(target, "hello").unwrap();
        target.flush_inner().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        let _ = std::fs::remove_file(path);
    }
}
