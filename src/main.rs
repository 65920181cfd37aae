use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use playbook_analytics::analysis::{analyze_file, analyze_records, AnalyticsReport};
use playbook_analytics::diagnostics::{CollectingSink, LogSink};
use playbook_analytics::loader::{load_file, LoadOptions, ParserKind};
use playbook_analytics::query::{relevant_plays, PromptSet, DEFAULT_MATCH_LIMIT};
use playbook_analytics::xlsx;

#[derive(Parser)]
#[command(name = "playbook-analytics")]
#[command(about = "Aggregate soccer play-by-play data into analytics views", long_about = None)]
struct Cli {
    /// Field delimiter of the input files
    #[arg(long, global = true, default_value_t = ',', env = "PLAYBOOK_DELIMITER")]
    delimiter: char,

    /// Row splitter: naive (positional) or csv (quote-aware)
    #[arg(long, global = true, default_value_t = ParserKind::Naive, env = "PLAYBOOK_PARSER")]
    parser: ParserKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every view and print it as JSON
    Analyze {
        /// Input files; each is analyzed independently
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print key statistics and the per-opponent summary
    Info {
        /// Input data file
        #[arg(env = "PLAYBOOK_DATA")]
        input: PathBuf,
    },

    /// Report every skipped row and dropped game
    Validate {
        /// Input data file
        #[arg(env = "PLAYBOOK_DATA")]
        input: PathBuf,
    },

    /// Write every view to an Excel workbook
    Export {
        /// Input data file
        #[arg(env = "PLAYBOOK_DATA")]
        input: PathBuf,

        /// Output Excel file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the grounding rows and prompts for a question about specific plays
    Prompt {
        /// Input data file
        #[arg(env = "PLAYBOOK_DATA")]
        input: PathBuf,

        /// Question about the plays
        #[arg(short, long)]
        question: String,

        /// Maximum number of matching rows to include
        #[arg(long, default_value_t = DEFAULT_MATCH_LIMIT)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if !cli.delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be a single ASCII character, got '{}'", cli.delimiter);
    }
    let options = LoadOptions::default()
        .with_delimiter(cli.delimiter as u8)
        .with_parser(cli.parser);

    match cli.command {
        Commands::Analyze { inputs, output, pretty } => {
            analyze(&inputs, output.as_deref(), pretty, &options)?;
        }
        Commands::Info { input } => {
            info(&input, &options)?;
        }
        Commands::Validate { input } => {
            validate(&input, &options)?;
        }
        Commands::Export { input, output } => {
            export(&input, &output, &options)?;
        }
        Commands::Prompt { input, question, limit } => {
            prompt(&input, &question, limit, &options)?;
        }
    }

    Ok(())
}

fn analyze(inputs: &[PathBuf], output: Option<&Path>, pretty: bool, options: &LoadOptions) -> Result<()> {
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| {
            analyze_file(input, options, &mut LogSink)
                .and_then(|report| report.to_json_value())
                .with_context(|| format!("Failed to analyze {}", input.display()))
        })
        .collect();

    let mut values = Vec::with_capacity(results.len());
    for result in results {
        values.push(result?);
    }

    let document = if values.len() == 1 {
        values.remove(0)
    } else {
        serde_json::Value::Array(values)
    };
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn info(input: &Path, options: &LoadOptions) -> Result<()> {
    let report = analyze_file(input, options, &mut LogSink).context("Failed to analyze input")?;
    print_report_summary(input, &report);
    Ok(())
}

fn print_report_summary(input: &Path, report: &AnalyticsReport) {
    let stats = &report.key_stats;
    println!("Data File: {}", input.display());
    println!("Games: {}", stats.total_games);
    println!("Plays: {}", stats.total_plays);
    println!(
        "Shots: {}  Goals: {}  Conversion: {:.1}%",
        stats.total_shots, stats.total_goals, stats.conversion_rate
    );
    println!(
        "Total xG: {:.2}  xG/Shot: {:.3}  Play success: {:.1}%",
        stats.total_xg, stats.avg_xg_per_shot, stats.success_rate
    );
    println!();

    println!("Opponents: {}", report.opponents.len());
    for (opponent, team) in &report.team_comparison {
        println!(
            "  {:<20} {:>2} games  {:>3} goals / {:>3} shots  ({:.1}%)  xG {:.2}",
            opponent,
            team.games_played,
            team.total_goals,
            team.total_shots,
            team.conversion_rate,
            team.total_xg
        );
    }
    println!();

    println!("Goals: {}", report.goals_timeline.len());
    for goal in report.goals_timeline.iter().take(10) {
        println!(
            "  Game {} vs {} - {}' {} ({}, xG {:.2})",
            goal.game_id, goal.opponent, goal.minute, goal.play_type, goal.location, goal.xg
        );
    }
    if report.goals_timeline.len() > 10 {
        println!("  ... and {} more", report.goals_timeline.len() - 10);
    }
}

fn validate(input: &Path, options: &LoadOptions) -> Result<()> {
    let mut sink = CollectingSink::new();
    let report = analyze_file(input, options, &mut sink).context("Failed to analyze input")?;

    println!("Data file is usable");
    println!("  {} plays", report.key_stats.total_plays);
    println!("  {} games", report.games.len());

    if sink.is_empty() {
        println!("  No issues found");
    } else {
        println!(
            "  Issues found ({} rows skipped, {} games dropped):",
            sink.ragged_rows(),
            sink.dropped_games()
        );
        for diagnostic in &sink.diagnostics {
            println!("    - {}", diagnostic);
        }
    }

    Ok(())
}

fn export(input: &Path, output: &Path, options: &LoadOptions) -> Result<()> {
    println!("Reading data file: {}", input.display());
    let report = analyze_file(input, options, &mut LogSink).context("Failed to analyze input")?;
    println!("Found {} games and {} goals", report.games.len(), report.goals_timeline.len());

    println!("Writing Excel file: {}", output.display());
    xlsx::write_report_to_xlsx(&report, output).context("Failed to write Excel file")?;

    println!("Done!");
    Ok(())
}

fn prompt(input: &Path, question: &str, limit: usize, options: &LoadOptions) -> Result<()> {
    let mut sink = LogSink;
    let records = load_file(input, options, &mut sink).context("Failed to read data file")?;
    let report = analyze_records(&records, &mut sink).context("Failed to analyze input")?;

    let rows = relevant_plays(&records, question, limit);
    eprintln!("{} matching plays", rows.len());

    let prompts = PromptSet::build(question, &rows, &report.key_stats);
    println!("===== RESEARCHER =====");
    println!("{}", prompts.researcher);
    println!("===== MODEL =====");
    println!("{}", prompts.model);

    Ok(())
}
