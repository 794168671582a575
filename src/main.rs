//! tictactoe CLI
//!
//! Play tic-tac-toe in the terminal, or simulate games headlessly.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::filter::LevelFilter;

use tictactoe::logging::{init_logging, LogTarget};
use tictactoe::report::format_report;
use tictactoe::simulate::{simulate, simulate_with_progress};
use tictactoe::tui::run::run;
use tictactoe::types::{DrawPolicy, GameConfig, OutputFormat, SimulationConfig, ThemeMode};

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe against a random computer opponent")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for `play` when no subcommand is given
    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively in the terminal (default)
    Play(PlayArgs),

    /// Play many random-vs-random games and report the results
    Simulate {
        /// Number of games to play
        #[arg(long, default_value_t = 1000)]
        games: usize,

        /// Base RNG seed (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// How a full board without a line is scored
        #[arg(long, value_enum, default_value = "draw")]
        draw_scoring: DrawScoringArg,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// A log level among "off", "error", "warn", "info", "debug", "trace"
        #[arg(long, default_value = "warn")]
        log_level: LevelFilter,
    },
}

#[derive(Args, Clone)]
struct PlayArgs {
    /// Initial color theme
    #[arg(long, value_enum, default_value = "light")]
    theme: ThemeArg,

    /// RNG seed for the computer's moves (default: random)
    #[arg(long)]
    seed: Option<u64>,

    /// How a full board without a line is scored
    #[arg(long, value_enum, default_value = "draw")]
    draw_scoring: DrawScoringArg,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Append logs to this file (the game screen hides stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DrawScoringArg {
    /// Neither side scores
    Draw,
    /// Count it as a computer win
    CreditComputer,
}

impl From<DrawScoringArg> for DrawPolicy {
    fn from(arg: DrawScoringArg) -> Self {
        match arg {
            DrawScoringArg::Draw => DrawPolicy::Draw,
            DrawScoringArg::CreditComputer => DrawPolicy::CreditComputer,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Play(args)) => cmd_play(args),
        Some(Commands::Simulate {
            games,
            seed,
            draw_scoring,
            format,
            log_level,
        }) => cmd_simulate(games, seed, draw_scoring.into(), format.into(), log_level),
        None => cmd_play(cli.play),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            // constant template
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.set_message(msg.to_string());
    pb
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_play(args: PlayArgs) -> Result<(), String> {
    let target = match args.log_file {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Off,
    };
    init_logging(args.log_level, target).map_err(|e| e.to_string())?;

    let config = GameConfig {
        theme: args.theme.into(),
        seed: args.seed,
        draw_policy: args.draw_scoring.into(),
    };

    run(config).map_err(|e| format!("Terminal error: {}", e))
}

fn cmd_simulate(
    games: usize,
    seed: Option<u64>,
    draw_policy: DrawPolicy,
    format: OutputFormat,
    log_level: LevelFilter,
) -> Result<(), String> {
    init_logging(log_level, LogTarget::Stderr).map_err(|e| e.to_string())?;

    let config = SimulationConfig {
        games,
        seed: seed.unwrap_or_else(rand::random),
        draw_policy,
    };

    let show_progress = format == OutputFormat::Human;

    let report = if show_progress {
        eprintln!("Simulating {} games (seed {})", config.games, config.seed);
        let pb = progress_bar(config.games as u64, "games");
        let report = simulate_with_progress(&config, || pb.inc(1));
        pb.finish_and_clear();
        report
    } else {
        simulate(&config)
    };

    println!("{}", format_report(&report, format));
    Ok(())
}
