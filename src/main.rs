use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use quizforge::config::{EngineTimings, LoadPolicy};
use quizforge::quiz::{loader, QuizConfig};
use quizforge::quizzes::KnownQuiz;
use quizforge::QfResult;
use std::process;
use std::str::FromStr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;
mod terminal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiz definition (JSON). Overrides --builtin.
    #[arg(global = true, short, long)]
    quiz: Option<String>,

    #[arg(global = true, short, long, default_value = "personality")]
    builtin: String,

    #[arg(global = true, long, value_enum, default_value_t = LoadPolicy::Strict)]
    policy: LoadPolicy,

    #[arg(global = true, long)]
    shuffle_seed: Option<u64>,

    /// JSON file with phase durations; flags typed on the command line still win.
    #[arg(global = true, long)]
    timings: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Play(cmd::play::PlayArgs),
    Simulate(cmd::simulate::SimulateArgs),
    Validate(cmd::validate::ValidateArgs),
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_quiz(cli: &Cli) -> QfResult<QuizConfig> {
    match &cli.quiz {
        Some(path) => loader::read_from_file(path),
        None => {
            let known = KnownQuiz::from_str(&cli.builtin).map_err(|_| {
                quizforge::QuizError::MissingConfig(format!("built-in quiz '{}'", cli.builtin))
            })?;
            info!("📦 Using built-in quiz: {}", known);
            serde_json::from_str(known.get_str()).map_err(Into::into)
        }
    }
}

fn resolve_timings(cli: &Cli, cli_timings: &EngineTimings, matches: &clap::ArgMatches) -> EngineTimings {
    let Some(path) = &cli.timings else {
        return cli_timings.clone();
    };
    info!("⏱️  Loading timings from: {}", path);
    let mut timings = EngineTimings::load_from_file(path).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    timings.merge_from_cli(cli_timings, matches);
    timings
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    let mut quiz = read_quiz(&cli).unwrap_or_else(|e| {
        error!("❌ Quiz could not be loaded, engine not started: {}", e);
        process::exit(1);
    });

    if let Commands::Validate(args) = &cli.command {
        let ok = cmd::validate::run(args, &quiz, cli.policy);
        process::exit(if ok { 0 } else { 1 });
    }

    if let Err(e) = loader::validate(&quiz, cli.policy) {
        error!("❌ {}", e);
        process::exit(1);
    }

    if let Some(seed) = cli.shuffle_seed {
        loader::shuffle_questions(&mut quiz, seed);
    }

    let result = match &cli.command {
        Commands::Play(args) => {
            let sub = matches.subcommand_matches("play").unwrap_or(&matches);
            let timings = resolve_timings(&cli, &args.timings, sub);
            cmd::play::run(args, quiz, timings)
        }
        Commands::Simulate(args) => {
            let sub = matches.subcommand_matches("simulate").unwrap_or(&matches);
            let timings = resolve_timings(&cli, &args.timings, sub);
            cmd::simulate::run(args, quiz, timings)
        }
        Commands::Validate(_) => Ok(()),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
