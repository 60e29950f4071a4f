use std::path::PathBuf;

use clap::Parser;
use quiz_core::model::QuizSettings;
use services::{AppServices, Clock, ControllerEvent, QuizController, TickOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

mod input;
mod render;
mod ticker;

use input::Command;
use ticker::Ticker;

#[derive(Parser, Debug)]
#[command(name = "quiz")]
#[command(version)]
#[command(about = "Terminal quiz trainer with timed tests and untimed training runs")]
struct Cli {
    /// SQLite URL or file path for results and preferences
    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = "sqlite://quiz.sqlite3")]
    db_url: String,

    /// JSON question bank
    #[arg(long, env = "QUIZ_QUESTIONS", default_value = "questions.json")]
    questions: PathBuf,

    /// Test time limit in seconds
    #[arg(
        long = "time-limit",
        env = "QUIZ_TIME_LIMIT_SECS",
        value_name = "SECONDS",
        default_value_t = QuizSettings::DEFAULT_TEST_TIME_LIMIT_SECS
    )]
    time_limit: u32,

    /// Maximum number of questions in a test
    #[arg(
        long = "test-size",
        env = "QUIZ_TEST_SIZE",
        default_value_t = QuizSettings::DEFAULT_TEST_QUESTION_LIMIT
    )]
    test_size: u32,

    /// Percentage needed to pass a test
    #[arg(
        long = "pass-threshold",
        env = "QUIZ_PASS_THRESHOLD",
        value_name = "PERCENT",
        default_value_t = QuizSettings::DEFAULT_PASS_THRESHOLD_PERCENT
    )]
    pass_threshold: u8,

    /// Enable debug logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
struct InvalidDbUrl {
    raw: String,
}

impl std::fmt::Display for InvalidDbUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid --db value: {}", self.raw)
    }
}

impl std::error::Error for InvalidDbUrl {}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid().into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = QuizSettings::new(cli.test_size, cli.time_limit, cli.pass_threshold)?;
    if cli.db_url.trim().is_empty() {
        return Err(InvalidDbUrl { raw: cli.db_url }.into());
    }
    let db_url = normalize_sqlite_url(cli.db_url);
    prepare_sqlite_file(&db_url)?;

    let app = AppServices::new_sqlite(&db_url, &cli.questions, Clock::default(), settings).await?;
    let mut controller = app.controller();
    tracing::info!(db = %db_url, questions = %cli.questions.display(), "quiz ready");

    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let mut ticker: Option<Ticker> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render::home(&controller.home().await));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match input::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Empty) => {}
                    Ok(Command::Help) => println!("{}", render::HELP),
                    Ok(Command::Intent(intent)) => match controller.dispatch(intent).await {
                        Ok(event) => show(&controller, &event).await,
                        Err(err) => println!("! {err}"),
                    },
                    Err(err) => println!("! {err}"),
                }
            }
            Some(handle) = tick_rx.recv() => {
                match controller.on_tick(handle).await {
                    TickOutcome::Ignored => {}
                    TickOutcome::Remaining(secs) => {
                        if secs % 60 == 0 || secs <= 10 {
                            println!("time left {}", render::format_remaining(secs));
                        }
                    }
                    TickOutcome::Expired(summary) => {
                        show(&controller, &ControllerEvent::Finished(summary)).await;
                    }
                }
            }
        }
        ticker::sync(&mut ticker, controller.timer_handle(), &tick_tx);
    }

    Ok(())
}

async fn show(controller: &QuizController, event: &ControllerEvent) {
    println!("{}", render::event(event));
    if matches!(event, ControllerEvent::Finished(_)) {
        println!("\n{}", render::home(&controller.home().await));
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
