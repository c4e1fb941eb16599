//! plotquiz binary
//!
//! Opens the dashboard by default; subcommands expose the same content
//! and answer checking non-interactively.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use tracing::{debug, info};

use plotquiz::answer::{Score, Validity, check_all};
use plotquiz::cli::{Cli, Command, OutputFormat};
use plotquiz::config::Config;
use plotquiz::content::{ContentProvider, Registry};
use plotquiz::tui::{self, App};
use plotquiz::view::{AnswerSlot, render_view};

/// Setup logging to file
fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = plotquiz::cli::get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let registry = config.registry().context("Failed to load topics")?;
    info!(topics = registry.len(), "plotquiz loaded content");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Topics { format }) => {
            debug!(?format, "main: matched Topics command");
            cmd_topics(&registry, format)
        }
        Some(Command::Show { topic, good, format }) => {
            debug!(%topic, good, ?format, "main: matched Show command");
            cmd_show(&registry, &topic, good, format)
        }
        Some(Command::Check { topic, answers, format }) => {
            debug!(%topic, count = answers.len(), ?format, "main: matched Check command");
            cmd_check(&registry, &config, &topic, &answers, format)
        }
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(registry, &config).await
        }
    }
}

/// Launch the interactive dashboard
async fn cmd_tui(registry: Registry, config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    let app = App::with_options(registry, config.start_topic.as_deref(), config.answers.trim);
    tui::run(app, Duration::from_millis(config.tick_rate_ms)).await
}

/// List topics in tab order
fn cmd_topics(registry: &Registry, format: OutputFormat) -> Result<()> {
    debug!(?format, "cmd_topics: called");
    let topics = registry.list_topics();

    match format {
        OutputFormat::Json => {
            let items: Vec<_> = topics
                .iter()
                .map(|(id, title)| serde_json::json!({"id": id, "title": title}))
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Text => {
            for (i, (id, title)) in topics.iter().enumerate() {
                println!("{} {:<12} {}", format!("{}.", i + 1).dimmed(), id.cyan(), title);
            }
        }
    }
    Ok(())
}

/// Print a topic the way the dashboard would show it
fn cmd_show(registry: &Registry, topic_id: &str, good: bool, format: OutputFormat) -> Result<()> {
    debug!(%topic_id, good, ?format, "cmd_show: called");
    let view = render_view(registry, topic_id, good, &[])?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text => {
            println!("{}", view.title.bold());
            if !view.description.is_empty() {
                println!("{}", view.description);
            }
            println!();
            for row in &view.questions {
                println!("  {}", row.label());
            }
            println!();
            let which = if view.show_good { "Good".green() } else { "Bad".red() };
            let chart_title = view.chart.title().unwrap_or("untitled");
            println!("{} chart ({}): {}", which, view.chart.kind(), chart_title);
        }
    }
    Ok(())
}

/// Check answers for a topic, in question order
fn cmd_check(
    registry: &Registry,
    config: &Config,
    topic_id: &str,
    answers: &[String],
    format: OutputFormat,
) -> Result<()> {
    debug!(%topic_id, count = answers.len(), ?format, "cmd_check: called");
    let topic = registry.get_topic(topic_id)?;

    let expected = topic.questions().len();
    if answers.len() > expected {
        debug!(given = answers.len(), expected, "cmd_check: too many answers");
        bail!(
            "Topic '{}' has {} questions but {} answers were given",
            topic_id,
            expected,
            answers.len()
        );
    }

    let submitted: Vec<Option<&str>> = (0..expected)
        .map(|i| answers.get(i).map(String::as_str))
        .collect();
    let results = check_all(
        submitted.iter().copied().zip(topic.questions().iter().map(|qa| qa.answer.as_str())),
        config.answers.trim,
    );

    let slots: Vec<AnswerSlot> = submitted
        .iter()
        .zip(&results)
        .map(|(text, validity)| AnswerSlot {
            text: text.unwrap_or_default().to_string(),
            validity: *validity,
        })
        .collect();
    let score = Score::from_results(&results);
    let view = render_view(registry, topic_id, false, &slots)?;
    debug!(%score, "cmd_check: scored");

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "topic": view.topic_id,
                    "rows": view.questions,
                    "score": score,
                }))?
            );
        }
        OutputFormat::Text => {
            for row in &view.questions {
                let icon = match row.validity {
                    Validity::Correct => row.validity.icon().green(),
                    Validity::Incorrect => row.validity.icon().red(),
                    Validity::Unknown => row.validity.icon().dimmed(),
                };
                println!("{} {} {}", icon, row.label(), format!("[{}]", row.validity).dimmed());
            }
            println!();
            println!("{}", score.to_string().bold());
        }
    }
    Ok(())
}
