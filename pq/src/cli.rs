//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// plotquiz - bad plots, good plots
#[derive(Parser)]
#[command(
    name = "pq",
    about = "Terminal dashboard contrasting bad and good data visualizations",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (default: open the dashboard)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List topics in tab order
    Topics {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a topic's title, description, questions and chart
    Show {
        /// Topic id
        topic: String,

        /// Show the good chart instead of the bad one
        #[arg(short, long)]
        good: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Check answers for a topic's questions
    Check {
        /// Topic id
        topic: String,

        /// Answers in question order (use "" to skip a question)
        answers: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plotquiz")
        .join("logs")
        .join("plotquiz.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Output format for non-interactive commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["pq"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_topics_json() {
        let cli = Cli::parse_from(["pq", "topics", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Some(Command::Topics {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_cli_parse_show_good() {
        let cli = Cli::parse_from(["pq", "show", "olympics", "--good"]);
        match cli.command {
            Some(Command::Show { topic, good, format }) => {
                assert_eq!(topic, "olympics");
                assert!(good);
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_check_answers() {
        let cli = Cli::parse_from(["pq", "check", "states", "California", "", "Florida"]);
        match cli.command {
            Some(Command::Check { topic, answers, .. }) => {
                assert_eq!(topic, "states");
                assert_eq!(answers, vec!["California", "", "Florida"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from(["pq", "topics", "-l", "debug", "-c", "/tmp/pq.yml"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pq.yml")));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_log_path_under_plotquiz() {
        let path = get_log_path();
        assert!(path.ends_with("plotquiz/logs/plotquiz.log"));
    }
}
