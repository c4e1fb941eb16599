//! plotquiz - bad plots, good plots
//!
//! A terminal dashboard that shows, topic by topic, a badly made chart next
//! to a well made one of the same data, plus a short quiz whose answers are
//! easy to get wrong from the bad chart.
//!
//! # Modules
//!
//! - [`content`] - Topic records and the registry that serves them
//! - [`chart`] - Chart specifications (plain data, no drawing)
//! - [`view`] - Pure rendering of a topic into form rows and a chart
//! - [`answer`] - Answer checking and scoring
//! - [`tui`] - Interactive dashboard
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod answer;
pub mod chart;
pub mod cli;
pub mod config;
pub mod content;
pub mod tui;
pub mod view;

// Re-export commonly used types
pub use answer::{Score, TrimMode, Validity, check_answer, check_answer_with};
pub use chart::ChartSpec;
pub use config::Config;
pub use content::{ContentError, ContentProvider, QuestionAnswer, Registry, Topic};
pub use view::{AnswerSlot, FormRow, RenderedView, render_view};
