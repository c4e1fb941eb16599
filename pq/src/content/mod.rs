//! Topic content
//!
//! Every topic is a plain data record: a title, a description, a bad and a
//! good chart of the same data, and a short quiz. Topics are loaded once
//! into a [`Registry`] and never mutated afterwards.

mod embedded;
mod error;
mod registry;

pub use embedded::{BUILTIN_TOPICS, get_embedded};
pub use error::ContentError;
pub use registry::Registry;

use serde::{Deserialize, Serialize};

use crate::chart::ChartSpec;

/// A quiz question and the answer it is checked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub prompt: String,
    pub answer: String,
}

impl QuestionAnswer {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

/// The interface every topic exposes to the rest of the application
pub trait ContentProvider {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn bad_chart(&self) -> &ChartSpec;
    fn good_chart(&self) -> &ChartSpec;
    fn questions(&self) -> &[QuestionAnswer];

    /// Pick the good or the bad chart
    fn chart(&self, show_good: bool) -> &ChartSpec {
        if show_good { self.good_chart() } else { self.bad_chart() }
    }
}

/// One dataset with its chart pair and quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<QuestionAnswer>,
    pub bad: ChartSpec,
    pub good: ChartSpec,
}

impl ContentProvider for Topic {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn bad_chart(&self) -> &ChartSpec {
        &self.bad
    }

    fn good_chart(&self) -> &ChartSpec {
        &self.good
    }

    fn questions(&self) -> &[QuestionAnswer] {
        &self.questions
    }
}

impl Topic {
    /// Check the fields a topic cannot do without
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.id.trim().is_empty() {
            return Err(ContentError::Invalid {
                id: self.id.clone(),
                reason: "id is empty".to_string(),
            });
        }
        if self.title.trim().is_empty() {
            return Err(ContentError::Invalid {
                id: self.id.clone(),
                reason: "title is empty".to_string(),
            });
        }
        Ok(())
    }
}
