//! View rendering
//!
//! Turns a topic id, the bad/good flag and the current answers into the
//! data a presentation layer needs. Pure: nothing here touches state.

use serde::Serialize;
use tracing::debug;

use crate::answer::Validity;
use crate::chart::ChartSpec;
use crate::content::{ContentError, ContentProvider, Registry};

/// Placeholder shown in empty answer fields
pub const ANSWER_PLACEHOLDER: &str = "Put your answer here...";

/// One row of the quiz form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormRow<'a> {
    /// 1-based question number
    pub number: usize,
    pub prompt: &'a str,
    pub value: &'a str,
    pub validity: Validity,
}

impl FormRow<'_> {
    /// Prompt prefixed with its number, e.g. "1. Which state..."
    pub fn label(&self) -> String {
        format!("{}. {}", self.number, self.prompt)
    }

    /// Text to display in the input field
    pub fn display_value(&self) -> &str {
        if self.value.is_empty() { ANSWER_PLACEHOLDER } else { self.value }
    }
}

/// Everything needed to draw one topic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView<'a> {
    pub topic_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub show_good: bool,
    pub chart: &'a ChartSpec,
    pub questions: Vec<FormRow<'a>>,
}

/// Current answer slot for one question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSlot {
    pub text: String,
    pub validity: Validity,
}

/// Render a topic
///
/// `answers` supplies the per-question input slots; questions without a
/// slot render empty and unchecked.
pub fn render_view<'a>(
    registry: &'a Registry,
    topic_id: &str,
    show_good: bool,
    answers: &'a [AnswerSlot],
) -> Result<RenderedView<'a>, ContentError> {
    debug!(%topic_id, show_good, answers = answers.len(), "render_view: called");
    let topic = registry.get_topic(topic_id)?;

    let questions = topic
        .questions()
        .iter()
        .enumerate()
        .map(|(i, qa)| {
            let slot = answers.get(i);
            FormRow {
                number: i + 1,
                prompt: &qa.prompt,
                value: slot.map(|s| s.text.as_str()).unwrap_or(""),
                validity: slot.map(|s| s.validity).unwrap_or_default(),
            }
        })
        .collect();

    Ok(RenderedView {
        topic_id: &topic.id,
        title: topic.title(),
        description: topic.description(),
        show_good,
        chart: topic.chart(show_good),
        questions,
    })
}
