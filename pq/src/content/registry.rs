//! Topic registry
//!
//! Ordered, read-only collection of topics. Registration order is the tab
//! order of the dashboard.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::embedded::BUILTIN_TOPICS;
use super::{ContentError, Topic};

/// Ordered mapping from topic id to topic
#[derive(Debug, Clone)]
pub struct Registry {
    topics: Vec<Topic>,
}

impl Registry {
    /// Build a registry from topics in the given order
    pub fn new(topics: Vec<Topic>) -> Result<Self, ContentError> {
        debug!(count = topics.len(), "Registry::new: called");
        if topics.is_empty() {
            return Err(ContentError::Empty);
        }

        let mut seen = HashSet::new();
        for topic in &topics {
            topic.validate()?;
            if !seen.insert(topic.id.as_str()) {
                return Err(ContentError::DuplicateTopic { id: topic.id.clone() });
            }
        }

        Ok(Self { topics })
    }

    /// Registry of the topics compiled into the binary
    pub fn builtin() -> Result<Self, ContentError> {
        debug!("Registry::builtin: called");
        let topics = BUILTIN_TOPICS
            .iter()
            .map(|(_, src)| serde_yaml::from_str::<Topic>(src))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(topics)
    }

    /// Parse a YAML list of topics
    pub fn from_yaml(content: &str) -> Result<Self, ContentError> {
        debug!(len = content.len(), "Registry::from_yaml: called");
        let topics: Vec<Topic> = serde_yaml::from_str(content)?;
        Self::new(topics)
    }

    /// Load a YAML list of topics from disk
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        debug!(?path, "Registry::load: called");
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_yaml(&content)?;
        info!("Loaded {} topics from: {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Look up a topic by id
    pub fn get_topic(&self, id: &str) -> Result<&Topic, ContentError> {
        debug!(%id, "Registry::get_topic: called");
        self.topics
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ContentError::NotFound { id: id.to_string() })
    }

    /// Look up a topic, falling back to the first one for unknown ids
    pub fn resolve_or_first(&self, id: &str) -> &Topic {
        match self.get_topic(id) {
            Ok(topic) => topic,
            Err(e) => {
                warn!(%id, "{}; falling back to '{}'", e, self.first().id);
                self.first()
            }
        }
    }

    /// (id, title) pairs in registration order
    pub fn list_topics(&self) -> Vec<(&str, &str)> {
        self.topics.iter().map(|t| (t.id.as_str(), t.title.as_str())).collect()
    }

    /// The first registered topic
    pub fn first(&self) -> &Topic {
        // A registry is never empty, see Registry::new
        &self.topics[0]
    }

    /// Position of a topic in registration order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.topics.iter().position(|t| t.id == id)
    }

    /// Topic at a position in registration order
    pub fn get_index(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }
}
