use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::score_percent;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("a topic tracker needs at least one topic")]
    Empty,
    #[error("unknown topic: {0}")]
    Unknown(String),
}

/// Tracks which topic cards of an exploration page have been opened.
///
/// Order of reading is irrelevant; the page is complete once every topic
/// was opened at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTracker {
    topics: Vec<String>,
    read: BTreeSet<String>,
}

impl TopicTracker {
    /// # Errors
    ///
    /// Returns `TopicError::Empty` when no topics are given.
    pub fn new<I, S>(topics: I) -> Result<Self, TopicError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique = Vec::new();
        for topic in topics {
            let topic = topic.into();
            if !unique.contains(&topic) {
                unique.push(topic);
            }
        }
        if unique.is_empty() {
            return Err(TopicError::Empty);
        }
        Ok(Self {
            topics: unique,
            read: BTreeSet::new(),
        })
    }

    /// Mark `topic` as read. Returns `true` the first time only.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::Unknown` for topics not on this page.
    pub fn mark_read(&mut self, topic: &str) -> Result<bool, TopicError> {
        if !self.topics.iter().any(|t| t == topic) {
            return Err(TopicError::Unknown(topic.to_owned()));
        }
        Ok(self.read.insert(topic.to_owned()))
    }

    #[must_use]
    pub fn is_read(&self, topic: &str) -> bool {
        self.read.contains(topic)
    }

    #[must_use]
    pub fn read_count(&self) -> usize {
        self.read.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn unread(&self) -> Vec<&str> {
        self.topics
            .iter()
            .filter(|t| !self.read.contains(t.as_str()))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        score_percent(self.read.len(), self.topics.len())
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{} of {} topics explored", self.read.len(), self.topics.len())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.read.len() == self.topics.len()
    }

    pub fn reset(&mut self) {
        self.read.clear();
    }
}
