use serde::{Deserialize, Serialize};

use super::bucket::Bucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdviceSeverity {
    Info,
    Suggestion,
    Warning,
}

impl std::fmt::Display for AdviceSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdviceSeverity::Info => write!(f, "info"),
            AdviceSeverity::Suggestion => write!(f, "suggestion"),
            AdviceSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// What a piece of advice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceTopic {
    Milestone,
    Bucket(Bucket),
    Savings,
    History,
}

/// A single coach message. Produced from fixed templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub severity: AdviceSeverity,
    pub topic: AdviceTopic,
    pub message: String,
}

impl Advice {
    pub fn new(severity: AdviceSeverity, topic: AdviceTopic, message: impl Into<String>) -> Self {
        Self {
            severity,
            topic,
            message: message.into(),
        }
    }
}
