//! Review host seam: where annotations and summaries are posted.
//!
//! The transport (GitHub checks, a PR comment bot, a terminal) lives behind
//! `ReviewHost`. `MemoryHost` records calls for inspection.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Whether an annotation fails the check.
pub enum AnnotationLevel {
    Warn,
    Fail,
}

/// Primitives offered by a code-review host.
pub trait ReviewHost {
    /// Attach `message` to a file/line. `None` means a run-level annotation.
    fn annotate(&mut self, message: &str, location: Option<(&str, u32)>, level: AnnotationLevel);
    /// Post one aggregated markdown document.
    fn post_summary(&mut self, markdown: &str);
    /// Mark the overall check failed.
    fn fail_check(&mut self, message: &str);
    /// Mark the overall check with a non-fatal notice.
    fn warn_check(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One recorded host call.
pub enum HostEvent {
    Annotation {
        message: String,
        file: Option<String>,
        line: Option<u32>,
        level: AnnotationLevel,
    },
    Summary {
        markdown: String,
    },
    Failed {
        message: String,
    },
    Warned {
        message: String,
    },
}

#[derive(Debug, Default, Clone)]
/// Host that keeps every call in order.
pub struct MemoryHost {
    pub events: Vec<HostEvent>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotations(&self) -> impl Iterator<Item = &HostEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Annotation { .. }))
    }

    pub fn summaries(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Summary { markdown } => Some(markdown.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn failure(&self) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            HostEvent::Failed { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl ReviewHost for MemoryHost {
    fn annotate(&mut self, message: &str, location: Option<(&str, u32)>, level: AnnotationLevel) {
        self.events.push(HostEvent::Annotation {
            message: message.to_string(),
            file: location.map(|(f, _)| f.to_string()),
            line: location.map(|(_, l)| l),
            level,
        });
    }

    fn post_summary(&mut self, markdown: &str) {
        self.events.push(HostEvent::Summary {
            markdown: markdown.to_string(),
        });
    }

    fn fail_check(&mut self, message: &str) {
        self.events.push(HostEvent::Failed {
            message: message.to_string(),
        });
    }

    fn warn_check(&mut self, message: &str) {
        self.events.push(HostEvent::Warned {
            message: message.to_string(),
        });
    }
}
