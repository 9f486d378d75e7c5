//! Caller-supplied issue selection and severity partitioning.

use crate::models::{Issue, Severity};

/// Predicate deciding whether an issue is reported.
pub type IssuePredicate<'a> = &'a dyn Fn(&Issue) -> bool;

/// Keep only issues accepted by `predicate`, or all when none is given.
pub fn select(issues: Vec<Issue>, predicate: Option<IssuePredicate<'_>>) -> Vec<Issue> {
    match predicate {
        Some(keep) => issues.into_iter().filter(|i| keep(i)).collect(),
        None => issues,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Issues split by severity, each keeping its original relative order.
pub struct Partitioned {
    pub warnings: Vec<Issue>,
    pub errors: Vec<Issue>,
    /// Issues whose severity is neither warning nor error.
    pub others: Vec<Issue>,
}

impl Partitioned {
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty() && self.others.is_empty()
    }
}

pub fn partition(issues: &[Issue]) -> Partitioned {
    let mut out = Partitioned::default();
    for is in issues {
        match is.severity {
            Severity::Warning => out.warnings.push(is.clone()),
            Severity::Error => out.errors.push(is.clone()),
            Severity::Unknown(_) => out.others.push(is.clone()),
        }
    }
    out
}

/// Predicate rejecting issues whose rule is in `rules`.
pub fn ignore_rules(rules: &[String]) -> impl Fn(&Issue) -> bool + '_ {
    move |is: &Issue| !rules.iter().any(|r| r == &is.rule)
}
