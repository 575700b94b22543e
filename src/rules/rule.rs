//! Transition rule seam

use crate::article::Article;

use super::errors::RuleResult;

/// One step of the update pipeline.
///
/// A rule sees the stored record and the candidate produced so far, and
/// returns the candidate to hand to the next rule, or rejects the update.
/// Rules hold no state and perform no I/O.
pub trait TransitionRule: Send + Sync {
    /// Stable rule name for logs and errors
    fn name(&self) -> &'static str;

    /// Apply the rule
    fn apply(&self, prior: &Article, candidate: Article) -> RuleResult<Article>;
}
