//! Transition engine
//!
//! Creation: stamp `stored_on` → derive resolved fields.
//! Update:   rules in order → derive resolved fields.

use std::sync::Arc;

use crate::article::Article;
use crate::clock::{Clock, SystemClock, Timestamp};

use super::builtin::{derive_resolved_fields, stamp_creation, update_rules};
use super::errors::RuleResult;
use super::rule::TransitionRule;

/// Reconciles a candidate against the stored record.
pub struct TransitionEngine {
    clock: Arc<dyn Clock>,
    rules: Vec<Box<dyn TransitionRule>>,
}

impl TransitionEngine {
    /// Engine with the standard article rules and the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            rules: update_rules(),
        }
    }

    /// Engine with an explicit rule list.
    pub fn with_rules(clock: Arc<dyn Clock>, rules: Vec<Box<dyn TransitionRule>>) -> Self {
        Self { clock, rules }
    }

    /// Returns the current time from the injected clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Produces the record to persist.
    ///
    /// `prior` is `None` on creation.
    pub fn process(&self, candidate: Article, prior: Option<&Article>) -> RuleResult<Article> {
        let record = match prior {
            None => stamp_creation(candidate, self.clock.now()),
            Some(prior) => self
                .rules
                .iter()
                .try_fold(candidate, |current, rule| rule.apply(prior, current))?,
        };

        Ok(derive_resolved_fields(record))
    }
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::rules::errors::RuleError;

    fn article() -> Article {
        Article {
            url: "http://example.com/".into(),
            preview: None,
            title: Some("Example".into()),
            added_by: "tablet".into(),
            added_on: 1,
            stored_on: 1,
            archived: false,
            favorite: false,
            unread: true,
            is_article: true,
            excerpt: String::new(),
            read_position: 0,
            marked_read_by: None,
            marked_read_on: None,
            word_count: None,
            resolved_url: None,
            resolved_title: None,
        }
    }

    fn engine_at(now: u64) -> TransitionEngine {
        TransitionEngine::new(Arc::new(FixedClock::at(now)))
    }

    #[test]
    fn test_creation_stamps_and_derives() {
        let record = engine_at(9_000).process(article(), None).unwrap();
        assert_eq!(record.stored_on, 9_000);
        assert_eq!(record.resolved_url.as_deref(), Some("http://example.com/"));
        assert_eq!(record.resolved_title.as_deref(), Some("Example"));
    }

    #[test]
    fn test_update_keeps_stored_on() {
        let prior = engine_at(9_000).process(article(), None).unwrap();
        let record = engine_at(12_000)
            .process(prior.clone(), Some(&prior))
            .unwrap();
        assert_eq!(record.stored_on, 9_000);
        assert_eq!(record, prior);
    }

    #[test]
    fn test_reset_wins_over_freeze() {
        let prior = Article {
            unread: false,
            marked_read_by: Some("deviceA".into()),
            marked_read_on: Some(77),
            read_position: 50,
            ..article()
        };
        let candidate = Article {
            unread: true,
            marked_read_by: Some("deviceB".into()),
            read_position: 60,
            ..article()
        };

        let record = engine_at(1).process(candidate, Some(&prior)).unwrap();
        assert_eq!(record.marked_read_by, None);
        assert_eq!(record.marked_read_on, None);
        assert_eq!(record.read_position, 0);
    }

    struct RejectAll;

    impl TransitionRule for RejectAll {
        fn name(&self) -> &'static str {
            "reject_all"
        }

        fn apply(&self, _prior: &Article, _candidate: Article) -> RuleResult<Article> {
            Err(RuleError::violation(self.name(), "url", "nope"))
        }
    }

    #[test]
    fn test_custom_rules_short_circuit() {
        let engine = TransitionEngine::with_rules(
            Arc::new(FixedClock::at(0)),
            vec![Box::new(RejectAll)],
        );
        assert_eq!(engine.rule_names(), vec!["reject_all"]);

        let err = engine.process(article(), Some(&article())).unwrap_err();
        assert_eq!(err.rule(), "reject_all");

        // Creation does not run update rules.
        assert!(engine.process(article(), None).is_ok());
    }
}
