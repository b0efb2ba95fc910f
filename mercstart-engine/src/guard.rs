//! Veto filter for host-proposed ronin candidates.

use std::collections::HashSet;

use crate::config::StartConfig;

/// Screens ronin candidates the host proposes on its own schedule.
///
/// A vetoed candidate is reported as "no candidate", which makes the host
/// rerun its own selection; the guard never picks a replacement. Screening
/// is stateless and side-effect free, so repeated proposals of the same id
/// always get the same answer.
#[derive(Debug, Clone, Default)]
pub struct RoninGuard {
    blacklist: HashSet<String>,
}

impl RoninGuard {
    #[must_use]
    pub fn new<I>(blacklist: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            blacklist: blacklist.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn from_config(cfg: &StartConfig) -> Self {
        Self::new(cfg.blacklisted_ronin.iter().cloned())
    }

    #[must_use]
    pub fn is_blacklisted(&self, id: &str) -> bool {
        self.blacklist.contains(id)
    }

    /// Pass the candidate through, or `None` when it is blacklisted.
    #[must_use]
    pub fn screen<'a>(&self, candidate_id: &'a str) -> Option<&'a str> {
        if self.is_blacklisted(candidate_id) {
            None
        } else {
            Some(candidate_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> RoninGuard {
        RoninGuard::new(["ronin-grim".to_string(), "ronin-hex".to_string()])
    }

    #[test]
    fn blacklisted_candidates_are_always_vetoed() {
        let guard = guard();
        for _ in 0..10 {
            assert_eq!(guard.screen("ronin-grim"), None);
            assert_eq!(guard.screen("ronin-hex"), None);
        }
    }

    #[test]
    fn other_candidates_pass_through_unchanged() {
        let guard = guard();
        assert_eq!(guard.screen("ronin-medusa"), Some("ronin-medusa"));
    }

    #[test]
    fn empty_blacklist_accepts_everyone() {
        let guard = RoninGuard::default();
        assert_eq!(guard.screen("anyone"), Some("anyone"));
        assert!(!guard.is_blacklisted("anyone"));
    }

    #[test]
    fn builds_from_config_blacklist() {
        let cfg = StartConfig {
            blacklisted_ronin: vec!["ronin-grim".to_string()],
            ..StartConfig::default()
        };
        let guard = RoninGuard::from_config(&cfg);
        assert!(guard.is_blacklisted("ronin-grim"));
        assert!(!guard.is_blacklisted("ronin-medusa"));
    }
}
