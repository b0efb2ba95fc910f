//! Roster planning: guarantees, random ronin, and procedural fills.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::StartConfig;
use crate::sample::{exclude, sample_pool};

/// One planned roster position and how the adapter must resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterEntry {
    /// Configured pilot, inserted ahead of all random draws.
    Guaranteed { id: String, reroll: bool },
    /// Pilot drawn from the ronin pool after exclusions.
    RandomRonin { id: String, reroll: bool },
    /// One host-generated pilot, used exactly as generated.
    Procedural,
}

impl RosterEntry {
    /// Pilot id to look up, when the entry refers to an existing def.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Guaranteed { id, .. } | Self::RandomRonin { id, .. } => Some(id),
            Self::Procedural => None,
        }
    }

    /// Whether the adapter must transplant fresh stats onto this pilot.
    #[must_use]
    pub const fn wants_reroll(&self) -> bool {
        match self {
            Self::Guaranteed { reroll, .. } | Self::RandomRonin { reroll, .. } => *reroll,
            Self::Procedural => false,
        }
    }
}

/// Ordered pilot plan produced by [`plan_roster`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RosterPlan {
    pub entries: Vec<RosterEntry>,
}

impl RosterPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of procedural placeholders in the plan.
    #[must_use]
    pub fn procedural_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, RosterEntry::Procedural))
            .count()
    }
}

/// Plan the final roster order.
///
/// Guarantees come first, in configured order. The random draw runs against
/// the ronin pool with guarantees and blacklisted ids excluded, so neither
/// can be re-selected. Procedural placeholders close the plan; they are
/// never marked for reroll.
#[must_use]
pub fn plan_roster<R: Rng + ?Sized>(
    cfg: &StartConfig,
    ronin_pool: &[String],
    rng: &mut R,
) -> RosterPlan {
    let mut entries = Vec::with_capacity(cfg.total_pilot_quota());

    for id in &cfg.starting_ronin {
        entries.push(RosterEntry::Guaranteed {
            id: id.clone(),
            reroll: cfg.reroll_stats,
        });
    }

    let mut excluded: HashSet<String> = cfg.starting_ronin.iter().cloned().collect();
    excluded.extend(cfg.blacklisted_ronin.iter().cloned());
    let candidates = exclude(ronin_pool, &excluded);
    for id in sample_pool(&candidates, cfg.number_random_ronin, rng) {
        entries.push(RosterEntry::RandomRonin {
            id,
            reroll: cfg.reroll_stats,
        });
    }

    entries.extend(
        std::iter::repeat_with(|| RosterEntry::Procedural).take(cfg.number_procedural_pilots),
    );

    RosterPlan { entries }
}
