//! Mercstart Campaign Start Engine
//!
//! One-shot roster and unit randomization for a campaign's first
//! initialization: pool sampling with duplication, guaranteed and
//! blacklisted pilot handling, stat transplants, and fixed-capacity bay
//! allocation with bench overflow. The engine owns no persistent state;
//! host integration goes through the [`CampaignData`] / [`CampaignOps`]
//! traits, and all planning underneath the initializer is pure.

pub mod bay;
pub mod config;
pub mod constants;
pub mod guard;
pub mod init;
pub mod pilot;
pub mod roster;
pub mod sample;

// Re-export commonly used types
pub use bay::{BayAssignment, BayPlan, UnitInstance, plan_bays, plan_unit_order};
pub use config::{ConfigError, ConfigLoad, StartConfig};
pub use constants::{ANCESTRAL_SLOT, BAY_SLOT_COUNT, FIRST_RANDOM_SLOT, LAST_BAY_SLOT};
pub use guard::RoninGuard;
pub use init::{CampaignInitializer, InitError, InitReport};
pub use pilot::{PilotDef, PilotRecord, SkillKind, SkillSet, transplant_stats};
pub use roster::{RosterEntry, RosterPlan, plan_roster};
pub use sample::{exclude, sample_pool};

/// Read side of the host simulation consumed during initialization.
/// Platform-specific implementations should provide this.
pub trait CampaignData {
    /// Look up a pilot definition by id; `None` when the id is unknown.
    /// Misses are recoverable — the engine skips and logs them.
    fn pilot_def(&self, id: &str) -> Option<PilotDef>;

    /// Ids of every ronin-eligible pilot the host knows.
    fn ronin_pool(&self) -> Vec<String>;

    /// Whether a unit definition exists for `id`.
    fn has_unit_def(&self, id: &str) -> bool;

    /// Number of bay slots the host's fixed starting lance occupies
    /// (slots `1..=len` are cleared before allocation).
    fn starting_lance_len(&self) -> usize;
}

/// Write side of the host simulation mutated during initialization.
pub trait CampaignOps {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate `count` procedural pilots at `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns an error when the host generator fails; the engine treats
    /// this as fatal for the run.
    fn generate_pilots(
        &mut self,
        count: usize,
        difficulty: i32,
    ) -> Result<Vec<PilotDef>, Self::Error>;

    /// Fresh unique instance id for an owned unit copy.
    fn next_instance_id(&mut self) -> String;

    /// Empty the pilot roster ahead of the rebuild.
    fn clear_roster(&mut self);

    /// Append a pilot to the roster, preserving insertion order.
    fn add_pilot(&mut self, pilot: PilotDef);

    /// Remove whatever occupies active `slot`, if anything.
    fn remove_active_unit(&mut self, slot: usize);

    /// Put a unit into active `slot`.
    fn place_unit(&mut self, slot: usize, unit: UnitInstance);

    /// Add the unit to the owned roster without an active slot
    /// (present, but not combat-ready).
    fn bench_unit(&mut self, unit: UnitInstance);
}
