//! Fixed geometry and default quotas for the campaign start engine.
//!
//! These values mirror the host simulation's bay layout and the shipped
//! settings defaults.

// Bay geometry -------------------------------------------------------------
/// Total number of active bay slots the host exposes.
pub const BAY_SLOT_COUNT: usize = 6;
/// Slot conventionally occupied by the ancestral starting unit.
pub const ANCESTRAL_SLOT: usize = 0;
/// Highest addressable slot; overflow past it is benched, never dropped.
pub const LAST_BAY_SLOT: usize = BAY_SLOT_COUNT - 1;
/// First slot used when the ancestral unit stays in place.
pub const FIRST_RANDOM_SLOT: usize = 1;

// Settings defaults --------------------------------------------------------
pub(crate) const DEFAULT_LIGHT_UNITS: usize = 3;
pub(crate) const DEFAULT_MEDIUM_UNITS: usize = 1;
pub(crate) const DEFAULT_RANDOM_RONIN: usize = 4;
pub(crate) const DEFAULT_PILOT_DIFFICULTY: i32 = 1;
