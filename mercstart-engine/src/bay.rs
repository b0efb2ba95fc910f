//! Unit ordering and fixed-capacity bay allocation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::StartConfig;
use crate::constants::BAY_SLOT_COUNT;
use crate::sample::sample_pool;

/// An owned unit copy ready to occupy a bay slot or the bench.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitInstance {
    pub def_id: String,
    pub instance_id: String,
}

/// A unit assigned to a specific bay slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BayAssignment {
    pub slot: usize,
    pub unit_id: String,
}

/// Result of allocating an ordered unit queue onto the bay.
///
/// Assignments rarely exceed the visible bay, so they are stored inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BayPlan {
    pub assignments: SmallVec<[BayAssignment; BAY_SLOT_COUNT]>,
    pub benched: Vec<String>,
}

impl BayPlan {
    /// Id occupying `slot`, if the plan fills it.
    #[must_use]
    pub fn occupant(&self, slot: usize) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.slot == slot)
            .map(|a| a.unit_id.as_str())
    }
}

/// Map an ordered unit id sequence onto consecutive bay slots.
///
/// Slots advance from `start_slot`; once a unit has been placed into
/// `last_slot`, every remaining id is benched in input order. The last slot
/// keeps exactly one occupant and nothing is ever dropped.
#[must_use]
pub fn plan_bays(ordered: &[String], start_slot: usize, last_slot: usize) -> BayPlan {
    let mut plan = BayPlan::default();
    let mut slot = start_slot;
    for (index, unit_id) in ordered.iter().enumerate() {
        plan.assignments.push(BayAssignment {
            slot,
            unit_id: unit_id.clone(),
        });
        if slot == last_slot {
            plan.benched.extend(ordered[index + 1..].iter().cloned());
            break;
        }
        slot += 1;
    }
    plan
}

/// Build the bay queue: heaviest classes first, each quota filled by the
/// sampler before moving on, so heavy classes claim visible slots before
/// lighter ones spill to the bench.
#[must_use]
pub fn plan_unit_order<R: Rng + ?Sized>(cfg: &StartConfig, rng: &mut R) -> Vec<String> {
    let mut ordered = Vec::with_capacity(cfg.total_unit_quota());
    ordered.extend(sample_pool(&cfg.assault_pool, cfg.number_assault, rng));
    ordered.extend(sample_pool(&cfg.heavy_pool, cfg.number_heavy, rng));
    ordered.extend(sample_pool(&cfg.medium_pool, cfg.number_medium, rng));
    ordered.extend(sample_pool(&cfg.light_pool, cfg.number_light, rng));
    ordered
}
