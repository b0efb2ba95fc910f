//! Single entry point for the host's first-time campaign initialization.
//!
//! The initializer turns pure plans (roster order, bay assignment) into host
//! mutations through the [`CampaignData`] / [`CampaignOps`] seam traits. It
//! runs exactly once per campaign and keeps no state beyond the settings and
//! the run's RNG.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bay::{UnitInstance, plan_bays, plan_unit_order};
use crate::config::StartConfig;
use crate::constants::{ANCESTRAL_SLOT, FIRST_RANDOM_SLOT, LAST_BAY_SLOT};
use crate::pilot::{PilotDef, transplant_stats};
use crate::roster::{RosterEntry, plan_roster};
use crate::{CampaignData, CampaignOps};

/// Failures that abort an initialization run.
///
/// Lookup misses are deliberately absent: unknown pilot or unit ids are
/// skipped, logged, and recorded in the report instead.
#[derive(Debug, Error)]
pub enum InitError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// The host's procedural pilot generator failed outright.
    #[error("pilot generation failed: {0}")]
    PilotGeneration(#[source] E),
}

/// Summary of everything one initialization run changed on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InitReport {
    pub guaranteed_pilots: usize,
    pub random_ronin: usize,
    pub procedural_pilots: usize,
    pub rerolled_pilots: usize,
    /// Guaranteed or drawn ids whose definition lookup missed.
    pub skipped_pilot_ids: Vec<String>,
    pub units_placed: usize,
    pub units_benched: usize,
    /// Drawn unit ids without a matching definition.
    pub skipped_unit_ids: Vec<String>,
}

impl InitReport {
    #[must_use]
    pub const fn pilots_added(&self) -> usize {
        self.guaranteed_pilots + self.random_ronin + self.procedural_pilots
    }
}

/// Runs once per campaign: wires settings into the roster and bay plans and
/// writes the results back through the host traits.
#[derive(Debug)]
pub struct CampaignInitializer {
    cfg: StartConfig,
    rng: SmallRng,
}

impl CampaignInitializer {
    /// One RNG instance is seeded here and reused for every draw in the run,
    /// so per-draw reseeding can never correlate the streams.
    #[must_use]
    pub fn new(cfg: StartConfig, seed: u64) -> Self {
        Self {
            cfg,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StartConfig {
        &self.cfg
    }

    /// Replace the host's starting roster and active units.
    ///
    /// The pilot phase only runs when the total pilot quota is positive, and
    /// the unit phase only when the total unit quota is; an all-zero
    /// configuration leaves the host untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::PilotGeneration`] when the host's procedural
    /// generator fails. All other irregularities (lookup misses, empty
    /// pools) are absorbed and reported.
    pub fn run<H>(&mut self, host: &mut H) -> Result<InitReport, InitError<H::Error>>
    where
        H: CampaignData + CampaignOps,
    {
        let mut report = InitReport::default();
        if self.cfg.total_pilot_quota() > 0 {
            self.populate_roster(host, &mut report)?;
        }
        if self.cfg.total_unit_quota() > 0 {
            self.populate_bays(host, &mut report);
        }
        info!(
            "campaign start randomized: {} pilots ({} rerolled), {} units placed, {} benched",
            report.pilots_added(),
            report.rerolled_pilots,
            report.units_placed,
            report.units_benched
        );
        Ok(report)
    }

    fn populate_roster<H>(
        &mut self,
        host: &mut H,
        report: &mut InitReport,
    ) -> Result<(), InitError<H::Error>>
    where
        H: CampaignData + CampaignOps,
    {
        for id in &self.cfg.starting_ronin {
            if self.cfg.blacklisted_ronin.contains(id) {
                warn!("guaranteed ronin {id} is also blacklisted; the guarantee wins");
            }
        }

        let ronin_pool = host.ronin_pool();
        let plan = plan_roster(&self.cfg, &ronin_pool, &mut self.rng);
        debug!(
            "roster plan: {} entries from a pool of {}",
            plan.len(),
            ronin_pool.len()
        );

        let procedural_quota = plan.procedural_count();
        let generated = if procedural_quota > 0 {
            host.generate_pilots(procedural_quota, self.cfg.pilot_difficulty)
                .map_err(InitError::PilotGeneration)?
        } else {
            Vec::new()
        };
        if generated.len() < procedural_quota {
            warn!(
                "procedural generator returned {} of {procedural_quota} requested pilots",
                generated.len()
            );
        }
        let mut generated = generated.into_iter();

        host.clear_roster();
        for entry in &plan.entries {
            let mut pilot = match entry {
                RosterEntry::Guaranteed { id, .. } | RosterEntry::RandomRonin { id, .. } => {
                    match host.pilot_def(id) {
                        Some(def) => def,
                        None => {
                            warn!("unknown pilot id {id}; skipping");
                            report.skipped_pilot_ids.push(id.clone());
                            continue;
                        }
                    }
                }
                RosterEntry::Procedural => match generated.next() {
                    Some(def) => def,
                    None => continue,
                },
            };

            if entry.wants_reroll() {
                self.reroll_pilot(host, &mut pilot, report)?;
            }

            match entry {
                RosterEntry::Guaranteed { .. } => report.guaranteed_pilots += 1,
                RosterEntry::RandomRonin { .. } => report.random_ronin += 1,
                RosterEntry::Procedural => report.procedural_pilots += 1,
            }
            host.add_pilot(pilot);
        }
        Ok(())
    }

    /// Generate a single donor and transplant its stats onto `pilot`. The
    /// donor is discarded afterwards; only its stat block survives.
    fn reroll_pilot<H>(
        &mut self,
        host: &mut H,
        pilot: &mut PilotDef,
        report: &mut InitReport,
    ) -> Result<(), InitError<H::Error>>
    where
        H: CampaignData + CampaignOps,
    {
        let mut donors = host
            .generate_pilots(1, self.cfg.pilot_difficulty)
            .map_err(InitError::PilotGeneration)?;
        match donors.pop() {
            Some(donor) => {
                transplant_stats(pilot, &donor);
                report.rerolled_pilots += 1;
            }
            None => {
                warn!("no donor generated for {}; keeping original stats", pilot.id);
            }
        }
        Ok(())
    }

    fn populate_bays<H>(&mut self, host: &mut H, report: &mut InitReport)
    where
        H: CampaignData + CampaignOps,
    {
        // Slot 0 belongs to the ancestral unit; the starting lance occupies
        // 1..=len and always gets cleared before allocation.
        for slot in 1..=host.starting_lance_len() {
            host.remove_active_unit(slot);
        }
        let start_slot = if self.cfg.remove_ancestral_unit {
            host.remove_active_unit(ANCESTRAL_SLOT);
            ANCESTRAL_SLOT
        } else {
            FIRST_RANDOM_SLOT
        };

        let mut ordered = plan_unit_order(&self.cfg, &mut self.rng);
        ordered.retain(|id| {
            if host.has_unit_def(id) {
                true
            } else {
                warn!("unknown unit id {id}; skipping");
                report.skipped_unit_ids.push(id.clone());
                false
            }
        });

        let plan = plan_bays(&ordered, start_slot, LAST_BAY_SLOT);
        for assignment in &plan.assignments {
            let unit = UnitInstance {
                def_id: assignment.unit_id.clone(),
                instance_id: host.next_instance_id(),
            };
            host.place_unit(assignment.slot, unit);
            report.units_placed += 1;
        }
        for def_id in &plan.benched {
            let unit = UnitInstance {
                def_id: def_id.clone(),
                instance_id: host.next_instance_id(),
            };
            host.bench_unit(unit);
            report.units_benched += 1;
        }
    }
}
