//! Self-contained demo host so the harness needs no external game data.

use mercstart_engine::{CampaignData, CampaignOps, PilotDef, SkillSet, UnitInstance};
use std::collections::HashMap;
use std::convert::Infallible;

/// Ronin catalog baked into the harness: (id, base skill level).
const RONIN_CATALOG: &[(&str, i32)] = &[
    ("ronin-medusa", 7),
    ("ronin-glitch", 6),
    ("ronin-dekker", 4),
    ("ronin-behemoth", 5),
    ("ronin-gauge", 3),
    ("ronin-vandal", 5),
    ("ronin-sumire", 6),
    ("ronin-ozone", 2),
];

/// Unit catalog baked into the harness, keyed by definition id.
const UNIT_CATALOG: &[&str] = &[
    "ld-firefly",
    "ld-spider",
    "md-hunchback",
    "md-centurion",
    "hv-thunderbolt",
    "hv-grasshopper",
    "as-highlander",
    "as-atlas",
];

/// Number of bay slots the demo's fixed starting lance occupies.
const DEMO_LANCE_LEN: usize = 3;

/// In-memory host with a fixed catalog, a prefilled starting lance, and an
/// ancestral unit in slot 0.
pub struct DemoHost {
    pilot_defs: HashMap<String, PilotDef>,
    roster: Vec<PilotDef>,
    active: HashMap<usize, UnitInstance>,
    bench: Vec<UnitInstance>,
    counter: u32,
    generated: u32,
}

impl Default for DemoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoHost {
    #[must_use]
    pub fn new() -> Self {
        let pilot_defs = RONIN_CATALOG
            .iter()
            .map(|(id, level)| {
                let mut def = PilotDef::new(*id);
                def.base_skills = SkillSet::uniform(*level);
                def.spent_experience = 1000 * level;
                ((*id).to_string(), def)
            })
            .collect();

        let mut active = HashMap::new();
        active.insert(
            0,
            UnitInstance {
                def_id: "ancestral-blackjack".to_string(),
                instance_id: "ancestral-0".to_string(),
            },
        );
        for slot in 1..=DEMO_LANCE_LEN {
            active.insert(
                slot,
                UnitInstance {
                    def_id: format!("stock-{slot}"),
                    instance_id: format!("stock-inst-{slot}"),
                },
            );
        }

        Self {
            pilot_defs,
            roster: Vec::new(),
            active,
            bench: Vec::new(),
            counter: 0,
            generated: 0,
        }
    }

    #[must_use]
    pub fn roster(&self) -> &[PilotDef] {
        &self.roster
    }

    /// Active bays in slot order.
    #[must_use]
    pub fn active_bays(&self) -> Vec<(usize, &UnitInstance)> {
        let mut bays: Vec<_> = self.active.iter().map(|(slot, unit)| (*slot, unit)).collect();
        bays.sort_by_key(|(slot, _)| *slot);
        bays
    }

    #[must_use]
    pub fn bench(&self) -> &[UnitInstance] {
        &self.bench
    }
}

impl CampaignData for DemoHost {
    fn pilot_def(&self, id: &str) -> Option<PilotDef> {
        self.pilot_defs.get(id).cloned()
    }

    fn ronin_pool(&self) -> Vec<String> {
        RONIN_CATALOG.iter().map(|(id, _)| (*id).to_string()).collect()
    }

    fn has_unit_def(&self, id: &str) -> bool {
        UNIT_CATALOG.contains(&id)
    }

    fn starting_lance_len(&self) -> usize {
        DEMO_LANCE_LEN
    }
}

impl CampaignOps for DemoHost {
    type Error = Infallible;

    fn generate_pilots(
        &mut self,
        count: usize,
        difficulty: i32,
    ) -> Result<Vec<PilotDef>, Self::Error> {
        Ok((0..count)
            .map(|_| {
                self.generated += 1;
                let mut def = PilotDef::new(format!("proc-{}", self.generated));
                def.base_skills = SkillSet::uniform(difficulty.max(1));
                def.unspent_experience = 50 * difficulty.max(1);
                def
            })
            .collect())
    }

    fn next_instance_id(&mut self) -> String {
        self.counter += 1;
        format!("unit-{:04}", self.counter)
    }

    fn clear_roster(&mut self) {
        self.roster.clear();
    }

    fn add_pilot(&mut self, pilot: PilotDef) {
        self.roster.push(pilot);
    }

    fn remove_active_unit(&mut self, slot: usize) {
        self.active.remove(&slot);
    }

    fn place_unit(&mut self, slot: usize, unit: UnitInstance) {
        self.active.insert(slot, unit);
    }

    fn bench_unit(&mut self, unit: UnitInstance) {
        self.bench.push(unit);
    }
}

/// Settings that exercise the demo catalog end to end.
#[must_use]
pub fn demo_config() -> mercstart_engine::StartConfig {
    mercstart_engine::StartConfig {
        light_pool: vec!["ld-firefly".to_string(), "ld-spider".to_string()],
        medium_pool: vec!["md-hunchback".to_string(), "md-centurion".to_string()],
        heavy_pool: vec!["hv-thunderbolt".to_string(), "hv-grasshopper".to_string()],
        assault_pool: vec!["as-highlander".to_string(), "as-atlas".to_string()],
        number_light: 2,
        number_medium: 2,
        number_heavy: 1,
        number_assault: 1,
        starting_ronin: vec!["ronin-medusa".to_string()],
        blacklisted_ronin: vec!["ronin-ozone".to_string()],
        number_random_ronin: 3,
        number_procedural_pilots: 2,
        ..mercstart_engine::StartConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_resolves_every_demo_config_id() {
        let host = DemoHost::new();
        let cfg = demo_config();
        for id in cfg
            .light_pool
            .iter()
            .chain(&cfg.medium_pool)
            .chain(&cfg.heavy_pool)
            .chain(&cfg.assault_pool)
        {
            assert!(host.has_unit_def(id), "unknown unit {id}");
        }
        for id in cfg.starting_ronin.iter().chain(&cfg.blacklisted_ronin) {
            assert!(host.pilot_def(id).is_some(), "unknown pilot {id}");
        }
    }

    #[test]
    fn demo_host_starts_with_a_full_lance_and_ancestral() {
        let host = DemoHost::new();
        let bays = host.active_bays();
        assert_eq!(bays.len(), DEMO_LANCE_LEN + 1);
        assert_eq!(bays[0].1.def_id, "ancestral-blackjack");
    }

    #[test]
    fn instance_ids_are_sequential_and_unique() {
        let mut host = DemoHost::new();
        let first = host.next_instance_id();
        let second = host.next_instance_id();
        assert_ne!(first, second);
        assert_eq!(first, "unit-0001");
    }
}
