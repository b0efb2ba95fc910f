//! Pilot identity records and the stat transplant operation.

use serde::{Deserialize, Serialize};

/// The four trainable skill tracks a pilot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Gunnery,
    Piloting,
    Guts,
    Tactics,
}

impl SkillKind {
    /// Canonical iteration order for per-skill operations.
    pub const ALL: [Self; 4] = [Self::Gunnery, Self::Piloting, Self::Guts, Self::Tactics];
}

/// One value per skill track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SkillSet {
    #[serde(default)]
    pub gunnery: i32,
    #[serde(default)]
    pub piloting: i32,
    #[serde(default)]
    pub guts: i32,
    #[serde(default)]
    pub tactics: i32,
}

impl SkillSet {
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self {
            gunnery: value,
            piloting: value,
            guts: value,
            tactics: value,
        }
    }

    #[must_use]
    pub const fn get(&self, kind: SkillKind) -> i32 {
        match kind {
            SkillKind::Gunnery => self.gunnery,
            SkillKind::Piloting => self.piloting,
            SkillKind::Guts => self.guts,
            SkillKind::Tactics => self.tactics,
        }
    }

    pub const fn add(&mut self, kind: SkillKind, delta: i32) {
        match kind {
            SkillKind::Gunnery => self.gunnery += delta,
            SkillKind::Piloting => self.piloting += delta,
            SkillKind::Guts => self.guts += delta,
            SkillKind::Tactics => self.tactics += delta,
        }
    }
}

/// A pilot definition as the host's data store describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotDef {
    pub id: String,
    #[serde(default)]
    pub base_skills: SkillSet,
    #[serde(default)]
    pub bonus_skills: SkillSet,
    #[serde(default)]
    pub spent_experience: i32,
    #[serde(default)]
    pub unspent_experience: i32,
    #[serde(default)]
    pub abilities: Vec<String>,
}

impl PilotDef {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base_skills: SkillSet::default(),
            bonus_skills: SkillSet::default(),
            spent_experience: 0,
            unspent_experience: 0,
            abilities: Vec::new(),
        }
    }
}

/// Mutation seam for pilot state held by the host.
///
/// Base and bonus skills are adjusted through additive deltas only. The
/// host's skill primitive accumulates modifiers, so an absolute setter would
/// clobber accumulated state the engine cannot see. Experience counters are
/// the exception: the host exposes direct setters for those.
pub trait PilotRecord {
    fn id(&self) -> &str;
    fn base_skill(&self, kind: SkillKind) -> i32;
    fn bonus_skill(&self, kind: SkillKind) -> i32;
    fn apply_base_skill_delta(&mut self, kind: SkillKind, delta: i32);
    fn apply_bonus_skill_delta(&mut self, kind: SkillKind, delta: i32);
    fn set_spent_experience(&mut self, value: i32);
    fn set_unspent_experience(&mut self, value: i32);
    /// Replace the ability id list wholesale.
    fn replace_abilities(&mut self, abilities: Vec<String>);
    /// Recompute any cached ability objects derived from the id list.
    fn refresh_abilities(&mut self) {}
}

impl PilotRecord for PilotDef {
    fn id(&self) -> &str {
        &self.id
    }

    fn base_skill(&self, kind: SkillKind) -> i32 {
        self.base_skills.get(kind)
    }

    fn bonus_skill(&self, kind: SkillKind) -> i32 {
        self.bonus_skills.get(kind)
    }

    fn apply_base_skill_delta(&mut self, kind: SkillKind, delta: i32) {
        self.base_skills.add(kind, delta);
    }

    fn apply_bonus_skill_delta(&mut self, kind: SkillKind, delta: i32) {
        self.bonus_skills.add(kind, delta);
    }

    fn set_spent_experience(&mut self, value: i32) {
        self.spent_experience = value;
    }

    fn set_unspent_experience(&mut self, value: i32) {
        self.unspent_experience = value;
    }

    fn replace_abilities(&mut self, abilities: Vec<String>) {
        self.abilities = abilities;
    }
}

/// Rewrite `target`'s skill, experience, and ability state from `donor`.
///
/// The target keeps its id; the donor is discarded by the caller afterwards.
/// Base skills move by the delta between donor and target, bonus skills are
/// zeroed and rebuilt from the donor, experience counters are overwritten,
/// and the ability list is replaced followed by a forced refresh. Applying
/// the same donor twice is a no-op the second time.
pub fn transplant_stats<P: PilotRecord + ?Sized>(target: &mut P, donor: &PilotDef) {
    for kind in SkillKind::ALL {
        let base_delta = donor.base_skills.get(kind) - target.base_skill(kind);
        target.apply_base_skill_delta(kind, base_delta);

        let current_bonus = target.bonus_skill(kind);
        target.apply_bonus_skill_delta(kind, -current_bonus);
        target.apply_bonus_skill_delta(kind, donor.bonus_skills.get(kind));
    }
    target.set_spent_experience(donor.spent_experience);
    target.set_unspent_experience(donor.unspent_experience);
    target.replace_abilities(donor.abilities.clone());
    target.refresh_abilities();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn veteran() -> PilotDef {
        PilotDef {
            id: "veteran".to_string(),
            base_skills: SkillSet {
                gunnery: 5,
                piloting: 4,
                guts: 3,
                tactics: 6,
            },
            bonus_skills: SkillSet {
                gunnery: 1,
                piloting: 0,
                guts: 2,
                tactics: 0,
            },
            spent_experience: 4200,
            unspent_experience: 150,
            abilities: vec!["multishot".to_string(), "bulwark".to_string()],
        }
    }

    fn rookie_donor() -> PilotDef {
        PilotDef {
            id: "donor".to_string(),
            base_skills: SkillSet::uniform(2),
            bonus_skills: SkillSet {
                gunnery: 0,
                piloting: 1,
                guts: 0,
                tactics: 0,
            },
            spent_experience: 800,
            unspent_experience: 40,
            abilities: vec!["evasion".to_string()],
        }
    }

    #[test]
    fn transplant_copies_donor_state() {
        let mut target = veteran();
        let donor = rookie_donor();
        transplant_stats(&mut target, &donor);

        assert_eq!(target.base_skills, donor.base_skills);
        assert_eq!(target.bonus_skills, donor.bonus_skills);
        assert_eq!(target.spent_experience, donor.spent_experience);
        assert_eq!(target.unspent_experience, donor.unspent_experience);
        assert_eq!(target.abilities, donor.abilities);
    }

    #[test]
    fn transplant_preserves_target_identity() {
        let mut target = veteran();
        transplant_stats(&mut target, &rookie_donor());
        assert_eq!(target.id, "veteran");
    }

    #[test]
    fn transplant_is_idempotent() {
        let mut once = veteran();
        let donor = rookie_donor();
        transplant_stats(&mut once, &donor);
        let mut twice = once.clone();
        transplant_stats(&mut twice, &donor);
        assert_eq!(once, twice);
    }

    #[test]
    fn transplant_onto_equal_state_changes_nothing() {
        let donor = rookie_donor();
        let mut target = donor.clone();
        target.id = "other".to_string();
        transplant_stats(&mut target, &donor);
        assert_eq!(target.base_skills, donor.base_skills);
        assert_eq!(target.id, "other");
    }

    #[test]
    fn bonus_skills_are_reset_before_rebuild() {
        let mut target = veteran();
        let mut donor = rookie_donor();
        donor.bonus_skills = SkillSet::default();
        transplant_stats(&mut target, &donor);
        assert_eq!(target.bonus_skills, SkillSet::default());
    }

    #[test]
    fn skill_deltas_accumulate_over_existing_values() {
        let mut target = PilotDef::new("fresh");
        target.apply_base_skill_delta(SkillKind::Guts, 3);
        target.apply_base_skill_delta(SkillKind::Guts, 2);
        assert_eq!(target.base_skill(SkillKind::Guts), 5);
        target.apply_base_skill_delta(SkillKind::Guts, -5);
        assert_eq!(target.base_skill(SkillKind::Guts), 0);
    }
}
