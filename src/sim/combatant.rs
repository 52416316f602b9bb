use crate::data::species::get_species;
use crate::data::types::{is_status_immune, Element, StatusCondition};
use crate::sim::stats::{StatSet, STAGE_ATK, STAGE_DEF, STAGE_MAG, STAGE_RES, STAGE_SPE};
use anyhow::{anyhow, Result};
use rand::Rng;

/// One known move with its remaining and maximum uses.
#[derive(Clone, Debug)]
pub struct MoveSlot {
    pub id: &'static str,
    pub pp: u8,
    pub max_pp: u8,
}

/// One creature instance participating in a battle.
///
/// Constructed from a species record when the session starts, mutated
/// turn by turn, and handed back in the battle summary afterward.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub species: &'static str,
    pub name: String,
    pub level: u8,
    pub stats: StatSet,
    pub current_hp: u16,
    pub elements: [Element; 2],
    pub catch_modifier: f32,
    pub status: Option<StatusCondition>,
    /// Remaining turns for the status; `None` means until cured.
    pub status_turns: Option<u8>,
    pub stat_stages: [i8; 5],
    pub accuracy_stage: i8,
    pub evasion_stage: i8,
    pub flinched: bool,
    pub protected: bool,
    pub acted: bool,
    /// Set by a failed capture attempt. Bookkeeping only.
    pub irritated: bool,
    pub captured: bool,
    pub moves: Vec<MoveSlot>,
}

impl Combatant {
    pub fn from_species(species_id: &str, level: u8, move_ids: &[&str]) -> Result<Self> {
        let data = get_species(species_id)
            .ok_or_else(|| anyhow!("species '{}' not found in content database", species_id))?;
        let stats = StatSet::from_base(&data.base, level);
        let moves = move_ids
            .iter()
            .map(|id| {
                let move_data = crate::data::moves::get_move(id)
                    .ok_or_else(|| anyhow!("move '{}' not found in content database", id))?;
                Ok(MoveSlot {
                    id: move_data.name,
                    pp: move_data.pp,
                    max_pp: move_data.pp,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            species: data.name,
            name: data.name.to_string(),
            level,
            current_hp: stats.hp,
            stats,
            elements: data.elements,
            catch_modifier: data.catch_modifier,
            status: None,
            status_turns: None,
            stat_stages: [0; 5],
            accuracy_stage: 0,
            evasion_stage: 0,
            flinched: false,
            protected: false,
            acted: false,
            irritated: false,
            captured: false,
            moves,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn hp_fraction(&self) -> f32 {
        self.current_hp as f32 / self.max_hp().max(1) as f32
    }

    pub fn take_damage(&mut self, damage: u32) {
        let damage = damage.min(u16::MAX as u32) as u16;
        self.current_hp = self.current_hp.saturating_sub(damage);
    }

    /// Restores HP up to the maximum and returns the amount actually healed.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp());
        self.current_hp - before
    }

    pub fn has_element(&self, element: Element) -> bool {
        self.elements[0] == element || self.elements[1] == element
    }

    /// Applies a status condition. Fails when one is already present or
    /// the combatant's elements grant immunity. Sleep and confusion roll
    /// their duration when none is supplied; other conditions persist.
    pub fn apply_status(
        &mut self,
        status: StatusCondition,
        turns: Option<u8>,
        rng: &mut impl Rng,
    ) -> bool {
        if self.status.is_some() {
            return false;
        }
        if is_status_immune(self.elements, status) {
            return false;
        }
        let turns = turns.or(match status {
            StatusCondition::Sleep => Some(rng.gen_range(1..=3)),
            StatusCondition::Confusion => Some(rng.gen_range(2..=5)),
            _ => None,
        });
        self.status = Some(status);
        self.status_turns = turns;
        true
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.status_turns = None;
    }

    /// Clamped stage change. Returns false when already at the bound.
    pub fn change_stage(&mut self, index: usize, delta: i8) -> bool {
        let current = self.stat_stages[index];
        let next = current.saturating_add(delta).clamp(-6, 6);
        if next == current {
            return false;
        }
        self.stat_stages[index] = next;
        true
    }

    pub fn change_accuracy_stage(&mut self, delta: i8) -> bool {
        let current = self.accuracy_stage;
        let next = current.saturating_add(delta).clamp(-6, 6);
        if next == current {
            return false;
        }
        self.accuracy_stage = next;
        true
    }

    pub fn change_evasion_stage(&mut self, delta: i8) -> bool {
        let current = self.evasion_stage;
        let next = current.saturating_add(delta).clamp(-6, 6);
        if next == current {
            return false;
        }
        self.evasion_stage = next;
        true
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves
            .iter()
            .any(|slot| slot.pp > 0 && crate::data::moves::get_move(slot.id).is_some())
    }

    /// Stage and per-turn flag reset applied when the combatant leaves
    /// the field.
    pub fn reset_on_switch(&mut self) {
        self.stat_stages = [0; 5];
        self.accuracy_stage = 0;
        self.evasion_stage = 0;
        self.flinched = false;
        self.protected = false;
    }
}

pub(crate) fn stage_index(stat: crate::data::types::StatKind) -> Option<usize> {
    use crate::data::types::StatKind;
    match stat {
        StatKind::Attack => Some(STAGE_ATK),
        StatKind::Defense => Some(STAGE_DEF),
        StatKind::Magic => Some(STAGE_MAG),
        StatKind::Resistance => Some(STAGE_RES),
        StatKind::Speed => Some(STAGE_SPE),
        StatKind::Accuracy | StatKind::Evasion => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn make(species: &str) -> Combatant {
        Combatant::from_species(species, 20, &["scratch"]).expect("species exists")
    }

    #[test]
    fn unknown_species_is_an_error() {
        assert!(Combatant::from_species("notamonster", 10, &[]).is_err());
    }

    #[test]
    fn unknown_move_is_an_error() {
        assert!(Combatant::from_species("embercub", 10, &["notamove"]).is_err());
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut c = make("embercub");
        c.take_damage(u32::from(c.max_hp()) * 10);
        assert_eq!(c.current_hp, 0);
        assert!(c.is_fainted());
    }

    #[test]
    fn heal_clamps_at_max_and_reports_actual_amount() {
        let mut c = make("tidepup");
        c.current_hp = c.max_hp() - 5;
        assert_eq!(c.heal(20), 5);
        assert_eq!(c.current_hp, c.max_hp());
        assert_eq!(c.heal(20), 0);
    }

    #[test]
    fn status_respects_element_immunity() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut fire = make("embercub");
        assert!(!fire.apply_status(StatusCondition::Burn, None, &mut rng));
        assert!(fire.status.is_none());
        assert!(fire.apply_status(StatusCondition::Poison, None, &mut rng));
    }

    #[test]
    fn second_status_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut c = make("tidepup");
        assert!(c.apply_status(StatusCondition::Burn, None, &mut rng));
        assert!(!c.apply_status(StatusCondition::Sleep, None, &mut rng));
        assert_eq!(c.status, Some(StatusCondition::Burn));
    }

    #[test]
    fn sleep_rolls_a_bounded_duration() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut c = make("tidepup");
        assert!(c.apply_status(StatusCondition::Sleep, None, &mut rng));
        let turns = c.status_turns.expect("sleep carries a duration");
        assert!((1..=3).contains(&turns));
    }

    #[test]
    fn stage_changes_clamp_at_bounds() {
        let mut c = make("tidepup");
        for _ in 0..6 {
            assert!(c.change_stage(0, 1));
        }
        assert!(!c.change_stage(0, 1));
        assert_eq!(c.stat_stages[0], 6);
        assert!(c.change_stage(0, -12));
        assert_eq!(c.stat_stages[0], -6);
        assert!(!c.change_stage(0, -1));
    }
}
