use crate::data::species::BaseStats;
use crate::data::types::{StatKind, StatusCondition};
use crate::sim::combatant::Combatant;
use once_cell::sync::Lazy;

pub(crate) const STAGE_ATK: usize = 0;
pub(crate) const STAGE_DEF: usize = 1;
pub(crate) const STAGE_MAG: usize = 2;
pub(crate) const STAGE_RES: usize = 3;
pub(crate) const STAGE_SPE: usize = 4;

pub const STAGE_MIN: i8 = -6;
pub const STAGE_MAX: i8 = 6;

/// (2+s)/2 above zero, 2/(2-s) below, for s in [-6, 6].
static STAGE_MULTIPLIERS: Lazy<[f32; 13]> = Lazy::new(|| {
    std::array::from_fn(|i| {
        let stage = i as i32 - 6;
        if stage >= 0 {
            (2 + stage) as f32 / 2.0
        } else {
            2.0 / (2 - stage) as f32
        }
    })
});

/// Accuracy and evasion use a gentler 3-based curve.
static ACCURACY_MULTIPLIERS: Lazy<[f32; 13]> = Lazy::new(|| {
    std::array::from_fn(|i| {
        let stage = i as i32 - 6;
        if stage >= 0 {
            (3 + stage) as f32 / 3.0
        } else {
            3.0 / (3 - stage) as f32
        }
    })
});

pub fn stage_multiplier(stage: i8) -> f32 {
    STAGE_MULTIPLIERS[(stage.clamp(STAGE_MIN, STAGE_MAX) + 6) as usize]
}

pub fn accuracy_multiplier(stage: i8) -> f32 {
    ACCURACY_MULTIPLIERS[(stage.clamp(STAGE_MIN, STAGE_MAX) + 6) as usize]
}

pub fn apply_stage(base: u16, stage: i8) -> u16 {
    let value = (base as f32) * stage_multiplier(stage);
    value.floor().max(1.0) as u16
}

/// Derived stats for one combatant at a given level.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatSet {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub magic: u16,
    pub resistance: u16,
    pub speed: u16,
}

pub fn calc_hp(base: u16, level: u8) -> u16 {
    base * 2 * level as u16 / 100 + level as u16 + 10
}

pub fn calc_stat(base: u16, level: u8) -> u16 {
    base * 2 * level as u16 / 100 + 5
}

impl StatSet {
    pub fn from_base(base: &BaseStats, level: u8) -> Self {
        Self {
            hp: calc_hp(base.hp, level),
            attack: calc_stat(base.attack, level),
            defense: calc_stat(base.defense, level),
            magic: calc_stat(base.magic, level),
            resistance: calc_stat(base.resistance, level),
            speed: calc_stat(base.speed, level),
        }
    }
}

/// Stage-modified stat used by damage and order computation.
pub fn modified_stat(combatant: &Combatant, stat: StatKind) -> u16 {
    match stat {
        StatKind::Attack => apply_stage(combatant.stats.attack, combatant.stat_stages[STAGE_ATK]),
        StatKind::Defense => apply_stage(combatant.stats.defense, combatant.stat_stages[STAGE_DEF]),
        StatKind::Magic => apply_stage(combatant.stats.magic, combatant.stat_stages[STAGE_MAG]),
        StatKind::Resistance => {
            apply_stage(combatant.stats.resistance, combatant.stat_stages[STAGE_RES])
        }
        StatKind::Speed => apply_stage(combatant.stats.speed, combatant.stat_stages[STAGE_SPE]),
        // Accuracy and evasion have no flat stat; callers want the factor.
        StatKind::Accuracy | StatKind::Evasion => 1,
    }
}

/// Speed after stages, halved by paralysis.
pub fn effective_speed(combatant: &Combatant) -> u16 {
    let mut speed = apply_stage(combatant.stats.speed, combatant.stat_stages[STAGE_SPE]);
    if matches!(combatant.status, Some(StatusCondition::Paralysis)) {
        speed = ((speed as f32) * 0.5).floor().max(1.0) as u16;
    }
    speed
}
