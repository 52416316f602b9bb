use crate::data::normalize_id;
use crate::data::types::{Element, StatKind, StatusCondition, Weather};
use phf::phf_map;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveCategory {
    Physical,
    Magical,
    Support,
}

/// Fixed or max-HP-relative quantity used by heal and revive effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Amount {
    Fixed(u16),
    FractionOfMax(f32),
}

/// Declarative secondary consequence of a move or item, matched
/// exhaustively by the effect executor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    Status {
        condition: StatusCondition,
        turns: Option<u8>,
    },
    StatChange {
        stat: StatKind,
        delta: i8,
        on_user: bool,
    },
    Heal {
        amount: Amount,
    },
    Revive {
        amount: Amount,
    },
    TamingBonus {
        multiplier: f32,
    },
    Escape,
    Recoil {
        numerator: u8,
        denominator: u8,
    },
    Drain {
        numerator: u8,
        denominator: u8,
    },
    Weather {
        kind: Weather,
        turns: u8,
    },
    Flinch,
    Protect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSpec {
    pub kind: EffectKind,
    /// Trigger chance in [0, 1]; the roll must land below it.
    pub chance: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct MoveData {
    pub name: &'static str,
    pub element: Element,
    pub category: MoveCategory,
    pub power: u16,
    /// Hit chance in [0, 1]; `None` never misses.
    pub accuracy: Option<f32>,
    pub priority: i8,
    pub pp: u8,
    pub effects: &'static [EffectSpec],
}

/// Last-resort attack used when a combatant has no usable move left.
/// Never consumes uses and never misses.
pub static FALLBACK_MOVE: MoveData = MoveData {
    name: "Flail",
    element: Element::Normal,
    category: MoveCategory::Physical,
    power: 30,
    accuracy: None,
    priority: 0,
    pp: 0,
    effects: &[],
};

pub static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    "scratch" => MoveData {
        name: "Scratch",
        element: Element::Normal,
        category: MoveCategory::Physical,
        power: 35,
        accuracy: Some(0.95),
        priority: 0,
        pp: 35,
        effects: &[],
    },
    "ember" => MoveData {
        name: "Ember",
        element: Element::Fire,
        category: MoveCategory::Magical,
        power: 40,
        accuracy: Some(1.0),
        priority: 0,
        pp: 25,
        effects: &[EffectSpec {
            kind: EffectKind::Status { condition: StatusCondition::Burn, turns: None },
            chance: 0.1,
        }],
    },
    "waterjet" => MoveData {
        name: "Water Jet",
        element: Element::Water,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: Some(1.0),
        priority: 1,
        pp: 20,
        effects: &[],
    },
    "vinelash" => MoveData {
        name: "Vine Lash",
        element: Element::Grass,
        category: MoveCategory::Physical,
        power: 45,
        accuracy: Some(0.9),
        priority: 0,
        pp: 25,
        effects: &[],
    },
    "spark" => MoveData {
        name: "Spark",
        element: Element::Electric,
        category: MoveCategory::Magical,
        power: 40,
        accuracy: Some(1.0),
        priority: 0,
        pp: 30,
        effects: &[EffectSpec {
            kind: EffectKind::Status { condition: StatusCondition::Paralysis, turns: None },
            chance: 0.1,
        }],
    },
    "frostbreath" => MoveData {
        name: "Frost Breath",
        element: Element::Ice,
        category: MoveCategory::Magical,
        power: 40,
        accuracy: Some(0.9),
        priority: 0,
        pp: 25,
        effects: &[EffectSpec {
            kind: EffectKind::Status { condition: StatusCondition::Freeze, turns: None },
            chance: 0.1,
        }],
    },
    "galecut" => MoveData {
        name: "Gale Cut",
        element: Element::Wind,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: Some(0.95),
        priority: 0,
        pp: 30,
        effects: &[EffectSpec { kind: EffectKind::Flinch, chance: 0.1 }],
    },
    "rocktoss" => MoveData {
        name: "Rock Toss",
        element: Element::Earth,
        category: MoveCategory::Physical,
        power: 50,
        accuracy: Some(0.9),
        priority: 0,
        pp: 20,
        effects: &[],
    },
    "venomgnaw" => MoveData {
        name: "Venom Gnaw",
        element: Element::Shadow,
        category: MoveCategory::Physical,
        power: 45,
        accuracy: Some(1.0),
        priority: 0,
        pp: 25,
        effects: &[EffectSpec {
            kind: EffectKind::Status { condition: StatusCondition::Poison, turns: None },
            chance: 0.2,
        }],
    },
    "radiantbeam" => MoveData {
        name: "Radiant Beam",
        element: Element::Light,
        category: MoveCategory::Magical,
        power: 55,
        accuracy: Some(0.9),
        priority: 0,
        pp: 15,
        effects: &[],
    },
    "lullaby" => MoveData {
        name: "Lullaby",
        element: Element::Normal,
        category: MoveCategory::Support,
        power: 0,
        accuracy: Some(0.75),
        priority: 0,
        pp: 15,
        effects: &[EffectSpec {
            kind: EffectKind::Status { condition: StatusCondition::Sleep, turns: None },
            chance: 1.0,
        }],
    },
    "confuseglare" => MoveData {
        name: "Confuse Glare",
        element: Element::Shadow,
        category: MoveCategory::Support,
        power: 0,
        accuracy: Some(0.8),
        priority: 0,
        pp: 15,
        effects: &[EffectSpec {
            kind: EffectKind::Status { condition: StatusCondition::Confusion, turns: None },
            chance: 1.0,
        }],
    },
    "warcry" => MoveData {
        name: "War Cry",
        element: Element::Normal,
        category: MoveCategory::Support,
        power: 0,
        accuracy: None,
        priority: 0,
        pp: 30,
        effects: &[EffectSpec {
            kind: EffectKind::StatChange { stat: StatKind::Attack, delta: 1, on_user: true },
            chance: 1.0,
        }],
    },
    "screech" => MoveData {
        name: "Screech",
        element: Element::Normal,
        category: MoveCategory::Support,
        power: 0,
        accuracy: Some(0.85),
        priority: 0,
        pp: 30,
        effects: &[EffectSpec {
            kind: EffectKind::StatChange { stat: StatKind::Defense, delta: -1, on_user: false },
            chance: 1.0,
        }],
    },
    "guardstance" => MoveData {
        name: "Guard Stance",
        element: Element::Normal,
        category: MoveCategory::Support,
        power: 0,
        accuracy: None,
        priority: 4,
        pp: 10,
        effects: &[EffectSpec { kind: EffectKind::Protect, chance: 1.0 }],
    },
    "drainbite" => MoveData {
        name: "Drain Bite",
        element: Element::Grass,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: Some(1.0),
        priority: 0,
        pp: 20,
        effects: &[EffectSpec {
            kind: EffectKind::Drain { numerator: 1, denominator: 2 },
            chance: 1.0,
        }],
    },
    "recklesstackle" => MoveData {
        name: "Reckless Tackle",
        element: Element::Normal,
        category: MoveCategory::Physical,
        power: 70,
        accuracy: Some(0.9),
        priority: 0,
        pp: 15,
        effects: &[EffectSpec {
            kind: EffectKind::Recoil { numerator: 1, denominator: 4 },
            chance: 1.0,
        }],
    },
    "sundance" => MoveData {
        name: "Sun Dance",
        element: Element::Fire,
        category: MoveCategory::Support,
        power: 0,
        accuracy: None,
        priority: 0,
        pp: 10,
        effects: &[EffectSpec {
            kind: EffectKind::Weather { kind: Weather::Sunny, turns: 5 },
            chance: 1.0,
        }],
    },
    "raincall" => MoveData {
        name: "Rain Call",
        element: Element::Water,
        category: MoveCategory::Support,
        power: 0,
        accuracy: None,
        priority: 0,
        pp: 10,
        effects: &[EffectSpec {
            kind: EffectKind::Weather { kind: Weather::Rainy, turns: 5 },
            chance: 1.0,
        }],
    },
};

pub fn get_move(id: &str) -> Option<&'static MoveData> {
    MOVES.get(normalize_id(id).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_lookup_ignores_casing_and_spacing() {
        for id in ["waterjet", "Water Jet", "WATERJET"] {
            let data = get_move(id).expect("move exists");
            assert_eq!(data.priority, 1);
        }
    }

    #[test]
    fn support_moves_carry_no_power() {
        for (_, data) in MOVES.entries() {
            if data.category == MoveCategory::Support {
                assert_eq!(data.power, 0, "{} should not deal direct damage", data.name);
            }
        }
    }

    #[test]
    fn effect_chances_are_fractions() {
        for (_, data) in MOVES.entries() {
            for effect in data.effects {
                assert!((0.0..=1.0).contains(&effect.chance));
            }
        }
    }
}
