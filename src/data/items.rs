use crate::data::normalize_id;
use crate::data::moves::{Amount, EffectKind, EffectSpec};
use phf::phf_map;

#[derive(Clone, Copy, Debug)]
pub struct ItemData {
    pub name: &'static str,
    /// Usable only in wild encounters (capture aids and the like).
    pub wild_only: bool,
    pub effects: &'static [EffectSpec],
}

pub static ITEMS: phf::Map<&'static str, ItemData> = phf_map! {
    "tonic" => ItemData {
        name: "Tonic",
        wild_only: false,
        effects: &[EffectSpec {
            kind: EffectKind::Heal { amount: Amount::Fixed(20) },
            chance: 1.0,
        }],
    },
    "strongtonic" => ItemData {
        name: "Strong Tonic",
        wild_only: false,
        effects: &[EffectSpec {
            kind: EffectKind::Heal { amount: Amount::FractionOfMax(0.5) },
            chance: 1.0,
        }],
    },
    "revivalleaf" => ItemData {
        name: "Revival Leaf",
        wild_only: false,
        effects: &[EffectSpec {
            kind: EffectKind::Revive { amount: Amount::FractionOfMax(0.5) },
            chance: 1.0,
        }],
    },
    "tamingtreat" => ItemData {
        name: "Taming Treat",
        wild_only: true,
        effects: &[EffectSpec {
            kind: EffectKind::TamingBonus { multiplier: 1.5 },
            chance: 1.0,
        }],
    },
    "smokepellet" => ItemData {
        name: "Smoke Pellet",
        wild_only: false,
        effects: &[EffectSpec { kind: EffectKind::Escape, chance: 1.0 }],
    },
};

pub fn get_item(id: &str) -> Option<&'static ItemData> {
    ITEMS.get(normalize_id(id).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_lookup_ignores_casing() {
        assert!(get_item("Taming Treat").is_some());
        assert!(get_item("tamingtreat").expect("item exists").wild_only);
    }
}
