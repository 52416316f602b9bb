use crate::data::normalize_id;
use crate::data::types::Element;
use phf::phf_map;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub magic: u16,
    pub resistance: u16,
    pub speed: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct SpeciesData {
    pub name: &'static str,
    pub base: BaseStats,
    /// Mono-element species duplicate their element.
    pub elements: [Element; 2],
    /// Per-species scaling of the capture formula.
    pub catch_modifier: f32,
}

pub static SPECIES: phf::Map<&'static str, SpeciesData> = phf_map! {
    "embercub" => SpeciesData {
        name: "Embercub",
        base: BaseStats { hp: 55, attack: 62, defense: 45, magic: 58, resistance: 48, speed: 64 },
        elements: [Element::Fire, Element::Fire],
        catch_modifier: 1.0,
    },
    "tidepup" => SpeciesData {
        name: "Tidepup",
        base: BaseStats { hp: 58, attack: 56, defense: 52, magic: 55, resistance: 54, speed: 58 },
        elements: [Element::Water, Element::Water],
        catch_modifier: 1.0,
    },
    "thornling" => SpeciesData {
        name: "Thornling",
        base: BaseStats { hp: 60, attack: 58, defense: 55, magic: 52, resistance: 55, speed: 48 },
        elements: [Element::Grass, Element::Grass],
        catch_modifier: 1.1,
    },
    "voltkit" => SpeciesData {
        name: "Voltkit",
        base: BaseStats { hp: 45, attack: 50, defense: 38, magic: 62, resistance: 44, speed: 85 },
        elements: [Element::Electric, Element::Electric],
        catch_modifier: 1.2,
    },
    "frostfang" => SpeciesData {
        name: "Frostfang",
        base: BaseStats { hp: 58, attack: 66, defense: 50, magic: 54, resistance: 50, speed: 70 },
        elements: [Element::Ice, Element::Wind],
        catch_modifier: 0.9,
    },
    "gustwing" => SpeciesData {
        name: "Gustwing",
        base: BaseStats { hp: 50, attack: 55, defense: 42, magic: 48, resistance: 46, speed: 80 },
        elements: [Element::Wind, Element::Wind],
        catch_modifier: 1.3,
    },
    "boulderhide" => SpeciesData {
        name: "Boulderhide",
        base: BaseStats { hp: 75, attack: 70, defense: 85, magic: 35, resistance: 60, speed: 28 },
        elements: [Element::Earth, Element::Earth],
        catch_modifier: 0.8,
    },
    "gloomrat" => SpeciesData {
        name: "Gloomrat",
        base: BaseStats { hp: 48, attack: 60, defense: 44, magic: 50, resistance: 42, speed: 72 },
        elements: [Element::Shadow, Element::Shadow],
        catch_modifier: 1.2,
    },
    "sunmoth" => SpeciesData {
        name: "Sunmoth",
        base: BaseStats { hp: 52, attack: 42, defense: 44, magic: 68, resistance: 58, speed: 66 },
        elements: [Element::Light, Element::Wind],
        catch_modifier: 1.0,
    },
    "plainstrider" => SpeciesData {
        name: "Plainstrider",
        base: BaseStats { hp: 65, attack: 55, defense: 50, magic: 40, resistance: 48, speed: 55 },
        elements: [Element::Normal, Element::Normal],
        catch_modifier: 1.5,
    },
};

pub fn get_species(id: &str) -> Option<&'static SpeciesData> {
    SPECIES.get(normalize_id(id).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_lookup_is_case_insensitive() {
        for id in ["Embercub", "embercub", "EMBERCUB"] {
            let data = get_species(id).expect("species exists");
            assert_eq!(data.elements[0], Element::Fire);
        }
    }

    #[test]
    fn catch_modifiers_are_positive() {
        for (_, data) in SPECIES.entries() {
            assert!(data.catch_modifier > 0.0);
        }
    }
}
