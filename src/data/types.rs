use serde::Serialize;

/// Elemental affinity of species and moves.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Element {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Wind,
    Earth,
    Light,
    Shadow,
}

/// Attack-vs-defend multiplier. The chart only holds 0.5 / 1.0 / 2.0.
pub fn effectiveness(attack: Element, defend: Element) -> f32 {
    use Element::*;
    match (attack, defend) {
        (Fire, Grass) | (Fire, Ice) => 2.0,
        (Fire, Fire) | (Fire, Water) | (Fire, Earth) => 0.5,
        (Water, Fire) | (Water, Earth) => 2.0,
        (Water, Water) | (Water, Grass) => 0.5,
        (Grass, Water) | (Grass, Earth) => 2.0,
        (Grass, Fire) | (Grass, Grass) | (Grass, Wind) => 0.5,
        (Electric, Water) | (Electric, Wind) => 2.0,
        (Electric, Electric) | (Electric, Grass) | (Electric, Earth) => 0.5,
        (Ice, Grass) | (Ice, Wind) | (Ice, Earth) => 2.0,
        (Ice, Fire) | (Ice, Ice) | (Ice, Water) => 0.5,
        (Wind, Grass) => 2.0,
        (Wind, Electric) | (Wind, Earth) => 0.5,
        (Earth, Fire) | (Earth, Electric) => 2.0,
        (Earth, Grass) | (Earth, Water) | (Earth, Wind) => 0.5,
        (Light, Shadow) => 2.0,
        (Light, Light) => 0.5,
        (Shadow, Light) => 2.0,
        (Shadow, Shadow) => 0.5,
        _ => 1.0,
    }
}

/// Combined multiplier against a dual-element defender. Mono-element
/// combatants duplicate their element; the second copy must not stack.
pub fn effectiveness_dual(attack: Element, primary: Element, secondary: Element) -> f32 {
    let first = effectiveness(attack, primary);
    if primary == secondary {
        first
    } else {
        first * effectiveness(attack, secondary)
    }
}

/// The mutually exclusive status conditions a combatant can carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum StatusCondition {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Sleep,
    Confusion,
}

/// Element that shrugs off a status, if any.
pub fn status_immunity(status: StatusCondition) -> Option<Element> {
    match status {
        StatusCondition::Burn => Some(Element::Fire),
        StatusCondition::Freeze => Some(Element::Ice),
        StatusCondition::Paralysis => Some(Element::Electric),
        StatusCondition::Poison => Some(Element::Shadow),
        StatusCondition::Sleep | StatusCondition::Confusion => None,
    }
}

pub fn is_status_immune(elements: [Element; 2], status: StatusCondition) -> bool {
    match status_immunity(status) {
        Some(immune) => elements[0] == immune || elements[1] == immune,
        None => false,
    }
}

/// Session-level weather, set by move or item effects.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Weather {
    Sunny,
    Rainy,
}

/// Stats addressable by stage-changing effects.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum StatKind {
    Attack,
    Defense,
    Magic,
    Resistance,
    Speed,
    Accuracy,
    Evasion,
}
