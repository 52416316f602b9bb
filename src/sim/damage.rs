use crate::data::moves::{MoveCategory, MoveData};
use crate::data::types::{effectiveness_dual, Element, Weather};
use crate::sim::combatant::Combatant;
use crate::sim::session::BattleContext;
use crate::sim::stats::{accuracy_multiplier, modified_stat};
use crate::data::types::StatKind;
use rand::Rng;

pub const SAME_ELEMENT_BONUS: f32 = 1.2;
pub const CRIT_RATE: f64 = 1.0 / 16.0;
pub const CRIT_MULTIPLIER: f32 = 1.5;
pub const VARIANCE_MIN: f32 = 0.85;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageResult {
    pub amount: u32,
    pub critical: bool,
    pub effectiveness: f32,
    pub hit: bool,
}

/// Deterministic damage core. Takes the rolled critical and variance
/// values so the arithmetic can be verified without an RNG.
///
/// Order: power scaled by the attack/defense ratio, same-element bonus,
/// element effectiveness, critical, variance, remaining modifiers, then
/// rounded with a floor of 1 for any move that has power and hit.
pub fn calculate_damage(
    power: u16,
    attack: u16,
    defense: u16,
    same_element: bool,
    effectiveness: f32,
    critical: bool,
    variance: f32,
    other_modifiers: f32,
) -> u32 {
    if power == 0 {
        return 0;
    }
    let mut damage = power as f32 * attack as f32 / defense.max(1) as f32;
    if same_element {
        damage *= SAME_ELEMENT_BONUS;
    }
    damage *= effectiveness;
    if critical {
        damage *= CRIT_MULTIPLIER;
    }
    damage *= variance.clamp(VARIANCE_MIN, 1.0);
    damage *= other_modifiers;
    (damage.round() as u32).max(1)
}

/// Accuracy check: `accuracy * attacker_factor / defender_factor`,
/// clamped to [0, 1]. `None` accuracy never misses.
pub fn passes_accuracy(
    accuracy: Option<f32>,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut impl Rng,
) -> bool {
    match accuracy {
        None => true,
        Some(acc) => {
            let final_acc = (acc * accuracy_multiplier(attacker.accuracy_stage)
                / accuracy_multiplier(defender.evasion_stage))
            .clamp(0.0, 1.0);
            rng.gen_range(0.0..1.0) < final_acc
        }
    }
}

pub fn weather_modifier(weather: Option<Weather>, element: Element) -> f32 {
    match (weather, element) {
        (Some(Weather::Sunny), Element::Fire) => 1.5,
        (Some(Weather::Sunny), Element::Water) => 0.5,
        (Some(Weather::Rainy), Element::Water) => 1.5,
        (Some(Weather::Rainy), Element::Fire) => 0.5,
        _ => 1.0,
    }
}

/// Full damage computation for one move use. Draws the accuracy,
/// critical and variance rolls from the session RNG; has no other side
/// effects, so a fixed seed reproduces identical output.
pub fn compute(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    ctx: &mut BattleContext,
) -> DamageResult {
    let effectiveness =
        effectiveness_dual(move_data.element, defender.elements[0], defender.elements[1]);
    if !passes_accuracy(move_data.accuracy, attacker, defender, &mut ctx.rng) {
        return DamageResult {
            amount: 0,
            critical: false,
            effectiveness,
            hit: false,
        };
    }
    if move_data.power == 0 {
        return DamageResult {
            amount: 0,
            critical: false,
            effectiveness,
            hit: true,
        };
    }
    let (attack, defense) = match move_data.category {
        MoveCategory::Physical => (
            modified_stat(attacker, StatKind::Attack),
            modified_stat(defender, StatKind::Defense),
        ),
        MoveCategory::Magical => (
            modified_stat(attacker, StatKind::Magic),
            modified_stat(defender, StatKind::Resistance),
        ),
        MoveCategory::Support => (0, 1),
    };
    let same_element = attacker.has_element(move_data.element);
    let critical = ctx.rng.gen_bool(CRIT_RATE);
    let variance = ctx.rng.gen_range(VARIANCE_MIN..=1.0);
    let amount = calculate_damage(
        move_data.power,
        attack,
        defense,
        same_element,
        effectiveness,
        critical,
        variance,
        weather_modifier(ctx.weather, move_data.element),
    );
    DamageResult {
        amount,
        critical,
        effectiveness,
        hit: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_element_resisted_hit_matches_step_by_step_arithmetic() {
        // 40 power, attack 20 vs defense 20, same element, 0.5x resist,
        // no critical, variance pinned to 1.0.
        let damage = calculate_damage(40, 20, 20, true, 0.5, false, 1.0, 1.0);
        let expected = (40.0_f32 * 20.0 / 20.0 * 1.2 * 0.5).round() as u32;
        assert_eq!(damage, expected);
        assert_eq!(damage, 24);
    }

    #[test]
    fn same_element_bonus_raises_damage() {
        let base = calculate_damage(40, 30, 20, false, 1.0, false, 1.0, 1.0);
        let bonus = calculate_damage(40, 30, 20, true, 1.0, false, 1.0, 1.0);
        assert!(bonus > base);
    }

    #[test]
    fn weak_hit_doubles_neutral_damage() {
        let neutral = calculate_damage(40, 30, 20, false, 1.0, false, 1.0, 1.0);
        let weak = calculate_damage(40, 30, 20, false, 2.0, false, 1.0, 1.0);
        assert_eq!(weak, neutral * 2);
    }

    #[test]
    fn critical_multiplies_by_one_point_five() {
        let base = calculate_damage(50, 40, 25, false, 1.0, false, 1.0, 1.0);
        let crit = calculate_damage(50, 40, 25, false, 1.0, true, 1.0, 1.0);
        assert_eq!(crit, (base as f32 * 1.5).round() as u32);
    }

    #[test]
    fn damage_floors_at_one_for_powered_moves() {
        assert_eq!(calculate_damage(10, 1, 400, false, 0.5, false, 0.85, 1.0), 1);
        assert_eq!(calculate_damage(0, 50, 10, false, 1.0, false, 1.0, 1.0), 0);
    }

    #[test]
    fn variance_is_clamped_to_its_band() {
        let low = calculate_damage(40, 30, 20, false, 1.0, false, 0.0, 1.0);
        let pinned = calculate_damage(40, 30, 20, false, 1.0, false, 0.85, 1.0);
        assert_eq!(low, pinned);
    }

    #[test]
    fn sunny_weather_boosts_fire_and_dampens_water() {
        assert_eq!(weather_modifier(Some(Weather::Sunny), Element::Fire), 1.5);
        assert_eq!(weather_modifier(Some(Weather::Sunny), Element::Water), 0.5);
        assert_eq!(weather_modifier(None, Element::Fire), 1.0);
    }
}
