use crate::data::types::StatusCondition;

pub const BASE_CAPTURE_RATE: f32 = 0.3;
pub const CAPTURE_CHANCE_CEILING: f32 = 0.95;
pub const FLEE_CHANCE_BASE: f32 = 0.3;
pub const FLEE_CHANCE_CEILING: f32 = 0.95;

/// Status conditions make a wild target easier to hold.
pub fn status_capture_bonus(status: Option<StatusCondition>) -> f32 {
    match status {
        Some(StatusCondition::Sleep) => 2.5,
        Some(StatusCondition::Freeze) => 2.3,
        Some(StatusCondition::Paralysis) => 1.8,
        Some(StatusCondition::Confusion) => 1.5,
        Some(StatusCondition::Burn) | Some(StatusCondition::Poison) => 1.3,
        None => 1.0,
    }
}

/// Capture chance for one attempt. A full-HP target can never be
/// caught; the chance is capped so capture is never guaranteed.
pub fn capture_chance(
    base_rate: f32,
    catch_modifier: f32,
    hp_fraction: f32,
    status: Option<StatusCondition>,
    item_bonus: f32,
) -> f32 {
    let chance = base_rate
        * catch_modifier
        * (1.0 - hp_fraction.clamp(0.0, 1.0))
        * status_capture_bonus(status)
        * item_bonus;
    chance.clamp(0.0, CAPTURE_CHANCE_CEILING)
}

/// Flee chance from the actor's speed against the fastest opponent
/// still standing. Fleeing is always possible but never certain.
pub fn flee_chance(actor_speed: u16, fastest_opponent_speed: u16) -> f32 {
    let ratio = actor_speed as f32 / fastest_opponent_speed.max(1) as f32;
    (FLEE_CHANCE_BASE + 0.4 * ratio).min(FLEE_CHANCE_CEILING)
}
