use crate::data::moves::{Amount, EffectKind, EffectSpec};
use crate::error::EffectError;
use crate::sim::combatant::{stage_index, Combatant};
use crate::sim::session::BattleContext;
use rand::Rng;

pub const MSG_NO_EFFECT: &str = "It had no effect!";
pub const MSG_CANT_ESCAPE: &str = "Can't escape!";

/// Outcome of applying one effect specification.
///
/// A failed chance roll yields `success: false` with no message (the
/// effect was silently skipped); an effect that ran but changed nothing
/// yields `success: false` with a message.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectResult {
    pub success: bool,
    pub message: Option<&'static str>,
    pub magnitude: Option<i32>,
}

impl EffectResult {
    fn skipped() -> Self {
        Self {
            success: false,
            message: None,
            magnitude: None,
        }
    }

    fn no_effect() -> Self {
        Self {
            success: false,
            message: Some(MSG_NO_EFFECT),
            magnitude: None,
        }
    }

    fn applied(magnitude: Option<i32>) -> Self {
        Self {
            success: true,
            message: None,
            magnitude,
        }
    }
}

/// Which combatant an effect lands on when it rides a move. Items pick
/// their own target through the command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EffectTarget {
    User,
    Foe,
    Field,
}

pub fn effect_target(kind: &EffectKind) -> EffectTarget {
    match kind {
        EffectKind::Status { .. } | EffectKind::Flinch => EffectTarget::Foe,
        EffectKind::StatChange { on_user, .. } => {
            if *on_user {
                EffectTarget::User
            } else {
                EffectTarget::Foe
            }
        }
        EffectKind::Heal { .. }
        | EffectKind::Revive { .. }
        | EffectKind::Recoil { .. }
        | EffectKind::Drain { .. }
        | EffectKind::Protect => EffectTarget::User,
        EffectKind::TamingBonus { .. } | EffectKind::Escape | EffectKind::Weather { .. } => {
            EffectTarget::Field
        }
    }
}

fn resolve_amount(amount: Amount, max_hp: u16) -> u16 {
    match amount {
        Amount::Fixed(value) => value,
        Amount::FractionOfMax(fraction) => ((max_hp as f32) * fraction).floor().max(1.0) as u16,
    }
}

/// Applies one effect specification to a target combatant.
///
/// The chance roll always draws from the session RNG; a failed roll
/// mutates nothing. `Revive` on a conscious target is the one
/// precondition surfaced as an error; the controller recovers it as a
/// no-op.
pub fn apply(
    spec: &EffectSpec,
    target: &mut Combatant,
    ctx: &mut BattleContext,
) -> Result<EffectResult, EffectError> {
    let roll: f32 = ctx.rng.gen_range(0.0..1.0);
    if roll >= spec.chance {
        return Ok(EffectResult::skipped());
    }
    if target.is_fainted() && !matches!(spec.kind, EffectKind::Revive { .. }) {
        return Ok(EffectResult::skipped());
    }

    match spec.kind {
        EffectKind::Status { condition, turns } => {
            if target.apply_status(condition, turns, &mut ctx.rng) {
                Ok(EffectResult::applied(None))
            } else {
                Ok(EffectResult::no_effect())
            }
        }
        EffectKind::StatChange { stat, delta, .. } => {
            let changed = match stage_index(stat) {
                Some(index) => target.change_stage(index, delta),
                None => match stat {
                    crate::data::types::StatKind::Accuracy => target.change_accuracy_stage(delta),
                    _ => target.change_evasion_stage(delta),
                },
            };
            if changed {
                Ok(EffectResult::applied(Some(delta as i32)))
            } else {
                Ok(EffectResult::no_effect())
            }
        }
        EffectKind::Heal { amount } => {
            let requested = resolve_amount(amount, target.max_hp());
            let healed = target.heal(requested);
            if healed == 0 {
                Ok(EffectResult::no_effect())
            } else {
                Ok(EffectResult::applied(Some(healed as i32)))
            }
        }
        EffectKind::Revive { amount } => {
            if !target.is_fainted() {
                return Err(EffectError::InvalidTarget);
            }
            let hp = resolve_amount(amount, target.max_hp()).clamp(1, target.max_hp());
            target.current_hp = hp;
            Ok(EffectResult::applied(Some(hp as i32)))
        }
        EffectKind::TamingBonus { multiplier } => {
            if !ctx.wild {
                return Ok(EffectResult::no_effect());
            }
            ctx.taming_bonus = multiplier;
            Ok(EffectResult::applied(None))
        }
        EffectKind::Escape => {
            if !ctx.flee_allowed {
                return Ok(EffectResult {
                    success: false,
                    message: Some(MSG_CANT_ESCAPE),
                    magnitude: None,
                });
            }
            // The controller runs the actual flee resolution.
            Ok(EffectResult::applied(None))
        }
        EffectKind::Recoil {
            numerator,
            denominator,
        } => {
            if ctx.damage_dealt == 0 || denominator == 0 {
                return Ok(EffectResult::skipped());
            }
            let numerator = ctx.damage_dealt * numerator as u32;
            let recoil = ((numerator + denominator as u32 / 2) / denominator as u32).max(1);
            target.take_damage(recoil);
            Ok(EffectResult::applied(Some(recoil as i32)))
        }
        EffectKind::Drain {
            numerator,
            denominator,
        } => {
            if ctx.damage_dealt == 0 || denominator == 0 {
                return Ok(EffectResult::skipped());
            }
            let numerator = ctx.damage_dealt * numerator as u32;
            let heal = ((numerator + denominator as u32 / 2) / denominator as u32).max(1);
            let healed = target.heal(heal.min(u16::MAX as u32) as u16);
            Ok(EffectResult::applied(Some(healed as i32)))
        }
        EffectKind::Weather { kind, turns } => {
            ctx.weather = Some(kind);
            ctx.weather_turns = turns;
            Ok(EffectResult::applied(None))
        }
        EffectKind::Flinch => {
            target.flinched = true;
            Ok(EffectResult::applied(None))
        }
        EffectKind::Protect => {
            target.protected = true;
            Ok(EffectResult::applied(None))
        }
    }
}
