//! Step-wise battle controller.
//!
//! Drives one session through its phase cycle: `resume` moves from
//! `Init` to `Input`, commands arrive through `submit`, and `advance`
//! resolves a full turn once every human side is ready. The controller
//! owns the session exclusively; callers observe it through the typed
//! event stream.

use crate::battle_log::BattleEvent;
use crate::data::items::get_item;
use crate::data::moves::{get_move, EffectKind, MoveData, FALLBACK_MOVE};
use crate::data::types::{StatKind, StatusCondition};
use crate::error::CommandError;
use crate::sim::ai::{BattleAI, RuleBasedAI};
use crate::sim::capture::{capture_chance, flee_chance, BASE_CAPTURE_RATE};
use crate::sim::combatant::Combatant;
use crate::sim::commands::{Command, CommandCollector};
use crate::sim::damage::{calculate_damage, compute, passes_accuracy, VARIANCE_MIN};
use crate::sim::effects::{self, effect_target, EffectResult, EffectTarget};
use crate::sim::order::resolve_order;
use crate::sim::session::{BattleSession, Outcome, Phase, SessionRules, Side};
use crate::sim::stats::{effective_speed, modified_stat};
use anyhow::{bail, ensure, Result};
use rand::Rng;

const CONFUSION_SELF_HIT_CHANCE: f32 = 1.0 / 3.0;
const CONFUSION_SELF_HIT_POWER: u16 = 40;
const THAW_CHANCE: f64 = 0.2;
const FULL_PARALYSIS_CHANCE: f64 = 0.25;

const SIDES: [Side; 2] = [Side::Player, Side::Enemy];

/// Final state handed back once the session reaches `End`.
#[derive(Debug)]
pub struct BattleSummary {
    pub outcome: Outcome,
    pub turns: u32,
    pub player_side: Vec<Combatant>,
    pub enemy_side: Vec<Combatant>,
    pub captured: Option<Combatant>,
}

pub struct BattleController {
    session: BattleSession,
    collector: CommandCollector,
    ai: Box<dyn BattleAI>,
}

impl BattleController {
    /// Player-versus-machine session with the default rule-based opponent.
    pub fn new(
        player_side: Vec<Combatant>,
        enemy_side: Vec<Combatant>,
        rules: SessionRules,
        seed: u64,
    ) -> Result<Self> {
        Self::with_ai(player_side, enemy_side, rules, seed, Box::new(RuleBasedAI))
    }

    pub fn with_ai(
        player_side: Vec<Combatant>,
        enemy_side: Vec<Combatant>,
        rules: SessionRules,
        seed: u64,
        ai: Box<dyn BattleAI>,
    ) -> Result<Self> {
        Ok(Self {
            session: BattleSession::new(player_side, enemy_side, rules, seed)?,
            collector: CommandCollector::new(true, false),
            ai,
        })
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.session.outcome
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    /// Mutable session access for embedding callers that stage an
    /// encounter (pre-damaged wild targets, scripted status).
    pub fn session_mut(&mut self) -> &mut BattleSession {
        &mut self.session
    }

    /// Removes and returns all events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.session.log.drain()
    }

    /// Opens the first input window. Valid exactly once, from `Init`.
    pub fn resume(&mut self) -> Result<()> {
        ensure!(
            self.session.phase == Phase::Init,
            "battle already started"
        );
        self.session.turn = 1;
        self.session.phase = Phase::Input;
        self.session.log.push(BattleEvent::TurnStarted { turn: 1 });
        Ok(())
    }

    /// Records the player's command for this turn. Rejects commands the
    /// session rules or current state make illegal; a legal command can
    /// be replaced until the turn resolves.
    pub fn submit(&mut self, side: Side, command: Command) -> Result<(), CommandError> {
        if self.session.phase != Phase::Input {
            return Err(CommandError::IllegalAction);
        }
        self.validate(side, &command)?;
        self.collector.submit(&self.session, side, command)
    }

    fn validate(&self, side: Side, command: &Command) -> Result<(), CommandError> {
        if self.session.active(side).is_fainted() {
            return Err(CommandError::ActorUnavailable);
        }
        let ctx = &self.session.ctx;
        match command {
            Command::Flee => {
                if !ctx.flee_allowed {
                    return Err(CommandError::IllegalAction);
                }
            }
            Command::AttemptCapture => {
                if !ctx.capture_allowed || !ctx.wild {
                    return Err(CommandError::IllegalAction);
                }
            }
            Command::Attack { move_index } => {
                let actor = self.session.active(side);
                // With every move exhausted any slot is accepted and the
                // fallback attack resolves instead.
                if actor.has_usable_move() {
                    let usable = actor
                        .moves
                        .get(*move_index)
                        .map(|slot| slot.pp > 0 && get_move(slot.id).is_some())
                        .unwrap_or(false);
                    if !usable {
                        return Err(CommandError::IllegalAction);
                    }
                }
            }
            Command::UseItem {
                item_id,
                target_index,
            } => {
                let item = get_item(item_id).ok_or(CommandError::IllegalAction)?;
                if item.wild_only && !ctx.wild {
                    return Err(CommandError::IllegalAction);
                }
                if *target_index >= self.session.side(side).len() {
                    return Err(CommandError::IllegalAction);
                }
            }
            Command::Switch { team_index } => {
                let bench = self.session.side(side);
                let legal = *team_index < bench.len()
                    && *team_index != self.session.active[side.index()]
                    && !bench[*team_index].is_fainted();
                if !legal {
                    return Err(CommandError::IllegalAction);
                }
            }
        }
        Ok(())
    }

    /// Resolves one turn when every human side has submitted; otherwise
    /// returns without touching the session. The returned phase is
    /// `Input` for the next turn or `End` when the battle is over.
    pub fn advance(&mut self) -> Result<Phase> {
        match self.session.phase {
            Phase::Init => {
                self.resume()?;
                return Ok(Phase::Input);
            }
            Phase::End => return Ok(Phase::End),
            Phase::Input => {}
            Phase::Resolve | Phase::Aftermath => {
                bail!("advance re-entered while a turn was resolving");
            }
        }
        if !self.collector.all_ready(&self.session) {
            return Ok(Phase::Input);
        }
        for side in SIDES {
            if !self.collector.is_human(side) && !self.session.active(side).is_fainted() {
                let command = self.ai.choose_command(&self.session, side);
                self.collector.inject(side, command);
            }
        }
        self.resolve()?;
        Ok(self.session.phase)
    }

    fn resolve(&mut self) -> Result<()> {
        self.session.phase = Phase::Resolve;
        let pending: Vec<(Side, Command)> = SIDES
            .iter()
            .filter_map(|&side| {
                self.collector
                    .command(side)
                    .cloned()
                    .map(|command| (side, command))
            })
            .collect();
        ensure!(
            !pending.is_empty(),
            "resolve phase entered with no pending commands"
        );
        let order = resolve_order(&mut self.session, &pending);
        let ordered = self.collector.drain_ordered(&order);

        for (side, command) in ordered {
            if self.session.outcome.is_some() {
                break;
            }
            if self.session.active(side).is_fainted() {
                continue;
            }
            match command {
                Command::Attack { move_index } => self.execute_attack(side, move_index),
                Command::UseItem {
                    item_id,
                    target_index,
                } => self.execute_item(side, item_id, target_index),
                Command::AttemptCapture => self.execute_capture(side),
                Command::Flee => self.attempt_flee(side),
                Command::Switch { team_index } => self.execute_switch(side, team_index),
            }
            self.check_wipe();
        }

        if self.session.outcome.is_some() {
            self.finish();
        } else {
            self.aftermath();
        }
        Ok(())
    }

    fn check_wipe(&mut self) {
        if self.session.outcome.is_some() {
            return;
        }
        if !self.session.side_has_available(Side::Enemy) {
            self.session.outcome = Some(Outcome::Victory);
        } else if !self.session.side_has_available(Side::Player) {
            self.session.outcome = Some(Outcome::Defeat);
        }
    }

    fn finish(&mut self) {
        self.session.phase = Phase::End;
        if let Some(outcome) = self.session.outcome {
            self.session.log.push(BattleEvent::Ended { outcome });
        }
    }

    fn execute_attack(&mut self, side: Side, move_index: usize) {
        let foe_side = side.opponent();
        let (actor, foe, ctx, log) = self.session.battle_pair_mut(side);
        actor.acted = true;
        ctx.damage_dealt = 0;

        if !roll_can_act(actor, ctx, log, side) {
            return;
        }

        let chosen = actor
            .moves
            .get(move_index)
            .filter(|slot| slot.pp > 0)
            .and_then(|slot| get_move(slot.id));
        let move_data: &MoveData = match chosen {
            Some(data) => {
                actor.moves[move_index].pp -= 1;
                data
            }
            // A command that went stale after submission is dropped.
            None if actor.has_usable_move() => return,
            None => &FALLBACK_MOVE,
        };
        log.push(BattleEvent::MoveUsed {
            side,
            name: move_data.name.to_string(),
        });

        let targets_foe = move_data.power > 0
            || move_data
                .effects
                .iter()
                .any(|spec| effect_target(&spec.kind) == EffectTarget::Foe);
        if targets_foe && foe.protected {
            log.push(BattleEvent::Protected { side: foe_side });
            return;
        }

        if move_data.power > 0 {
            let result = compute(actor, foe, move_data, ctx);
            if !result.hit {
                log.push(BattleEvent::Missed { side });
                return;
            }
            foe.take_damage(result.amount);
            ctx.damage_dealt = result.amount;
            log.push(BattleEvent::DamageDealt {
                side: foe_side,
                amount: result.amount,
                hp: foe.current_hp,
                max_hp: foe.max_hp(),
                critical: result.critical,
            });
            if result.effectiveness > 1.0 {
                log.push(BattleEvent::Message {
                    text: "It's super effective!".to_string(),
                });
            } else if result.effectiveness < 1.0 {
                log.push(BattleEvent::Message {
                    text: "It's not very effective...".to_string(),
                });
            }
        } else if !passes_accuracy(move_data.accuracy, actor, foe, &mut ctx.rng) {
            log.push(BattleEvent::Missed { side });
            return;
        }

        for spec in move_data.effects {
            let (target, target_side) = match effect_target(&spec.kind) {
                EffectTarget::Foe => (&mut *foe, foe_side),
                EffectTarget::User | EffectTarget::Field => (&mut *actor, side),
            };
            if let Ok(result) = effects::apply(spec, target, ctx) {
                log_effect_result(log, target_side, &spec.kind, &result, target);
            }
        }

        if foe.is_fainted() {
            log.push(BattleEvent::Fainted {
                side: foe_side,
                name: foe.name.clone(),
            });
        }
        if actor.is_fainted() {
            log.push(BattleEvent::Fainted {
                side,
                name: actor.name.clone(),
            });
        }
    }

    fn execute_item(&mut self, side: Side, item_id: &str, target_index: usize) {
        let Some(item) = get_item(item_id) else {
            return;
        };
        let mut escaped = false;
        {
            let (target, ctx, log) = self.session.ally_mut(side, target_index);
            log.push(BattleEvent::ItemUsed {
                side,
                item: item.name.to_string(),
            });
            for spec in item.effects {
                match effects::apply(spec, target, ctx) {
                    Ok(result) => {
                        if matches!(spec.kind, EffectKind::Escape) && result.success {
                            escaped = true;
                        }
                        log_effect_result(log, side, &spec.kind, &result, target);
                    }
                    Err(_) => {
                        log.push(BattleEvent::Message {
                            text: effects::MSG_NO_EFFECT.to_string(),
                        });
                    }
                }
            }
        }
        if escaped {
            self.attempt_flee(side);
        }
    }

    fn execute_capture(&mut self, side: Side) {
        let foe_side = side.opponent();
        let success = {
            let (_, foe, ctx, log) = self.session.battle_pair_mut(side);
            if !ctx.capture_allowed || !ctx.wild {
                return;
            }
            let item_bonus = std::mem::replace(&mut ctx.taming_bonus, 1.0);
            let chance = capture_chance(
                BASE_CAPTURE_RATE,
                foe.catch_modifier,
                foe.hp_fraction(),
                foe.status,
                item_bonus,
            );
            let success = ctx.rng.gen_range(0.0_f32..1.0) < chance;
            log.push(BattleEvent::CaptureAttempt {
                name: foe.name.clone(),
                success,
            });
            if success {
                foe.captured = true;
            } else {
                foe.irritated = true;
            }
            success
        };
        if success {
            let index = self.session.active[foe_side.index()];
            let caught = self.session.side_mut(foe_side).remove(index);
            self.session.captured = Some(caught);
            self.session.outcome = Some(Outcome::Captured);
        }
    }

    fn attempt_flee(&mut self, side: Side) {
        let foe_side = side.opponent();
        let fastest = self
            .session
            .side(foe_side)
            .iter()
            .filter(|c| !c.is_fainted())
            .map(|c| effective_speed(c))
            .max()
            .unwrap_or(0);
        let (actor, _, ctx, log) = self.session.battle_pair_mut(side);
        if !ctx.flee_allowed {
            log.push(BattleEvent::Message {
                text: effects::MSG_CANT_ESCAPE.to_string(),
            });
            return;
        }
        let chance = flee_chance(effective_speed(actor), fastest);
        let success = ctx.rng.gen_range(0.0_f32..1.0) < chance;
        log.push(BattleEvent::FleeAttempt { side, success });
        if success {
            self.session.outcome = Some(Outcome::Fled);
        } else {
            log.push(BattleEvent::Message {
                text: effects::MSG_CANT_ESCAPE.to_string(),
            });
        }
    }

    fn execute_switch(&mut self, side: Side, team_index: usize) {
        let bench = self.session.side(side);
        let legal = team_index < bench.len()
            && team_index != self.session.active[side.index()]
            && !bench[team_index].is_fainted();
        if !legal {
            return;
        }
        self.session.active_mut(side).reset_on_switch();
        self.session.active[side.index()] = team_index;
        let name = self.session.active(side).name.clone();
        self.session.log.push(BattleEvent::Switched { side, name });
    }

    /// End-of-turn residuals: status chip damage, timed status expiry,
    /// per-turn flag reset, weather countdown, replacement of fainted
    /// actives, then either the next input window or the end of the
    /// battle.
    fn aftermath(&mut self) {
        self.session.phase = Phase::Aftermath;
        for side in SIDES {
            let (actor, _, _, log) = self.session.battle_pair_mut(side);
            if !actor.is_fainted() {
                let chip = match actor.status {
                    Some(StatusCondition::Burn) => Some((actor.max_hp() / 16).max(1)),
                    Some(StatusCondition::Poison) => Some((actor.max_hp() / 8).max(1)),
                    _ => None,
                };
                if let (Some(amount), Some(condition)) = (chip, actor.status) {
                    actor.take_damage(amount as u32);
                    log.push(BattleEvent::StatusDamage {
                        side,
                        condition,
                        amount: amount as u32,
                        hp: actor.current_hp,
                    });
                    if actor.is_fainted() {
                        log.push(BattleEvent::Fainted {
                            side,
                            name: actor.name.clone(),
                        });
                    }
                }
                if let (Some(turns), Some(condition)) = (actor.status_turns, actor.status) {
                    let remaining = turns.saturating_sub(1);
                    if remaining == 0 {
                        actor.clear_status();
                        log.push(BattleEvent::StatusCleared { side, condition });
                    } else {
                        actor.status_turns = Some(remaining);
                    }
                }
            }
            actor.flinched = false;
            actor.protected = false;
            actor.acted = false;
        }

        if self.session.ctx.weather_turns > 0 {
            self.session.ctx.weather_turns -= 1;
            if self.session.ctx.weather_turns == 0 {
                self.session.ctx.weather = None;
                self.session
                    .log
                    .push(BattleEvent::WeatherChanged { weather: None });
            }
        }

        self.check_wipe();
        if self.session.outcome.is_some() {
            self.finish();
            return;
        }

        // A side that lost its active combatant sends out the next one.
        for side in SIDES {
            if self.session.active(side).is_fainted() {
                if let Some(next) = self
                    .session
                    .side(side)
                    .iter()
                    .position(|c| !c.is_fainted())
                {
                    self.session.active[side.index()] = next;
                    let name = self.session.active(side).name.clone();
                    self.session.log.push(BattleEvent::Switched { side, name });
                }
            }
        }

        self.session.turn += 1;
        self.session.phase = Phase::Input;
        self.session.log.push(BattleEvent::TurnStarted {
            turn: self.session.turn,
        });
    }

    /// Consumes the controller once the session has ended.
    pub fn into_summary(self) -> Result<BattleSummary> {
        let Some(outcome) = self.session.outcome else {
            bail!("battle has not ended yet");
        };
        Ok(BattleSummary {
            outcome,
            turns: self.session.turn,
            player_side: self.session.player_side,
            enemy_side: self.session.enemy_side,
            captured: self.session.captured,
        })
    }
}

/// Pre-move gate: flinch, then the acting checks of the current status
/// condition. Returns false when the turn is forfeited.
fn roll_can_act(
    actor: &mut Combatant,
    ctx: &mut crate::sim::session::BattleContext,
    log: &mut crate::battle_log::BattleLog,
    side: Side,
) -> bool {
    if actor.flinched {
        actor.flinched = false;
        log.push(BattleEvent::Flinched { side });
        return false;
    }
    match actor.status {
        Some(StatusCondition::Sleep) => {
            log.push(BattleEvent::Asleep { side });
            false
        }
        Some(StatusCondition::Freeze) => {
            if ctx.rng.gen_bool(THAW_CHANCE) {
                actor.clear_status();
                log.push(BattleEvent::Thawed { side });
                true
            } else {
                log.push(BattleEvent::Frozen { side });
                false
            }
        }
        Some(StatusCondition::Paralysis) => {
            if ctx.rng.gen_bool(FULL_PARALYSIS_CHANCE) {
                log.push(BattleEvent::FullyParalyzed { side });
                false
            } else {
                true
            }
        }
        Some(StatusCondition::Confusion) => {
            if ctx.rng.gen_range(0.0_f32..1.0) < CONFUSION_SELF_HIT_CHANCE {
                // Typeless physical hit against itself, no critical and
                // no same-element bonus.
                let variance = ctx.rng.gen_range(VARIANCE_MIN..=1.0);
                let amount = calculate_damage(
                    CONFUSION_SELF_HIT_POWER,
                    modified_stat(actor, StatKind::Attack),
                    modified_stat(actor, StatKind::Defense),
                    false,
                    1.0,
                    false,
                    variance,
                    1.0,
                );
                actor.take_damage(amount);
                log.push(BattleEvent::HurtItselfInConfusion {
                    side,
                    amount,
                    hp: actor.current_hp,
                });
                if actor.is_fainted() {
                    log.push(BattleEvent::Fainted {
                        side,
                        name: actor.name.clone(),
                    });
                }
                false
            } else {
                true
            }
        }
        _ => true,
    }
}

fn log_effect_result(
    log: &mut crate::battle_log::BattleLog,
    side: Side,
    kind: &EffectKind,
    result: &EffectResult,
    target: &Combatant,
) {
    if let Some(text) = result.message {
        log.push(BattleEvent::Message {
            text: text.to_string(),
        });
    }
    if !result.success {
        return;
    }
    match kind {
        EffectKind::Status { condition, .. } => {
            log.push(BattleEvent::StatusApplied {
                side,
                condition: *condition,
            });
        }
        EffectKind::StatChange { stat, delta, .. } => {
            log.push(BattleEvent::StatChanged {
                side,
                stat: *stat,
                delta: *delta,
            });
        }
        EffectKind::Heal { .. } => {
            log.push(BattleEvent::Healed {
                side,
                amount: result.magnitude.unwrap_or(0) as u32,
                hp: target.current_hp,
            });
        }
        EffectKind::Revive { .. } => {
            log.push(BattleEvent::Revived {
                side,
                hp: target.current_hp,
            });
        }
        EffectKind::Recoil { .. } => {
            log.push(BattleEvent::Recoiled {
                side,
                amount: result.magnitude.unwrap_or(0) as u32,
            });
        }
        EffectKind::Drain { .. } => {
            log.push(BattleEvent::Drained {
                side,
                amount: result.magnitude.unwrap_or(0) as u32,
            });
        }
        EffectKind::Weather { kind, .. } => {
            log.push(BattleEvent::WeatherChanged {
                weather: Some(*kind),
            });
        }
        EffectKind::Protect => {
            log.push(BattleEvent::Protected { side });
        }
        EffectKind::TamingBonus { .. } | EffectKind::Escape | EffectKind::Flinch => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::SessionRules;

    fn combatant(species: &str, moves: &[&str]) -> Combatant {
        Combatant::from_species(species, 20, moves).expect("content exists")
    }

    fn wild_controller(seed: u64) -> BattleController {
        BattleController::new(
            vec![combatant("voltkit", &["spark", "lullaby"])],
            vec![combatant("boulderhide", &["rocktoss"])],
            SessionRules::wild_encounter(),
            seed,
        )
        .expect("valid session")
    }

    #[test]
    fn resume_opens_the_first_turn() {
        let mut controller = wild_controller(1);
        controller.resume().unwrap();
        assert_eq!(controller.phase(), Phase::Input);
        assert_eq!(
            controller.drain_events(),
            vec![BattleEvent::TurnStarted { turn: 1 }]
        );
        assert!(controller.resume().is_err());
    }

    #[test]
    fn advance_waits_for_the_player() {
        let mut controller = wild_controller(2);
        controller.resume().unwrap();
        controller.drain_events();
        assert_eq!(controller.advance().unwrap(), Phase::Input);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn flee_is_rejected_when_the_rules_forbid_it() {
        let mut controller = BattleController::new(
            vec![combatant("voltkit", &["spark"])],
            vec![combatant("boulderhide", &["rocktoss"])],
            SessionRules::trainer_battle(),
            3,
        )
        .unwrap();
        controller.resume().unwrap();
        controller.drain_events();
        let result = controller.submit(Side::Player, Command::Flee);
        assert_eq!(result, Err(CommandError::IllegalAction));
        assert_eq!(controller.phase(), Phase::Input);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn capture_is_rejected_in_trainer_battles() {
        let mut controller = BattleController::new(
            vec![combatant("voltkit", &["spark"])],
            vec![combatant("boulderhide", &["rocktoss"])],
            SessionRules::trainer_battle(),
            4,
        )
        .unwrap();
        controller.resume().unwrap();
        let result = controller.submit(Side::Player, Command::AttemptCapture);
        assert_eq!(result, Err(CommandError::IllegalAction));
    }

    #[test]
    fn exhausted_move_cannot_be_submitted_while_others_remain() {
        let mut controller = wild_controller(5);
        controller.resume().unwrap();
        controller.session.active_mut(Side::Player).moves[0].pp = 0;
        let result = controller.submit(Side::Player, Command::Attack { move_index: 0 });
        assert_eq!(result, Err(CommandError::IllegalAction));
        let result = controller.submit(Side::Player, Command::Attack { move_index: 1 });
        assert!(result.is_ok());
    }

    #[test]
    fn fallback_attack_is_accepted_once_everything_is_exhausted() {
        let mut controller = wild_controller(6);
        controller.resume().unwrap();
        for slot in &mut controller.session.active_mut(Side::Player).moves {
            slot.pp = 0;
        }
        let result = controller.submit(Side::Player, Command::Attack { move_index: 0 });
        assert!(result.is_ok());
    }

    #[test]
    fn defeating_the_last_opponent_ends_the_battle() {
        let mut controller = wild_controller(7);
        controller.resume().unwrap();
        // Voltkit outspeeds Boulderhide, and Spark never misses a
        // target with one hit point left.
        controller.session.active_mut(Side::Enemy).current_hp = 1;
        controller
            .submit(Side::Player, Command::Attack { move_index: 0 })
            .unwrap();
        let phase = controller.advance().unwrap();
        assert_eq!(phase, Phase::End);
        assert_eq!(controller.outcome(), Some(Outcome::Victory));
        let events = controller.drain_events();
        assert!(events.contains(&BattleEvent::Ended {
            outcome: Outcome::Victory
        }));
        let summary = controller.into_summary().unwrap();
        assert_eq!(summary.outcome, Outcome::Victory);
    }

    #[test]
    fn failed_capture_irritates_the_target_and_play_continues() {
        // Full HP makes the capture chance exactly zero.
        let mut controller = wild_controller(8);
        controller.resume().unwrap();
        controller.submit(Side::Player, Command::AttemptCapture).unwrap();
        let phase = controller.advance().unwrap();
        assert_ne!(controller.outcome(), Some(Outcome::Captured));
        let enemy = &controller.session.enemy_side[0];
        assert!(enemy.irritated);
        assert!(!enemy.captured);
        assert!(phase == Phase::Input || phase == Phase::End);
        let events = controller.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            BattleEvent::CaptureAttempt { success: false, .. }
        )));
    }

    #[test]
    fn successful_capture_removes_the_target_and_ends_the_battle() {
        // A weakened sleeping target sits at the capture ceiling, so
        // some seed in this range must land the attempt.
        let captured = (0..200).find_map(|seed| {
            let mut controller = wild_controller(seed);
            controller.resume().unwrap();
            {
                let enemy = controller.session.active_mut(Side::Enemy);
                enemy.current_hp = 1;
                enemy.status = Some(StatusCondition::Sleep);
                enemy.status_turns = Some(3);
            }
            controller.session.ctx.taming_bonus = 1.5;
            controller.submit(Side::Player, Command::AttemptCapture).unwrap();
            controller.advance().unwrap();
            if controller.outcome() == Some(Outcome::Captured) {
                Some(controller)
            } else {
                None
            }
        });
        let controller = captured.expect("a capture within 200 seeds");
        assert_eq!(controller.phase(), Phase::End);
        assert!(controller.session.enemy_side.is_empty());
        let summary = controller.into_summary().unwrap();
        let caught = summary.captured.expect("captured combatant");
        assert!(caught.captured);
    }

    #[test]
    fn fleeing_ends_the_battle_for_some_seed() {
        let fled = (0..200).find_map(|seed| {
            let mut controller = wild_controller(seed);
            controller.resume().unwrap();
            controller.submit(Side::Player, Command::Flee).unwrap();
            controller.advance().unwrap();
            (controller.outcome() == Some(Outcome::Fled)).then_some(controller)
        });
        let controller = fled.expect("an escape within 200 seeds");
        assert_eq!(controller.phase(), Phase::End);
    }

    #[test]
    fn burn_chips_at_end_of_turn() {
        // The enemy only knows a stat-drop move so the turn cannot end
        // the battle before aftermath runs.
        let mut controller = BattleController::new(
            vec![combatant("voltkit", &["spark", "lullaby"])],
            vec![combatant("boulderhide", &["screech"])],
            SessionRules::wild_encounter(),
            9,
        )
        .unwrap();
        controller.resume().unwrap();
        {
            let enemy = controller.session.active_mut(Side::Enemy);
            enemy.status = Some(StatusCondition::Burn);
        }
        let before = controller.session.active(Side::Enemy).current_hp;
        controller
            .submit(Side::Player, Command::Attack { move_index: 1 })
            .unwrap();
        controller.advance().unwrap();
        let events = controller.drain_events();
        let chip = events.iter().find_map(|e| match e {
            BattleEvent::StatusDamage {
                side: Side::Enemy,
                condition: StatusCondition::Burn,
                amount,
                ..
            } => Some(*amount),
            _ => None,
        });
        let expected = (controller.session.active(Side::Enemy).max_hp() / 16).max(1) as u32;
        assert_eq!(chip, Some(expected));
        assert!(controller.session.active(Side::Enemy).current_hp < before);
    }

    #[test]
    fn timed_status_expires_after_its_turns() {
        let mut controller = wild_controller(10);
        controller.resume().unwrap();
        {
            let enemy = controller.session.active_mut(Side::Enemy);
            enemy.status = Some(StatusCondition::Sleep);
            enemy.status_turns = Some(1);
        }
        controller
            .submit(Side::Player, Command::Attack { move_index: 0 })
            .unwrap();
        controller.advance().unwrap();
        if controller.phase() == Phase::Input {
            let enemy = controller.session.active(Side::Enemy);
            assert!(enemy.status.is_none());
            let events = controller.drain_events();
            assert!(events.contains(&BattleEvent::StatusCleared {
                side: Side::Enemy,
                condition: StatusCondition::Sleep,
            }));
        }
    }

    #[test]
    fn fainted_active_is_replaced_from_the_bench() {
        let mut controller = BattleController::new(
            vec![combatant("voltkit", &["spark"])],
            vec![
                combatant("boulderhide", &["rocktoss"]),
                combatant("gloomrat", &["venomgnaw"]),
            ],
            SessionRules::trainer_battle(),
            11,
        )
        .unwrap();
        controller.resume().unwrap();
        controller.session.active_mut(Side::Enemy).current_hp = 1;
        controller
            .submit(Side::Player, Command::Attack { move_index: 0 })
            .unwrap();
        let phase = controller.advance().unwrap();
        assert_eq!(phase, Phase::Input);
        assert_eq!(controller.session.active[Side::Enemy.index()], 1);
        let events = controller.drain_events();
        assert!(events.contains(&BattleEvent::Switched {
            side: Side::Enemy,
            name: "Gloomrat".to_string(),
        }));
    }

    #[test]
    fn switch_command_changes_the_active_combatant() {
        let mut controller = BattleController::new(
            vec![
                combatant("voltkit", &["spark"]),
                combatant("tidepup", &["waterjet"]),
            ],
            vec![combatant("boulderhide", &["screech"])],
            SessionRules::trainer_battle(),
            12,
        )
        .unwrap();
        controller.resume().unwrap();
        controller
            .submit(Side::Player, Command::Switch { team_index: 1 })
            .unwrap();
        controller.advance().unwrap();
        assert_eq!(controller.session.active[Side::Player.index()], 1);
        let events = controller.drain_events();
        assert!(events.contains(&BattleEvent::Switched {
            side: Side::Player,
            name: "Tidepup".to_string(),
        }));
    }

    #[test]
    fn healing_item_restores_the_chosen_ally() {
        let mut controller = wild_controller(13);
        controller.resume().unwrap();
        {
            let player = controller.session.active_mut(Side::Player);
            player.current_hp = player.max_hp() - 15;
        }
        controller
            .submit(
                Side::Player,
                Command::UseItem {
                    item_id: "tonic",
                    target_index: 0,
                },
            )
            .unwrap();
        controller.advance().unwrap();
        let events = controller.drain_events();
        assert!(events.contains(&BattleEvent::ItemUsed {
            side: Side::Player,
            item: "Tonic".to_string(),
        }));
        assert!(events.iter().any(|e| matches!(
            e,
            BattleEvent::Healed {
                side: Side::Player,
                amount: 15,
                ..
            }
        )));
    }

    #[test]
    fn wild_only_item_is_rejected_in_trainer_battles() {
        let mut controller = BattleController::new(
            vec![combatant("voltkit", &["spark"])],
            vec![combatant("boulderhide", &["rocktoss"])],
            SessionRules::trainer_battle(),
            14,
        )
        .unwrap();
        controller.resume().unwrap();
        let result = controller.submit(
            Side::Player,
            Command::UseItem {
                item_id: "tamingtreat",
                target_index: 0,
            },
        );
        assert_eq!(result, Err(CommandError::IllegalAction));
    }

    #[test]
    fn submissions_outside_the_input_phase_are_rejected() {
        let mut controller = wild_controller(15);
        let result = controller.submit(Side::Player, Command::Attack { move_index: 0 });
        assert_eq!(result, Err(CommandError::IllegalAction));
    }
}
