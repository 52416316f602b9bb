use crate::battle_log::BattleLog;
use crate::sim::combatant::Combatant;
use anyhow::{ensure, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Phase {
    Init,
    Input,
    Resolve,
    Aftermath,
    End,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
    Captured,
}

/// Session-level legality flags fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct SessionRules {
    pub wild: bool,
    pub capture_allowed: bool,
    pub flee_allowed: bool,
}

impl SessionRules {
    pub fn wild_encounter() -> Self {
        Self {
            wild: true,
            capture_allowed: true,
            flee_allowed: true,
        }
    }

    pub fn trainer_battle() -> Self {
        Self {
            wild: false,
            capture_allowed: false,
            flee_allowed: false,
        }
    }
}

/// Shared battle context handed into damage and effect computation:
/// the session RNG plus the session-level knobs those computations read
/// and write. Replaces any global mutable state.
#[derive(Debug)]
pub struct BattleContext {
    pub rng: SmallRng,
    pub wild: bool,
    pub capture_allowed: bool,
    pub flee_allowed: bool,
    pub weather: Option<crate::data::types::Weather>,
    pub weather_turns: u8,
    /// Armed by a taming-bonus effect, consumed by the next capture roll.
    pub taming_bonus: f32,
    /// Damage dealt by the move currently resolving; read by recoil and
    /// drain effects.
    pub damage_dealt: u32,
}

/// The aggregate battle state, exclusively owned by the controller.
#[derive(Debug)]
pub struct BattleSession {
    pub player_side: Vec<Combatant>,
    pub enemy_side: Vec<Combatant>,
    pub active: [usize; 2],
    pub turn: u32,
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    /// Captured opponent, removed from its side, for the roster delta.
    pub captured: Option<Combatant>,
    pub ctx: BattleContext,
    pub log: BattleLog,
}

impl BattleSession {
    pub fn new(
        player_side: Vec<Combatant>,
        enemy_side: Vec<Combatant>,
        rules: SessionRules,
        seed: u64,
    ) -> Result<Self> {
        ensure!(
            !player_side.is_empty(),
            "player side must contain at least one combatant"
        );
        ensure!(
            !enemy_side.is_empty(),
            "enemy side must contain at least one combatant"
        );
        Ok(Self {
            player_side,
            enemy_side,
            active: [0, 0],
            turn: 0,
            phase: Phase::Init,
            outcome: None,
            captured: None,
            ctx: BattleContext {
                rng: SmallRng::seed_from_u64(seed),
                wild: rules.wild,
                capture_allowed: rules.capture_allowed,
                flee_allowed: rules.flee_allowed,
                weather: None,
                weather_turns: 0,
                taming_bonus: 1.0,
                damage_dealt: 0,
            },
            log: BattleLog::new(),
        })
    }

    pub fn side(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Player => &self.player_side,
            Side::Enemy => &self.enemy_side,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Vec<Combatant> {
        match side {
            Side::Player => &mut self.player_side,
            Side::Enemy => &mut self.enemy_side,
        }
    }

    pub fn active(&self, side: Side) -> &Combatant {
        &self.side(side)[self.active[side.index()]]
    }

    pub fn active_mut(&mut self, side: Side) -> &mut Combatant {
        let idx = self.active[side.index()];
        &mut self.side_mut(side)[idx]
    }

    /// True while the side still has a conscious member.
    pub fn side_has_available(&self, side: Side) -> bool {
        self.side(side).iter().any(|c| !c.is_fainted())
    }

    /// Disjoint borrows of the acting combatant, its opponent, the
    /// context and the log, for one action resolution.
    pub fn battle_pair_mut(
        &mut self,
        side: Side,
    ) -> (
        &mut Combatant,
        &mut Combatant,
        &mut BattleContext,
        &mut BattleLog,
    ) {
        let [player_active, enemy_active] = self.active;
        match side {
            Side::Player => (
                &mut self.player_side[player_active],
                &mut self.enemy_side[enemy_active],
                &mut self.ctx,
                &mut self.log,
            ),
            Side::Enemy => (
                &mut self.enemy_side[enemy_active],
                &mut self.player_side[player_active],
                &mut self.ctx,
                &mut self.log,
            ),
        }
    }

    /// Disjoint borrows of one side member (item target), context and log.
    pub fn ally_mut(
        &mut self,
        side: Side,
        index: usize,
    ) -> (&mut Combatant, &mut BattleContext, &mut BattleLog) {
        let target = match side {
            Side::Player => &mut self.player_side[index],
            Side::Enemy => &mut self.enemy_side[index],
        };
        (target, &mut self.ctx, &mut self.log)
    }
}
