use crate::data::moves::get_move;
use crate::sim::combatant::Combatant;
use crate::sim::commands::Command;
use crate::sim::session::{BattleSession, Side};
use crate::sim::stats::effective_speed;
use rand::Rng;

pub const PRIORITY_ESCAPE: i8 = 6;
pub const PRIORITY_ITEM: i8 = 5;

/// Priority tier for a command. Flee and switch resolve before items
/// and capture attempts, which resolve before any move.
pub fn command_priority(command: &Command, actor: &Combatant) -> i8 {
    match command {
        Command::Flee | Command::Switch { .. } => PRIORITY_ESCAPE,
        Command::UseItem { .. } | Command::AttemptCapture => PRIORITY_ITEM,
        Command::Attack { move_index } => actor
            .moves
            .get(*move_index)
            .and_then(|slot| get_move(slot.id))
            .map(|data| data.priority)
            .unwrap_or(0),
    }
}

/// Resolution order for the turn: priority tier, then effective speed,
/// then a fresh random tiebreak per turn.
pub fn resolve_order(session: &mut BattleSession, pending: &[(Side, Command)]) -> Vec<Side> {
    let mut keyed: Vec<(i8, u16, u32, Side)> = pending
        .iter()
        .map(|(side, command)| {
            let actor = session.active(*side);
            (
                command_priority(command, actor),
                effective_speed(actor),
                0,
                *side,
            )
        })
        .collect();
    for entry in &mut keyed {
        entry.2 = session.ctx.rng.gen();
    }
    keyed.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| b.2.cmp(&a.2))
    });
    keyed.into_iter().map(|(_, _, _, side)| side).collect()
}
