use crate::data::moves::{get_move, MoveCategory};
use crate::data::types::effectiveness_dual;
use crate::sim::commands::Command;
use crate::sim::session::{BattleSession, Side};

/// Command source for a machine-controlled side.
pub trait BattleAI {
    fn choose_command(&mut self, session: &BattleSession, side: Side) -> Command;
}

/// Deterministic rule-based opponent: rank usable moves by expected
/// impact against the current foe and take the best one. Never flees
/// and never attempts a capture.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleBasedAI;

impl RuleBasedAI {
    fn score(
        session: &BattleSession,
        side: Side,
        move_index: usize,
    ) -> Option<f32> {
        let actor = session.active(side);
        let slot = actor.moves.get(move_index)?;
        if slot.pp == 0 {
            return None;
        }
        let data = get_move(slot.id)?;
        let foe = session.active(side.opponent());
        let effectiveness = effectiveness_dual(data.element, foe.elements[0], foe.elements[1]);
        let score = match data.category {
            // Support moves are kept as a fallback, never preferred
            // over a damaging option.
            MoveCategory::Support => 1.0,
            _ => effectiveness * data.power as f32,
        };
        Some(score)
    }
}

impl BattleAI for RuleBasedAI {
    fn choose_command(&mut self, session: &BattleSession, side: Side) -> Command {
        let actor = session.active(side);
        let mut best: Option<(usize, f32)> = None;
        for index in 0..actor.moves.len() {
            if let Some(score) = Self::score(session, side, index) {
                let better = match best {
                    Some((_, best_score)) => score > best_score,
                    None => true,
                };
                if better {
                    best = Some((index, score));
                }
            }
        }
        // With nothing usable the controller substitutes the struggle
        // fallback for slot 0.
        Command::Attack {
            move_index: best.map(|(index, _)| index).unwrap_or(0),
        }
    }
}
