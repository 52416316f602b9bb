use crate::error::CommandError;
use crate::sim::session::{BattleSession, Side};

/// One declared intent for the active combatant of a side.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Attack { move_index: usize },
    UseItem { item_id: &'static str, target_index: usize },
    AttemptCapture,
    Flee,
    Switch { team_index: usize },
}

/// Gathers one command per side during the input phase.
///
/// Sides are marked human or machine; resolution waits only on human
/// sides, and machine sides are filled in by the AI just before the
/// turn resolves.
#[derive(Clone, Debug, Default)]
pub struct CommandCollector {
    slots: [Option<Command>; 2],
    human: [bool; 2],
}

impl CommandCollector {
    pub fn new(player_human: bool, enemy_human: bool) -> Self {
        Self {
            slots: [None, None],
            human: [player_human, enemy_human],
        }
    }

    pub fn is_human(&self, side: Side) -> bool {
        self.human[side.index()]
    }

    /// Records a command for a side. Re-submitting before resolution
    /// replaces the earlier command.
    pub fn submit(
        &mut self,
        session: &BattleSession,
        side: Side,
        command: Command,
    ) -> Result<(), CommandError> {
        if session.active(side).is_fainted() {
            return Err(CommandError::ActorUnavailable);
        }
        self.slots[side.index()] = Some(command);
        Ok(())
    }

    /// AI path: no availability check, the controller already skips
    /// sides with no conscious active combatant.
    pub fn inject(&mut self, side: Side, command: Command) {
        self.slots[side.index()] = Some(command);
    }

    pub fn command(&self, side: Side) -> Option<&Command> {
        self.slots[side.index()].as_ref()
    }

    /// True once every human side that can still act has submitted.
    pub fn all_ready(&self, session: &BattleSession) -> bool {
        [Side::Player, Side::Enemy].into_iter().all(|side| {
            !self.human[side.index()]
                || session.active(side).is_fainted()
                || self.slots[side.index()].is_some()
        })
    }

    /// Empties the collector in the supplied resolution order.
    pub fn drain_ordered(&mut self, order: &[Side]) -> Vec<(Side, Command)> {
        order
            .iter()
            .filter_map(|&side| self.slots[side.index()].take().map(|cmd| (side, cmd)))
            .collect()
    }
}
