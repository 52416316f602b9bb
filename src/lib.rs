//! Turn-based monster-combat resolution engine.
//!
//! The step-wise entry point for driving a battle is
//! [`engine::BattleController`]: submit one command per turn while the
//! session is in the `Input` phase, then call `advance` to resolve the turn.

pub mod battle_log;
pub mod data;
pub mod engine;
pub mod error;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::battle_log::{BattleEvent, BattleLog};
    pub use crate::engine::{BattleController, BattleSummary};
    pub use crate::error::{CommandError, EffectError};
    pub use crate::sim::combatant::Combatant;
    pub use crate::sim::commands::Command;
    pub use crate::sim::session::{Outcome, Phase, SessionRules, Side};
}
