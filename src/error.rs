use thiserror::Error;

/// Rejections for submitted commands. Recovered locally by the controller:
/// a command that turns invalid after submission becomes a no-op.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum CommandError {
    #[error("actor is fainted or no longer part of the battle")]
    ActorUnavailable,
    #[error("action is not legal in this session")]
    IllegalAction,
}

/// Precondition failures inside the effect executor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum EffectError {
    #[error("effect preconditions not met for this target")]
    InvalidTarget,
}
