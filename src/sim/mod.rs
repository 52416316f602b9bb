pub mod ai;
pub mod capture;
pub mod combatant;
pub mod commands;
pub mod damage;
pub mod effects;
pub mod order;
pub mod session;
pub mod stats;

pub use combatant::Combatant;
