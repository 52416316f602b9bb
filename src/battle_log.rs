//! Typed notification stream consumed by the presentation layer.
//!
//! The engine never renders or blocks; it appends events here and the
//! caller drains them after each `advance`.

use crate::data::types::{StatKind, StatusCondition, Weather};
use crate::sim::session::{Outcome, Side};
use serde::Serialize;
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    TurnStarted { turn: u32 },
    MoveUsed { side: Side, name: String },
    DamageDealt { side: Side, amount: u32, hp: u16, max_hp: u16, critical: bool },
    Missed { side: Side },
    Message { text: String },
    StatusApplied { side: Side, condition: StatusCondition },
    StatusCleared { side: Side, condition: StatusCondition },
    StatusDamage { side: Side, condition: StatusCondition, amount: u32, hp: u16 },
    StatChanged { side: Side, stat: StatKind, delta: i8 },
    Healed { side: Side, amount: u32, hp: u16 },
    Revived { side: Side, hp: u16 },
    ItemUsed { side: Side, item: String },
    Flinched { side: Side },
    Asleep { side: Side },
    Frozen { side: Side },
    Thawed { side: Side },
    FullyParalyzed { side: Side },
    HurtItselfInConfusion { side: Side, amount: u32, hp: u16 },
    Protected { side: Side },
    Fainted { side: Side, name: String },
    Switched { side: Side, name: String },
    CaptureAttempt { name: String, success: bool },
    FleeAttempt { side: Side, success: bool },
    Recoiled { side: Side, amount: u32 },
    Drained { side: Side, amount: u32 },
    WeatherChanged { weather: Option<Weather> },
    Ended { outcome: Outcome },
}

/// Append-only event log for one battle session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BattleLog {
    events: Vec<BattleEvent>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "events": self.events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_log() {
        let mut log = BattleLog::new();
        log.push(BattleEvent::TurnStarted { turn: 1 });
        log.push(BattleEvent::Missed { side: Side::Player });
        assert_eq!(log.drain().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let mut log = BattleLog::new();
        log.push(BattleEvent::TurnStarted { turn: 3 });
        let value = log.to_json();
        assert_eq!(value["events"][0]["event"], "turn_started");
        assert_eq!(value["events"][0]["turn"], 3);
    }
}
