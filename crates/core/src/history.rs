use crate::Combatant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-round snapshots of the full combatant set, taken whenever a round
/// boundary is crossed. Restoring hands out clones; entries only change by
/// being overwritten with a fresh capture for the same round.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundHistory {
    rounds: BTreeMap<u32, Vec<Combatant>>,
}

impl RoundHistory {
    pub fn capture(&mut self, round: u32, snapshot: Vec<Combatant>) {
        self.rounds.insert(round, snapshot);
    }

    pub fn restore(&self, round: u32) -> Option<Vec<Combatant>> {
        self.rounds.get(&round).cloned()
    }

    pub fn contains(&self, round: u32) -> bool {
        self.rounds.contains_key(&round)
    }

    pub fn rounds(&self) -> impl Iterator<Item = u32> + '_ {
        self.rounds.keys().copied()
    }
}
