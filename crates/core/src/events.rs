use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    CombatStarted { combatants: usize },
    CombatEnded { round: u32 },
    InitiativeDrawn {
        combatant: String,
        name: String,
        card_value: i32,
        card_name: String,
        hidden: bool,
    },
    InitiativeCleared { combatants: usize },
    DeckReset { available: usize },
    RoundAdvanced { round: u32, restored: bool },
    RoundRegressed { round: u32, restored: bool },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
