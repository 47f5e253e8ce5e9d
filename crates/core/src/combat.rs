use crate::{
    compare, CombatConfig, Combatant, CombatantUpdate, Deck, DeckError, RngState, RoundHistory,
    TransportError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod initiative;
mod lifecycle;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CombatPhase {
    Idle,
    Active,
    Ended,
}

#[derive(Debug, Error)]
pub enum CombatError {
    #[error("unknown combatant: {0}")]
    UnknownCombatant(String),
    #[error("no cards left to draw from")]
    EmptyDeck,
    #[error("invalid phase: {0:?}")]
    InvalidPhase(CombatPhase),
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RollOptions {
    /// Keep the turn marker on the combatant that held it before the draw.
    pub commit_turn: bool,
    /// Move the turn marker back to the top of the order.
    pub new_round: bool,
}

#[derive(Debug)]
pub struct CombatState {
    pub config: CombatConfig,
    pub rng: RngState,
    pub deck: Deck,
    pub combatants: Vec<Combatant>,
    pub round: u32,
    pub turn: usize,
    pub history: RoundHistory,
    pub phase: CombatPhase,
}

impl CombatState {
    pub fn new(config: CombatConfig, deck: Deck, combatants: Vec<Combatant>, seed: u64) -> Self {
        Self {
            config,
            rng: RngState::from_seed(seed),
            deck,
            combatants,
            round: 0,
            turn: 0,
            history: RoundHistory::default(),
            phase: CombatPhase::Idle,
        }
    }

    pub fn combatant(&self, id: &str) -> Option<&Combatant> {
        self.combatants.iter().find(|combatant| combatant.id == id)
    }

    /// The display order: a stable sort of the live set under the turn-order
    /// comparator.
    pub fn turn_order(&self) -> Vec<&Combatant> {
        let mut order: Vec<&Combatant> = self.combatants.iter().collect();
        order.sort_by(|a, b| compare(a, b, self.config.sort_direction));
        order
    }

    pub fn current_combatant(&self) -> Option<&Combatant> {
        self.turn_order().get(self.turn).copied()
    }

    fn apply_update(&mut self, update: &CombatantUpdate) {
        let Some(combatant) = self
            .combatants
            .iter_mut()
            .find(|combatant| combatant.id == update.id())
        else {
            return;
        };
        match update {
            CombatantUpdate::Initiative {
                initiative,
                card_value,
                card_name,
                ..
            } => {
                combatant.initiative = Some(*initiative);
                combatant.card_value = Some(*card_value);
                combatant.card_name = Some(card_name.clone());
            }
            CombatantUpdate::ClearInitiative { .. } => combatant.reset_initiative(),
            CombatantUpdate::ClearActionFlags { .. } => {
                combatant.fast_action = false;
                combatant.slow_action = false;
            }
        }
    }

    fn apply_batch(&mut self, updates: &[CombatantUpdate]) {
        for update in updates {
            self.apply_update(update);
        }
    }
}
