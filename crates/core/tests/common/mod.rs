#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use turncard_core::{
    ActionCleanup, Card, Chooser, CleanupError, CombatConfig, CombatState, Combatant,
    CombatantUpdate, Deck, Host, NoticeLevel, Notifier, RulesProvider, TokenService, Transport,
    TransportError,
};

/// Per-combatant draw counts and speeds; anything unlisted draws one card and
/// acts once per round.
#[derive(Default)]
pub struct TableRules {
    pub draws: HashMap<String, u32>,
    pub speeds: HashMap<String, u32>,
}

impl TableRules {
    pub fn with_draws(entries: &[(&str, u32)]) -> Self {
        Self {
            draws: entries
                .iter()
                .map(|(id, count)| (id.to_string(), *count))
                .collect(),
            speeds: HashMap::new(),
        }
    }
}

impl RulesProvider for TableRules {
    fn cards_to_draw(&self, combatant: &Combatant) -> u32 {
        self.draws.get(&combatant.id).copied().unwrap_or(1)
    }

    fn speed(&self, combatant: &Combatant) -> u32 {
        self.speeds.get(&combatant.id).copied().unwrap_or(1)
    }
}

/// Replays scripted picks front to back and records every candidate set it
/// was offered. An exhausted script cancels the dialog.
#[derive(Default)]
pub struct ScriptedChooser {
    pub picks: RefCell<Vec<Option<u32>>>,
    pub offers: RefCell<Vec<(String, Vec<i32>)>>,
    pub decline_end: bool,
}

impl ScriptedChooser {
    pub fn script(picks: Vec<Option<u32>>) -> Self {
        Self {
            picks: RefCell::new(picks),
            ..Self::default()
        }
    }
}

impl Chooser for ScriptedChooser {
    fn choose_card(&self, combatant: &Combatant, sorted: &[Card], _default: &Card) -> Option<u32> {
        self.offers.borrow_mut().push((
            combatant.id.clone(),
            sorted.iter().map(|card| card.value).collect(),
        ));
        let mut picks = self.picks.borrow_mut();
        if picks.is_empty() {
            None
        } else {
            picks.remove(0)
        }
    }

    fn confirm_end(&self) -> bool {
        !self.decline_end
    }
}

/// In-memory transport recording everything it is asked to persist; set
/// `fail_next` to make it reject the next update batch.
#[derive(Default)]
pub struct RecordingTransport {
    pub batches: Vec<Vec<CombatantUpdate>>,
    pub history: Vec<(u32, Vec<Combatant>)>,
    pub round_states: Vec<Vec<Combatant>>,
    pub fail_next: bool,
}

impl Transport for RecordingTransport {
    fn apply_updates(&mut self, updates: &[CombatantUpdate]) -> Result<(), TransportError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(TransportError("update batch rejected".to_string()));
        }
        self.batches.push(updates.to_vec());
        Ok(())
    }

    fn persist_history(
        &mut self,
        round: u32,
        snapshot: &[Combatant],
    ) -> Result<(), TransportError> {
        self.history.push((round, snapshot.to_vec()));
        Ok(())
    }

    fn persist_round_state(&mut self, combatants: &[Combatant]) -> Result<(), TransportError> {
        self.round_states.push(combatants.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Vec<(NoticeLevel, String)>,
    pub sounds: Vec<String>,
}

impl RecordingNotifier {
    pub fn has_level(&self, level: NoticeLevel) -> bool {
        self.notices.iter().any(|(l, _)| *l == level)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        self.notices.push((level, message.to_string()));
    }

    fn play_sound(&mut self, sound: &str) {
        self.sounds.push(sound.to_string());
    }
}

/// Clones the source combatant under suffixed ids, the way a token layer
/// spawning extra copies would.
#[derive(Default)]
pub struct SuffixTokens {
    pub duplicated: Vec<(String, u32)>,
}

impl TokenService for SuffixTokens {
    fn duplicate(&mut self, combatant: &Combatant, copies: u32) -> Vec<Combatant> {
        self.duplicated.push((combatant.id.clone(), copies));
        (0..copies)
            .map(|n| {
                let mut copy = combatant.clone();
                copy.id = format!("{}-{}", combatant.id, n + 2);
                copy
            })
            .collect()
    }

    fn sharing_token(&self, combatant: &Combatant) -> Vec<String> {
        vec![combatant.id.clone()]
    }
}

/// Records each cleanup call; ids listed in `fail_for` error out.
#[derive(Default)]
pub struct FlagCleanup {
    pub calls: Vec<String>,
    pub fail_for: Vec<String>,
}

impl ActionCleanup for FlagCleanup {
    fn remove_transient_actions(&mut self, combatant_id: &str) -> Result<(), CleanupError> {
        self.calls.push(combatant_id.to_string());
        if self.fail_for.iter().any(|id| id == combatant_id) {
            return Err(CleanupError {
                combatant: combatant_id.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

/// All scripted collaborators in one place, lent out as a `Host` per call.
#[derive(Default)]
pub struct TestHost {
    pub rules: TableRules,
    pub chooser: ScriptedChooser,
    pub transport: RecordingTransport,
    pub notifier: RecordingNotifier,
    pub tokens: SuffixTokens,
    pub cleanup: FlagCleanup,
}

impl TestHost {
    pub fn host(&mut self) -> Host<'_> {
        Host {
            rules: &self.rules,
            chooser: &self.chooser,
            transport: &mut self.transport,
            notifier: &mut self.notifier,
            tokens: &mut self.tokens,
            cleanup: &mut self.cleanup,
        }
    }
}

pub fn auto_config() -> CombatConfig {
    CombatConfig {
        auto_draw: true,
        ..CombatConfig::default()
    }
}

/// Deck whose draw pile holds exactly `values`, top first, named after their
/// value.
pub fn ordered_deck(values: &[i32]) -> Deck {
    Deck::from_cards(
        values
            .iter()
            .map(|value| Card::new(0, *value, &format!("Card {value}")))
            .collect(),
    )
}

pub fn new_state(config: CombatConfig, deck: Deck, combatants: Vec<Combatant>) -> CombatState {
    CombatState::new(config, deck, combatants, 7)
}

pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn initiative_of(state: &CombatState, id: &str) -> Option<f64> {
    state.combatant(id).and_then(|combatant| combatant.initiative)
}

pub fn card_value_of(state: &CombatState, id: &str) -> Option<f64> {
    state.combatant(id).and_then(|combatant| combatant.card_value)
}
