use crate::{Card, Combatant, CombatantUpdate};
use thiserror::Error;

/// Played once per draw batch, best effort.
pub const CARD_FLIP_SOUND: &str = "assets/sounds/card-flip.wav";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("transient action cleanup failed for {combatant}: {reason}")]
pub struct CleanupError {
    pub combatant: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Game-rule lookups the engine never computes itself.
pub trait RulesProvider {
    fn cards_to_draw(&self, combatant: &Combatant) -> u32;
    fn speed(&self, combatant: &Combatant) -> u32;
}

/// Manual card selection and end-of-combat confirmation dialogs.
pub trait Chooser {
    /// `sorted` has the best card under the combatant's keep state at index
    /// 0 and `default` points at it. Returns the chosen card id; `None`
    /// means the dialog was cancelled.
    fn choose_card(&self, combatant: &Combatant, sorted: &[Card], default: &Card) -> Option<u32>;

    fn confirm_end(&self) -> bool {
        true
    }
}

/// Durable storage for combatant batches and round records. A rejected
/// batch aborts the operation before any live state changes.
pub trait Transport {
    fn apply_updates(&mut self, updates: &[CombatantUpdate]) -> Result<(), TransportError>;
    fn persist_history(&mut self, round: u32, snapshot: &[Combatant])
        -> Result<(), TransportError>;
    fn persist_round_state(&mut self, combatants: &[Combatant]) -> Result<(), TransportError>;
}

/// User-facing notices and sounds. Infallible by signature; hosts swallow
/// their own delivery failures.
pub trait Notifier {
    fn notify(&mut self, level: NoticeLevel, message: &str);

    fn play_sound(&mut self, _sound: &str) {}
}

/// Token-level duplication of combatants that act more than once per round.
pub trait TokenService {
    fn duplicate(&mut self, combatant: &Combatant, copies: u32) -> Vec<Combatant>;

    /// Ids of all combatants driven by the same token, the queried one
    /// included.
    fn sharing_token(&self, combatant: &Combatant) -> Vec<String>;
}

/// Strips transient per-round statuses kept outside the combat record.
pub trait ActionCleanup {
    fn remove_transient_actions(&mut self, combatant_id: &str) -> Result<(), CleanupError>;
}

/// The collaborators an operation may call, passed in per call so the core
/// holds no host handles of its own.
pub struct Host<'a> {
    pub rules: &'a dyn RulesProvider,
    pub chooser: &'a dyn Chooser,
    pub transport: &'a mut dyn Transport,
    pub notifier: &'a mut dyn Notifier,
    pub tokens: &'a mut dyn TokenService,
    pub cleanup: &'a mut dyn ActionCleanup,
}
