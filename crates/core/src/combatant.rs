use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum KeepState {
    #[default]
    Highest,
    Lowest,
}

impl KeepState {
    /// Sort key modifier so that index 0 always wins after sorting.
    pub fn modifier(self) -> i32 {
        match self {
            Self::Highest => -1,
            Self::Lowest => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Combatant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub initiative: Option<f64>,
    #[serde(default)]
    pub card_value: Option<f64>,
    #[serde(default)]
    pub card_name: Option<String>,
    /// Id of the group leader this combatant follows, if any.
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group_leader: bool,
    #[serde(default)]
    pub lock_initiative: bool,
    #[serde(default)]
    pub defeated: bool,
    #[serde(default)]
    pub keep_state: KeepState,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub fast_action: bool,
    #[serde(default)]
    pub slow_action: bool,
}

impl Combatant {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            initiative: None,
            card_value: None,
            card_name: None,
            group_id: None,
            group_leader: false,
            lock_initiative: false,
            defeated: false,
            keep_state: KeepState::Highest,
            hidden: false,
            fast_action: false,
            slow_action: false,
        }
    }

    pub fn has_drawn(&self) -> bool {
        self.initiative.is_some()
    }

    pub fn is_follower(&self) -> bool {
        self.group_id.is_some() && !self.group_leader
    }

    pub fn reset_initiative(&mut self) {
        self.initiative = None;
        self.card_value = None;
        self.card_name = None;
    }
}

/// One entry of a staged combatant batch. Batches go through the transport
/// first and are applied to the live set only after it accepts them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CombatantUpdate {
    Initiative {
        id: String,
        initiative: f64,
        card_value: f64,
        card_name: String,
    },
    ClearInitiative { id: String },
    ClearActionFlags { id: String },
}

impl CombatantUpdate {
    pub fn id(&self) -> &str {
        match self {
            Self::Initiative { id, .. } => id,
            Self::ClearInitiative { id } => id,
            Self::ClearActionFlags { id } => id,
        }
    }
}
