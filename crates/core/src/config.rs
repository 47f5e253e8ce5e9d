use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortDirection {
    /// Lowest card value acts first.
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CombatConfig {
    /// Pick the best card automatically instead of consulting the chooser.
    pub auto_draw: bool,
    /// Announce draws on the event bus.
    pub messaging: bool,
    /// Clear and redraw initiative when a fresh round begins.
    pub reset_each_round: bool,
    /// Shuffle all spent cards back in at combat start and on round resets.
    pub reset_deck_on_round_start: bool,
    /// Create copies of combatants whose speed is above 1 at combat start.
    pub duplicate_on_start: bool,
    pub sort_direction: SortDirection,
    /// Tie-break distance between a group leader's card value and the value
    /// handed to its followers.
    pub follower_offset: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            auto_draw: false,
            messaging: true,
            reset_each_round: true,
            reset_deck_on_round_start: false,
            duplicate_on_start: false,
            sort_direction: SortDirection::Ascending,
            follower_offset: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: CombatConfig =
            serde_json::from_str(r#"{ "auto_draw": true, "sort_direction": "Descending" }"#)
                .unwrap();
        assert!(config.auto_draw);
        assert_eq!(config.sort_direction, SortDirection::Descending);
        assert!(config.messaging);
        assert!(config.reset_each_round);
        assert_eq!(config.follower_offset, 0.01);
    }
}
