use crate::{Card, Chooser, Combatant};

/// Resolves a draw to exactly one winning card. Candidates are sorted so the
/// best card under the combatant's keep state sits at index 0; with
/// `auto_draw` (or a single candidate) that card wins outright, otherwise the
/// chooser picks and cancellation or an unknown id falls back to the best
/// card. Returns `None` only for an empty candidate set.
pub fn select_card(
    combatant: &Combatant,
    mut candidates: Vec<Card>,
    auto_draw: bool,
    chooser: &dyn Chooser,
) -> Option<Card> {
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by_key(|card| card.value * combatant.keep_state.modifier());
    if candidates.len() == 1 || auto_draw {
        return Some(candidates.swap_remove(0));
    }
    let index = chooser
        .choose_card(combatant, &candidates, &candidates[0])
        .and_then(|id| candidates.iter().position(|card| card.id == id))
        .unwrap_or(0);
    Some(candidates.swap_remove(index))
}
