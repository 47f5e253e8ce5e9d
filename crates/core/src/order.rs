use crate::{Combatant, SortDirection};
use std::cmp::Ordering;

/// Turn-order comparator. Carded combatants sort by card value under the
/// configured direction; a carded combatant always sorts before an uncarded
/// one; uncarded combatants fall back to name, then id. This keeps the
/// ordering a strict weak ordering even while some combatants still hold no
/// card.
pub fn compare(a: &Combatant, b: &Combatant, direction: SortDirection) -> Ordering {
    match (a.card_value, b.card_value) {
        (Some(lhs), Some(rhs)) => match direction {
            SortDirection::Ascending => lhs.total_cmp(&rhs),
            SortDirection::Descending => rhs.total_cmp(&lhs),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)),
    }
}
