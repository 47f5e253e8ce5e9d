use crate::{Card, RngState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("not enough cards: requested {requested}, available {available}")]
    InsufficientCards { requested: usize, available: usize },
}

/// Initiative deck. The top of the draw pile is the end of the vector.
/// Drawn cards move to the discard pile immediately; participants only
/// keep the value and name of the card they won.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn numbered(count: u32) -> Self {
        let mut draw = Vec::with_capacity(count as usize);
        for n in 1..=count {
            draw.push(Card::new(n, n as i32, &format!("Card {}", n)));
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    /// Builds a draw pile from cards listed top first. Cards with id 0 get
    /// sequential ids.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut draw = cards;
        draw.reverse();
        let mut next_id = draw.iter().map(|card| card.id).max().unwrap_or(0);
        for card in &mut draw {
            if card.id == 0 {
                next_id = next_id.saturating_add(1);
                card.id = next_id;
            }
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn available(&self) -> usize {
        self.draw.len()
    }

    pub fn size(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    /// Draws `count` cards from the top of the draw pile. Fails without
    /// touching the piles when the draw pile is short; the deck never
    /// reshuffles on its own.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.draw.len() {
            return Err(DeckError::InsufficientCards {
                requested: count,
                available: self.draw.len(),
            });
        }
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(card) = self.draw.pop() {
                self.discard.push(card.clone());
                cards.push(card);
            }
        }
        Ok(cards)
    }

    /// Returns every card to the draw pile except those whose value is
    /// excluded; excluded cards stay in the discard pile.
    pub fn reset(&mut self, shuffle: bool, excluded_values: &[i32], rng: &mut RngState) {
        let mut pool = std::mem::take(&mut self.draw);
        pool.append(&mut self.discard);
        for card in pool {
            if excluded_values.contains(&card.value) {
                self.discard.push(card);
            } else {
                self.draw.push(card);
            }
        }
        if shuffle {
            self.shuffle(rng);
        }
    }

    /// Looks a card up by value across both piles.
    pub fn find_by_value(&self, value: i32) -> Option<&Card> {
        self.draw
            .iter()
            .chain(self.discard.iter())
            .find(|card| card.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(cards: &[Card]) -> Vec<i32> {
        cards.iter().map(|card| card.value).collect()
    }

    #[test]
    fn draws_from_the_top_in_listed_order() {
        let mut deck = Deck::from_cards(vec![
            Card::new(0, 3, "Three"),
            Card::new(0, 7, "Seven"),
            Card::new(0, 2, "Two"),
        ]);
        let first = deck.draw(1).unwrap();
        assert_eq!(values(&first), vec![3]);
        let rest = deck.draw(2).unwrap();
        assert_eq!(values(&rest), vec![7, 2]);
        assert_eq!(deck.available(), 0);
        assert_eq!(deck.size(), 3);
    }

    #[test]
    fn short_draw_fails_without_mutating() {
        let mut deck = Deck::numbered(2);
        let err = deck.draw(3).unwrap_err();
        assert_eq!(
            err,
            DeckError::InsufficientCards {
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(deck.available(), 2);
        assert!(deck.discard.is_empty());
    }

    #[test]
    fn drawn_cards_land_in_the_discard_pile() {
        let mut deck = Deck::numbered(5);
        deck.draw(2).unwrap();
        assert_eq!(deck.available(), 3);
        assert_eq!(deck.discard.len(), 2);
    }

    #[test]
    fn reset_keeps_excluded_values_out_of_circulation() {
        let mut rng = RngState::from_seed(1);
        let mut deck = Deck::numbered(5);
        deck.draw(4).unwrap();
        deck.reset(false, &[2, 4], &mut rng);
        assert_eq!(deck.available(), 3);
        assert_eq!(deck.discard.len(), 2);
        assert!(deck.draw.iter().all(|card| card.value != 2 && card.value != 4));
        assert!(deck.discard.iter().all(|card| card.value == 2 || card.value == 4));
    }

    #[test]
    fn find_by_value_searches_both_piles() {
        let mut deck = Deck::numbered(3);
        deck.draw(2).unwrap();
        assert!(deck.find_by_value(3).is_some());
        assert!(deck.find_by_value(1).is_some());
        assert!(deck.find_by_value(9).is_none());
    }

    #[test]
    fn from_cards_assigns_missing_ids() {
        let deck = Deck::from_cards(vec![Card::new(5, 1, "One"), Card::new(0, 2, "Two")]);
        assert!(deck.draw.iter().all(|card| card.id != 0));
        let ids: Vec<u32> = deck.draw.iter().map(|card| card.id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}
