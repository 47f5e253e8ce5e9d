use super::*;
use crate::*;

impl CombatState {
    /// Draws initiative cards for the given combatants, in input order.
    /// Defeated, locked and follower combatants are skipped; group leaders
    /// hand their card down to their followers with a tie-break offset on
    /// the card value. All resulting updates go through the transport as one
    /// batch before the live set changes.
    pub fn roll_initiative(
        &mut self,
        ids: &[String],
        options: RollOptions,
        host: &mut Host<'_>,
        events: &mut EventBus,
    ) -> Result<(), CombatError> {
        for id in ids {
            if self.combatant(id).is_none() {
                return Err(CombatError::UnknownCombatant(id.clone()));
            }
        }

        let focused = self
            .current_combatant()
            .map(|combatant| combatant.id.clone());
        let mut updates = Vec::new();
        let mut records = Vec::new();

        for id in ids {
            let Some(combatant) = self.combatant(id) else {
                continue;
            };
            if combatant.defeated || combatant.is_follower() || combatant.lock_initiative {
                continue;
            }
            let combatant = combatant.clone();

            let requested = host.rules.cards_to_draw(&combatant).max(1) as usize;
            if requested > self.deck.available() {
                host.notifier.notify(
                    NoticeLevel::Info,
                    "draw pile exhausted, shuffling spent cards back in",
                );
                self.deck.reset(true, &[], &mut self.rng);
                events.push(Event::DeckReset {
                    available: self.deck.available(),
                });
            }
            let count = requested.min(self.deck.available());
            let mut candidates = self.deck.draw(count)?;
            if candidates.len() != requested {
                host.notifier.notify(
                    NoticeLevel::Warning,
                    &format!(
                        "{} drew {} of {} cards",
                        combatant.name,
                        candidates.len(),
                        requested
                    ),
                );
            }
            // A redraw keeps the previously held card in the running.
            if combatant.has_drawn() {
                if let Some(value) = combatant.card_value {
                    if let Some(previous) = self.deck.find_by_value(value as i32) {
                        candidates.push(previous.clone());
                    }
                }
            }

            let Some(card) =
                select_card(&combatant, candidates, self.config.auto_draw, host.chooser)
            else {
                return Err(CombatError::EmptyDeck);
            };

            updates.push(CombatantUpdate::Initiative {
                id: combatant.id.clone(),
                initiative: card.value as f64,
                card_value: card.value as f64,
                card_name: card.name.clone(),
            });
            if combatant.group_leader {
                let offset = match self.config.sort_direction {
                    SortDirection::Ascending => self.config.follower_offset,
                    SortDirection::Descending => -self.config.follower_offset,
                };
                for follower in self
                    .combatants
                    .iter()
                    .filter(|other| other.group_id.as_deref() == Some(id.as_str()))
                {
                    updates.push(CombatantUpdate::Initiative {
                        id: follower.id.clone(),
                        initiative: card.value as f64,
                        card_value: card.value as f64 + offset,
                        card_name: card.name.clone(),
                    });
                }
            }

            records.push(Event::InitiativeDrawn {
                combatant: combatant.id.clone(),
                name: combatant.name.clone(),
                card_value: card.value,
                card_name: card.name,
                hidden: combatant.hidden,
            });
        }

        if !updates.is_empty() {
            host.transport.apply_updates(&updates)?;
            self.apply_batch(&updates);
        }

        if options.commit_turn {
            if let Some(focused) = focused {
                let position = self
                    .turn_order()
                    .iter()
                    .position(|combatant| combatant.id == focused);
                self.turn = position.unwrap_or(0);
            }
        } else if options.new_round {
            self.turn = 0;
        }

        let drew = !records.is_empty();
        if self.config.messaging {
            for record in records {
                events.push(record);
            }
        }
        if drew {
            host.notifier.play_sound(CARD_FLIP_SOUND);
        }
        Ok(())
    }
}
