use super::*;
use crate::*;

impl CombatState {
    pub fn start_combat(
        &mut self,
        host: &mut Host<'_>,
        events: &mut EventBus,
    ) -> Result<(), CombatError> {
        if self.phase != CombatPhase::Idle {
            return Err(CombatError::InvalidPhase(self.phase));
        }

        if self.config.duplicate_on_start {
            let mut spawned = Vec::new();
            for combatant in &self.combatants {
                let speed = host.rules.speed(combatant);
                if speed <= 1 {
                    continue;
                }
                let present = (host.tokens.sharing_token(combatant).len() as u32).max(1);
                let missing = speed.saturating_sub(present);
                if missing > 0 {
                    spawned.extend(host.tokens.duplicate(combatant, missing));
                }
            }
            self.combatants.extend(spawned);
        }

        if self.config.reset_deck_on_round_start {
            self.deck.reset(true, &[], &mut self.rng);
            events.push(Event::DeckReset {
                available: self.deck.available(),
            });
        }

        self.phase = CombatPhase::Active;
        self.round = 1;
        self.turn = 0;

        if self.config.auto_draw {
            let ids: Vec<String> = self
                .combatants
                .iter()
                .filter(|combatant| !combatant.defeated && !combatant.has_drawn())
                .map(|combatant| combatant.id.clone())
                .collect();
            self.roll_initiative(&ids, RollOptions::default(), host, events)?;
        }

        events.push(Event::CombatStarted {
            combatants: self.combatants.len(),
        });
        Ok(())
    }

    /// Ends the round: snapshots the leaving round, clears transient action
    /// flags, then either restores a snapshot already captured for the new
    /// round or starts it fresh.
    pub fn next_round(
        &mut self,
        host: &mut Host<'_>,
        events: &mut EventBus,
    ) -> Result<(), CombatError> {
        if self.phase != CombatPhase::Active {
            return Err(CombatError::InvalidPhase(self.phase));
        }

        // The snapshot keeps the action flags as the round left them.
        let snapshot = self.combatants.clone();
        host.transport.persist_history(self.round, &snapshot)?;
        self.history.capture(self.round, snapshot);

        self.clear_action_flags(host)?;

        self.round = self.round.saturating_add(1);
        self.turn = 0;

        let restored = self.restore_round(host)?;
        if !restored && self.config.reset_each_round {
            self.reset_round(host, events)?;
        }

        events.push(Event::RoundAdvanced {
            round: self.round,
            restored,
        });
        Ok(())
    }

    pub fn previous_round(
        &mut self,
        host: &mut Host<'_>,
        events: &mut EventBus,
    ) -> Result<(), CombatError> {
        if self.phase != CombatPhase::Active {
            return Err(CombatError::InvalidPhase(self.phase));
        }

        let snapshot = self.combatants.clone();
        host.transport.persist_history(self.round, &snapshot)?;
        self.history.capture(self.round, snapshot);

        self.round = self.round.saturating_sub(1).max(1);
        self.turn = 0;

        let restored = self.restore_round(host)?;
        events.push(Event::RoundRegressed {
            round: self.round,
            restored,
        });
        Ok(())
    }

    /// Clears initiative for every combatant except those holding a locked
    /// card while still standing.
    pub fn reset_all(
        &mut self,
        host: &mut Host<'_>,
        events: &mut EventBus,
    ) -> Result<(), CombatError> {
        let updates: Vec<CombatantUpdate> = self
            .combatants
            .iter()
            .filter(|combatant| !(combatant.lock_initiative && !combatant.defeated))
            .map(|combatant| CombatantUpdate::ClearInitiative {
                id: combatant.id.clone(),
            })
            .collect();
        if !updates.is_empty() {
            host.transport.apply_updates(&updates)?;
            self.apply_batch(&updates);
        }
        self.turn = 0;
        host.transport.persist_round_state(&self.combatants)?;
        events.push(Event::InitiativeCleared {
            combatants: updates.len(),
        });
        Ok(())
    }

    pub fn end_combat(
        &mut self,
        host: &mut Host<'_>,
        events: &mut EventBus,
    ) -> Result<(), CombatError> {
        if self.phase != CombatPhase::Active {
            return Err(CombatError::InvalidPhase(self.phase));
        }
        if !host.chooser.confirm_end() {
            return Ok(());
        }

        self.phase = CombatPhase::Ended;
        for combatant in &mut self.combatants {
            if let Err(err) = host.cleanup.remove_transient_actions(&combatant.id) {
                host.notifier.notify(NoticeLevel::Error, &err.to_string());
            }
            combatant.fast_action = false;
            combatant.slow_action = false;
        }

        events.push(Event::CombatEnded { round: self.round });
        Ok(())
    }

    fn clear_action_flags(&mut self, host: &mut Host<'_>) -> Result<(), CombatError> {
        for combatant in &self.combatants {
            if let Err(err) = host.cleanup.remove_transient_actions(&combatant.id) {
                host.notifier.notify(NoticeLevel::Error, &err.to_string());
            }
        }
        let updates: Vec<CombatantUpdate> = self
            .combatants
            .iter()
            .map(|combatant| CombatantUpdate::ClearActionFlags {
                id: combatant.id.clone(),
            })
            .collect();
        if updates.is_empty() {
            return Ok(());
        }
        host.transport.apply_updates(&updates)?;
        self.apply_batch(&updates);
        Ok(())
    }

    fn restore_round(&mut self, host: &mut Host<'_>) -> Result<bool, CombatError> {
        let Some(snapshot) = self.history.restore(self.round) else {
            return Ok(false);
        };
        host.transport.persist_round_state(&snapshot)?;
        self.combatants = snapshot;
        Ok(true)
    }

    fn reset_round(&mut self, host: &mut Host<'_>, events: &mut EventBus) -> Result<(), CombatError> {
        self.reset_all(host, events)?;

        if self.config.reset_deck_on_round_start {
            let locked: Vec<i32> = self
                .combatants
                .iter()
                .filter(|combatant| combatant.lock_initiative)
                .filter_map(|combatant| combatant.card_value.map(|value| value as i32))
                .collect();
            self.deck.reset(true, &locked, &mut self.rng);
            events.push(Event::DeckReset {
                available: self.deck.available(),
            });
        }

        if self.config.auto_draw {
            let ids: Vec<String> = self
                .combatants
                .iter()
                .map(|combatant| combatant.id.clone())
                .collect();
            let options = RollOptions {
                commit_turn: false,
                new_round: true,
            };
            self.roll_initiative(&ids, options, host, events)?;
        }
        Ok(())
    }
}
