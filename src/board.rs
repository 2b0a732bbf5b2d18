//! Application state: both card collections, the active mode and settings
//!
//! `Board` is the single owner of this state. Every command mutates it and
//! then persists through the injected `Persistence` before returning, so the
//! caller can re-render from the return value.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::persistence::{KeyValueStore, Persistence};
use crate::reorder::{reorder_cards, DropSide};
use crate::types::{Card, CardDraft, Mode};

/// Outcome of `Board::switch_mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSwitch {
    Unchanged,
    Switched(Mode),
}

/// Issues strictly increasing millisecond-timestamp ids
#[derive(Debug, Default)]
struct IdGenerator {
    last: u128,
}

impl IdGenerator {
    /// Seed past every numeric id already in use
    fn seeded<'a>(existing: impl Iterator<Item = &'a Card>) -> Self {
        let last = existing
            .filter_map(|c| c.id.parse::<u128>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    fn next_at(&mut self, now_millis: u128) -> String {
        self.last = now_millis.max(self.last + 1);
        self.last.to_string()
    }

    fn next(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.next_at(now)
    }
}

pub struct Board<S> {
    persistence: Persistence<S>,
    web: Vec<Card>,
    folders: Vec<Card>,
    mode: Mode,
    settings: Settings,
    ids: IdGenerator,
}

impl<S: KeyValueStore> Board<S> {
    /// Migrate legacy records, then load everything once
    pub fn load(mut persistence: Persistence<S>) -> Self {
        persistence.migrate_legacy();

        let web = persistence.load_cards(Mode::Web);
        let folders = persistence.load_cards(Mode::Folders);
        let mode = persistence.load_mode();
        let settings = persistence.load_settings();
        let ids = IdGenerator::seeded(web.iter().chain(folders.iter()));

        info!(
            web = web.len(),
            folders = folders.len(),
            mode = %mode,
            "Board loaded"
        );

        Self {
            persistence,
            web,
            folders,
            mode,
            settings,
            ids,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active collection in display order
    pub fn list(&self) -> &[Card] {
        self.cards(self.mode)
    }

    pub fn cards(&self, mode: Mode) -> &[Card] {
        match mode {
            Mode::Web => &self.web,
            Mode::Folders => &self.folders,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.list().iter().find(|c| c.id == id)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Append a new card to the active collection
    ///
    /// The target is stored as given; callers validate and normalize it.
    pub fn add(&mut self, draft: CardDraft) -> Card {
        let card = Card::from_draft(self.ids.next(), draft);
        info!(card_id = %card.id, mode = %self.mode, target = %card.target, "Adding card");
        self.active_mut().push(card.clone());
        self.persist_cards();
        card
    }

    /// Replace every field but `id`; `None` if the id is not in the active collection
    pub fn update(&mut self, id: &str, draft: CardDraft) -> Option<Card> {
        let Some(card) = self.active_mut().iter_mut().find(|c| c.id == id) else {
            debug!(card_id = %id, "Update for unknown card ignored");
            return None;
        };
        card.apply(draft);
        let updated = card.clone();
        info!(card_id = %id, mode = %self.mode, "Updated card");
        self.persist_cards();
        Some(updated)
    }

    /// Remove a card from the active collection; false if it was not there
    pub fn remove(&mut self, id: &str) -> bool {
        let cards = self.active_mut();
        let before = cards.len();
        cards.retain(|c| c.id != id);
        if cards.len() == before {
            debug!(card_id = %id, "Delete for unknown card ignored");
            return false;
        }
        info!(card_id = %id, mode = %self.mode, "Deleted card");
        self.persist_cards();
        true
    }

    /// Apply a drag-and-drop reorder to the active collection
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str, side: DropSide) -> bool {
        if !reorder_cards(self.active_mut(), dragged_id, target_id, side) {
            return false;
        }
        debug!(dragged = %dragged_id, target = %target_id, side = ?side, "Reordered cards");
        self.persist_cards();
        true
    }

    /// Make `mode` active; switching to the current mode is a no-op
    pub fn switch_mode(&mut self, mode: Mode) -> ModeSwitch {
        if mode == self.mode {
            return ModeSwitch::Unchanged;
        }
        info!(from = %self.mode, to = %mode, "Switching mode");
        self.mode = mode;
        if let Err(e) = self.persistence.save_mode(mode) {
            error!(error = ?e, "Failed to persist active mode");
        }
        ModeSwitch::Switched(mode)
    }

    /// Edit settings in place, then clamp and persist
    pub fn update_settings(&mut self, edit: impl FnOnce(&mut Settings)) -> &Settings {
        let before = self.settings.clone();
        edit(&mut self.settings);
        self.settings.validate_and_clamp();
        if self.settings != before
            && let Err(e) = self.persistence.save_settings(&self.settings)
        {
            error!(error = ?e, "Failed to persist settings");
        }
        &self.settings
    }

    fn active_mut(&mut self) -> &mut Vec<Card> {
        match self.mode {
            Mode::Web => &mut self.web,
            Mode::Folders => &mut self.folders,
        }
    }

    /// Write the active collection back; failures are logged, state is kept
    fn persist_cards(&mut self) {
        let cards = match self.mode {
            Mode::Web => &self.web,
            Mode::Folders => &self.folders,
        };
        if let Err(e) = self.persistence.save_cards(self.mode, cards) {
            error!(error = ?e, mode = %self.mode, "Failed to persist cards");
        }
    }
}
