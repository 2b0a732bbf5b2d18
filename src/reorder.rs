//! Drag-and-drop reordering of cards
//!
//! `DragReorder` turns pointer gestures into at most one `ReorderRequest` per
//! drag; `reorder_cards` applies a request to an ordered card list.

use tracing::debug;

use crate::types::Card;

/// Which side of the hovered card the dragged card lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

impl DropSide {
    /// Above the card's vertical midpoint inserts before, otherwise after
    pub fn from_pointer(pointer_y: f32, card_top: f32, card_height: f32) -> Self {
        if pointer_y < card_top + card_height / 2.0 {
            DropSide::Before
        } else {
            DropSide::After
        }
    }
}

/// A card under the pointer and the resolved insertion side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub card_id: String,
    pub side: DropSide,
}

impl DropTarget {
    pub fn at(card_id: &str, pointer_y: f32, card_top: f32, card_height: f32) -> Self {
        Self {
            card_id: card_id.to_string(),
            side: DropSide::from_pointer(pointer_y, card_top, card_height),
        }
    }
}

/// Completed gesture to apply to the active collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    pub dragged_id: String,
    pub target_id: String,
    pub side: DropSide,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        card_id: String,
        hover: Option<DropTarget>,
    },
}

/// Per-gesture drag state machine
#[derive(Debug, Default)]
pub struct DragReorder {
    state: DragState,
}

impl DragReorder {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn dragged_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { card_id, .. } => Some(card_id),
            DragState::Idle => None,
        }
    }

    /// Current insertion indicator, if any
    pub fn hover(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Dragging { hover, .. } => hover.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Idle -> Dragging
    pub fn grab(&mut self, card_id: &str) {
        debug!(card_id = %card_id, "Drag started");
        self.state = DragState::Dragging {
            card_id: card_id.to_string(),
            hover: None,
        };
    }

    /// Recompute the indicator for the card under the pointer
    ///
    /// `None` (pointer over no card) or hovering the dragged card clears it.
    pub fn hover_over(&mut self, target: Option<DropTarget>) {
        if let DragState::Dragging { card_id, hover } = &mut self.state {
            *hover = target.filter(|t| t.card_id != *card_id);
        }
    }

    /// Dragging -> Idle, yielding a reorder when dropped on another card
    pub fn release(&mut self, target: Option<DropTarget>) -> Option<ReorderRequest> {
        let DragState::Dragging { card_id, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let target = target?;
        if target.card_id == card_id {
            debug!(card_id = %card_id, "Dropped on itself, ignoring");
            return None;
        }
        Some(ReorderRequest {
            dragged_id: card_id,
            target_id: target.card_id,
            side: target.side,
        })
    }

    /// Dragging -> Idle without a mutation
    pub fn cancel(&mut self) {
        if let DragState::Dragging { card_id, .. } = &self.state {
            debug!(card_id = %card_id, "Drag cancelled");
        }
        self.state = DragState::Idle;
    }
}

/// Move `dragged_id` next to `target_id`
///
/// The dragged card is removed first and the target re-located afterwards, so a
/// target that sat after the dragged card is still addressed correctly.
/// Returns false (and leaves `cards` untouched) if either id is missing or they match.
pub fn reorder_cards(cards: &mut Vec<Card>, dragged_id: &str, target_id: &str, side: DropSide) -> bool {
    if dragged_id == target_id {
        return false;
    }
    let Some(from) = cards.iter().position(|c| c.id == dragged_id) else {
        return false;
    };
    if !cards.iter().any(|c| c.id == target_id) {
        return false;
    }

    let dragged = cards.remove(from);
    let Some(target_index) = cards.iter().position(|c| c.id == target_id) else {
        cards.insert(from, dragged);
        return false;
    };
    let insert_at = match side {
        DropSide::Before => target_index,
        DropSide::After => target_index + 1,
    };
    cards.insert(insert_at, dragged);
    true
}
