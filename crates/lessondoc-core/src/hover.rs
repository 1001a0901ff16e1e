//! Hover-card open/closed state
//!
//! Each reference card owns one of these. Transitions are edge-triggered:
//! entering or focusing the card opens it, leaving or blurring closes it.
//! No state is shared between cards.

use serde::{Deserialize, Serialize};

/// Whether a card's popover is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverState {
    #[default]
    Closed,
    Open,
}

/// Interaction events a card reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    PointerEnter,
    PointerLeave,
    Focus,
    Blur,
    TouchStart,
    TouchEnd,
}

impl HoverState {
    /// Next state after `event`
    pub fn transition(self, event: HoverEvent) -> Self {
        match event {
            HoverEvent::PointerEnter | HoverEvent::Focus | HoverEvent::TouchStart => {
                HoverState::Open
            }
            HoverEvent::PointerLeave | HoverEvent::Blur | HoverEvent::TouchEnd => {
                HoverState::Closed
            }
        }
    }

    pub fn is_open(self) -> bool {
        self == HoverState::Open
    }

    /// Attribute value used in rendered markup
    pub fn as_str(self) -> &'static str {
        match self {
            HoverState::Closed => "closed",
            HoverState::Open => "open",
        }
    }
}
