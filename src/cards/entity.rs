//! Card entity: the per-card flip state machine.
//!
//! ```text
//!   Hidden --tap--> Flipping --done--> Revealed --delay--> FlippingBack --done--> Hidden
//!                                         |
//!                                         +--match--> Matched (terminal for the round)
//! ```
//!
//! `Disabled` removes a card from input while letting any in-flight
//! transition finish. Completing a reveal is the only event a card reports;
//! match and mismatch decisions belong to the round controller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data::{CardData, PairKey};
use crate::core::task::{CancelToken, Delay, DelayStatus, Tween};
use crate::core::CardSlot;

/// Flip lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    Flipping,
    Revealed,
    FlippingBack,
    Matched,
    Disabled,
}

/// Events a card reports upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardEvent {
    /// The face-up transition finished.
    Revealed(CardSlot),
}

/// Behaviour for cards the player can turn over.
pub trait Revealable {
    /// Player tap. Starts the face-up transition if the card is hidden and
    /// interactive; any other state ignores the tap.
    fn tap(&mut self) -> bool;

    /// Turn the card back after `delay` of unpaused time.
    ///
    /// Cancels a previously scheduled flip-back first. Returns the token of
    /// the new task, or `None` if the card cannot be turned back from its
    /// current state.
    fn schedule_flip_back(&mut self, delay: Duration) -> Option<CancelToken>;

    /// Cancel a pending flip-back, if any.
    fn cancel_flip_back(&mut self);

    /// Freeze or resume in-flight transitions and delays.
    fn set_paused(&mut self, paused: bool);

    /// Advance transitions and delays by `dt`.
    fn tick(&mut self, dt: Duration) -> Option<CardEvent>;
}

/// Behaviour for entities recycled by the board pool.
pub trait Poolable {
    /// Attach this round's data.
    fn assign(&mut self, data: CardData);

    /// Clear round data and return to `Hidden`, interactive, with no tasks.
    fn recycle(&mut self);

    /// Does the entity currently carry round data?
    fn is_assigned(&self) -> bool;
}

/// A pooled card.
#[derive(Debug)]
pub struct CardEntity {
    slot: CardSlot,
    data: Option<CardData>,
    state: CardState,
    interactive: bool,
    paused: bool,
    flip_duration: Duration,
    /// In-flight face-up or face-down transition.
    animation: Option<Tween>,
    flip_back: Option<Delay>,
    flip_back_token: Option<CancelToken>,
}

impl CardEntity {
    /// Create an unassigned, hidden card.
    #[must_use]
    pub fn new(slot: CardSlot, flip_duration: Duration) -> Self {
        Self {
            slot,
            data: None,
            state: CardState::Hidden,
            interactive: true,
            paused: false,
            flip_duration,
            animation: None,
            flip_back: None,
            flip_back_token: None,
        }
    }

    #[must_use]
    pub fn slot(&self) -> CardSlot {
        self.slot
    }

    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    #[must_use]
    pub fn data(&self) -> Option<&CardData> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn pair_key(&self) -> Option<PairKey> {
        self.data.as_ref().map(|d| d.pair_key)
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Elapsed fraction of the in-flight transition, if any.
    #[must_use]
    pub fn progress(&self) -> Option<f32> {
        self.animation.as_ref().map(Tween::fraction)
    }

    /// Is a flip-back scheduled?
    #[must_use]
    pub fn has_pending_flip_back(&self) -> bool {
        self.flip_back.is_some()
    }

    /// Lock the card face-up as part of a confirmed pair.
    pub fn mark_matched(&mut self) {
        self.cancel_flip_back();
        self.interactive = false;
        self.animation = None;
        self.state = CardState::Matched;
    }

    /// Close the card to input but leave its state alone, so a card turning
    /// face-down still lands on `Hidden`.
    pub fn lock(&mut self) {
        self.cancel_flip_back();
        self.interactive = false;
    }

    /// Exclude the card from input. An in-flight transition still completes.
    pub fn disable(&mut self) {
        self.cancel_flip_back();
        self.interactive = false;
        self.state = CardState::Disabled;
    }

    fn start_transition(&mut self, next: CardState) {
        self.state = next;
        self.animation = Some(Tween::new(self.flip_duration));
    }

    /// Advance the current transition. Returns `true` when it completes on this step.
    fn advance_animation(&mut self, dt: Duration) -> bool {
        let done = self.animation.as_mut().is_some_and(|tween| tween.advance(dt));
        if done {
            self.animation = None;
        }
        done
    }
}

impl Revealable for CardEntity {
    fn tap(&mut self) -> bool {
        if !self.interactive || self.state != CardState::Hidden || self.data.is_none() {
            return false;
        }
        self.start_transition(CardState::Flipping);
        true
    }

    fn schedule_flip_back(&mut self, delay: Duration) -> Option<CancelToken> {
        if !matches!(self.state, CardState::Flipping | CardState::Revealed) {
            return None;
        }
        self.cancel_flip_back();
        let task = Delay::new(delay);
        let token = task.token();
        self.flip_back = Some(task);
        self.flip_back_token = Some(token.clone());
        Some(token)
    }

    fn cancel_flip_back(&mut self) {
        if let Some(token) = self.flip_back_token.take() {
            token.cancel();
        }
        self.flip_back = None;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn tick(&mut self, dt: Duration) -> Option<CardEvent> {
        if self.paused {
            return None;
        }

        match self.state {
            CardState::Flipping => {
                if self.advance_animation(dt) {
                    self.state = CardState::Revealed;
                    return Some(CardEvent::Revealed(self.slot));
                }
            }
            CardState::Revealed => {
                // The delay only counts down once the card is fully face-up.
                let status = self.flip_back.as_mut().map(|task| task.advance(dt));
                match status {
                    Some(DelayStatus::Elapsed) => {
                        self.flip_back = None;
                        self.flip_back_token = None;
                        self.start_transition(CardState::FlippingBack);
                    }
                    Some(DelayStatus::Cancelled) => {
                        self.flip_back = None;
                        self.flip_back_token = None;
                    }
                    Some(DelayStatus::Pending) | None => {}
                }
            }
            CardState::FlippingBack => {
                if self.advance_animation(dt) {
                    self.state = CardState::Hidden;
                }
            }
            CardState::Disabled => {
                self.advance_animation(dt);
            }
            CardState::Hidden | CardState::Matched => {}
        }
        None
    }
}

impl Poolable for CardEntity {
    fn assign(&mut self, data: CardData) {
        self.data = Some(data);
    }

    fn recycle(&mut self) {
        self.cancel_flip_back();
        self.data = None;
        self.state = CardState::Hidden;
        self.interactive = true;
        self.paused = false;
        self.animation = None;
    }

    fn is_assigned(&self) -> bool {
        self.data.is_some()
    }
}
