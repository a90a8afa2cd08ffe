// SPDX-License-Identifier: MPL-2.0
//! Load tracking for the selected image, with animated spinner.
//!
//! Every selection change starts a new probe. Probes carry a
//! [`ProbeTicket`]; a completion is only applied when its ticket matches the
//! current one, so late results for an image the user already left are
//! dropped.

use crate::error::Error;
use iced::Size;

/// Spinner rotation speed in radians per tick.
const SPINNER_SPEED: f32 = 0.1;

/// Identifies one probe of the selected image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTicket {
    pub generation: u64,
    pub index: usize,
}

/// Result of a probe as reported back to the gallery.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    /// The image decoded; carries its natural size in pixels.
    Loaded(Size<u32>),
    Failed(Error),
}

/// Loading state for the main frame.
#[derive(Debug, Clone, Default)]
pub struct State {
    is_loading: bool,
    /// i18n key describing the last failure.
    failure: Option<&'static str>,
    generation: u64,
    current: Option<ProbeTicket>,
    natural_size: Option<Size<u32>>,
    spinner_rotation: f32,
}

/// Messages for the loading state sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Probe for `index` finished.
    Finished {
        ticket: ProbeTicket,
        outcome: ProbeOutcome,
    },
    /// Animate the spinner.
    SpinnerTick,
}

/// Effects produced by the loading state.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The current image is ready.
    Loaded,
    /// The current image failed; carries the i18n-ready message.
    Failed(String),
    /// A late completion was dropped.
    Stale,
}

impl State {
    /// Resets to `{loading, no error}` and issues the ticket for the next
    /// probe of `index`.
    pub fn begin(&mut self, index: usize) -> ProbeTicket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = ProbeTicket {
            generation: self.generation,
            index,
        };
        self.is_loading = true;
        self.failure = None;
        self.natural_size = None;
        self.current = Some(ticket);
        ticket
    }

    /// Clears all state. Outstanding tickets become stale.
    pub fn clear(&mut self) {
        let generation = self.generation;
        *self = Self::default();
        self.generation = generation;
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Finished { ticket, outcome } => {
                if self.current != Some(ticket) {
                    return Effect::Stale;
                }
                self.is_loading = false;
                self.spinner_rotation = 0.0;
                match outcome {
                    ProbeOutcome::Loaded(size) => {
                        self.failure = None;
                        self.natural_size = Some(size);
                        Effect::Loaded
                    }
                    ProbeOutcome::Failed(err) => {
                        self.failure = Some(err.i18n_key());
                        Effect::Failed(err.to_string())
                    }
                }
            }
            Message::SpinnerTick => {
                if self.is_loading {
                    self.spinner_rotation += SPINNER_SPEED;
                    if self.spinner_rotation > std::f32::consts::TAU {
                        self.spinner_rotation -= std::f32::consts::TAU;
                    }
                }
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.failure.is_some()
    }

    /// i18n key of the message shown in place of a failed image.
    #[must_use]
    pub fn failure_key(&self) -> Option<&'static str> {
        self.failure
    }

    /// Ticket of the probe whose result is still awaited or was applied last.
    #[must_use]
    pub fn current_ticket(&self) -> Option<ProbeTicket> {
        self.current
    }

    /// Natural size of the current image once it has loaded.
    #[must_use]
    pub fn natural_size(&self) -> Option<Size<u32>> {
        self.natural_size
    }

    /// Get the current spinner rotation angle in radians.
    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.spinner_rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(w: u32, h: u32) -> ProbeOutcome {
        ProbeOutcome::Loaded(Size::new(w, h))
    }

    #[test]
    fn begin_resets_flags() {
        let mut state = State::default();
        let ticket = state.begin(0);
        state.handle(Message::Finished {
            ticket,
            outcome: ProbeOutcome::Failed(Error::Decode("bad".into())),
        });
        assert!(state.has_error());

        state.begin(1);
        assert!(state.is_loading());
        assert!(!state.has_error());
        assert!(state.natural_size().is_none());
    }

    #[test]
    fn success_clears_loading_and_records_size() {
        let mut state = State::default();
        let ticket = state.begin(0);
        let effect = state.handle(Message::Finished {
            ticket,
            outcome: loaded(640, 480),
        });

        assert_eq!(effect, Effect::Loaded);
        assert!(!state.is_loading());
        assert!(!state.has_error());
        assert_eq!(state.natural_size(), Some(Size::new(640, 480)));
    }

    #[test]
    fn failure_sets_error() {
        let mut state = State::default();
        let ticket = state.begin(2);
        let effect = state.handle(Message::Finished {
            ticket,
            outcome: ProbeOutcome::Failed(Error::Io("gone".into())),
        });

        assert!(matches!(effect, Effect::Failed(_)));
        assert!(!state.is_loading());
        assert!(state.has_error());
        assert_eq!(state.failure_key(), Some("gallery-load-failed"));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = State::default();
        let old = state.begin(0);
        let _current = state.begin(1);

        let effect = state.handle(Message::Finished {
            ticket: old,
            outcome: ProbeOutcome::Failed(Error::Io("late".into())),
        });

        assert_eq!(effect, Effect::Stale);
        assert!(state.is_loading());
        assert!(!state.has_error());
    }

    #[test]
    fn returning_to_same_index_uses_new_generation() {
        let mut state = State::default();
        let first = state.begin(0);
        state.begin(1);
        let again = state.begin(0);

        assert_ne!(first, again);
        assert_eq!(
            state.handle(Message::Finished {
                ticket: first,
                outcome: loaded(1, 1),
            }),
            Effect::Stale
        );
    }

    #[test]
    fn clear_invalidates_outstanding_ticket() {
        let mut state = State::default();
        let ticket = state.begin(0);
        state.clear();

        assert!(!state.is_loading());
        assert_eq!(
            state.handle(Message::Finished {
                ticket,
                outcome: loaded(1, 1),
            }),
            Effect::Stale
        );
    }

    #[test]
    fn spinner_tick_advances_rotation_only_while_loading() {
        let mut state = State::default();
        state.handle(Message::SpinnerTick);
        assert_eq!(state.spinner_rotation(), 0.0);

        state.begin(0);
        state.handle(Message::SpinnerTick);
        assert!(state.spinner_rotation() > 0.0);
    }
}
