// Typewriter placeholder state machine
//
// Types a text one character at a time, holds it, deletes it, then moves to
// the next text. Forever. Each step rewrites exactly one string: the
// placeholder of the chat input.
//
//   start ──start_delay──▶ [typing] ──type_speed──▶ [typing] ... full text
//                              ▲                                  │
//                              │                               pause
//                              │                                  ▼
//                        type_speed ◀── empty ◀──delete_speed── [deleting]
//                        (next text)
//
// Timing goes through the Scheduler. Only one timer is ever pending; pause
// cancels it, so a paused rotator has nothing left in the queue.

use crate::config::{TypewriterConfig, MIN_STEP};
use crate::error::PageError;
use crate::scheduler::{Scheduler, TimerId};
use crate::util::{char_len, char_prefix};
use std::time::Duration;

/// Timer payloads owned by the rotator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotatorTimer {
    /// Start delay elapsed
    Start,
    /// Type or delete the next character
    Step,
    /// Hold after a full text elapsed; switch to deleting
    BeginDelete,
}

/// Typewriter placeholder animation
#[derive(Debug)]
pub struct TextRotator {
    texts: Vec<String>,
    type_speed: Duration,
    delete_speed: Duration,
    pause: Duration,
    start_delay: Duration,

    text_index: usize,
    /// Characters of the current text rendered so far
    char_index: usize,
    deleting: bool,
    active: bool,

    /// Rendered placeholder
    placeholder: String,
    /// The one pending timer, if any
    pending: Option<TimerId>,
}

impl TextRotator {
    /// Build a rotator from config
    ///
    /// Fails with `MissingElement` when there is nothing to display: no texts,
    /// or an empty text (which would stall the cycle).
    pub fn new(config: &TypewriterConfig) -> Result<Self, PageError> {
        if config.texts.is_empty() {
            return Err(PageError::missing("Typewriter", "no texts configured"));
        }
        if let Some(pos) = config.texts.iter().position(|t| t.is_empty()) {
            return Err(PageError::missing(
                "Typewriter",
                format!("text #{} is empty", pos + 1),
            ));
        }

        Ok(Self {
            texts: config.texts.clone(),
            type_speed: config.type_speed.max(MIN_STEP),
            delete_speed: config.delete_speed.max(MIN_STEP),
            pause: config.pause.max(MIN_STEP),
            start_delay: config.start_delay,
            text_index: 0,
            char_index: 0,
            deleting: false,
            active: false,
            placeholder: String::new(),
            pending: None,
        })
    }

    /// Current placeholder text
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Whether a step is waiting in the scheduler
    pub fn has_pending<T>(&self, scheduler: &Scheduler<T>) -> bool {
        self.pending.is_some_and(|id| scheduler.is_pending(id))
    }

    /// Begin the animation after the configured start delay
    pub fn start<T: From<RotatorTimer>>(&mut self, scheduler: &mut Scheduler<T>) {
        self.reschedule(scheduler, self.start_delay, RotatorTimer::Start);
    }

    /// Dispatch a fired timer
    pub fn on_timer<T: From<RotatorTimer>>(
        &mut self,
        timer: RotatorTimer,
        scheduler: &mut Scheduler<T>,
    ) {
        self.pending = None;
        match timer {
            RotatorTimer::Start => {
                self.active = true;
                self.step(scheduler);
            }
            RotatorTimer::Step => self.step(scheduler),
            RotatorTimer::BeginDelete => {
                self.deleting = true;
                self.step(scheduler);
            }
        }
    }

    /// Type or delete one character and schedule what comes next
    pub fn step<T: From<RotatorTimer>>(&mut self, scheduler: &mut Scheduler<T>) {
        if !self.active {
            return;
        }

        let text = &self.texts[self.text_index];

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            self.placeholder = char_prefix(text, self.char_index).to_string();

            if self.char_index == 0 {
                self.deleting = false;
                self.text_index = (self.text_index + 1) % self.texts.len();
                self.reschedule(scheduler, self.type_speed, RotatorTimer::Step);
                return;
            }
        } else {
            self.char_index = (self.char_index + 1).min(char_len(text));
            self.placeholder = char_prefix(text, self.char_index).to_string();

            if self.char_index == char_len(text) {
                self.reschedule(scheduler, self.pause, RotatorTimer::BeginDelete);
                return;
            }
        }

        let delay = if self.deleting {
            self.delete_speed
        } else {
            self.type_speed
        };
        self.reschedule(scheduler, delay, RotatorTimer::Step);
    }

    /// Stop animating; the placeholder keeps its partial text
    pub fn pause<T>(&mut self, scheduler: &mut Scheduler<T>) {
        self.active = false;
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Restart from the first text, but only when the input is empty
    ///
    /// Returns whether the rotator restarted.
    pub fn resume<T: From<RotatorTimer>>(
        &mut self,
        input_is_empty: bool,
        scheduler: &mut Scheduler<T>,
    ) -> bool {
        if !input_is_empty {
            return false;
        }

        self.active = true;
        self.text_index = 0;
        self.char_index = 0;
        self.deleting = false;
        self.step(scheduler);
        true
    }

    /// Focus entered the chat input
    pub fn on_focus<T>(&mut self, scheduler: &mut Scheduler<T>) {
        self.pause(scheduler);
    }

    /// Focus left the chat input
    pub fn on_blur<T: From<RotatorTimer>>(
        &mut self,
        input_is_empty: bool,
        scheduler: &mut Scheduler<T>,
    ) {
        self.resume(input_is_empty, scheduler);
    }

    /// The chat input was edited
    pub fn on_input<T: From<RotatorTimer>>(
        &mut self,
        input_is_empty: bool,
        scheduler: &mut Scheduler<T>,
    ) {
        if input_is_empty {
            self.resume(true, scheduler);
        } else {
            self.pause(scheduler);
        }
    }

    fn reschedule<T: From<RotatorTimer>>(
        &mut self,
        scheduler: &mut Scheduler<T>,
        delay: Duration,
        timer: RotatorTimer,
    ) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
        self.pending = Some(scheduler.schedule(delay, timer.into()));
    }
}
