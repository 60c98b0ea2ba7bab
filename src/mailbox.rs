//! Latest-wins control mailbox
//!
//! Callers on any thread leave state requests, forced states and parameter
//! colors here; the render thread drains them once per frame. Each slot only
//! keeps the newest value, so a burst of requests collapses into the last
//! one. The forced state id travels through an atomic, requests and
//! parameter colors through cells guarded by `critical-section`. A request
//! and its palette share one cell, so they are always drained together.

use core::cell::Cell;
use core::sync::atomic::{AtomicU8, Ordering};

use std::sync::Arc;

use critical_section::Mutex;

use crate::color::{Color, Palette};
use crate::scene::OperatingState;

/// Marks an empty forced state slot
const EMPTY: u8 = u8::MAX;

/// State request together with its optional palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateRequest {
    pub state: OperatingState,
    pub palette: Option<Palette>,
}

/// Everything posted since the last drain
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlSnapshot {
    pub forced: Option<OperatingState>,
    pub request: Option<StateRequest>,
    pub parameter: Option<Color>,
}

impl ControlSnapshot {
    pub const fn is_empty(&self) -> bool {
        self.forced.is_none() && self.request.is_none() && self.parameter.is_none()
    }
}

/// Shared mailbox between the controller and the render thread
pub struct ControlMailbox {
    forced: AtomicU8,
    request: Mutex<Cell<Option<StateRequest>>>,
    parameter: Mutex<Cell<Option<Color>>>,
}

impl ControlMailbox {
    pub const fn new() -> Self {
        Self {
            forced: AtomicU8::new(EMPTY),
            request: Mutex::new(Cell::new(None)),
            parameter: Mutex::new(Cell::new(None)),
        }
    }

    /// Post a state request, replacing any request not yet drained
    pub fn request_state(&self, state: OperatingState, palette: Option<Palette>) {
        let request = StateRequest { state, palette };
        critical_section::with(|cs| self.request.borrow(cs).set(Some(request)));
    }

    /// Post a state that is switched to without a transition
    pub fn set_state(&self, state: OperatingState) {
        self.forced.store(state.as_raw(), Ordering::Release);
    }

    pub fn set_parameter(&self, color: Color) {
        critical_section::with(|cs| self.parameter.borrow(cs).set(Some(color)));
    }

    /// Drain all slots
    pub fn take(&self) -> ControlSnapshot {
        let forced = OperatingState::from_raw(self.forced.swap(EMPTY, Ordering::Acquire));

        critical_section::with(|cs| ControlSnapshot {
            forced,
            request: self.request.borrow(cs).take(),
            parameter: self.parameter.borrow(cs).take(),
        })
    }
}

impl Default for ControlMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle for posting to a mailbox from other threads
#[derive(Clone, Default)]
pub struct ControlHandle {
    mailbox: Arc<ControlMailbox>,
}

impl ControlHandle {
    pub fn new(mailbox: Arc<ControlMailbox>) -> Self {
        Self { mailbox }
    }

    pub fn mailbox(&self) -> &Arc<ControlMailbox> {
        &self.mailbox
    }

    pub fn set_state(&self, state: OperatingState) {
        self.mailbox.set_state(state);
    }

    pub fn request_state(&self, state: OperatingState, palette: Option<Palette>) {
        self.mailbox.request_state(state, palette);
    }

    pub fn set_parameter(&self, color: Color) {
        self.mailbox.set_parameter(color);
    }
}
