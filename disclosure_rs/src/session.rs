//! Display-surface state.
//!
//! A session is `Idle` (optionally showing an error), `Uploading` (input
//! disabled) or holding a `Result`. Every upload gets a [`Ticket`]; a
//! completion whose ticket is no longer current (the session was reset or
//! moved on) is dropped instead of overwriting newer state.

use crate::error::FlowError;

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<R> {
    Idle { error: Option<String> },
    Uploading { ticket: Ticket, file_name: String },
    Result(R),
}

/// Which file card is open, and which point inside it.
///
/// At most one card is expanded. Opening a different card collapses the
/// open point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expansion {
    file: Option<usize>,
    point: Option<usize>,
}

impl Expansion {
    pub fn toggle_file(&mut self, index: usize) {
        if self.file == Some(index) {
            self.file = None;
        } else {
            self.file = Some(index);
        }
        self.point = None;
    }

    /// Toggle a point of the expanded card. Ignored while no card is open.
    pub fn toggle_point(&mut self, index: usize) {
        if self.file.is_none() {
            return;
        }
        self.point = if self.point == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn expanded_file(&self) -> Option<usize> {
        self.file
    }

    pub fn is_file_expanded(&self, index: usize) -> bool {
        self.file == Some(index)
    }

    pub fn is_point_expanded(&self, file: usize, point: usize) -> bool {
        self.file == Some(file) && self.point == Some(point)
    }
}

#[derive(Debug)]
pub struct Session<R> {
    phase: Phase<R>,
    next_ticket: u64,
    expansion: Expansion,
}

impl<R> Default for Session<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Session<R> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle { error: None },
            next_ticket: 0,
            expansion: Expansion::default(),
        }
    }

    pub fn phase(&self) -> &Phase<R> {
        &self.phase
    }

    /// File selection is disabled while uploading.
    pub fn input_enabled(&self) -> bool {
        !matches!(self.phase, Phase::Uploading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Idle { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&R> {
        match &self.phase {
            Phase::Result(r) => Some(r),
            _ => None,
        }
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn expansion_mut(&mut self) -> &mut Expansion {
        &mut self.expansion
    }

    /// Enter `Uploading`. Refused while another upload is in flight.
    pub fn begin(&mut self, file_name: impl Into<String>) -> Result<Ticket, FlowError> {
        if !self.input_enabled() {
            return Err(FlowError::Busy);
        }
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.phase = Phase::Uploading {
            ticket,
            file_name: file_name.into(),
        };
        Ok(ticket)
    }

    /// Record a rejection that happened before any request (validation).
    /// Ignored while uploading, since input is disabled then.
    pub fn reject(&mut self, message: impl Into<String>) {
        if self.input_enabled() {
            self.phase = Phase::Idle {
                error: Some(message.into()),
            };
        }
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `false`, leaving state untouched, when the ticket is stale.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<R, String>) -> bool {
        match &self.phase {
            Phase::Uploading { ticket: current, .. } if *current == ticket => {}
            _ => {
                tracing::debug!(?ticket, "dropping stale response");
                return false;
            }
        }
        self.expansion = Expansion::default();
        self.phase = match outcome {
            Ok(result) => Phase::Result(result),
            Err(message) => Phase::Idle {
                error: Some(message),
            },
        };
        true
    }

    /// Back to `Idle` with nothing shown. Any outstanding ticket goes stale.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle { error: None };
        self.expansion = Expansion::default();
    }
}
