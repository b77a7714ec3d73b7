//! Two-phase repaint from snapshots.
//!
//! Restoring a snapshot means decoding a PNG, which the host may do off the
//! event that asked for it. A request hands out a ticket; a completion only
//! lands if its ticket is still the latest one issued. Clear, resize and
//! another undo/redo supersede outstanding tickets. The latest request
//! stays outstanding after the host takes it, so the surface can land it
//! itself before a new stroke or an export.

use sigpad_core::Snapshot;

/// Identifies one repaint request. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepaintTicket(u64);

impl RepaintTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A snapshot waiting to be decoded and painted at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RepaintRequest {
    pub ticket: RepaintTicket,
    pub snapshot: Snapshot,
}

#[derive(Debug, Default)]
pub struct RepaintQueue {
    issued: u64,
    /// The latest request that has not painted yet.
    latest: Option<RepaintRequest>,
    /// Whether `latest` has been handed to the host for decoding.
    handed_out: bool,
}

impl RepaintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, snapshot: Snapshot) -> RepaintRequest {
        self.issued += 1;
        let ticket = RepaintTicket(self.issued);
        let request = RepaintRequest { ticket, snapshot };
        if let Some(stale) = self.latest.replace(request.clone()) {
            log::debug!("repaint #{} superseded before landing", stale.ticket.id());
        }
        self.handed_out = false;
        request
    }

    /// Hand the latest request to the host for decoding. Each request is
    /// handed out once; it stays outstanding until it lands.
    pub fn take_pending(&mut self) -> Option<RepaintRequest> {
        if self.handed_out {
            return None;
        }
        let request = self.latest.clone()?;
        self.handed_out = true;
        Some(request)
    }

    pub fn has_pending(&self) -> bool {
        self.latest.is_some() && !self.handed_out
    }

    /// The latest request that has not painted, whether or not the host
    /// is already decoding it.
    pub fn outstanding(&self) -> Option<&RepaintRequest> {
        self.latest.as_ref()
    }

    /// Whether a completion for `ticket` should paint.
    pub fn accepts(&self, ticket: RepaintTicket) -> bool {
        self.latest.as_ref().is_some_and(|r| r.ticket == ticket)
    }

    /// Mark `ticket` as painted. Returns `false` for stale tickets.
    pub fn complete(&mut self, ticket: RepaintTicket) -> bool {
        if !self.accepts(ticket) {
            log::debug!("discarding stale repaint #{}", ticket.id());
            return false;
        }
        self.latest = None;
        self.handed_out = false;
        true
    }

    /// Supersede every outstanding request.
    pub fn invalidate(&mut self) {
        if let Some(request) = self.latest.take() {
            log::debug!("repaint #{} invalidated", request.ticket.id());
        }
        self.handed_out = false;
    }
}
