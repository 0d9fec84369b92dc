//! Optimistic vote state machine.
//!
//! A click is reflected immediately; the server's answer either confirms it
//! (and may correct the score) or undoes it. Each entity keeps a sequence
//! number so that only the answer to its latest click is applied.

use std::collections::HashMap;

use common::vote::{VoteAction, VoteState, VoteValue};

use crate::{api::VoteReceipt, error::ApiError};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationPhase {
    #[default]
    Idle,
    Pending,
    Committed,
    RolledBack,
}

/// The network call an [`VoteApplier::apply`] asks for, and what to restore
/// if it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTicket {
    pub entity_id: String,
    pub action: VoteAction,
    sequence: u64,
    previous: VoteState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    Committed(VoteState),
    RolledBack { restored: VoteState, error: ApiError },
    /// A later click on the same entity owns the state now.
    Superseded,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    current: VoteState,
    phase: MutationPhase,
    sequence: u64,
}

#[derive(Debug, Default)]
pub struct VoteApplier {
    entries: HashMap<String, Entry>,
    next_sequence: u64,
}

impl VoteApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `entity_id` with a state read from the server. Ignored while a
    /// vote on it is in flight, so a list refresh cannot undo a click.
    pub fn track(&mut self, entity_id: &str, authoritative: VoteState) {
        match self.entries.get_mut(entity_id) {
            Some(entry) if entry.phase == MutationPhase::Pending => {}
            Some(entry) => entry.current = authoritative,
            None => {
                self.entries.insert(entity_id.to_string(), Entry {
                    current: authoritative,
                    phase: MutationPhase::Idle,
                    sequence: 0,
                });
            }
        }
    }

    /// Like [`Self::track`], but leaves an entity that is already known
    /// alone. Used for items whose snapshot may predate a settled vote.
    pub fn seed(&mut self, entity_id: &str, snapshot: VoteState) {
        if !self.entries.contains_key(entity_id) {
            self.track(entity_id, snapshot);
        }
    }

    /// Forgets every entity `keep` rejects, except those with a vote in flight.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|entity_id, entry| entry.phase == MutationPhase::Pending || keep(entity_id.as_str()));
    }

    pub fn state(&self, entity_id: &str) -> Option<VoteState> {
        self.entries.get(entity_id).map(|entry| entry.current)
    }

    pub fn phase(&self, entity_id: &str) -> MutationPhase {
        self.entries.get(entity_id).map(|entry| entry.phase).unwrap_or_default()
    }

    /// Applies a click on `value` to the displayed state of `entity_id`.
    /// Returns `None` for an entity that was never tracked.
    pub fn apply(&mut self, entity_id: &str, value: VoteValue) -> Option<VoteTicket> {
        self.next_sequence += 1;
        let sequence = self.next_sequence;
        let entry = self.entries.get_mut(entity_id)?;
        let previous = entry.current;
        entry.current = previous.toggled(value);
        entry.phase = MutationPhase::Pending;
        entry.sequence = sequence;
        Some(VoteTicket {
            entity_id: entity_id.to_string(),
            action: entry.current.action(),
            sequence,
            previous,
        })
    }

    pub fn settle(&mut self, ticket: VoteTicket, result: Result<VoteReceipt, ApiError>) -> SettleOutcome {
        let Some(entry) = self.entries.get_mut(&ticket.entity_id) else {
            return SettleOutcome::Superseded;
        };
        if entry.sequence != ticket.sequence {
            tracing::debug!(entity = %ticket.entity_id, "ignoring answer to a superseded vote");
            return SettleOutcome::Superseded;
        }
        match result {
            Ok(receipt) => {
                if let Some(score) = receipt.score {
                    entry.current.score = score;
                }
                entry.phase = MutationPhase::Committed;
                SettleOutcome::Committed(entry.current)
            }
            Err(error) => {
                tracing::warn!(entity = %ticket.entity_id, %error, "vote failed, restoring previous state");
                entry.current = ticket.previous;
                entry.phase = MutationPhase::RolledBack;
                SettleOutcome::RolledBack { restored: ticket.previous, error }
            }
        }
    }
}
