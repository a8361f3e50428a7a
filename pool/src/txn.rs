//! Staged operation boundary.
//!
//! An operation never touches the live [`GroupState`]. It mutates a staged copy
//! while the host records a savepoint; [`GroupTxn::commit`] hands the copy back to
//! be swapped in. Dropping the transaction without committing rolls the host back
//! to the savepoint and discards the copy, so a failing step leaves nothing behind.

use crate::events::GroupEvent;
use crate::group::GroupState;
use rosca_reserve::Transactional;

pub struct GroupTxn<'h, H: Transactional> {
    pub(crate) state: GroupState,
    pub(crate) events: Vec<GroupEvent>,
    pub(crate) host: &'h mut H,
    savepoint: Option<H::Savepoint>,
}

impl<'h, H: Transactional> GroupTxn<'h, H> {
    pub fn begin(state: &GroupState, host: &'h mut H) -> Self {
        let savepoint = Some(host.savepoint());
        Self {
            state: state.clone(),
            events: Vec::new(),
            host,
            savepoint,
        }
    }

    pub(crate) fn emit(&mut self, event: GroupEvent) {
        self.events.push(event);
    }

    /// Keep the host's effects and return the staged state and its events.
    pub fn commit(mut self) -> (GroupState, Vec<GroupEvent>) {
        self.savepoint = None;
        (
            std::mem::take(&mut self.state),
            std::mem::take(&mut self.events),
        )
    }
}

impl<H: Transactional> Drop for GroupTxn<'_, H> {
    fn drop(&mut self) {
        if let Some(savepoint) = self.savepoint.take() {
            self.host.rollback_to(savepoint);
            tracing::debug!(discarded_events = self.events.len(), "rolled back staged operation");
        }
    }
}

/// Host stand-in for operations that make no external calls.
pub struct Detached;

impl Transactional for Detached {
    type Savepoint = ();

    fn savepoint(&self) -> Self::Savepoint {}

    fn rollback_to(&mut self, _savepoint: Self::Savepoint) {}
}
