//! In-memory complaint store keyed by complaint ID.
//!
//! A single reader/writer lock covers the whole map. Resolution is a
//! check-and-set under the write lock, so a complaint is resolved at most once
//! no matter how many resolve calls race.

use super::{
    StoreError,
    model::{Complaint, ComplaintStatus},
};
use chrono::Utc;
use std::{collections::HashMap, sync::RwLock};

#[derive(Debug, Default)]
pub struct ComplaintStore {
    complaints: RwLock<HashMap<String, Complaint>>,
}

impl ComplaintStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns `DuplicateComplaint` if the ID is already stored.
    pub fn insert(&self, complaint: Complaint) -> Result<(), StoreError> {
        let mut complaints = self
            .complaints
            .write()
            .map_err(|_| StoreError::LockPoisoned("complaints"))?;
        if complaints.contains_key(&complaint.id) {
            return Err(StoreError::DuplicateComplaint);
        }
        complaints.insert(complaint.id.clone(), complaint);
        Ok(())
    }

    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Complaint>, StoreError> {
        let complaints = self
            .complaints
            .read()
            .map_err(|_| StoreError::LockPoisoned("complaints"))?;
        Ok(complaints.get(id).cloned())
    }

    /// Resolve `ids` in order, silently skipping any that are not stored.
    ///
    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn find_many(&self, ids: &[String]) -> Result<Vec<Complaint>, StoreError> {
        let complaints = self
            .complaints
            .read()
            .map_err(|_| StoreError::LockPoisoned("complaints"))?;
        Ok(ids
            .iter()
            .filter_map(|id| complaints.get(id).cloned())
            .collect())
    }

    /// Snapshot of every stored complaint, in no particular order.
    ///
    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn all(&self) -> Result<Vec<Complaint>, StoreError> {
        let complaints = self
            .complaints
            .read()
            .map_err(|_| StoreError::LockPoisoned("complaints"))?;
        Ok(complaints.values().cloned().collect())
    }

    /// Transition a complaint from pending to resolved and stamp `resolved_at`.
    ///
    /// # Errors
    /// Returns `ComplaintNotFound` for an unknown ID and `AlreadyResolved` if
    /// the complaint was resolved before.
    pub fn mark_resolved(&self, id: &str) -> Result<Complaint, StoreError> {
        let mut complaints = self
            .complaints
            .write()
            .map_err(|_| StoreError::LockPoisoned("complaints"))?;
        let complaint = complaints
            .get_mut(id)
            .ok_or(StoreError::ComplaintNotFound)?;

        if complaint.is_resolved() {
            return Err(StoreError::AlreadyResolved);
        }

        complaint.status = ComplaintStatus::Resolved;
        complaint.resolved_at = Some(Utc::now());
        Ok(complaint.clone())
    }

    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn len(&self) -> Result<usize, StoreError> {
        let complaints = self
            .complaints
            .read()
            .map_err(|_| StoreError::LockPoisoned("complaints"))?;
        Ok(complaints.len())
    }

    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the lock.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|len| len == 0)
    }

    /// Poison the lock by panicking while holding the write guard.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.complaints.write();
                    panic!("complaints writer panicked");
                })
                .join();
        });
    }
}
