//! Session shared between a UI loop and background lookups
//!
//! The lock is held only to snapshot inputs and to apply answers, never
//! across a collaborator call, so the user can keep editing the selection
//! while a lookup is in flight. A late answer is then dropped by the ticket
//! check.

use crate::collaborator::{ApplicabilityValidator, ContactLookup};
use crate::error::SessionResult;
use crate::session::ScopeSession;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Cloneable handle to one [`ScopeSession`]
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<ScopeSession>>,
}

impl SharedSession {
    /// Wrap a session
    #[must_use]
    pub fn new(session: ScopeSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Read access; do not hold across an `.await`
    pub fn read(&self) -> RwLockReadGuard<'_, ScopeSession> {
        self.inner.read()
    }

    /// Write access; do not hold across an `.await`
    pub fn write(&self) -> RwLockWriteGuard<'_, ScopeSession> {
        self.inner.write()
    }

    /// Run an applicability check without blocking other users of the session
    ///
    /// Returns true if the answer was applied, false if the selection moved
    /// on while the check ran.
    ///
    /// # Errors
    /// Same as [`ScopeSession::begin_validation`]
    pub async fn refresh_applicability<V>(&self, validator: &V) -> SessionResult<bool>
    where
        V: ApplicabilityValidator + ?Sized,
    {
        let request = self.read().begin_validation()?;
        let result = validator
            .has_applicable_questions(request.questionnaire_id, &request.role_ids)
            .await;
        Ok(self.write().complete_validation(request.ticket, result))
    }

    /// Run a contact lookup without blocking other users of the session
    ///
    /// Returns true if the answers were applied.
    ///
    /// # Errors
    /// Same as [`ScopeSession::begin_contact_lookup`]
    pub async fn refresh_contacts<L>(&self, lookup: &L) -> SessionResult<bool>
    where
        L: ContactLookup + ?Sized,
    {
        let Some(request) = self.read().begin_contact_lookup()? else {
            return Ok(false);
        };

        let mut results = Vec::with_capacity(request.role_ids.len());
        for role_id in request.role_ids {
            results.push((role_id, lookup.contacts_for_role(role_id).await));
        }
        Ok(self.write().complete_contact_lookup(request.ticket, results))
    }
}
