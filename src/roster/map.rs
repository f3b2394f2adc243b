use crate::{
    auth::TeacherId,
    roster::{Confirmation, Roster, RosterError},
};
use std::sync::{Arc, Mutex};

/// Process-wide roster shared between request handlers.
///
/// Every operation holds the lock for its whole read-modify-write, so two
/// concurrent signups of the same email cannot both succeed.
#[derive(Clone, Debug)]
pub struct RosterMap {
    inner: Arc<Mutex<Roster>>,
}

impl RosterMap {
    pub fn new(roster: Roster) -> Self {
        Self {
            inner: Arc::new(Mutex::new(roster)),
        }
    }

    pub fn snapshot(&self) -> Result<Roster, RosterError> {
        let roster = self.inner.lock().map_err(|_| RosterError::Unavailable)?;
        Ok(roster.clone())
    }

    pub fn signup(
        &self,
        activity_name: &str,
        email: &str,
        teacher: &TeacherId,
    ) -> Result<Confirmation, RosterError> {
        let mut roster = self.inner.lock().map_err(|_| RosterError::Unavailable)?;
        roster.signup(activity_name, email, teacher)
    }

    pub fn unregister(
        &self,
        activity_name: &str,
        email: &str,
        teacher: &TeacherId,
    ) -> Result<Confirmation, RosterError> {
        let mut roster = self.inner.lock().map_err(|_| RosterError::Unavailable)?;
        roster.unregister(activity_name, email, teacher)
    }
}
