use crate::auth::TeacherId;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;
use tracing::warn;

mod activity;
mod map;
mod seed;

pub use activity::Activity;
pub use map::RosterMap;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up")]
    AlreadyRegistered,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
    #[error("Roster is unavailable")]
    Unavailable,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Signup,
    Unregister,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Signup => "signup",
            Operation::Unregister => "unregister",
        }
    }
}

/// Outcome of a successful roster mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub operation: Operation,
    pub activity: String,
    pub email: String,
    pub teacher: TeacherId,
}

impl Display for Confirmation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.operation {
            Operation::Signup => write!(
                f,
                "Signed up {} for {} by teacher {}",
                self.email, self.activity, self.teacher
            ),
            Operation::Unregister => write!(
                f,
                "Unregistered {} from {} by teacher {}",
                self.email, self.activity, self.teacher
            ),
        }
    }
}

/// Activities keyed by name, kept in seed order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    activities: Vec<Activity>,
}

impl Roster {
    pub fn new(activities: Vec<Activity>) -> Self {
        let mut roster = Self::default();
        for activity in activities {
            match roster.position(&activity.name) {
                Some(idx) => roster.activities[idx] = activity,
                None => roster.activities.push(activity),
            }
        }
        roster
    }

    pub fn seeded() -> Self {
        Self::new(seed::activities())
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.activities.iter().position(|a| a.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Activity, RosterError> {
        self.activities
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or(RosterError::ActivityNotFound)
    }

    pub fn signup(
        &mut self,
        activity_name: &str,
        email: &str,
        teacher: &TeacherId,
    ) -> Result<Confirmation, RosterError> {
        let activity = self.get_mut(activity_name)?;

        if activity.is_registered(email) {
            return Err(RosterError::AlreadyRegistered);
        }

        activity.participants.push(email.to_owned());

        if activity.is_over_capacity() {
            warn!(
                activity = %activity.name,
                participants = activity.participants.len(),
                max_participants = activity.max_participants,
                "Activity is over capacity"
            );
        }

        Ok(Confirmation {
            operation: Operation::Signup,
            activity: activity.name.clone(),
            email: email.to_owned(),
            teacher: teacher.clone(),
        })
    }

    pub fn unregister(
        &mut self,
        activity_name: &str,
        email: &str,
        teacher: &TeacherId,
    ) -> Result<Confirmation, RosterError> {
        let activity = self.get_mut(activity_name)?;

        let idx = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or(RosterError::NotRegistered)?;

        activity.participants.remove(idx);

        Ok(Confirmation {
            operation: Operation::Unregister,
            activity: activity.name.clone(),
            email: email.to_owned(),
            teacher: teacher.clone(),
        })
    }
}

impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.activities.len()))?;
        for activity in self.activities() {
            map.serialize_entry(&activity.name, activity)?;
        }
        map.end()
    }
}
