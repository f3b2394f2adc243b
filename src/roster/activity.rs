use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Activity {
    #[serde(skip)]
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(name: &str, description: &str, schedule: &str, max_participants: u32) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            schedule: schedule.to_owned(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants<I, E>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        for email in participants {
            let email = email.into();
            if !self.is_registered(&email) {
                self.participants.push(email);
            }
        }
        self
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Capacity is advisory; signups are never refused for being over it.
    pub fn is_over_capacity(&self) -> bool {
        self.participants.len() > self.max_participants as usize
    }
}
