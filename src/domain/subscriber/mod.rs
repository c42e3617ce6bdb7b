pub mod email;
pub mod name;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use self::email::Email;
use self::name::Name;
use super::FieldError;

/// A validated, sanitized signup ready to be stored.
#[derive(Debug)]
pub struct NewSubscriber {
    pub name: Name,
    pub email: Email,
    pub subscribed_to_updates: bool,
}

impl NewSubscriber {
    /// Runs every field validator and accumulates their errors, so a form
    /// with a bad name and a bad email reports both at once.
    pub fn parse(
        name: String,
        email: String,
        subscribed_to_updates: bool,
    ) -> Result<Self, Vec<FieldError>> {
        match (Name::parse(name), Email::parse(email)) {
            (Ok(name), Ok(email)) => Ok(Self {
                name,
                email,
                subscribed_to_updates,
            }),
            (name, email) => {
                let mut errors = Vec::new();
                if let Err(mut e) = name {
                    errors.append(&mut e);
                }
                if let Err(mut e) = email {
                    errors.append(&mut e);
                }
                Err(errors)
            }
        }
    }
}

/// A stored waitlist entrant, as read back from the database.
#[derive(Debug)]
pub struct Subscriber {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subscribed_to_updates: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
