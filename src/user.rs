use serde::{Deserialize, Serialize};

/// A library member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct User {
    /// Display name
    pub name: String,
    /// Contact address
    pub email: String,
    /// Membership card number
    pub membership_id: i64,
}

impl User {
    /// Create a new user
    #[must_use]
    pub fn new(name: &str, email: &str, membership_id: i64) -> Self {
        Self { name: name.to_string(), email: email.to_string(), membership_id }
    }
}
