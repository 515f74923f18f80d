//! Member records used by the ID-card harness

use serde::{Deserialize, Serialize};

/// The member record an ID card is generated for
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub team: String,
    pub member_id: String,
}

impl PlayerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Name of the first required field that is empty, if any
    pub fn first_missing_field(&self) -> Option<&'static str> {
        if self.first_name.is_empty() {
            Some("first_name")
        } else if self.last_name.is_empty() {
            Some("last_name")
        } else if self.email.is_empty() {
            Some("email")
        } else if self.team.is_empty() {
            Some("team")
        } else if self.member_id.is_empty() {
            Some("member_id")
        } else {
            None
        }
    }
}
