//! Moderation status shared by articles and comments

use serde::{Deserialize, Serialize};

/// Moderation state attached to an article or a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Visible,
    Invisible,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Visible => write!(f, "VISIBLE"),
            Status::Invisible => write!(f, "INVISIBLE"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VISIBLE" => Ok(Status::Visible),
            "INVISIBLE" => Ok(Status::Invisible),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}
