// ABOUTME: Context entry type definitions
// ABOUTME: Raw text submitted for task extraction and its source kind

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    #[default]
    Note,
    Email,
    Message,
}

impl ContextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextType::Note => "note",
            ContextType::Email => "email",
            ContextType::Message => "message",
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "note" => Ok(ContextType::Note),
            "email" => Ok(ContextType::Email),
            "message" => Ok(ContextType::Message),
            other => Err(format!("Unknown context type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub entry_type: ContextType,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextCreateInput {
    pub content: String,
    #[serde(rename = "type", default)]
    pub entry_type: ContextType,
}
