use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Hetzner's record of an asynchronous operation, as returned by mutating calls
#[derive(Deserialize, Clone, Debug)]
pub struct Action {
    pub id: u64,
    pub command: String,
    pub status: String,
    #[serde(default)]
    pub progress: u8,
    pub started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<ActionError>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ActionError {
    pub code: String,
    pub message: String,
}

#[derive(Deserialize)]
pub(crate) struct ActionEnvelope {
    pub action: Action,
}
