use std::fmt;

use serde::Serialize;

/// A fully resolved "change server type" request.
///
/// Built fresh on each invocation and dropped once the API acknowledges it.
#[derive(Clone, PartialEq, Eq)]
pub struct RescaleRequest {
    pub api_key: String,
    pub server_id: u64,
    pub server_type: String,
    pub upgrade_disk: bool,
}

/// JSON body of `POST /servers/{id}/actions/change_type`
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ChangeTypePayload<'a> {
    pub server_type: &'a str,
    pub upgrade_disk: bool,
}

impl RescaleRequest {
    pub fn payload(&self) -> ChangeTypePayload<'_> {
        ChangeTypePayload {
            server_type: &self.server_type,
            upgrade_disk: self.upgrade_disk,
        }
    }
}

// The API key never reaches logs through `{:?}`.
impl fmt::Debug for RescaleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RescaleRequest")
            .field("api_key", &"<redacted>")
            .field("server_id", &self.server_id)
            .field("server_type", &self.server_type)
            .field("upgrade_disk", &self.upgrade_disk)
            .finish()
    }
}
