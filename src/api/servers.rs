use reqwest::Method;

use super::client::HetznerClient;
use crate::error::ProviderError;
use crate::models::action::ActionEnvelope;
use crate::models::server::ServerEnvelope;
use crate::models::{Action, RescaleRequest, Server};

impl HetznerClient {
    /// Fetch a server's current status and type.
    pub async fn get_server(&self, server_id: u64) -> Result<Server, ProviderError> {
        let endpoint = format!("/servers/{}", server_id);
        let env: ServerEnvelope = self.send(Method::GET, &endpoint, None::<&()>).await?;
        Ok(env.server)
    }

    /// Request a server type change. Returns once the API has accepted the
    /// action, not when the resize has finished.
    pub async fn change_type(&self, request: &RescaleRequest) -> Result<Action, ProviderError> {
        let endpoint = format!("/servers/{}/actions/change_type", request.server_id);
        tracing::info!(
            server_id = request.server_id,
            server_type = %request.server_type,
            upgrade_disk = request.upgrade_disk,
            "Requesting server type change"
        );
        let env: ActionEnvelope = self
            .send(Method::POST, &endpoint, Some(&request.payload()))
            .await?;
        tracing::info!(action_id = env.action.id, status = %env.action.status, "Change type accepted");
        Ok(env.action)
    }
}
