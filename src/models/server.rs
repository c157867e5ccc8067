use serde::Deserialize;

/// The subset of a Hetzner server object shown before a resize
#[derive(Deserialize, Clone, Debug)]
pub struct Server {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub server_type: ServerTypeRef,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerTypeRef {
    pub name: String,
    #[serde(default)]
    pub cores: Option<u32>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub disk: Option<u64>,
}

impl Server {
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }

    /// e.g. "cpx11 (2 vCPU, 2 GB RAM, 40 GB disk)"
    pub fn server_type_display(&self) -> String {
        let t = &self.server_type;
        match (t.cores, t.memory, t.disk) {
            (Some(c), Some(m), Some(d)) => format!("{} ({} vCPU, {} GB RAM, {} GB disk)", t.name, c, m, d),
            _ => t.name.clone(),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ServerEnvelope {
    pub server: Server,
}
