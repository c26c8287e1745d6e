//! Loading extra registry entries from disk.
//!
//! The file is a JSON array of registration requests:
//!
//! ```json
//! [{"method": "test", "methodByte": 3, "blockchain": "chain",
//!   "network": "net", "networkFlag": 17, "chainId": 4242}]
//! ```
//!
//! Entries are applied in order on top of the builtin defaults. The first
//! conflicting entry aborts the load.

use std::path::Path;

use anyhow::{Context, Result};
use idcore::{DidMethodNetworkRequest, Registry};

/// The builtin registry, extended from `path` when one is given.
pub fn load_registry(path: Option<&Path>) -> Result<Registry> {
    let mut registry = Registry::with_defaults();
    let Some(path) = path else {
        return Ok(registry);
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read registry file {}", path.display()))?;
    let requests: Vec<DidMethodNetworkRequest> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse registry file {}", path.display()))?;

    for (i, request) in requests.iter().enumerate() {
        registry.register_did_method_network(request).with_context(|| {
            format!(
                "registry entry {i} ({}:{}:{}) rejected",
                request.method, request.blockchain, request.network
            )
        })?;
    }

    tracing::info!(
        path = %path.display(),
        entries = requests.len(),
        "registry file loaded"
    );
    Ok(registry)
}
