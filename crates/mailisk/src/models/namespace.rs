//! Namespace models

use serde::{Deserialize, Serialize};

/// A namespace owned by the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    /// The unique namespace, e.g. "bubbly-strange-cloud"
    pub namespace: String,
}

/// Response from listing namespaces
#[derive(Debug, Clone, Deserialize)]
pub struct ListNamespacesResponse {
    #[serde(default)]
    pub data: Vec<Namespace>,
}
