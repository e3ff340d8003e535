use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;

/// Certificate and private key the server uses to terminate TLS.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TlsConfig {
    /// Path to the PEM-encoded certificate chain.
    pub certificate_path: PathBuf,
    /// Path to the PEM-encoded private key.
    pub key_path: PathBuf,
}
