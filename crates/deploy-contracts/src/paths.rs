//! Where the deployment outputs end up relative to the repository root.

use std::path::PathBuf;

const DEPLOYMENTS_DIR: &str = "deployments";
const SHARED_CONTRACTS_DIR: &str = "shared/contracts";
const RECORD_FILE: &str = "local.json";

#[derive(Debug, Clone)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn deployments_dir(&self) -> PathBuf {
        self.root.join(DEPLOYMENTS_DIR)
    }

    pub fn record_file(&self) -> PathBuf {
        self.deployments_dir().join(RECORD_FILE)
    }

    pub fn shared_contracts_dir(&self) -> PathBuf {
        self.root.join(SHARED_CONTRACTS_DIR)
    }

    /// File the exported artifact of `contract` is written to.
    pub fn shared_artifact_file(&self, contract: &str) -> PathBuf {
        self.shared_contracts_dir()
            .join(contract)
            .with_extension("json")
    }
}
