use {
    alloy::primitives::Address,
    chrono::{DateTime, SecondsFormat, Utc},
    serde::{Deserialize, Serialize},
};

/// Label written into every deployment record, independent of the node the
/// contract was deployed to. The actual chain id only shows up in the logs.
pub const NETWORK: &str = "local";

/// What gets persisted about a deployment so other parts of the system can
/// find the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub address: String,
    pub deployer: String,
    pub timestamp: String,
    pub network: String,
}

impl DeploymentRecord {
    pub fn new(address: Address, deployer: Address, deployed_at: DateTime<Utc>) -> Self {
        Self {
            address: address.to_checksum(None),
            deployer: deployer.to_checksum(None),
            timestamp: deployed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            network: NETWORK.to_string(),
        }
    }
}
