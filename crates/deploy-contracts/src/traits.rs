//! Trait definitions for external system boundaries.
//!
//! These traits abstract the node and the contract build output so the
//! deployment sequence can be unit tested with mocks.

use {
    crate::{artifacts::ContractFactory, error::Error},
    alloy::primitives::{Address, U256},
    std::time::Duration,
};

/// Abstracts the network connection and the signer it provides.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// Chain id of the connected network.
    async fn chain_id(&self) -> Result<u64, Error>;

    /// The account that signs and pays for the deployment.
    async fn signer(&self) -> Result<Address, Error>;

    /// Native token balance of `address` in wei.
    async fn balance(&self, address: Address) -> Result<U256, Error>;

    /// Submits the creation transaction for `factory` from `from` and waits
    /// at most `timeout` for it to be mined. Returns the address of the new
    /// contract.
    async fn deploy(
        &self,
        from: Address,
        factory: &ContractFactory,
        timeout: Duration,
    ) -> Result<Address, Error>;
}

/// Abstracts the contract build system.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactStore: Send + Sync {
    /// Deployable handle (ABI and creation code) for the named contract.
    fn factory(&self, name: &str) -> Result<ContractFactory, Error>;

    /// The raw artifact of the named contract exactly as the build system
    /// produced it.
    fn read_artifact(&self, name: &str) -> Result<serde_json::Value, Error>;
}
