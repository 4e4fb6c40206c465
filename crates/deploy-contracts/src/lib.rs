//! Deploys a compiled contract to an EVM node and writes the resulting
//! deployment record and the contract artifact next to the repository.

pub mod arguments;
pub mod artifacts;
pub mod chain;
pub mod error;
pub mod paths;
pub mod record;
pub mod runner;
pub mod traits;

pub use {
    error::Error,
    record::DeploymentRecord,
    runner::{Deployment, Runner},
};
use {artifacts::HardhatArtifacts, chain::NodeChain, paths::Paths};

pub async fn run(args: arguments::Arguments) -> Result<Deployment, Error> {
    let provider = ethrpc::alloy::provider(&args.node_url);
    let runner = Runner::new(
        NodeChain::new(provider),
        HardhatArtifacts::new(args.artifacts_dir),
        Paths::new(args.output_dir),
        args.confirmation_timeout,
    );
    runner.run(&args.contract_name).await
}
