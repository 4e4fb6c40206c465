//! The deployment sequence: find the signer, deploy the contract and persist
//! the deployment record plus the contract artifact.

use {
    crate::{
        error::Error,
        paths::Paths,
        record::DeploymentRecord,
        traits::{ArtifactStore, Chain},
    },
    alloy::primitives::utils::format_ether,
    chrono::Utc,
    serde::Serialize,
    std::{
        fs,
        path::{Path, PathBuf},
        time::Duration,
    },
};

pub struct Runner<C, A> {
    chain: C,
    artifacts: A,
    paths: Paths,
    confirmation_timeout: Duration,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct Deployment {
    pub record: DeploymentRecord,
    pub record_file: PathBuf,
    pub artifact_file: PathBuf,
}

impl<C: Chain, A: ArtifactStore> Runner<C, A> {
    pub fn new(chain: C, artifacts: A, paths: Paths, confirmation_timeout: Duration) -> Self {
        Self {
            chain,
            artifacts,
            paths,
            confirmation_timeout,
        }
    }

    /// Runs every step in order and stops at the first failure. Nothing is
    /// written to disk unless the contract was deployed.
    pub async fn run(&self, contract: &str) -> Result<Deployment, Error> {
        tracing::info!("Deploying {contract} contract...");

        let deployer = self.chain.signer().await?;
        let chain_id = self.chain.chain_id().await?;
        tracing::info!(chain_id, "Deployer: {deployer}");
        let balance = self.chain.balance(deployer).await?;
        tracing::info!("Balance: {} ETH", format_ether(balance));

        let factory = self.artifacts.factory(contract)?;
        let address = self
            .chain
            .deploy(deployer, &factory, self.confirmation_timeout)
            .await?;
        tracing::info!("{} deployed to: {address}", factory.name);

        let record = DeploymentRecord::new(address, deployer, Utc::now());
        let artifact = self.artifacts.read_artifact(contract)?;

        // Both directories have to exist before the first file is written.
        ensure_dir(&self.paths.deployments_dir())?;
        ensure_dir(&self.paths.shared_contracts_dir())?;

        let record_file = self.paths.record_file();
        write_json(&record_file, &record)?;
        let artifact_file = self.paths.shared_artifact_file(&factory.name);
        write_json(&artifact_file, &artifact)?;

        tracing::info!(
            record = %record_file.display(),
            artifact = %artifact_file.display(),
            "Deployment info saved!"
        );
        Ok(Deployment {
            record,
            record_file,
            artifact_file,
        })
    }
}

fn ensure_dir(dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(Error::filesystem(dir))
}

/// Writes `value` as JSON indented with two spaces, replacing the file if it
/// already exists.
fn write_json(path: &Path, value: &impl Serialize) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value)
        .map_err(std::io::Error::from)
        .map_err(Error::filesystem(path))?;
    fs::write(path, json).map_err(Error::filesystem(path))
}
