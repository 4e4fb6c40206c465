use std::path::PathBuf;

/// Everything that can abort a deployment run. None of these are handled
/// locally; they all bubble up to the process boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No node could be reached or the node does not expose a signer.
    #[error("could not connect to network: {0:#}")]
    Connection(anyhow::Error),

    /// The contract was not compiled (or its artifact can not be used).
    #[error("artifact for contract {name} not found: {reason}")]
    ArtifactNotFound { name: String, reason: String },

    /// The deployment transaction reverted, timed out or the node went away
    /// while waiting for it.
    #[error("deployment transaction failed: {0:#}")]
    Deployment(anyhow::Error),

    /// Creating an output directory or writing an output file failed.
    #[error("could not write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn artifact_not_found(name: &str, reason: impl ToString) -> Self {
        Self::ArtifactNotFound {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Filesystem { path, source }
    }
}
