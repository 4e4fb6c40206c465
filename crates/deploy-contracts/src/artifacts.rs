//! Access to the contract artifacts a Hardhat build leaves behind, laid out
//! as `<artifacts>/<source path>/<Contract>.json` next to `*.dbg.json` files
//! and a `build-info/` directory.

use {
    crate::{error::Error, traits::ArtifactStore},
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    anyhow::{Context, anyhow},
    serde::Deserialize,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    walkdir::{DirEntry, WalkDir},
};

const BUILD_INFO_DIR: &str = "build-info";

/// Deployable handle of a compiled contract.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    pub name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl ContractFactory {
    /// Creation code for a deployment without constructor arguments.
    pub fn deploy_code(&self) -> Result<Bytes, Error> {
        let expected_args = self
            .abi
            .constructor
            .as_ref()
            .map_or(0, |constructor| constructor.inputs.len());
        if expected_args > 0 {
            return Err(Error::Deployment(anyhow!(
                "constructor of {} expects {expected_args} argument(s) but none are supplied",
                self.name
            )));
        }
        Ok(self.bytecode.clone())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    abi: JsonAbi,
    bytecode: Bytes,
}

#[derive(Debug, Clone)]
pub struct HardhatArtifacts {
    dir: PathBuf,
}

impl HardhatArtifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves a bare (`Contract`) or fully qualified
    /// (`contracts/Contract.sol:Contract`) name to exactly one artifact file.
    fn artifact_path(&self, name: &str) -> Result<PathBuf, Error> {
        if let Some((source, contract)) = name.split_once(':') {
            let path = self.dir.join(source).join(format!("{contract}.json"));
            return if path.is_file() {
                Ok(path)
            } else {
                Err(Error::artifact_not_found(
                    name,
                    format!("{} does not exist", path.display()),
                ))
            };
        }

        let file_name = format!("{name}.json");
        let candidates = find_files(&self.dir, &file_name)
            .map_err(|err| Error::artifact_not_found(name, format!("{err:#}")))?;
        match candidates.as_slice() {
            [] => Err(Error::artifact_not_found(
                name,
                format!(
                    "no artifact in {}, was the contract compiled?",
                    self.dir.display()
                ),
            )),
            [path] => Ok(path.clone()),
            paths => {
                let paths = paths
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::artifact_not_found(
                    name,
                    format!("multiple artifacts match ({paths}), use a fully qualified name"),
                ))
            }
        }
    }

    fn load(&self, name: &str) -> Result<(PathBuf, String), Error> {
        let path = self.artifact_path(name)?;
        let json = fs::read_to_string(&path).map_err(|err| {
            Error::artifact_not_found(name, format!("could not read {}: {err}", path.display()))
        })?;
        Ok((path, json))
    }
}

impl ArtifactStore for HardhatArtifacts {
    fn factory(&self, name: &str) -> Result<ContractFactory, Error> {
        let (path, json) = self.load(name)?;
        let artifact: HardhatArtifact = serde_json::from_str(&json).map_err(|err| {
            Error::artifact_not_found(
                name,
                format!("malformed artifact {}: {err}", path.display()),
            )
        })?;
        if artifact.bytecode.is_empty() {
            return Err(Error::artifact_not_found(
                name,
                format!(
                    "{} has no bytecode, it is an interface or abstract contract",
                    artifact.contract_name
                ),
            ));
        }
        tracing::debug!(path = %path.display(), "loaded contract artifact");

        Ok(ContractFactory {
            name: artifact.contract_name,
            abi: artifact.abi,
            bytecode: artifact.bytecode,
        })
    }

    fn read_artifact(&self, name: &str) -> Result<serde_json::Value, Error> {
        let (path, json) = self.load(name)?;
        serde_json::from_str(&json).map_err(|err| {
            Error::artifact_not_found(name, format!("malformed JSON {}: {err}", path.display()))
        })
    }
}

/// Collects every file called `file_name` below `dir`, in a stable order.
/// Symbolic links are not followed.
fn find_files(dir: &Path, file_name: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let entries = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_build_info(entry));
    for entry in entries {
        let entry = entry.with_context(|| format!("could not read {}", dir.display()))?;
        if entry.file_type().is_file() && entry.file_name() == file_name {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

fn is_build_info(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == BUILD_INFO_DIR
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{fs, path::Path};

    pub const ELITE_HEALTH_SYSTEM: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "EliteHealthSystem",
  "sourceName": "contracts/EliteHealthSystem.sol",
  "abi": [
    {
      "inputs": [],
      "stateMutability": "nonpayable",
      "type": "constructor"
    },
    {
      "inputs": [],
      "name": "owner",
      "outputs": [
        {
          "internalType": "address",
          "name": "",
          "type": "address"
        }
      ],
      "stateMutability": "view",
      "type": "function"
    }
  ],
  "bytecode": "0x6080604052348015600f57600080fd5b50",
  "deployedBytecode": "0x6080604052",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

    /// Writes `json` the way Hardhat would for `source` (e.g.
    /// `contracts/Foo.sol`) and `contract`, including the debug file.
    pub fn write_artifact(artifacts: &Path, source: &str, contract: &str, json: &str) {
        let dir = artifacts.join(source);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{contract}.json")), json).unwrap();
        fs::write(
            dir.join(format!("{contract}.dbg.json")),
            r#"{"_format":"hh-sol-dbg-1","buildInfo":"../../build-info/abc.json"}"#,
        )
        .unwrap();
    }
}
