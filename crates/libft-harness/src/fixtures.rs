//! Fixture loading and management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::HarnessError;

fn default_mode() -> String {
    String::from("both")
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Function being tested, without the `ft_` prefix.
    pub function: String,
    /// Input parameters.
    pub inputs: serde_json::Value,
    /// Expected result, compared structurally.
    pub expected_output: serde_json::Value,
    /// `strict`, `hardened` or `both`.
    #[serde(default = "default_mode")]
    pub mode: String,
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        Ok(FixtureFile::load(path)?.set)
    }
}

/// A fixture set together with where it came from and the digest of its bytes.
#[derive(Debug, Clone)]
pub struct FixtureFile {
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the file contents.
    pub sha256: String,
    pub set: FixtureSet,
}

impl FixtureFile {
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read(path).map_err(|e| HarnessError::io(path, e))?;
        let set = serde_json::from_slice(&content)?;
        Ok(Self {
            path: path.to_path_buf(),
            sha256: sha256_hex(&content),
            set,
        })
    }
}

/// Load every `*.json` file in `dir`, sorted by path.
///
/// Files that fail to parse are returned in the second vector so callers can
/// report them without aborting the run.
pub fn load_dir(dir: &Path) -> Result<(Vec<FixtureFile>, Vec<HarnessError>), HarnessError> {
    let entries = std::fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut files = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        match FixtureFile::load(&path) {
            Ok(file) => files.push(file),
            Err(err) => skipped.push(err),
        }
    }
    if files.is_empty() {
        return Err(HarnessError::NoFixtures(dir.to_path_buf()));
    }
    Ok((files, skipped))
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
