//! YAML-backed roster source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rollcall_core::error::DomainError;
use rollcall_core::roster::{Roster, RosterSource};
use serde::Deserialize;

/// On-disk shape of a roster file.
#[derive(Debug, Deserialize)]
struct RosterDocument {
    names: Vec<String>,
}

/// Loads the roster from a YAML file of the form `names: [..]`.
#[derive(Debug, Clone)]
pub struct YamlRosterFile {
    path: PathBuf,
}

impl YamlRosterFile {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses roster YAML. Names are trimmed and blank entries dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the document is malformed.
    pub fn parse(contents: &str) -> Result<Roster, DomainError> {
        let document: RosterDocument = serde_yaml::from_str(contents)
            .map_err(|e| DomainError::Infrastructure(format!("invalid roster file: {e}")))?;
        Ok(Roster::new(
            document
                .names
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty()),
        ))
    }
}

#[async_trait]
impl RosterSource for YamlRosterFile {
    async fn load_roster(&self) -> Result<Roster, DomainError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::Infrastructure(format!(
                "failed to read roster file {}: {e}",
                self.path.display()
            ))
        })?;
        Self::parse(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_blank_names() {
        let roster = YamlRosterFile::parse("names:\n  - ' Ada '\n  - ''\n  - Grace\n").unwrap();

        assert_eq!(roster.names(), ["Ada", "Grace"]);
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let roster = YamlRosterFile::parse("names: [Sam, Sam]").unwrap();

        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_parse_empty_list_yields_empty_roster() {
        let roster = YamlRosterFile::parse("names: []").unwrap();

        assert!(roster.is_empty());
    }

    #[test]
    fn test_parse_missing_names_key_is_error() {
        let result = YamlRosterFile::parse("members: [Ada]");

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_load_roster_reads_file() {
        let path = std::env::temp_dir().join(format!("rollcall-{}.yaml", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "names:\n  - Ada\n  - Grace\n  - Linus\n")
            .await
            .unwrap();

        let roster = YamlRosterFile::new(&path).load_roster().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(roster.names(), ["Ada", "Grace", "Linus"]);
    }

    #[tokio::test]
    async fn test_load_roster_missing_file_is_error() {
        let source = YamlRosterFile::new("/nonexistent/rollcall/roster.yaml");

        let result = source.load_roster().await;

        match result {
            Err(DomainError::Infrastructure(msg)) => {
                assert!(msg.starts_with("failed to read roster file"));
            }
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }
}
