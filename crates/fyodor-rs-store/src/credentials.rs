//! Store credentials descriptor.

use crate::error::StoreError;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Credentials identifying which store project records belong to.
///
/// The file uses the service-account JSON layout; only `project_id` is
/// required, other keys are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoreCredentials {
    /// Project that owns the message collection.
    pub project_id: String,
    /// Service account the credentials were issued to, if present.
    #[serde(default)]
    pub client_email: Option<String>,
}

impl StoreCredentials {
    /// Read and validate credentials from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            StoreError::Credentials(format!("failed to read {}: {err}", path.display()))
        })?;
        let credentials = Self::from_json(&contents)?;
        debug!(
            "loaded store credentials (path={}, project_id={}, client_email={})",
            path.display(),
            credentials.project_id,
            credentials.client_email.as_deref().unwrap_or("-")
        );
        Ok(credentials)
    }

    /// Parse and validate credentials from JSON contents.
    pub fn from_json(contents: &str) -> Result<Self, StoreError> {
        let credentials: Self = serde_json::from_str(contents)
            .map_err(|err| StoreError::Credentials(err.to_string()))?;
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<(), StoreError> {
        let project_id = self.project_id.trim();
        if project_id.is_empty() {
            return Err(StoreError::Credentials(
                "project_id must not be empty".to_string(),
            ));
        }
        // project ids become directory names
        let valid = project_id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !valid || project_id != self.project_id {
            return Err(StoreError::Credentials(format!(
                "project_id contains unsupported characters: {:?}",
                self.project_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StoreCredentials;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_service_account_file() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("creds.json");
        fs::write(
            &path,
            r#"{"type":"service_account","project_id":"fyodor-prod","client_email":"bot@example.com","private_key":"x"}"#,
        )
        .expect("write");
        let credentials = StoreCredentials::load(&path).expect("credentials");
        assert_eq!(credentials.project_id, "fyodor-prod");
        assert_eq!(credentials.client_email.as_deref(), Some("bot@example.com"));
    }

    #[test]
    fn rejects_missing_file() {
        let temp = tempdir().expect("tempdir");
        let err = StoreCredentials::load(temp.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn rejects_path_like_project_id() {
        let err = StoreCredentials::from_json(r#"{"project_id":"../escape"}"#).unwrap_err();
        assert!(err.to_string().contains("unsupported characters"));
        assert!(StoreCredentials::from_json(r#"{"project_id":""}"#).is_err());
    }
}
