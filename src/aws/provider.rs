use std::{
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use aws_credential_types::provider::{self, ProvideCredentials, error::CredentialsError, future};
use tokio::fs;
use tracing::{debug, info, warn};

use super::{
    CredentialRecord,
    credentials::{self, SearchPath},
};
use crate::{
    constants::{self, DEFAULT_PROFILE},
    error::{ErrorKind, FileCredentialsError},
};

/// Reads short-lived credentials from a file kept fresh by an external rotator
///
/// Holds no state between calls: every retrieval re-reads the file, and every
/// record it returns expires two minutes later so the SDK keeps coming back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCredentialsProvider {
    file_path: PathBuf,
    profile: String,
}

impl FileCredentialsProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }

    /// Provider for the shared credentials file
    /// Respects AWS_SHARED_CREDENTIALS_FILE environment variable if set
    pub fn from_env() -> Self {
        Self::new(constants::get_aws_credentials_path().unwrap_or_default())
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub async fn retrieve(&self) -> Result<CredentialRecord, FileCredentialsError> {
        let search = self.search_path()?;

        for candidate in search.candidates() {
            let read = fs::read_to_string(&candidate).await;
            if let Some(contents) = self.check_read(&candidate, read)? {
                return self.build_record(&candidate, &contents);
            }
        }

        Err(self.not_found(&search))
    }

    /// Same as [`retrieve`](Self::retrieve), for callers outside an async runtime
    pub fn retrieve_blocking(&self) -> Result<CredentialRecord, FileCredentialsError> {
        let search = self.search_path()?;

        for candidate in search.candidates() {
            let read = std::fs::read_to_string(&candidate);
            if let Some(contents) = self.check_read(&candidate, read)? {
                return self.build_record(&candidate, &contents);
            }
        }

        Err(self.not_found(&search))
    }

    fn search_path(&self) -> Result<SearchPath, FileCredentialsError> {
        if self.file_path.as_os_str().is_empty() {
            warn!("No credentials file path configured");
            return Err(FileCredentialsError::EmptyPath);
        }

        let search = SearchPath::from_path(&self.file_path);
        debug!(
            "Looking for credentials file {:?} in {}",
            search.name,
            search.dir.display()
        );
        Ok(search)
    }

    /// `Ok(None)` means the candidate does not exist and the next one should be tried
    fn check_read(
        &self,
        candidate: &Path,
        read: io::Result<String>,
    ) -> Result<Option<String>, FileCredentialsError> {
        match read {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => {
                warn!(
                    "Error reading credentials file {}: {}",
                    candidate.display(),
                    source
                );
                Err(FileCredentialsError::Io {
                    path: candidate.to_path_buf(),
                    source,
                })
            }
        }
    }

    fn not_found(&self, search: &SearchPath) -> FileCredentialsError {
        let err = search.not_found();
        warn!("{}", err);
        err
    }

    fn build_record(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<CredentialRecord, FileCredentialsError> {
        let raw = credentials::parse_profile(contents, path, &self.profile)
            .inspect_err(|e| warn!("Error loading credentials: {}", e))?;

        let record = raw.into_record(SystemTime::now());
        if let Some(expires_at) = record.expires_at {
            info!("Credentials from {} will expire at: {}", path.display(), expires_at);
        }
        Ok(record)
    }

    async fn load_credentials(&self) -> provider::Result {
        match self.retrieve().await {
            Ok(record) => Ok(record.into()),
            Err(e) if e.kind() == ErrorKind::Configuration => {
                Err(CredentialsError::invalid_configuration(e))
            }
            Err(e) => Err(CredentialsError::provider_error(e)),
        }
    }
}

impl ProvideCredentials for FileCredentialsProvider {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::new(self.load_credentials())
    }
}
