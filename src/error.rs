use std::{io, path::PathBuf};

use thiserror::Error;

use crate::aws::CredentialRecord;

/// Broad failure category, used by credential chains to decide on retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The provider was never given a usable path
    Configuration,
    /// The credentials file is missing or unreadable
    Io,
    /// The file is malformed or does not contain the requested profile
    Format,
}

#[derive(Error, Debug)]
pub enum FileCredentialsError {
    #[error("rotating credentials are empty")]
    EmptyPath,

    #[error("credentials file \"{name}\" not found in {}", dir.display())]
    NotFound { name: String, dir: PathBuf },

    #[error("failed to read credentials file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse credentials file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("profile [{profile}] not found in credentials file {}", path.display())]
    ProfileNotFound { profile: String, path: PathBuf },
}

impl FileCredentialsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPath => ErrorKind::Configuration,
            Self::NotFound { .. } | Self::Io { .. } => ErrorKind::Io,
            Self::Parse { .. } | Self::ProfileNotFound { .. } => ErrorKind::Format,
        }
    }

    /// Whether re-invoking the provider later may succeed without intervention,
    /// e.g. once an external rotator has (re)written the file
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Io
    }

    /// The record reported alongside this failure: source tag only, no secrets
    pub fn record(&self) -> CredentialRecord {
        CredentialRecord::source_only()
    }
}
