use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    time::SystemTime,
};

use ini::{Ini, Properties};
use tracing::debug;

use super::{CredentialRecord, REDACTED};
use crate::constants::{
    ACCESS_KEY_ID_KEY, CREDENTIALS_FILE_EXTENSION, OUTPUT_KEY, REGION_KEY, SECRET_ACCESS_KEY_KEY,
    SESSION_TOKEN_KEY,
};
use crate::error::FileCredentialsError;

/// One profile section of the credentials file, as written by the rotator
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawProfile {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub region: String,
    pub output: String,
}

impl RawProfile {
    /// Missing keys map to empty strings; key names match case-insensitively
    fn from_ini_section(section: &Properties) -> Self {
        let get = |key: &str| {
            section
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.to_string())
                .unwrap_or_default()
        };

        Self {
            access_key_id: get(ACCESS_KEY_ID_KEY),
            secret_access_key: get(SECRET_ACCESS_KEY_KEY),
            session_token: get(SESSION_TOKEN_KEY),
            region: get(REGION_KEY),
            output: get(OUTPUT_KEY),
        }
    }

    pub fn into_record(self, now: SystemTime) -> CredentialRecord {
        CredentialRecord::expiring(
            self.access_key_id,
            self.secret_access_key,
            self.session_token,
            now,
        )
    }
}

impl fmt::Debug for RawProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawProfile")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &REDACTED)
            .field("session_token", &REDACTED)
            .field("region", &self.region)
            .field("output", &self.output)
            .finish()
    }
}

/// Where to look for the credentials file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    pub dir: PathBuf,
    pub name: OsString,
}

impl SearchPath {
    /// Split a configured path into its directory and base file name
    pub fn from_path(path: &Path) -> Self {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = path
            .file_name()
            .map_or_else(|| path.as_os_str().to_os_string(), ToOwned::to_owned);

        Self { dir, name }
    }

    /// Files to try, in order: the exact name, then the `.ini` sibling
    pub fn candidates(&self) -> [PathBuf; 2] {
        let exact = self.dir.join(&self.name);
        let mut with_ext = self.name.clone();
        with_ext.push(".");
        with_ext.push(CREDENTIALS_FILE_EXTENSION);

        [exact, self.dir.join(with_ext)]
    }

    pub fn not_found(&self) -> FileCredentialsError {
        FileCredentialsError::NotFound {
            name: self.name.to_string_lossy().into_owned(),
            dir: self.dir.clone(),
        }
    }
}

/// Parse file contents and extract one profile
///
/// A fresh parser is built for every call and dropped before returning.
pub fn parse_profile(
    contents: &str,
    path: &Path,
    profile: &str,
) -> Result<RawProfile, FileCredentialsError> {
    let ini = Ini::load_from_str(contents).map_err(|source| FileCredentialsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let section = ini
        .iter()
        .find_map(|(name, props)| {
            name.filter(|name| name.eq_ignore_ascii_case(profile))
                .map(|_| props)
        })
        .ok_or_else(|| FileCredentialsError::ProfileNotFound {
            profile: profile.to_string(),
            path: path.to_path_buf(),
        })?;

    debug!("Found profile [{}] in {}", profile, path.display());
    Ok(RawProfile::from_ini_section(section))
}
