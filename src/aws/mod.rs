use std::{fmt, time::SystemTime};

use aws_smithy_types::DateTime;

use crate::constants::{CREDENTIALS_EXPIRY_WINDOW, FILE_CREDENTIALS_NAME};

pub mod credentials;
pub mod provider;

const REDACTED: &str = "********";

/// Credentials handed back to the credential chain
#[derive(Clone, PartialEq)]
pub struct CredentialRecord {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub source: &'static str,
    pub expires_at: Option<DateTime>,
}

impl CredentialRecord {
    /// Record reported on failure so the chain can attribute the error
    pub fn source_only() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: String::new(),
            source: FILE_CREDENTIALS_NAME,
            expires_at: None,
        }
    }

    /// Build a record that expires `CREDENTIALS_EXPIRY_WINDOW` after `now`
    pub(crate) fn expiring(
        access_key_id: String,
        secret_access_key: String,
        session_token: String,
        now: SystemTime,
    ) -> Self {
        Self {
            access_key_id,
            secret_access_key,
            session_token,
            source: FILE_CREDENTIALS_NAME,
            expires_at: Some(DateTime::from(now + CREDENTIALS_EXPIRY_WINDOW)),
        }
    }

    pub fn can_expire(&self) -> bool {
        self.expires_at.is_some()
    }

    fn expires_after(&self) -> Option<SystemTime> {
        self.expires_at.and_then(|at| SystemTime::try_from(at).ok())
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &REDACTED)
            .field("session_token", &REDACTED)
            .field("source", &self.source)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl From<CredentialRecord> for aws_credential_types::Credentials {
    fn from(record: CredentialRecord) -> Self {
        let expires_after = record.expires_after();
        let session_token = Some(record.session_token).filter(|token| !token.is_empty());

        aws_credential_types::Credentials::new(
            record.access_key_id,
            record.secret_access_key,
            session_token,
            expires_after,
            record.source,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_record(now: SystemTime) -> CredentialRecord {
        CredentialRecord::expiring(
            "ak1".to_string(),
            "sk1".to_string(),
            "tok1".to_string(),
            now,
        )
    }

    #[test]
    fn test_expiring_record_window() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let record = sample_record(now);

        assert!(record.can_expire());
        assert_eq!(record.source, FILE_CREDENTIALS_NAME);
        assert_eq!(record.expires_at.unwrap().secs(), 1_700_000_120);
    }

    #[test]
    fn test_source_only_record() {
        let record = CredentialRecord::source_only();
        assert_eq!(record.source, FILE_CREDENTIALS_NAME);
        assert!(record.access_key_id.is_empty());
        assert!(!record.can_expire());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let output = format!("{:?}", sample_record(SystemTime::now()));
        assert!(output.contains("ak1"));
        assert!(!output.contains("sk1"));
        assert!(!output.contains("tok1"));
        assert!(output.contains(REDACTED));
    }

    #[test]
    fn test_into_sdk_credentials() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let creds: aws_credential_types::Credentials = sample_record(now).into();

        assert_eq!(creds.access_key_id(), "ak1");
        assert_eq!(creds.secret_access_key(), "sk1");
        assert_eq!(creds.session_token(), Some("tok1"));
        assert_eq!(
            creds.expiry(),
            Some(now + CREDENTIALS_EXPIRY_WINDOW)
        );
    }

    #[test]
    fn test_into_sdk_credentials_without_token() {
        let mut record = sample_record(SystemTime::now());
        record.session_token.clear();

        let creds: aws_credential_types::Credentials = record.into();
        assert_eq!(creds.session_token(), None);
    }
}
