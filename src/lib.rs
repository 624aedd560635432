//! Short-lived AWS credentials read from a file that an external rotator keeps up to date.
//!
//! ```no_run
//! use filecreds::FileCredentialsProvider;
//!
//! # async fn run() -> Result<(), filecreds::FileCredentialsError> {
//! let provider = FileCredentialsProvider::new("/var/run/rotator/credentials");
//! let record = provider.retrieve().await?;
//! assert!(record.can_expire());
//! # Ok(())
//! # }
//! ```

pub mod aws;
pub mod constants;
pub mod error;

pub use aws::{CredentialRecord, credentials::RawProfile, provider::FileCredentialsProvider};
pub use constants::FILE_CREDENTIALS_NAME;
pub use error::{ErrorKind, FileCredentialsError};
