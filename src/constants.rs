use std::{env, path::PathBuf, time::Duration};

use dirs;

/// Name attached to every record this provider returns, successful or not
pub const FILE_CREDENTIALS_NAME: &str = "Filecredentials";

/// How long a retrieved record stays valid before the SDK asks again
pub const CREDENTIALS_EXPIRY_WINDOW: Duration = Duration::from_secs(2 * 60);

/// Profile section read when none is configured
pub const DEFAULT_PROFILE: &str = "default";

/// Extension tried after the exact file name when locating the file
pub const CREDENTIALS_FILE_EXTENSION: &str = "ini";

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS shared credentials file name
pub const AWS_CREDENTIALS_FILE_NAME: &str = "credentials";

/// Environment variable overriding the shared credentials file location
pub const AWS_SHARED_CREDENTIALS_FILE_ENV: &str = "AWS_SHARED_CREDENTIALS_FILE";

pub const ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY_KEY: &str = "aws_secret_access_key";
pub const SESSION_TOKEN_KEY: &str = "aws_session_token";
pub const REGION_KEY: &str = "region";
pub const OUTPUT_KEY: &str = "output";

/// Get the AWS credentials file path
/// Respects AWS_SHARED_CREDENTIALS_FILE environment variable if set
pub fn get_aws_credentials_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(AWS_SHARED_CREDENTIALS_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_CREDENTIALS_FILE_NAME))
}
