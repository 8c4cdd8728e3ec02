use std::{env, io::Write, path::Path};

use base64::{Engine as _, engine::general_purpose};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, RetellError};

/// Environment variable holding the base64-encoded cookies for yt-dlp.
pub const COOKIES_ENV: &str = "YOUTUBE_COOKIES_BASE64";

/// Cookies decoded from the environment into a temp file for yt-dlp.
///
/// Scoped to one request: the file is removed when the value drops, on every
/// exit path, so concurrent requests never share cookie state.
#[derive(Debug)]
pub struct CookieFile {
    file: NamedTempFile,
}

impl CookieFile {
    /// Decode `YOUTUBE_COOKIES_BASE64` into a fresh temp file.
    ///
    /// Fails with [`RetellError::MissingCookies`] when the variable is unset,
    /// before any external process is spawned.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(COOKIES_ENV)
    }

    fn from_env_var(env_var: &str) -> Result<Self> {
        let encoded = env::var(env_var).map_err(|_| RetellError::MissingCookies {
            env_var: env_var.to_string(),
        })?;

        let decoded = general_purpose::STANDARD.decode(encoded.trim()).map_err(|e| {
            RetellError::InvalidCookies {
                env_var: env_var.to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut file = NamedTempFile::with_suffix(".txt")?;
        file.write_all(&decoded)?;
        file.flush()?;
        debug!(path = %file.path().display(), "cookies written to temp file");

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose;

    // Each test uses its own variable name so parallel tests don't race on
    // shared env state.

    #[test]
    fn missing_env_var_is_an_error() {
        let err = CookieFile::from_env_var("RETELL_TEST_COOKIES_MISSING").unwrap_err();
        assert!(matches!(err, RetellError::MissingCookies { .. }));
    }

    #[test]
    fn decodes_cookies_into_temp_file() {
        let var = "RETELL_TEST_COOKIES_VALID";
        let encoded = general_purpose::STANDARD.encode(b"# Netscape HTTP Cookie File\n");
        unsafe { env::set_var(var, &encoded) };

        let cookies = CookieFile::from_env_var(var).unwrap();
        let contents = std::fs::read(cookies.path()).unwrap();
        assert_eq!(contents, b"# Netscape HTTP Cookie File\n");

        unsafe { env::remove_var(var) };
    }

    #[test]
    fn invalid_base64_is_an_error() {
        let var = "RETELL_TEST_COOKIES_GARBAGE";
        unsafe { env::set_var(var, "not!!valid@@base64") };

        let err = CookieFile::from_env_var(var).unwrap_err();
        assert!(matches!(err, RetellError::InvalidCookies { .. }));

        unsafe { env::remove_var(var) };
    }

    #[test]
    fn file_is_removed_on_drop() {
        let var = "RETELL_TEST_COOKIES_DROP";
        unsafe { env::set_var(var, general_purpose::STANDARD.encode(b"cookie")) };

        let cookies = CookieFile::from_env_var(var).unwrap();
        let path = cookies.path().to_path_buf();
        assert!(path.exists());
        drop(cookies);
        assert!(!path.exists());

        unsafe { env::remove_var(var) };
    }
}
