use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetellError {
    #[error("Missing cookies: {env_var} environment variable is not set")]
    MissingCookies { env_var: String },

    #[error("Invalid cookies: {env_var} is not valid base64: {reason}")]
    InvalidCookies { env_var: String, reason: String },

    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Audio conversion failed for {input}: {reason}")]
    ConversionFailed { input: PathBuf, reason: String },

    #[error("Transcription failed for {audio_path}: {reason}")]
    TranscriptionFailed { audio_path: PathBuf, reason: String },

    #[error("Invalid API response: {reason}")]
    ApiResponseInvalid { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },
}

pub type Result<T> = std::result::Result<T, RetellError>;
