use std::path::Path;

use tokio::process::Command;
use tracing::info;

use crate::error::{Result, RetellError};

/// Download the best audio stream for a video URL using yt-dlp.
pub async fn download_audio(url: &str, cookies_path: &Path, out_path: &Path) -> Result<()> {
    info!(url, out = %out_path.display(), "downloading audio with yt-dlp");
    let output = Command::new("yt-dlp")
        .arg("--cookies")
        .arg(cookies_path)
        .arg("-f")
        .arg("bestaudio")
        .arg("-o")
        .arg(out_path)
        .arg(url)
        .output()
        .await?;

    if !output.status.success() {
        return Err(RetellError::DownloadFailed {
            url: url.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}

/// Convert downloaded audio to 16 kHz mono WAV using ffmpeg.
pub async fn convert_to_wav(input: &Path, output_path: &Path) -> Result<()> {
    info!(input = %input.display(), out = %output_path.display(), "converting to wav");
    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .arg("-ar")
        .arg("16000")
        .arg("-ac")
        .arg("1")
        .arg(output_path)
        .output()
        .await?;

    if !output.status.success() {
        return Err(RetellError::ConversionFailed {
            input: input.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}
