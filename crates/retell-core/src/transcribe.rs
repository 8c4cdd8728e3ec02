use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::{fs, process::Command};
use tracing::info;

use crate::error::{Result, RetellError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Transcript {
    /// Detected-language gate: English transcripts skip the translation stage.
    pub fn is_english(&self) -> bool {
        self.language == "en"
    }
}

/// Transcribe audio using the Whisper CLI.
///
/// Whisper writes `<stem>.json` into the output directory; the detected
/// language comes back in that JSON alongside the text and segments.
pub async fn transcribe_audio(audio_path: &Path, work_dir: &Path) -> Result<Transcript> {
    info!(audio = %audio_path.display(), "transcribing with whisper");
    let output = Command::new("whisper")
        .arg(audio_path)
        .arg("--model")
        .arg("base")
        .arg("--output_format")
        .arg("json")
        .arg("--output_dir")
        .arg(work_dir)
        .output()
        .await?;

    if !output.status.success() {
        return Err(RetellError::TranscriptionFailed {
            audio_path: audio_path.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    // Whisper names its output after the input file
    let stem = audio_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    let json_path = work_dir.join(format!("{stem}.json"));

    let json_content = fs::read_to_string(&json_path).await?;
    let mut transcript: Transcript = serde_json::from_str(&json_content)?;
    transcript.text = transcript.text.trim().to_string();

    info!(
        language = %transcript.language,
        chars = transcript.text.len(),
        "transcription complete"
    );
    Ok(transcript)
}
