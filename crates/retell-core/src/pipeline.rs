use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    cookies::CookieFile,
    error::Result,
    media::{convert_to_wav, download_audio},
    provider::ChatClient,
    summarize::{Summarizer, SummaryMode},
    transcribe::transcribe_audio,
    translate::Translator,
};

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRequest {
    // Defaulted so an absent url reaches the handler's own 400 response
    // instead of a generic body rejection.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub summary_mode: SummaryMode,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub transcript: String,
    pub translated: String,
    pub summary: String,
}

/// Run the full pipeline for one request.
///
/// Strictly linear: cookies → download → convert → transcribe → translate
/// (skipped for English) → summarize. Any stage error aborts the request;
/// only per-chunk transform failures inside translation and summarization
/// degrade without aborting. The cookie file and the work directory are both
/// scoped to this call and removed on every exit path.
pub async fn run(request: &PipelineRequest, client: &ChatClient) -> Result<PipelineOutput> {
    // Acquired first so a missing credential fails before any subprocess runs.
    let cookies = CookieFile::from_env()?;
    let work_dir = tempfile::tempdir()?;

    let raw_audio = work_dir.path().join("audio.webm");
    download_audio(&request.url, cookies.path(), &raw_audio).await?;

    let wav_audio = work_dir.path().join("audio.wav");
    convert_to_wav(&raw_audio, &wav_audio).await?;

    let transcript = transcribe_audio(&wav_audio, work_dir.path()).await?;

    let translated = if transcript.is_english() {
        info!("transcript already in English, skipping translation");
        transcript.text.clone()
    } else {
        info!(language = %transcript.language, "translating transcript");
        Translator::new(client.clone())
            .translate_to_english(&transcript.text)
            .await?
    };

    let summary = Summarizer::new(
        client.clone(),
        request.summary_mode,
        request.custom_prompt.clone(),
    )
    .summarize(&translated)
    .await?;

    Ok(PipelineOutput {
        transcript: transcript.text,
        translated,
        summary,
    })
}
