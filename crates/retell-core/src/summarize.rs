use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    chunk::{ChunkTransform, split_sentences, transform_chunks},
    error::Result,
    provider::ChatClient,
};

const CHUNK_SIZE: usize = 1000;

/// Output style of the summarization stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    #[default]
    Bullet,
    Paragraph,
    Abbreviated,
    Technical,
}

impl SummaryMode {
    fn instruction(&self) -> &'static str {
        match self {
            SummaryMode::Bullet => {
                "You summarize transcripts into short, standalone sentences, \
                 each covering one key fact. Output plain sentences separated \
                 by periods, without bullet markers."
            }
            SummaryMode::Paragraph => {
                "You summarize transcripts into a single flowing paragraph \
                 that captures the main narrative and conclusions."
            }
            SummaryMode::Abbreviated => {
                "You summarize transcripts into at most two sentences covering \
                 only the most important point."
            }
            SummaryMode::Technical => {
                "You summarize transcripts for a technical audience, keeping \
                 exact terminology, names, figures and steps intact."
            }
        }
    }
}

/// Summarizes transcript text chunk by chunk in a selected style.
pub struct Summarizer {
    client: ChatClient,
    mode: SummaryMode,
    custom_prompt: Option<String>,
}

impl Summarizer {
    pub fn new(client: ChatClient, mode: SummaryMode, custom_prompt: Option<String>) -> Self {
        Self {
            client,
            mode,
            custom_prompt,
        }
    }

    fn system_prompt(&self) -> String {
        build_system_prompt(self.mode, self.custom_prompt.as_deref())
    }

    /// Summarize text in sentence-boundary chunks, joining per-chunk results.
    ///
    /// A chunk whose summarization fails contributes a placeholder; the other
    /// sections are unaffected.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let chunks = split_sentences(text, CHUNK_SIZE);
        info!(chunks = chunks.len(), mode = ?self.mode, "summarizing");

        let (placeholder, separator) = match self.mode {
            SummaryMode::Bullet => ("• [Summary failed for this section]", "\n"),
            _ => ("[Summary failed for this section]", "\n\n"),
        };
        Ok(transform_chunks(&chunks, self, placeholder, separator).await)
    }
}

#[async_trait]
impl ChunkTransform for Summarizer {
    async fn apply(&self, chunk: &str) -> Result<String> {
        let user_prompt = format!("Summarize this:\n\n{chunk}");
        let summary = self
            .client
            .complete(&self.system_prompt(), &user_prompt, 0.3, 300)
            .await?;

        Ok(match self.mode {
            SummaryMode::Bullet => to_bullets(&summary),
            _ => summary,
        })
    }
}

fn build_system_prompt(mode: SummaryMode, custom_prompt: Option<&str>) -> String {
    match custom_prompt {
        Some(custom) => format!(
            "{}\n\nAdditional instructions from the user:\n{}",
            mode.instruction(),
            custom
        ),
        None => mode.instruction().to_string(),
    }
}

/// Re-shape a chunk summary into one bullet line per sentence.
fn to_bullets(summary: &str) -> String {
    summary
        .split(". ")
        .map(|sentence| sentence.trim().trim_matches('.'))
        .filter(|sentence| !sentence.is_empty())
        .map(|sentence| format!("• {sentence}."))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_from_lowercase_json() {
        for (raw, expected) in [
            ("\"bullet\"", SummaryMode::Bullet),
            ("\"paragraph\"", SummaryMode::Paragraph),
            ("\"abbreviated\"", SummaryMode::Abbreviated),
            ("\"technical\"", SummaryMode::Technical),
        ] {
            let mode: SummaryMode = serde_json::from_str(raw).unwrap();
            assert_eq!(mode, expected);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(serde_json::from_str::<SummaryMode>("\"haiku\"").is_err());
    }

    #[test]
    fn default_mode_is_bullet() {
        assert_eq!(SummaryMode::default(), SummaryMode::Bullet);
    }

    #[test]
    fn bullets_split_on_sentence_boundaries() {
        let bullets = to_bullets("The talk covers Rust. It ends with questions.");
        assert_eq!(
            bullets,
            "• The talk covers Rust.\n• It ends with questions."
        );
    }

    #[test]
    fn bullets_skip_empty_sentences() {
        assert_eq!(to_bullets("Only one point."), "• Only one point.");
        assert_eq!(to_bullets(""), "");
    }

    #[test]
    fn custom_prompt_is_appended_to_instruction() {
        let prompt =
            build_system_prompt(SummaryMode::Technical, Some("Focus on the benchmarks."));
        assert!(prompt.contains("technical audience"));
        assert!(prompt.ends_with("Focus on the benchmarks."));

        let plain = build_system_prompt(SummaryMode::Technical, None);
        assert!(!plain.contains("Additional instructions"));
    }
}
