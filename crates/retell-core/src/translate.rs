use async_trait::async_trait;
use tracing::info;

use crate::{
    chunk::{ChunkTransform, split_sentences, transform_chunks},
    error::Result,
    provider::ChatClient,
};

const CHUNK_SIZE: usize = 400;
const PLACEHOLDER: &str = "[Translation failed for this part]";
const SYSTEM_PROMPT: &str = "You are a translator that converts any language into natural English.";

/// Translates one chunk of transcript text to English.
pub struct Translator {
    client: ChatClient,
}

impl Translator {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    /// Translate a full transcript to English in sentence-boundary chunks.
    ///
    /// A chunk that fails to translate is replaced by a placeholder; the rest
    /// of the transcript still comes through.
    pub async fn translate_to_english(&self, text: &str) -> Result<String> {
        let chunks = split_sentences(text, CHUNK_SIZE);
        info!(chunks = chunks.len(), "translating to English");
        Ok(transform_chunks(&chunks, self, PLACEHOLDER, " ").await)
    }
}

#[async_trait]
impl ChunkTransform for Translator {
    async fn apply(&self, chunk: &str) -> Result<String> {
        let user_prompt = format!("Translate this to English:\n\n{chunk}");
        self.client
            .complete(SYSTEM_PROMPT, &user_prompt, 0.2, 5000)
            .await
    }
}
