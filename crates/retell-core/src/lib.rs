//! Retell Core Library
//!
//! Core functionality for downloading video audio, transcribing with Whisper,
//! translating non-English transcripts to English, and producing summaries.

pub mod chunk;
pub mod cookies;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod provider;
pub mod summarize;
pub mod transcribe;
pub mod translate;

// Re-export commonly used items at crate root
pub use chunk::{ChunkTransform, split_sentences, transform_chunks};
pub use cookies::CookieFile;
pub use error::{Result, RetellError};
pub use media::{convert_to_wav, download_audio};
pub use pipeline::{PipelineOutput, PipelineRequest};
pub use provider::{ChatClient, Provider, ProviderConfig};
pub use summarize::{Summarizer, SummaryMode};
pub use transcribe::{Segment, Transcript, transcribe_audio};
pub use translate::Translator;
