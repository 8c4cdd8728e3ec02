use std::net::SocketAddr;

use anyhow::Result;
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use clap::{Parser, ValueEnum};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use retell_core::{ChatClient, PipelineRequest, Provider, pipeline};

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Openai,
    Grok,
    Gemini,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Openai => Provider::Openai,
            CliProvider::Grok => Provider::Grok,
            CliProvider::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Parser)]
#[command(name = "retell-server")]
#[command(
    about = "HTTP service that downloads video audio, transcribes it, translates non-English transcripts and returns a summary"
)]
struct Cli {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    addr: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value_t = 15000)]
    port: u16,

    /// AI provider for translation and summarization
    #[arg(short, long, default_value = "openai")]
    provider: CliProvider,
}

#[derive(Clone)]
struct AppState {
    client: ChatClient,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let provider: Provider = cli.provider.into();

    // Validate API key early
    let client = match ChatClient::new(provider) {
        Ok(client) => client,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!(provider = provider.name(), "chat provider ready");

    let app = Router::new()
        .route("/api/transcribe", post(transcribe))
        .with_state(AppState { client });

    let addr: SocketAddr = format!("{}:{}", cli.addr, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "retell server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn transcribe(
    State(state): State<AppState>,
    Json(request): Json<PipelineRequest>,
) -> (StatusCode, Json<Value>) {
    if request.url.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing video URL" })),
        );
    }

    info!(url = %request.url, mode = ?request.summary_mode, "pipeline started");
    match pipeline::run(&request, &state.client).await {
        Ok(output) => (
            StatusCode::OK,
            Json(json!({
                "transcript": output.transcript,
                "translated": output.translated,
                "summary": output.summary,
            })),
        ),
        Err(e) => {
            error!(error = %e, url = %request.url, "pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}
