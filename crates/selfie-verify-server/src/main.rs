//! Server binary: CLI parsing, engine assembly, serving.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use selfie_verify_adapters::{
    get_device, models, CandleSceneBackend, ImageNetPreprocessor, SceneBackendConfig,
};
use selfie_verify_core::{
    DisabledFaceDetector, EngineConfig, LabelTaxonomy, VerificationEngine,
};
use selfie_verify_server::{create_router, AppState, ModelMetadata};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Outdoor selfie verification service.
#[derive(Parser)]
#[command(name = "selfie-verify-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 50051)]
    port: u16,

    /// Path to the scene model weights (downloaded if omitted)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Worker threads for the async runtime
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Aggregate outdoor-score threshold (0.0-1.0)
    #[arg(long, default_value_t = 0.6)]
    outdoor_threshold: f32,

    /// Minimum corroborating outdoor labels in the top predictions
    #[arg(long, default_value_t = 2)]
    min_outdoor_labels: usize,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let model_path = match &args.model {
        Some(path) => path.clone(),
        None => models::ensure_scene_model().context("failed to fetch scene model")?,
    };

    let taxonomy = LabelTaxonomy::default();
    let backend = CandleSceneBackend::from_file(
        &model_path,
        &SceneBackendConfig {
            num_classes: taxonomy.len(),
        },
        get_device(),
    )
    .context("failed to load scene model")?;

    let preprocessor = ImageNetPreprocessor::default();
    let metadata = ModelMetadata {
        name: "selfie-verify-scene-classifier".to_string(),
        version: VerificationEngine::version().to_string(),
        input_width: preprocessor.target_width(),
        input_height: preprocessor.target_height(),
    };

    let engine = VerificationEngine::new(
        EngineConfig {
            outdoor_threshold: args.outdoor_threshold,
            label_threshold: args.outdoor_threshold,
            min_outdoor_labels: args.min_outdoor_labels,
            ..EngineConfig::default()
        },
        Box::new(preprocessor),
        Box::new(backend),
        Box::new(DisabledFaceDetector),
        taxonomy,
    )
    .context("failed to construct verification engine")?;

    let state = AppState {
        engine: Arc::new(engine),
        model: metadata,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(args.threads)
        .enable_all()
        .build()
        .context("failed to build async runtime")?;

    runtime.block_on(serve(state, args.port))
}

async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
