use std::sync::Arc;

use smart_apply::channels::CliChannel;
use smart_apply::config::AppConfig;
use smart_apply::intake::{IntakeController, IntakeService, intake_routes};
use smart_apply::llm::create_provider;
use smart_apply::synthesis::{CrewSynthesizer, Synthesizer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("  export ANTHROPIC_API_KEY=sk-ant-...");
        eprintln!("  (or SMART_APPLY_BACKEND=openai with OPENAI_API_KEY=sk-...)");
        std::process::exit(1);
    });

    eprintln!("🚀 SmartApply v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.llm.model);
    match config.intake.synthesis_timeout {
        Some(limit) => eprintln!("   Synthesis timeout: {}s", limit.as_secs()),
        None => eprintln!("   Synthesis timeout: none"),
    }

    // ── Synthesis ───────────────────────────────────────────────────────
    let llm = create_provider(&config.llm)?;
    let synthesizer: Arc<dyn Synthesizer> =
        Arc::new(CrewSynthesizer::new(llm, config.synthesis.clone()));

    // ── Intake session ──────────────────────────────────────────────────
    let controller = IntakeController::new(synthesizer, config.intake.clone());
    let service = Arc::new(IntakeService::new(controller));

    // ── HTTP API ────────────────────────────────────────────────────────
    if let Some(port) = config.http_port {
        let app = intake_routes(Arc::clone(&service));
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
        eprintln!("   Chat API: http://0.0.0.0:{}/api/intake/message", port);
        tokio::spawn(async move {
            tracing::info!(port, "Intake HTTP server started");
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Intake HTTP server stopped: {}", e);
            }
        });
    }

    eprintln!("   Type 'hi' to start, 'restart' to begin again. Ctrl-D to exit.\n");

    let cli = CliChannel::new();
    service.run_channel(&cli).await?;

    Ok(())
}
