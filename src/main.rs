//! Declutter Droid entry point.
//!
//! Usage: `declutter-droid [demo|full]`. `demo` processes 3 emails, `full`
//! processes 5. The strategy comes from `CLEANUP_STRATEGY` (`unsubscribe`,
//! the default, or `label`).

use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

use declutter_droid::agent::{CleanupStrategy, DeclutterAgent};
use declutter_droid::adb::{discover_device, AdbDevice};
use declutter_droid::model::{ChatVisionClient, GeminiClient, ProviderConfig, VisionRouter};
use declutter_droid::settings::{Settings, GROQ_BASE_URL};

const DEMO_EMAILS: u32 = 3;
const FULL_EMAILS: u32 = 5;

fn email_budget() -> u32 {
    match env::args().nth(1).as_deref() {
        Some("demo") | None => DEMO_EMAILS,
        Some("full") => FULL_EMAILS,
        Some(other) => {
            eprintln!("Unknown mode '{}', expected 'demo' or 'full'; running demo", other);
            DEMO_EMAILS
        }
    }
}

fn build_router(settings: &Settings) -> VisionRouter {
    let mut router = VisionRouter::new();

    if let Some(key) = &settings.groq_api_key {
        let config = ProviderConfig::new(GROQ_BASE_URL, key, &settings.groq_model)
            .with_backup_model(&settings.groq_backup_model);
        router = router.with_backend(Box::new(ChatVisionClient::new(config)));
        tracing::info!("🧠 Groq vision enabled ({})", settings.groq_model);
    }

    if let Some(key) = &settings.gemini_api_key {
        router = router.with_backend(Box::new(GeminiClient::new(key, &settings.gemini_model)));
        tracing::info!("🧠 Gemini vision enabled ({})", settings.gemini_model);
    }

    router
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("🤖 Declutter Droid starting up");

    let settings = Settings::from_env();

    // Credentials are checked before any device contact
    if !settings.has_vision_provider() {
        tracing::error!("❌ No vision provider configured: set GROQ_API_KEY or GEMINI_API_KEY");
        process::exit(1);
    }

    let serial = match settings.device_serial.clone() {
        Some(serial) => Some(serial),
        None => match discover_device().await {
            Ok(info) => {
                tracing::info!("📱 Using device {}", info.serial);
                Some(info.serial)
            }
            Err(e) => {
                tracing::error!("❌ {}", e);
                process::exit(1);
            }
        },
    };

    let strategy = CleanupStrategy::parse(
        &env::var("CLEANUP_STRATEGY").unwrap_or_else(|_| "unsubscribe".into()),
    );
    let num_emails = email_budget();

    let device = AdbDevice::new(serial, settings.output_dir.clone());
    let router = build_router(&settings);
    let agent = DeclutterAgent::new(device, router);

    tracing::info!("🧹 Strategy: {:?}, batch size: {}", strategy, num_emails);
    let summary = agent.run(strategy, num_emails).await;

    tracing::info!(
        "🎉 Done! {}/{} emails cleaned",
        summary.processed,
        summary.attempted
    );
}
