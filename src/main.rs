use amagi::ai::{GeminiClient, TextGenerator};
use amagi::ui::ChatApp;
use amagi::{logger, Composer, Config, ContentStore};
use anyhow::Context;
use eframe::NativeOptions;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // Logging first
    logger::init();
    log::info!("🚀 Amagi started");

    // Tokio runtime for the Gemini requests
    let rt = tokio::runtime::Runtime::new().context("cannot start tokio runtime")?;
    let _guard = rt.enter();

    let config = Config::default();
    log::info!("📁 Configuration loaded");

    let store = ContentStore::load_or_builtin(config.content_path.as_deref())?;
    let gemini = GeminiClient::new(&config);
    if !gemini.is_configured() {
        log::warn!("⚠️ GEMINI_API_KEY is not set, unmatched questions get the fallback reply");
    }
    let generator: Arc<dyn TextGenerator> = Arc::new(gemini);
    let composer = Composer::new(Arc::new(store), generator).with_simulated_delay(config.simulate_delay);

    let title = config.bot_name.clone();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([360.0, 480.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(Box::new(ChatApp::new(config, composer)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
