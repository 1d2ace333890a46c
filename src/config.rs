use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_temperature: f32,
    pub gemini_top_k: u32,
    pub gemini_top_p: f32,
    pub gemini_max_tokens: u32,
    pub content_path: Option<PathBuf>,
    pub simulate_delay: bool,
    pub typing_chars_per_tick: usize,
    pub typing_tick_ms: u64,
    pub window_width: f32,
    pub window_height: f32,
    pub bot_name: String,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        dotenv::dotenv().ok();

        // An empty key counts as missing
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());

        let gemini_model = env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let content_path = env::var("AMAGI_CONTENT_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let simulate_delay = env::var("AMAGI_SIMULATE_DELAY")
            .unwrap_or_else(|_| "true".to_string())
            .to_lowercase() != "false";

        Self {
            gemini_api_key,
            gemini_base_url,
            gemini_model,
            gemini_temperature: env_parse("GEMINI_TEMPERATURE", 0.7),
            gemini_top_k: env_parse("GEMINI_TOP_K", 40),
            gemini_top_p: env_parse("GEMINI_TOP_P", 0.95),
            gemini_max_tokens: env_parse("GEMINI_MAX_TOKENS", 1024),
            content_path,
            simulate_delay,
            typing_chars_per_tick: env_parse("AMAGI_TYPING_CHARS_PER_TICK", 3usize).max(1),
            typing_tick_ms: env_parse("AMAGI_TYPING_TICK_MS", 10),
            window_width: 460.0,
            window_height: 640.0,
            bot_name: "Amagi".to_string(),
        }
    }
}
