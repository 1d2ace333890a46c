//! Amagi: bilingual (English / Indonesian) assistant for a web studio and
//! coding academy. Canned answers first, Gemini for everything else.

pub mod ai;
pub mod composer;
pub mod config;
pub mod content;
pub mod intent;
pub mod locale;
pub mod logger;
pub mod render;
pub mod speech;
pub mod state;
pub mod tone;
pub mod ui;

pub use composer::{Composer, Reply, Turn};
pub use config::Config;
pub use content::ContentStore;
pub use locale::Locale;
pub use state::{ChatState, Message, Sender};
