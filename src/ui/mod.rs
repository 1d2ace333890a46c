/// Desktop chat window
pub mod app;
pub mod chat;

pub use app::ChatApp;
