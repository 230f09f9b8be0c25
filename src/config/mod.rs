// ==========================================
// Configuration layer
// ==========================================

pub mod settings;

pub use settings::{DatabaseSettings, Settings};
