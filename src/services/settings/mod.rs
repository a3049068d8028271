// Settings service module
// Loads and saves EngineSettings as a TOML file

mod service;

pub use service::SettingsService;
