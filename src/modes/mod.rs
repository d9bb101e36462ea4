pub mod play;
pub mod settings;
pub mod ticker;

pub use play::PlayMode;
pub use settings::SettingsMode;
pub use ticker::Ticker;
