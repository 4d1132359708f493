// Utils compartidos

pub mod constants;
pub mod storage;
pub mod spawn;
pub mod timers;
pub mod i18n;

pub use constants::*;
pub use storage::{load_json, save_json, KeyValueStore, LocalStorageStore};
pub use spawn::BrowserSpawner;
pub use timers::{BrowserTimers, TimerHost};
pub use i18n::{t, DEFAULT_LANG};
