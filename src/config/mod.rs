pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::{DEFAULT_API_URL, DEFAULT_DATA_DIR, DEFAULT_TIMEOUT_SECS};
pub use loader::ConfigLoader;
pub use types::*;
