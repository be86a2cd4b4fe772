pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod scanner;
pub mod tree;

pub use config::{AppConfig, APP_UNIT};
pub use engine::{ScanEngine, ScanResult};
pub use error::Error;
pub use tree::{TemplateTree, TreeBuilder};
