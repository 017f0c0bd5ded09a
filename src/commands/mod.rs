pub mod analyze;
pub mod init;

pub use analyze::{build_report, handle_analyze, AnalyzeConfig, Tool};
pub use init::{default_config_toml, init_config};
