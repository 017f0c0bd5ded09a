mod core;
mod loader;
mod scoring;

pub use core::{
    AggregationConfig, AuditConfig, Lexicon, LexiconConfig, ThresholdsConfig,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use scoring::{
    is_valid_weight, ContentWeights, QueryMatchWeights, ScoringWeights, VisibilityWeights,
};
