pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    InputSource, apply_generate_overrides, apply_pattern_overrides, build_rng, classify_report,
    load_run_config, load_urls_from_source, write_default_config,
};
