mod config;
mod logging;

pub use config::{load_config, resolve_upstream};
pub use logging::{init_logging, print_config_summary, report_filter_load};
