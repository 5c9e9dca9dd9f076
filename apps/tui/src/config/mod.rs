#[allow(clippy::module_inception)]
mod config;

pub use config::{
    database_url_for, init_app_config, is_valid_range, AppConfig, CurrentUser, DEFAULT_CENTER, DEFAULT_RANGE_NM,
};
