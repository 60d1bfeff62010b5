pub mod manager;
pub mod types;
pub mod validation;

pub use manager::{ConfigError, ConfigManager};
pub use types::{Settings, TagplanConfig, CONFIG_VERSION};
pub use validation::{
    validate_batch_size, validate_region, validate_requests_per_second, validate_settings,
    validate_view_name, ValidationError,
};
