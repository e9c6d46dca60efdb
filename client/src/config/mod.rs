mod config;
mod opponent_kind;

pub use config::{Config, get_config_manager};
pub use opponent_kind::OpponentKind;
