pub mod config;
pub mod defaults;
pub mod games;
pub mod logger;
