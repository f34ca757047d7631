pub mod config;
pub mod configurator;
pub mod constants;
pub mod geo;
pub mod story;
