/// Environment-driven configuration for provider selection and
/// generation defaults.
pub mod config;
