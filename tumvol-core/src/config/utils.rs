//! Configuration utility functions
//!
//! This module provides helper functions for reading configuration
//! defaults from environment variables.

/// Get a f64 value from an environment variable or use the default
pub fn get_env_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(val) => val.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

/// Get a f64 value from an environment variable, or None if unset or unparseable
pub fn get_env_opt_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|val| val.trim().parse().ok())
}

/// Get a boolean value from an environment variable or use the default
pub fn get_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => val.to_lowercase() == "true" || val == "1",
        Err(_) => default,
    }
}
