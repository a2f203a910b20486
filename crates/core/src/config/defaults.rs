//! Default values and functions for configuration

use super::UnsupportedResultPolicy;

pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";
pub(crate) const DEFAULT_MAX_NESTING_DEPTH: usize = 8;
pub(crate) const MAX_NESTING_DEPTH_LIMIT: usize = 64;

pub(crate) const VALID_LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_unsupported_results() -> UnsupportedResultPolicy {
    UnsupportedResultPolicy::Log
}

pub(crate) fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

pub(crate) fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
