//! The `log` module defines an interface to the crate's internal logging facilities.
//! The tables emit `trace!` messages on their structural mutations (upsert hits,
//! closed-table assign misses, erases), which is handy when debugging why an entity's
//! property ended up with a surprising value.
//!
//! This module (re)exports the five logging macros: `error!`, `warn!`, `info!`,
//! `debug!` and `trace!` where `error!` represents the highest-priority log messages
//! and `trace!` the lowest. To emit a log message, simply use one of these macros in
//! your code:
//!
//! ```rust
//! use multikey::info;
//!
//! pub fn do_a_thing() {
//!     info!("A thing is being done.");
//! }
//! ```
//!
//! Logging is _disabled_ by default. Log messages are enabled/disabled using the
//! functions:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with priority at
//!    least `level`
//!
//! In addition, per-module filtering of messages can be configured using
//! `set_module_filter()` / `set_module_filters()` and `remove_module_filter()`. Module
//! filters take effect when the logger is installed, which happens on the first call
//! to any of the functions above.

use env_logger::{Builder, WriteStyle};
pub use log::{debug, error, info, trace, warn, LevelFilter};

use std::collections::HashMap;
use std::sync::Mutex;

// Logging disabled.
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;
// Automatically determine if output supports color.
const DEFAULT_LOG_STYLE: WriteStyle = WriteStyle::Auto;

/// A global instance of the logging configuration.
static LOG_CONFIGURATION: Mutex<Option<LogConfiguration>> = Mutex::new(None);

/// Holds logging configuration. `env_logger::Builder` cannot be modified once built
/// and the global logger cannot be installed twice, so this struct serves as the
/// mutable proxy: it accumulates the desired filters, installs the logger on first
/// use, and afterwards adjusts the globally enforced maximum level.
struct LogConfiguration {
    /// The "default" level filter for modules ("targets") without an explicitly set
    /// filter. A global filter level of `LevelFilter::Off` disables logging.
    global_log_level: LevelFilter,
    /// Whether to colorize output.
    log_style: WriteStyle,
    /// Holds module ("target") specific level filters
    module_level: HashMap<String, LevelFilter>,
    /// Whether the global logger has been installed.
    installed: bool,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        LogConfiguration {
            global_log_level: DEFAULT_LOG_LEVEL,
            log_style: DEFAULT_LOG_STYLE,
            module_level: HashMap::new(),
            installed: false,
        }
    }
}

impl LogConfiguration {
    /// Installs the logger on first use; afterwards only the maximum level can change.
    fn apply(&mut self) {
        if !self.installed {
            let mut builder = Builder::new();
            builder
                .filter_level(self.global_log_level)
                .write_style(self.log_style);
            for (module, filter) in &self.module_level {
                builder.filter(Some(module), *filter);
            }
            // A second logger may already be installed by the embedding application;
            // in that case we only drive `log::set_max_level` below.
            let _ = log::set_boxed_logger(Box::new(builder.build()));
            self.installed = true;
        }
        log::set_max_level(self.effective_max_level());
    }

    /// The loosest level any configured filter wants; the per-module filters still
    /// apply underneath it.
    fn effective_max_level(&self) -> LevelFilter {
        self.module_level
            .values()
            .copied()
            .chain(std::iter::once(self.global_log_level))
            .max()
            .unwrap_or(self.global_log_level)
    }
}

/// Enables the logger with no global level filter / full logging. Equivalent to
/// `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Disables logging completely. Equivalent to `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Sets the global log level. A global filter level of `LevelFilter::Off` disables
/// logging.
pub fn set_log_level(level: LevelFilter) {
    with_configuration(|configuration| {
        configuration.global_log_level = level;
    });
}

/// Sets a level filter for the given module path.
pub fn set_module_filter(module_path: &str, level_filter: LevelFilter) {
    with_configuration(|configuration| {
        configuration
            .module_level
            .insert(module_path.to_string(), level_filter);
    });
}

/// Removes a module-specific level filter for the given module path. The global level
/// filter will apply to the module.
pub fn remove_module_filter(module_path: &str) {
    with_configuration(|configuration| {
        configuration.module_level.remove(module_path);
    });
}

/// Sets the level filters for a set of modules according to the provided map. Use
/// this instead of `set_module_filter()` to set filters in bulk.
#[allow(clippy::implicit_hasher)]
pub fn set_module_filters(module_filters: &HashMap<&str, LevelFilter>) {
    with_configuration(|configuration| {
        configuration.module_level.extend(
            module_filters
                .iter()
                .map(|(module_path, level)| ((*module_path).to_string(), *level)),
        );
    });
}

/// Mutates the global `LogConfiguration` and reapplies it.
fn with_configuration(f: impl FnOnce(&mut LogConfiguration)) {
    let mut guard = LOG_CONFIGURATION.lock().unwrap();
    let configuration = guard.get_or_insert_with(LogConfiguration::default);
    f(configuration);
    configuration.apply();
}

#[cfg(test)]
mod tests {
    use super::{
        disable_logging, enable_logging, remove_module_filter, set_log_level,
        set_module_filter, LevelFilter,
    };

    #[test]
    fn level_changes_track_through_the_facade() {
        enable_logging();
        assert_eq!(log::max_level(), LevelFilter::Trace);

        disable_logging();
        assert_eq!(log::max_level(), LevelFilter::Off);

        set_log_level(LevelFilter::Info);
        assert_eq!(log::max_level(), LevelFilter::Info);

        // A looser module filter raises the enforced maximum so its messages can
        // reach the logger.
        set_module_filter("multikey::multi_map", LevelFilter::Trace);
        assert_eq!(log::max_level(), LevelFilter::Trace);

        remove_module_filter("multikey::multi_map");
        assert_eq!(log::max_level(), LevelFilter::Info);

        disable_logging();
    }
}
