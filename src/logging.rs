//! Logging facade.
//!
//! The shell logs through whichever backend the host application already
//! uses. Exactly one of the two features should be enabled:
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled every macro compiles to nothing.
//!
//! ```ignore
//! use gpui_talks_shell::{trace_log, debug_log, info_log, warn_log, error_log};
//!
//! trace_log!("Route '{}' matched '{}'", pattern, path);
//! debug_log!("Requesting activation of page '{}'", page);
//! info_log!("Hydration complete: {} talks", talks.len());
//! warn_log!("Stored favourites unreadable, starting empty: {}", err);
//! error_log!("Failed to persist favourites: {}", err);
//! ```

/// Shared expansion for the level macros below. Not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __shell_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Emit a **trace**-level message (per-segment matching, handler flow).
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => { $crate::__shell_log!(trace, $($arg)*) };
}

/// Emit a **debug**-level message (activation requests, persist writes).
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => { $crate::__shell_log!(debug, $($arg)*) };
}

/// Emit an **info**-level message (navigation, hydration).
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => { $crate::__shell_log!(info, $($arg)*) };
}

/// Emit a **warn**-level message for failures the shell swallows.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => { $crate::__shell_log!(warn, $($arg)*) };
}

/// Emit an **error**-level message for failures reported to analytics.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => { $crate::__shell_log!(error, $($arg)*) };
}
