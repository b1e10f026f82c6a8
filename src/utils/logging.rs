//! Logging macros gated by a module-level `ENABLE_LOGS` flag.
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, participant_warn};
//!
//! log_info!("rendering {} participants", ids.len());
//! participant_warn!(pid, "skipping {} malformed rows", skipped);
//! ```
//!
//! The `participant_*` forms prefix the message with `[Pnn]` so a batch log
//! can be grepped per participant.

#[doc(hidden)]
#[macro_export]
macro_rules! __gated_log {
    ($level:ident, $($arg:tt)*) => {
        if ENABLE_LOGS {
            log::$level!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__gated_log!(debug, $($arg)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__gated_log!(info, $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__gated_log!(warn, $($arg)*) };
}

#[macro_export]
macro_rules! participant_info {
    ($pid:expr, $($arg:tt)*) => {
        $crate::__gated_log!(info, "[P{:02}] {}", $pid, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! participant_warn {
    ($pid:expr, $($arg:tt)*) => {
        $crate::__gated_log!(warn, "[P{:02}] {}", $pid, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! participant_error {
    ($pid:expr, $($arg:tt)*) => {
        $crate::__gated_log!(error, "[P{:02}] {}", $pid, format_args!($($arg)*))
    };
}
