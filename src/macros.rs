//! Logging macros with `format!`-style arguments
//!
//! # Examples
//!
//! ```
//! use rust_field_logger::prelude::*;
//! use rust_field_logger::info;
//!
//! let logger = Logger::builder().colors(false).build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // contextual fields for this call only
//! let fields = Fields::new().with_field("port", port);
//! info!(logger, fields: fields, "listening");
//! ```

/// Log at a level given by name
///
/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_field_logger::log;
/// log!(logger, "info", "Simple message");
/// log!(logger, "error", "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, fields: $fields:expr, $($arg:tt)+) => {
        $logger.log_with_fields($level, format!($($arg)+), $fields)
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::builder().level("trace").build();
/// use rust_field_logger::trace;
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace.as_str(), $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug.as_str(), $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info.as_str(), $($arg)+)
    };
}

/// ```
/// # use rust_field_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_field_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn.as_str(), $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error.as_str(), $($arg)+)
    };
}

#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal.as_str(), $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::MemorySink;
    use crate::core::fields::Fields;
    use crate::core::logger::Logger;
    use crate::core::sink::SinkTarget;
    use std::sync::Arc;

    #[test]
    fn test_macros_format_and_route() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder()
            .colors(false)
            .level("debug")
            .sink(SinkTarget::shared(sink.clone()))
            .build();

        info!(logger, "processing {} items", 3);
        debug!(logger, "detail");
        trace!(logger, "hidden");
        error!(logger, fields: Fields::new().with_field("code", 500), "failed {}", "job");

        assert_eq!(
            sink.lines(),
            vec![
                "[INFO] processing 3 items",
                "[DEBUG] detail",
                "[ERROR] failed job\u{3000}code=500",
            ]
        );
    }
}
