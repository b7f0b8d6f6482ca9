//! Basic usage of rust_field_logger
//!
//! Run with: cargo run --example basic_usage

use rust_field_logger::prelude::*;
use rust_field_logger::{info, warn};
use std::io::Write;

fn main() -> Result<()> {
    // Console logger with default sinks: fatal/error to stderr, the rest to stdout
    let logger = Logger::builder()
        .level("debug")
        .field("service", "demo")
        .build();

    logger.info("application started");
    logger.debug("loading configuration");
    info!(logger, "listening on port {}", 8080);

    // Per-call fields override contextual ones
    logger.info_with_fields(
        "request served",
        Fields::new()
            .with_field("status", 200)
            .with_field("path", "/health")
            .with_field("service", "demo-http"),
    );

    // Failures as messages or attached to fields
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json missing");
    logger.error(io_err);
    logger.error_with_fields(
        "payment declined",
        Fields::new().with_error(Failure::new("GatewayError", "card expired").with_cause("code 54")),
    );

    // Child loggers carry extra context
    let request = logger.child(Fields::new().with_field("request_id", "r-81"));
    warn!(request, "slow upstream: {}ms", 812);

    // JSON lines into a file
    let path = std::env::temp_dir().join("rust_field_logger_demo.log");
    let file_logger = Logger::builder()
        .formatter(BuiltinFormatter::Json)
        .sink(SinkTarget::writer(FileSink::new(&path)?))
        .secrets(["hunter2"])
        .build();
    file_logger.info_with_fields("user login", Fields::new().with_field("password", "hunter2"));
    file_logger.flush()?;
    println!("json log written to {}", path.display());

    // Anything that writes bytes can feed the logger line by line
    let mut stream = logger.create_stream("info");
    writeln!(stream, "line from a writer")?;
    stream.flush()?;

    Ok(())
}
