//! Built-in sinks

pub mod console;
pub mod file;
pub mod memory;
pub mod writer;

pub use console::{default_streams, ConsoleSink, ConsoleStream};
pub use file::FileSink;
pub use memory::MemorySink;
pub use writer::LogWriter;
