//! # Reinhardt Knockout Logging
//!
//! Logging for the Knockout serializer pipeline.
//!
//! There is no process-wide logger: every component receives a [`Logger`]
//! at construction time and derives scoped children from it with
//! [`Logger::child`]. Records are dispatched to the handlers registered on
//! the root logger.
//!
//! ## Example
//!
//! ```
//! use reinhardt_knockout_logging::{LogLevel, Logger, MemoryHandler};
//!
//! let logger = Logger::new("knockout");
//! let handler = MemoryHandler::new(LogLevel::Debug);
//! logger.add_handler(Box::new(handler.clone()));
//!
//! logger.child("fields").warning("knockout_fields() failed");
//!
//! let records = handler.get_records();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].logger_name, "knockout.fields");
//! ```

pub mod handlers;
pub mod logger;

pub use handlers::{MemoryHandler, TracingHandler};
pub use logger::{LogHandler, LogLevel, LogRecord, Logger};
