use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A sink for log records.
///
/// Handlers are synchronous: nothing in the serializer pipeline suspends.
pub trait LogHandler: Send + Sync {
	fn handle(&self, record: &LogRecord);
	fn level(&self) -> LogLevel;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
	Debug,
	Info,
	Warning,
	Error,
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			LogLevel::Debug => "DEBUG",
			LogLevel::Info => "INFO",
			LogLevel::Warning => "WARNING",
			LogLevel::Error => "ERROR",
		};
		f.write_str(label)
	}
}

#[derive(Debug, Clone)]
pub struct LogRecord {
	pub level: LogLevel,
	pub logger_name: String,
	pub message: String,
	pub extra: HashMap<String, Value>,
}

impl LogRecord {
	pub fn new(level: LogLevel, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			level,
			logger_name: logger_name.into(),
			message: message.into(),
			extra: HashMap::new(),
		}
	}

	/// Attach a structured value to the record
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_logging::{LogLevel, LogRecord};
	/// use serde_json::json;
	///
	/// let record = LogRecord::new(LogLevel::Info, "knockout", "skipped field")
	///     .with_extra("field", json!("email"));
	/// assert_eq!(record.extra["field"], json!("email"));
	/// ```
	pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
		self.extra.insert(key.into(), value);
		self
	}
}

/// A named logger shared by reference counting.
///
/// Cloning a logger, or deriving a child with [`Logger::child`], shares the
/// handler list and the minimum level with the original.
#[derive(Clone)]
pub struct Logger {
	name: String,
	handlers: Arc<Mutex<Vec<Box<dyn LogHandler>>>>,
	level: Arc<Mutex<LogLevel>>,
}

impl Logger {
	/// Creates a logger with no handlers; records are dropped until one is added.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			handlers: Arc::new(Mutex::new(Vec::new())),
			level: Arc::new(Mutex::new(LogLevel::Debug)),
		}
	}

	/// Creates a logger that forwards every record to `tracing`.
	pub fn tracing(name: impl Into<String>) -> Self {
		let logger = Self::new(name);
		logger.add_handler(Box::new(crate::handlers::TracingHandler::new(LogLevel::Debug)));
		logger
	}

	/// Derives a logger scoped to a sub-component
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_knockout_logging::Logger;
	///
	/// let logger = Logger::new("knockout");
	/// assert_eq!(logger.child("graph").name(), "knockout.graph");
	/// ```
	pub fn child(&self, suffix: &str) -> Self {
		Self {
			name: format!("{}.{}", self.name, suffix),
			handlers: Arc::clone(&self.handlers),
			level: Arc::clone(&self.level),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn add_handler(&self, handler: Box<dyn LogHandler>) {
		self.handlers.lock().push(handler);
	}

	pub fn set_level(&self, level: LogLevel) {
		*self.level.lock() = level;
	}

	pub fn level(&self) -> LogLevel {
		*self.level.lock()
	}

	pub fn log_record(&self, record: &LogRecord) {
		if record.level < self.level() {
			return;
		}
		for handler in self.handlers.lock().iter() {
			if record.level >= handler.level() {
				handler.handle(record);
			}
		}
	}

	pub fn log(&self, level: LogLevel, message: impl Into<String>) {
		self.log_record(&LogRecord::new(level, self.name.clone(), message));
	}

	pub fn debug(&self, message: impl Into<String>) {
		self.log(LogLevel::Debug, message);
	}

	pub fn info(&self, message: impl Into<String>) {
		self.log(LogLevel::Info, message);
	}

	pub fn warning(&self, message: impl Into<String>) {
		self.log(LogLevel::Warning, message);
	}

	pub fn error(&self, message: impl Into<String>) {
		self.log(LogLevel::Error, message);
	}

	/// Builds a record carrying this logger's name, for use with [`LogRecord::with_extra`].
	pub fn record(&self, level: LogLevel, message: impl Into<String>) -> LogRecord {
		LogRecord::new(level, self.name.clone(), message)
	}
}

impl fmt::Debug for Logger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Logger")
			.field("name", &self.name)
			.field("level", &self.level())
			.field("handlers", &self.handlers.lock().len())
			.finish()
	}
}
