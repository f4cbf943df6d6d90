use super::logger::{LogHandler, LogLevel, LogRecord};
use parking_lot::Mutex;
use std::sync::Arc;

/// Forwards records to the `tracing` macros.
pub struct TracingHandler {
	level: LogLevel,
}

impl TracingHandler {
	pub fn new(level: LogLevel) -> Self {
		Self { level }
	}
}

impl LogHandler for TracingHandler {
	fn handle(&self, record: &LogRecord) {
		let logger = record.logger_name.as_str();
		match record.level {
			LogLevel::Debug => {
				tracing::debug!(logger, extra = ?record.extra, "{}", record.message)
			}
			LogLevel::Info => {
				tracing::info!(logger, extra = ?record.extra, "{}", record.message)
			}
			LogLevel::Warning => {
				tracing::warn!(logger, extra = ?record.extra, "{}", record.message)
			}
			LogLevel::Error => {
				tracing::error!(logger, extra = ?record.extra, "{}", record.message)
			}
		}
	}

	fn level(&self) -> LogLevel {
		self.level
	}
}

/// Keeps every record in memory. Clones share the same buffer.
#[derive(Clone)]
pub struct MemoryHandler {
	level: LogLevel,
	records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryHandler {
	pub fn new(level: LogLevel) -> Self {
		Self {
			level,
			records: Arc::new(Mutex::new(Vec::new())),
		}
	}

	pub fn get_records(&self) -> Vec<LogRecord> {
		self.records.lock().clone()
	}

	pub fn messages(&self) -> Vec<String> {
		self.records
			.lock()
			.iter()
			.map(|r| r.message.clone())
			.collect()
	}

	pub fn clear(&self) {
		self.records.lock().clear();
	}
}

impl LogHandler for MemoryHandler {
	fn handle(&self, record: &LogRecord) {
		if record.level >= self.level {
			self.records.lock().push(record.clone());
		}
	}

	fn level(&self) -> LogLevel {
		self.level
	}
}
