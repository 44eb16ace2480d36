//! Structured logging with request context.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use edge_core::RequestId;
use serde::Serialize;

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Request ID for correlation.
    pub request_id: String,
    /// Component name (e.g., "product-grid").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}", self.level, self.message);

        if let Some(elapsed) = self.elapsed_us {
            s.push_str(&format!(" ({}us)", elapsed));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let mut fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields.sort();
            s.push_str(&fields.join(" "));
        }

        s
    }

    /// Get a string field.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON format (for production/log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// Destination for emitted entries.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    /// Formatted lines on stderr (Spin captures this).
    #[default]
    Stderr,
    /// Entries collected in memory.
    Memory(Arc<Mutex<Vec<LogEntry>>>),
}

impl LogSink {
    /// Create an empty in-memory sink.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(Vec::new())))
    }

    /// Snapshot of the entries collected so far. Empty for stderr.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self {
            Self::Stderr => Vec::new(),
            Self::Memory(entries) => entries
                .lock()
                .map(|guard| guard.clone())
                .unwrap_or_default(),
        }
    }

    fn write(&self, entry: LogEntry, format: LogFormat) {
        match self {
            Self::Stderr => {
                let output = match format {
                    LogFormat::Json => entry.to_json(),
                    LogFormat::Human => entry.to_human(),
                };
                eprintln!("{}", output);
            }
            Self::Memory(entries) => {
                if let Ok(mut guard) = entries.lock() {
                    guard.push(entry);
                }
            }
        }
    }
}

/// Structured logger with request context.
///
/// Provides structured logging with automatic request ID propagation
/// and timing information.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    request_id: RequestId,
    component: Option<String>,
    start_time: std::time::Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl StructuredLogger {
    /// Create a new logger with request context.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            component: None,
            start_time: std::time::Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: LogSink::Stderr,
        }
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the sink.
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, HashMap::new());
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, HashMap::new());
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, HashMap::new());
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, HashMap::new());
    }

    fn log(&self, level: LogLevel, message: &str, fields: HashMap<String, serde_json::Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            request_id: self.request_id.to_string(),
            component: self.component.clone(),
            fields,
            elapsed_us: Some(self.start_time.elapsed().as_micros() as u64),
        };

        self.sink.write(entry, self.format);
    }

    /// Get the request ID.
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Get the sink.
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: HashMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a duration field (in milliseconds).
    pub fn duration_ms(mut self, key: &str, duration: std::time::Duration) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(duration.as_millis() as u64));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }

    /// Start building an error log entry.
    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Error, message)
    }

    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_logger() -> StructuredLogger {
        StructuredLogger::new(RequestId::from_string("req-1"))
            .with_component("product-grid")
            .with_sink(LogSink::memory())
    }

    #[test]
    fn test_memory_sink_collects_fields() {
        let logger = memory_logger();
        logger
            .error_builder("Error loading products")
            .field("error", "connection refused")
            .field_i64("attempt", 1)
            .emit();

        let entries = logger.sink().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(entries[0].request_id, "req-1");
        assert_eq!(entries[0].component.as_deref(), Some("product-grid"));
        assert_eq!(entries[0].field_str("error"), Some("connection refused"));
    }

    #[test]
    fn test_min_level_filters() {
        let logger = memory_logger();
        logger.debug("hidden");
        logger.info("shown");
        let entries = logger.sink().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
    }

    #[test]
    fn test_cloned_logger_shares_memory_sink() {
        let logger = memory_logger();
        let clone = logger.clone();
        clone.warn("from clone");
        assert_eq!(logger.sink().entries().len(), 1);
    }

    #[test]
    fn test_human_format() {
        let mut fields = HashMap::new();
        fields.insert("count".to_string(), serde_json::json!(3));
        let entry = LogEntry {
            level: LogLevel::Info,
            message: "Products loaded".to_string(),
            request_id: "r".to_string(),
            component: None,
            fields,
            elapsed_us: None,
        };
        assert_eq!(entry.to_human(), "[INFO] Products loaded | count=3");
    }

    #[test]
    fn test_json_format_flattens_fields() {
        let mut fields = HashMap::new();
        fields.insert("error".to_string(), serde_json::json!("boom"));
        let entry = LogEntry {
            level: LogLevel::Error,
            message: "failed".to_string(),
            request_id: "r".to_string(),
            component: Some("grid".to_string()),
            fields,
            elapsed_us: Some(5),
        };
        let value: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
        assert_eq!(value["level"], "error");
        assert_eq!(value["error"], "boom");
        assert_eq!(value["component"], "grid");
        assert_eq!(value["elapsed_us"], 5);
    }
}
