// src/internal/logger/record.rs

use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{ChronoUtc, FormatTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// Field carrying an entry's structured metadata, recorded as JSON text.
pub const META_FIELD: &str = "meta";

/// Formats each event as one JSON object per line.
///
/// Every record has `timestamp` (RFC 3339, UTC), `level`, `target` and
/// `message`. Other event fields sit next to them, and the `meta` field is
/// decoded back into a nested object.
#[derive(Debug, Clone)]
pub struct JsonRecord {
    timer: ChronoUtc,
}

impl JsonRecord {
    pub fn new() -> Self {
        Self {
            timer: ChronoUtc::rfc_3339(),
        }
    }
}

impl Default for JsonRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for JsonRecord
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut timestamp = String::new();
        self.timer.format_time(&mut Writer::new(&mut timestamp))?;

        let metadata = event.metadata();
        let mut record = Map::new();
        record.insert("timestamp".to_string(), Value::String(timestamp));
        record.insert("level".to_string(), Value::String(metadata.level().to_string()));
        record.insert("target".to_string(), Value::String(metadata.target().to_string()));
        event.record(&mut FieldCollector(&mut record));

        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

struct FieldCollector<'a>(&'a mut Map<String, Value>);

impl FieldCollector<'_> {
    fn insert_text(&mut self, field: &Field, text: String) {
        let value = if field.name() == META_FIELD {
            match serde_json::from_str::<Value>(&text) {
                Ok(meta) => meta,
                Err(_) => Value::String(text),
            }
        } else {
            Value::String(text)
        };
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldCollector<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert_text(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert_text(field, format!("{:?}", value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name().to_string(), Value::from(value));
    }
}
