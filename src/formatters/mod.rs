//! Formatters: processors that run last, once a message is going to be written
//!
//! - [`text()`]: `component=svc output=console level=info timestamp=... message=... key=value`
//! - [`json()`]: tab indented JSON object
//!
//! Both include component, output, level, timestamp (RFC3339), message, and
//! the message fields merged in by key, sorted.

use crate::core::{Message, Processor};
use chrono::SecondsFormat;
use serde::Serialize;
use std::sync::Arc;

fn timestamp(message: &Message) -> String {
    message.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn text() -> Arc<Processor> {
    Processor::new("Text", |message: &mut Message| {
        let mut parts = vec![
            format!("component={}", message.component_name()),
            format!("output={}", message.output_name().to_lowercase()),
            format!("level={}", message.level().to_str().to_lowercase()),
            format!("timestamp={}", timestamp(message)),
            format!("message={}", message.processed()),
        ];

        parts.extend(message.fields().iter().map(|(k, v)| format!("{}={}", k, v)));

        message.set_processed(parts.join(" "));
        Ok(())
    })
}

pub fn json() -> Arc<Processor> {
    Processor::new("JSON", |message: &mut Message| {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "component".to_string(),
            serde_json::Value::String(message.component_name().to_string()),
        );
        json_obj.insert(
            "output".to_string(),
            serde_json::Value::String(message.output_name().to_string()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(message.level().to_str().to_lowercase()),
        );
        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(timestamp(message)),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(message.processed().to_string()),
        );

        for (key, value) in message.fields().iter() {
            json_obj.insert(key.to_string(), value.to_json_value());
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde_json::Value::Object(json_obj).serialize(&mut serializer)?;

        message.set_processed(String::from_utf8_lossy(&buf).into_owned());
        Ok(())
    })
}
