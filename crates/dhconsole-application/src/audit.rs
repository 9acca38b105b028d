//! Tracing layer that forwards dispatched commands to a channel.
//!
//! The command codec logs every command on [`AUDIT_TARGET`]; a frontend that
//! wants a command history installs [`CommandAuditLayer`] and reads the
//! receiving end, without the codec knowing about it.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Tracing target of command audit events.
pub const AUDIT_TARGET: &str = "dhconsole::audit";

/// One dispatched command.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CommandAuditEvent {
    pub command: String,
    pub target_uid: Option<u64>,
    /// Log level (INFO, WARN, ...)
    pub level: String,
    pub message: String,
    /// Any other fields on the event
    pub fields: HashMap<String, Value>,
    pub timestamp: String,
}

pub struct CommandAuditLayer {
    sender: mpsc::UnboundedSender<CommandAuditEvent>,
}

impl CommandAuditLayer {
    pub fn new(sender: mpsc::UnboundedSender<CommandAuditEvent>) -> Self {
        Self { sender }
    }

    /// Creates a layer together with the receiver its events go to.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<CommandAuditEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl<S> Layer<S> for CommandAuditLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != AUDIT_TARGET {
            return;
        }

        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        let command = match fields.remove("command") {
            Some(Value::String(command)) => command,
            Some(other) => other.to_string(),
            None => return,
        };
        let target_uid = fields.remove("target_uid").and_then(|v| v.as_u64());
        let message = fields
            .remove("message")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let audit_event = CommandAuditEvent {
            command,
            target_uid,
            level: event.metadata().level().to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver may be gone; auditing never blocks the caller
        let _ = self.sender.send(audit_event);
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(format!("{:?}", value)));
    }
}
