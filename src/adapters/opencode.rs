use crate::events::Invocation;
use anyhow::Context;
use serde_json::Value;

pub fn parse_event(payload: &str) -> anyhow::Result<Option<Invocation>> {
    let value: Value = serde_json::from_str(payload).context("parse opencode payload")?;
    let event_type = value
        .get("type")
        .and_then(|v| v.as_str())
        .or_else(|| value.pointer("/event/type").and_then(|v| v.as_str()))
        .unwrap_or("");

    if event_type.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Invocation::event(event_type)))
    }
}
