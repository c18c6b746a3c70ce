use crate::events::{Hook, Invocation};
use anyhow::Context;
use serde_json::Value;

/// Maps a Claude Code hook payload onto the opencode event vocabulary.
pub fn parse_event(payload: &str) -> anyhow::Result<Option<Invocation>> {
    let value: Value = serde_json::from_str(payload).context("parse claude payload")?;
    let hook = value
        .get("hook_event_name")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let invocation = match hook {
        "PreToolUse" => Invocation::Hook(Hook::ToolExecuteBefore),
        "PostToolUse" => Invocation::Hook(Hook::ToolExecuteAfter),
        "Notification" | "UserPromptSubmit" => Invocation::Hook(Hook::ChatMessage),
        "PermissionRequest" => Invocation::Hook(Hook::PermissionAsk),
        "Stop" | "SubagentStop" | "PreCompact" => Invocation::event("session.idle"),
        _ => return Ok(None),
    };

    Ok(Some(invocation))
}
