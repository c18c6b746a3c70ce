use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named hook points. Unlike generic events, the hook identity is known
/// statically by the handler and never read from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Hook {
    #[serde(rename = "tool.execute.before")]
    #[value(name = "tool.execute.before", alias = "tool-execute-before")]
    ToolExecuteBefore,
    #[serde(rename = "tool.execute.after")]
    #[value(name = "tool.execute.after", alias = "tool-execute-after")]
    ToolExecuteAfter,
    #[serde(rename = "permission.ask")]
    #[value(name = "permission.ask", alias = "permission-ask")]
    PermissionAsk,
    #[serde(rename = "chat.message")]
    #[value(name = "chat.message", alias = "chat-message")]
    ChatMessage,
}

impl Hook {
    pub const ALL: [Hook; 4] = [
        Hook::ToolExecuteBefore,
        Hook::ToolExecuteAfter,
        Hook::PermissionAsk,
        Hook::ChatMessage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Hook::ToolExecuteBefore => "tool.execute.before",
            Hook::ToolExecuteAfter => "tool.execute.after",
            Hook::PermissionAsk => "permission.ask",
            Hook::ChatMessage => "chat.message",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[value(name = "opencode", alias = "open-code")]
    OpenCode,
    Claude,
}

/// A single callback delivered by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Event(String),
    Hook(Hook),
}

impl Invocation {
    pub fn event(event_type: impl Into<String>) -> Self {
        Invocation::Event(event_type.into())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::Event(event_type) => write!(f, "event {event_type}"),
            Invocation::Hook(hook) => write!(f, "hook {hook}"),
        }
    }
}
