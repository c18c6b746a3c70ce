use crate::events::{Invocation, Source};

pub mod claude;
pub mod opencode;

pub fn parse_invocation(source: Source, payload: &str) -> anyhow::Result<Option<Invocation>> {
    match source {
        Source::OpenCode => opencode::parse_event(payload),
        Source::Claude => claude::parse_event(payload),
    }
}
