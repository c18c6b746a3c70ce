use crate::audio::Player;
use crate::config::{AppContext, ResolvedSoundConfig};
use crate::dispatch::Dispatcher;
use crate::events::{Hook, Invocation};
use serde_json::Value;
use std::sync::Arc;

/// The handler table exposed to the host runtime. Configuration is
/// resolved once in [`Plugin::init`] and shared by every handler.
#[derive(Clone)]
pub struct Plugin {
    dispatcher: Dispatcher,
}

impl Plugin {
    pub fn init(ctx: &AppContext, player: Arc<dyn Player>) -> Self {
        let config = ResolvedSoundConfig::load(ctx);
        tracing::debug!(
            events = config.events.len(),
            hooks = config.hooks.len(),
            "resolved sound config"
        );
        Self::with_config(Arc::new(config), player, ctx)
    }

    pub fn with_config(
        config: Arc<ResolvedSoundConfig>,
        player: Arc<dyn Player>,
        ctx: &AppContext,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(config, player, ctx.home.clone()),
        }
    }

    pub fn config(&self) -> &ResolvedSoundConfig {
        self.dispatcher.config()
    }

    pub fn handle(&self, invocation: &Invocation) -> bool {
        self.dispatcher.dispatch(invocation)
    }

    /// Generic event handler; the sound is looked up by the event's `type`.
    pub fn event(&self, event: &Value) {
        match event.get("type").and_then(Value::as_str) {
            Some(event_type) => {
                self.dispatcher.on_event(event_type);
            }
            None => tracing::debug!("event without type; skipping"),
        }
    }

    pub fn tool_execute_before(&self, _input: &Value, _output: &Value) {
        self.dispatcher.on_hook(Hook::ToolExecuteBefore);
    }

    pub fn tool_execute_after(&self, _input: &Value, _output: &Value) {
        self.dispatcher.on_hook(Hook::ToolExecuteAfter);
    }

    pub fn permission_ask(&self, _input: &Value, _output: &Value) {
        self.dispatcher.on_hook(Hook::PermissionAsk);
    }

    pub fn chat_message(&self, _input: &Value, _output: &Value) {
        self.dispatcher.on_hook(Hook::ChatMessage);
    }
}
