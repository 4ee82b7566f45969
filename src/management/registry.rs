// src/management/registry.rs

//! Name → handler registry implementing [`CommandDispatch`].

use std::collections::BTreeMap;

use crate::errors::ShellError;
use crate::management::capture::CapturedOutput;
use crate::management::dispatch::{CommandDispatch, Invocation};

/// A registered in-process command.
pub type Handler =
    Box<dyn Fn(&Invocation<'_>, &mut CapturedOutput) -> anyhow::Result<()> + Send + Sync>;

/// Registry of in-process commands, keyed by name.
///
/// Unknown names fail with [`ShellError::UnknownCommand`] wrapped in an
/// `anyhow::Error`, so they go through the runner's normal failure path.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Invocation<'_>, &mut CapturedOutput) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Invocation<'_>, &mut CapturedOutput) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(name, handler);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl CommandDispatch for CommandRegistry {
    type Error = anyhow::Error;

    fn dispatch(
        &self,
        invocation: &Invocation<'_>,
        output: &mut CapturedOutput,
    ) -> anyhow::Result<()> {
        let handler = self
            .handlers
            .get(invocation.name)
            .ok_or_else(|| ShellError::UnknownCommand(invocation.name.to_string()))?;
        handler(invocation, output)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn dispatches_to_registered_handler() {
        let registry = CommandRegistry::new().with("greet", |inv, out| {
            let who = inv.arg(0).and_then(|v| v.as_str()).unwrap_or("world");
            writeln!(out, "hello {who}")?;
            Ok(())
        });
        let positional = [toml::Value::from("db")];
        let named = BTreeMap::new();
        let inv = Invocation { name: "greet", positional: &positional, named: &named };

        let mut out = CapturedOutput::new();
        registry.dispatch(&inv, &mut out).unwrap();

        assert_eq!(out.contents(), "hello db\n");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["greet"]);
        assert!(registry.contains("greet"));
        assert!(!registry.contains("nope"));
    }

    #[test]
    fn unknown_command_is_a_typed_error() {
        let registry = CommandRegistry::new();
        let named = BTreeMap::new();
        let inv = Invocation { name: "nope", positional: &[], named: &named };

        let err = registry.dispatch(&inv, &mut CapturedOutput::new()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ShellError>(),
            Some(ShellError::UnknownCommand(name)) if name == "nope"
        ));
    }
}
