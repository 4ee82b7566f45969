// src/management/dispatch.rs

//! The seam between the runner and whatever resolves command names.

use std::collections::BTreeMap;
use std::fmt;

use toml::Value;

use crate::management::capture::CapturedOutput;

/// One call of an in-process command.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub name: &'a str,
    pub positional: &'a [Value],
    pub named: &'a BTreeMap<String, Value>,
}

impl<'a> Invocation<'a> {
    pub fn arg(&self, index: usize) -> Option<&'a Value> {
        self.positional.get(index)
    }

    pub fn named_arg(&self, key: &str) -> Option<&'a Value> {
        self.named.get(key)
    }

    /// `true` only if the named argument is present and a boolean `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.named_arg(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// Resolves a command name to a handler and calls it.
///
/// Handlers write what they would print into `output`. The error type is
/// whatever the dispatcher produces; the runner hands it back unchanged.
pub trait CommandDispatch {
    type Error: fmt::Display;

    fn dispatch(
        &self,
        invocation: &Invocation<'_>,
        output: &mut CapturedOutput,
    ) -> Result<(), Self::Error>;
}

impl<D: CommandDispatch + ?Sized> CommandDispatch for &D {
    type Error = D::Error;

    fn dispatch(
        &self,
        invocation: &Invocation<'_>,
        output: &mut CapturedOutput,
    ) -> Result<(), Self::Error> {
        (**self).dispatch(invocation, output)
    }
}

impl<D: CommandDispatch + ?Sized> CommandDispatch for std::sync::Arc<D> {
    type Error = D::Error;

    fn dispatch(
        &self,
        invocation: &Invocation<'_>,
        output: &mut CapturedOutput,
    ) -> Result<(), Self::Error> {
        (**self).dispatch(invocation, output)
    }
}
