// src/management/runner.rs

//! Runner wrapping in-process command dispatch with output capture.

use std::collections::BTreeMap;
use std::sync::Arc;

use toml::Value;
use tracing::debug;

use crate::log::Logger;
use crate::management::capture::CaptureScope;
use crate::management::dispatch::{CommandDispatch, Invocation};

/// Runs in-process commands and reports their output to the logger.
///
/// - Success: the captured output is logged in one info entry.
/// - Failure: the captured output is logged in one info entry, then an error
///   entry naming the command, then the dispatcher's error is returned as is.
pub struct CommandRunner<D> {
    dispatch: D,
    logger: Arc<dyn Logger>,
}

impl<D: CommandDispatch> CommandRunner<D> {
    pub fn new(dispatch: D, logger: Arc<dyn Logger>) -> Self {
        Self { dispatch, logger }
    }

    pub fn run(
        &self,
        name: &str,
        positional: &[Value],
        named: &BTreeMap<String, Value>,
    ) -> Result<(), D::Error> {
        let invocation = Invocation {
            name,
            positional,
            named,
        };
        debug!(command = name, "running in-process command");

        let mut scope = CaptureScope::new(self.logger.as_ref());
        let result = self.dispatch.dispatch(&invocation, scope.output());
        scope.flush();

        if let Err(err) = &result {
            self.logger.error(&format!(
                "An exception occurred during \"manage.py {name}\": {err}"
            ));
        }

        result
    }

    /// [`run`](Self::run) without arguments.
    pub fn run_simple(&self, name: &str) -> Result<(), D::Error> {
        self.run(name, &[], &BTreeMap::new())
    }
}

impl<D: std::fmt::Debug> std::fmt::Debug for CommandRunner<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner")
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}
