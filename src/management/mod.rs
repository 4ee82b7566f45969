// src/management/mod.rs

//! In-process ("management") commands.
//!
//! - [`dispatch`] defines the `CommandDispatch` seam and `Invocation`.
//! - [`registry`] is the default name → handler dispatcher.
//! - [`capture`] holds the output buffer and its flush-once scope.
//! - [`runner`] wraps a dispatcher with capture, logging and error
//!   reporting.
//!
//! Handlers receive their output sink explicitly, so nothing here touches
//! the process-wide stdout/stderr and runners may be used from several
//! threads at once.

pub mod capture;
pub mod dispatch;
pub mod registry;
pub mod runner;

pub use capture::{CaptureScope, CapturedOutput};
pub use dispatch::{CommandDispatch, Invocation};
pub use registry::{CommandRegistry, Handler};
pub use runner::CommandRunner;
