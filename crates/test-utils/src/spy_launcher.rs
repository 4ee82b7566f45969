use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pgclone_shell::exec::pipefail::{LaunchFuture, ProbeLauncher};

/// What the spy reports for every launch.
#[derive(Debug, Clone, Copy)]
pub enum SpyOutcome {
    Exit(i32),
    /// The program does not exist.
    NotFound,
    /// Any other launch failure.
    Failure(io::ErrorKind),
}

/// A fake probe launcher that:
/// - records the program and arguments of every launch
/// - answers with a fixed `SpyOutcome` without spawning anything.
#[derive(Debug, Clone)]
pub struct SpyLauncher {
    outcome: SpyOutcome,
    launches: Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>,
}

impl SpyLauncher {
    pub fn new(outcome: SpyOutcome) -> Self {
        Self {
            outcome,
            launches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn launches(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.launches.lock().unwrap().clone()
    }

    pub fn launch_count(&self) -> usize {
        self.launches.lock().unwrap().len()
    }
}

impl ProbeLauncher for SpyLauncher {
    fn launch<'a>(&'a self, program: &'a Path, args: &'a [&'a str]) -> LaunchFuture<'a> {
        {
            let mut guard = self.launches.lock().unwrap();
            guard.push((
                program.to_path_buf(),
                args.iter().map(|a| a.to_string()).collect(),
            ));
        }

        let outcome = self.outcome;
        Box::pin(async move {
            match outcome {
                SpyOutcome::Exit(code) => Ok(code),
                SpyOutcome::NotFound => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} not found", program.display()),
                )),
                SpyOutcome::Failure(kind) => Err(io::Error::from(kind)),
            }
        })
    }
}
