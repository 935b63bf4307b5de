//! Recording stand-ins for the process runner and the downloader.
//!
//! Used by unit and integration tests to run steps and whole plans
//! without touching yum, `unzip`, the MCR installer or the network.

use crate::error::{ProvisionError, Result};
use crate::fetch::Downloader;
use crate::shell::{CommandResult, CommandSpec, ProcessRunner};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

type Effect = Box<dyn Fn(&CommandSpec)>;

/// A [`ProcessRunner`] that records every command and returns a scripted
/// exit code.
pub struct MockRunner {
    calls: RefCell<Vec<CommandSpec>>,
    exit_code: i32,
    failing_program: Option<String>,
    effect: Option<Effect>,
}

impl MockRunner {
    /// Every command exits 0.
    pub fn succeeding() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            exit_code: 0,
            failing_program: None,
            effect: None,
        }
    }

    /// Every command exits with `code`.
    pub fn failing(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Self::succeeding()
        }
    }

    /// Only commands whose program is `program` exit with `code`.
    pub fn failing_on(program: impl Into<String>, code: i32) -> Self {
        Self {
            exit_code: code,
            failing_program: Some(program.into()),
            ..Self::succeeding()
        }
    }

    /// Run `effect` for every command that succeeds, to simulate what the
    /// real program would leave on disk.
    pub fn with_effect(mut self, effect: impl Fn(&CommandSpec) + 'static) -> Self {
        self.effect = Some(Box::new(effect));
        self
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Program names run so far, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }

    fn exit_code_for(&self, command: &CommandSpec) -> i32 {
        match &self.failing_program {
            Some(program) if *program != command.program => 0,
            _ => self.exit_code,
        }
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandResult> {
        self.calls.borrow_mut().push(command.clone());

        let code = self.exit_code_for(command);
        if code == 0 {
            if let Some(effect) = &self.effect {
                effect(command);
            }
            Ok(CommandResult::success(String::new()))
        } else {
            Ok(CommandResult::failure(
                Some(code),
                format!("{}: simulated failure", command.program),
            ))
        }
    }
}

/// Effect that creates the `-d <dir>` target of an `unzip` command.
pub fn simulate_unzip(command: &CommandSpec) {
    if command.program != "unzip" {
        return;
    }
    if let Some(pos) = command.args.iter().position(|a| a == "-d") {
        if let Some(dir) = command.args.get(pos + 1) {
            let _ = fs::create_dir_all(dir);
        }
    }
}

/// A [`Downloader`] that records every request and writes fixed bytes.
pub struct MockDownloader {
    calls: RefCell<Vec<(String, PathBuf)>>,
    content: Vec<u8>,
    fail: bool,
}

impl MockDownloader {
    /// Every download succeeds and writes `content`.
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            content,
            fail: false,
        }
    }

    /// Every download fails with a transport error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// `(url, destination)` pairs requested so far.
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Downloader for MockDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), destination.to_path_buf()));

        if self.fail {
            return Err(ProvisionError::DownloadFailed {
                url: url.to_string(),
                message: "connection reset".to_string(),
            });
        }

        fs::write(destination, &self.content)?;
        Ok(self.content.len() as u64)
    }
}
