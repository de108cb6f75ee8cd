//! Scripted [`CommandRunner`] for driving the orchestrator without git
//!
//! Every repository gets a [`Script`] keyed by its display name. The runner
//! records each invocation and tracks how many repositories were busy at once.

#![allow(dead_code)]

use async_trait::async_trait;
use git_fleet::core::error::{FleetError, Result};
use git_fleet::core::{CommandOutput, CommandRunner, RepositoryDescriptor};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const CLEAN_STATUS: &str = "# branch.oid 1111111111111111111111111111111111111111\n# branch.head main\n# branch.upstream origin/main\n# branch.ab +0 -0\n";

#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Sleep before answering every invocation
    pub delay: Duration,
    /// Answer per subcommand (`push`, `pull`, `status`); missing ones succeed empty
    pub outputs: HashMap<&'static str, CommandOutput>,
    pub spawn_error: bool,
    pub panic: bool,
}

impl Script {
    pub fn clean() -> Self {
        Self::default().with_output("status", ok(CLEAN_STATUS))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_output(mut self, subcommand: &'static str, output: CommandOutput) -> Self {
        self.outputs.insert(subcommand, output);
        self
    }
}

pub fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        stdout: stdout.to_string(),
        stderr: String::new(),
        exit_code: Some(0),
    }
}

pub fn failed(stderr: &str, exit_code: i32) -> CommandOutput {
    CommandOutput {
        stdout: String::new(),
        stderr: stderr.to_string(),
        exit_code: Some(exit_code),
    }
}

#[derive(Default)]
pub struct ScriptedRunner {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, name: &str, script: Script) -> Self {
        self.scripts.insert(name.to_string(), script);
        self
    }

    /// Every invocation as `(repository name, args)`, in call order
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Subcommands invoked for one repository, in call order
    pub fn subcommands_for(&self, name: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(repo, _)| repo == name)
            .filter_map(|(_, args)| args.first().cloned())
            .collect()
    }

    /// Highest number of invocations that were in flight together
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

struct ActiveGuard<'a>(&'a AtomicUsize);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, repo: &RepositoryDescriptor, args: &[&str]) -> Result<CommandOutput> {
        let name = repo.name();
        self.calls.lock().unwrap().push((
            name.clone(),
            args.iter().map(|arg| arg.to_string()).collect(),
        ));

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = ActiveGuard(&self.active);
        self.peak.fetch_max(now, Ordering::SeqCst);

        let script = self.scripts.get(&name).cloned().unwrap_or_else(Script::clean);
        tokio::time::sleep(script.delay).await;

        if script.panic {
            panic!("scripted panic for {name}");
        }
        if script.spawn_error {
            let err = std::io::Error::new(std::io::ErrorKind::NotFound, "git not found");
            return Err(FleetError::command_spawn("git", err));
        }

        let subcommand = args.first().copied().unwrap_or_default();
        Ok(script
            .outputs
            .get(subcommand)
            .cloned()
            .unwrap_or_else(|| ok("")))
    }
}
