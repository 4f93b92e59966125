//! Run orchestration.
//!
//! Takes the raw positional arguments of one invocation, splits off inline
//! environment assignments, prepares every command (tokenizing and
//! expanding) and then runs them according to the [`RunMode`]:
//!
//! - `Single`: all arguments are one command; its result is the result.
//! - `Sequential`: one command per argument, strictly in order; the first
//!   failure stops the rest.
//! - `Concurrent`: one command per argument, all at once; every command is
//!   waited for and the first failure to settle is reported.
//!
//! All commands are expanded before any of them starts, so an unknown
//! variable in strict mode never leaves a half-finished run behind.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::config::{RunConfig, RunMode};
use crate::env::{
    expand, load_env_files, process_environment, split_inline_assignments, EnvironmentMap,
};
use crate::error::{CrossRunError, Result};
use crate::package::{
    is_glob, match_scripts, read_declared_scripts, PackageManagerResolver,
    ResolvedPackageManager,
};

use super::prefix::{command_label, script_label, OutputPrefix, Palette};
use super::spawner::{CommandInvocation, OutputPolicy, ProcessSpawner};

/// Prefix marking a package manager script reference.
pub const SCRIPT_PREFIX: &str = "npm:";

/// A command ready to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
    /// What to run.
    pub invocation: CommandInvocation,
    /// How its output is labelled.
    pub prefix: OutputPrefix,
}

/// What one prepared command turns into once references are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// A single process.
    Command(PlannedCommand),
    /// Every script matched by a glob reference.
    Scripts {
        /// One command per matched script, in declaration order.
        commands: Vec<PlannedCommand>,
        /// Run the matches concurrently rather than one after another.
        concurrent: bool,
    },
}

/// Top-level entry point for running commands.
#[derive(Debug, Clone)]
pub struct RunOrchestrator {
    config: RunConfig,
    project_dir: PathBuf,
    base_env: EnvironmentMap,
    resolver: PackageManagerResolver,
}

impl RunOrchestrator {
    /// Orchestrator for the current directory and process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new(config: RunConfig) -> Result<Self> {
        let project_dir = std::env::current_dir()?;
        Ok(Self::in_dir(config, project_dir))
    }

    /// Orchestrator rooted at `project_dir`, using the process environment.
    pub fn in_dir(config: RunConfig, project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            resolver: PackageManagerResolver::from_env(&project_dir),
            config,
            project_dir,
            base_env: process_environment(),
        }
    }

    /// Replace the base environment inline assignments are merged into.
    pub fn with_base_env(mut self, base_env: EnvironmentMap) -> Self {
        self.base_env = base_env;
        self
    }

    /// Replace the package manager resolver.
    pub fn with_resolver(mut self, resolver: PackageManagerResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Run the positional arguments of one invocation.
    ///
    /// Leading `NAME=value` arguments extend the environment, after any
    /// `.env` files when those are enabled. With nothing left to run this is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns the first failure: an unknown variable in strict mode, an
    /// unsplittable command, an unresolvable `npm:` reference, or a command
    /// that could not be spawned or exited non-zero.
    pub fn run(&self, args: &[String]) -> Result<()> {
        let (assignments, rest) = split_inline_assignments(args);
        let mut env = self.base_env.clone();
        if self.config.load_env_files {
            load_env_files(&self.project_dir, &mut env);
        }
        for (name, value) in assignments {
            debug!(%name, "inline environment assignment");
            env.insert(name, value);
        }

        if rest.is_empty() {
            debug!("nothing to run");
            return Ok(());
        }

        let package_manager = self.resolve_package_manager()?;
        let commands = self.prepare(rest, &env)?;

        let policy = OutputPolicy::from_config(&self.config);
        let spawner = ProcessSpawner::new(&env, &self.project_dir, policy);
        let mut palette = Palette::new();
        let prefixed = self.config.mode.is_prefixed();

        debug!(mode = ?self.config.mode, commands = commands.len(), "dispatching");

        match self.config.mode {
            RunMode::Single => {
                let Some(tokens) = commands.first() else {
                    return Ok(());
                };
                let plan = self.plan(tokens, package_manager.as_ref(), prefixed, &mut palette)?;
                execute(&plan, &spawner)
            }
            RunMode::Sequential => {
                for tokens in &commands {
                    let plan =
                        self.plan(tokens, package_manager.as_ref(), prefixed, &mut palette)?;
                    execute(&plan, &spawner)?;
                }
                Ok(())
            }
            RunMode::Concurrent => {
                let plans: Vec<Result<Plan>> = commands
                    .iter()
                    .map(|tokens| {
                        self.plan(tokens, package_manager.as_ref(), prefixed, &mut palette)
                    })
                    .collect();
                run_concurrently(plans, |plan| execute(&plan?, &spawner))
            }
        }
    }

    fn resolve_package_manager(&self) -> Result<Option<ResolvedPackageManager>> {
        match self.config.package_manager_override {
            Some(kind) => self.resolver.check_override(kind.executable()),
            None => Ok(self.resolver.detect(&self.project_dir)),
        }
    }

    /// Turn the remaining arguments into expanded token lists.
    ///
    /// Single mode treats every argument as one token of one command. The
    /// other modes split each argument shell-style and drop empty commands.
    pub fn prepare(&self, args: &[String], env: &EnvironmentMap) -> Result<Vec<Vec<String>>> {
        let strict = self.config.strict;
        let expand_all = |tokens: &[String]| -> Result<Vec<String>> {
            tokens
                .iter()
                .map(|token| expand(token, env, strict))
                .collect()
        };

        if self.config.mode == RunMode::Single {
            return Ok(vec![expand_all(args)?]);
        }

        let mut commands = Vec::with_capacity(args.len());
        for arg in args {
            let tokens = shell_words::split(arg).map_err(|e| CrossRunError::InvalidCommand {
                command: arg.clone(),
                message: e.to_string(),
            })?;
            if tokens.is_empty() {
                continue;
            }
            commands.push(expand_all(&tokens)?);
        }
        Ok(commands)
    }

    /// Resolve one command's tokens into something runnable.
    ///
    /// `npm:` references are resolved against the package manager; glob
    /// references read package.json at this point. Colour slots are taken
    /// from `palette` in the order commands are resolved.
    pub fn plan(
        &self,
        tokens: &[String],
        package_manager: Option<&ResolvedPackageManager>,
        prefixed: bool,
        palette: &mut Palette,
    ) -> Result<Plan> {
        let Some((head, extra)) = tokens.split_first() else {
            return Ok(Plan::Scripts {
                commands: Vec::new(),
                concurrent: false,
            });
        };

        let Some(script) = head.strip_prefix(SCRIPT_PREFIX) else {
            let prefix = make_prefix(prefixed, command_label(head), palette);
            return Ok(Plan::Command(PlannedCommand {
                invocation: CommandInvocation::new(head.clone(), extra.to_vec()),
                prefix,
            }));
        };

        let pm = package_manager.ok_or_else(|| CrossRunError::NoPackageManager {
            command: head.clone(),
        })?;

        if !is_glob(script) {
            let prefix = make_prefix(prefixed, script_label(script), palette);
            return Ok(Plan::Command(PlannedCommand {
                invocation: CommandInvocation::new(pm.executable(), pm.run_args(script, extra)),
                prefix,
            }));
        }

        let declared = read_declared_scripts(&self.project_dir)?;
        let commands = match_scripts(script, &declared)?
            .into_iter()
            .map(|name| PlannedCommand {
                prefix: make_prefix(prefixed, script_label(&name), palette),
                invocation: CommandInvocation::new(pm.executable(), pm.run_args(&name, extra)),
            })
            .collect();

        Ok(Plan::Scripts {
            commands,
            concurrent: self.config.mode == RunMode::Concurrent,
        })
    }
}

fn make_prefix(prefixed: bool, label: String, palette: &mut Palette) -> OutputPrefix {
    let slot = palette.next_slot();
    if prefixed {
        OutputPrefix::labelled(label, slot)
    } else {
        OutputPrefix::unlabelled(slot)
    }
}

/// Run a resolved plan.
pub fn execute(plan: &Plan, spawner: &ProcessSpawner<'_>) -> Result<()> {
    match plan {
        Plan::Command(command) => spawner.spawn(&command.invocation, &command.prefix),
        Plan::Scripts {
            commands,
            concurrent: true,
        } => run_concurrently(commands.iter().collect(), |command| {
            spawner.spawn(&command.invocation, &command.prefix)
        }),
        Plan::Scripts {
            commands,
            concurrent: false,
        } => commands
            .iter()
            .try_for_each(|command| spawner.spawn(&command.invocation, &command.prefix)),
    }
}

/// Run `task` on every item at once and wait for all of them.
///
/// Returns the first failure in the order tasks finished, after every task
/// has finished.
pub fn run_concurrently<T, F>(items: Vec<T>, task: F) -> Result<()>
where
    T: Send,
    F: Fn(T) -> Result<()> + Sync,
{
    let (tx, rx) = mpsc::channel();
    let task = &task;

    thread::scope(|scope| {
        for item in items {
            let tx = tx.clone();
            scope.spawn(move || {
                tx.send(task(item)).ok();
            });
        }
        drop(tx);

        let mut first_failure = None;
        for result in rx {
            if let Err(err) = result {
                debug!(error = %err, "command failed");
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    })
}
