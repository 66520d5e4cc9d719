//! State shared by every command of one invocation.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{ConfigProvider, FileConfigProvider, LoadedConfig, Settings};
use crate::environment::{resolve_named, resolve_with_signals, ResolvedEnvironment};
use crate::error::{DbGuardError, Result};
use crate::shell::{MigrationCli, SystemMigrationCli};
use crate::signals::SignalCache;
use crate::ui::{Prompt, PromptOption, PromptResult, UserInterface};

/// Prompt key for choosing an environment when detection fails.
pub const SELECT_ENVIRONMENT_KEY: &str = "environment";

/// Builds the migration CLI from the loaded settings.
pub type MigrationCliFactory = Box<dyn Fn(&Settings) -> Box<dyn MigrationCli>>;

/// Runtime signals observed for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    pub branch: Option<String>,
    pub linked_project_id: Option<String>,
}

/// Config, signal and process access for commands.
pub struct CommandContext {
    config: Box<dyn ConfigProvider>,
    signals: RefCell<SignalCache>,
    migration_cli: MigrationCliFactory,
    ci: bool,
    assume_yes: bool,
}

impl CommandContext {
    /// Create a context over explicit providers.
    ///
    /// The migration CLI runs in `project_root` using the configured
    /// `migration_cli` executable.
    pub fn new(config: Box<dyn ConfigProvider>, signals: SignalCache, project_root: &Path) -> Self {
        let root = project_root.to_path_buf();
        Self {
            config,
            signals: RefCell::new(signals),
            migration_cli: Box::new(move |settings: &Settings| -> Box<dyn MigrationCli> {
                Box::new(SystemMigrationCli::new(&settings.migration_cli, &root))
            }),
            ci: false,
            assume_yes: false,
        }
    }

    /// Context for a project on disk.
    ///
    /// The project root is `project` when given, otherwise the directory of
    /// the discovered config file, otherwise `cwd`.
    pub fn for_project(project: Option<&Path>, config: Option<&Path>, cwd: &Path) -> Self {
        let provider = match config {
            Some(path) => FileConfigProvider::at(path),
            None => FileConfigProvider::discover(project.unwrap_or(cwd)),
        };
        let root: PathBuf = match project {
            Some(p) => p.to_path_buf(),
            None => provider
                .path()
                .and_then(|p| p.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| cwd.to_path_buf()),
        };
        debug!("Project root: {}", root.display());
        Self::new(Box::new(provider), SignalCache::for_project(&root), &root)
    }

    /// Replace how the migration CLI is built.
    pub fn with_migration_cli(mut self, factory: MigrationCliFactory) -> Self {
        self.migration_cli = factory;
        self
    }

    /// Force non-interactive mode.
    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    /// Skip confirmation prompts.
    pub fn with_assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn ci(&self) -> bool {
        self.ci
    }

    pub fn assume_yes(&self) -> bool {
        self.assume_yes
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Load the configuration or fail with `ConfigurationMissing`.
    pub fn load(&self) -> Result<LoadedConfig> {
        self.config.require()
    }

    pub fn migration_cli(&self, settings: &Settings) -> Box<dyn MigrationCli> {
        (self.migration_cli)(settings)
    }

    /// Drop memoized signals so the next read queries again.
    pub fn refresh_signals(&self) {
        self.signals.borrow_mut().reset();
    }

    /// Branch and linked project, memoized for this command.
    pub fn signals(&self) -> Signals {
        let mut cache = self.signals.borrow_mut();
        Signals {
            branch: cache.current_branch(),
            linked_project_id: cache.linked_project_id(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.signals.borrow_mut().is_dirty()
    }

    /// Resolve the target environment.
    ///
    /// When no signal matches, an interactive session that is not `strict`
    /// picks from the configured environments; otherwise the command fails
    /// with `EnvironmentUnresolved`.
    pub fn resolve(
        &self,
        config: &LoadedConfig,
        flag: Option<&str>,
        ui: &mut dyn UserInterface,
    ) -> Result<ResolvedEnvironment> {
        let signals = self.signals();
        if let Some(resolved) = resolve_with_signals(
            flag,
            signals.branch.as_deref(),
            signals.linked_project_id.as_deref(),
            &config.registry,
        )? {
            return Ok(resolved);
        }

        let signal = describe_signals(&signals);
        let can_prompt = !self.ci
            && !config.settings.strict
            && ui.is_interactive()
            && !config.registry.is_empty();
        if !can_prompt {
            return Err(DbGuardError::EnvironmentUnresolved { signal });
        }

        ui.warning(&format!("No environment matches {}", signal));
        let options = config
            .registry
            .names()
            .map(|name| PromptOption {
                label: name.to_string(),
                value: name.to_string(),
            })
            .collect();
        let prompt = Prompt::select(SELECT_ENVIRONMENT_KEY, "Target environment", options);
        match ui.prompt(&prompt)? {
            PromptResult::Cancelled => Err(DbGuardError::ConfirmationCancelled),
            answer => resolve_named(&answer.as_string(), &config.registry),
        }
    }
}

fn describe_signals(signals: &Signals) -> String {
    let branch = match &signals.branch {
        Some(b) => format!("branch '{}'", b),
        None => "no git branch".to_string(),
    };
    match &signals.linked_project_id {
        Some(id) => format!("{} and linked project '{}'", branch, id),
        None => format!("{} and no linked project", branch),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fakes for command tests.

    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    use crate::config::{parse_config, ConfigProvider, LoadedConfig, Settings};
    use crate::error::{DbGuardError, Result};
    use crate::shell::{CliOutput, MigrationCli};
    use crate::signals::{LinkedProject, SignalCache, SourceControl};

    use super::CommandContext;

    pub struct StaticConfig {
        pub content: Option<String>,
        pub locks: Rc<RefCell<Vec<(String, bool)>>>,
    }

    impl ConfigProvider for StaticConfig {
        fn load(&self) -> Result<Option<LoadedConfig>> {
            self.content
                .as_deref()
                .map(|c| parse_config(c, Path::new("/project/dbguard.toml")))
                .transpose()
        }

        fn set_locked(&self, environment: &str, locked: bool) -> Result<()> {
            self.require()?.registry.require(environment)?;
            self.locks
                .borrow_mut()
                .push((environment.to_string(), locked));
            Ok(())
        }

        fn search_root(&self) -> &Path {
            Path::new("/project")
        }
    }

    pub struct FakeScm {
        pub branch: Option<String>,
        pub dirty: bool,
    }

    impl SourceControl for FakeScm {
        fn current_branch(&self) -> Option<String> {
            self.branch.clone()
        }

        fn is_dirty(&self) -> bool {
            self.dirty
        }
    }

    pub struct FakeLink(pub Option<String>);

    impl LinkedProject for FakeLink {
        fn current_linked_project_id(&self) -> Option<String> {
            self.0.clone()
        }
    }

    /// Records invocations; exits with `exit_code`.
    #[derive(Clone)]
    pub struct RecordingCli {
        pub calls: Rc<RefCell<Vec<Vec<String>>>>,
        pub exit_code: i32,
        pub missing: bool,
    }

    impl MigrationCli for RecordingCli {
        fn program(&self) -> &str {
            "supabase"
        }

        fn run(&self, args: &[String]) -> Result<CliOutput> {
            if self.missing {
                return Err(DbGuardError::ExternalToolMissing {
                    tool: "supabase".into(),
                    install_hint: String::new(),
                });
            }
            self.calls.borrow_mut().push(args.to_vec());
            Ok(CliOutput {
                exit_code: Some(self.exit_code),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    pub struct Fixture {
        pub config: Option<String>,
        pub branch: Option<String>,
        pub dirty: bool,
        pub linked: Option<String>,
        pub exit_code: i32,
        pub missing_cli: bool,
    }

    pub struct Built {
        pub context: CommandContext,
        pub calls: Rc<RefCell<Vec<Vec<String>>>>,
        pub locks: Rc<RefCell<Vec<(String, bool)>>>,
    }

    impl Fixture {
        pub fn new(config: &str) -> Self {
            Self {
                config: Some(config.to_string()),
                branch: None,
                dirty: false,
                linked: None,
                exit_code: 0,
                missing_cli: false,
            }
        }

        pub fn branch(mut self, branch: &str) -> Self {
            self.branch = Some(branch.to_string());
            self
        }

        pub fn linked(mut self, id: &str) -> Self {
            self.linked = Some(id.to_string());
            self
        }

        pub fn dirty(mut self) -> Self {
            self.dirty = true;
            self
        }

        pub fn exit_code(mut self, code: i32) -> Self {
            self.exit_code = code;
            self
        }

        pub fn build(self) -> Built {
            let locks = Rc::new(RefCell::new(Vec::new()));
            let calls = Rc::new(RefCell::new(Vec::new()));
            let config = StaticConfig {
                content: self.config,
                locks: Rc::clone(&locks),
            };
            let signals = SignalCache::new(
                Box::new(FakeScm {
                    branch: self.branch,
                    dirty: self.dirty,
                }),
                Box::new(FakeLink(self.linked)),
            );
            let cli = RecordingCli {
                calls: Rc::clone(&calls),
                exit_code: self.exit_code,
                missing: self.missing_cli,
            };
            let context = CommandContext::new(Box::new(config), signals, Path::new("/project"))
                .with_migration_cli(Box::new(move |_: &Settings| -> Box<dyn MigrationCli> {
                    Box::new(cli.clone())
                }));
            Built {
                context,
                calls,
                locks,
            }
        }
    }
}
