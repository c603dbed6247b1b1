//! Shell state shared by every command handler.

use booking_config::{Config, ConfigManager};
use booking_core::{BookingWizard, ContentSource, ModalHost, SystemClock, WizardStep};
use dialoguer::theme::ColorfulTheme;
use tracing::debug;

use crate::cli::commands;
use crate::cli::core::{CliError, CliMode, CommandError, CommandResult, LoopControl};
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandRegistry;
use crate::cli::remote::{ApiContentSource, HttpSubmitter};

/// Tells the user the booking form went away.
struct TerminalHost;

impl ModalHost for TerminalHost {
    fn hide(&mut self) {
        cli_io::print_info("Booking form closed.");
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub wizard: BookingWizard<HttpSubmitter>,
    pub content: Box<dyn ContentSource>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Context rooted at `$TRANSFER_BOOKING_HOME` (or the platform default).
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::from_env()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script,
        });
        let config = config_manager.load()?;
        let submitter = HttpSubmitter::new(&config.client)?;
        let content = ApiContentSource::new(&config.client)?;
        let wizard = BookingWizard::new(submitter)
            .with_clock(SystemClock)
            .with_host(TerminalHost);

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        debug!(config = %config_manager.config_path().display(), "shell context ready");

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            wizard,
            content: Box::new(content),
            last_command: None,
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn prompt(&self) -> String {
        if self.wizard.show_success() {
            return "booking [submitted]> ".into();
        }
        let step = self.wizard.step();
        let marker = if self.wizard.pending_confirmation().is_some() {
            "?"
        } else {
            ""
        };
        format!(
            "booking [{}/{} {}{}]> ",
            step.index(),
            WizardStep::COUNT,
            step.title(),
            marker
        )
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Runs one command line as typed at the prompt.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());
        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            cli_io::print_hint(format!("Did you mean `{best}`?"));
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            other => cli_io::print_error(other),
        }
    }

    pub fn confirm_exit(&self) -> Result<bool, CommandError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit and discard the current booking?", false)
    }

    /// Points the HTTP clients at the configured service.
    pub fn reload_clients(&mut self) -> CommandResult {
        let submitter = HttpSubmitter::new(&self.config.client)
            .map_err(|err| CommandError::Message(err.to_string()))?;
        let content = ApiContentSource::new(&self.config.client)
            .map_err(|err| CommandError::Message(err.to_string()))?;
        *self.wizard.submitter_mut() = submitter;
        self.content = Box::new(content);
        Ok(())
    }
}
