// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use translatable_columns::app_config::{Config, LogLevel};
use translatable_columns::checker::{AutoConfirm, Confirm, PromptConfirm, SchemaRepairChecker};
use translatable_columns::database::{DatabaseConnection, Repository};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a model's table can hold translations and repair plain values
    CheckRepair(CheckRepairArgs),

    /// Generate shell completions for translatable
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CheckRepairArgs {
    /// Name of the model to check, as declared in the configuration
    #[arg(value_name = "MODEL")]
    model: String,

    /// Configuration file path
    #[arg(short, long, default_value = "translatable.json")]
    config_path: PathBuf,

    /// SQLite database file, overriding the configured one
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Repair plain values without asking
    #[arg(short = 'y', long)]
    yes: bool,
}

/// Translatable - locale-keyed JSON columns
///
/// Checks that a model's translatable columns can store a JSON map of
/// translations and rewrites plain values into single-locale maps.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn to_level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // Initialize the logger with the most verbose level; the effective level
    // is applied with set_max_level once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "translatable", &mut std::io::stdout());
            Ok(())
        }
        Commands::CheckRepair(args) => run_check_repair(args),
    }
}

fn run_check_repair(options: CheckRepairArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(to_level_filter(cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(database) = &options.database {
        config.database_path = Some(database.clone());
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(config.log_level));
    }

    let Some(model) = config.find_model(&options.model) else {
        println!(
            "Model '{}' is not declared in {}",
            options.model,
            options.config_path.display()
        );
        return Ok(());
    };

    let database_path = config.database_path()?;
    debug!("Using database {}", database_path.display());
    let repo = Repository::new(DatabaseConnection::new(&database_path)?);

    let mut stdout = std::io::stdout();
    let colored = stdout.is_terminal();
    let checker = SchemaRepairChecker::new(&repo, model, config.locale.clone()).colored(colored);

    let mut auto = AutoConfirm(true);
    let mut prompt;
    let confirm: &mut dyn Confirm = if options.yes {
        &mut auto
    } else {
        prompt = PromptConfirm::stdio();
        &mut prompt
    };

    let outcome = checker.run(confirm, &mut stdout)?;
    if !outcome.is_usable() {
        bail!(
            "Model {} failed check stage {}: {}",
            model.name,
            outcome.stage(),
            outcome
        );
    }

    Ok(())
}
