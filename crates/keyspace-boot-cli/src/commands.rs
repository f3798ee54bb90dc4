//! Subcommand implementations.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8Path;
use keyspace_boot::{
    Bootstrapper, CommandKeyspace, ConfigTemplate, Keyspace, ModelRegistry, PidFileProcess,
    ProcessControl, RestartTiming, StopOutcome, StructuredBootReporter, ThreadPause,
    process::restart, render_keyspace, schema::default_keyspace,
};
use keyspace_boot_config::{BootSettings, Config, required_path};

use crate::AppError;
use crate::cli::{CliCommand, KeyspaceSelection};

pub(crate) fn execute<W, E>(
    command: &CliCommand,
    config: &Config,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<ExitCode, AppError>
where
    W: Write,
    E: Write,
{
    match command {
        CliCommand::Boot(selection) => boot(selection, config, stdout),
        CliCommand::Render(selection) => render(selection, config, stdout),
        CliCommand::Apply(selection) => apply(selection, config, stdout),
        CliCommand::Start => {
            process_control(config)?.start()?;
            writeln!(stdout, "started")?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Stop => {
            let outcome = process_control(config)?.stop()?;
            writeln!(stdout, "{}", describe_stop(outcome))?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Restart => {
            let process = process_control(config)?;
            let outcome = restart(&process, &ThreadPause, RestartTiming::default())?;
            match outcome.stop {
                Ok(stop) => writeln!(stdout, "{}; restarted", describe_stop(stop))?,
                Err(error) => {
                    writeln!(stderr, "warning: {error}")?;
                    writeln!(stdout, "restarted")?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn boot<W: Write>(
    selection: &KeyspaceSelection,
    config: &Config,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    let settings = BootSettings::from_config(config)?;
    let verify_program = config
        .verify_program()
        .ok_or(AppError::MissingVerifyProgram)?;
    let registry = load_registry(config, Some(verify_program))?;
    let selected = select(&registry, selection)?;

    let bootstrapper = Bootstrapper::from_settings(
        &settings,
        PidFileProcess::from_settings(&settings),
        Arc::new(StructuredBootReporter::new()),
    );
    let outcome = bootstrapper.boot(selected.map(|keyspace| keyspace as &dyn Keyspace), &registry)?;
    writeln!(stdout, "{outcome}")?;
    Ok(ExitCode::SUCCESS)
}

fn render<W: Write>(
    selection: &KeyspaceSelection,
    config: &Config,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    let registry = load_registry(config, None)?;
    let fragment = fragment_for(&registry, selection)?;
    writeln!(stdout, "{fragment}")?;
    Ok(ExitCode::SUCCESS)
}

fn apply<W: Write>(
    selection: &KeyspaceSelection,
    config: &Config,
    stdout: &mut W,
) -> Result<ExitCode, AppError> {
    let template = ConfigTemplate::new(
        required_path(config.template_path.as_ref(), "template_path")?,
        required_path(config.target_path.as_ref(), "target_path")?,
    );
    let registry = load_registry(config, None)?;
    let fragment = fragment_for(&registry, selection)?;
    template.apply(&fragment)?;
    writeln!(stdout, "wrote {}", template.target_path())?;
    Ok(ExitCode::SUCCESS)
}

fn load_registry(config: &Config, verify_program: Option<&Utf8Path>) -> Result<ModelRegistry, AppError> {
    let path = config.model_path().ok_or(AppError::MissingModel)?;
    Ok(ModelRegistry::load(path, verify_program)?)
}

fn select<'a>(
    registry: &'a ModelRegistry,
    selection: &KeyspaceSelection,
) -> Result<Option<&'a CommandKeyspace>, AppError> {
    selection
        .keyspace
        .as_deref()
        .map(|name| {
            registry
                .find(name)
                .ok_or_else(|| AppError::UnknownKeyspace(name.to_owned()))
        })
        .transpose()
}

fn fragment_for(registry: &ModelRegistry, selection: &KeyspaceSelection) -> Result<String, AppError> {
    match select(registry, selection)? {
        Some(keyspace) => Ok(render_keyspace(keyspace)),
        None => Ok(render_keyspace(default_keyspace(registry)?.as_ref())),
    }
}

fn process_control(config: &Config) -> Result<PidFileProcess, AppError> {
    Ok(PidFileProcess::new(
        required_path(config.process_binary.as_ref(), "process_binary")?,
        required_path(config.pid_file.as_ref(), "pid_file")?,
    )
    .with_stop_timeout(Duration::from_millis(config.stop_timeout_ms)))
}

fn describe_stop(outcome: StopOutcome) -> String {
    match outcome {
        StopOutcome::NotRunning => "not running".to_owned(),
        StopOutcome::Terminated { pid } => format!("terminated pid {pid}"),
    }
}
