use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use verifier_core::{update, AppState, Msg, Phase, VerificationReport};
use verifier_engine::{export_report, ReportDocument};
use verifier_logging::{verifier_debug, verifier_info, verifier_warn};

use super::cli::{Cli, OutputFormat};
use super::config::load_config;
use super::effects::EffectRunner;
use super::{logging, ui};

/// How a run ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AllValid,
    SomeInvalid,
    /// Empty input or a failed submission.
    NotVerified,
}

impl Outcome {
    pub fn from_report(report: &VerificationReport) -> Self {
        if report.summary().invalid() == 0 {
            Outcome::AllValid
        } else {
            Outcome::SomeInvalid
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::AllValid => ExitCode::SUCCESS,
            Outcome::SomeInvalid => ExitCode::from(2),
            Outcome::NotVerified => ExitCode::from(1),
        }
    }
}

pub fn run_app(cli: Cli) -> Result<Outcome> {
    let config = load_config(cli.config.as_deref())?;
    logging::initialize(
        cli.log.unwrap_or(config.logging.destination),
        logging::level_from_name(&config.logging.level),
    );
    verifier_info!("verifier starting (format {:?})", cli.format);

    let input = read_input(cli.input.as_deref())?;
    let presentation = config.display.presentation(cli.viewport_width());
    let runner = EffectRunner::new(config.client_settings(cli.origin.as_deref())?)?;
    let mut session = Session::new(AppState::with_presentation(presentation), runner);

    session.dispatch(Msg::InputChanged(input))?;
    session.dispatch(Msg::VerifyClicked)?;
    session.wait_while_pending()?;
    session.navigate(&cli)?;

    let view = session.state.view();
    let report = match session.state.phase() {
        Phase::Succeeded(report) => report.clone(),
        Phase::Failed(failure) => {
            verifier_warn!("Verification failed ({:?}): {}", failure.kind, failure.detail);
            match cli.format {
                OutputFormat::Human => print!("{}", ui::render::render(&view)),
                OutputFormat::Json => {
                    println!("{}", ui::render::render_failure_json(failure.kind)?)
                }
            }
            return Ok(Outcome::NotVerified);
        }
        Phase::Idle | Phase::Pending { .. } => return Ok(Outcome::NotVerified),
    };

    let generated_at = Utc::now().to_rfc3339();
    let document = ReportDocument::new(&generated_at, &report);
    match cli.format {
        OutputFormat::Human => print!("{}", ui::render::render(&view)),
        OutputFormat::Json => println!("{}", document.to_json_pretty()?),
    }
    if let Some(path) = &cli.out {
        let written = export_report(path, &document)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        verifier_info!("Report written to {:?}", written);
    }

    Ok(Outcome::from_report(&report))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read addresses from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read addresses from stdin")?;
            Ok(text)
        }
    }
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn dispatch(&mut self, msg: Msg) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.run(effects)?;
        if was_dirty {
            if let Some(line) = ui::render::render_progress(&self.state.view()) {
                eprintln!("{line}");
            }
        }
        Ok(())
    }

    fn wait_while_pending(&mut self) -> Result<()> {
        while let Some(request_id) = self.state.pending_request() {
            let Some(msg) = self.runner.next_msg() else {
                bail!("verification engine stopped while request {request_id} was pending");
            };
            verifier_debug!("request={} engine message {}", request_id, msg_name(&msg));
            self.dispatch(msg)?;
        }
        Ok(())
    }

    /// Applies page, page size and scroll flags to the finished result set.
    fn navigate(&mut self, cli: &Cli) -> Result<()> {
        if let Some(page_size) = cli.page_size {
            self.dispatch(Msg::PageSizeSelected(page_size))?;
            if self.state.presentation().page_size != page_size {
                verifier_warn!("Ignoring unsupported page size {}", page_size);
                eprintln!(
                    "warning: unsupported page size {page_size}, keeping {}",
                    self.state.presentation().page_size
                );
            }
        }
        if let Some(page) = cli.page {
            self.dispatch(Msg::PageSelected(page))?;
        }
        if let Some(offset) = cli.scroll {
            self.dispatch(Msg::ListScrolled { offset })?;
        }
        Ok(())
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::AttemptFailed { .. } => "AttemptFailed",
        Msg::VerificationSucceeded { .. } => "VerificationSucceeded",
        Msg::VerificationFailed { .. } => "VerificationFailed",
        _ => "Other",
    }
}
