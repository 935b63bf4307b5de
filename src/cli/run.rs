//! The top-level run: load config, wire collaborators, execute the plan.

use crate::config::{load_install_config, InstallConfig};
use crate::error::Result;
use crate::fetch::HttpDownloader;
use crate::runner::{Collaborators, Provisioner};
use crate::shell::SystemRunner;
use crate::ui::{OutputMode, Reporter, Theme};

use super::args::Cli;

/// Resolve the configuration for this invocation.
pub fn resolve(cli: &Cli) -> Result<InstallConfig> {
    load_install_config(cli.config.as_deref(), &cli.overrides())
}

/// Run the installer and return the process exit code.
///
/// Configuration errors are returned as `Err`; step failures are
/// reported through the summary and turned into an exit code.
pub fn execute(cli: &Cli) -> Result<u8> {
    let config = resolve(cli)?;
    tracing::debug!("Resolved config: {:?}", config);

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let reporter = Reporter::new(mode, Theme::detect(cli.no_color));

    let runner = SystemRunner::new();
    let downloader = HttpDownloader::new()?.with_progress(mode.shows_progress() && !cli.dry_run);
    let provisioner = Provisioner::new(
        &config,
        Collaborators {
            runner: &runner,
            downloader: &downloader,
        },
    );

    if mode.shows_progress() {
        println!(
            "{}",
            reporter.theme().format_header(&format!(
                "Installing COSSAN-X into {}",
                config.install_root.display()
            ))
        );
    }

    if cli.dry_run {
        for line in reporter.plan_lines(&provisioner.plan()) {
            println!("{}", line);
        }
        return Ok(0);
    }

    let summary = provisioner.run_with_progress(&mut |event| {
        if let Some(line) = reporter.progress_line(&event) {
            println!("{}", line);
        }
    });

    for line in reporter.summary_lines(&summary) {
        println!("{}", line);
    }

    Ok(summary.exit_code())
}
