// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;

use log::{info, warn, LevelFilter};
use tokio::io::{AsyncBufReadExt, BufReader};

use toastkit::config;
use toastkit::console::{self, Command, COMMAND_HELP};
use toastkit::diagnostics::DiagnosticsCollector;
use toastkit::notifications::{Manager, TokioClock};
use toastkit::service::{self, ServiceClosed, ServiceHandle};

const HELP: &str = "\
toastkit - drive a toast notification stack from the terminal

USAGE:
  toastkit [OPTIONS]

OPTIONS:
  --config-dir <DIR>    read settings.toml from DIR
  --log-level <LEVEL>   off, error, warn, info, debug or trace [default: info]
  -h, --help            print this help

Commands are read from standard input, one per line. Type 'help' for the list.";

struct Flags {
    config_dir: Option<PathBuf>,
    log_level: LevelFilter,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        log_level: args
            .opt_value_from_str("--log-level")?
            .unwrap_or(LevelFilter::Info),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {rest:?}"),
        });
    }
    Ok(Some(flags))
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_level(flags.log_level)
        .init()
    {
        eprintln!("failed to initialize logger: {err}");
        return ExitCode::FAILURE;
    }

    let (config, warning) = config::load_with_override(flags.config_dir);
    if let Some(warning) = warning {
        warn!("{warning}");
    }

    let mut manager = Manager::with_clock(TokioClock).with_defaults(config.toast_defaults());
    let mut journal = config.diagnostics_enabled().then(|| {
        let collector = DiagnosticsCollector::new(config.buffer_capacity());
        manager.set_diagnostics(collector.handle());
        collector
    });

    let (handle, task) = service::spawn(manager);
    tokio::spawn(report_changes(handle.clone()));

    match run_console(&handle, journal.as_mut()).await {
        Ok(()) => {}
        Err(ServiceClosed) => warn!("notification service stopped unexpectedly"),
    }

    // Already stopped if the console saw it close.
    let _ = handle.shutdown().await;
    match task.await {
        Ok(last) => {
            info!("exiting with {} active toasts", last.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!("notification service failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_console(
    handle: &ServiceHandle<String>,
    mut journal: Option<&mut DiagnosticsCollector>,
) -> Result<(), ServiceClosed> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(()),
            Err(err) => {
                warn!("failed to read standard input: {err}");
                return Ok(());
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::Show(request) => {
                let id = handle.show(request.message.clone(), request.options()).await?;
                println!("{id}");
            }
            Command::Dismiss(id) => handle.dismiss(id).await?,
            Command::Hover(id) => handle.pointer_enter(id).await?,
            Command::Leave(id) => handle.pointer_leave(id).await?,
            Command::Clear => handle.clear().await?,
            Command::List => println!("{}", console::format_snapshot(&handle.snapshot())),
            Command::Journal => match journal.as_deref_mut() {
                Some(collector) => {
                    collector.process_pending();
                    match collector.export_json() {
                        Ok(json) => println!("{json}"),
                        Err(err) => eprintln!("failed to export journal: {err}"),
                    }
                }
                None => eprintln!("diagnostics are disabled in settings.toml"),
            },
            Command::Help => println!("{COMMAND_HELP}"),
            Command::Quit => return Ok(()),
        }
    }
}

/// Logs the number of active toasts whenever it changes.
async fn report_changes(handle: ServiceHandle<String>) {
    let mut updates = handle.subscribe();
    let mut active = updates.borrow().len();
    drop(handle);

    while updates.changed().await.is_ok() {
        let now = updates.borrow_and_update().len();
        if now != active {
            info!("{now} active toasts");
            active = now;
        }
    }
}
