//! Thin CLI demo harness for the engine: a workspace needs one runnable
//! binary to prove the crates actually wire together end to end, even
//! though a full CLI wrapper is out of scope for the engine itself.
//!
//! This is deliberately not a shell: it reads a line with the engine, runs
//! it with `/bin/sh -c`, prints the output, and records the exit code in
//! history. Completion, theming, and persistence are left at their
//! in-memory/null defaults since supplying real ones is a host concern.

use std::path::PathBuf;
use std::process::Command;
use std::sync::Once;

use anyhow::Result;
use clap::Parser;
use core_actions::{engine_init, NullHistoryPersistence, ReadLineOutcome};
use core_config::load_from;
use core_input::{KeyParser, TtyByteSource};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "lnedit", version, about = "lnedit engine demo shell")]
struct Args {
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    static HOOK: Once = Once::new();
    let appender = tracing_appender::rolling::never(".", "lnedit.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let mut result = None;
    HOOK.call_once(|| {
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(writer)
            .try_init()
            .is_ok()
        {
            result = Some(guard);
        }
    });
    result
}

fn run_command(line: &str) -> i32 {
    match Command::new("/bin/sh").arg("-c").arg(line).status() {
        Ok(status) => status.code().unwrap_or(-1),
        Err(e) => {
            error!(target: "runtime.exec", error = %e, "failed to spawn command");
            -1
        }
    }
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    let args = Args::parse();
    let config = load_from(args.config)?;

    info!(target: "runtime", "startup");
    let (mut engine, _raw_guard) = engine_init(config, Box::new(NullHistoryPersistence))?;
    engine.set_cwd(std::env::current_dir().map(|p| p.display().to_string()).unwrap_or_default());

    let mut parser = KeyParser::new(TtyByteSource::stdin());
    let mut stdout = std::io::stdout();

    loop {
        match engine.read_line("lnedit> ", &mut parser, &mut stdout) {
            Ok(ReadLineOutcome::Accepted(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                let code = run_command(&line);
                info!(target: "runtime", exit_code = code, "command executed");
            }
            Ok(ReadLineOutcome::Aborted) => continue,
            Ok(ReadLineOutcome::Interrupted) => continue,
            Ok(ReadLineOutcome::Eof) => break,
            Err(e) => {
                error!(target: "runtime", error = %e, "read_line io error");
                break;
            }
        }
    }

    engine.shutdown();
    info!(target: "runtime", "shutdown");
    Ok(())
}
