mod args;
mod logging;
mod output;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use mailprobe::{CancellationToken, DisposableDomains, Validator, check_syntax};

use crate::args::{CheckArgs, Cli, Commands};
use crate::output::{exit_code, write_report};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let code = match cli.cmd {
        Commands::Check(args) => run_check(args).await?,
        Commands::Syntax { email } => {
            let ok = check_syntax(&email);
            println!("{} {email}", if ok { "[OK]     " } else { "[INVALID]" });
            if ok { 0 } else { 2 }
        }
        Commands::Disposable {
            email,
            disposable_list,
        } => {
            let list = load_disposable(disposable_list.as_deref())?;
            let hit = list.is_disposable(&email);
            println!("{} {email}", if hit { "[DISPOSABLE]" } else { "[OK]        " });
            if hit { 2 } else { 0 }
        }
    };

    std::process::exit(code);
}

async fn run_check(args: CheckArgs) -> Result<i32> {
    if !check_syntax(&args.from) {
        bail!("--from '{}' n'est pas une adresse valide", args.from);
    }
    let disposable = load_disposable(args.disposable_list.as_deref())?;
    let validator = Validator::from_system_conf()
        .context("initialisation du résolveur DNS")?
        .with_options(args.probe_options())
        .with_disposable(disposable);
    tracing::debug!(options = ?validator.options(), from = %args.from, "probe options");

    // Ctrl-C annule la sonde en cours; la session SMTP est quand même fermée.
    let token = CancellationToken::new();
    let on_signal = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let report = validator
        .check_with_cancel(&args.from, &args.email, &token)
        .await;
    write_report(&report, &args.format)?;
    Ok(exit_code(&report.result))
}

fn load_disposable(path: Option<&Path>) -> Result<DisposableDomains> {
    let Some(path) = path else {
        return Ok(DisposableDomains::builtin());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read disposable list {}", path.display()))?;
    let domains = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));
    Ok(DisposableDomains::with_extra(domains))
}
