use anyhow::{Result, bail};
use mailprobe::{CheckReport, CheckResult, ResultState};

pub fn write_report(report: &CheckReport, format: &str) -> Result<()> {
    match format {
        "human" => {
            print_human(report);
            Ok(())
        }
        "json" => write_json(&report.result),
        other => bail!("format inconnu '{other}', utilisez human|json"),
    }
}

fn print_human(report: &CheckReport) {
    let result = &report.result;
    println!("Result: {} ({})", result.state(), result.detail());
    println!("Message: {}", result.message());
    if let Some(cause) = &report.cause {
        println!("Cause: {cause}");
    }
    if let Some(host) = &report.mx_host {
        println!("MX: {host}");
    }
    if !report.transcript.is_empty() {
        println!("Evidence:");
        for line in &report.transcript {
            println!("  {line}");
        }
    }
}

#[cfg(feature = "with-serde")]
fn write_json(result: &CheckResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &CheckResult) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

/// codes de sortie : 0 valide, 2 invalide, 1 erreur / indéterminé
pub fn exit_code(result: &CheckResult) -> i32 {
    match result.state() {
        ResultState::Valid => 0,
        ResultState::Invalid => 2,
        ResultState::Error => 1,
    }
}
