use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use mailprobe::ProbeOptions;

#[derive(Parser)]
#[command(name = "mailprobe-cli", version)]
#[command(about = "Vérifie la délivrabilité d'une adresse e-mail sans envoyer de message")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// niveau de log: error|warn|info|debug|trace (ou directive EnvFilter)
    #[arg(long, global = true, env = "MAILPROBE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// syntaxe + jetables + MX + sonde SMTP (s'arrête avant DATA)
    Check(CheckArgs),
    /// contrôle de syntaxe seul (aucun accès réseau)
    Syntax {
        email: String,
    },
    /// recherche dans la liste des domaines jetables (aucun accès réseau)
    Disposable {
        email: String,
        /// fichier de domaines jetables supplémentaires (un par ligne, '#' = commentaire)
        #[arg(long = "disposable-list", env = "MAILPROBE_DISPOSABLE_LIST")]
        disposable_list: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct CheckArgs {
    /// adresse e-mail à tester
    pub email: String,

    /// enveloppe MAIL FROM; son domaine sert aussi à choisir le nom EHLO
    #[arg(long = "from", env = "MAILPROBE_FROM_EMAIL", default_value = "noreply@example.org")]
    pub from: String,

    /// format de sortie (human|json)
    #[arg(long, default_value = "human")]
    pub format: String,

    /// port SMTP des serveurs MX
    #[arg(long, env = "MAILPROBE_PORT", default_value_t = 25)]
    pub port: u16,

    /// timeout global de la vérification (ms)
    #[arg(long = "timeout-ms", env = "MAILPROBE_TIMEOUT_MS", default_value_t = 45_000)]
    pub timeout_ms: u64,

    /// timeout de connexion TCP par hôte MX (ms)
    #[arg(long = "connect-timeout-ms", default_value_t = 10_000)]
    pub connect_timeout_ms: u64,

    /// timeout par commande SMTP (ms)
    #[arg(long = "command-timeout-ms", default_value_t = 15_000)]
    pub command_timeout_ms: u64,

    /// fichier de domaines jetables supplémentaires (un par ligne, '#' = commentaire)
    #[arg(long = "disposable-list", env = "MAILPROBE_DISPOSABLE_LIST")]
    pub disposable_list: Option<PathBuf>,
}

impl CheckArgs {
    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions::default()
            .with_port(self.port)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .with_command_timeout(Duration::from_millis(self.command_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_defaults() {
        let cli = Cli::try_parse_from(["mailprobe-cli", "check", "foo@example.com"]).expect("parse");
        let Commands::Check(args) = cli.cmd else {
            panic!("expected check subcommand");
        };
        let options = args.probe_options();
        assert_eq!(options.port, 25);
        assert_eq!(options.timeout, Duration::from_secs(45));
        assert_eq!(args.format, "human");
    }

    #[test]
    fn check_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "mailprobe-cli",
            "--log-level=debug",
            "check",
            "--from=probe@mancke.net",
            "--port=2525",
            "--timeout-ms=500",
            "--format=json",
            "foo@example.com",
        ])
        .expect("parse");
        assert_eq!(cli.log_level, "debug");
        let Commands::Check(args) = cli.cmd else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.from, "probe@mancke.net");
        let options = args.probe_options();
        assert_eq!(options.port, 2525);
        assert_eq!(options.timeout, Duration::from_millis(500));
    }
}
