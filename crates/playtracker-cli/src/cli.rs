use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Track Marvel Champions plays in a local SQLite database.
#[derive(Parser, Debug)]
#[command(name = "playtracker", version, about)]
pub struct Cli {
    /// Config file (YAML or TOML). Defaults to ~/.playtracker/config.yml
    #[arg(long, global = true, env = "PLAYTRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Migrate the database and start the web server (default)
    Serve(ServeArgs),
    /// Apply pending migrations and exit
    Migrate(MigrateArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding the config file
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// List applied and pending migrations without applying anything
    #[arg(long)]
    pub status: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["playtracker"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.log_json);
    }

    #[test]
    fn serve_overrides_parse() {
        let cli =
            Cli::try_parse_from(["playtracker", "serve", "--host", "0.0.0.0", "--port", "9000"])
                .unwrap();
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(args.port, Some(9000));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "playtracker",
            "migrate",
            "--status",
            "--config",
            "tracker.toml",
            "--log-json",
        ])
        .unwrap();
        assert!(cli.log_json);
        assert_eq!(cli.config, Some(PathBuf::from("tracker.toml")));
        assert!(matches!(cli.command, Some(Command::Migrate(MigrateArgs { status: true }))));
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Cli::try_parse_from(["playtracker", "serve", "--port", "http"]).is_err());
    }
}
