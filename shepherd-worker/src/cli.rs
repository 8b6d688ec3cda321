use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface definition.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Health checks, DNS refresh and booking release for a pool of tracked domains"
)]
pub struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, short, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Evaluate every domain against the reputation sources
    CheckDomains,
    /// Refresh the stored DNS records of every domain
    UpdateDns,
    /// Return domains whose bookings have all ended to the pool
    ReleaseDomains {
        /// Only report which domains would be released
        #[arg(long)]
        dry_run: bool,
    },
    /// Bulk-import domains from a CSV file with a header row
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Keep going past invalid rows instead of stopping at the first one
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Run the jobs on the intervals from the `[schedule]` section until interrupted
    Schedule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_accepts_dry_run() {
        let cli = Cli::parse_from(["shepherd-worker", "release-domains", "--dry-run"]);
        assert_eq!(cli.command, Command::ReleaseDomains { dry_run: true });
        assert_eq!(cli.config, None);
    }

    #[test]
    fn config_flag_works_after_subcommand() {
        let cli = Cli::parse_from([
            "shepherd-worker",
            "import",
            "pool.csv",
            "--skip-invalid",
            "--config",
            "/etc/shepherd.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/shepherd.toml")));
        assert_eq!(
            cli.command,
            Command::Import {
                file: PathBuf::from("pool.csv"),
                skip_invalid: true,
            }
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["shepherd-worker"]).is_err());
    }
}
