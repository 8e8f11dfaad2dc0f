// src/cli/mod.rs
//! CLI definitions for the Cloudsmith client
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the library's `commands` module.
//!
//! Commands:
//! - `list` (alias `ls`) - List distributions, packages or repositories
//! - `completions` - Generate shell completion scripts

use clap::{Args, Parser, Subcommand};
use cloudsmith::OutputMode;
use std::path::PathBuf;

mod list;

pub use list::ListCommands;

#[derive(Parser)]
#[command(name = "cloudsmith")]
#[command(author = "Cloudsmith CLI Contributors")]
#[command(version)]
#[command(about = "Command-line client for the Cloudsmith package service", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Output format for results
    #[arg(
        short = 'F',
        long,
        value_enum,
        global = true,
        default_value_t = OutputMode::Pretty
    )]
    pub output_format: OutputMode,

    /// Show extra detail when a request fails (such as reply headers)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// API key used to authenticate requests
    #[arg(short = 'k', long, env = "CLOUDSMITH_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the API
    #[arg(long, env = "CLOUDSMITH_API_HOST", global = true)]
    pub api_host: Option<String>,

    /// Path to the configuration file
    #[arg(short = 'C', long, global = true, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Named profile from the configuration file
    #[arg(short = 'P', long, global = true)]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List distributions, packages or repositories
    #[command(subcommand, visible_alias = "ls")]
    List(ListCommands),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_packages() {
        let cli = Cli::try_parse_from([
            "cloudsmith",
            "list",
            "packages",
            "acme/web",
            "-q",
            "name:nginx",
            "-p",
            "2",
            "-l",
            "20",
            "-F",
            "pretty_json",
        ])
        .unwrap();

        assert_eq!(cli.global.output_format, OutputMode::PrettyJson);
        match cli.command {
            Commands::List(ListCommands::Packages {
                owner_repo,
                query,
                page,
                page_size,
            }) => {
                assert_eq!(owner_repo.owner, "acme");
                assert_eq!(owner_repo.repo, "web");
                assert_eq!(query.as_deref(), Some("name:nginx"));
                assert_eq!(page, Some(2));
                assert_eq!(page_size, Some(20));
            }
            _ => panic!("expected list packages"),
        }
    }

    #[test]
    fn test_ls_alias() {
        let cli = Cli::try_parse_from(["cloudsmith", "ls", "repos"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List(ListCommands::Repos { owner: None, .. })
        ));
        assert_eq!(cli.global.output_format, OutputMode::Pretty);
    }

    #[test]
    fn test_distros_format_choices() {
        assert!(Cli::try_parse_from(["cloudsmith", "list", "distros", "deb"]).is_ok());
        assert!(Cli::try_parse_from(["cloudsmith", "list", "distros", "npm"]).is_err());
    }

    #[test]
    fn test_rejects_bad_owner_repo() {
        assert!(Cli::try_parse_from(["cloudsmith", "list", "packages", "acme"]).is_err());
        assert!(Cli::try_parse_from(["cloudsmith", "list", "packages", "acme/"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_output_format() {
        assert!(Cli::try_parse_from(["cloudsmith", "-F", "yaml", "list", "repos"]).is_err());
    }

    #[test]
    fn test_zero_page_values_reach_service() {
        let cli =
            Cli::try_parse_from(["cloudsmith", "list", "repos", "-p", "0", "-l", "0"]).unwrap();
        match cli.command {
            Commands::List(ListCommands::Repos {
                page, page_size, ..
            }) => {
                assert_eq!(page, Some(0));
                assert_eq!(page_size, Some(0));
            }
            _ => panic!("expected list repos"),
        }

        assert!(
            Cli::try_parse_from(["cloudsmith", "list", "packages", "acme/web", "-p", "0"]).is_ok()
        );
    }
}
