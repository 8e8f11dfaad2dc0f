// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cloudsmith::api::ApiClient;
use cloudsmith::commands::{self, ListContext};
use cloudsmith::config::{ConfigFile, resolve_api_options};
use cloudsmith::failure::{FailurePolicy, FailurePresenter, HintRegistry, hints};
use cloudsmith::pagination::PageRequest;
use cloudsmith::render::Console;
use std::io;
use std::process;
use tracing::debug;

mod cli;

use cli::{Cli, Commands, GlobalOptions, ListCommands};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with structured output on stdout
    let default_filter = if cli.global.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        // Failure reports have already been printed; only the status remains
        if let Some(cloudsmith::Error::Exit(code)) = e.downcast_ref::<cloudsmith::Error>() {
            process::exit(*code);
        }
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List(command) => run_list(&cli.global, command),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "cloudsmith", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_list(global: &GlobalOptions, command: ListCommands) -> Result<()> {
    let config = ConfigFile::load(global.config_file.as_deref())?;
    let section = config.section(global.profile.as_deref())?;
    let options = resolve_api_options(
        global.api_host.as_deref(),
        global.api_key.as_deref(),
        &section,
    );
    debug!("Using API host {}", options.host);
    let client = ApiClient::new(&options)?;

    if hints::install(HintRegistry::with_defaults()).is_err() {
        debug!("Hint registry already installed");
    }
    let presenter = FailurePresenter::new(hints::global())
        .verbose(global.verbose)
        .debug(global.debug)
        .api_key_configured(options.api_key.is_some());

    let mut stdio = Console::stdio(global.output_format);
    let mut ctx = ListContext {
        console: &mut stdio,
        fetcher: &client,
        presenter,
        spinner: global.output_format.is_pretty() && console::Term::stderr().is_term(),
        policy: FailurePolicy::Exit,
    };

    match command {
        ListCommands::Distros { package_format } => {
            commands::cmd_list_distros(&mut ctx, package_format.as_deref())?;
        }
        ListCommands::Packages {
            owner_repo,
            query,
            page,
            page_size,
        } => {
            commands::cmd_list_packages(
                &mut ctx,
                &owner_repo.owner,
                &owner_repo.repo,
                query.as_deref(),
                PageRequest::new(page, page_size),
            )?;
        }
        ListCommands::Repos {
            owner,
            page,
            page_size,
        } => {
            let page = PageRequest::new(page, page_size);
            commands::cmd_list_repos(&mut ctx, owner.as_deref(), page)?;
        }
    }
    Ok(())
}
