// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: page number
fn page_arg() -> Arg {
    Arg::new("page")
        .short('p')
        .long("page")
        .value_name("PAGE")
        .help("Page number to fetch")
}

/// Common argument: page size
fn page_size_arg() -> Arg {
    Arg::new("page_size")
        .short('l')
        .long("page-size")
        .value_name("PAGE_SIZE")
        .help("Number of results per page")
}

fn build_cli() -> Command {
    Command::new("cloudsmith")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Cloudsmith CLI Contributors")
        .about("Command-line client for the Cloudsmith package service")
        .subcommand_required(true)
        .arg(
            Arg::new("output_format")
                .short('F')
                .long("output-format")
                .global(true)
                .value_parser(["pretty", "json", "pretty_json"])
                .default_value("pretty")
                .help("Output format for results"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Show extra detail when a request fails (such as reply headers)"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .arg(
            Arg::new("api_key")
                .short('k')
                .long("api-key")
                .global(true)
                .help("API key used to authenticate requests [env: CLOUDSMITH_API_KEY]"),
        )
        .arg(
            Arg::new("api_host")
                .long("api-host")
                .global(true)
                .help("Base URL of the API [env: CLOUDSMITH_API_HOST]"),
        )
        .arg(
            Arg::new("config_file")
                .short('C')
                .long("config-file")
                .value_name("PATH")
                .global(true)
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("profile")
                .short('P')
                .long("profile")
                .global(true)
                .help("Named profile from the configuration file"),
        )
        .subcommand(
            Command::new("list")
                .about("List distributions, packages or repositories")
                .visible_alias("ls")
                .subcommand_required(true)
                .subcommand(
                    Command::new("distros")
                        .about("List available distributions and their releases")
                        .arg(
                            Arg::new("package_format")
                                .value_parser(["alpine", "deb", "rpm"])
                                .help("Only show distributions for this package format"),
                        ),
                )
                .subcommand(
                    Command::new("packages")
                        .about("List packages in a repository")
                        .arg(
                            Arg::new("owner_repo")
                                .required(true)
                                .value_name("OWNER/REPO")
                                .help("Repository as OWNER/REPO"),
                        )
                        .arg(
                            Arg::new("query")
                                .short('q')
                                .long("query")
                                .help("Search query (e.g. `name:^nginx$ version:~1.2 architecture:x86_64`)"),
                        )
                        .arg(page_arg())
                        .arg(page_size_arg()),
                )
                .subcommand(
                    Command::new("repos")
                        .about("List repositories for an owner (or the authenticated user)")
                        .arg(Arg::new("owner").help("Namespace owning the repositories"))
                        .arg(page_arg())
                        .arg(page_size_arg()),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell to generate completions for"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = manifest_dir.join("man").join("cloudsmith.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
