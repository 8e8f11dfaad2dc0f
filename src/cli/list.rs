// src/cli/list.rs
//! Listing commands

use clap::Subcommand;
use clap::builder::PossibleValuesParser;
use cloudsmith::api::FORMATS_WITH_DISTROS;
use std::fmt;
use std::str::FromStr;

#[derive(Subcommand)]
pub enum ListCommands {
    /// List available distributions and their releases
    Distros {
        /// Only show distributions for this package format
        #[arg(value_parser = PossibleValuesParser::new(FORMATS_WITH_DISTROS))]
        package_format: Option<String>,
    },

    /// List packages in a repository
    Packages {
        /// Repository as OWNER/REPO
        #[arg(value_name = "OWNER/REPO")]
        owner_repo: OwnerRepo,

        /// Search query (e.g. `name:^nginx$ version:~1.2 architecture:x86_64`)
        #[arg(short, long)]
        query: Option<String>,

        /// Page number to fetch
        #[arg(short, long)]
        page: Option<u32>,

        /// Number of results per page
        #[arg(short = 'l', long)]
        page_size: Option<u32>,
    },

    /// List repositories for an owner (or the authenticated user)
    Repos {
        /// Namespace owning the repositories
        owner: Option<String>,

        /// Page number to fetch
        #[arg(short, long)]
        page: Option<u32>,

        /// Number of results per page
        #[arg(short = 'l', long)]
        page_size: Option<u32>,
    },
}

/// An `OWNER/REPO` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRepo {
    pub owner: String,
    pub repo: String,
}

impl FromStr for OwnerRepo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, repo) = s
            .split_once('/')
            .ok_or_else(|| format!("'{}' must be in the form OWNER/REPO", s))?;

        let owner = owner.trim();
        let repo = repo.trim().trim_end_matches('/');
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(format!("'{}' must be in the form OWNER/REPO", s));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for OwnerRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
