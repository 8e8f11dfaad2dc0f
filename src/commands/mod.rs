// src/commands/mod.rs
//! Command handlers for the Cloudsmith CLI

mod list;

pub use list::{ListContext, cmd_list_distros, cmd_list_packages, cmd_list_repos};
