// src/render/columns.rs

//! Column values and tables for each listing
//!
//! Every column value is a plain function of an entity. Styles are attached
//! per cell when the table is built and only take effect in pretty mode.

use super::table::{Cell, Table};
use crate::models::{Entity, sorted_by_slug};
use console::Style;

/// Stage reported once a package needs no further processing
pub const FULLY_SYNCHRONISED: &str = "Fully Synchronised";

/// Placeholder for a missing status or stage
const UNKNOWN: &str = "Unknown";

/// Placeholder for a missing version
const NO_VERSION: &str = "None";

const SLUG_SEPARATOR: &str = "/";

pub const PACKAGE_HEADERS: [&str; 4] = [
    "Name",
    "Version",
    "Status",
    "Owner / Repository (Identifier)",
];
pub const REPOSITORY_HEADERS: [&str; 3] = ["Name", "Type", "Owner / Repository (Identifier)"];

/// Package display name, falling back to its filename
pub fn package_name(package: &Entity) -> String {
    package
        .text("name")
        .or_else(|| package.text("filename"))
        .unwrap_or_default()
        .to_string()
}

/// Package version, or `None` when it has none
pub fn package_version(package: &Entity) -> String {
    package.text("version").unwrap_or(NO_VERSION).to_string()
}

/// Package status, with the sync stage appended until fully synchronised
pub fn package_status(package: &Entity) -> String {
    let status = package.text("status_str").unwrap_or(UNKNOWN);
    match package.text("stage_str") {
        Some(stage) if stage != FULLY_SYNCHRONISED => format!("{} / {}", status, stage),
        _ => status.to_string(),
    }
}

/// `owner/repository/slug`
pub fn package_identifier(package: &Entity) -> String {
    join_slugs(&package_identifier_parts(package))
}

fn package_identifier_parts(package: &Entity) -> [&str; 3] {
    [
        package.text("namespace").unwrap_or_default(),
        package.text("repository").unwrap_or_default(),
        package.slug(),
    ]
}

pub fn repository_name(repo: &Entity) -> String {
    repo.text("name").unwrap_or_default().to_string()
}

pub fn repository_type(repo: &Entity) -> String {
    repo.text("repository_type_str").unwrap_or_default().to_string()
}

/// `owner/slug`
pub fn repository_identifier(repo: &Entity) -> String {
    join_slugs(&repository_identifier_parts(repo))
}

fn repository_identifier_parts(repo: &Entity) -> [&str; 2] {
    [repo.text("namespace").unwrap_or_default(), repo.slug()]
}

/// `distro/release`
pub fn release_identifier(distro: &Entity, release: &Entity) -> String {
    join_slugs(&release_identifier_parts(distro, release))
}

fn release_identifier_parts<'a>(distro: &'a Entity, release: &'a Entity) -> [&'a str; 2] {
    [distro.slug(), release.slug()]
}

fn join_slugs(parts: &[&str]) -> String {
    parts.join(SLUG_SEPARATOR)
}

/// Identifier cell: slug parts joined like [`join_slugs`], the last part
/// magenta and the owning parts green
fn identifier_cell(parts: &[&str]) -> Cell {
    let green = Style::new().green();
    let magenta = Style::new().magenta();
    let last = parts.len().saturating_sub(1);
    let mut cell = Cell::default();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            cell = cell.push(SLUG_SEPARATOR, None);
        }
        let style = if i == last { magenta.clone() } else { green.clone() };
        cell = cell.push(*part, Some(style));
    }
    cell
}

/// Table headers for the distro listing
pub fn distro_headers(show_format: bool) -> Vec<&'static str> {
    if show_format {
        vec!["Distro", "Release", "Format", "Distro / Release (Identifier)"]
    } else {
        vec!["Distro", "Release", "Distro / Release (Identifier)"]
    }
}

/// Package table, rows sorted by slug
pub fn packages_table(packages: &[Entity]) -> Table {
    let mut table = Table::new(PACKAGE_HEADERS);
    for package in sorted_by_slug(packages) {
        table.push_row(vec![
            Cell::styled(package_name(package), Style::new().cyan()),
            Cell::styled(package_version(package), Style::new().yellow()),
            Cell::styled(package_status(package), Style::new().blue()),
            identifier_cell(&package_identifier_parts(package)),
        ]);
    }
    table
}

/// Repository table, rows sorted by slug
pub fn repositories_table(repos: &[Entity]) -> Table {
    let mut table = Table::new(REPOSITORY_HEADERS);
    for repo in sorted_by_slug(repos) {
        table.push_row(vec![
            Cell::styled(repository_name(repo), Style::new().cyan()),
            Cell::styled(repository_type(repo), Style::new().yellow()),
            identifier_cell(&repository_identifier_parts(repo)),
        ]);
    }
    table
}

/// Distribution table: one row per release
///
/// Distros and their releases are both sorted by slug. Distros without
/// releases contribute no rows.
pub fn distros_table(distros: &[Entity], show_format: bool) -> Table {
    let mut table = Table::new(distro_headers(show_format));
    for distro in sorted_by_slug(distros) {
        let releases = distro.releases();
        for release in sorted_by_slug(&releases) {
            let mut row = vec![
                Cell::styled(distro.text("name").unwrap_or_default(), Style::new().cyan()),
                Cell::styled(release.text("name").unwrap_or_default(), Style::new().yellow()),
            ];
            if show_format {
                row.push(Cell::styled(
                    distro.text("format").unwrap_or_default(),
                    Style::new().blue(),
                ));
            }
            row.push(identifier_cell(&release_identifier_parts(distro, release)));
            table.push_row(row);
        }
    }
    table
}

/// Number of releases across all distros
pub fn release_count(distros: &[Entity]) -> usize {
    distros.iter().map(|distro| distro.releases().len()).sum()
}
