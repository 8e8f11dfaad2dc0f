// src/commands/list.rs
//! Listing commands: distributions, packages and repositories
//!
//! Each listing fetches once, then either emits the structured document or
//! prints a table plus a summary line. A failed fetch is reported instead.

use crate::api::Fetcher;
use crate::error::Result;
use crate::failure::{FailureContext, FailurePolicy, FailurePresenter, handle_api_failures};
use crate::models::Entity;
use crate::pagination::{PageInfo, PageRequest, PageSummary, pluralize};
use crate::progress::Spinner;
use crate::query::parse_query;
use crate::render::{Console, Table, columns, emit_structured};
use console::Style;
use std::io::Write;
use tracing::info;

/// Everything a listing command needs besides its own arguments
pub struct ListContext<'a, O: Write, E: Write> {
    pub console: &'a mut Console<O, E>,
    pub fetcher: &'a dyn Fetcher,
    pub presenter: FailurePresenter<'a>,
    /// Show a spinner while fetching
    pub spinner: bool,
    pub policy: FailurePolicy,
}

/// List distributions, optionally for a single package format
pub fn cmd_list_distros<O: Write, E: Write>(
    ctx: &mut ListContext<'_, O, E>,
    package_format: Option<&str>,
) -> Result<()> {
    info!("Listing distributions (format: {:?})", package_format);
    let fetcher = ctx.fetcher;
    let Some(distros) = fetch(ctx, "distributions", || fetcher.list_distros(package_format))? else {
        return Ok(());
    };

    if emit_structured(ctx.console, &distros, None)? {
        return Ok(());
    }

    let table = columns::distros_table(&distros, package_format.is_none());
    let num_results = columns::release_count(&distros);
    let suffix = pluralize(num_results, "distribution release", "distribution releases");
    print_listing(ctx.console, &table, &PageSummary::unpaged(num_results, suffix))
}

/// List packages in `owner/repo`, filtered by an optional search query
pub fn cmd_list_packages<O: Write, E: Write>(
    ctx: &mut ListContext<'_, O, E>,
    owner: &str,
    repo: &str,
    query: Option<&str>,
    page: PageRequest,
) -> Result<()> {
    info!("Listing packages for {}/{}", owner, repo);
    let terms = parse_query(query);
    let fetcher = ctx.fetcher;
    let Some(packages) = fetch(ctx, "packages", || {
        fetcher.list_packages(owner, repo, &terms, page)
    })?
    else {
        return Ok(());
    };

    if emit_structured(ctx.console, &packages.results, Some(&packages.page_info))? {
        return Ok(());
    }

    let table = columns::packages_table(&packages.results);
    print_paged_listing(
        ctx.console,
        &table,
        &packages.results,
        &packages.page_info,
        ("package visible", "packages visible"),
    )
}

/// List repositories for `owner`, or the authenticated user when absent
pub fn cmd_list_repos<O: Write, E: Write>(
    ctx: &mut ListContext<'_, O, E>,
    owner: Option<&str>,
    page: PageRequest,
) -> Result<()> {
    info!("Listing repositories for {}", owner.unwrap_or("current user"));
    let fetcher = ctx.fetcher;
    let Some(repos) = fetch(ctx, "repositories", || fetcher.list_repos(owner, page))? else {
        return Ok(());
    };

    if emit_structured(ctx.console, &repos.results, Some(&repos.page_info))? {
        return Ok(());
    }

    let table = columns::repositories_table(&repos.results);
    print_paged_listing(
        ctx.console,
        &table,
        &repos.results,
        &repos.page_info,
        ("repository visible", "repositories visible"),
    )
}

/// Fetch under a spinner, narrating progress and reporting failures
///
/// Returns `None` when a failure was reported and swallowed.
fn fetch<T, O: Write, E: Write>(
    ctx: &mut ListContext<'_, O, E>,
    noun: &str,
    operation: impl FnOnce() -> Result<T>,
) -> Result<Option<T>> {
    let message = format!("Getting list of {} ...", noun);
    let fetched = Spinner::run(ctx.spinner, &message, operation);

    ctx.console.narrate(&format!("{} ", message))?;
    if matches!(&fetched, Err(e) if e.as_failure().is_none()) {
        // Local errors are not reported here, so finish the narration line
        ctx.console.narrate_line("")?;
    }
    let context =
        FailureContext::new(format!("Failed to get list of {}!", noun)).policy(ctx.policy);
    let result = handle_api_failures(ctx.console, &ctx.presenter, &context, || fetched)?;

    if result.is_some() {
        let ok = ctx.console.paint("OK", &Style::new().green());
        ctx.console.narrate_line(&ok)?;
    }
    Ok(result)
}

fn print_paged_listing<O: Write, E: Write>(
    console: &mut Console<O, E>,
    table: &Table,
    results: &[Entity],
    page_info: &PageInfo,
    (singular, plural): (&str, &str),
) -> Result<()> {
    let summary = page_info.summary(results.len(), pluralize(results.len(), singular, plural));
    print_listing(console, table, &summary)
}

/// Table (when it has rows), blank line, then the summary line
fn print_listing<O: Write, E: Write>(
    console: &mut Console<O, E>,
    table: &Table,
    summary: &PageSummary,
) -> Result<()> {
    if !table.is_empty() {
        console.out_line("")?;
        for line in table.render(console.is_styled()) {
            console.out_line(&line)?;
        }
    }

    console.out_line("")?;
    let count_style = if summary.num_results > 0 {
        Style::new().green()
    } else {
        Style::new().red()
    };
    let line = format!(
        "Results: {} {}",
        console.paint(summary.count_text(), &count_style),
        summary.detail_text()
    );
    console.out_line(&line)?;
    console.flush()?;
    Ok(())
}
