// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use cloudsmith::api::{Fetcher, Page};
use cloudsmith::commands::ListContext;
use cloudsmith::failure::{FailurePolicy, FailurePresenter, FailureReport, HintRegistry};
use cloudsmith::pagination::{PageInfo, PageRequest};
use cloudsmith::query::{QueryTerm, encode_query};
use cloudsmith::render::{Console, OutputMode};
use cloudsmith::{Entity, Error, Result};
use serde_json::{Value, json};
use std::cell::RefCell;

/// What a stubbed endpoint answers with
#[derive(Debug, Clone)]
pub enum Reply {
    Page(Page),
    Failure(FailureReport),
    /// The request never reached the service
    Transport(String),
}

impl Reply {
    fn into_result(self) -> Result<Page> {
        match self {
            Reply::Page(page) => Ok(page),
            Reply::Failure(report) => Err(report.into()),
            Reply::Transport(reason) => Err(Error::Transport(reason)),
        }
    }
}

/// In-memory [`Fetcher`] answering every endpoint with a canned reply
///
/// Each call is recorded as a short description for later assertions.
#[derive(Debug)]
pub struct StubFetcher {
    pub packages: Reply,
    pub repos: Reply,
    pub distros: Reply,
    pub calls: RefCell<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        let empty = Reply::Page(Page::default());
        Self {
            packages: empty.clone(),
            repos: empty.clone(),
            distros: empty,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_packages(mut self, reply: Reply) -> Self {
        self.packages = reply;
        self
    }

    pub fn with_repos(mut self, reply: Reply) -> Self {
        self.repos = reply;
        self
    }

    pub fn with_distros(mut self, reply: Reply) -> Self {
        self.distros = reply;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Fetcher for StubFetcher {
    fn list_packages(
        &self,
        owner: &str,
        repo: &str,
        query: &[QueryTerm],
        page: PageRequest,
    ) -> Result<Page> {
        self.calls.borrow_mut().push(format!(
            "packages {}/{} query={:?} params={:?}",
            owner,
            repo,
            encode_query(query),
            page.query_params()
        ));
        self.packages.clone().into_result()
    }

    fn list_repos(&self, owner: Option<&str>, page: PageRequest) -> Result<Page> {
        self.calls.borrow_mut().push(format!(
            "repos {} params={:?}",
            owner.unwrap_or("-"),
            page.query_params()
        ));
        self.repos.clone().into_result()
    }

    fn list_distros(&self, package_format: Option<&str>) -> Result<Vec<Entity>> {
        self.calls
            .borrow_mut()
            .push(format!("distros {}", package_format.unwrap_or("-")));
        self.distros.clone().into_result().map(|page| page.results)
    }
}

/// Captured output of one command run
pub struct Output {
    pub result: Result<()>,
    pub stdout: String,
    pub stderr: String,
}

/// Run a listing command against `fetcher` with in-memory streams
pub fn run_command<F>(
    fetcher: &StubFetcher,
    mode: OutputMode,
    policy: FailurePolicy,
    command: F,
) -> Output
where
    F: FnOnce(&mut ListContext<'_, Vec<u8>, Vec<u8>>) -> Result<()>,
{
    let registry = HintRegistry::with_defaults();
    let mut console = Console::new(Vec::new(), Vec::new(), mode);
    let result = {
        let mut ctx = ListContext {
            console: &mut console,
            fetcher,
            presenter: FailurePresenter::new(&registry),
            spinner: false,
            policy,
        };
        command(&mut ctx)
    };
    let (out, err) = console.into_parts();
    Output {
        result,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

pub fn entity(value: Value) -> Entity {
    serde_json::from_value(value).unwrap()
}

/// Complete pagination metadata
pub fn page_info(page: u64, page_size: u64, page_total: u64, count: u64) -> PageInfo {
    PageInfo {
        page: Some(page),
        page_size: Some(page_size),
        page_total: Some(page_total),
        count: Some(count),
    }
}

/// Two packages in acme/web, deliberately out of slug order
pub fn sample_packages() -> Vec<Entity> {
    vec![
        entity(json!({
            "name": "zlib",
            "version": "1.3",
            "status_str": "Completed",
            "stage_str": "Fully Synchronised",
            "namespace": "acme",
            "repository": "web",
            "slug": "zlib-13",
            "size": 1024
        })),
        entity(json!({
            "name": "nginx",
            "version": "1.24.0",
            "status_str": "Completed",
            "stage_str": "Syncing",
            "namespace": "acme",
            "repository": "web",
            "slug": "nginx-1240",
            "size": 2048
        })),
    ]
}

pub fn sample_repos() -> Vec<Entity> {
    vec![entity(json!({
        "name": "Web",
        "repository_type_str": "Public",
        "namespace": "acme",
        "slug": "web"
    }))]
}

/// Two distros, one of them without releases
pub fn sample_distros() -> Vec<Entity> {
    vec![
        entity(json!({
            "name": "Ubuntu",
            "slug": "ubuntu",
            "format": "deb",
            "versions": [
                {"name": "Noble", "slug": "noble"},
                {"name": "Jammy", "slug": "jammy"}
            ]
        })),
        entity(json!({
            "name": "Empty",
            "slug": "empty",
            "format": "rpm",
            "versions": []
        })),
    ]
}

pub fn not_found() -> FailureReport {
    FailureReport::new(404, "Not Found")
        .with_detail("Not found.")
        .with_header("x-request-id", "abc123")
}
