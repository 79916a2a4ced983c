//! GitHub-backed upstream fetcher.
//!
//! File contents come from `raw.githubusercontent.com`; directory listings
//! come from the GitHub contents API, with a fallback probe over the known
//! upstream filenames when the API is unavailable (rate limiting, offline
//! mirrors). No writes happen here; the fetcher only reads.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use protosync_core::{FileSelection, Module, SourceFile, SyncConfig};

use crate::error::FetchError;

/// Filenames probed when the directory listing API is unavailable.
///
/// The union of every proto filename the upstream modules have used.
const FALLBACK_FILENAMES: &[&str] = &[
    "rpc.proto",
    "write.proto",
    "query.proto",
    "schema.proto",
    "topn.proto",
    "model.proto",
    "common.proto",
    "property.proto",
    "trace.proto",
];

/// One fetched upstream file. Immutable once fetched.
#[derive(Debug, Clone)]
pub struct UpstreamFile {
    pub module: Module,
    /// Filename under the module's `v1/` directory.
    pub filename: String,
    /// Branch or commit the content was fetched at.
    pub revision: String,
    pub content: String,
}

impl UpstreamFile {
    /// The merge engine's view of this file.
    pub fn to_source(&self) -> SourceFile {
        SourceFile::new(self.filename.clone(), self.content.clone())
    }
}

/// One entry of a GitHub contents API response.
#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Extract the sorted `.proto` filenames from a contents API payload.
fn parse_listing(payload: &str, module: Module) -> Result<Vec<String>, FetchError> {
    let entries: Vec<ContentsEntry> = serde_json::from_str(payload)
        .map_err(|e| FetchError::listing(module.name(), e.to_string()))?;
    let mut files: Vec<String> = entries
        .into_iter()
        .filter(|e| e.kind == "file" && e.name.ends_with(".proto"))
        .map(|e| e.name)
        .collect();
    files.sort();
    Ok(files)
}

/// Fetches upstream proto files from the configured GitHub repository.
pub struct GithubFetcher {
    client: Client,
    config: SyncConfig,
}

impl GithubFetcher {
    /// Create a fetcher with a 30 second request timeout.
    pub fn new(config: SyncConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("banyandb-proto-sync")
            .build()?;
        Ok(Self { client, config })
    }

    fn raw_url(&self, branch: &str, module: Module, filename: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.config.raw_base,
            self.config.upstream_repo,
            branch,
            self.config.remote_module_path(module),
            filename
        )
    }

    fn listing_url(&self, branch: &str, module: Module) -> String {
        format!(
            "{}/repos/{}/contents/{}?ref={}",
            self.config.api_base,
            self.config.upstream_repo,
            self.config.remote_module_path(module),
            branch
        )
    }

    /// Determine which files to fetch for `module`.
    ///
    /// Modules with a pinned selection skip the listing entirely.
    pub async fn list_module_files(
        &self,
        branch: &str,
        module: Module,
    ) -> Result<Vec<String>, FetchError> {
        match module.file_selection() {
            FileSelection::Named(files) => {
                Ok(files.iter().map(|f| f.to_string()).collect())
            }
            FileSelection::All => match self.list_via_api(branch, module).await {
                Ok(files) if !files.is_empty() => Ok(files),
                Ok(_) => Err(FetchError::layout_changed(
                    module.name(),
                    self.config.remote_module_path(module),
                )),
                Err(e) => {
                    warn!(module = %module, error = %e, "directory listing failed, probing known filenames");
                    self.list_via_probe(branch, module).await
                }
            },
        }
    }

    async fn list_via_api(&self, branch: &str, module: Module) -> Result<Vec<String>, FetchError> {
        let url = self.listing_url(branch, module);
        debug!(module = %module, url = %url, "listing upstream directory");
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::layout_changed(
                module.name(),
                self.config.remote_module_path(module),
            ));
        }
        let payload = response.error_for_status()?.text().await?;
        parse_listing(&payload, module)
    }

    /// Probe the known filename set against raw content URLs.
    async fn list_via_probe(&self, branch: &str, module: Module) -> Result<Vec<String>, FetchError> {
        let mut found = Vec::new();
        for filename in FALLBACK_FILENAMES {
            let url = self.raw_url(branch, module, filename);
            match self.client.head(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    found.push(filename.to_string());
                }
                Ok(_) => {}
                Err(e) => return Err(e.into()),
            }
        }
        if found.is_empty() {
            return Err(FetchError::layout_changed(
                module.name(),
                self.config.remote_module_path(module),
            ));
        }
        found.sort();
        Ok(found)
    }

    /// Fetch one file's raw content.
    pub async fn fetch_file(
        &self,
        branch: &str,
        module: Module,
        filename: &str,
    ) -> Result<String, FetchError> {
        let url = self.raw_url(branch, module, filename);
        debug!(module = %module, file = filename, "fetching");
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::layout_changed(module.name(), url));
        }
        Ok(response.error_for_status()?.text().await?)
    }

    /// Fetch every file of one module, in listing order.
    pub async fn fetch_module(
        &self,
        branch: &str,
        module: Module,
    ) -> Result<Vec<UpstreamFile>, FetchError> {
        let filenames = self.list_module_files(branch, module).await?;
        info!(module = %module, files = ?filenames, "fetching module");

        let mut files = Vec::with_capacity(filenames.len());
        for filename in filenames {
            let content = self.fetch_file(branch, module, &filename).await?;
            files.push(UpstreamFile {
                module,
                filename,
                revision: branch.to_string(),
                content,
            });
        }
        Ok(files)
    }

    /// Fetch every requested module.
    ///
    /// Modules are fetched concurrently; the whole fan-out must succeed
    /// before the result is handed to the merger, which is what makes the
    /// later write step all-or-nothing.
    pub async fn fetch_all(
        &self,
        branch: &str,
        modules: &[Module],
    ) -> Result<Vec<(Module, Vec<UpstreamFile>)>, FetchError> {
        let fetches = modules.iter().map(|&m| async move {
            let files = self.fetch_module(branch, m).await?;
            Ok::<_, FetchError>((m, files))
        });
        futures::future::try_join_all(fetches).await
    }
}
