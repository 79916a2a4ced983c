//! Upstream fetcher for the BanyanDB proto sync tool.
//!
//! Retrieves the `.proto` files of each requested module from the upstream
//! GitHub repository at a given branch or commit, producing the in-memory
//! snapshot the merge engine consumes.

pub mod error;
pub mod github;

pub use error::FetchError;
pub use github::{GithubFetcher, UpstreamFile};
