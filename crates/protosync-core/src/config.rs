//! Immutable sync configuration.
//!
//! Built once at startup and passed explicitly into the fetcher and merger;
//! there is no ambient global state.

use std::path::PathBuf;

use crate::module::Module;

/// Option blocks and statements stripped from upstream files.
///
/// The upstream protos carry HTTP gateway and OpenAPI annotations that the
/// client surface does not compile against.
#[derive(Debug, Clone)]
pub struct SkipPatterns {
    /// Lines starting with any of these prefixes are dropped.
    pub line_prefixes: &'static [&'static str],
    /// Lines containing any of these substrings are dropped.
    pub line_contains: &'static [&'static str],
    /// Multi-line option blocks opened by these patterns are dropped with
    /// brace tracking.
    pub option_blocks: &'static [&'static str],
    /// Import statements containing any of these substrings are dropped.
    pub import_contains: &'static [&'static str],
}

/// Messages and RPCs excluded from a module's merged output.
///
/// These are server-internal definitions upstream; they never belong in the
/// client-facing files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exclusions {
    pub messages: &'static [&'static str],
    pub rpcs: &'static [&'static str],
}

const SEGMENT_INTERNAL_MESSAGES: &[&str] = &[
    "DeleteExpiredSegmentsRequest",
    "DeleteExpiredSegmentsResponse",
    "InternalWriteRequest",
];
const SEGMENT_INTERNAL_RPCS: &[&str] = &["DeleteExpiredSegments"];

/// Full configuration for one sync invocation.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Upstream GitHub repository in `owner/name` form.
    pub upstream_repo: String,
    /// Base URL for raw file content.
    pub raw_base: String,
    /// Base URL for the GitHub REST API.
    pub api_base: String,
    /// Path prefix of the proto tree inside the upstream repository.
    pub remote_proto_path: String,
    /// Local directory the merged files are written to.
    pub output_dir: PathBuf,
    /// Patterns stripped from fetched files.
    pub skip: SkipPatterns,
}

impl SyncConfig {
    /// The module's directory path under the upstream repository.
    pub fn remote_module_path(&self, module: Module) -> String {
        format!("{}/{}/v1", self.remote_proto_path, module.name())
    }

    /// The local path of a module's merged output file.
    pub fn output_path(&self, module: Module) -> PathBuf {
        self.output_dir.join(module.merged_filename())
    }

    /// Definitions excluded from a module's merged output.
    pub fn exclusions(&self, module: Module) -> Exclusions {
        match module {
            Module::Measure | Module::Stream | Module::Trace => Exclusions {
                messages: SEGMENT_INTERNAL_MESSAGES,
                rpcs: SEGMENT_INTERNAL_RPCS,
            },
            Module::Property => Exclusions {
                messages: &[
                    "InternalUpdateRequest",
                    "InternalDeleteRequest",
                    "InternalQueryResponse",
                    "InternalRepairRequest",
                    "InternalRepairResponse",
                ],
                rpcs: &[],
            },
            _ => Exclusions::default(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            upstream_repo: "apache/skywalking-banyandb".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            api_base: "https://api.github.com".to_string(),
            remote_proto_path: "api/proto/banyandb".to_string(),
            output_dir: PathBuf::from("proto/banyandb/v1"),
            skip: SkipPatterns {
                line_prefixes: &["option go_package"],
                line_contains: &[],
                option_blocks: &[
                    "option (google.api.http)",
                    "option (grpc.gateway.protoc_gen_openapiv2.options.openapiv2_swagger)",
                ],
                import_contains: &[
                    "google/api/annotations.proto",
                    "protoc-gen-openapiv2/options/annotations.proto",
                ],
            },
        }
    }
}
