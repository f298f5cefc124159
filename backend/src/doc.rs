//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the things endpoint, the health probes and the schema
//! wrappers from the inbound layer. [`api_document`] applies the
//! [`ServerAndPaths`] rewrite so the document advertises the API base path as
//! its server and lists API routes relative to it.
//!
//! The rewritten document is served at `/openapi/v1.json` when docs are
//! enabled and printed by `cargo run --bin openapi-dump`.

use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};

use crate::inbound::http::API_BASE_PATH;
use crate::inbound::http::schemas::{ProblemDetailsSchema, ThingModeSchema};
use crate::inbound::http::things::GetThingResponse;

/// OpenAPI document for the REST API before the base-path rewrite.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Problem service API",
        description = "Demonstrates how domain errors and faults are reported as application/problem+json responses.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::things::get_thing,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(GetThingResponse, ProblemDetailsSchema, ThingModeSchema)),
    tags(
        (name = "things", description = "Simulated business queries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

/// Rewrite the server entry to point at the API base path.
///
/// The server URL becomes the public URL (or the document's first server)
/// joined with the base path. Paths under the base path are made relative to
/// it; any other path keeps its key and gets a path-level server pointing at
/// the root so it still resolves.
#[derive(Debug, Clone, Copy)]
pub struct ServerAndPaths<'a> {
    base_path: &'a str,
    public_url: Option<&'a str>,
}

impl<'a> ServerAndPaths<'a> {
    /// Rewrite for `base_path`, optionally anchored at `public_url`.
    pub fn new(base_path: &'a str, public_url: Option<&'a str>) -> Self {
        Self {
            base_path,
            public_url,
        }
    }

    fn relative_path<'p>(&self, path: &'p str) -> Option<&'p str> {
        let base = self.base_path.trim_end_matches('/');
        match path.strip_prefix(base)? {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }
}

fn join_url(root: &str, path: &str) -> String {
    format!(
        "{}/{}",
        root.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl Modify for ServerAndPaths<'_> {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let root = self
            .public_url
            .map(str::to_owned)
            .or_else(|| {
                openapi
                    .servers
                    .as_ref()
                    .and_then(|servers| servers.first())
                    .map(|server| server.url.clone())
            })
            .unwrap_or_else(|| "/".to_owned());

        openapi.servers = Some(vec![Server::new(join_url(&root, self.base_path))]);

        let paths = std::mem::take(&mut openapi.paths.paths);
        openapi.paths.paths = paths
            .into_iter()
            .map(|(path, mut item)| match self.relative_path(&path) {
                Some(relative) => (relative.to_owned(), item),
                None => {
                    item.servers = Some(vec![Server::new(root.clone())]);
                    (path, item)
                }
            })
            .collect();
    }
}

/// Build the published document for `public_url`.
///
/// # Examples
/// ```
/// use problem_service::doc::api_document;
///
/// let doc = api_document(Some("https://things.example.com"));
/// let servers = doc.servers.expect("servers");
/// assert_eq!(servers[0].url, "https://things.example.com/temp/api");
/// assert!(doc.paths.paths.contains_key("/things"));
/// ```
pub fn api_document(public_url: Option<&str>) -> utoipa::openapi::OpenApi {
    let mut document = ApiDoc::openapi();
    ServerAndPaths::new(API_BASE_PATH, public_url).modify(&mut document);
    document
}
