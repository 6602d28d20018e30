//! Front HTTP server.
//!
//! React Native clients talk to this server only. Bundle requests for a
//! configured entry are answered with the packager's runtime bundle followed
//! by webpack's output for that entry; everything else goes to the packager.

use crate::cli::Platform;
use crate::config::{Options, RUNTIME_MODULE};
use crate::error::ServerError;
use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Answer React Native clients expect from `/status`.
pub const STATUS_BODY: &str = "packager-status:running";

/// Upstreams and entries the proxy serves.
#[derive(Debug)]
pub struct ProxyConfig {
    pub packager_url: String,
    pub bundler_url: String,

    /// Entry module of every enabled platform
    pub entries: Vec<(Platform, String)>,
}

impl ProxyConfig {
    pub fn from_options(options: &Options) -> Self {
        Self {
            packager_url: options.packager_url(),
            bundler_url: options.bundler_url(),
            entries: options
                .enabled_platforms()
                .into_iter()
                .map(|p| (p, options.entry(p).to_string()))
                .collect(),
        }
    }

    fn platform_for_entry(&self, name: &str) -> Option<Platform> {
        self.entries
            .iter()
            .find(|(_, entry)| entry == name)
            .map(|(platform, _)| *platform)
    }
}

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct ProxyState {
    config: Arc<ProxyConfig>,
    client: reqwest::Client,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }
}

/// Build the proxy router.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/status", get(handle_status))
        .fallback(handle_request)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A bound proxy serving in a background task.
#[derive(Debug)]
pub struct ProxyServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl ProxyServer {
    /// Bind `addr` (`host:port`) and start serving.
    pub async fn bind(addr: &str, state: ProxyState) -> Result<Self, ServerError> {
        let bind_error = |e: std::io::Error| ServerError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        };

        let listener = TcpListener::bind(addr).await.map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        let (tx, rx) = oneshot::channel::<()>();
        let app = router(state);
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
        });

        tracing::debug!(addr = %local_addr, "proxy listening");

        Ok(Self {
            addr: local_addr,
            shutdown: Some(tx),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// True once the serve task has ended.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Stop accepting connections and wait for the serve task.
    pub async fn shutdown(&mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        match self.task.take() {
            Some(task) => match task.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(ServerError::Stop(format!("proxy failed: {}", e))),
                Err(e) => Err(ServerError::Stop(format!("proxy task panicked: {}", e))),
            },
            None => Ok(()),
        }
    }
}

async fn handle_status() -> &'static str {
    STATUS_BODY
}

async fn handle_request(
    State(state): State<ProxyState>,
    Query(params): Query<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let entry = uri
        .path()
        .strip_prefix('/')
        .and_then(|path| path.strip_suffix(".bundle"));

    if method == Method::GET {
        if let Some((entry, platform)) =
            entry.and_then(|e| state.config.platform_for_entry(e).map(|p| (e, p)))
        {
            return handle_bundle(&state, entry, platform, &params).await;
        }
    }

    forward_to_packager(&state, method, &uri, body).await
}

async fn handle_bundle(
    state: &ProxyState,
    entry: &str,
    entry_platform: Platform,
    params: &HashMap<String, String>,
) -> Response {
    let platform = params
        .get("platform")
        .and_then(|p| Platform::from_query(p))
        .unwrap_or(entry_platform);
    let dev = params.get("dev").map_or(true, |v| v != "false");
    let minify = params.get("minify").is_some_and(|v| v == "true");

    let runtime_url = format!(
        "{}/{}.bundle?platform={}&dev={}&minify={}",
        state.config.packager_url, RUNTIME_MODULE, platform, dev, minify
    );
    let bundle_url = format!("{}/{}.js", state.config.bundler_url, entry);

    tracing::debug!(%platform, entry, "serving combined bundle");

    let (runtime, bundle) = tokio::join!(
        fetch_text(&state.client, &runtime_url),
        fetch_text(&state.client, &bundle_url)
    );

    match (runtime, bundle) {
        (Ok(runtime), Ok(bundle)) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/javascript")
            .body(Body::from(format!("{}\n{}", runtime, bundle)))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        (Err(reason), _) | (_, Err(reason)) => bad_gateway(reason),
    }
}

async fn forward_to_packager(
    state: &ProxyState,
    method: Method,
    uri: &Uri,
    body: Bytes,
) -> Response {
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    let url = format!("{}{}", state.config.packager_url, path_and_query);

    let upstream = match state.client.request(method, &url).body(body).send().await {
        Ok(response) => response,
        Err(e) => return bad_gateway(format!("{}: {}", url, e)),
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return bad_gateway(format!("{}: {}", url, e)),
    };

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("{}: {}", url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("{} answered {}", url, status));
    }

    response.text().await.map_err(|e| format!("{}: {}", url, e))
}

fn bad_gateway(reason: String) -> Response {
    tracing::warn!("upstream request failed: {}", reason);
    (StatusCode::BAD_GATEWAY, reason).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_options_skips_disabled_platforms() {
        let options = Options {
            android: false,
            ios_entry: "main.ios".to_string(),
            ..Options::default()
        };
        let config = ProxyConfig::from_options(&options);

        assert_eq!(config.packager_url, "http://localhost:8081");
        assert_eq!(config.bundler_url, "http://localhost:8082");
        assert_eq!(config.entries, vec![(Platform::Ios, "main.ios".to_string())]);
        assert_eq!(config.platform_for_entry("main.ios"), Some(Platform::Ios));
        assert_eq!(config.platform_for_entry("index.android"), None);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let config = ProxyConfig {
            packager_url: "http://127.0.0.1:9".to_string(),
            bundler_url: "http://127.0.0.1:9".to_string(),
            entries: Vec::new(),
        };
        let mut server = ProxyServer::bind("127.0.0.1:0", ProxyState::new(config))
            .await
            .unwrap();
        assert_ne!(server.local_addr().port(), 0);
        assert!(!server.is_finished());

        server.shutdown().await.unwrap();
        assert!(server.is_finished());
        server.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_bind_conflict() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap().to_string();
        let config = ProxyConfig {
            packager_url: String::new(),
            bundler_url: String::new(),
            entries: Vec::new(),
        };

        let err = ProxyServer::bind(&addr, ProxyState::new(config))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Bind { .. }));
    }
}
