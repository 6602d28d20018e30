use crate::config::{Invocation, Options, ResolvedOptions};
use crate::error::{Result, ServerError};
use crate::server::process::{ManagedProcess, ProcessSpec};
use crate::server::proxy::{ProxyConfig, ProxyServer, ProxyState};
use crate::server::ServerHandle;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const PROXY_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Packager + webpack dev server + front proxy.
#[derive(Debug)]
pub struct DevServer {
    options: Options,
    packager_spec: ProcessSpec,
    bundler_spec: ProcessSpec,
    packager: Option<ManagedProcess>,
    bundler: Option<ManagedProcess>,
    proxy: Option<ProxyServer>,
    client: reqwest::Client,
}

impl DevServer {
    pub fn new(resolved: &ResolvedOptions, invocation: &Invocation) -> Self {
        Self {
            options: resolved.options.clone(),
            packager_spec: packager_command(resolved),
            bundler_spec: bundler_command(resolved, invocation),
            packager: None,
            bundler: None,
            proxy: None,
            client: reqwest::Client::new(),
        }
    }

    /// Resolves with an error as soon as a child exits or the proxy stops
    /// serving. Never resolves while everything is healthy.
    pub async fn closed(&mut self) -> Result<()> {
        loop {
            self.ensure_children_running()?;
            if self.proxy.as_ref().map_or(true, ProxyServer::is_finished) {
                return Err(ServerError::ProcessExited {
                    name: "front server",
                    status: "no longer serving".to_string(),
                }
                .into());
            }
            tokio::time::sleep(READY_POLL_INTERVAL * 2).await;
        }
    }

    fn ensure_children_running(&mut self) -> Result<(), ServerError> {
        for process in [self.packager.as_mut(), self.bundler.as_mut()]
            .into_iter()
            .flatten()
        {
            process.ensure_running()?;
        }
        Ok(())
    }

    async fn wait_until_ready(&mut self) -> Result<()> {
        let timeout_secs = self.options.startup_timeout_secs;
        let deadline = Instant::now() + Duration::from_secs(timeout_secs);
        let packager_status = format!("{}/status", self.options.packager_url());
        let bundler_root = format!("{}/", self.options.bundler_url());

        let mut packager_ready = false;
        let mut bundler_ready = false;

        loop {
            self.ensure_children_running()?;

            if !packager_ready && probe(&self.client, &packager_status, true).await {
                tracing::info!("packager ready at {}", self.options.packager_url());
                packager_ready = true;
            }
            // webpack answers 404 on `/` for most configs; any answer will do
            if !bundler_ready && probe(&self.client, &bundler_root, false).await {
                tracing::info!("webpack dev server ready at {}", self.options.bundler_url());
                bundler_ready = true;
            }

            if packager_ready && bundler_ready {
                return Ok(());
            }

            if Instant::now() >= deadline {
                let (name, url) = if packager_ready {
                    ("webpack dev server", bundler_root)
                } else {
                    ("packager", packager_status)
                };
                return Err(ServerError::NotReady {
                    name,
                    url,
                    timeout_secs,
                }
                .into());
            }

            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl ServerHandle for DevServer {
    async fn start(&mut self) -> Result<()> {
        tracing::debug!("starting packager: {}", self.packager_spec.command_line());
        self.packager = Some(ManagedProcess::spawn(&self.packager_spec)?);

        tracing::debug!("starting bundler: {}", self.bundler_spec.command_line());
        self.bundler = Some(ManagedProcess::spawn(&self.bundler_spec)?);

        let addr = format!("{}:{}", self.options.hostname, self.options.port);
        let state = ProxyState::new(ProxyConfig::from_options(&self.options));
        self.proxy = Some(ProxyServer::bind(&addr, state).await?);

        self.wait_until_ready().await
    }

    async fn stop(&mut self) -> Result<()> {
        let mut failures = Vec::new();

        if let Some(mut proxy) = self.proxy.take() {
            match tokio::time::timeout(PROXY_SHUTDOWN_TIMEOUT, proxy.shutdown()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => failures.push(e.to_string()),
                Err(_) => failures.push("front server did not shut down in time".to_string()),
            }
        }

        for process in [self.bundler.take(), self.packager.take()]
            .into_iter()
            .flatten()
        {
            let mut process = process;
            if let Err(e) = process.shutdown().await {
                failures.push(e.to_string());
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ServerError::Stop(failures.join("; ")).into())
        }
    }
}

/// `<packager> start --port <packager_port> [--reset-cache]`
pub fn packager_command(resolved: &ResolvedOptions) -> ProcessSpec {
    let options = &resolved.options;
    let mut args = vec![
        "start".to_string(),
        "--port".to_string(),
        options.packager_port.to_string(),
    ];
    if options.reset_cache {
        args.push("--reset-cache".to_string());
    }

    ProcessSpec {
        name: "packager",
        env_key: "PACKAGER",
        program: program_path(resolved, &options.packager_bin),
        args,
        cwd: resolved.cwd.clone(),
        env: Vec::new(),
    }
}

/// `<webpack-dev-server> --config <path> --host <hostname> --port <webpack_port>`
///
/// `HOT=1` enables hot reloading in the user's config; `NODE_ENV=production`
/// is set for optimized builds unless the invocation already defines it.
pub fn bundler_command(resolved: &ResolvedOptions, invocation: &Invocation) -> ProcessSpec {
    let options = &resolved.options;
    let args = vec![
        "--config".to_string(),
        resolved.config_path.display().to_string(),
        "--host".to_string(),
        options.hostname.clone(),
        "--port".to_string(),
        options.webpack_port.to_string(),
    ];

    let mut env = Vec::new();
    if options.hot {
        env.push(("HOT".to_string(), "1".to_string()));
    }
    if options.optimize && invocation.var("NODE_ENV").is_none() {
        env.push(("NODE_ENV".to_string(), "production".to_string()));
    }

    ProcessSpec {
        name: "webpack dev server",
        env_key: "BUNDLER",
        program: program_path(resolved, &options.bundler_bin),
        args,
        cwd: resolved.cwd.clone(),
        env,
    }
}

/// Paths with a directory part are project relative; bare names are looked
/// up on `PATH`.
fn program_path(resolved: &ResolvedOptions, program: &Path) -> PathBuf {
    if program.components().count() > 1 {
        resolved.resolve_path(program)
    } else {
        program.to_path_buf()
    }
}

async fn probe(client: &reqwest::Client, url: &str, require_success: bool) -> bool {
    match client.get(url).timeout(PROBE_TIMEOUT).send().await {
        Ok(response) => !require_success || response.status().is_success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BundlerConfig;

    fn resolved(options: Options) -> ResolvedOptions {
        ResolvedOptions {
            options,
            cwd: PathBuf::from("/work/app"),
            config_path: PathBuf::from("/work/app/webpack.config.js"),
            bundler_config: BundlerConfig::Module(String::new()),
        }
    }

    #[test]
    fn test_packager_command() {
        let spec = packager_command(&resolved(Options {
            packager_port: 9081,
            reset_cache: true,
            ..Options::default()
        }));

        assert_eq!(
            spec.program,
            PathBuf::from("/work/app/node_modules/.bin/react-native")
        );
        assert_eq!(spec.args, vec!["start", "--port", "9081", "--reset-cache"]);
        assert_eq!(spec.cwd, PathBuf::from("/work/app"));
        assert!(spec.env.is_empty());
    }

    #[test]
    fn test_bundler_command_passes_config_path_and_toggles() {
        let spec = bundler_command(
            &resolved(Options {
                hot: true,
                optimize: true,
                ..Options::default()
            }),
            &Invocation::new("/work/app"),
        );

        assert_eq!(
            spec.args,
            vec![
                "--config",
                "/work/app/webpack.config.js",
                "--host",
                "localhost",
                "--port",
                "8082"
            ]
        );
        assert!(spec.env.contains(&("HOT".to_string(), "1".to_string())));
        assert!(spec
            .env
            .contains(&("NODE_ENV".to_string(), "production".to_string())));
    }

    #[test]
    fn test_bundler_command_keeps_existing_node_env() {
        let invocation = Invocation::new("/work/app").with_var("NODE_ENV", "staging");
        let spec = bundler_command(&resolved(Options::default()), &invocation);
        assert!(spec.env.iter().all(|(key, _)| key != "NODE_ENV"));

        let spec = bundler_command(
            &resolved(Options {
                optimize: false,
                ..Options::default()
            }),
            &Invocation::new("/work/app"),
        );
        assert!(spec.env.is_empty());
    }

    #[test]
    fn test_bare_program_names_use_path_lookup() {
        let spec = packager_command(&resolved(Options {
            packager_bin: PathBuf::from("react-native"),
            ..Options::default()
        }));
        assert_eq!(spec.program, PathBuf::from("react-native"));

        let spec = packager_command(&resolved(Options {
            packager_bin: PathBuf::from("/opt/rn/bin/react-native"),
            ..Options::default()
        }));
        assert_eq!(spec.program, PathBuf::from("/opt/rn/bin/react-native"));
    }

    #[tokio::test]
    async fn test_stop_before_start_is_noop() {
        let mut server = DevServer::new(&resolved(Options::default()), &Invocation::new("/work/app"));
        server.stop().await.unwrap();
        server.stop().await.unwrap();
        assert!(server.proxy.is_none());
    }

    #[tokio::test]
    async fn test_missing_packager_fails_start() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut options = Options::default();
        options.packager_bin = temp.path().join("node_modules/.bin/react-native");
        let resolved = ResolvedOptions {
            cwd: temp.path().to_path_buf(),
            ..resolved(options)
        };
        let mut server = DevServer::new(&resolved, &Invocation::new(temp.path()));

        let err = server.start().await.unwrap_err();
        assert!(err.to_string().contains("RNWS_PACKAGER_BIN"));
        server.stop().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_exit_during_startup() {
        let temp = tempfile::TempDir::new().unwrap();
        let free_port = || {
            std::net::TcpListener::bind("127.0.0.1:0")
                .unwrap()
                .local_addr()
                .unwrap()
                .port()
        };
        let options = Options {
            hostname: "127.0.0.1".to_string(),
            port: free_port(),
            packager_port: free_port(),
            webpack_port: free_port(),
            // `sh start --port N` exits right away
            packager_bin: PathBuf::from("/bin/sh"),
            bundler_bin: PathBuf::from("/bin/sh"),
            startup_timeout_secs: 10,
            ..Options::default()
        };
        let resolved = ResolvedOptions {
            cwd: temp.path().to_path_buf(),
            ..resolved(options)
        };
        let mut server = DevServer::new(&resolved, &Invocation::new(temp.path()));

        let err = server.start().await.unwrap_err();
        assert!(
            matches!(
                err,
                crate::error::CliError::Server(ServerError::ProcessExited { .. })
            ),
            "unexpected error: {:?}",
            err
        );
        server.stop().await.unwrap();
    }
}
