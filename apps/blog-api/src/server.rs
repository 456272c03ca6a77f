//! Server lifecycle - connect the store, bind, serve, and shut down.

use std::io;
use std::net::SocketAddr;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use blog_core::error::RepoError;

use crate::config::AppConfig;
use crate::handlers;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

/// Startup and shutdown failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] RepoError),

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("server error: {0}")]
    Server(#[from] io::Error),
}

/// A listening server together with the store it serves.
pub struct RunningServer {
    addrs: Vec<SocketAddr>,
    state: AppState,
    handle: ServerHandle,
    task: actix_rt::task::JoinHandle<io::Result<()>>,
}

/// Open the configured store, then bind and start serving.
pub async fn run_server(config: &AppConfig) -> Result<RunningServer, ServerError> {
    let state = AppState::connect(config.database.as_ref()).await?;
    start_server(state, &config.host, config.port).await
}

/// Bind and start serving `state`.
///
/// If binding fails the store is closed before the error is returned.
/// Must be called from within an actix runtime.
pub async fn start_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<RunningServer, ServerError> {
    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(app_state.clone()))
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .disable_signals()
    .shutdown_timeout(10);

    let server = match server.bind((host, port)) {
        Ok(server) => server,
        Err(source) => {
            if let Err(e) = state.posts.close().await {
                tracing::error!("Failed to close store after bind error: {}", e);
            }
            return Err(ServerError::Bind {
                addr: format!("{}:{}", host, port),
                source,
            });
        }
    };

    let addrs = server.addrs();
    let server = server.run();
    let handle = server.handle();
    let task = actix_rt::spawn(server);

    for addr in &addrs {
        tracing::info!("Your app is listening on {}", addr);
    }

    Ok(RunningServer {
        addrs,
        state,
        handle,
        task,
    })
}

impl RunningServer {
    /// Addresses the server is bound to.
    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Close the store connection, then stop the server gracefully.
    pub async fn close(self) -> Result<(), ServerError> {
        tracing::info!("Closing server");

        let store_result = self.state.posts.close().await;
        self.handle.stop(true).await;

        let served = self.task.await.map_err(io::Error::other)?;

        store_result?;
        served?;
        Ok(())
    }
}
