// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, error::Error, sync::Arc};

use hyper::{header::HeaderValue, service::service_fn};
use hyper_util::rt::{TokioExecutor, TokioIo};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use project_tracker_api::{
    config::Config,
    db,
    graphql::{self, BaseContext},
    http::ApiService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    let cors_allow_origin = match &config.cors_allow_origin {
        Some(origin) => Some(HeaderValue::from_str(origin)?),
        None => None,
    };
    if cors_allow_origin.is_none() {
        tracing::warn!("CORS_ALLOW_ORIGIN is not set; browsers on other origins cannot use the API");
    }

    let service = ApiService {
        root_node: Arc::new(graphql::schema()),
        base: BaseContext {
            store: db::open_store(&config).await?,
        },
        cors_allow_origin,
    };

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Listening on http://{}", config.listen_addr);
    loop {
        let (stream, remote_addr) = listener.accept().await?;

        let io = TokioIo::new(stream);
        let service = service.clone();

        tokio::spawn(async move {
            if let Err(e) = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                .serve_connection(
                    io,
                    service_fn(move |req| {
                        let service = service.clone();
                        async move { Ok::<_, Infallible>(service.handle(req, remote_addr).await) }
                    }),
                )
                .await
            {
                tracing::error!("Error serving connection: {e}");
            }
        });
    }
}
