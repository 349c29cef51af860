// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use hyper::{
    Method, Request, Response, StatusCode,
    body::Incoming,
    header::{self, HeaderMap, HeaderValue},
};
use juniper_hyper::{graphiql, graphql, playground};

use crate::graphql::{BaseContext, Context, Schema};

fn is_private(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => ipv4.is_private() || ipv4.is_loopback(),
        IpAddr::V6(ipv6) => ipv6.is_unique_local() || ipv6.is_loopback(),
    }
}

/// The address of the caller. When the connection comes from a private
/// network (a reverse proxy), the first public address in `X-Forwarded-For`
/// is used instead.
pub fn client_ip(remote_ip: IpAddr, headers: &HeaderMap) -> IpAddr {
    if !is_private(&remote_ip) {
        return remote_ip;
    }
    headers
        .get("x-forwarded-for")
        .and_then(|xff| xff.to_str().ok())
        .and_then(|xff| {
            xff.split(',')
                .filter_map(|ip_str| ip_str.trim().parse::<IpAddr>().ok())
                .find(|ip| !is_private(ip))
        })
        .unwrap_or(remote_ip)
}

fn with_status(status: StatusCode) -> Response<String> {
    let mut resp = Response::new(String::new());
    *resp.status_mut() = status;
    resp
}

fn apply_cors(resp: &mut Response<String>, allow_origin: &HeaderValue) {
    let headers = resp.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
}

/// Shared state of the HTTP service, cloned into every connection.
#[derive(Clone)]
pub struct ApiService {
    pub root_node: Arc<Schema>,
    pub base: BaseContext,
    pub cors_allow_origin: Option<HeaderValue>,
}

impl ApiService {
    pub async fn handle(&self, req: Request<Incoming>, remote_addr: SocketAddr) -> Response<String> {
        if let Some(resp) = self.route(req.method(), req.uri().path()).await {
            return resp;
        }

        let ctx = Context::new(
            self.base.clone(),
            client_ip(remote_addr.ip(), req.headers()),
            req.headers()
                .get("user-agent")
                .and_then(|ua| ua.to_str().ok())
                .unwrap_or("unknown")
                .to_string(),
        );
        let resp = graphql(self.root_node.clone(), Arc::new(ctx), req).await;
        self.with_cors(resp)
    }

    /// Answers every request that does not execute a GraphQL document.
    /// Returns `None` for `GET`/`POST /graphql`.
    pub async fn route(&self, method: &Method, path: &str) -> Option<Response<String>> {
        let resp = match (method, path) {
            (&Method::GET, "/graphql") | (&Method::POST, "/graphql") => return None,
            (&Method::OPTIONS, "/graphql") => with_status(StatusCode::NO_CONTENT),
            (&Method::GET, "/graphiql") => graphiql("/graphql", None).await,
            (&Method::GET, "/playground") => playground("/graphql", None).await,
            (&Method::GET, "/health") => Response::new("ok".to_string()),
            _ => with_status(StatusCode::NOT_FOUND),
        };
        Some(self.with_cors(resp))
    }

    fn with_cors(&self, mut resp: Response<String>) -> Response<String> {
        if let Some(origin) = &self.cors_allow_origin {
            apply_cors(&mut resp, origin);
        }
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service(cors_allow_origin: Option<&'static str>) -> ApiService {
        ApiService {
            root_node: Arc::new(crate::graphql::schema()),
            base: BaseContext {
                store: Arc::new(MemoryStore::default()),
            },
            cors_allow_origin: cors_allow_origin.map(HeaderValue::from_static),
        }
    }

    fn headers(xff: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_str(xff).unwrap());
        headers
    }

    #[test]
    fn test_public_remote_ignores_forwarded_header() {
        let remote: IpAddr = "203.0.113.7".parse().unwrap();
        assert_eq!(client_ip(remote, &headers("198.51.100.1")), remote);
    }

    #[test]
    fn test_private_remote_uses_first_public_forwarded_ip() {
        let remote: IpAddr = "10.0.0.2".parse().unwrap();
        let ip = client_ip(remote, &headers("192.168.1.5, garbage, 198.51.100.1, 203.0.113.9"));
        assert_eq!(ip, "198.51.100.1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_private_remote_without_public_forwarded_ip() {
        let remote: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(client_ip(remote, &HeaderMap::new()), remote);
        assert_eq!(client_ip(remote, &headers("10.1.1.1")), remote);
    }

    #[test]
    fn test_cors_headers() {
        let mut resp = with_status(StatusCode::NO_CONTENT);
        apply_cors(&mut resp, &HeaderValue::from_static("http://localhost:3000"));
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_health() {
        let resp = service(None).route(&Method::GET, "/health").await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.body(), "ok");
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let service = service(None);
        let resp = service.route(&Method::GET, "/nope").await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = service.route(&Method::DELETE, "/graphql").await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_graphql_requests_are_not_routed_statically() {
        let service = service(None);
        assert!(service.route(&Method::GET, "/graphql").await.is_none());
        assert!(service.route(&Method::POST, "/graphql").await.is_none());
    }

    #[tokio::test]
    async fn test_preflight_carries_cors_headers() {
        let resp = service(Some("http://localhost:3000"))
            .route(&Method::OPTIONS, "/graphql")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_not_found_carries_cors_headers() {
        let resp = service(Some("*")).route(&Method::GET, "/missing").await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
