//! HTTP server for libris.
//!
//! Exposes the library over a small JSON API: account registration and
//! login, catalog listing/search, multipart book uploads, PDF download,
//! and the shared read-only view selected by the `shared` query flag.
//!
//! Access control is two-mode and per-request: owner mode requires a
//! bearer token from a login session; shared mode ignores
//! authentication and reads the catalog named by the `user` query
//! parameter. Mutations are only reachable from owner mode.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod session;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::LibrisServer;
pub use session::{Session, SessionRegistry};
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn test_server() -> (tempfile::TempDir, LibrisServer) {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            data_root: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        (dir, LibrisServer::new(config))
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (_dir, server) = test_server();
        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (_dir, server) = test_server();
        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/v1/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn unauthenticated_list_is_rejected() {
        let (_dir, server) = test_server();
        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/v1/books")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn shared_list_needs_no_auth() {
        let (_dir, server) = test_server();
        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/v1/books?shared=true&user=alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
