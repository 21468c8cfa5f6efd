// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

/// Accept connections on `listener` until `shutdown` is notified.
///
/// Must run inside a `tokio::task::LocalSet`: connections are served with
/// `spawn_local`. Accept errors are logged and do not stop the loop.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run_server(
    listener: TcpListener,
    state: Arc<config::AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                drop(listener);
                logger::log_shutdown(state.active_connections());
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use crate::server::create_reusable_listener;
    use http_body_util::{BodyExt, Empty};
    use hyper::body::Bytes;
    use hyper::Request;
    use hyper_util::rt::TokioIo;
    use std::net::SocketAddr;
    use tokio::task::LocalSet;

    fn test_state(max_connections: Option<u64>) -> Arc<AppState> {
        let mut cfg = Config::load_from("does/not/exist/config").unwrap();
        cfg.logging.access_log = false;
        cfg.performance.max_connections = max_connections;
        Arc::new(AppState::new(&cfg))
    }

    async fn get(addr: SocketAddr, method: &str, path: &str) -> (u16, String, Bytes) {
        let stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        tokio::task::spawn_local(conn);

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("host", addr.to_string())
            .body(Empty::<Bytes>::new())
            .unwrap();
        let resp = sender.send_request(req).await.unwrap();
        let status = resp.status().as_u16();
        let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_serves_greeting_over_tcp() {
        LocalSet::new()
            .run_until(async {
                let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
                let addr = listener.local_addr().unwrap();
                let shutdown = Arc::new(Notify::new());
                let server = tokio::task::spawn_local(run_server(
                    listener,
                    test_state(None),
                    Arc::clone(&shutdown),
                ));

                for (method, path) in [("GET", "/"), ("POST", "/api/v1/things"), ("HEAD", "/x")] {
                    let (status, content_type, body) = get(addr, method, path).await;
                    assert_eq!(status, 200);
                    assert_eq!(content_type, "text/plain");
                    if method != "HEAD" {
                        assert_eq!(&body[..], b"Hello, TypeScript with Node.js!\n");
                    }
                }

                shutdown.notify_one();
                assert!(server.await.unwrap().is_ok());
            })
            .await;
    }

    #[tokio::test]
    async fn test_shutdown_before_any_connection() {
        LocalSet::new()
            .run_until(async {
                let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
                let shutdown = Arc::new(Notify::new());
                // The permit is stored, so notifying early still stops the loop
                shutdown.notify_one();
                let result = run_server(listener, test_state(None), shutdown).await;
                assert!(result.is_ok());
            })
            .await;
    }

    #[tokio::test]
    async fn test_max_connections_rejects_and_restores_counter() {
        LocalSet::new()
            .run_until(async {
                let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
                let addr = listener.local_addr().unwrap();
                let state = test_state(Some(1));

                let _client = tokio::net::TcpStream::connect(addr).await.unwrap();
                let (stream, peer) = listener.accept().await.unwrap();

                // Pretend one connection is already being served
                state
                    .active_connections
                    .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                assert!(!accept_connection(stream, peer, &state));
                assert_eq!(state.active_connections(), 1);
            })
            .await;
    }

    #[tokio::test]
    async fn test_counter_released_after_connection_closes() {
        LocalSet::new()
            .run_until(async {
                let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
                let addr = listener.local_addr().unwrap();
                let state = test_state(Some(4));

                let client = tokio::net::TcpStream::connect(addr).await.unwrap();
                let (stream, peer) = listener.accept().await.unwrap();
                assert!(accept_connection(stream, peer, &state));
                assert_eq!(state.active_connections(), 1);

                drop(client);
                for _ in 0..100 {
                    if state.active_connections() == 0 {
                        break;
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                }
                assert_eq!(state.active_connections(), 0);
            })
            .await;
    }
}
