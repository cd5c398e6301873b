// Accept loop module
// Runs one session's accept loop until the shutdown signal fires

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Serve connections from `listener` until `shutdown` is notified.
///
/// The session root and all tunables come from `state`; this function
/// never touches the process working directory. Stopping is cooperative:
/// the caller (signal handler or test) notifies `shutdown` and the loop
/// returns after the current accept.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_listener;
    use std::path::Path;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_state(root: &Path) -> Arc<AppState> {
        let config = Config::load_from("no_such_config_file").unwrap();
        Arc::new(AppState::new(config, root.canonicalize().unwrap()))
    }

    #[tokio::test]
    async fn stops_when_shutdown_is_notified() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let listener = create_listener(([127, 0, 0, 1], 0).into()).unwrap();
        let shutdown = Arc::new(Notify::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let task =
                    tokio::task::spawn_local(serve(listener, state, Arc::clone(&shutdown)));
                shutdown.notify_one();
                let result = task.await.unwrap();
                assert!(result.is_ok());
            })
            .await;
    }

    #[tokio::test]
    async fn serves_a_file_then_stops() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.txt"), b"menu launcher").unwrap();
        let state = test_state(dir.path());
        let listener = create_listener(([127, 0, 0, 1], 0).into()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let task =
                    tokio::task::spawn_local(serve(listener, state, Arc::clone(&shutdown)));

                let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(
                        b"GET /hello.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                    )
                    .await
                    .unwrap();
                let mut response = Vec::new();
                stream.read_to_end(&mut response).await.unwrap();
                let response = String::from_utf8_lossy(&response);
                assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
                assert!(response.contains("menu launcher"));

                shutdown.notify_one();
                task.await.unwrap().unwrap();
            })
            .await;
    }

    #[tokio::test]
    async fn missing_file_gets_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let listener = create_listener(([127, 0, 0, 1], 0).into()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let task =
                    tokio::task::spawn_local(serve(listener, state, Arc::clone(&shutdown)));

                let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(
                        b"GET /nope.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                    )
                    .await
                    .unwrap();
                let mut response = Vec::new();
                stream.read_to_end(&mut response).await.unwrap();
                let response = String::from_utf8_lossy(&response);
                assert!(response.starts_with("HTTP/1.1 404"), "got: {response}");

                shutdown.notify_one();
                task.await.unwrap().unwrap();
            })
            .await;
    }
}
