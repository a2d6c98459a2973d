//! Shared utilities for breaker integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Start a mock downstream whose health is flipped through `healthy`.
/// Answers "ok" while healthy and "fail" while not.
pub async fn start_flaky_backend(addr: SocketAddr, healthy: Arc<AtomicBool>) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let healthy = healthy.clone();
                    tokio::spawn(async move {
                        let body = if healthy.load(Ordering::SeqCst) {
                            "ok"
                        } else {
                            "fail"
                        };
                        let _ = socket.write_all(body.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// One call to the mock downstream; Ok only for an "ok" answer.
pub async fn call_backend(addr: SocketAddr) -> Result<(), String> {
    let mut stream = TcpStream::connect(addr)
        .await
        .map_err(|e| e.to_string())?;
    let mut buf = Vec::new();
    stream
        .read_to_end(&mut buf)
        .await
        .map_err(|e| e.to_string())?;

    if buf == b"ok" {
        Ok(())
    } else {
        Err(String::from_utf8_lossy(&buf).into_owned())
    }
}
