//! WebSocket test client.
//!
//! `tower::ServiceExt::oneshot` can't drive an HTTP upgrade, so WebSocket
//! routes need a real TCP listener bound to an ephemeral port instead.

use r2e_core::http::Router;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub use tokio_tungstenite::tungstenite::Message as WsMessage;

/// A router bound to a real loopback port, for tests that need to drive a
/// WebSocket upgrade end to end.
pub struct TestServer {
    addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral test port");
        let addr = listener.local_addr().expect("listener has no local addr");
        let handle = tokio::spawn(async move {
            let _ = r2e_core::http::serve(listener, router).await;
        });
        Self {
            addr,
            _handle: handle,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    /// Opens a WebSocket connection to `path` on the spawned server.
    pub async fn connect_ws(&self, path: &str) -> WebSocketStream<MaybeTlsStream<TcpStream>> {
        let (stream, _response) = connect_async(self.ws_url(path))
            .await
            .expect("failed to connect test websocket");
        stream
    }
}
