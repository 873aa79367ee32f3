use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, redirect};
use tracing::{debug, trace};

/// Checks whether an already-open port answers HTTP.
///
/// Proxies from the environment are ignored, redirects are not followed and
/// no connection is pooled, so every check opens and closes its own socket.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .no_proxy()
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }

    /// Sends `GET /` to `addr`. Any status counts; transport failures,
    /// timeouts and non-HTTP replies do not.
    pub async fn probe(&self, addr: SocketAddr, limit: Duration) -> bool {
        let url = format!("http://{addr}/");
        match self.client.get(&url).timeout(limit).send().await {
            Ok(response) => {
                debug!("{addr} answered HTTP {}", response.status());
                true
            }
            Err(e) => {
                trace!("{addr} did not answer HTTP: {e}");
                false
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(reply: &'static [u8]) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(reply).await;
                let _ = stream.shutdown().await;
            }
        });
        addr
    }

    #[tokio::test]
    async fn probe_should_accept_http_ok() {
        let addr = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let probe = HttpProbe::new().unwrap();
        assert!(probe.probe(addr, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn probe_should_accept_any_status() {
        let addr = serve_once(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let probe = HttpProbe::new().unwrap();
        assert!(probe.probe(addr, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn probe_should_reject_non_http_banner() {
        let addr = serve_once(b"SSH-2.0-OpenSSH_9.6\r\n").await;
        let probe = HttpProbe::new().unwrap();
        assert!(!probe.probe(addr, Duration::from_secs(2)).await);
    }

    #[tokio::test]
    async fn probe_should_give_up_on_silent_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((stream, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(stream);
            }
        });

        let probe = HttpProbe::new().unwrap();
        let limit = Duration::from_millis(300);
        let start = Instant::now();
        assert!(!probe.probe(addr, limit).await);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn probe_should_reject_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = HttpProbe::new().unwrap();
        assert!(!probe.probe(addr, Duration::from_secs(1)).await);
    }
}
