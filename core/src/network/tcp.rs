use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use netscan_common::scanning::ConnectOutcome;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Attempts a TCP handshake with `addr`, giving up after `limit`.
///
/// The connect is non-blocking and raced against the deadline, so the OS
/// connect timeout never applies. The stream is dropped on every path, which
/// closes the descriptor even when the attempt is abandoned mid-handshake.
pub async fn connect_probe(addr: SocketAddr, limit: Duration) -> ConnectOutcome {
    match timeout(limit, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => ConnectOutcome::Connected,
        Ok(Err(e)) => {
            trace!("{addr}: {e}");
            classify(&e)
        }
        Err(_elapsed) => ConnectOutcome::TimedOut,
    }
}

fn classify(err: &io::Error) -> ConnectOutcome {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => ConnectOutcome::Refused,
        io::ErrorKind::TimedOut => ConnectOutcome::TimedOut,
        _ => ConnectOutcome::Unreachable,
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
