//! Stdio transport — newline-delimited JSON, one message per line.
//!
//! Requests are read from stdin and answered on stdout; all logging goes to
//! stderr so the protocol stream stays clean. Runs until stdin closes or an
//! interrupt arrives, then returns cleanly so the process exits 0.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use super::server::McpServer;

/// Errors from the transport loop.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve MCP over stdio until EOF or SIGINT.
///
/// Messages are handled one at a time: read a line, await the handler
/// (which performs at most one upstream HTTP call), write the reply, flush,
/// repeat. There is no concurrency across calls.
pub async fn serve_stdio(server: McpServer) -> Result<(), ServeError> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    info!("MCP server listening on stdio");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        if let Some(response) = server.handle_message(&line).await {
                            stdout.write_all(response.as_bytes()).await?;
                            stdout.write_all(b"\n").await?;
                            stdout.flush().await?;
                        }
                    }
                    None => {
                        info!("stdin closed, shutting down");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupt received, initiating graceful shutdown");
                break;
            }
        }
    }

    info!("MCP server stopped");
    Ok(())
}
