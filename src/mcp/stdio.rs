//! Line-delimited JSON-RPC over stdin/stdout.
//!
//! One request per line in, one response per line out. Logging must never
//! touch stdout here.

use std::future::Future;

use serde_json::Value;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use super::handlers::{decode_request, dispatch};
use super::helpers::rpc_failure;
use crate::state::{AppState, SharedState};

/// Serves the local tool registry over the process's stdin/stdout.
pub async fn run(state: SharedState) -> io::Result<()> {
    info!("Serving MCP over stdio");
    serve_lines(BufReader::new(io::stdin()), io::stdout(), |line| {
        let state = state.clone();
        async move { handle_line(&state, &line).await }
    })
    .await
}

/// Feeds each non-blank line to `handle` and writes back whatever it returns,
/// flushing after every response. Returns when the reader hits EOF.
///
/// Lines are passed on as raw bytes; invalid UTF-8 is the handler's decode
/// failure to report, not a reason to stop reading.
pub async fn serve_lines<R, W, F, Fut>(mut reader: R, mut writer: W, mut handle: F) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    F: FnMut(Vec<u8>) -> Fut,
    Fut: Future<Output = Option<Value>>,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let Some(response) = handle(line.to_vec()).await else {
            continue;
        };
        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }

    info!("stdin closed (EOF), exiting");
    Ok(())
}

/// Decodes and dispatches one line. Notifications produce no response.
pub async fn handle_line(state: &AppState, line: &[u8]) -> Option<Value> {
    match decode_request(line) {
        Ok(req) if req.is_notification() => {
            debug!(method = %req.method, "notification received");
            None
        }
        Ok(req) => Some(dispatch(state, req).await),
        Err(err) => {
            error!("Failed to parse JSON-RPC request: {:?}", err);
            Some(rpc_failure(None, &err))
        }
    }
}
