//! Line loop: read commands, write replies

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::handler::CommandHandler;

/// Run every line from `reader` through `handler`, writing replies to
/// `writer`. Returns the number of commands executed.
pub async fn run<R, W>(
    reader: R,
    writer: &mut W,
    handler: &CommandHandler,
    echo: bool,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut executed = 0;

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = handler.handle_line(&line) else {
            continue;
        };
        executed += 1;

        if echo {
            writer.write_all(format!("> {}\n", line.trim()).as_bytes()).await?;
        }
        writer.write_all(format!("{}\n", reply).as_bytes()).await?;
        writer.flush().await?;
    }

    debug!(executed, "input exhausted");
    Ok(executed)
}
