//! Child process execution with output teed to console and log file.
//!
//! Both sinks receive the same byte stream in the same line order: each
//! reader thread holds one shared lock across the pair of writes. The exit
//! status is always taken from the child itself via `wait()`, never inferred
//! from a downstream stage.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument};

/// Run `cmd` to completion, teeing its combined stdout/stderr line-by-line
/// to this process's stderr and to `log_path`.
///
/// Blocks until the child exits; there is deliberately no timeout. Returns
/// the child's own exit status.
#[instrument(skip_all, fields(log_path = %log_path.display()))]
pub fn run_teeing(mut cmd: Command, log_path: &Path) -> Result<ExitStatus> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }
    let file =
        File::create(log_path).with_context(|| format!("create log {}", log_path.display()))?;
    let sink = Arc::new(Mutex::new(BufWriter::new(file)));

    debug!("spawning wrapper process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn wrapper");
            return Err(e).context("spawn wrapper");
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn({
        let sink = Arc::clone(&sink);
        move || tee_stream(stdout, &sink)
    });
    let stderr_handle = thread::spawn({
        let sink = Arc::clone(&sink);
        move || tee_stream(stderr, &sink)
    });

    let status = child.wait().context("wait for wrapper")?;
    join_tee(stdout_handle).context("tee stdout")?;
    join_tee(stderr_handle).context("tee stderr")?;

    sink.lock()
        .map_err(|_| anyhow!("log writer lock poisoned"))?
        .flush()
        .with_context(|| format!("flush log {}", log_path.display()))?;

    debug!(exit_code = ?status.code(), "wrapper finished");
    Ok(status)
}

fn tee_stream<R: Read>(reader: R, sink: &Mutex<BufWriter<File>>) -> Result<()> {
    let mut buf_reader = BufReader::new(reader);
    loop {
        let mut line = Vec::new();
        let n = buf_reader
            .read_until(b'\n', &mut line)
            .context("read wrapper output")?;
        if n == 0 {
            break;
        }

        // One lock span per line keeps console and log ordering identical.
        let mut writer = sink
            .lock()
            .map_err(|_| anyhow!("log writer lock poisoned"))?;
        writer.write_all(&line).context("write log")?;
        writer.flush().context("flush log")?;
        std::io::stderr()
            .write_all(&line)
            .context("write console")?;
    }
    Ok(())
}

fn join_tee(handle: thread::JoinHandle<Result<()>>) -> Result<()> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("tee thread panicked")),
    }
}
