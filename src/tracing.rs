use anyhow::{anyhow, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

/// Log sink shared between the subscriber and `set_log_file`. Lines always
/// reach stderr; the optional file receives a copy of each one.
#[derive(Clone, Default)]
struct LogSink {
    file: Arc<Mutex<Option<File>>>,
}

struct SinkWriter<W: Write> {
    console: W,
    file: Arc<Mutex<Option<File>>>,
}

impl LogSink {
    fn attach_file(&self, path: Option<&Path>) -> Result<()> {
        let file = match path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating log directory {}", parent.display()))?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("opening log file {}", path.display()))?;
                Some(file)
            }
            None => None,
        };
        let mut guard = self
            .file
            .lock()
            .map_err(|_| anyhow!("log file lock poisoned"))?;
        *guard = file;
        Ok(())
    }

    fn writer_with<W: Write>(&self, console: W) -> SinkWriter<W> {
        SinkWriter {
            console,
            file: self.file.clone(),
        }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogSink {
    type Writer = SinkWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer_with(io::stderr())
    }
}

impl<W: Write> Write for SinkWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.console.write(buf)?;
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                file.write_all(&buf[..written])?;
            }
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                file.flush()?;
            }
        }
        Ok(())
    }
}

static SINK: OnceLock<LogSink> = OnceLock::new();

/// Install the global subscriber. `log` records are bridged into tracing.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init() {
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let sink = SINK.get_or_init(LogSink::default).clone();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(sink)
        .try_init();
}

/// Tee log output into `log_file`, or stop teeing with `None`.
pub fn set_log_file(log_file: Option<&Path>) -> Result<()> {
    SINK.get_or_init(LogSink::default).attach_file(log_file)
}
