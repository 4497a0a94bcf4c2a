//! Ordered line sources for sadf device I/O output
//!
//! A [`LineSource`] yields raw lines as bytes, terminators stripped, in the
//! order they were produced. Decoding is left to [`DevIoReader::read_bytes`]
//! so that one undecodable line is a classification error, not a read error. Lines come from a running sadf process, an exported
//! text dump on disk, or standard input. [`read_records`] drives a source
//! through [`DevIoReader`] and hands every I/O statistics record to a sink.

use futures::stream::{self, Stream, StreamExt};
use std::fmt;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info};

use crate::app::models::IoStatsRecord;
use crate::app::services::devio_parser::{DevIoReader, ReadStats};
use crate::app::services::sadf_command::{SadfCommand, SadfOutput, Target};
use crate::config::ErrorPolicy;
use crate::{Error, Result};

type TextReader = BufReader<Box<dyn AsyncRead + Send + Unpin>>;

/// Where raw sadf lines are read from
pub enum LineSource {
    /// Standard output of a sadf subprocess
    Process(SadfOutput),
    /// Text already produced by sadf (a stored dump or stdin)
    Text { name: String, reader: TextReader },
}

impl LineSource {
    /// Start sadf for `target` and read its output
    pub fn sadf(command: &SadfCommand, target: Option<&Target>) -> Result<Self> {
        command.spawn(target).map(LineSource::Process)
    }

    /// Read a stored text dump of sadf output
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        debug!("Opened sadf dump {}", path.display());

        Ok(Self::from_reader(path.display().to_string(), file))
    }

    /// Read sadf output piped into standard input
    pub fn stdin() -> Self {
        Self::from_reader("<stdin>", tokio::io::stdin())
    }

    /// Read lines from any async reader
    pub fn from_reader<R>(name: impl Into<String>, reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let boxed: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        LineSource::Text {
            name: name.into(),
            reader: BufReader::new(boxed),
        }
    }

    /// Human-readable origin of the lines
    pub fn describe(&self) -> String {
        match self {
            LineSource::Process(output) => output.command_line().to_string(),
            LineSource::Text { name, .. } => name.clone(),
        }
    }

    /// Next line, or `None` once the source is exhausted
    pub async fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        match self {
            LineSource::Process(output) => output.next_line().await,
            LineSource::Text { name, reader } => read_raw_line(reader)
                .await
                .map_err(|e| Error::io(format!("Failed to read {}", name), e)),
        }
    }

    /// Release the source, reporting a failed sadf exit status
    pub async fn finish(self) -> Result<()> {
        match self {
            LineSource::Process(output) => output.finish().await,
            LineSource::Text { .. } => Ok(()),
        }
    }

    /// Convert into a stream of lines
    ///
    /// The stream ends after the last line. A read failure or a failed sadf
    /// exit status is yielded as a final `Err` item.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<u8>>> {
        stream::unfold(Some(self), |state| async move {
            let Some(mut source) = state else {
                return None;
            };
            match source.next_line().await {
                Ok(Some(line)) => Some((Ok(line), Some(source))),
                Ok(None) => match source.finish().await {
                    Ok(()) => None,
                    Err(e) => Some((Err(e), None)),
                },
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSource::Process(output) => f.debug_tuple("Process").field(output).finish(),
            LineSource::Text { name, .. } => f.debug_struct("Text").field("name", name).finish(),
        }
    }
}

/// Next `\n`-terminated line with `\n` and a trailing `\r` stripped
pub(crate) async fn read_raw_line<R>(reader: &mut R) -> std::io::Result<Option<Vec<u8>>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line).await? == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Read every I/O statistics record of `source` in order
///
/// Header and restart lines are dropped. Classification errors, including
/// lines that are not valid UTF-8, go through `policy`: `Halt` stops reading
/// and returns the error, `Skip` logs and continues. Each record is passed
/// to `sink`; a sink error stops reading.
pub async fn read_records<F>(source: LineSource, policy: ErrorPolicy, sink: F) -> Result<ReadStats>
where
    F: FnMut(IoStatsRecord) -> Result<()>,
{
    let mut reader = DevIoReader::new();
    read_records_with(&mut reader, source, policy, sink).await?;
    Ok(reader.into_stats())
}

/// Like [`read_records`], counting into a caller-owned reader
///
/// The reader's statistics stay valid when reading fails, so rows already
/// handed to `sink` are still counted.
pub async fn read_records_with<F>(
    reader: &mut DevIoReader,
    source: LineSource,
    policy: ErrorPolicy,
    mut sink: F,
) -> Result<()>
where
    F: FnMut(IoStatsRecord) -> Result<()>,
{
    let description = source.describe();
    info!("Reading device I/O lines from {}", description);

    let lines = source.into_stream();
    futures::pin_mut!(lines);

    while let Some(line) = lines.next().await {
        match reader.read_bytes(&line?) {
            Some(Ok(record)) => sink(record)?,
            Some(Err(error)) => policy.handle(error)?,
            None => {}
        }
    }

    let stats = reader.stats();
    debug!(
        "{}: {} lines, {} records, {} rejected",
        description,
        stats.lines_read,
        stats.records_emitted,
        stats.error_count()
    );
    Ok(())
}

/// Resolve a path argument where `-` means standard input
pub async fn open_path_or_stdin(path: &Path) -> Result<LineSource> {
    if path == Path::new("-") {
        Ok(LineSource::stdin())
    } else {
        LineSource::open(path).await
    }
}
