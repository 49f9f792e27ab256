//! JSON Lines sink: one CI object per line

use std::path::Path;

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::sink::{CiBatch, CiSink};
use crate::error::SinkError;
use crate::topology::CiObject;

#[derive(Serialize)]
struct Line<'a> {
    batch: u64,
    #[serde(flatten)]
    object: &'a CiObject,
}

/// Writes each delivered object as a JSON line tagged with its batch number
pub struct JsonLinesSink<W> {
    writer: W,
    lines: usize,
}

impl<W: AsyncWrite + Unpin + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Lines written so far
    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<tokio::io::BufWriter<tokio::fs::File>> {
    /// Create (or truncate) a file and write to it
    ///
    /// # Errors
    /// Returns [`SinkError::Io`] if the file cannot be created.
    pub async fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = tokio::fs::File::create(path).await?;
        Ok(Self::new(tokio::io::BufWriter::new(file)))
    }
}

impl<W: AsyncWrite + Unpin + Send> CiSink for JsonLinesSink<W> {
    async fn send(&mut self, batch: &CiBatch) -> Result<(), SinkError> {
        let mut buffer = Vec::new();
        for object in &batch.objects {
            serde_json::to_writer(
                &mut buffer,
                &Line {
                    batch: batch.sequence,
                    object,
                },
            )?;
            buffer.push(b'\n');
        }
        self.writer.write_all(&buffer).await?;
        self.lines += batch.len();
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().await?;
        Ok(())
    }
}
