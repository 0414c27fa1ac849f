use std::path::Path;

use async_zip::tokio::write::ZipFileWriter;
use async_zip::{Compression, ZipDateTime, ZipEntryBuilder};
use chrono::{DateTime, Utc};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::runtime::Builder;
use tokio_util::compat::FuturesAsyncWriteCompatExt;
use tracing::{debug, info};

use super::ArchiveEntry;
use crate::error::PackError;

/// Compression algorithm to use when creating the ZIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compressor {
    #[default]
    Deflate,
    Stored,
}

impl From<Compressor> for Compression {
    fn from(c: Compressor) -> Self {
        match c {
            Compressor::Deflate => Compression::Deflate,
            Compressor::Stored => Compression::Stored,
        }
    }
}

/// Writes `entries` into a fresh archive at `output`, replacing any existing file.
///
/// Blocks until the archive is closed and flushed. The async writer runs on
/// a current-thread runtime owned by this call.
pub fn write_zip(
    output: &Path,
    entries: &[ArchiveEntry],
    compressor: Compressor,
) -> Result<(), PackError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| PackError::Io {
            path: output.to_path_buf(),
            source,
        })?;
    runtime.block_on(write_zip_async(output, entries, compressor))
}

async fn write_zip_async(
    output: &Path,
    entries: &[ArchiveEntry],
    compressor: Compressor,
) -> Result<(), PackError> {
    let io_err = |source| PackError::Io {
        path: output.to_path_buf(),
        source,
    };
    let zip_err = |source| PackError::Archive {
        path: output.to_path_buf(),
        source,
    };

    let mut file = File::create(output).await.map_err(io_err)?;
    let mut writer = ZipFileWriter::with_tokio(&mut file);

    for entry in entries {
        let read_err = |source| PackError::ReadEntry {
            path: entry.path.clone(),
            source,
        };
        let mut source = File::open(&entry.path).await.map_err(read_err)?;
        let metadata = source.metadata().await.map_err(read_err)?;

        let mut builder =
            ZipEntryBuilder::new(entry.name_in_archive.clone().into(), compressor.into());
        if let Ok(modified) = metadata.modified() {
            let modified: DateTime<Utc> = modified.into();
            builder = builder.last_modification_date(ZipDateTime::from_chrono(&modified));
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder = builder.unix_permissions(metadata.permissions().mode() as u16);
        }

        // Streamed through tokio's 8 KiB copy buffer, never held whole in memory.
        let mut entry_writer = writer
            .write_entry_stream(builder)
            .await
            .map_err(zip_err)?
            .compat_write();
        let bytes = tokio::io::copy(&mut source, &mut entry_writer)
            .await
            .map_err(read_err)?;
        entry_writer.into_inner().close().await.map_err(zip_err)?;
        debug!(entry = %entry.name_in_archive, bytes, "added archive entry");
    }

    // Writes the central directory.
    writer.close().await.map_err(zip_err)?;
    file.flush().await.map_err(io_err)?;

    info!(path = %output.display(), entries = entries.len(), "archive written");
    Ok(())
}
