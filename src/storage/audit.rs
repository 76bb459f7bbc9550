//! Command history log
//!
//! Accepted command lines are buffered and handed off in fixed-size batches
//! to background threads that append them to a plain-text file, one command
//! per line. Appends are serialized by a shared mutex (and an exclusive file
//! lock) so concurrent batches never interleave. Recording a line never
//! waits for the disk.

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use fs2::FileExt;

/// Destination for accepted command lines
pub trait CommandHistory {
    fn record(&mut self, line: &str);
}

impl CommandHistory for Vec<String> {
    fn record(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Append-only command history with batched background writes
pub struct AuditLog {
    path: PathBuf,
    batch_size: usize,
    pending: VecDeque<String>,
    write_lock: Arc<Mutex<()>>,
    in_flight: Vec<JoinHandle<()>>,
}

impl AuditLog {
    /// Creates the log file, truncating any previous history
    pub fn create(path: impl Into<PathBuf>, batch_size: usize) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to create audit log: {}", path.display()))?;

        tracing::debug!(path = %path.display(), batch_size, "Audit log truncated");

        Ok(Self {
            path,
            batch_size: batch_size.max(1),
            pending: VecDeque::new(),
            write_lock: Arc::new(Mutex::new(())),
            in_flight: Vec::new(),
        })
    }

    /// Returns the path to the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of buffered lines not yet handed to a writer
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Blocks until every dispatched append has finished.
    ///
    /// Lines still buffered stay buffered.
    pub fn wait(&mut self) {
        for handle in self.in_flight.drain(..) {
            if handle.join().is_err() {
                tracing::warn!("Audit append thread panicked");
            }
        }
    }

    /// Writes any partial batch and waits for all appends to land
    pub fn flush(&mut self) -> Result<()> {
        self.wait();

        if self.pending.is_empty() {
            return Ok(());
        }

        let remainder: Vec<String> = self.pending.drain(..).collect();
        append_lines(&self.write_lock, &self.path, &remainder)
    }

    fn spawn_append(&mut self, batch: Vec<String>) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let path = self.path.clone();
        let lock = Arc::clone(&self.write_lock);

        tracing::debug!(lines = batch.len(), "Dispatching audit append");

        self.in_flight.push(thread::spawn(move || {
            if let Err(e) = append_lines(&lock, &path, &batch) {
                let error = format!("{:#}", e);
                tracing::warn!(path = %path.display(), error = %error, "Failed to append command history");
            }
        }));
    }
}

impl CommandHistory for AuditLog {
    /// Buffers a command line, dispatching a background append for every
    /// full batch
    fn record(&mut self, line: &str) {
        self.pending.push_back(line.to_string());

        while self.pending.len() >= self.batch_size {
            let batch: Vec<String> = self.pending.drain(..self.batch_size).collect();
            self.spawn_append(batch);
        }
    }
}

impl Drop for AuditLog {
    fn drop(&mut self) {
        self.wait();
    }
}

/// Appends lines to the log while holding both the in-process and file locks
fn append_lines(lock: &Mutex<()>, path: &Path, lines: &[String]) -> Result<()> {
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open audit log: {}", path.display()))?;

    file.lock_exclusive()
        .context("Failed to acquire write lock on audit log")?;

    let mut writer = BufWriter::new(&file);
    for line in lines {
        writeln!(writer, "{}", line).context("Failed to write audit line")?;
    }

    writer.flush().context("Failed to flush audit log")?;

    // Lock is released when file is dropped
    Ok(())
}
