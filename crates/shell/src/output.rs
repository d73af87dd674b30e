// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared line-oriented output.
//!
//! The main flow and the signal tasks both print job notices. Each write
//! takes the sink lock for one whole line, so notices never interleave
//! mid-line.

use parking_lot::Mutex;
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;

/// Cloneable handle to the interpreter's stdout (or a test buffer).
#[derive(Clone)]
pub struct Output {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Output {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Write `text` followed by a newline and flush.
    pub fn line(&self, text: impl Display) {
        let mut sink = self.sink.lock();
        if let Err(e) = writeln!(sink, "{text}").and_then(|()| sink.flush()) {
            tracing::warn!(error = %e, "failed to write output");
        }
    }

    /// Write the prompt without a newline and flush.
    pub fn prompt(&self, text: &str) {
        let mut sink = self.sink.lock();
        if let Err(e) = sink.write_all(text.as_bytes()).and_then(|()| sink.flush()) {
            tracing::warn!(error = %e, "failed to write prompt");
        }
    }
}

/// In-memory sink whose contents can be read back.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn output(&self) -> Output {
        Output::new(self.clone())
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
