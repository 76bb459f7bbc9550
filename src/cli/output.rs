//! Output formatting for the interpreter
//!
//! Everything the operator sees goes to one writer (stdout by default):
//! tables, `ERROR` lines and `WARNING` lines alike.

use std::io::{self, Write};

use serde::Serialize;

pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    writer: Box<dyn Write>,
}

impl Output {
    /// Creates an output writing to stdout
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(format, Box::new(io::stdout()))
    }

    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write>) -> Self {
        Self { format, writer }
    }

    /// Prints a recovered error
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "ERROR {}", message),
            OutputFormat::Json => writeln!(
                self.writer,
                "{}",
                serde_json::json!({
                    "success": false,
                    "error": message
                })
            ),
        }
    }

    /// Prints the rejection of a line that matches no command
    pub fn invalid(&mut self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "ERROR: {}", message),
            OutputFormat::Json => self.error(message),
        }
    }

    /// Prints a warning about an adjusted request
    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "WARNING {}", message),
            OutputFormat::Json => writeln!(
                self.writer,
                "{}",
                serde_json::json!({
                    "warning": message
                })
            ),
        }
    }

    /// Prints pre-rendered text (text format only)
    pub fn text(&mut self, text: &str) -> io::Result<()> {
        if self.is_text() {
            writeln!(self.writer, "{}", text)?;
        }
        Ok(())
    }

    /// Prints structured data (JSON format only)
    pub fn data<T: Serialize>(&mut self, data: &T) -> io::Result<()> {
        if self.is_json() {
            let json = serde_json::to_string(data).map_err(io::Error::other)?;
            writeln!(self.writer, "{}", json)?;
        }
        Ok(())
    }

    /// Prints the prompt without a newline (text format only)
    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        if self.is_text() {
            write!(self.writer, "{}", prompt)?;
        }
        self.writer.flush()
    }

    /// Echoes a replayed command after its prompt (text format only)
    pub fn echo(&mut self, prompt: &str, line: &str) -> io::Result<()> {
        if self.is_text() {
            writeln!(self.writer, "{}{}", prompt, line)?;
        }
        Ok(())
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if using text format
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    /// Writer whose contents stay readable after being handed to [`super::Output`]
    #[derive(Clone, Default)]
    pub struct Captured(Rc<RefCell<Vec<u8>>>);

    impl Captured {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
