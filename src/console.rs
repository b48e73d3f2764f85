// src/console.rs
//! User-facing colored terminal messages

use colored::{Color, Colorize};
use std::io::{self, Write};

/// Colored message writer, plain text when not attached to a terminal
pub struct Console {
    writer: Box<dyn Write + Send>,
    use_colors: bool,
}

impl Console {
    /// Create a new Console that writes to stdout
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stdout()),
            use_colors: is_terminal::is_terminal(std::io::stdout()),
        }
    }

    /// Create a Console over any writer, without colors
    pub fn to_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            use_colors: false,
        }
    }

    /// Write one line in `color`. Console write failures are ignored.
    pub fn line(&mut self, color: Color, msg: &str) {
        let result = if self.use_colors {
            writeln!(self.writer, "{}", msg.color(color))
        } else {
            writeln!(self.writer, "{}", msg)
        };
        if result.is_ok() {
            let _ = self.writer.flush();
        }
    }

    pub fn success(&mut self, msg: &str) {
        self.line(Color::Green, msg);
    }

    pub fn failure(&mut self, msg: &str) {
        self.line(Color::Red, msg);
    }

    /// Write preformatted text as is
    pub fn raw(&mut self, text: &str) {
        let _ = self.writer.write_all(text.as_bytes());
        let _ = self.writer.flush();
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps everything written for inspection
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_plain_output() {
        let captured = Captured::default();
        let mut console = Console::to_writer(Box::new(captured.clone()));
        assert!(!console.use_colors());

        console.success("File downloaded successfully: a.json");
        console.failure("Failed to download file. HTTP Status Code: 404");
        console.raw("raw\n");

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            text,
            "File downloaded successfully: a.json\n\
             Failed to download file. HTTP Status Code: 404\n\
             raw\n"
        );
    }
}
