/// Line-prefixing writer: each complete line becomes `<prefix><line>\n`.
use std::io::{self, Write};

/// ANSI foreground colors used for stream prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Self::Red => 31,
            Self::Blue => 34,
        }
    }
}

/// Render `label` for use as a prefix, optionally wrapped in a color escape.
#[must_use]
pub fn prefix(label: &str, color: Option<Color>) -> String {
    match color {
        Some(c) => format!("\x1b[{}m{label}\x1b[m", c.code()),
        None => label.to_owned(),
    }
}

/// Buffers partial writes and emits whole lines, each prefixed, with one
/// `write_all` on the inner sink per line.
///
/// A trailing fragment without a newline stays buffered until a newline
/// arrives or the writer is flushed; flushing emits it as a complete line.
pub struct LinePrefixWriter<W: Write> {
    inner: W,
    prefix: Vec<u8>,
    pending: Vec<u8>,
}

impl<W: Write> LinePrefixWriter<W> {
    #[must_use]
    pub fn new(inner: W, prefix: &str) -> Self {
        Self {
            inner,
            prefix: prefix.as_bytes().to_vec(),
            pending: Vec::new(),
        }
    }

    fn emit(&mut self, line: &[u8]) -> io::Result<()> {
        let mut chunk = Vec::with_capacity(self.prefix.len() + line.len() + 1);
        chunk.extend_from_slice(&self.prefix);
        chunk.extend_from_slice(line);
        if chunk.last() != Some(&b'\n') {
            chunk.push(b'\n');
        }
        self.inner.write_all(&chunk)
    }
}

impl<W: Write> Write for LinePrefixWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let fragment = std::mem::take(&mut self.pending);
            self.emit(&fragment)?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for LinePrefixWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records each `write` call separately so per-line atomicity is visible.
    #[derive(Default)]
    struct Chunks(Vec<Vec<u8>>);

    impl Write for Chunks {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn text(chunks: &Chunks) -> Vec<String> {
        chunks
            .0
            .iter()
            .map(|c| String::from_utf8(c.clone()).unwrap())
            .collect()
    }

    #[test]
    fn test_prefix_colors() {
        assert_eq!(prefix("[stdout]", Some(Color::Blue)), "\x1b[34m[stdout]\x1b[m");
        assert_eq!(prefix("[stderr]", Some(Color::Red)), "\x1b[31m[stderr]\x1b[m");
        assert_eq!(prefix("[stdout]", None), "[stdout]");
    }

    #[test]
    fn test_one_write_per_line() {
        let mut sink = Chunks::default();
        {
            let mut w = LinePrefixWriter::new(&mut sink, "> ");
            w.write_all(b"one\ntwo\n").unwrap();
        }
        assert_eq!(text(&sink), vec!["> one\n", "> two\n"]);
    }

    #[test]
    fn test_partial_writes_join() {
        let mut sink = Chunks::default();
        let mut w = LinePrefixWriter::new(&mut sink, "> ");
        w.write_all(b"hel").unwrap();
        w.write_all(b"lo wo").unwrap();
        w.write_all(b"rld\ntail").unwrap();
        drop(w);
        assert_eq!(text(&sink), vec!["> hello world\n", "> tail\n"]);
    }

    #[test]
    fn test_fragment_waits_for_flush() {
        let mut sink = Chunks::default();
        let mut w = LinePrefixWriter::new(&mut sink, "# ");
        w.write_all(b"no newline yet").unwrap();
        w.flush().unwrap();
        w.write_all(b"\n").unwrap();
        drop(w);
        assert_eq!(text(&sink), vec!["# no newline yet\n", "# \n"]);
    }

    #[test]
    fn test_empty_lines_are_prefixed() {
        let mut out = Vec::new();
        {
            let mut w = LinePrefixWriter::new(&mut out, "| ");
            w.write_all(b"a\n\nb\n").unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "| a\n| \n| b\n");
    }
}
