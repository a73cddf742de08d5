//! Reading, compressing and rendering file contents as byte-array literals.
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use flate2::{Compression, write::GzEncoder};

use crate::build::{Error, Result};

/// Files larger than this many bytes are gzipped by default.
pub const DEFAULT_GZIP_THRESHOLD: usize = 40_000;

/// The default gzip compression level.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 9;

/// Number of array elements written per output line.
pub const BYTES_PER_LINE: usize = 22;

/// The bytes that end up in a file's array, and whether they are gzipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub compressed: bool,
}

/// Turns files into array literals, compressing the large ones.
#[derive(Debug, Clone, Copy)]
pub struct ContentEncoder {
    threshold: usize,
    level: u32,
}

impl Default for ContentEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_GZIP_THRESHOLD, DEFAULT_COMPRESSION_LEVEL)
    }
}

impl ContentEncoder {
    /// Creates an encoder that gzips anything longer than `threshold` bytes at
    /// the given level (0-9, clamped).
    #[must_use]
    pub const fn new(threshold: usize, level: u32) -> Self {
        Self {
            threshold,
            level: if level > 9 { 9 } else { level },
        }
    }

    /// Compresses `content` if it is over the threshold.
    ///
    /// The gzip header carries no timestamp or file name, so the same input
    /// always encodes to the same bytes.
    ///
    /// # Errors
    /// Returns an I/O error if the compressor fails.
    pub fn encode(&self, content: Vec<u8>) -> io::Result<Encoded> {
        if content.len() <= self.threshold {
            return Ok(Encoded {
                bytes: content,
                compressed: false,
            });
        }

        let mut encoder = GzEncoder::new(
            Vec::with_capacity(content.len() / 2),
            Compression::new(self.level),
        );
        encoder.write_all(&content)?;
        Ok(Encoded {
            bytes: encoder.finish()?,
            compressed: true,
        })
    }

    /// Reads the file at `path`, encodes it and writes its array literal named
    /// `symbol`. Returns whether the content was compressed.
    ///
    /// # Errors
    /// Returns [`Error::Read`] if the file cannot be read, or [`Error::Io`] if
    /// compressing or writing fails.
    pub fn embed_file<W: Write>(&self, out: &mut W, path: &Path, symbol: &str) -> Result<bool> {
        let content = fs::read(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        let original_len = content.len();

        let encoded = self.encode(content)?;
        write_array(out, symbol, &encoded.bytes)?;

        tracing::debug!(
            path = %path.display(),
            symbol,
            original_len,
            embedded_len = encoded.bytes.len(),
            compressed = encoded.compressed,
            "embedded file"
        );
        Ok(encoded.compressed)
    }
}

/// Writes `bytes` as a `static const char` array named `symbol`.
///
/// # Errors
/// Propagates write errors from `out`.
pub fn write_array<W: Write>(out: &mut W, symbol: &str, bytes: &[u8]) -> io::Result<()> {
    writeln!(out, "static const char {symbol}[] = {{")?;
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        write!(out, "0x{byte:02x}")?;
        if (i + 1) % BYTES_PER_LINE == 0 {
            out.write_all(b"\n")?;
        }
    }
    out.write_all(b"};\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn render(symbol: &str, bytes: &[u8]) -> String {
        let mut out = Vec::new();
        write_array(&mut out, symbol, bytes).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_lowercase_hex() {
        assert_eq!(
            render("a_txt", b"hi\n\xff"),
            "static const char a_txt[] = {\n0x68,0x69,0x0a,0xff};\n"
        );
    }

    #[test]
    fn breaks_line_after_every_22_elements() {
        let text = render("blob", &[0u8; 45]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].matches("0x00").count(), 22);
        assert!(lines[1].starts_with("0x00,"));
        assert!(lines[2].starts_with(','));
        assert_eq!(lines[2].matches("0x00").count(), 22);
        assert_eq!(lines[3], ",0x00};");
    }

    #[test]
    fn exact_line_multiple_closes_on_its_own_line() {
        let text = render("blob", &[1u8; 22]);
        assert!(text.ends_with("0x01\n};\n"));
    }

    #[test]
    fn empty_file_renders_empty_initializer() {
        assert_eq!(render("e", &[]), "static const char e[] = {\n};\n");
    }

    #[test]
    fn at_threshold_is_left_alone() {
        let encoder = ContentEncoder::new(8, 9);
        let encoded = encoder.encode(b"12345678".to_vec()).unwrap();
        assert!(!encoded.compressed);
        assert_eq!(encoded.bytes, b"12345678");
    }

    #[test]
    fn over_threshold_is_gzipped() {
        let content = b"abcdefgh".repeat(10_000);
        let encoded = ContentEncoder::default().encode(content.clone()).unwrap();
        assert!(encoded.compressed);
        assert_eq!(&encoded.bytes[..2], &[0x1f, 0x8b]);

        let mut decoded = Vec::new();
        GzDecoder::new(encoded.bytes.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, content);
    }

    #[test]
    fn compression_is_deterministic() {
        let content = vec![7u8; 50_000];
        let encoder = ContentEncoder::default();
        assert_eq!(
            encoder.encode(content.clone()).unwrap(),
            encoder.encode(content).unwrap()
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        let mut out = Vec::new();
        let err = ContentEncoder::default()
            .embed_file(&mut out, &path, "gone_txt")
            .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(out.is_empty());
    }
}
