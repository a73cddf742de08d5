//! The lookup tables emitted after all file arrays.
use std::io::{self, Write};

use crate::{
    flags::{FlagNamespace, flag_expr},
    mime::MimeRegistry,
    symbol::symbol_name,
};

const STRUCT_DEFINITIONS: &str = r"
/*
 * file index section
 */
struct FileContent{
  const char* content;
  const int length;
  const char* fileName;
  const char flags;
};
struct FileContentMIMEType{
  const char* name;
  const char nameLength;
};
";

/// One embedded file, as recorded for the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Name of the file's byte array.
    pub symbol: String,
    /// Path relative to the pattern root, `/` separated.
    pub path: String,
    /// Whether the array holds gzip data.
    pub compressed: bool,
    /// Flag constant of the file's content type.
    pub content_type: String,
}

impl FileEntry {
    /// Records a file matched as `name`.
    pub fn new(name: &str, compressed: bool, content_type: impl Into<String>) -> Self {
        Self {
            symbol: symbol_name(name),
            path: name.replace('\\', "/"),
            compressed,
            content_type: content_type.into(),
        }
    }

    /// The path the file is served under, without the leading `/`.
    ///
    /// A top-level `index.html` is served as the root document.
    #[must_use]
    pub fn public_path(&self) -> &str {
        if self.path == "index.html" { "" } else { self.path.as_str() }
    }
}

/// Writes the struct definitions, flag constants, `filesType[]` and `files[]`.
///
/// # Errors
/// Propagates write errors from `out`.
pub fn write_index<W: Write>(
    out: &mut W,
    entries: &[FileEntry],
    registry: &MimeRegistry,
) -> io::Result<()> {
    out.write_all(STRUCT_DEFINITIONS.as_bytes())?;
    FlagNamespace::new(registry).write_declarations(out)?;

    out.write_all(b"\nFileContentMIMEType filesType[]={\n")?;
    for (i, content_type) in registry.types().iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        let name = c_string(&content_type.mime);
        writeln!(out, "{{\"{name}\",sizeof(\"{name}\") - 1}}")?;
    }
    out.write_all(b"};\n")?;

    out.write_all(b"\nFileContent files[]={\n")?;
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        writeln!(
            out,
            "{{{symbol},sizeof({symbol}),\"/{path}\",{flags}}}",
            symbol = entry.symbol,
            path = c_string(entry.public_path()),
            flags = flag_expr(&entry.content_type, entry.compressed),
        )?;
    }
    out.write_all(b"};\n")
}

/// Escapes `value` for use inside a C string literal.
fn c_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
