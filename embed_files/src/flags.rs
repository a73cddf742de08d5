//! The per-file flag byte.
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! +---+---+---+---+---+---+---+---+
//! | Z | R | - |   content type id |
//! +---+---+---+---+---+---+---+---+
//! ```
//!
//! `Z` is set when the array holds gzip data, `R` is reserved. The id indexes
//! the generated `filesType[]` table.
use std::io::{self, Write};

use crate::mime::MimeRegistry;

/// Selects the content type id.
pub const FILE_CONTENT_TYPE_MASK: u8 = 31;
/// Reserved for the host.
pub const FILE_CONTENT_RESERVED_FLAG: u8 = 64;
/// Set when the embedded bytes are gzip compressed.
pub const FILE_CONTENT_GZIPPED: u8 = 128;

pub const FILE_CONTENT_TYPE_MASK_NAME: &str = "file_content_type_mask";
pub const FILE_CONTENT_RESERVED_FLAG_NAME: &str = "file_content_reserved_flag";
pub const FILE_CONTENT_GZIPPED_NAME: &str = "file_content_gzipped";

/// A named byte constant in the generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagConstant {
    pub name: String,
    pub value: u8,
}

/// Every flag constant declared for one run: the fixed bits followed by one
/// constant per content type.
#[derive(Debug, Clone)]
pub struct FlagNamespace {
    constants: Vec<FlagConstant>,
}

impl FlagNamespace {
    #[must_use]
    pub fn new(registry: &MimeRegistry) -> Self {
        let fixed = [
            (FILE_CONTENT_TYPE_MASK_NAME, FILE_CONTENT_TYPE_MASK),
            (FILE_CONTENT_RESERVED_FLAG_NAME, FILE_CONTENT_RESERVED_FLAG),
            (FILE_CONTENT_GZIPPED_NAME, FILE_CONTENT_GZIPPED),
        ]
        .into_iter()
        .map(|(name, value)| FlagConstant {
            name: name.to_owned(),
            value,
        });
        let types = registry.types().iter().map(|t| FlagConstant {
            name: t.flag_name.clone(),
            value: t.id,
        });

        Self {
            constants: fixed.chain(types).collect(),
        }
    }

    #[must_use]
    pub fn constants(&self) -> &[FlagConstant] {
        &self.constants
    }

    /// Writes one `const char` declaration per constant.
    ///
    /// # Errors
    /// Propagates write errors from `out`.
    pub fn write_declarations<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for FlagConstant { name, value } in &self.constants {
            writeln!(out, "const char {name} = {value};")?;
        }
        Ok(())
    }
}

/// The flag expression stored in a file's index entry.
#[must_use]
pub fn flag_expr(content_type: &str, compressed: bool) -> String {
    if compressed {
        format!("{content_type}|{FILE_CONTENT_GZIPPED_NAME}")
    } else {
        content_type.to_owned()
    }
}

/// Index into `filesType[]` encoded in a flag byte.
#[must_use]
pub const fn content_type_id(flags: u8) -> u8 {
    flags & FILE_CONTENT_TYPE_MASK
}

/// Whether a flag byte marks gzip content.
#[must_use]
pub const fn is_compressed(flags: u8) -> bool {
    flags & FILE_CONTENT_GZIPPED != 0
}
