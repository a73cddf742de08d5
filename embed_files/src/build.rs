//! The generation driver and its configuration.
use std::{
    env,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    content::{ContentEncoder, DEFAULT_COMPRESSION_LEVEL, DEFAULT_GZIP_THRESHOLD},
    index::{self, FileEntry},
    mime::{DEFAULT_FALLBACK_MIME_TYPE, MimeRegistry},
    pattern,
    symbol::symbol_name,
};

//
// ==================== PUBLIC BUILDER API ====================
//

/// A builder for configuring a generation run.
///
/// # Example
/// ```no_run
/// // in build.rs
/// embed_files::Config::new("*.html *.js css/*.css")
///   .root("web")
///   .build()
///   .expect("Failed to embed web assets");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    patterns: String,
    root: Option<PathBuf>,
    gzip_threshold: usize,
    level: u32,
    fallback_mime_type: String,
    provenance: String,
    out_file: String,
}

impl Config {
    /// Creates a configuration for a whitespace-separated list of glob
    /// patterns.
    pub fn new(patterns: impl Into<String>) -> Self {
        let patterns = patterns.into();
        Self {
            provenance: format!("embed_files {patterns}"),
            patterns,
            root: None,
            gzip_threshold: DEFAULT_GZIP_THRESHOLD,
            level: DEFAULT_COMPRESSION_LEVEL,
            fallback_mime_type: DEFAULT_FALLBACK_MIME_TYPE.to_owned(),
            out_file: DEFAULT_OUT_FILE.to_owned(),
        }
    }

    /// Sets the directory patterns are resolved against, and that public
    /// paths are relative to.
    ///
    /// Defaults to the current directory, or the crate root in [`build`](Self::build).
    /// A relative root used with `build` is taken relative to the crate root.
    #[must_use]
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    /// Files larger than this many bytes are gzipped. Defaults to `40000`.
    #[must_use]
    pub const fn gzip_threshold(mut self, bytes: usize) -> Self {
        self.gzip_threshold = bytes;
        self
    }

    /// Sets the gzip compression level (0-9). Defaults to `9`.
    #[must_use]
    pub const fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// The MIME type served for files whose extension is not recognised.
    /// Defaults to `text/plain`.
    #[must_use]
    pub fn fallback_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.fallback_mime_type = mime.into();
        self
    }

    /// Text recorded in the comment on the first line of the output.
    #[must_use]
    pub fn provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = provenance.into();
        self
    }

    /// File name written under `OUT_DIR` by [`build`](Self::build). Defaults to
    /// `embedded_files.h`.
    #[must_use]
    pub fn out_file(mut self, name: impl Into<String>) -> Self {
        self.out_file = name.into();
        self
    }

    /// Runs the generator, streaming the source fragment into `out`.
    ///
    /// File arrays are written as each file is read; the index follows once
    /// every file is done. On error `out` is left holding whatever was written
    /// so far.
    ///
    /// # Errors
    /// Returns an [`Error`] if a pattern is invalid, a matched file cannot be
    /// read, more than 32 content types are found, or writing fails.
    pub fn generate<W: Write>(&self, out: &mut W) -> Result<Report> {
        writeln!(
            out,
            "// contents generated by {} any manual changes will be overwritten\n",
            self.provenance
        )?;

        let files = pattern::expand(self.root.as_deref(), &self.patterns)?;
        let encoder = ContentEncoder::new(self.gzip_threshold, self.level);
        let mut registry = MimeRegistry::new(self.fallback_mime_type.clone());
        let mut entries = Vec::with_capacity(files.len());

        for file in &files {
            let content_type = registry.register(&file.name)?.flag_name.clone();
            let compressed = encoder.embed_file(out, &file.path, &symbol_name(&file.name))?;
            entries.push(FileEntry::new(&file.name, compressed, content_type));
        }

        index::write_index(out, &entries, &registry)?;
        out.flush()?;

        let report = Report {
            compressed: entries.iter().filter(|e| e.compressed).count(),
            content_types: registry.len(),
            files: files.into_iter().map(|f| f.path).collect(),
        };
        tracing::info!(
            files = report.files.len(),
            compressed = report.compressed,
            content_types = report.content_types,
            "generated embedded file index"
        );
        Ok(report)
    }

    /// Runs the generator from a build script.
    ///
    /// Patterns are resolved against the crate root (`CARGO_MANIFEST_DIR`) and
    /// the output is written to `$OUT_DIR/embedded_files.h`. Cargo is told to
    /// rerun the script when any embedded file changes, or when anything
    /// changes under the directory a pattern searches. Returns the path of the
    /// generated file.
    ///
    /// # Errors
    /// Returns an [`Error`] if Cargo's environment is missing or generation
    /// fails.
    pub fn build(self) -> Result<PathBuf> {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .map_err(|_| Error::Var("CARGO_MANIFEST_DIR"))?;
        let out_dir = env::var("OUT_DIR")
            .map(PathBuf::from)
            .map_err(|_| Error::Var("OUT_DIR"))?;

        let root = self
            .root
            .as_ref()
            .map_or_else(|| manifest_dir.clone(), |root| manifest_dir.join(root));
        let out_path = out_dir.join(&self.out_file);
        let watched = watch_dirs(&root, &self.patterns, &out_dir);
        let config = Self {
            root: Some(root),
            ..self
        };

        let mut out = BufWriter::new(File::create(&out_path)?);
        let report = config.generate(&mut out)?;

        for path in watched.iter().chain(&report.files) {
            println!("cargo:rerun-if-changed={}", path.display());
        }
        Ok(out_path)
    }
}

/// Directories a new match could appear in, one per distinct pattern base.
///
/// Cargo watches a directory recursively, so one that contains `out_dir`
/// would rerun the build script after every build. Those are left out; their
/// matched files are still watched individually.
fn watch_dirs(root: &Path, patterns: &str, out_dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for pattern in patterns.split_whitespace() {
        let base = pattern::literal_dir(pattern);
        let dir = if base.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            root.join(base)
        };
        if !out_dir.starts_with(&dir) && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// The file written by [`Config::build`] unless overridden.
pub const DEFAULT_OUT_FILE: &str = "embedded_files.h";

/// Summary of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Every embedded file, in output order.
    pub files: Vec<PathBuf>,
    /// How many of them were gzipped.
    pub compressed: usize,
    /// Number of distinct content types.
    pub content_types: usize,
}

/// A specialized `Result` type for generation.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that stops a generation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("Could not read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid glob pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("Environment variable '{0}' not set by Cargo")]
    Var(&'static str),
    #[error(
        "'{path}' has content type '{mime_type}', but only 32 distinct content types fit in the flag byte"
    )]
    TooManyMimeTypes { mime_type: String, path: String },
}
