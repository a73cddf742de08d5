//! Embed static files into C/C++ firmware as byte arrays with a lookup index.
//!
//! This crate generates a header for a host program that serves files (for
//! example over HTTP) without a filesystem. Given a list of glob patterns it
//! emits one `static const char` array per matched file, followed by an index
//! the host can search by request path.
//!
//! ## How It Works
//!
//! 1.  **Matching:** each whitespace-separated pattern is expanded with
//!     [`glob`](https://docs.rs/glob); matches are kept in pattern order.
//! 2.  **Encoding:** every file is read and written out as an array of hex
//!     bytes. Files over 40000 bytes are gzipped first so the host can send
//!     them with `Content-Encoding: gzip`.
//! 3.  **Indexing:** each file gets a flag byte holding its content type id
//!     (low 5 bits) and a gzip bit (`128`). The index lists the array, its
//!     length, the public path and the flag byte. A top-level `index.html` is
//!     served at `/`.
//!
//! ## Generated layout
//!
//! ```c
//! struct FileContent{
//!   const char* content;
//!   const int length;
//!   const char* fileName;
//!   const char flags;
//! };
//! struct FileContentMIMEType{
//!   const char* name;
//!   const char nameLength;
//! };
//! ```
//!
//! `filesType[flags & file_content_type_mask]` is the file's MIME type;
//! `flags & file_content_gzipped` means `content` is gzip data and `length` is
//! its compressed size.
//!
//! ## Usage
//!
//! From the command line, redirecting into a header:
//!
//! ```text
//! $ embed-files "*.html js/*.js css/*.css" > EmbeddedFiles.h
//! ```
//!
//! Or from a `build.rs`, which writes `$OUT_DIR/embedded_files.h`:
//!
//! ```no_run
//! // build.rs
//! embed_files::Config::new("*.html js/*.js css/*.css")
//!   .root("web")
//!   .build()
//!   .expect("Failed to embed web assets");
//! ```

pub mod build;
pub mod content;
pub mod flags;
pub mod index;
pub mod mime;
pub mod pattern;
pub mod symbol;

pub use build::{Config, Error, Report, Result};
pub use symbol::symbol_name;
