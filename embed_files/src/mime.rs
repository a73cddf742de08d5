//! MIME type guessing and per-run content type ids.
use std::path::Path;

use crate::{
    build::{Error, Result},
    flags::FILE_CONTENT_TYPE_MASK,
    symbol::symbol_name,
};

/// Prefix of the flag constant declared for each content type.
pub const CONTENT_TYPE_PREFIX: &str = "file_content_type_";

/// Used when the extension says nothing about the content.
pub const DEFAULT_FALLBACK_MIME_TYPE: &str = "text/plain";

/// How many distinct content types fit in the flag byte's type mask.
pub const MAX_CONTENT_TYPES: usize = FILE_CONTENT_TYPE_MASK as usize + 1;

/// Guesses the MIME type of `path` from its extension.
///
/// `.js` is always `application/javascript`, in any case. Backslashes count
/// as path separators.
#[must_use]
pub fn guess(path: &str, fallback: &str) -> String {
    let path = path.replace('\\', "/");
    let Some(ext) = Path::new(&path).extension().and_then(|ext| ext.to_str()) else {
        return fallback.to_owned();
    };

    if ext.eq_ignore_ascii_case("js") {
        return "application/javascript".to_owned();
    }
    mime_guess::from_ext(ext)
        .first_raw()
        .unwrap_or(fallback)
        .to_owned()
}

/// A content type seen during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Position in `filesType[]`, and the value of the flag constant.
    pub id: u8,
    /// Name of the flag constant, e.g. `file_content_type_text_html`.
    pub flag_name: String,
    /// The MIME type as served, e.g. `text/html`.
    pub mime: String,
}

/// Hands out one id per distinct content type, in order of first use.
#[derive(Debug, Clone)]
pub struct MimeRegistry {
    fallback: String,
    types: Vec<ContentType>,
}

impl Default for MimeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MIME_TYPE)
    }
}

impl MimeRegistry {
    /// Creates an empty registry that resolves unknown extensions to
    /// `fallback`.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            types: Vec::new(),
        }
    }

    /// Looks up the content type of `path`, allocating the next id if the type
    /// has not been seen yet in this run.
    ///
    /// Types are keyed by their flag constant name, so two MIME strings that
    /// escape to the same name share an id.
    ///
    /// # Errors
    /// Returns [`Error::TooManyMimeTypes`] if a new type would need an id that
    /// does not fit in the flag byte's type mask.
    pub fn register(&mut self, path: &str) -> Result<&ContentType> {
        let mime = guess(path, &self.fallback);
        let flag_name = format!("{CONTENT_TYPE_PREFIX}{}", symbol_name(&mime));

        if let Some(pos) = self.types.iter().position(|t| t.flag_name == flag_name) {
            return Ok(&self.types[pos]);
        }

        if self.types.len() >= MAX_CONTENT_TYPES {
            return Err(Error::TooManyMimeTypes {
                mime_type: mime,
                path: path.to_owned(),
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        let id = self.types.len() as u8;
        tracing::debug!(id, %mime, "new content type");
        self.types.push(ContentType {
            id,
            flag_name,
            mime,
        });
        Ok(&self.types[self.types.len() - 1])
    }

    /// All content types in id order.
    #[must_use]
    pub fn types(&self) -> &[ContentType] {
        &self.types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_common_web_types() {
        assert_eq!(guess("index.html", "x"), "text/html");
        assert_eq!(guess("css/site.css", "x"), "text/css");
        assert_eq!(guess("data.json", "x"), "application/json");
        assert_eq!(guess("notes.txt", "x"), "text/plain");
        assert_eq!(guess(r"img\logo.png", "x"), "image/png");
    }

    #[test]
    fn js_is_application_javascript() {
        assert_eq!(guess("static/app.js", "x"), "application/javascript");
        assert_eq!(guess("STATIC/APP.JS", "x"), "application/javascript");
        assert_eq!(guess("vendor.Js", "x"), "application/javascript");
    }

    #[test]
    fn js_case_variants_share_an_id() {
        let mut registry = MimeRegistry::default();
        assert_eq!(registry.register("app.js").unwrap().id, 0);
        assert_eq!(registry.register("LEGACY.JS").unwrap().id, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_extension_uses_fallback() {
        assert_eq!(guess("LICENSE", "text/plan"), "text/plan");
        assert_eq!(guess("blob.zzunknownzz", DEFAULT_FALLBACK_MIME_TYPE), "text/plain");
    }

    #[test]
    fn ids_follow_first_use() {
        let mut registry = MimeRegistry::default();
        assert_eq!(registry.register("a.html").unwrap().id, 0);
        assert_eq!(registry.register("b.css").unwrap().id, 1);
        let again = registry.register("c.html").unwrap();
        assert_eq!(again.id, 0);
        assert_eq!(again.flag_name, "file_content_type_text_html");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.types()[1].mime, "text/css");
    }

    #[test]
    fn flag_name_escapes_mime() {
        let mut registry = MimeRegistry::default();
        let svg = registry.register("logo.svg").unwrap();
        assert_eq!(svg.flag_name, "file_content_type_image_svg_xml");
        assert_eq!(svg.mime, "image/svg+xml");
    }

    #[test]
    fn rejects_more_types_than_the_mask_holds() {
        let mut registry = MimeRegistry::default();
        for i in 0..MAX_CONTENT_TYPES {
            // Each unknown extension falls back, so vary the fallback instead.
            registry.fallback = format!("application/x-test-{i}");
            registry.register("file").unwrap();
        }
        assert_eq!(registry.len(), 32);

        registry.fallback = "application/x-one-too-many".to_owned();
        let err = registry.register("file").unwrap_err();
        assert!(matches!(err, Error::TooManyMimeTypes { ref mime_type, .. } if mime_type == "application/x-one-too-many"));

        registry.fallback = "application/x-test-3".to_owned();
        assert_eq!(registry.register("file").unwrap().id, 3);
    }
}
