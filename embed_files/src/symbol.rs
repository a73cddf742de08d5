//! Identifier-safe names for generated constants.

/// Derives the name of a file's byte-array constant from its path.
///
/// Each of `\`, `.`, `/`, space, `-` and `+` becomes `_`; everything else is
/// kept as is. Two paths that differ only in those characters map to the same
/// name and are not told apart.
///
/// ```
/// assert_eq!(embed_files::symbol_name("web/app-v1.min.js"), "web_app_v1_min_js");
/// ```
#[must_use]
pub fn symbol_name(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '\\' | '.' | '/' | ' ' | '-' | '+' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::symbol_name;
    use proptest::prelude::*;

    #[test]
    fn replaces_separators_and_punctuation() {
        assert_eq!(symbol_name("index.html"), "index_html");
        assert_eq!(symbol_name(r"css\site style.css"), "css_site_style_css");
        assert_eq!(symbol_name("fonts/a+b-c.woff2"), "fonts_a_b_c_woff2");
    }

    #[test]
    fn keeps_other_characters() {
        assert_eq!(symbol_name("img_01"), "img_01");
        assert_eq!(symbol_name("données"), "données");
    }

    #[test]
    fn colliding_paths_share_a_name() {
        assert_eq!(symbol_name("a-b.txt"), symbol_name("a/b+txt"));
    }

    proptest! {
        #[test]
        fn output_has_no_replaced_characters(path in ".*") {
            let name = symbol_name(&path);
            prop_assert!(!name.contains(['\\', '.', '/', ' ', '-', '+']));
            prop_assert_eq!(name.chars().count(), path.chars().count());
        }

        #[test]
        fn is_idempotent(path in ".*") {
            let once = symbol_name(&path);
            prop_assert_eq!(symbol_name(&once), once);
        }
    }
}
