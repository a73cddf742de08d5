const HEADER: &str = include_str!(concat!(env!("OUT_DIR"), "/embedded_files.h"));

fn main() {
    println!("{HEADER}");

    assert!(HEADER.starts_with("// contents generated by embed_files *.html css/*.css"));
    // "Contents" as hex, first bytes of blobs/index.html.
    assert!(HEADER.contains("static const char index_html[] = {\n0x43,0x6f,0x6e,0x74,"));
    assert!(HEADER.contains("static const char css_site_css[] = {\n"));
    assert!(HEADER.contains("{index_html,sizeof(index_html),\"/\",file_content_type_text_html}"));
    assert!(HEADER.contains(",{css_site_css,sizeof(css_site_css),\"/css/site.css\",file_content_type_text_css}"));

    println!("Generated index matches blobs.");
}
