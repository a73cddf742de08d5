fn main() {
    embed_files::Config::new("*.html css/*.css")
        .root("blobs")
        .build()
        .expect("Failed to embed blobs");
}
