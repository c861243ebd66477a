use cleaner::clean_dir;
use engine::{build, TextTokenizer};
use std::fs;
use tempfile::tempdir;
use url::Url;

#[test]
fn cleaned_pages_are_searchable() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("input");
    fs::create_dir_all(root.join("thread")).unwrap();
    fs::write(
        root.join("thread/intro.html"),
        "<html><head><title>Thread Intro</title></head><body><p>Boost threads\nstart here</p></body></html>",
    )
    .unwrap();
    fs::write(root.join("notitle.html"), "<p>boost</p>").unwrap();
    fs::write(root.join("readme.txt"), "not html").unwrap();

    let base = Url::parse("https://docs.example.org/html/").unwrap();
    let mut out = Vec::new();
    let summary = clean_dir(&root, &base, &mut out).unwrap();
    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 1);

    let tokenizer = TextTokenizer::default();
    let index = build(out.as_slice(), &tokenizer).unwrap();
    assert_eq!(index.len(), 1);
    let doc = index.document(0).unwrap();
    assert_eq!(doc.title, "Thread Intro");
    assert_eq!(doc.url, "https://docs.example.org/html/thread/intro.html");
    assert!(index.postings("boost").is_some());
}

#[test]
fn missing_input_directory_is_an_error() {
    let base = Url::parse("https://docs.example.org/").unwrap();
    let mut out = Vec::new();
    assert!(clean_dir(std::path::Path::new("/no/such/dir"), &base, &mut out).is_err());
}
