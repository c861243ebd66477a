use engine::{IndexCell, IndexContext, TokenizerConfig};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

#[test]
fn concurrent_first_access_builds_once() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("raw.txt");
    fs::write(&corpus, "Intro\x03boost threads\x03http://x/a.html\n").unwrap();

    let cell = Arc::new(IndexCell::new());
    let builds = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let (cell, builds, barrier, corpus) = (cell.clone(), builds.clone(), barrier.clone(), corpus.clone());
            thread::spawn(move || {
                barrier.wait();
                let ctx = cell
                    .get_or_try_init(|| {
                        builds.fetch_add(1, Ordering::SeqCst);
                        IndexContext::open(&corpus, &TokenizerConfig::default())
                    })
                    .unwrap();
                ctx.search("boost").len()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), 1);
    }
    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&cell.get().unwrap(), &cell.get().unwrap()));
}

#[test]
fn failed_build_leaves_cell_empty() {
    let cell = IndexCell::new();
    let err = cell.get_or_try_init(|| IndexContext::open("/missing/raw.txt", &TokenizerConfig::default()));
    assert!(err.is_err());
    assert!(cell.get().is_none());
}

#[test]
fn sealed_index_is_shared_across_query_threads() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("raw.txt");
    let mut text = String::new();
    for i in 0..100 {
        text.push_str(&format!("doc {i}\x03shared term number{i}\x03http://x/{i}.html\n"));
    }
    fs::write(&corpus, text).unwrap();
    let ctx = Arc::new(IndexContext::open(&corpus, &TokenizerConfig::default()).unwrap());
    assert_eq!(ctx.stats().num_docs, 100);

    let expected = ctx.search("shared");
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ctx = ctx.clone();
            thread::spawn(move || ctx.search("shared"))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
    assert_eq!(expected.len(), 100);
}
