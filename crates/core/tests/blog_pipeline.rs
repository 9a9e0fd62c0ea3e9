use chrono::{TimeZone, Utc};
use dropblog_core::article::{ArticleStore, FileMetadata, IndexBuilder};
use dropblog_core::ingest::EntryParser;
use dropblog_core::store::Store;
use tempfile::tempdir;

const OWNER: &str = "u@x.com";

fn file(path: &str, y: i32, m: u32, d: u32) -> FileMetadata {
    FileMetadata {
        path: path.into(),
        modified: Utc.with_ymd_and_hms(y, m, d, 8, 30, 0).unwrap(),
        rev: "r1".into(),
        mime_type: "text/markdown".into(),
        ..Default::default()
    }
}

fn ingest(store: &Store, parser: &EntryParser, path: &str, date: (i32, u32, u32), raw: &str) {
    let file = file(path, date.0, date.1, date.2);
    let article = parser.parse_owned(OWNER, file, raw.as_bytes());
    ArticleStore::new(store).save(&article).unwrap();
}

fn listing(store: &Store) -> String {
    ArticleStore::new(store)
        .load_index(OWNER)
        .unwrap()
        .iter()
        .map(|a| format!("{} | {} | {} | {}", a.timestamp, a.permalink, a.title, a.summary))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn ingest_and_index_most_recent_first() {
    let store = Store::open_in_memory().unwrap();
    let parser = EntryParser::new();

    ingest(&store, &parser, "/published/a.md", (2021, 1, 1), "Alpha post.");
    ingest(&store, &parser, "/published/b.md", (2021, 6, 1), "Beta post.");
    ingest(
        &store,
        &parser,
        "/published/old_notes.md",
        (2022, 1, 1),
        "<!--\n{\"title\": \"Old Notes\", \"created-at\": \"2019-05-05\"}\n-->\n\nNotes from 2019.",
    );

    let stats = IndexBuilder::new(&store).rebuild(OWNER).unwrap();
    assert_eq!(stats.indexed, 3);

    insta::assert_snapshot!(listing(&store), @r"
    1622505600 | b | b | Beta post.
    1609459200 | a | a | Alpha post.
    1557014400 | old-notes | Old Notes | Notes from 2019.
    ");
}

#[test]
fn index_entries_have_no_body_but_articles_do() {
    let store = Store::open_in_memory().unwrap();
    let parser = EntryParser::new();
    ingest(&store, &parser, "/published/a.md", (2021, 1, 1), "# Title\n\nBody <b>bold</b>.");
    IndexBuilder::new(&store).rebuild(OWNER).unwrap();

    let articles = ArticleStore::new(&store);
    let index = articles.load_index(OWNER).unwrap();
    assert!(index[0].content.is_empty());

    let full = articles.load(&index[0].id).unwrap();
    assert!(full.content.contains("<b>bold</b>"));
    assert_eq!(full.summary, "Body bold.");
}

#[test]
fn purge_then_reindex_leaves_empty_index() {
    let store = Store::open_in_memory().unwrap();
    let parser = EntryParser::new();
    ingest(&store, &parser, "/published/a.md", (2021, 1, 1), "A.");
    ingest(&store, &parser, "/published/b.md", (2021, 6, 1), "B.");

    let articles = ArticleStore::new(&store);
    assert_eq!(articles.delete_articles(OWNER).unwrap(), 2);
    IndexBuilder::new(&store).rebuild(OWNER).unwrap();
    assert!(articles.load_index(OWNER).unwrap().is_empty());
}

#[test]
fn file_store_persists_across_reopen() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("blog.db");

    {
        let store = Store::open(&db).unwrap();
        ingest(&store, &EntryParser::new(), "/published/a.md", (2021, 1, 1), "Kept.");
        IndexBuilder::new(&store).rebuild(OWNER).unwrap();
        store.close().unwrap();
    }

    let store = Store::open(&db).unwrap();
    let index = ArticleStore::new(&store).load_index(OWNER).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].summary, "Kept.");
}
