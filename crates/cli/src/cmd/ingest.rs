//! Ingest command: one local file, as if the sync service had delivered it.

use std::path::Path;

use chrono::{DateTime, Utc};
use dropblog_core::article::{ArticleStore, FileMetadata, IndexBuilder};
use dropblog_core::ingest::EntryParser;

use super::{close_store, fail, load_config, open_store};
use crate::IngestArgs;
use crate::local_source::{content_rev, human_size};

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &IngestArgs) {
    let rc = load_config(config, profile);

    let raw = match std::fs::read(&args.file) {
        Ok(raw) => raw,
        Err(e) => fail(&format!("Error reading {}", args.file.display()), e),
    };
    let modified: DateTime<Utc> = match std::fs::metadata(&args.file).and_then(|m| m.modified()) {
        Ok(t) => t.into(),
        Err(e) => fail(&format!("Error reading {}", args.file.display()), e),
    };

    let path = args.path.clone().unwrap_or_else(|| {
        let name =
            args.file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        format!("{}{}", rc.published_dir, name)
    });

    let file = FileMetadata {
        path,
        modified,
        rev: content_rev(&raw),
        size: human_size(raw.len() as u64),
        bytes: raw.len() as u64,
        mime_type: "text/markdown".to_string(),
        ..Default::default()
    };

    let store = open_store(&rc);
    let parser = EntryParser::new().with_published_dir(&rc.published_dir);
    let article = parser.parse_owned(&args.owner.owner, file, &raw);
    if let Err(e) = ArticleStore::new(&store).save(&article) {
        fail("Error saving article", e);
    }
    if let Err(e) = IndexBuilder::new(&store).rebuild(&args.owner.owner) {
        fail("Error during indexing", e);
    }
    close_store(store);

    println!("Ingested {}", article.id);
    println!("  title:     {}", article.title);
    println!("  permalink: {}", article.permalink);
    println!("  created:   {}", article.created_at);
}
