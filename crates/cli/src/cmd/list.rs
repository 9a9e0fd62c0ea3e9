//! List command implementation.

use std::path::Path;

use dropblog_core::article::{Article, ArticleStore};
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use super::{close_store, fail, load_config, open_store};
use crate::ListArgs;

#[derive(Tabled)]
struct ArticleRow {
    #[tabled(rename = "Date")]
    created_at: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Permalink")]
    permalink: String,
    #[tabled(rename = "Path")]
    path: String,
}

/// Index entry for JSON output.
#[derive(Debug, Serialize)]
struct ArticleOutput<'a> {
    id: &'a str,
    title: &'a str,
    permalink: &'a str,
    created_at: &'a str,
    timestamp: &'a str,
    summary: &'a str,
    path: &'a str,
}

impl<'a> From<&'a Article> for ArticleOutput<'a> {
    fn from(a: &'a Article) -> Self {
        Self {
            id: &a.id,
            title: &a.title,
            permalink: &a.permalink,
            created_at: &a.created_at,
            timestamp: &a.timestamp,
            summary: &a.summary,
            path: a.path(),
        }
    }
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &ListArgs) {
    let rc = load_config(config, profile);
    let store = open_store(&rc);

    let index = match ArticleStore::new(&store).load_index(&args.owner.owner) {
        Ok(index) => index,
        Err(e) => fail("Error loading index", e),
    };

    close_store(store);

    if args.json {
        print_json(&index);
    } else {
        print_table(&index);
    }
}

fn print_table(index: &[Article]) {
    if index.is_empty() {
        println!("(no articles)");
        return;
    }

    let rows: Vec<ArticleRow> = index
        .iter()
        .map(|a| ArticleRow {
            created_at: a.created_at.clone(),
            title: a.title.clone(),
            permalink: a.permalink.clone(),
            path: a.path().to_string(),
        })
        .collect();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("{} article(s)", index.len());
}

fn print_json(index: &[Article]) {
    let output: Vec<ArticleOutput<'_>> = index.iter().map(ArticleOutput::from).collect();
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => fail("Error serializing index", e),
    }
}
