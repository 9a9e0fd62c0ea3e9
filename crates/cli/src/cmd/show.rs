use std::path::Path;

use dropblog_core::article::{ArticleError, ArticleStore, generate_id};

use super::{close_store, fail, load_config, open_store};
use crate::ShowArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &ShowArgs) {
    let rc = load_config(config, profile);
    let store = open_store(&rc);

    let id = generate_id(&args.owner.owner, &args.path);
    let article = match ArticleStore::new(&store).load(&id) {
        Ok(article) => article,
        Err(ArticleError::NotFound(_)) => {
            eprintln!("No article at {} for {}", args.path, args.owner.owner);
            std::process::exit(1);
        }
        Err(e) => fail("Error loading article", e),
    };
    close_store(store);

    println!("title: {}", article.title);
    println!("permalink: {}", article.permalink);
    println!("created-at: {}", article.created_at);
    println!("timestamp: {}", article.timestamp);
    println!("summary: {}", article.summary);
    println!("path: {}", article.path());
    println!("rev: {}", article.file.rev);
    println!();
    println!("{}", article.content);
}
