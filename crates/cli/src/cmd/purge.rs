use std::path::Path;

use dropblog_core::article::ArticleStore;

use super::{close_store, fail, load_config, open_store};
use crate::OwnerArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &OwnerArgs) {
    let rc = load_config(config, profile);
    let store = open_store(&rc);
    let articles = ArticleStore::new(&store);

    let removed = match articles.delete_articles(&args.owner) {
        Ok(n) => n,
        Err(e) => fail("Error deleting articles", e),
    };
    if let Err(e) = articles.delete_index(&args.owner) {
        fail("Error deleting index", e);
    }
    close_store(store);
    println!("Deleted {} article(s) of {}", removed, args.owner);
}
