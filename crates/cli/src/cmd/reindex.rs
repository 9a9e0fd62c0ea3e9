//! Reindex command implementation.

use std::path::Path;

use dropblog_core::article::IndexBuilder;

use super::{close_store, fail, load_config, open_store};
use crate::OwnerArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &OwnerArgs) {
    let rc = load_config(config, profile);
    let store = open_store(&rc);

    println!("Reindexing articles of {}", args.owner);
    let result = IndexBuilder::new(&store).rebuild(&args.owner);
    close_store(store);

    match result {
        Ok(stats) => {
            println!();
            println!("Indexing complete:");
            println!("  Articles found:    {}", stats.scanned);
            println!("  Articles indexed:  {}", stats.indexed);
            if stats.collapsed > 0 {
                println!("  Same date and permalink (collapsed): {}", stats.collapsed);
            }
            if stats.skipped > 0 {
                println!("  Unreadable (skipped): {}", stats.skipped);
            }
            println!("  Duration:          {}ms", stats.duration_ms);
        }
        Err(e) => fail("Error during indexing", e),
    }
}
