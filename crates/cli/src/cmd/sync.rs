use std::path::Path;

use dropblog_core::sync::Synchronizer;

use super::{close_store, fail, load_config, open_store};
use crate::SyncArgs;
use crate::local_source::LocalDirSource;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &SyncArgs) {
    let rc = load_config(config, profile);
    let source = match LocalDirSource::new(&args.dir) {
        Ok(source) => source,
        Err(e) => fail(&format!("Error opening {}", args.dir.display()), e),
    };
    let store = open_store(&rc);

    let stats = match Synchronizer::new(&store, &source)
        .with_published_dir(&rc.published_dir)
        .run(&args.owner.owner)
    {
        Ok(stats) => stats,
        Err(e) => fail("Sync failed", e),
    };
    close_store(store);

    println!("Synced {} from {}", args.owner.owner, args.dir.display());
    println!("  Saved:    {}", stats.saved);
    println!("  Deleted:  {}", stats.deleted);
    println!("  Skipped:  {}", stats.skipped);
    println!("  Indexed:  {}", stats.indexed);
}
