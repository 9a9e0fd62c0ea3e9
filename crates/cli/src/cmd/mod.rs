pub mod doctor;
pub mod ingest;
pub mod list;
pub mod purge;
pub mod reindex;
pub mod show;
pub mod sync;

use std::fmt::Display;
use std::path::Path;

use dropblog_core::config::ResolvedConfig;
use dropblog_core::config::loader::ConfigLoader;
use dropblog_core::store::Store;

use crate::logging;

/// Load the configuration and install logging, or exit with status 1.
pub fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => fail("Error loading config", e),
    };
    logging::init(&rc);
    rc
}

/// Open the profile's store, creating its directory if needed.
pub fn open_store(rc: &ResolvedConfig) -> Store {
    if let Some(parent) = rc.database.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            fail("Error creating database directory", e);
        }
    }
    match Store::open(&rc.database) {
        Ok(store) => store,
        Err(e) => fail("Error opening store", e),
    }
}

/// Close the store at the end of a command, flushing the write-ahead log.
pub fn close_store(store: Store) {
    if let Err(e) = store.close() {
        fail("Error closing store", e);
    }
}

pub fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("{}: {}", context, err);
    logging::shutdown();
    std::process::exit(1);
}
