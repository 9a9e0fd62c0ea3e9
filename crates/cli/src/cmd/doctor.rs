use dropblog_core::config::loader::{ConfigLoader, default_config_path};
use dropblog_core::store::{SCHEMA_VERSION, Store};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc);
            println!("OK   dropblog doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("database: {}", rc.database.display());
            println!("published_dir: {}", rc.published_dir);
            println!("logging.level: {}", rc.logging.level);
            if let Some(file) = &rc.logging.file {
                println!("logging.file: {}", file.display());
            }
            if rc.database.exists() {
                match Store::open(&rc.database).and_then(Store::close) {
                    Ok(()) => println!("store: ok (schema v{})", SCHEMA_VERSION),
                    Err(e) => {
                        println!("store: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                println!("store: not created yet");
            }
        }
        Err(e) => {
            println!("FAIL dropblog doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
