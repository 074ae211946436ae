use log::{error, info};
use std::fs;
use std::path::Path;
use std::process;

/// Directories that must exist before the server starts.
const REQUIRED_DIRS: &[&str] = &["website", "website/db"];

/// Run boot checks before Rocket launches: create missing directories and
/// abort if the filesystem is unusable.
pub fn run() {
    info!("Folio boot check starting...");

    let mut errors = 0u32;

    for dir in REQUIRED_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    if errors > 0 {
        error!("Boot check failed with {} error(s), aborting.", errors);
        process::exit(1);
    }

    info!("Boot check passed.");
}
