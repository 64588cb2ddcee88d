use tracing::info;

use dbkeep::config;
use dbkeep::core::db;
use dbkeep::logging;

fn main() {
    // Initialize the logging system (console plus daily log file)
    if let Err(e) = logging::init("logs") {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting dbkeep...");

    // Database path comes from the first CLI argument, falling back to the
    // configured default
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(config::default_database_path);

    if let Err(e) = db::ensure_database(&db_path) {
        eprintln!(
            "Error creating database {}: {}, check logs for more information",
            db_path, e
        );
        std::process::exit(1);
    }

    if let Err(e) = db::open_connection(&db_path) {
        eprintln!(
            "Error connecting to database {}: {}, check logs for more information",
            db_path, e
        );
        std::process::exit(1);
    }

    if let Err(e) = db::close_connection() {
        eprintln!("Error closing database connection: {}", e);
        std::process::exit(1);
    }
}
