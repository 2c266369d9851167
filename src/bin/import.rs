//! Standalone batch import: `kundebok-import <file-path> [limit]`.
//!
//! Talks straight to the persistence client; no session is resolved. Rows go
//! into the first workspace in the store.

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kundebok::db::Database;
use kundebok::import::{run_import, DEFAULT_LIMIT};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kundebok=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(file) = args.next() else {
        eprintln!("Usage: kundebok-import <file-path> [limit]");
        process::exit(1);
    };
    let limit = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("limit must be a number, got {:?}", raw))?,
        None => DEFAULT_LIMIT,
    };

    let db = Database::open()?;
    let imported = run_import(&db, Path::new(&file), limit)?;

    println!("Imported {} businesses", imported);
    Ok(())
}
