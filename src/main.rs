use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, warn};

mod certificates;
mod columns;
mod constants;
mod domain;
mod error;
mod identity;
mod importer;
mod logging;
mod normalize;
mod storage;

use crate::certificates::DriveMap;
use crate::error::{ImportError, Result};
use crate::importer::Importer;
use crate::storage::{InMemoryStorage, Storage};

#[derive(Parser)]
#[command(name = "member-import")]
#[command(about = "Membership registration CSV import and reconciliation")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import members data from a registration CSV
    ImportMembers {
        /// Path to the CSV file
        csv_file: PathBuf,
        /// Specify that the CSV file has data for minors
        #[arg(long)]
        minors: bool,
        /// Path to CSV file mapping shared-drive file ids to downloaded file paths
        #[arg(long)]
        drive_map_csv: Option<PathBuf>,
        /// Path of parent directory containing downloaded data
        #[arg(long)]
        download_path: Option<PathBuf>,
    },
}

fn build_drive_map(
    drive_map_csv: Option<PathBuf>,
    download_path: Option<PathBuf>,
) -> Result<DriveMap> {
    match (drive_map_csv, download_path) {
        (None, None) => {
            warn!("Not uploading any media files");
            println!("Not uploading any media files.");
            Ok(DriveMap::empty())
        }
        (Some(map_csv), Some(download_path)) => DriveMap::load(&map_csv, &download_path),
        _ => Err(ImportError::Precondition(
            "Please set both --drive-map-csv and --download-path.".to_string(),
        )),
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::ImportMembers {
            csv_file,
            minors,
            drive_map_csv,
            download_path,
        } => {
            let drive_map = match build_drive_map(drive_map_csv, download_path) {
                Ok(map) => map,
                Err(e) => {
                    error!("Cannot start import: {}", e);
                    println!("❌ {e}");
                    std::process::exit(1);
                }
            };

            let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
            let importer = Importer::new(storage, minors, drive_map);

            println!("📄 Importing members from {}...", csv_file.display());
            match importer.run(&csv_file).await {
                Ok(summary) => {
                    println!("\n📊 Import results:");
                    println!("   Total rows: {}", summary.total_rows);
                    println!("   Imported: {}", summary.imported);
                    println!("   Imported without media: {}", summary.imported_without_media);
                    println!("   Skipped: {}", summary.skipped);
                    println!("   Failed: {}", summary.failed);
                }
                Err(e) => {
                    error!("Import failed: {}", e);
                    println!("❌ Import failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
