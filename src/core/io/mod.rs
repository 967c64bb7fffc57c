//! File-facing collaborators: CSV data directories and backups

pub mod backup;
pub mod csv_codec;

pub use backup::{create_backup, BackupSummary};
pub use csv_codec::{export_dir, import_dir, ExportSummary, ImportSummary};
