//! Persistence of the record store as a delimited text file.
//!
//! - `codec`: pure line-level serialization and parsing
//! - `files`: save/load/import/export plus backup and restore

pub mod codec;
pub mod files;

pub use codec::{format_record, parse_record_line, serialize_store, HEADER};
pub use files::{
    create_backup, create_backup_at, export_to_file, file_exists, import_from_file,
    is_valid_format, load_data, restore_from, restore_from_backup, save_data, LoadSummary,
    BACKUP_FILE, DEFAULT_DATA_FILE,
};
