//! Functions for printing store results to the console.

use std::path::PathBuf;
use tagvault::{FileSizeUnit, MetadataRecord};

/// One path per line, or `empty_message` when there is nothing to show.
pub fn print_paths(paths: &[PathBuf], empty_message: &str) {
    if paths.is_empty() {
        println!("{}", empty_message);
        return;
    }
    for path in paths {
        println!("{}", path.display());
    }
}

/// Prints a record with its cached attributes.
pub fn print_record_details(record: &MetadataRecord, unit: FileSizeUnit) {
    let tags: Vec<&str> = record.tags().iter().map(String::as_str).collect();
    let unknown = || "unknown".to_string();

    println!("----------------------------------------");
    println!("  Path:        {}", record.path().display());
    println!("  Status:      {}", if record.is_valid() { "present" } else { "INVALID (path no longer exists)" });
    println!("  Tags:        [{}]", tags.join(", "));
    println!("  Created:     {}", record.creation_time().unwrap_or_else(unknown));
    println!("  Modified:    {}", record.last_edit_time().unwrap_or_else(unknown));
    println!("  Size:        {}", record.file_size(unit).unwrap_or_else(unknown));
    println!("  Record file: {}", record.location().display());
    println!("----------------------------------------");
}
