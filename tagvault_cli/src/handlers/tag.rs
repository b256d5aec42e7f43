use std::path::Path;
use tagvault::{Store, TagMode};
use crate::errors::CliError;

/// Adds or removes tags on one file or directory.
pub fn handle_tag(store: &mut Store, path: &Path, mode: TagMode, tags: &[String]) -> Result<(), CliError> {
    store.tag(path, mode, tags)?;
    match mode {
        TagMode::Add => println!("Tags [{}] added to '{}'.", tags.join(", "), path.display()),
        TagMode::Remove => println!("Tags [{}] removed from '{}'.", tags.join(", "), path.display()),
    }
    Ok(())
}
