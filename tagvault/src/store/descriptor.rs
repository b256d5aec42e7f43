use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Persisted binding between a tracked directory and the identifier naming its record file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirDescriptor {
    pub dirpath: PathBuf,
    pub dir_uuid: Uuid,
}

impl DirDescriptor {
    /// Allocates a descriptor with a fresh random identifier.
    pub fn generate(dirpath: PathBuf) -> Self {
        Self {
            dirpath,
            dir_uuid: Uuid::new_v4(),
        }
    }
}

/// Parses the descriptor list.
///
/// The document must be a JSON array; individual elements that are not valid descriptors
/// are skipped with a warning so one bad entry does not discard the rest.
pub(crate) fn parse_descriptor_list(data: &[u8]) -> Result<Vec<DirDescriptor>, serde_json::Error> {
    let items: Vec<serde_json::Value> = serde_json::from_slice(data)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<DirDescriptor>(item.clone()) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!("Unable to build a folder entry from descriptor {}: {}", item, e);
                None
            }
        })
        .collect())
}

/// Serializes the descriptor list.
///
/// JSON strings cannot hold a path that is not valid UTF-8. Such directories are left out
/// with a warning so the rest of the list is still written.
pub(crate) fn encode_descriptor_list(descriptors: &[&DirDescriptor]) -> Result<Vec<u8>, serde_json::Error> {
    let encodable: Vec<&DirDescriptor> = descriptors
        .iter()
        .copied()
        .filter(|d| {
            let ok = d.dirpath.to_str().is_some();
            if !ok {
                warn!(
                    "Directory '{}' has a non UTF-8 path and is left out of the descriptor list",
                    d.dirpath.display()
                );
            }
            ok
        })
        .collect();
    serde_json::to_vec_pretty(&encodable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_wire_format() {
        let descriptor = DirDescriptor {
            dirpath: PathBuf::from("/d"),
            dir_uuid: Uuid::nil(),
        };
        let json: serde_json::Value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["dirpath"], "/d");
        assert_eq!(json["dir_uuid"], "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_generate_never_repeats() {
        let a = DirDescriptor::generate(PathBuf::from("/d"));
        let b = DirDescriptor::generate(PathBuf::from("/d"));
        assert_ne!(a.dir_uuid, b.dir_uuid);
    }

    #[test]
    fn test_parse_skips_bad_entries() {
        let data = br#"[
            {"dirpath": "/a", "dir_uuid": "67e55044-10b1-426f-9247-bb680e5fe0c8"},
            {"dirpath": "/b"},
            {"dirpath": "/c", "dir_uuid": "not-a-uuid"}
        ]"#;
        let parsed = parse_descriptor_list(data).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].dirpath, PathBuf::from("/a"));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_descriptor_list(br#"{"dirpath": "/a"}"#).is_err());
        assert!(parse_descriptor_list(b"not json").is_err());
    }

    #[test]
    fn test_encode_roundtrips_through_parse() {
        let a = DirDescriptor::generate(PathBuf::from("/a"));
        let b = DirDescriptor::generate(PathBuf::from("/b"));
        let encoded = encode_descriptor_list(&[&a, &b]).unwrap();
        assert_eq!(parse_descriptor_list(&encoded).unwrap(), vec![a, b]);
    }

    #[cfg(unix)]
    #[test]
    fn test_encode_skips_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let good = DirDescriptor::generate(PathBuf::from("/good"));
        let bad = DirDescriptor::generate(PathBuf::from(OsStr::from_bytes(b"/bad\xff")));

        let encoded = encode_descriptor_list(&[&good, &bad]).unwrap();
        assert_eq!(parse_descriptor_list(&encoded).unwrap(), vec![good]);
    }
}
