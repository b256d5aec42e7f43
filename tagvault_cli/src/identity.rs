//! Hardware identity of the machine the CLI runs on.

use std::fs;
use tagvault::identity::{IdentityError, IdentityProvider};

/// Files holding the systemd / D-Bus machine id, in lookup order.
const MACHINE_ID_FILES: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

/// Reads the machine id, falling back to the hostname where none is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachineIdentity;

impl IdentityProvider for MachineIdentity {
    fn hardware_id(&self) -> Result<String, IdentityError> {
        for source in MACHINE_ID_FILES {
            if let Ok(raw) = fs::read_to_string(source) {
                let id = raw.trim();
                if !id.is_empty() {
                    return Ok(id.to_string());
                }
            }
        }
        hostname_identity()
    }
}

fn hostname_identity() -> Result<String, IdentityError> {
    let host = hostname::get().map_err(|e| IdentityError::Unavailable(e.to_string()))?;
    let host = host.to_string_lossy().trim().to_string();
    if host.is_empty() {
        return Err(IdentityError::Unavailable("hostname is empty".to_string()));
    }
    Ok(host)
}
