//! Content fingerprint of a compiler argument list.
//!
//! Two computations for the same project and target must produce identical
//! argument lists; comparing fingerprints checks that cheaply.

use sha2::{Digest, Sha256};

/// SHA-256 of the ordered arguments, as lowercase hex.
pub fn fingerprint(args: &[String]) -> String {
    let mut hasher = Sha256::new();
    for arg in args {
        hasher.update(arg.as_bytes());
        hasher.update([0u8]);
    }
    let digest: [u8; 32] = hasher.finalize().into();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
