#![forbid(unsafe_code)]

use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use tm_core::ViewResult;

/// SHA-256 of the view's JSON encoding, lower-case hex.
///
/// Field order is fixed by the type definitions, so equal views hash equally.
pub(crate) fn view_fingerprint(view: &ViewResult) -> Result<String, serde_json::Error> {
    let body = serde_json::to_vec(view)?;
    let mut hasher = Sha256::new();
    hasher.update(&body);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest {
        let _ = write!(&mut out, "{:02x}", b);
    }
    Ok(out)
}
