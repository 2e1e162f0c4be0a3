//! Exact-match keys.

use sha2::{Digest, Sha256};

pub(crate) use netfeas_core::normalize_text;
use netfeas_core::AddressInput;

/// Stable exact-match key for an address.
///
/// SHA-256 over the normalized `province || commune || quarter || way`.
/// Zone and capacity are not part of the key. Hex-encoded.
pub(crate) fn record_key(input: &AddressInput) -> String {
    let key = format!(
        "{}\x00{}\x00{}\x00{}",
        normalize_text(&input.province),
        normalize_text(&input.commune),
        normalize_text(&input.quarter),
        normalize_text(&input.way),
    );
    format!("{:x}", Sha256::digest(key.as_bytes()))
}
