/// LTO Event Chain: Hashing and Identifiers
///
/// Deterministic SHA-256 hashing of events and identifier derivation.
///
/// Rules:
///   - Event hash input is canonical JSON with fixed field order:
///     body, timestamp, previous
///   - UTF-8 JSON, no whitespace
///   - All hashes and identifiers are lowercase hex
///
/// Identifier layout (33 bytes raw, 66 hex characters):
///   [type: 1][nonce: 8][namespace hash: 20][checksum: 4]

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::ChainError;
use crate::event::EventBody;

/// Type byte of an event chain identifier.
pub const CHAIN_ID_TYPE: u8 = 0x40;

/// Type byte of a resource identifier.
pub const RESOURCE_ID_TYPE: u8 = 0x50;

const NONCE_LEN: usize = 8;
const NS_HASH_LEN: usize = 20;
const CHECKSUM_LEN: usize = 4;

/// Raw SHA-256 digest.
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

/// SHA-256 as a lowercase hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    to_hex(&sha256(bytes))
}

/// Lowercase hex encoding.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Canonical serialization of an event's hashed content.
pub fn canonical_event_bytes(body: &EventBody, previous: &str) -> Result<Vec<u8>, ChainError> {
    let mut root = Map::new();
    root.insert("body".to_string(), body.data.clone());
    root.insert("timestamp".to_string(), Value::Number(body.timestamp.into()));
    root.insert("previous".to_string(), Value::String(previous.to_string()));

    let json = serde_json::to_string(&Value::Object(root))?;
    Ok(json.into_bytes())
}

/// Hash of an event linked to `previous`.
pub fn event_hash(body: &EventBody, previous: &str) -> Result<String, ChainError> {
    let bytes = canonical_event_bytes(body, previous)?;
    Ok(sha256_hex(&bytes))
}

/// Build an identifier of the given type.
///
/// `nonce_seed` is hashed into the 8-byte nonce, `namespace` into the
/// 20-byte namespace hash. Same inputs always give the same identifier.
pub fn build_id(id_type: u8, nonce_seed: &[u8], namespace: &[u8]) -> String {
    let nonce = sha256(nonce_seed);
    let ns_hash = sha256(namespace);

    let mut raw = Vec::with_capacity(1 + NONCE_LEN + NS_HASH_LEN + CHECKSUM_LEN);
    raw.push(id_type);
    raw.extend_from_slice(&nonce[..NONCE_LEN]);
    raw.extend_from_slice(&ns_hash[..NS_HASH_LEN]);

    let checksum = sha256(&raw);
    raw.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    to_hex(&raw)
}

/// Check an identifier's type byte, length and checksum.
pub fn verify_id(id: &str, id_type: u8) -> bool {
    let Some(raw) = from_hex(id) else {
        return false;
    };
    if raw.len() != 1 + NONCE_LEN + NS_HASH_LEN + CHECKSUM_LEN || raw[0] != id_type {
        return false;
    }

    let (payload, checksum) = raw.split_at(raw.len() - CHECKSUM_LEN);
    sha256(payload)[..CHECKSUM_LEN] == *checksum
}

fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| s.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}
