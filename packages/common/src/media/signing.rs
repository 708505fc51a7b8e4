use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

/// Sign a set of upload parameters with the CDN API secret.
///
/// The string to sign is the `key=value` pairs joined with `&` in ascending
/// key order, with the secret appended. The signature is the lowercase hex
/// SHA-256 of that string. Both the server (signing endpoint, asset destroy)
/// and the CDN must derive the identical string, so the ordering is load
/// bearing — `BTreeMap` keeps it canonical.
pub fn sign_params(params: &BTreeMap<String, String>, api_secret: &str) -> String {
    let joined = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let hash = Sha256::digest(format!("{joined}{api_secret}"));
    hex::encode(hash)
}
