//! Keyframe suffix generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use xxhash_rust::xxh3::xxh3_64;

static RUN_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A fresh `-xxxxxxxx` token for one rewrite run.
///
/// Every call hashes a fresh counter value, so two calls are unlikely to
/// return the same token, within a process or across processes.
pub fn generate_keyframe_suffix(seed: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let counter = RUN_COUNTER.fetch_add(1, Ordering::Relaxed);
    let material = format!("{}:{}:{}:{}", seed, std::process::id(), nanos, counter);
    format!("-{:08x}", xxh3_64(material.as_bytes()) as u32)
}
