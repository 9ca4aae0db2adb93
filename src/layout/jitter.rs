// Deterministic per-profile jitter.
//
// Outer rings get crowded, so every node is nudged by a small amount derived
// from its id. The hash is 64-bit FNV-1a over the id's UTF-8 bytes, which is
// fixed across platforms and runs: the same id always lands in the same
// spot without storing anything.

use crate::profile::ProfileId;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
pub fn stable_hash(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Map 16 bits of the hash to [-1, 1].
fn unit(bits: u64) -> f64 {
    (bits & 0xFFFF) as f64 / 65535.0 * 2.0 - 1.0
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Jitter {
    /// Added to the ring's base radius.
    pub radius: f64,
    /// Added to the node's angle, in radians.
    pub angle: f64,
}

impl Jitter {
    /// Jitter for `id`, scaled to `±radius_scale` and `±angle_scale`.
    pub fn for_id(id: &ProfileId, radius_scale: f64, angle_scale: f64) -> Self {
        let h = stable_hash(id.as_str().as_bytes());
        Self {
            radius: unit(h) * radius_scale,
            angle: unit(h >> 16) * angle_scale,
        }
    }
}
