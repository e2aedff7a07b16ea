use hmac::{Hmac, Mac};
use rand::rngs::ThreadRng;
use rand::Rng;
use sha2::{Digest, Sha256};

// Seeded stream: HMAC-SHA256(seed, "wheelpick:<block>") -> 4-byte chunks -> floats in [0,1)

pub type HmacSha256 = Hmac<Sha256>;

/// Source of uniform draws in `[0, 1)` used to pick spin targets.
pub trait SpinSource {
    fn next_unit(&mut self) -> f64;
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Maps successive big-endian 4-byte chunks to floats in `[0, 1)`.
/// Trailing bytes that do not fill a chunk are ignored.
pub fn derive_floats(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(4)
        .map(|chunk| {
            let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            f64::from(v) / (f64::from(u32::MAX) + 1.0)
        })
        .collect()
}

/// Operating-system backed randomness; the default for real spins.
#[derive(Debug)]
pub struct EntropySource {
    rng: ThreadRng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinSource for EntropySource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Reproducible stream of draws keyed by a seed string.
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: String,
    block: u64,
    buffer: Vec<f64>,
    cursor: usize,
}

impl SeededSource {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            block: 0,
            buffer: Vec::new(),
            cursor: 0,
        }
    }

    pub fn seed_fingerprint(&self) -> String {
        derive_hash_hex(self.seed.as_bytes())
    }

    fn block_bytes(&self) -> [u8; 32] {
        // HMAC takes keys of any length
        let mut mac = HmacSha256::new_from_slice(self.seed.as_bytes()).expect("HMAC key");
        mac.update(format!("wheelpick:{}", self.block).as_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }

    fn refill(&mut self) {
        self.buffer = derive_floats(&self.block_bytes());
        self.block += 1;
        self.cursor = 0;
    }
}

impl SpinSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        if self.cursor >= self.buffer.len() {
            self.refill();
        }
        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}

impl<S: SpinSource + ?Sized> SpinSource for Box<S> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
