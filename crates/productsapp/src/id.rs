//! Identifier generation.
//!
//! An id is the current Unix time in milliseconds followed by ten random
//! characters, both base-36 (`0-9a-z`). Ids are opaque: they are neither
//! guaranteed sortable nor checked against the existing collection.

use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_WIDTH: u32 = 10;

pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Time plus randomness. The default generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeRandomIds;

impl IdGenerator for TimeRandomIds {
    fn generate(&self) -> String {
        generate()
    }
}

/// Predictable ids (`{prefix}1`, `{prefix}2`, ...) for tests and fixtures.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

pub fn generate() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let random = rand::thread_rng().gen_range(0..36u64.pow(RANDOM_WIDTH));

    let mut id = to_base36(millis);
    id.push_str(&format!(
        "{:0>width$}",
        to_base36(random),
        width = RANDOM_WIDTH as usize
    ));
    id
}

pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
