//! Identifier and credential generation.
//!
//! User and complaint IDs share one process-wide counter, so every ID handed
//! out is unique across both stores. Complaint IDs carry a `C` prefix.

use rand::RngCore;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::SystemTime,
};
use tracing::warn;

const COMPLAINT_ID_PREFIX: &str = "C";
const SECRET_CODE_BYTES: usize = 8;
const FALLBACK_CODE_PREFIX: &str = "SC";

#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next decimal ID. Strictly increasing, gap-free under concurrent callers.
    pub fn next_id(&self) -> String {
        let value = self.counter.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        value.to_string()
    }

    pub fn complaint_id(&self) -> String {
        format!("{COMPLAINT_ID_PREFIX}{}", self.next_id())
    }
}

/// Generate a fresh secret code from `rng`.
///
/// Codes are 16 uppercase hex characters. If the entropy source fails the
/// code falls back to a timestamp-derived value rather than failing the
/// request.
pub fn secret_code_from<R: RngCore>(rng: &mut R) -> String {
    let mut bytes = [0u8; SECRET_CODE_BYTES];
    match rng.try_fill_bytes(&mut bytes) {
        Ok(()) => hex::encode_upper(bytes),
        Err(err) => {
            warn!("entropy source failed, using timestamp secret code: {err}");
            format!("{FALLBACK_CODE_PREFIX}{}", unix_nanos())
        }
    }
}

fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use std::{collections::HashSet, sync::Arc, thread};

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy unavailable"))
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "2");
        assert_eq!(ids.complaint_id(), "C3");
        assert_eq!(ids.next_id(), "4");
    }

    #[test]
    fn concurrent_ids_are_unique_and_gap_free() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let Ok(batch) = handle.join() else {
                panic!("id worker panicked");
            };
            for id in batch {
                assert!(seen.insert(id), "duplicate id generated");
            }
        }

        assert_eq!(seen.len(), 2000);
        for n in 1..=2000u64 {
            assert!(seen.contains(&n.to_string()), "missing id {n}");
        }
    }

    #[test]
    fn secret_code_is_uppercase_hex() {
        let code = secret_code_from(&mut OsRng);
        assert_eq!(code.len(), SECRET_CODE_BYTES * 2);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[test]
    fn secret_codes_differ() {
        let codes: HashSet<_> = (0..100).map(|_| secret_code_from(&mut OsRng)).collect();
        assert_eq!(codes.len(), 100);
    }

    #[test]
    fn broken_entropy_falls_back_to_timestamp() {
        let code = secret_code_from(&mut BrokenRng);
        assert!(code.starts_with(FALLBACK_CODE_PREFIX));
        assert!(code[FALLBACK_CODE_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_digit()));
    }
}
