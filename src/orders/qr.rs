use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Pickup QR token generation and verification.
///
/// The stored hash is the SHA-256 hex digest of the order id, customer id and
/// a creation timestamp. The hash itself is the token; the preimage is never
/// needed again.
pub struct QrCode;

impl QrCode {
    /// Generate the pickup token for a new order. A nanosecond timestamp in
    /// the preimage keeps tokens distinct even for identical order fields.
    pub fn generate_hash(order_id: Uuid, customer_id: Uuid) -> String {
        let timestamp = Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        let preimage = format!("{}-{}-{}", order_id, customer_id, timestamp);

        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Compare a presented token against the stored hash without early exit,
    /// so mismatch position does not leak through timing.
    pub fn verify(candidate: &str, stored: &str) -> bool {
        let a = candidate.as_bytes();
        let b = stored.as_bytes();
        if a.len() != b.len() {
            return false;
        }

        let mut diff = 0u8;
        for (x, y) in a.iter().zip(b.iter()) {
            diff |= x ^ y;
        }
        diff == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = QrCode::generate_hash(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_same_order_yields_distinct_tokens() {
        let order_id = Uuid::new_v4();
        let customer_id = Uuid::new_v4();
        let first = QrCode::generate_hash(order_id, customer_id);
        let second = QrCode::generate_hash(order_id, customer_id);
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_accepts_exact_match() {
        let hash = QrCode::generate_hash(Uuid::new_v4(), Uuid::new_v4());
        assert!(QrCode::verify(&hash, &hash));
    }

    #[test]
    fn test_verify_rejects_mismatch() {
        let stored = QrCode::generate_hash(Uuid::new_v4(), Uuid::new_v4());
        let other = QrCode::generate_hash(Uuid::new_v4(), Uuid::new_v4());
        assert!(!QrCode::verify(&other, &stored));
        assert!(!QrCode::verify("", &stored));
        assert!(!QrCode::verify(&stored[..63], &stored));
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let stored = QrCode::generate_hash(Uuid::new_v4(), Uuid::new_v4());
        let upper = stored.to_uppercase();
        if upper != stored {
            assert!(!QrCode::verify(&upper, &stored));
        }
    }
}
