//! Identifier generation.
//!
//! Player ids are unguessable random tokens; room codes are short
//! numeric strings players can read out loud. Neither is a security
//! boundary — this is a trust-the-client party game.

use imposter_protocol::{PlayerId, RoomCode};
use rand::Rng;

/// Generates a random 32-character hex player id (128 bits of entropy).
pub(crate) fn generate_player_id() -> PlayerId {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    PlayerId(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// Generates a 4-digit room code.
///
/// Uniqueness is the registry's job — it regenerates on collision.
pub(crate) fn generate_room_code() -> RoomCode {
    let mut rng = rand::rng();
    RoomCode(rng.random_range(1000..10_000).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_is_32_hex_chars() {
        let id = generate_player_id();
        assert_eq!(id.0.len(), 32);
        assert!(id.0.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_player_ids_are_unique() {
        let a = generate_player_id();
        let b = generate_player_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_room_code_is_four_digits() {
        for _ in 0..100 {
            let code = generate_room_code();
            assert_eq!(code.0.len(), 4);
            let n: u32 = code.0.parse().expect("numeric code");
            assert!((1000..10_000).contains(&n));
        }
    }
}
