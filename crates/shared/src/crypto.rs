//! Session key encoding and random token generation.

use rand::RngCore;

/// Number of random bytes in a game token.
pub const GAME_TOKEN_BYTES: usize = 16;

/// Number of bytes in an SRP6 session key.
pub const SESSION_KEY_BYTES: usize = 40;

/// Encodes raw session key bytes the way they are stored in the accounts table.
pub fn session_key_hex(session_key: &[u8]) -> String {
    hex::encode_upper(session_key)
}

/// Generates a new game token as upper-case hex.
pub fn generate_game_token() -> String {
    let mut bytes = [0u8; GAME_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode_upper(bytes)
}

/// Generates a random session key.
///
/// Normally the key comes out of the SRP6 exchange; this is used by
/// operator tooling to invalidate an existing session.
pub fn generate_session_key() -> Vec<u8> {
    let mut bytes = vec![0u8; SESSION_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}
