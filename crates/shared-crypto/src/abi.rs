//! # ABI Word Encoding
//!
//! Minimal Solidity ABI encoder for the static and `bytes`/`string` layouts
//! the market hashes into Merkle leaves and identifiers.
//!
//! Every static value occupies one 32-byte big-endian word. Dynamic values
//! put an offset word in the head and `length || data (zero-padded)` in the
//! tail.

use shared_types::{Address, Hash, U256};

/// Size of an ABI word.
pub const WORD: usize = 32;

/// A value to encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Any static 32-byte value (uint, int, address, bytes32)
    Word(Hash),
    /// Dynamic `bytes` or `string`
    Bytes(Vec<u8>),
}

/// `abi.encode(tokens...)`.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Word(word) => head.extend_from_slice(word),
            Token::Bytes(data) => {
                head.extend_from_slice(&word_from_u64((head_len + tail.len()) as u64));
                tail.extend_from_slice(&word_from_u64(data.len() as u64));
                tail.extend_from_slice(data);
                let padding = (WORD - data.len() % WORD) % WORD;
                tail.resize(tail.len() + padding, 0);
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

// =============================================================================
// WORD CONSTRUCTORS
// =============================================================================

/// Unsigned integer as a word.
pub fn word_from_u64(value: u64) -> Hash {
    let mut word = [0u8; WORD];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// 256-bit unsigned integer as a word.
pub fn word_from_u256(value: U256) -> Hash {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

/// Address left-padded to a word.
pub fn word_from_address(address: &Address) -> Hash {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address);
    word
}

/// Signed integer, sign-extended to a word.
pub fn word_from_i128(value: i128) -> Hash {
    let fill = if value < 0 { 0xFF } else { 0x00 };
    let mut word = [fill; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

// =============================================================================
// WORD DECODERS
// =============================================================================

/// Word as a 256-bit unsigned integer.
pub fn u256_from_word(word: &[u8]) -> U256 {
    U256::from_big_endian(word)
}

/// Word as an address; `None` if the upper 12 bytes are not zero.
pub fn address_from_word(word: &[u8]) -> Option<Address> {
    if word.len() != WORD || word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&word[12..]);
    Some(address)
}

/// Word as a `u64`; `None` if it does not fit.
pub fn u64_from_word(word: &[u8]) -> Option<u64> {
    if word.len() != WORD || word[..24].iter().any(|b| *b != 0) {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&word[24..]);
    Some(u64::from_be_bytes(bytes))
}

/// Word as a sign-extended `i128`; `None` if it does not fit.
pub fn i128_from_word(word: &[u8]) -> Option<i128> {
    if word.len() != WORD {
        return None;
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&word[16..]);
    let value = i128::from_be_bytes(bytes);
    let fill = if value < 0 { 0xFF } else { 0x00 };
    if word[..16].iter().all(|b| *b == fill) {
        Some(value)
    } else {
        None
    }
}
