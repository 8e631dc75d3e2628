//! Bitcoin address format checks.

use sha2::{Digest, Sha256};

/// Decoded length of a Base58Check address: version byte, 20-byte hash,
/// 4-byte checksum.
const ADDRESS_LEN: usize = 25;
const CHECKSUM_LEN: usize = 4;

/// Check that `address` is a well-formed Base58Check bitcoin address.
///
/// Only the encoding and checksum are verified; the version byte is not
/// restricted to a particular network. The address is read as a base-58
/// number, so a decode shorter than 25 bytes is left-padded with zeros.
/// Dropping leading `1` digits therefore still passes.
pub fn check_bc(address: &str) -> bool {
    let Ok(decoded) = bs58::decode(address).into_vec() else {
        return false;
    };
    if decoded.is_empty() || decoded.len() > ADDRESS_LEN {
        return false;
    }

    let mut bytes = [0u8; ADDRESS_LEN];
    bytes[ADDRESS_LEN - decoded.len()..].copy_from_slice(&decoded);

    let (payload, checksum) = bytes.split_at(ADDRESS_LEN - CHECKSUM_LEN);
    let hash = Sha256::digest(Sha256::digest(payload));
    hash[..CHECKSUM_LEN] == *checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_addresses() {
        assert!(check_bc("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
        assert!(check_bc("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2"));
        assert!(check_bc("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"));
    }

    #[test]
    fn short_decode_is_zero_padded() {
        // Same number as 1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa, 24 bytes decoded
        assert!(check_bc("A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
        assert!(!check_bc("A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb"));
    }

    #[test]
    fn rejects_bad_checksum() {
        assert!(!check_bc("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb"));
        assert!(!check_bc("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN3"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(!check_bc(""));
        assert!(!check_bc("not an address"));
        // '0', 'O', 'I' and 'l' are outside the Base58 alphabet
        assert!(!check_bc("10OIl"));
        assert!(!check_bc(&"1".repeat(40)));
    }
}
