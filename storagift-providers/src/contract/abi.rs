//! Minimal ABI encoding for the storage registry.
//!
//! The registry only needs two call shapes: a `price` read and a `rent`
//! write, both taking 256-bit words. Hand-rolling the encoding keeps the
//! dependency surface flat; selectors are fixed by the contract ABI and
//! recorded here with their Solidity signatures.

use super::error::ContractError;

/// Selector for `rent(uint256 fid, uint256 units)`.
pub const RENT_SELECTOR: [u8; 4] = [0x78, 0x3a, 0x11, 0x2b];

/// Selector for `price(uint256 units)`.
pub const PRICE_SELECTOR: [u8; 4] = [0x26, 0xa4, 0x9e, 0x37];

/// Encodes a value as a left-padded 256-bit big-endian word.
pub fn encode_u256(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encodes a call: 4-byte selector followed by 32-byte words.
pub fn encode_call(selector: [u8; 4], args: &[[u8; 32]]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * 32);
    data.extend_from_slice(&selector);
    for arg in args {
        data.extend_from_slice(arg);
    }
    data
}

/// Calldata for `rent(fid, units)` — the gift write call.
pub fn rent_calldata(fid: u64, units: u64) -> Vec<u8> {
    encode_call(
        RENT_SELECTOR,
        &[encode_u256(u128::from(fid)), encode_u256(u128::from(units))],
    )
}

/// Calldata for `price(units)` — the rent-price read call.
pub fn price_calldata(units: u64) -> Vec<u8> {
    encode_call(PRICE_SELECTOR, &[encode_u256(u128::from(units))])
}

/// Renders bytes as 0x-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Decodes a single returned 256-bit word into a `u128`.
///
/// Values above `u128::MAX` are rejected; wei amounts never get near that.
pub fn decode_u256_word(hex: &str) -> Result<u128, ContractError> {
    let stripped = hex.strip_prefix("0x").unwrap_or(hex);
    if stripped.is_empty() {
        return Err(ContractError::Decode("empty return data".to_string()));
    }
    if stripped.len() > 64 {
        return Err(ContractError::Decode(format!(
            "expected a single word, got {} hex chars",
            stripped.len()
        )));
    }

    let padded = format!("{stripped:0>64}");
    let (high, low) = padded.split_at(32);
    let high = u128::from_str_radix(high, 16)
        .map_err(|e| ContractError::Decode(format!("bad hex: {e}")))?;
    if high != 0 {
        return Err(ContractError::Decode(
            "value exceeds 128 bits".to_string(),
        ));
    }
    u128::from_str_radix(low, 16).map_err(|e| ContractError::Decode(format!("bad hex: {e}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_u256_pads_left() {
        let word = encode_u256(1);
        assert_eq!(word[31], 1);
        assert!(word[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rent_calldata_layout() {
        let data = rent_calldata(16098, 1);
        // Selector plus two words.
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data[..4], &RENT_SELECTOR);
        // fid = 16098 = 0x3ee2 in the tail of the first word
        assert_eq!(&data[34..36], &[0x3e, 0xe2]);
        // units = 1 in the tail of the second word
        assert_eq!(data[67], 1);
    }

    #[test]
    fn test_price_calldata_layout() {
        let data = price_calldata(3);
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], &PRICE_SELECTOR);
        assert_eq!(data[35], 3);
    }

    #[test]
    fn test_hex_round_trip() {
        let data = rent_calldata(1, 1);
        let hex = to_hex(&data);
        assert!(hex.starts_with("0x783a112b"));
        assert_eq!(hex.len(), 2 + data.len() * 2);
    }

    #[test]
    fn test_decode_u256_word() {
        assert_eq!(decode_u256_word("0x0").unwrap(), 0);
        assert_eq!(decode_u256_word("0x3ee2").unwrap(), 0x3ee2);
        assert_eq!(
            decode_u256_word("0x0000000000000000000000000000000000000000000000000004aa2aa2971000")
                .unwrap(),
            1_313_000_000_000_000
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_u256_word("").is_err());
        assert!(decode_u256_word("0xzz").is_err());
        // Two words is not a single word
        let two_words = format!("0x{}", "00".repeat(64));
        assert!(decode_u256_word(&two_words).is_err());
    }
}
