//! Canonical address handling for the tracked Jupiter programs.

/* Jupiter v6 swap router */
pub const JUPITER_SWAP: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";
/* Jupiter limit-order program */
pub const JUPITER_LIMIT_ORDER: &str = "jupoNjAxXgZ4rjzxzPMP4oxduvQsQtZzyknqvzYNrNu";
/* Jupiter dollar-cost-average program */
pub const JUPITER_DCA: &str = "DCA265Vj8a9CEuX1eb1LWRnDT7uK6q1xMipnNyatn23M";

/// Base58 rendering of a raw account key. An empty key normalizes to
/// absent rather than to the empty string.
pub fn normalize_key(input: &[u8]) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    Some(bs58::encode(input).into_string())
}

/// `0x`-prefixed hex rendering, the second address convention on the wire.
pub fn address_pretty(input: &[u8]) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    Some(format!("0x{}", hex::encode(input)))
}

/// Already-canonical addresses pass through untouched; empty is absent.
pub fn normalize_str(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    Some(input.to_string())
}

/// Exact, case-sensitive membership in the tracked program set.
pub fn is_known_program(address: &str) -> bool {
    address == JUPITER_SWAP || address == JUPITER_LIMIT_ORDER || address == JUPITER_DCA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_key_round_trips_program_id() {
        let raw = bs58::decode(JUPITER_SWAP).into_vec().unwrap();
        assert_eq!(normalize_key(&raw), Some(JUPITER_SWAP.to_string()));
    }

    #[test]
    fn empty_inputs_are_absent() {
        assert_eq!(normalize_key(&[]), None);
        assert_eq!(address_pretty(&[]), None);
        assert_eq!(normalize_str(""), None);
    }

    #[test]
    fn membership_is_exact_and_case_sensitive() {
        assert!(is_known_program(JUPITER_SWAP));
        assert!(is_known_program(JUPITER_LIMIT_ORDER));
        assert!(is_known_program(JUPITER_DCA));
        assert!(!is_known_program(""));
        assert!(!is_known_program(&JUPITER_SWAP.to_lowercase()));
        assert!(!is_known_program(&JUPITER_SWAP[..10]));
    }

    #[test]
    fn address_pretty_hex_encodes() {
        assert_eq!(address_pretty(&[0xab, 0x01]), Some("0xab01".to_string()));
    }
}
