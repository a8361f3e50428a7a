use proptest::prelude::*;

use rosca_types::{AccountId, BlockHash, Timestamp, TokenAmount};

proptest! {
    /// AccountId hex rendering parses back to the same id.
    #[test]
    fn account_hex_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let id = AccountId::new(bytes);
        let parsed = AccountId::from_hex(&id.to_string()).unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// AccountId::is_zero is true only for all-zero bytes.
    #[test]
    fn account_is_zero_correct(bytes in prop::array::uniform20(0u8..)) {
        prop_assert_eq!(AccountId::new(bytes).is_zero(), bytes == [0u8; 20]);
    }

    /// AccountId survives bincode (string-encoded) serialization.
    #[test]
    fn account_bincode_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let id = AccountId::new(bytes);
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: AccountId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, id);
    }

    /// BlockHash::is_zero is true only for all-zero bytes.
    #[test]
    fn block_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        prop_assert_eq!(BlockHash::new(bytes).is_zero(), bytes == [0u8; 32]);
    }

    /// Timestamp has_expired agrees with manual arithmetic.
    #[test]
    fn timestamp_has_expired_correct(
        start in 0u64..500_000,
        duration in 1u64..500_000,
        offset in 0u64..1_000_000,
    ) {
        let t = Timestamp::new(start);
        let now = Timestamp::new(start.saturating_add(offset));
        prop_assert_eq!(t.has_expired(duration, now), offset >= duration);
    }

    /// Timestamp elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since_saturates(base in 1u64..1_000_000, deficit in 1u64..1_000_000) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
    }

    /// TokenAmount: checked_sub returns None when b > a.
    #[test]
    fn token_amount_checked_sub_underflow(a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let result = TokenAmount::new(a).checked_sub(TokenAmount::new(b));
        if b > a {
            prop_assert!(result.is_none());
        } else {
            prop_assert_eq!(result, Some(TokenAmount::new(a - b)));
        }
    }

    /// TokenAmount: checked_mul agrees with repeated addition.
    #[test]
    fn token_amount_checked_mul(unit in 0u128..1_000_000, count in 0u64..64) {
        let mut acc = TokenAmount::ZERO;
        for _ in 0..count {
            acc = acc.checked_add(TokenAmount::new(unit)).unwrap();
        }
        prop_assert_eq!(TokenAmount::new(unit).checked_mul(count), Some(acc));
    }
}
