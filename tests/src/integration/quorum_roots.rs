//! # Quorum-Attested Roots
//!
//! Roots reach the hash registry through `register_hash` with one package per
//! signer, and the market accepts proofs against them.
//!
//! ## Flow Tested
//!
//! 1. Unanimous direct signatures register a root
//! 2. A foreign signature, a missing slot or a replay is rejected
//! 3. A signer can hand its slot to a delegate until an expiry
//! 4. Purchases verify against roots registered this way

#[cfg(test)]
mod tests {
    use crate::fixtures::{dapi_name, parameters, Listing, Marketplace, Offer, DAY, NOW};
    use fm_01_hash_registry::{sign_direct, HashRegistryApi, HashRegistryError};
    use fm_03_subscription_market::{MarketError, RootKind, SubscriptionMarketApi};
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{ErrorKind, Hash, U256, ZERO_HASH};

    const ROOT: Hash = [0x42; 32];

    fn management_hash_type(m: &Marketplace) -> Hash {
        m.services.market.config().dapi_management_hash_type()
    }

    // =========================================================================
    // DIRECT SIGNATURES
    // =========================================================================

    #[test]
    fn test_unanimous_signatures_register_root() {
        let m = Marketplace::new(3);
        let hash_type = management_hash_type(&m);

        m.attest(hash_type, ROOT).unwrap();

        let registry = &m.services.hash_registry;
        assert_eq!(registry.get_hash_value(&hash_type), ROOT);
        assert_eq!(registry.get_hash(&hash_type).unwrap().timestamp, NOW);
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let m = Marketplace::new(3);
        let hash_type = management_hash_type(&m);
        let outsider = Secp256k1KeyPair::generate();

        let packages: Vec<Vec<u8>> = m
            .signers
            .iter()
            .enumerate()
            .map(|(i, k)| {
                let signer = if i == 1 { &outsider } else { k };
                sign_direct(signer, &hash_type, &ROOT, NOW).unwrap().encode()
            })
            .collect();

        let err = m
            .services
            .hash_registry
            .register_hash(hash_type, ROOT, NOW, &packages)
            .unwrap_err();
        assert_eq!(err, HashRegistryError::SignatureMismatch { index: 1 });
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(m.services.hash_registry.get_hash_value(&hash_type), ZERO_HASH);
    }

    #[test]
    fn test_missing_slot_rejected() {
        let m = Marketplace::new(3);
        let hash_type = management_hash_type(&m);
        let packages: Vec<Vec<u8>> = m.signers[..2]
            .iter()
            .map(|k| sign_direct(k, &hash_type, &ROOT, NOW).unwrap().encode())
            .collect();

        assert_eq!(
            m.services
                .hash_registry
                .register_hash(hash_type, ROOT, NOW, &packages),
            Err(HashRegistryError::SignatureCountMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_replay_and_future_timestamps_rejected() {
        let m = Marketplace::new(2);
        let hash_type = management_hash_type(&m);
        m.attest(hash_type, ROOT).unwrap();

        assert_eq!(
            m.attest(hash_type, [0x43; 32]),
            Err(HashRegistryError::TimestampNotMoreRecent {
                timestamp: NOW,
                stored: NOW
            })
        );

        let packages: Vec<Vec<u8>> = m
            .signers
            .iter()
            .map(|k| sign_direct(k, &hash_type, &ROOT, NOW + 1).unwrap().encode())
            .collect();
        assert_eq!(
            m.services
                .hash_registry
                .register_hash(hash_type, ROOT, NOW + 1, &packages),
            Err(HashRegistryError::TimestampFromFuture {
                timestamp: NOW + 1,
                now: NOW
            })
        );

        m.clock.advance(1);
        m.attest(hash_type, [0x43; 32]).unwrap();
        assert_eq!(
            m.services.hash_registry.get_hash_value(&hash_type),
            [0x43; 32]
        );
    }

    // =========================================================================
    // DELEGATION
    // =========================================================================

    #[test]
    fn test_delegate_fills_signer_slot_until_expiry() {
        let m = Marketplace::new(3);
        let hash_type = management_hash_type(&m);
        let hot_key = Secp256k1KeyPair::generate();
        let expiry = NOW + DAY;

        m.attest_with_delegate(hash_type, ROOT, &hot_key, expiry)
            .unwrap();
        assert_eq!(m.services.hash_registry.get_hash_value(&hash_type), ROOT);

        // The grant is valid through its expiry second
        m.clock.set(expiry);
        m.attest_with_delegate(hash_type, [0x43; 32], &hot_key, expiry)
            .unwrap();

        m.clock.set(expiry + 1);
        assert_eq!(
            m.attest_with_delegate(hash_type, [0x44; 32], &hot_key, expiry),
            Err(HashRegistryError::DelegationEnded { index: 0, expiry })
        );
        assert_eq!(
            m.services.hash_registry.get_hash_value(&hash_type),
            [0x43; 32]
        );
    }

    // =========================================================================
    // MARKET AUTHORIZATION
    // =========================================================================

    #[test]
    fn test_purchase_against_quorum_roots() {
        let m = Marketplace::new(3);
        let name = dapi_name("ETH/USD");
        let feed = m.register_feed(1, 3_000);
        let wallet = [0x5A; 20];
        let catalog = m.publish(
            vec![Listing {
                dapi_name: name,
                data_feed_id: feed,
                sponsor_wallet: wallet,
            }],
            vec![Offer::new(name, parameters(1, 0, 86_400), 30, 300)],
        );

        let receipt = m
            .services
            .market
            .buy_subscription(catalog.request(0, 0), U256::from(300u64))
            .unwrap();
        assert!(receipt.is_current);

        // Rotating the pricing root invalidates the old proofs
        m.clock.advance(1);
        let pricing = m.services.market.config().dapi_pricing_hash_type();
        m.attest(pricing, [0x99; 32]).unwrap();
        assert_eq!(
            m.services
                .market
                .buy_subscription(catalog.request(0, 0), U256::from(300u64)),
            Err(MarketError::InvalidRoot(RootKind::DapiPricing))
        );
    }
}
