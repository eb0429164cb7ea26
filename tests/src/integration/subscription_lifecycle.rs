//! # Subscription Lifecycle
//!
//! Purchases through quorum-attested catalogs, from the first subscription of
//! a dAPI name until its queue drains.
//!
//! ## Flow Tested
//!
//! 1. First purchase activates the dAPI name (FM-03 → FM-02)
//! 2. Weaker-but-longer purchases queue behind the head
//! 3. Purchases that upgrade nothing are rejected untouched
//! 4. Retiring ended heads switches the parameters updaters read
//! 5. The sponsor wallet balance tracks what remains to be funded

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        dapi_name, parameters, Catalog, Listing, Marketplace, Offer, DAY, NOW,
    };
    use fm_02_active_set::Subject;
    use fm_03_subscription_market::{
        MarketError, RootKind, SponsorWalletLedger, SubscriptionMarketApi,
    };
    use shared_types::{DapiName, Hash, U256};

    const ETH_WALLET: [u8; 20] = [0xE1; 20];
    const BTC_WALLET: [u8; 20] = [0xB1; 20];

    // Offer rows
    const ETH_1PCT_30D: usize = 0;
    const ETH_2PCT_60D: usize = 1;
    const ETH_6PCT_1D: usize = 2;
    const BTC_1PCT_30D: usize = 3;

    struct World {
        m: Marketplace,
        catalog: Catalog,
        eth: DapiName,
        btc: DapiName,
        eth_feed: Hash,
        btc_feed: Hash,
    }

    impl World {
        fn new() -> Self {
            let m = Marketplace::new(3);
            let eth = dapi_name("ETH/USD");
            let btc = dapi_name("BTC/USD");
            let eth_feed = m.register_feed(1, 3_000);
            let btc_feed = m.register_feed(2, 60_000);
            let catalog = m.publish(
                vec![
                    Listing {
                        dapi_name: eth,
                        data_feed_id: eth_feed,
                        sponsor_wallet: ETH_WALLET,
                    },
                    Listing {
                        dapi_name: btc,
                        data_feed_id: btc_feed,
                        sponsor_wallet: BTC_WALLET,
                    },
                ],
                vec![
                    Offer::new(eth, parameters(1, 0, 86_400), 30, 300),
                    Offer::new(eth, parameters(2, 0, 86_400), 60, 300),
                    Offer::new(eth, parameters(6, 0, 3_600), 1, 10),
                    Offer::new(btc, parameters(1, 0, 86_400), 30, 600),
                ],
            );
            Self {
                m,
                catalog,
                eth,
                btc,
                eth_feed,
                btc_feed,
            }
        }

        fn buy_eth(&self, offer: usize, payment: u64) -> Result<bool, MarketError> {
            self.m
                .services
                .market
                .buy_subscription(self.catalog.request(0, offer), U256::from(payment))
                .map(|r| r.is_current)
        }

        fn head_parameters(&self, dapi_name: &DapiName) -> Option<Vec<u8>> {
            let market = &self.m.services.market;
            (0..market.active_data_feed_count())
                .filter_map(|i| market.active_data_feed(i))
                .find(|a| a.subject == Subject::DapiName(*dapi_name))
                .map(|a| a.update_parameters)
        }

        fn offer_bytes(&self, offer: usize) -> Vec<u8> {
            self.catalog.offers[offer].parameters.encode()
        }
    }

    // =========================================================================
    // QUEUE EVOLUTION
    // =========================================================================

    #[test]
    fn test_queue_evolves_through_upgrades_and_retirement() {
        let w = World::new();
        let market = &w.m.services.market;

        // Empty queue: the first purchase becomes current
        assert!(w.buy_eth(ETH_1PCT_30D, 300).unwrap());
        assert_eq!(market.queue(&w.eth).len(), 1);
        assert_eq!(w.head_parameters(&w.eth), Some(w.offer_bytes(ETH_1PCT_30D)));

        // Weaker but longer: queued behind the head
        assert!(!w.buy_eth(ETH_2PCT_60D, 150).unwrap());
        let queue = market.queue(&w.eth);
        assert_eq!(queue.len(), 2);
        assert!(queue[0].end_timestamp < queue[1].end_timestamp);
        assert_eq!(w.head_parameters(&w.eth), Some(w.offer_bytes(ETH_1PCT_30D)));

        // Weaker and shorter than everything: nothing to upgrade
        assert_eq!(
            w.buy_eth(ETH_6PCT_1D, 10),
            Err(MarketError::SubscriptionDoesNotUpgrade)
        );
        assert_eq!(market.queue(&w.eth), queue);

        // Head ends: the next entry takes over
        w.m.clock.set(NOW + 30 * DAY);
        market.update_current_subscription_id(&w.eth).unwrap();
        assert_eq!(market.queue(&w.eth).len(), 1);
        assert_eq!(w.head_parameters(&w.eth), Some(w.offer_bytes(ETH_2PCT_60D)));
        assert_eq!(
            market.update_current_subscription_id(&w.eth),
            Err(MarketError::CurrentSubscriptionNotEnded {
                end: NOW + 60 * DAY,
                now: NOW + 30 * DAY
            })
        );

        // Last entry ends: the dAPI name goes inactive
        w.m.clock.set(NOW + 60 * DAY);
        market.update_current_subscription_id(&w.eth).unwrap();
        assert!(market.queue(&w.eth).is_empty());
        assert_eq!(w.head_parameters(&w.eth), None);
        assert_eq!(market.active_data_feed_count(), 0);
    }

    #[test]
    fn test_dapi_names_are_independent() {
        let w = World::new();
        let market = &w.m.services.market;

        w.buy_eth(ETH_1PCT_30D, 300).unwrap();
        market
            .buy_subscription(w.catalog.request(1, BTC_1PCT_30D), U256::from(600u64))
            .unwrap();
        assert_eq!(market.active_data_feed_count(), 2);

        // An ETH/USD offer cannot be bought under the BTC/USD listing
        assert_eq!(
            market.buy_subscription(w.catalog.request(1, ETH_2PCT_60D), U256::from(300u64)),
            Err(MarketError::InvalidProof(RootKind::DapiPricing))
        );

        let ledger = &w.m.services.ledger;
        assert_eq!(ledger.balance_of(&ETH_WALLET), U256::from(300u64));
        assert_eq!(ledger.balance_of(&BTC_WALLET), U256::from(600u64));
        assert_eq!(market.get_dapi_data(&w.eth).data_feed_id, w.eth_feed);
        assert_eq!(market.get_dapi_data(&w.btc).data_feed_id, w.btc_feed);

        w.m.clock.set(NOW + 30 * DAY);
        assert_eq!(market.dapi_names_due_for_update(), vec![w.btc, w.eth]);
        market.update_current_subscription_id(&w.btc).unwrap();
        assert_eq!(market.dapi_names_due_for_update(), vec![w.eth]);
        assert_eq!(market.active_data_feed_count(), 1);
    }

    // =========================================================================
    // SPONSOR WALLET BALANCE
    // =========================================================================

    #[test]
    fn test_expected_balance_never_increases_over_time() {
        let w = World::new();
        let market = &w.m.services.market;
        w.buy_eth(ETH_1PCT_30D, 300).unwrap();
        w.buy_eth(ETH_2PCT_60D, 150).unwrap();

        // 10/day for 30 days, then 5/day for 30 days
        assert_eq!(market.expected_balance_at(&w.eth, NOW), U256::from(450u64));
        assert_eq!(
            market.expected_balance_at(&w.eth, NOW + 30 * DAY),
            U256::from(150u64)
        );

        let mut previous = market.expected_balance_at(&w.eth, NOW);
        for day in 1..=60 {
            let current = market.expected_balance_at(&w.eth, NOW + day * DAY);
            assert!(current <= previous, "balance rose on day {day}");
            previous = current;
        }
        assert_eq!(previous, U256::zero());

        w.m.clock.set(NOW + 60 * DAY);
        market.update_current_subscription_id(&w.eth).unwrap();
        assert_eq!(
            market.compute_expected_sponsor_wallet_balance(&w.eth),
            U256::zero()
        );
    }

    #[test]
    fn test_wallet_funded_only_by_shortfall() {
        let w = World::new();
        let market = &w.m.services.market;
        w.buy_eth(ETH_1PCT_30D, 300).unwrap();

        let quote = market
            .compute_expected_sponsor_wallet_balance_after_subscription_is_added(
                &w.eth,
                &w.offer_bytes(ETH_2PCT_60D),
                60 * DAY,
                U256::from(300u64),
            )
            .unwrap();
        assert_eq!(quote, U256::from(450u64));

        let receipt = market
            .buy_subscription(w.catalog.request(0, ETH_2PCT_60D), U256::from(1_000u64))
            .unwrap();
        assert_eq!(receipt.payment_forwarded, U256::from(150u64));
        assert_eq!(receipt.refund, U256::from(850u64));
        assert_eq!(
            w.m.services.ledger.balance_of(&ETH_WALLET),
            U256::from(450u64)
        );
    }

    // =========================================================================
    // CATALOG ROTATION
    // =========================================================================

    #[test]
    fn test_republished_catalog_replaces_old_proofs() {
        let w = World::new();
        let market = &w.m.services.market;
        w.buy_eth(ETH_1PCT_30D, 300).unwrap();

        // Same listings, new prices: only the pricing root changes
        w.m.clock.advance(1);
        let repriced = w.m.publish(
            w.catalog.listings.clone(),
            vec![Offer::new(w.eth, parameters(1, 0, 86_400), 60, 1_200)],
        );

        assert_eq!(
            w.buy_eth(ETH_2PCT_60D, 300),
            Err(MarketError::InvalidRoot(RootKind::DapiPricing))
        );

        let receipt = market
            .buy_subscription(repriced.request(0, 0), U256::from(1_200u64))
            .unwrap();
        assert!(receipt.is_current);
        let queue = market.queue(&w.eth);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].daily_price, U256::from(20u64));
    }

    #[test]
    fn test_dapi_data_reports_queue_and_feed() {
        let w = World::new();
        let market = &w.m.services.market;
        w.buy_eth(ETH_1PCT_30D, 300).unwrap();
        w.buy_eth(ETH_2PCT_60D, 150).unwrap();

        let data = market.get_dapi_data(&w.eth);
        assert_eq!(data.data_feed_id, w.eth_feed);
        assert_eq!(data.data_feed.value, 3_000);
        assert_eq!(data.data_feed.timestamp, NOW);
        assert_eq!(
            data.update_parameters,
            vec![w.offer_bytes(ETH_1PCT_30D), w.offer_bytes(ETH_2PCT_60D)]
        );
        assert_eq!(data.end_timestamps, vec![NOW + 30 * DAY, NOW + 60 * DAY]);
        assert_eq!(
            data.daily_prices,
            vec![U256::from(10u64), U256::from(5u64)]
        );
    }
}
