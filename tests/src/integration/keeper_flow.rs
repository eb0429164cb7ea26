//! # Keeper Flow
//!
//! The runtime's keeper retires ended subscriptions without any caller
//! driving `update_current_subscription_id`.

#[cfg(test)]
mod tests {
    use crate::fixtures::{dapi_name, parameters, Listing, Marketplace, Offer, DAY, NOW};
    use fm_03_subscription_market::SubscriptionMarketApi;
    use market_runtime::MarketRuntime;
    use shared_types::U256;
    use std::time::Duration;

    #[tokio::test]
    async fn test_keeper_drains_ended_queue() {
        let m = Marketplace::new(2);
        let name = dapi_name("ETH/USD");
        let feed = m.register_feed(1, 3_000);
        let catalog = m.publish(
            vec![Listing {
                dapi_name: name,
                data_feed_id: feed,
                sponsor_wallet: [0x5A; 20],
            }],
            vec![
                Offer::new(name, parameters(1, 0, 86_400), 7, 70),
                Offer::new(name, parameters(2, 0, 86_400), 14, 70),
            ],
        );
        m.services
            .market
            .buy_subscription(catalog.request(0, 0), U256::from(70u64))
            .unwrap();
        m.services
            .market
            .buy_subscription(catalog.request(0, 1), U256::from(35u64))
            .unwrap();

        let Marketplace {
            services, clock, ..
        } = m;
        let runtime = MarketRuntime::from_container(services);
        let market = runtime.container().market.clone();

        // Both entries ended: one pass retires the whole queue
        clock.set(NOW + 14 * DAY);
        runtime.start();

        for _ in 0..200 {
            if market.queue(&name).is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(market.queue(&name).is_empty());
        assert_eq!(market.active_data_feed_count(), 0);
        assert!(market.dapi_names_due_for_update().is_empty());

        tokio::time::timeout(Duration::from_secs(5), runtime.shutdown())
            .await
            .unwrap();
    }
}
