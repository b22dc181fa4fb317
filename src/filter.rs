//! Whitelist filter for trade records
//!
//! Only trades between two currently listed network tokens count toward
//! public statistics. Delisted or experimental assets are dropped here.

use crate::types::{CoinSymbol, TradeRecord};
use std::collections::HashSet;
use tracing::debug;

/// Keep the records whose maker and taker are both whitelisted, in input order.
pub fn filter_whitelisted<'a>(
    records: &'a [TradeRecord],
    whitelist: &HashSet<CoinSymbol>,
) -> Vec<&'a TradeRecord> {
    let filtered: Vec<&TradeRecord> = records
        .iter()
        .filter(|r| whitelist.contains(&r.maker) && whitelist.contains(&r.taker))
        .collect();

    if filtered.len() != records.len() {
        debug!(
            "Whitelist dropped {} of {} trade records",
            records.len() - filtered.len(),
            records.len()
        );
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn whitelist(coins: &[&str]) -> HashSet<CoinSymbol> {
        coins.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_keeps_only_fully_whitelisted_trades() {
        let records = vec![
            TradeRecord::new("BLOCK", "BTC", dec!(1)),
            TradeRecord::new("BLOCK", "SCAM", dec!(2)),
            TradeRecord::new("SCAM", "BTC", dec!(3)),
            TradeRecord::new("LTC", "BLOCK", dec!(4)),
        ];
        let filtered = filter_whitelisted(&records, &whitelist(&["BLOCK", "BTC", "LTC"]));

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].maker_size, dec!(1));
        assert_eq!(filtered[1].maker_size, dec!(4));
    }

    #[test]
    fn test_preserves_order() {
        let records: Vec<TradeRecord> = (1..=5)
            .map(|i| TradeRecord::new("BLOCK", "BTC", rust_decimal::Decimal::from(i)))
            .collect();
        let filtered = filter_whitelisted(&records, &whitelist(&["BLOCK", "BTC"]));
        let sizes: Vec<_> = filtered.iter().map(|r| r.maker_size).collect();
        assert_eq!(sizes, vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
    }

    #[test]
    fn test_empty_whitelist_drops_everything() {
        let records = vec![TradeRecord::new("BLOCK", "BTC", dec!(1))];
        assert!(filter_whitelisted(&records, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_symbols_are_case_sensitive() {
        let records = vec![TradeRecord::new("block", "BTC", dec!(1))];
        assert!(filter_whitelisted(&records, &whitelist(&["BLOCK", "BTC"])).is_empty());
    }
}
