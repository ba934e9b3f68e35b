use registry_types::{LandId, Price, Principal, Timestamp, TransactionRecord, TransactionType};

/// Append-only transaction log in chronological order.
#[derive(Clone, Debug, Default)]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn append(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }

    pub fn all(&self) -> Vec<TransactionRecord> {
        self.records.clone()
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn for_land(&self, land_id: LandId) -> Vec<TransactionRecord> {
        self.records
            .iter()
            .filter(|record| record.land_id == land_id)
            .cloned()
            .collect()
    }

    pub fn for_user(&self, user: &Principal) -> Vec<TransactionRecord> {
        self.records
            .iter()
            .filter(|record| &record.from == user || &record.to == user)
            .cloned()
            .collect()
    }

    /// Trailing window of the log, oldest first.
    pub fn recent(&self, limit: u64) -> Vec<TransactionRecord> {
        let start = self.records.len().saturating_sub(limit as usize);
        self.records[start..].to_vec()
    }

    /// Sale prices for one parcel in chronological order.
    pub fn price_history(&self, land_id: LandId) -> Vec<(Timestamp, Price)> {
        self.records
            .iter()
            .filter(|record| {
                record.land_id == land_id && record.transaction_type == TransactionType::Sale
            })
            .filter_map(|record| record.price.map(|price| (record.timestamp, price)))
            .collect()
    }

    pub fn len(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        land_id: LandId,
        from: &str,
        to: &str,
        transaction_type: TransactionType,
        price: Option<Price>,
        timestamp: Timestamp,
    ) -> TransactionRecord {
        TransactionRecord {
            land_id,
            from: Principal::from(from),
            to: Principal::from(to),
            price,
            transaction_type,
            timestamp,
        }
    }

    fn seeded() -> TransactionLog {
        let mut log = TransactionLog::new();
        log.append(record(1, "anonymous", "alice", TransactionType::Registration, None, 10));
        log.append(record(1, "alice", "bob", TransactionType::Sale, Some(500), 20));
        log.append(record(2, "anonymous", "carol", TransactionType::Registration, None, 30));
        log.append(record(1, "bob", "carol", TransactionType::Sale, Some(700), 40));
        log.append(record(1, "carol", "dave", TransactionType::Transfer, None, 50));
        log
    }

    #[test]
    fn per_land_view_preserves_order() {
        let log = seeded();
        let history = log.for_land(1);
        let stamps: Vec<Timestamp> = history.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![10, 20, 40, 50]);
    }

    #[test]
    fn user_view_matches_either_side() {
        let log = seeded();
        assert_eq!(log.for_user(&Principal::from("bob")).len(), 3);
        assert_eq!(log.for_user(&Principal::from("dave")).len(), 1);
        assert!(log.for_user(&Principal::from("erin")).is_empty());
    }

    #[test]
    fn price_history_is_sales_only() {
        let log = seeded();
        assert_eq!(log.price_history(1), vec![(20, 500), (40, 700)]);
        assert!(log.price_history(2).is_empty());
    }

    #[test]
    fn recent_returns_trailing_window() {
        let log = seeded();
        let tail = log.recent(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].timestamp, 40);
        assert_eq!(log.recent(100).len(), 5);
    }
}
