use std::collections::HashSet;

use crate::model::{ReconSummary, ResultRecord};

/// Compute summary statistics from result records.
pub fn compute_summary(records: &[ResultRecord]) -> ReconSummary {
    let mut active_ads = 0;
    let mut active_keywords = 0;
    let mut placeholders = 0;
    let mut customers = HashSet::new();

    for r in records {
        if r.ads_status.is_active() {
            active_ads += 1;
        }
        if r.keywords_status.is_active() {
            active_keywords += 1;
        }
        if r.kind.is_placeholder() {
            placeholders += 1;
        }
        customers.insert(r.customer_id.as_str());
    }

    ReconSummary {
        total_records: records.len(),
        active_ads,
        active_keywords,
        placeholders,
        customers: customers.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordKind, Status};

    fn record(customer: &str, ads: Status, keywords: Status, kind: RecordKind) -> ResultRecord {
        ResultRecord {
            account_name: "Acme".into(),
            customer_id: customer.into(),
            campaign: "C".into(),
            ad_group: "g".into(),
            ads_status: ads,
            keywords_status: keywords,
            kind,
        }
    }

    #[test]
    fn summary_counts() {
        let records = vec![
            record("1", Status::Active, Status::Active, RecordKind::Matched),
            record("1", Status::Active, Status::NotActive, RecordKind::Matched),
            record("2", Status::NotActive, Status::NotActive, RecordKind::NoAdGroups),
            record("3", Status::NotActive, Status::NotActive, RecordKind::NoValidStructure),
        ];
        let summary = compute_summary(&records);
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.active_ads, 2);
        assert_eq!(summary.active_keywords, 1);
        assert_eq!(summary.placeholders, 2);
        assert_eq!(summary.customers, 3);
    }

    #[test]
    fn empty_summary() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.customers, 0);
    }
}
