//! Per-account drill-down over reconciliation output.
//!
//! `ads_count` comes from the result records, while `keywords_count` is
//! re-derived from the ad-group report by (label, customer ID). The two can
//! disagree when a customer has several rows with the same label but
//! different ad-group IDs, or rows that were skipped as not Enabled.

use std::collections::HashSet;

use log::debug;

use crate::config::CheckConfig;
use crate::dataset::Dataset;
use crate::error::ReconError;
use crate::model::{AccountRollup, AdGroupRollup, ReconInput, ResultRecord, RollupTotals, Status};

/// Account names excluded from the drill-down list.
const UNNAMED_ACCOUNT: &str = "N/A";

/// Account names that have at least one qualifying ad group, first-seen order.
/// Blank names are never offered.
pub fn selectable_accounts(records: &[ResultRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| {
            !r.kind.is_placeholder()
                && !r.account_name.is_empty()
                && r.account_name != UNNAMED_ACCOUNT
        })
        .map(|r| r.account_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Roll up one account's records by ad-group name.
///
/// Returns `None` when the account has no qualifying ad groups.
pub fn rollup_account(
    config: &CheckConfig,
    input: &ReconInput,
    records: &[ResultRecord],
    account_name: &str,
) -> Result<Option<AccountRollup>, ReconError> {
    let dataset = Dataset::bind(config, input)?;
    Ok(rollup_dataset(&dataset, records, account_name))
}

pub fn rollup_dataset(
    dataset: &Dataset,
    records: &[ResultRecord],
    account_name: &str,
) -> Option<AccountRollup> {
    let valid: Vec<&ResultRecord> = records
        .iter()
        .filter(|r| r.account_name == account_name && !r.kind.is_placeholder())
        .collect();
    if valid.is_empty() {
        return None;
    }

    let mut names: Vec<&str> = Vec::new();
    for r in &valid {
        if !names.contains(&r.ad_group.as_str()) {
            names.push(&r.ad_group);
        }
    }

    let groups: Vec<AdGroupRollup> = names
        .into_iter()
        .map(|name| {
            let members: Vec<&&ResultRecord> =
                valid.iter().filter(|r| r.ad_group == name).collect();
            let first = members[0];
            let keywords_count = keyword_count(dataset, name, &first.customer_id);
            debug!(
                "account '{account_name}': '{name}' has {} ad(s), {keywords_count} keyword(s)",
                members.len()
            );
            AdGroupRollup {
                ad_group: name.to_string(),
                customer_id: first.customer_id.clone(),
                campaign: first.campaign.clone(),
                ads_status: Status::from_active(members.iter().any(|r| r.ads_status.is_active())),
                ads_count: members.len(),
                keywords_status: Status::from_active(
                    members.iter().any(|r| r.keywords_status.is_active()),
                ),
                keywords_count,
            }
        })
        .collect();

    let totals = RollupTotals {
        unique_ad_groups: groups.len(),
        total_ads: groups.iter().map(|g| g.ads_count).sum(),
        groups_with_active_ads: groups.iter().filter(|g| g.ads_status.is_active()).count(),
        groups_with_active_keywords: groups
            .iter()
            .filter(|g| g.keywords_status.is_active())
            .count(),
    };

    Some(AccountRollup {
        account_name: account_name.to_string(),
        groups,
        totals,
    })
}

/// Keyword rows referencing any ad-group ID found under this label for this
/// customer, whatever the rows' state.
fn keyword_count(dataset: &Dataset, label: &str, customer_id: &str) -> usize {
    let ids: HashSet<&str> = dataset
        .units_for(customer_id)
        .filter(|u| u.label == label && !u.ad_group_id.is_empty())
        .map(|u| u.ad_group_id.as_str())
        .collect();
    dataset.keywords.count_for(&ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordKind, Table, TableKind, NO_AD_GROUPS_FOUND};

    fn record(account: &str, customer: &str, group: &str, ads: Status, kw: Status) -> ResultRecord {
        ResultRecord {
            account_name: account.into(),
            customer_id: customer.into(),
            campaign: format!("camp-{customer}"),
            ad_group: group.into(),
            ads_status: ads,
            keywords_status: kw,
            kind: RecordKind::Matched,
        }
    }

    fn empty_dataset() -> Dataset {
        let input = ReconInput {
            accounts: Table::with_rows(TableKind::Accounts, &["Customer ID"], &[]),
            ad_groups: Table::with_rows(TableKind::AdGroups, &["Other"], &[]),
            keywords: Table::with_rows(TableKind::Keywords, &["Ad group ID"], &[]),
        };
        Dataset::bind(&CheckConfig::default(), &input).unwrap()
    }

    #[test]
    fn selectable_skips_placeholders_and_unnamed() {
        let mut placeholder =
            record("Ghost", "9", NO_AD_GROUPS_FOUND, Status::NotActive, Status::NotActive);
        placeholder.kind = RecordKind::NoAdGroups;
        let records = vec![
            record("Acme", "1", "g", Status::Active, Status::Active),
            placeholder,
            record("N/A", "2", "g", Status::Active, Status::Active),
            record("Beta", "3", "g", Status::Active, Status::Active),
            record("Acme", "1", "h", Status::Active, Status::Active),
        ];
        assert_eq!(selectable_accounts(&records), vec!["Acme", "Beta"]);
    }

    #[test]
    fn selectable_skips_blank_account_names() {
        let records = vec![
            record("", "1", "Other Deal 2024", Status::Active, Status::Active),
            record("Beta", "2", "Other Deal 2024", Status::Active, Status::Active),
        ];
        assert_eq!(selectable_accounts(&records), vec!["Beta"]);
        assert!(selectable_accounts(&records[..1]).is_empty());
    }

    #[test]
    fn status_is_or_across_group() {
        let records = vec![
            record("Acme", "1", "Other Deal 2024", Status::Active, Status::NotActive),
            record("Acme", "1", "Other Deal 2024", Status::NotActive, Status::NotActive),
        ];
        let rollup = rollup_dataset(&empty_dataset(), &records, "Acme").unwrap();
        assert_eq!(rollup.groups.len(), 1);
        assert_eq!(rollup.groups[0].ads_status, Status::Active);
        assert_eq!(rollup.groups[0].ads_count, 2);
        assert_eq!(rollup.groups[0].keywords_status, Status::NotActive);
        assert_eq!(rollup.groups[0].keywords_count, 0);
    }

    #[test]
    fn groups_in_first_seen_order_with_totals() {
        let records = vec![
            record("Acme", "1", "b", Status::NotActive, Status::Active),
            record("Other", "5", "z", Status::Active, Status::Active),
            record("Acme", "1", "a", Status::Active, Status::NotActive),
            record("Acme", "1", "b", Status::NotActive, Status::NotActive),
        ];
        let rollup = rollup_dataset(&empty_dataset(), &records, "Acme").unwrap();
        let names: Vec<&str> = rollup.groups.iter().map(|g| g.ad_group.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(
            rollup.totals,
            RollupTotals {
                unique_ad_groups: 2,
                total_ads: 3,
                groups_with_active_ads: 1,
                groups_with_active_keywords: 1,
            }
        );
    }

    #[test]
    fn unknown_or_placeholder_only_account_is_none() {
        let mut placeholder =
            record("Ghost", "9", NO_AD_GROUPS_FOUND, Status::NotActive, Status::NotActive);
        placeholder.kind = RecordKind::NoAdGroups;
        let records = vec![placeholder];
        assert!(rollup_dataset(&empty_dataset(), &records, "Ghost").is_none());
        assert!(rollup_dataset(&empty_dataset(), &records, "Nobody").is_none());
    }
}
