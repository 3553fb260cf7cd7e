use log::{debug, info};

use crate::config::CheckConfig;
use crate::dataset::{Account, AdUnit, Dataset};
use crate::error::ReconError;
use crate::matcher::TemplateSet;
use crate::model::{
    campaign_or_default, ReconInput, ReconMeta, ReconReport, RecordKind, ResultRecord, Status,
};
use crate::summary::compute_summary;

/// Run the full check per config. Returns result records + summary.
pub fn run(config: &CheckConfig, input: &ReconInput) -> Result<ReconReport, ReconError> {
    let records = reconcile(config, input)?;
    let summary = compute_summary(&records);

    info!(
        "reconciled {} customer(s) into {} record(s), {} placeholder(s)",
        summary.customers, summary.total_records, summary.placeholders
    );

    Ok(ReconReport {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            tables: vec![
                input.accounts.shape(),
                input.keywords.shape(),
                input.ad_groups.shape(),
            ],
        },
        summary,
        records,
    })
}

/// Join accounts, ad groups and keywords into result records.
///
/// Output order is customer first-seen order, then ad-group row order. Every
/// customer gets at least one record.
pub fn reconcile(
    config: &CheckConfig,
    input: &ReconInput,
) -> Result<Vec<ResultRecord>, ReconError> {
    let templates = config.template_set()?;
    let dataset = Dataset::bind(config, input)?;
    Ok(reconcile_dataset(config, &templates, &dataset))
}

pub fn reconcile_dataset(
    config: &CheckConfig,
    templates: &TemplateSet,
    dataset: &Dataset,
) -> Vec<ResultRecord> {
    let mut records = Vec::new();
    for account in &dataset.accounts {
        let before = records.len();
        reconcile_customer(config, templates, dataset, account, &mut records);
        debug!(
            "customer {}: {} record(s)",
            account.customer_id,
            records.len() - before
        );
    }
    records
}

fn reconcile_customer(
    config: &CheckConfig,
    templates: &TemplateSet,
    dataset: &Dataset,
    account: &Account,
    out: &mut Vec<ResultRecord>,
) {
    let units: Vec<&AdUnit> = dataset.units_for(&account.customer_id).collect();

    let Some(first) = units.first() else {
        out.push(ResultRecord::placeholder(
            &account.account_name,
            &account.customer_id,
            "",
            RecordKind::NoAdGroups,
        ));
        return;
    };

    let mut found = false;
    for unit in &units {
        let Some(template) = templates.matching_template(&unit.label) else {
            continue;
        };
        if unit.ad_state != config.enabled_state {
            debug!(
                "customer {}: '{}' matches '{}' but state is '{}'",
                account.customer_id, unit.label, template.phrase, unit.ad_state
            );
            continue;
        }

        found = true;
        out.push(ResultRecord {
            account_name: account.account_name.clone(),
            customer_id: account.customer_id.clone(),
            campaign: campaign_or_default(&unit.campaign).to_string(),
            ad_group: unit.label.clone(),
            ads_status: Status::from_active(unit.has_creative),
            keywords_status: Status::from_active(dataset.keywords.contains(&unit.ad_group_id)),
            kind: RecordKind::Matched,
        });
    }

    if !found {
        out.push(ResultRecord::placeholder(
            &account.account_name,
            &account.customer_id,
            &first.campaign,
            RecordKind::NoValidStructure,
        ));
    }
}
