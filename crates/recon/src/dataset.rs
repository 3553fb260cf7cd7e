//! Column resolution and typed binding of the three input tables.

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::activity::{is_active, CreativeColumns};
use crate::config::CheckConfig;
use crate::error::ReconError;
use crate::model::{ReconInput, Table};
use crate::normalize::strip_sentinel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub customer_id: String,
    pub account_name: String,
}

/// One ad unit from the ad-group report, sentinels already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdUnit {
    pub customer_id: String,
    pub campaign: String,
    pub label: String,
    pub ad_group_id: String,
    pub ad_state: String,
    pub has_creative: bool,
}

/// Keyword report reduced to what the engine needs: which ad-group IDs are
/// referenced, and how many keyword rows reference each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    counts: HashMap<String, usize>,
}

impl KeywordIndex {
    pub fn from_ids<'a, I: IntoIterator<Item = &'a str>>(ids: I) -> Self {
        let mut counts = HashMap::new();
        for id in ids {
            *counts.entry(id.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn contains(&self, ad_group_id: &str) -> bool {
        !ad_group_id.is_empty() && self.counts.contains_key(ad_group_id)
    }

    /// Keyword rows whose ad-group ID is in `ids`. Each ID is counted once.
    pub fn count_for(&self, ids: &HashSet<&str>) -> usize {
        ids.iter().filter_map(|id| self.counts.get(*id)).sum()
    }
}

/// All three tables bound to typed records for one run.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Accounts in first-seen order, one per customer ID.
    pub accounts: Vec<Account>,
    /// `None` when the ad-group report has no customer ID column.
    pub ad_units: Option<Vec<AdUnit>>,
    pub keywords: KeywordIndex,
}

impl Dataset {
    pub fn bind(config: &CheckConfig, input: &ReconInput) -> Result<Self, ReconError> {
        Ok(Self {
            accounts: bind_accounts(config, &input.accounts)?,
            ad_units: bind_ad_units(config, &input.ad_groups)?,
            keywords: bind_keywords(config, &input.keywords),
        })
    }

    /// Rows of the ad-group report belonging to one customer, in table order.
    pub fn units_for<'a>(&'a self, customer_id: &'a str) -> impl Iterator<Item = &'a AdUnit> + 'a {
        self.ad_units
            .iter()
            .flatten()
            .filter(move |u| u.customer_id == customer_id)
    }
}

fn required(table: &Table, column: &str) -> Result<usize, ReconError> {
    table.column(column).ok_or_else(|| ReconError::MissingColumn {
        table: table.kind,
        column: column.into(),
    })
}

/// Unique non-blank customer IDs, first-seen order; the first row's name wins.
pub fn bind_accounts(config: &CheckConfig, table: &Table) -> Result<Vec<Account>, ReconError> {
    let cols = &config.accounts;
    let id_idx = required(table, &cols.customer_id)?;
    let name_idx = table.column(&cols.account_name);
    if name_idx.is_none() {
        warn!(
            "{}: no '{}' column, account names will be empty",
            table.kind.file_label(),
            cols.account_name
        );
    }

    let mut seen = HashSet::new();
    let mut accounts = Vec::new();
    for row in 0..table.rows.len() {
        let customer_id = table.cell(row, id_idx).trim();
        if customer_id.is_empty() || !seen.insert(customer_id.to_string()) {
            continue;
        }
        let account_name = name_idx.map(|i| table.cell(row, i)).unwrap_or("");
        accounts.push(Account {
            customer_id: customer_id.to_string(),
            account_name: account_name.to_string(),
        });
    }
    Ok(accounts)
}

pub fn bind_ad_units(
    config: &CheckConfig,
    table: &Table,
) -> Result<Option<Vec<AdUnit>>, ReconError> {
    let cols = &config.ad_groups;
    let sentinel = config.empty_sentinel.as_str();

    let Some(customer_idx) = table.column(&cols.customer_id) else {
        warn!(
            "{}: no '{}' column, every customer gets a placeholder",
            table.kind.file_label(),
            cols.customer_id
        );
        return Ok(None);
    };
    let campaign_idx = required(table, &cols.campaign)?;
    let label_idx = required(table, &cols.label)?;
    let id_idx = required(table, &cols.ad_group_id)?;
    let state_idx = required(table, &cols.ad_state)?;
    let creative = CreativeColumns::resolve(
        &table.headers,
        &cols.headline_marker,
        &cols.description_marker,
    );
    if creative.is_empty() {
        warn!(
            "{}: no headline or description columns, every ad will be not active",
            table.kind.file_label()
        );
    }

    let units = (0..table.rows.len())
        .map(|row| AdUnit {
            customer_id: table.cell(row, customer_idx).trim().to_string(),
            campaign: strip_sentinel(table.cell(row, campaign_idx), sentinel).to_string(),
            label: table.cell(row, label_idx).to_string(),
            ad_group_id: strip_sentinel(table.cell(row, id_idx), sentinel).trim().to_string(),
            ad_state: strip_sentinel(table.cell(row, state_idx), sentinel).to_string(),
            has_creative: is_active(creative.all().map(|i| table.cell(row, i)), sentinel),
        })
        .collect();
    Ok(Some(units))
}

/// A keyword report without the ID column is treated as empty.
pub fn bind_keywords(config: &CheckConfig, table: &Table) -> KeywordIndex {
    let column = &config.keywords.ad_group_id;
    let Some(idx) = table.column(column) else {
        warn!(
            "{}: no '{column}' column, all keywords will be not active",
            table.kind.file_label()
        );
        return KeywordIndex::default();
    };
    let sentinel = config.empty_sentinel.as_str();
    KeywordIndex::from_ids(
        (0..table.rows.len())
            .map(|row| strip_sentinel(table.cell(row, idx), sentinel).trim())
            .filter(|id| !id.is_empty()),
    )
}
