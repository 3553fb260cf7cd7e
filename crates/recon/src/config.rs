use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::matcher::TemplateSet;

/// Built-in ad-group naming templates, in match order.
pub const DEFAULT_TEMPLATES: &[&str] = &[
    "New - Lease-",
    "Lease or Other",
    "Other Deal",
    "Finance Other",
    "New - Rebate Deal-",
    "New - Deal -",
    "Other or Finance",
    "Finance or Other",
    "Lease or Finance",
];

const MAX_SKIP_ROWS: usize = 1000;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Non-data rows above the header row in every input file.
    pub skip_rows: usize,
    /// `Ad state` value an ad group must have to qualify.
    pub enabled_state: String,
    /// Placeholder the exports write for an absent value.
    pub empty_sentinel: String,
    /// Template phrases; each must be followed by a space and a 4-digit year.
    pub templates: Vec<String>,
    pub accounts: AccountColumns,
    pub ad_groups: AdGroupColumns,
    pub keywords: KeywordColumns,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            skip_rows: 2,
            enabled_state: "Enabled".into(),
            empty_sentinel: "--".into(),
            templates: DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect(),
            accounts: AccountColumns::default(),
            ad_groups: AdGroupColumns::default(),
            keywords: KeywordColumns::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountColumns {
    pub customer_id: String,
    pub account_name: String,
}

impl Default for AccountColumns {
    fn default() -> Self {
        Self {
            customer_id: "Customer ID".into(),
            account_name: "Account name".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdGroupColumns {
    pub customer_id: String,
    pub campaign: String,
    pub label: String,
    pub ad_group_id: String,
    pub ad_state: String,
    /// Any header containing this text (case-insensitive) is a headline slot.
    pub headline_marker: String,
    /// Any header containing this text (case-insensitive) is a description slot.
    pub description_marker: String,
}

impl Default for AdGroupColumns {
    fn default() -> Self {
        Self {
            customer_id: "Customer ID".into(),
            campaign: "Campaign".into(),
            label: "Ad group".into(),
            ad_group_id: "Ad group ID".into(),
            ad_state: "Ad state".into(),
            headline_marker: "headline".into(),
            description_marker: "description".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordColumns {
    pub ad_group_id: String,
}

impl Default for KeywordColumns {
    fn default() -> Self {
        Self {
            ad_group_id: "Ad group ID".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CheckConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: CheckConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.skip_rows > MAX_SKIP_ROWS {
            return Err(ReconError::ConfigValidation(format!(
                "skip_rows must be at most {MAX_SKIP_ROWS}, got {}",
                self.skip_rows
            )));
        }

        if self.templates.is_empty() {
            return Err(ReconError::ConfigValidation(
                "at least one template is required".into(),
            ));
        }
        if let Some(i) = self.templates.iter().position(|t| t.trim().is_empty()) {
            return Err(ReconError::ConfigValidation(format!("template #{} is blank", i + 1)));
        }

        let named = [
            ("enabled_state", &self.enabled_state),
            ("empty_sentinel", &self.empty_sentinel),
            ("accounts.customer_id", &self.accounts.customer_id),
            ("accounts.account_name", &self.accounts.account_name),
            ("ad_groups.customer_id", &self.ad_groups.customer_id),
            ("ad_groups.campaign", &self.ad_groups.campaign),
            ("ad_groups.label", &self.ad_groups.label),
            ("ad_groups.ad_group_id", &self.ad_groups.ad_group_id),
            ("ad_groups.ad_state", &self.ad_groups.ad_state),
            ("ad_groups.headline_marker", &self.ad_groups.headline_marker),
            ("ad_groups.description_marker", &self.ad_groups.description_marker),
            ("keywords.ad_group_id", &self.keywords.ad_group_id),
        ];
        for (key, value) in named {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{key} must not be blank")));
            }
        }

        Ok(())
    }

    /// Compile the configured template phrases.
    pub fn template_set(&self) -> Result<TemplateSet, ReconError> {
        TemplateSet::from_phrases(&self.templates)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
