use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which of the three uploaded reports a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Accounts,
    AdGroups,
    Keywords,
}

impl TableKind {
    /// Name of the export file this table is expected to come from.
    pub fn file_label(&self) -> &'static str {
        match self {
            Self::Accounts => "accounts_list",
            Self::AdGroups => "ad_group_report",
            Self::Keywords => "keyword_report",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accounts => write!(f, "accounts"),
            Self::AdGroups => write!(f, "ad_groups"),
            Self::Keywords => write!(f, "keywords"),
        }
    }
}

/// A loaded spreadsheet: header row plus data rows, all cells as text.
///
/// Every row has exactly `headers.len()` cells; absent cells are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub kind: TableKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(kind: TableKind, headers: Vec<String>) -> Self {
        Self { kind, headers, rows: Vec::new() }
    }

    /// Build a table from string slices. Mostly useful for fixtures.
    pub fn with_rows(kind: TableKind, headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = Self::new(kind, headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        table
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Index of the first header equal to `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell text, or "" when the row or column is out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn shape(&self) -> TableShape {
        TableShape {
            table: self.kind,
            rows: self.rows.len(),
            columns: self.headers.len(),
        }
    }
}

/// Row/column counts reported for each loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableShape {
    pub table: TableKind,
    pub rows: usize,
    pub columns: usize,
}

/// The three tables of one processing run.
#[derive(Debug, Clone)]
pub struct ReconInput {
    pub accounts: Table,
    pub ad_groups: Table,
    pub keywords: Table,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

pub const NO_ACTIVE_CAMPAIGNS: &str = "No active campaigns";
pub const NO_AD_GROUPS_FOUND: &str = "No IM_VDP ad groups found";
pub const NO_VALID_STRUCTURE: &str = "No Ad groups with valid Structure is found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "not active")]
    NotActive,
}

impl Status {
    pub fn from_active(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::NotActive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::NotActive => "not active",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a record describes a qualifying ad group or stands in for none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Matched,
    /// The customer has no rows in the ad-group report.
    NoAdGroups,
    /// The customer has rows, but none matched a template while Enabled.
    NoValidStructure,
}

impl RecordKind {
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Matched)
    }
}

/// Column headers of the exported result table.
pub const RESULT_HEADERS: [&str; 6] = [
    "Account name",
    "Customer ID",
    "Campaign",
    "Ad group",
    "ads",
    "keywords",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub account_name: String,
    pub customer_id: String,
    pub campaign: String,
    pub ad_group: String,
    pub ads_status: Status,
    pub keywords_status: Status,
    pub kind: RecordKind,
}

impl ResultRecord {
    /// Cell values in `RESULT_HEADERS` order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.account_name.as_str(),
            self.customer_id.as_str(),
            self.campaign.as_str(),
            self.ad_group.as_str(),
            self.ads_status.as_str(),
            self.keywords_status.as_str(),
        ]
    }

    pub(crate) fn placeholder(
        account_name: &str,
        customer_id: &str,
        campaign: &str,
        kind: RecordKind,
    ) -> Self {
        let ad_group = match kind {
            RecordKind::NoAdGroups => NO_AD_GROUPS_FOUND,
            _ => NO_VALID_STRUCTURE,
        };
        Self {
            account_name: account_name.to_string(),
            customer_id: customer_id.to_string(),
            campaign: campaign_or_default(campaign).to_string(),
            ad_group: ad_group.to_string(),
            ads_status: Status::NotActive,
            keywords_status: Status::NotActive,
            kind,
        }
    }
}

pub(crate) fn campaign_or_default(campaign: &str) -> &str {
    if campaign.is_empty() {
        NO_ACTIVE_CAMPAIGNS
    } else {
        campaign
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub total_records: usize,
    pub active_ads: usize,
    pub active_keywords: usize,
    pub placeholders: usize,
    pub customers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
    pub tables: Vec<TableShape>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub records: Vec<ResultRecord>,
}

// ---------------------------------------------------------------------------
// Account drill-down
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdGroupRollup {
    pub ad_group: String,
    pub customer_id: String,
    pub campaign: String,
    pub ads_status: Status,
    pub ads_count: usize,
    pub keywords_status: Status,
    pub keywords_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupTotals {
    pub unique_ad_groups: usize,
    pub total_ads: usize,
    pub groups_with_active_ads: usize,
    pub groups_with_active_keywords: usize,
}

/// Drill-down for one account: its qualifying ad groups by unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRollup {
    pub account_name: String,
    pub groups: Vec<AdGroupRollup>,
    pub totals: RollupTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_row_pads_and_truncates() {
        let mut t = Table::new(TableKind::Keywords, vec!["a".into(), "b".into()]);
        t.push_row(vec!["1".into()]);
        t.push_row(vec!["1".into(), "2".into(), "3".into()]);
        assert_eq!(t.rows[0], vec!["1", ""]);
        assert_eq!(t.rows[1], vec!["1", "2"]);
        assert_eq!(t.cell(5, 0), "");
        assert_eq!(t.shape().rows, 2);
        assert_eq!(t.shape().columns, 2);
    }

    #[test]
    fn status_serializes_as_report_text() {
        assert_eq!(serde_json::to_string(&Status::NotActive).unwrap(), "\"not active\"");
        assert_eq!(Status::from_active(true).to_string(), "active");
    }

    #[test]
    fn placeholder_defaults_empty_campaign() {
        let r = ResultRecord::placeholder("Acme", "100", "", RecordKind::NoValidStructure);
        assert_eq!(r.campaign, NO_ACTIVE_CAMPAIGNS);
        assert_eq!(r.ad_group, NO_VALID_STRUCTURE);
        assert!(r.kind.is_placeholder());
        assert_eq!(r.cells()[3], NO_VALID_STRUCTURE);
        assert_eq!(r.cells()[5], "not active");
    }
}
