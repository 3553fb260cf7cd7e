// Human-readable output: table shapes, run summary, account drill-down

use std::fmt::Write;
use std::time::Duration;

use adcheck_recon::model::{ReconSummary, TableShape};
use adcheck_recon::AccountRollup;

pub fn shape_line(shape: &TableShape) -> String {
    format!(
        "{}: {} rows x {} columns",
        shape.table.file_label(),
        shape.rows,
        shape.columns
    )
}

pub fn summary_line(s: &ReconSummary, elapsed: Duration) -> String {
    format!(
        "{} customer(s), {} record(s): {} with active ads, {} with active keywords, \
         {} without a valid ad group (processed in {:.2}s)",
        s.customers,
        s.total_records,
        s.active_ads,
        s.active_keywords,
        s.placeholders,
        elapsed.as_secs_f64()
    )
}

/// Left-aligned text table with a dashed rule under the header.
fn text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

pub fn rollup_table(rollup: &AccountRollup) -> String {
    let headers = [
        "Ad group",
        "Campaign",
        "Customer ID",
        "ads",
        "ads count",
        "keywords",
        "keywords count",
    ];
    let rows: Vec<Vec<String>> = rollup
        .groups
        .iter()
        .map(|g| {
            vec![
                g.ad_group.clone(),
                g.campaign.clone(),
                g.customer_id.clone(),
                g.ads_status.to_string(),
                g.ads_count.to_string(),
                g.keywords_status.to_string(),
                g.keywords_count.to_string(),
            ]
        })
        .collect();

    let t = &rollup.totals;
    let mut out = format!("Account: {}\n\n", rollup.account_name);
    out.push_str(&text_table(&headers, &rows));
    let _ = write!(
        out,
        "\nunique ad groups: {}\ntotal ads: {}\n\
         ad groups with active ads: {}\nad groups with active keywords: {}\n",
        t.unique_ad_groups,
        t.total_ads,
        t.groups_with_active_ads,
        t.groups_with_active_keywords
    );
    out
}
