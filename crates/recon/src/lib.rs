//! `adcheck-recon`: ad group structure and activity reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded tables, returns result records and
//! per-account rollups. No CLI or IO dependencies.

pub mod activity;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod rollup;
pub mod summary;

pub use config::CheckConfig;
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use model::{
    AccountRollup, ReconInput, ReconReport, RecordKind, ResultRecord, Status, Table, TableKind,
    RESULT_HEADERS,
};
pub use rollup::{rollup_account, selectable_accounts};
