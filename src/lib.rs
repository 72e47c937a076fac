//! loanview - A data-view engine for loan portfolio feeds
//!
//! Fetches a loan record feed once per session, then filters, sorts and
//! pages it on demand:
//!
//! - `source`: where records come from, with a staleness cache
//! - `filter`, `sort`, `pagination`: the pure engine stages
//! - `view`: the session state container and memoized pipeline
//! - `present`: table and JSON rendering
//! - `cli`: the `loanview` binary

pub mod cli;
pub mod config;
pub mod filter;
pub mod observability;
pub mod pagination;
pub mod present;
pub mod record;
pub mod sort;
pub mod source;
pub mod view;
