//! Rendafixa - Brazilian fixed-income yield simulator
//!
//! This library computes gross and net returns for CDB, LCI and LCA
//! investments after regressive income tax (IR), IOF and custody fees,
//! fetches the CDI reference rate and renders comparison reports.

pub mod calculator;
pub mod cdi;
pub mod config;
pub mod error;
pub mod reports;
pub mod term;
pub mod utils;
