//! Interactive salary dashboard for the data industry.
//!
//! ```text
//!  CSV (remote or local)
//!        │
//!        ▼
//!   data::loader ──► SalaryDataset
//!        │
//!        ▼
//!   data::filter ──► FilteredView      (per FilterSelection)
//!        │
//!        ▼
//!   data::aggregate ──► AggregateResult
//!        │
//!        ▼
//!   presentation + theme ──► DashboardView ──► ui
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod presentation;
pub mod state;
pub mod theme;
pub mod ui;
