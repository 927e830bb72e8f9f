//! Data layer: the pure exploration pipeline over an immutable table.
//!
//! Architecture:
//! ```text
//!  uploaded .csv bytes
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  ingest   │  parse bytes → Table (once per upload)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐       ┌──────────┐       ┌──────────────┐
//!   │ project   │       │  chart    │       │ filter+sort   │
//!   │ cols+head │       │ specify   │       │ membership,   │
//!   └──────────┘       └──────────┘       │ stable sort   │
//!        │                   │             └──────────────┘
//!        ▼                   ▼                    │
//!    Table view       ChartDescriptor             ▼
//!                      (1–10, isolated)       Table view
//! ```
//!
//! Every stage is a pure function of (table, options); the UI host owns all
//! mutable state and re-runs stages 2–4 on each interaction. Failures are
//! [`error::ExploreError`] values, never panics.

pub mod chart;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod model;
pub mod project;
