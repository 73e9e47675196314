//! # Workbench Search
//!
//! Full-text search and faceted filtering over a portfolio site's projects,
//! articles, and case studies.
//!
//! The ranking engine lives in [`workbench_search_core`] and runs wherever
//! the site does (native or WASM). This crate is the native host: it reads a
//! TOML config, loads the JSON content collections it names, and exposes the
//! engine through the `wbs` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────┐
//! │ content/*.json│──▶│ corpus adapter│──▶│ SearchManager  │
//! │ projects etc. │   │  + registry   │   │ score / cache  │
//! └──────────────┘   └──────────────┘   └───────┬───────┘
//!                                               │
//!                        ┌──────────────────────┤
//!                        ▼                      ▼
//!                  ┌──────────┐          ┌────────────┐
//!                  │   CLI    │          │  history   │
//!                  │  (wbs)   │          │ (FileStore)│
//!                  └──────────┘          └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! wbs sources                         # check content files
//! wbs search "edge caching"           # ranked, highlighted results
//! wbs search "" --type article --since 2024-01-01
//! wbs suggest port                    # autocomplete
//! wbs facets --json                   # filter options
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`sources`] | Content loading and source status |
//! | [`search`] | Search, suggestions, facets |
//! | [`get`] | Single-item lookup |
//! | [`stats`] | Corpus summary |
//! | [`recent`] | Recent-query history |
//! | [`file_store`] | JSON-file key-value store |
//! | [`observer`] | Search event logging |
//! | [`display`] | Terminal highlight rendering |

pub mod config;
pub mod display;
pub mod file_store;
pub mod get;
pub mod observer;
pub mod recent;
pub mod search;
pub mod sources;
pub mod stats;
