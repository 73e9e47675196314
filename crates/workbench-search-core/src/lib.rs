//! # Workbench Search Core
//!
//! Shared, WASM-safe logic for Workbench Search: the content model, the
//! corpus adapter, the ranking engine, and the query-interface state
//! machines.
//!
//! This crate performs no filesystem, network, or terminal I/O. It compiles
//! to both native targets and `wasm32-unknown-unknown`; hosts supply the
//! corpus, the clock, and (optionally) a [`store::KeyValueStore`].
//!
//! ## Example
//!
//! ```rust
//! use workbench_search_core::corpus::{parse_collection, ContentRegistry};
//! use workbench_search_core::manager::SearchManager;
//! use workbench_search_core::models::{ContentKind, SearchFilters};
//!
//! let json = r#"[{"slug":"wasm-search","title":"Search in WASM","excerpt":"Client-side ranking",
//!                 "category":"Web Development","date":"2025-02-01","tags":["Rust"]}]"#;
//! let mut registry = ContentRegistry::new();
//! registry.register(parse_collection(ContentKind::Article, json).unwrap()).unwrap();
//!
//! let manager = SearchManager::default();
//! manager.initialize(registry.into_items());
//! let results = manager.search("wasm", &SearchFilters::default());
//! assert_eq!(results[0].item.id, "wasm-search");
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Items, results, filters, facet options |
//! | [`corpus`] | Source records → searchable items |
//! | [`manager`] | Index ownership, query execution, caching |
//! | [`scoring`] | Weighted scoring and highlight extraction |
//! | [`text`] | Literal case-insensitive matching and markup |
//! | [`events`] | Search observers |
//! | [`interface`] | Debouncer, result cursor, filter panel |
//! | [`history`] | Recent-query history |
//! | [`store`] | Key-value persistence trait |

pub mod corpus;
pub mod events;
pub mod history;
pub mod interface;
pub mod manager;
pub mod models;
pub mod scoring;
pub mod store;
pub mod text;
