//! # Estate Maps
//!
//! A hierarchical map-region resolution engine for real-estate floor plans.
//!
//! ## Features
//!
//! - Normalize region geometry (pixel paths, point arrays) into [0,1]² space
//! - Classify polymorphic region children into locality and map references
//! - Aggregate occupancy across linked maps, cycle-safe and memoized
//! - Order the project tree deterministically for persisted sort keys
//! - Project filterable, sortable locality tables
//! - Plan full-snapshot persistence syncs
//!
//! ## Example
//!
//! ```no_run
//! use estate_maps::model::HierarchyScope;
//! use estate_maps::parser::load_envelope;
//! use estate_maps::resolve::resolve_envelope;
//!
//! let envelope = load_envelope("project.json").expect("Failed to load");
//! let resolved = resolve_envelope(&envelope, HierarchyScope::Hierarchy);
//! println!("Project: {}", resolved.name);
//! println!("Localities: {}", resolved.localities.len());
//! ```

pub mod error;
pub mod export;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod resolve;
pub mod sync;
pub mod table;
pub mod text;
pub mod ui;
