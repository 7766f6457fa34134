// Copyright 2026 Campus Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Campus Scout: find an institution's official website and pull
//! topic-specific content (placements, fees, admissions, ...) from it,
//! falling back to third-party aggregator pages when the official site has
//! nothing useful.
//!
//! The [`Scout`] facade bundles everything an operation needs. Candidate
//! resolution goes through the reference catalogs and a chain of web search
//! providers; content retrieval drives a headless browser through the
//! [`renderer::Renderer`] trait.

pub mod acquisition;
pub mod adequacy;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod extract;
pub mod renderer;
pub mod resolver;
pub mod retrieval;
pub mod scout;
pub mod search;
pub mod topic;
pub mod types;

pub use catalog::Catalogs;
pub use config::ScoutConfig;
pub use error::{ScoutError, ScoutResult};
pub use scout::{default_search_chain, AggregatorPolicy, Scout};
pub use topic::Topic;
pub use types::{
    ConfidenceTier, InstitutionCandidate, Origin, PageContentRecord, SearchResult, SourceTag,
};
