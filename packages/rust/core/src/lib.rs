//! Core pipeline orchestration for mdtoolkit.
//!
//! Ties together path resolution, discovery, grouping and the converter
//! backends into the two end-to-end workflows: [`convert::run_convert`] and
//! [`merge::run_merge`].

pub mod convert;
pub mod grouping;
pub mod merge;
pub mod pipeline;
pub mod report;
pub mod resolver;
