//! Compound graph model for SBGN pathway diagrams.
//!
//! This library provides the node/edge model of a pathway diagram, the
//! read-only [`GraphQueryPort`] that relevance algorithms consume, and
//! [`PathwayGraph`], an in-memory implementation backed by petgraph.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod domain;
pub mod error;
pub mod memory;
pub mod port;

pub use domain::{Edge, EdgeId, GlyphClass, MergedEdge, Node, NodeId};
pub use error::{Error, Result};
pub use memory::{PathwayGraph, Removal};
pub use port::{FirstNeighbors, GraphQueryPort};
