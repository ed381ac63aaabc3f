//! Relevance highlighting for SBGN pathway diagrams.
//!
//! A user selects a few nodes of a diagram; this library decides which part
//! of the diagram matters to that selection and turns the answer into style
//! instructions for a renderer.
//!
//! - [`propagate()`] spreads relevance weights from the selection through
//!   processes, containers and complexes.
//! - [`HighlightTracker`] accumulates highlighted nodes and edges across
//!   selections and projects them onto a [`StyleBypass`].
//! - [`HighlightConfig`] holds the emphasis values, loadable from YAML.
//!
//! # Example
//!
//! ```
//! use pathway_graph::{Edge, GlyphClass, Node, NodeId, PathwayGraph};
//! use pathway_highlight::{HighlightTracker, StyleBypass};
//!
//! let graph = PathwayGraph::from_parts(
//!     vec![
//!         Node::new("glc", GlyphClass::SimpleChemical),
//!         Node::new("hk", GlyphClass::Process),
//!         Node::new("g6p", GlyphClass::SimpleChemical),
//!     ],
//!     vec![Edge::new("c1", "glc", "hk"), Edge::new("p1", "hk", "g6p")],
//! )?;
//!
//! let mut tracker = HighlightTracker::with_default_config();
//! let mut sink: Option<StyleBypass> = None;
//! tracker.highlight_processes(&graph, &[NodeId::from("glc")], &mut sink);
//!
//! assert_eq!(tracker.state().nodes().len(), 3);
//! assert!(sink.is_some());
//! # Ok::<(), pathway_graph::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod highlight;
pub mod propagate;
pub mod style;
pub mod weights;

pub use config::{EmphasisPolicy, HighlightConfig};
pub use error::{Error, Result};
pub use highlight::{
    HighlightDelta, HighlightState, HighlightTracker, SharedHighlightTracker, new_shared_tracker,
};
pub use propagate::propagate;
pub use style::{EdgeStyle, LabelScale, NodeStyle, StyleBypass, StyleSink, label_size, label_sizes};
pub use weights::{SELECTED, UNSELECTED, Weight, WeightMap};
