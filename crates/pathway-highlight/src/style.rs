//! Style instructions handed to the renderer.
//!
//! The highlight core never draws anything. It projects the highlighted node
//! and edge sets onto a [`StyleBypass`]: a per-element override of the
//! renderer's default style, keyed by node and edge id. A [`StyleSink`]
//! receives the bypass; clearing the sink restores the default style.
//!
//! # JSON Shape
//!
//! ```json
//! {
//!   "nodes": { "glc": { "opacity": 1.0 }, "cytosol": { "compoundOpacity": 0.25 } },
//!   "edges": { "e1": { "opacity": 0.85, "mergeOpacity": 0.85 } }
//! }
//! ```

use crate::config::EmphasisPolicy;
use crate::error::Result;
use crate::highlight::HighlightState;
use pathway_graph::{EdgeId, GlyphClass, GraphQueryPort, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Emphasis override for one node.
///
/// Containers (complexes and compartments) are emphasised through
/// `compound_opacity`, every other glyph through `opacity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Opacity of a simple node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// Opacity of a compound node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound_opacity: Option<f64>,
}

impl NodeStyle {
    fn for_glyph(glyph_class: GlyphClass, value: f64) -> Self {
        if glyph_class.is_compound() {
            Self {
                opacity: None,
                compound_opacity: Some(value),
            }
        } else {
            Self {
                opacity: Some(value),
                compound_opacity: None,
            }
        }
    }
}

/// Emphasis override for one edge or merged edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    /// Opacity of the edge
    pub opacity: f64,

    /// Opacity of the edge when drawn merged with its parallels
    pub merge_opacity: f64,
}

impl EdgeStyle {
    fn uniform(value: f64) -> Self {
        Self {
            opacity: value,
            merge_opacity: value,
        }
    }
}

/// Per-element style overrides for a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleBypass {
    /// Node overrides by node id
    pub nodes: BTreeMap<NodeId, NodeStyle>,

    /// Edge overrides by edge or merged-edge id
    pub edges: BTreeMap<EdgeId, EdgeStyle>,
}

impl StyleBypass {
    /// Project a highlight state onto every node, edge and merged edge of a graph.
    ///
    /// Elements outside the state are dimmed, elements inside it are
    /// emphasised. Highlighted ids the graph no longer holds are ignored.
    pub fn project<G>(graph: &G, state: &HighlightState, emphasis: &EmphasisPolicy) -> Self
    where
        G: GraphQueryPort + ?Sized,
    {
        let mut bypass = Self::default();

        for node in graph.all_nodes() {
            let value = if state.contains_node(&node.id) {
                emphasis.highlighted_node
            } else {
                emphasis.dimmed_node
            };
            bypass
                .nodes
                .insert(node.id.clone(), NodeStyle::for_glyph(node.glyph_class, value));
        }

        let edge_ids = graph
            .all_edges()
            .into_iter()
            .map(|edge| edge.id.clone())
            .chain(graph.merged_edges().into_iter().map(|merged| merged.id));
        for id in edge_ids {
            let value = if state.contains_edge(&id) {
                emphasis.highlighted_edge
            } else {
                emphasis.dimmed_edge
            };
            bypass.edges.insert(id, EdgeStyle::uniform(value));
        }

        bypass
    }

    /// Returns `true` if the bypass overrides nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Serialize to the renderer's JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Receiver of style instructions, typically a diagram renderer.
pub trait StyleSink {
    /// Replace the current overrides with `bypass`.
    fn apply(&mut self, bypass: &StyleBypass);

    /// Drop every override, including selection glow or other decorations
    /// layered on top, restoring the default style.
    fn clear(&mut self);
}

/// Holds the most recent bypass; `None` stands for the default style.
impl StyleSink for Option<StyleBypass> {
    fn apply(&mut self, bypass: &StyleBypass) {
        *self = Some(bypass.clone());
    }

    fn clear(&mut self) {
        *self = None;
    }
}

/// Label size preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelScale {
    /// Sizes for hand-loaded diagrams
    #[default]
    Normal,

    /// Larger sizes for the bundled sample diagrams
    Enlarged,
}

/// Label font size for a glyph.
///
/// Simple chemicals get a smaller label than other glyphs.
#[must_use]
pub fn label_size(glyph_class: GlyphClass, scale: LabelScale) -> u32 {
    let small = glyph_class == GlyphClass::SimpleChemical;
    match (scale, small) {
        (LabelScale::Normal, false) => 11,
        (LabelScale::Normal, true) => 9,
        (LabelScale::Enlarged, false) => 16,
        (LabelScale::Enlarged, true) => 13,
    }
}

/// Label font size for every node of a graph.
pub fn label_sizes<G>(graph: &G, scale: LabelScale) -> BTreeMap<NodeId, u32>
where
    G: GraphQueryPort + ?Sized,
{
    graph
        .all_nodes()
        .into_iter()
        .map(|node| (node.id.clone(), label_size(node.glyph_class, scale)))
        .collect()
}
