//! Domain types for pathway diagrams.
//!
//! This module contains the node and edge records of an SBGN process
//! description map, as read by the relevance algorithms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for an edge or a merged edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Create a new edge ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// SBGN glyph class of a node.
///
/// Serialized with the SBGN-ML spelling (`"simple chemical"`, `"process"`, ...).
/// Unrecognized classes deserialize to [`GlyphClass::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlyphClass {
    /// Reaction or transition between entity pools
    #[serde(rename = "process")]
    Process,

    /// Process whose details are omitted
    #[serde(rename = "omitted process")]
    OmittedProcess,

    /// Process whose existence is uncertain
    #[serde(rename = "uncertain process")]
    UncertainProcess,

    /// Association of entity pools into a complex
    #[serde(rename = "association")]
    Association,

    /// Dissociation of a complex into entity pools
    #[serde(rename = "dissociation")]
    Dissociation,

    /// Small molecule (metabolite, ion, ...)
    #[serde(rename = "simple chemical")]
    SimpleChemical,

    /// Protein, RNA or other large molecule
    #[serde(rename = "macromolecule")]
    Macromolecule,

    /// Gene or other nucleic acid feature
    #[serde(rename = "nucleic acid feature")]
    NucleicAcidFeature,

    /// Entity pool of unspecified type
    #[serde(rename = "unspecified entity")]
    UnspecifiedEntity,

    /// External influence on the system
    #[serde(rename = "perturbing agent")]
    PerturbingAgent,

    /// Creation or degradation boundary
    #[serde(rename = "source and sink")]
    SourceAndSink,

    /// Observable phenotype
    #[serde(rename = "phenotype")]
    Phenotype,

    /// Molecular complex; its children are its components
    #[serde(rename = "complex")]
    Complex,

    /// Cellular location containing other nodes
    #[serde(rename = "compartment")]
    Compartment,

    /// Any class the relevance algorithms do not distinguish
    #[serde(other)]
    #[serde(rename = "other")]
    Other,
}

impl GlyphClass {
    /// Returns the SBGN-ML spelling of the class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::OmittedProcess => "omitted process",
            Self::UncertainProcess => "uncertain process",
            Self::Association => "association",
            Self::Dissociation => "dissociation",
            Self::SimpleChemical => "simple chemical",
            Self::Macromolecule => "macromolecule",
            Self::NucleicAcidFeature => "nucleic acid feature",
            Self::UnspecifiedEntity => "unspecified entity",
            Self::PerturbingAgent => "perturbing agent",
            Self::SourceAndSink => "source and sink",
            Self::Phenotype => "phenotype",
            Self::Complex => "complex",
            Self::Compartment => "compartment",
            Self::Other => "other",
        }
    }

    /// Returns `true` for the `process` class.
    ///
    /// Only the plain `process` glyph takes part in weight propagation;
    /// omitted and uncertain processes are treated like any other node.
    #[must_use]
    pub fn is_process(self) -> bool {
        matches!(self, Self::Process)
    }

    /// Returns `true` for the `complex` class.
    #[must_use]
    pub fn is_complex(self) -> bool {
        matches!(self, Self::Complex)
    }

    /// Returns `true` for container classes (complexes and compartments).
    ///
    /// Renderers draw these with a separate compound emphasis channel.
    #[must_use]
    pub fn is_compound(self) -> bool {
        matches!(self, Self::Complex | Self::Compartment)
    }
}

impl fmt::Display for GlyphClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a pathway diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for the node
    pub id: NodeId,

    /// SBGN glyph class
    pub glyph_class: GlyphClass,

    /// Owning complex or compartment (None for top-level nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

impl Node {
    /// Create a top-level node
    pub fn new(id: impl Into<NodeId>, glyph_class: GlyphClass) -> Self {
        Self {
            id: id.into(),
            glyph_class,
            parent: None,
        }
    }

    /// Place the node inside the given parent
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// An arc between two nodes.
///
/// Arcs have a direction in SBGN, but neighbor queries treat them as undirected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for the edge
    pub id: EdgeId,

    /// Source node
    pub source: NodeId,

    /// Target node
    pub target: NodeId,
}

impl Edge {
    /// Create a new edge
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns the endpoint opposite to `node`, or `None` if `node` is not an endpoint.
    #[must_use]
    pub fn opposite(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.source == node {
            Some(&self.target)
        } else if &self.target == node {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// Visual collapse of parallel edges between the same pair of nodes.
///
/// Merged edges carry no weight semantics of their own; they only take part
/// in neighbor highlighting and in the style projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedEdge {
    /// Identifier of the form `merged:<a>:<b>` with endpoint ids sorted and
    /// any `\` or `:` inside them escaped with a backslash
    pub id: EdgeId,

    /// Lexicographically smaller endpoint
    pub source: NodeId,

    /// Lexicographically larger endpoint
    pub target: NodeId,

    /// Edges collapsed into this one, in insertion order
    pub members: Vec<EdgeId>,
}

impl MergedEdge {
    /// Build the merged edge id for an unordered endpoint pair.
    ///
    /// Distinct pairs always get distinct ids, even when node ids contain `:`.
    #[must_use]
    pub fn id_for(a: &NodeId, b: &NodeId) -> EdgeId {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        EdgeId(format!("merged:{}:{}", escape_endpoint(lo), escape_endpoint(hi)))
    }

    /// Returns `true` if `node` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}

fn escape_endpoint(id: &NodeId) -> String {
    let mut escaped = String::with_capacity(id.as_str().len());
    for c in id.as_str().chars() {
        if matches!(c, '\\' | ':') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
