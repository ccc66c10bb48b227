//! Typed shape of the analysis service response.
//!
//! The remote service returns arbitrary JSON; this is the recognized
//! subset. Anything that fails to deserialize into [`AnalysisPayload`]
//! (or lacks `detailed_results`) is treated as opaque text by the
//! renderer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level recognized response from the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    /// The structured sub-analyses. Its presence is what distinguishes
    /// a structured response from opaque text.
    pub detailed_results: DetailedResults,
    /// Final free-text synthesis across all sub-analyses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<String>,
}

/// The structured sub-analyses of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedResults {
    /// Knowledge-graph analysis results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphReport>,
    /// OpenTargets target analysis, kept as raw JSON and rendered
    /// pretty-printed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opentargets: Option<Value>,
    /// PubMed literature analysis results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubmed: Option<LiteratureReport>,
}

/// Knowledge-graph section of a response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_analysis: Option<GraphAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Graph statistics. Absent counts default to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphAnalysis {
    #[serde(default)]
    pub node_count: u64,
    #[serde(default)]
    pub relationship_count: u64,
    /// Detected communities; only their number is displayed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub communities: Vec<Value>,
}

/// Literature (PubMed) section of a response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiteratureReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentRef>,
}

/// A referenced document in the literature section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub metadata: DocumentMeta,
}

/// Display metadata for a referenced document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pmid: String,
}
