//! Display block types.
//!
//! A rendered message is an ordered list of blocks. Plain messages
//! render as a single bubble; structured analysis responses render as
//! up to four sections in a fixed order (graph, target, literature,
//! synthesis), each present only when its data is present.

/// The rendered form of one message.
pub type DisplayTree = Vec<DisplayBlock>;

/// One block of rendered output.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayBlock {
    /// Plain text from the user, shown right-aligned.
    UserBubble(String),
    /// Plain text from the bot.
    BotBubble(String),
    /// Knowledge-graph statistics and optional summary.
    GraphSection {
        node_count: u64,
        relationship_count: u64,
        community_count: usize,
        summary: Option<String>,
    },
    /// OpenTargets analysis, pre-formatted as pretty JSON.
    TargetSection { content: String },
    /// Literature answer with an optional collapsible reference list.
    LiteratureSection {
        answer: String,
        references: Option<ReferenceList>,
    },
    /// Final free-text synthesis.
    SynthesisSection { content: String },
}

/// A collapsible list of referenced documents.
///
/// The list defaults to collapsed; the surface owns the toggle and
/// re-renders with [`expanded`](ReferenceList::expanded) set.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceList {
    pub entries: Vec<Reference>,
    pub expanded: bool,
}

/// A single referenced document (title + PubMed identifier).
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub title: String,
    pub pmid: String,
}
