//! The message-to-display-tree renderer.

use crate::block::{DisplayBlock, DisplayTree, Reference, ReferenceList};
use bionexus_types::{
    AnalysisPayload, DetailedResults, GraphReport, LiteratureReport, Message, MessageBody, Sender,
};
use serde_json::Value;

/// Per-render presentation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Render literature reference lists expanded instead of collapsed.
    pub expand_references: bool,
}

/// Renders one message into its display tree.
///
/// User messages become a single right-aligned bubble. Bot messages
/// are interpreted as an analysis payload when possible (parsing a
/// string body as JSON first); anything that fails to parse, or that
/// lacks `detailed_results`, falls back to a plain bot bubble with the
/// raw text.
pub fn render(message: &Message, options: RenderOptions) -> DisplayTree {
    match message.sender {
        Sender::User => vec![DisplayBlock::UserBubble(message.body.as_display_text())],
        Sender::Bot => render_bot(&message.body, options),
    }
}

fn render_bot(body: &MessageBody, options: RenderOptions) -> DisplayTree {
    let value: Option<Value> = match body {
        MessageBody::Structured(value) => Some(value.clone()),
        MessageBody::Text(text) => serde_json::from_str(text).ok(),
    };

    let payload = value.and_then(|v| serde_json::from_value::<AnalysisPayload>(v).ok());
    match payload {
        Some(payload) => render_payload(&payload, options),
        None => vec![DisplayBlock::BotBubble(body.as_display_text())],
    }
}

/// Emits the structured sections in their fixed order: graph, target,
/// literature, synthesis. A section whose data key is absent is
/// suppressed entirely.
fn render_payload(payload: &AnalysisPayload, options: RenderOptions) -> DisplayTree {
    let mut tree = Vec::new();
    let DetailedResults {
        graph,
        opentargets,
        pubmed,
    } = &payload.detailed_results;

    if let Some(graph) = graph {
        tree.push(graph_section(graph));
    }
    if let Some(targets) = opentargets {
        tree.push(DisplayBlock::TargetSection {
            content: pretty_text(targets),
        });
    }
    if let Some(section) = pubmed.as_ref().and_then(|p| literature_section(p, options)) {
        tree.push(section);
    }
    if let Some(synthesis) = &payload.synthesis {
        tree.push(DisplayBlock::SynthesisSection {
            content: synthesis.clone(),
        });
    }

    tree
}

fn graph_section(graph: &GraphReport) -> DisplayBlock {
    let analysis = graph.graph_analysis.clone().unwrap_or_default();
    DisplayBlock::GraphSection {
        node_count: analysis.node_count,
        relationship_count: analysis.relationship_count,
        community_count: analysis.communities.len(),
        summary: graph.summary.clone().filter(|s| !s.is_empty()),
    }
}

/// The literature section requires an answer; documents alone render
/// nothing.
fn literature_section(report: &LiteratureReport, options: RenderOptions) -> Option<DisplayBlock> {
    let answer = report.answer.clone()?;

    let references = if report.documents.is_empty() {
        None
    } else {
        Some(ReferenceList {
            entries: report
                .documents
                .iter()
                .map(|doc| Reference {
                    title: doc.metadata.title.clone(),
                    pmid: doc.metadata.pmid.clone(),
                })
                .collect(),
            expanded: options.expand_references,
        })
    };

    Some(DisplayBlock::LiteratureSection { answer, references })
}

/// Pretty-prints opaque structured data; plain strings stay bare.
fn pretty_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_default(message: &Message) -> DisplayTree {
        render(message, RenderOptions::default())
    }

    #[test]
    fn test_user_message_is_a_single_bubble() {
        let tree = render_default(&Message::user("hello"));
        assert_eq!(tree, vec![DisplayBlock::UserBubble("hello".into())]);
    }

    #[test]
    fn test_plain_bot_text_renders_verbatim() {
        let tree = render_default(&Message::bot_text("hello"));
        assert_eq!(tree, vec![DisplayBlock::BotBubble("hello".into())]);
    }

    #[test]
    fn test_non_analysis_json_falls_back_to_bubble() {
        let tree = render_default(&Message::bot_text("{\"answer\": \"42\"}"));
        assert_eq!(
            tree,
            vec![DisplayBlock::BotBubble("{\"answer\": \"42\"}".into())]
        );
    }

    #[test]
    fn test_graph_only_payload_renders_one_section_with_defaults() {
        let message = Message::bot_text(
            "{\"detailed_results\":{\"graph\":{\"graph_analysis\":{\"node_count\":3}}}}",
        );

        let tree = render_default(&message);

        assert_eq!(
            tree,
            vec![DisplayBlock::GraphSection {
                node_count: 3,
                relationship_count: 0,
                community_count: 0,
                summary: None,
            }]
        );
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let message = Message::bot_payload(json!({
            "detailed_results": {
                "pubmed": { "answer": "Reported association." },
                "opentargets": { "targets": ["EGFR"] },
                "graph": {
                    "graph_analysis": {
                        "node_count": 5,
                        "relationship_count": 7,
                        "communities": [{}, {}]
                    },
                    "summary": "Two clusters."
                }
            },
            "synthesis": "Converging evidence."
        }));

        let tree = render_default(&message);

        assert_eq!(tree.len(), 4);
        assert!(matches!(
            tree[0],
            DisplayBlock::GraphSection {
                node_count: 5,
                relationship_count: 7,
                community_count: 2,
                ..
            }
        ));
        assert!(matches!(tree[1], DisplayBlock::TargetSection { .. }));
        assert!(matches!(tree[2], DisplayBlock::LiteratureSection { .. }));
        assert!(matches!(tree[3], DisplayBlock::SynthesisSection { .. }));
    }

    #[test]
    fn test_references_default_collapsed() {
        let message = Message::bot_payload(json!({
            "detailed_results": {
                "pubmed": {
                    "answer": "Well studied.",
                    "documents": [
                        { "metadata": { "title": "TP53 review", "pmid": "111" } },
                        { "metadata": { "title": "Follow-up study", "pmid": "222" } }
                    ]
                }
            }
        }));

        let tree = render_default(&message);

        let DisplayBlock::LiteratureSection { references, .. } = &tree[0] else {
            panic!("expected a literature section");
        };
        let references = references.as_ref().unwrap();
        assert!(!references.expanded);
        assert_eq!(references.entries.len(), 2);
        assert_eq!(references.entries[0].pmid, "111");
    }

    #[test]
    fn test_expand_references_option() {
        let message = Message::bot_payload(json!({
            "detailed_results": {
                "pubmed": {
                    "answer": "Well studied.",
                    "documents": [{ "metadata": { "title": "Review", "pmid": "111" } }]
                }
            }
        }));

        let tree = render(
            &message,
            RenderOptions {
                expand_references: true,
            },
        );

        let DisplayBlock::LiteratureSection { references, .. } = &tree[0] else {
            panic!("expected a literature section");
        };
        assert!(references.as_ref().unwrap().expanded);
    }

    #[test]
    fn test_literature_without_answer_is_suppressed() {
        let message = Message::bot_payload(json!({
            "detailed_results": {
                "pubmed": {
                    "documents": [{ "metadata": { "title": "Orphan doc", "pmid": "333" } }]
                }
            }
        }));

        let tree = render_default(&message);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_target_section_pretty_prints_objects() {
        let message = Message::bot_payload(json!({
            "detailed_results": { "opentargets": { "target": "EGFR" } }
        }));

        let tree = render_default(&message);

        let DisplayBlock::TargetSection { content } = &tree[0] else {
            panic!("expected a target section");
        };
        assert!(content.contains("\"target\": \"EGFR\""));
    }
}
