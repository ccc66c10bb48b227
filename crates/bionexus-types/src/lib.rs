//! Shared types for the BioNexus terminal client.
//!
//! This crate holds the message types exchanged between the chat
//! controller, the query gateway, and the renderer, plus the typed
//! shape of the analysis payload returned by the remote service.

mod message;
mod payload;

pub use message::{Message, MessageBody, Sender};
pub use payload::{
    AnalysisPayload, DetailedResults, DocumentMeta, DocumentRef, GraphAnalysis, GraphReport,
    LiteratureReport,
};
