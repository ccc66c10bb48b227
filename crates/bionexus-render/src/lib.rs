//! Message rendering.
//!
//! Turns a chat [`Message`] into a [`DisplayTree`] of presentation
//! blocks. Rendering is pure: the same message and options always
//! produce the same tree, and all styling/painting is left to the
//! surface that consumes the tree.

mod block;
mod renderer;

pub use block::{DisplayBlock, DisplayTree, Reference, ReferenceList};
pub use renderer::{render, RenderOptions};
