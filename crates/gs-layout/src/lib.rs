//! `gs-layout` — the airport surface as an immutable directed multigraph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`model`]    | `Node`, `Edge`, `Leg` and their kind enums                 |
//! | [`network`]  | `Layout` (CSR leg adjacency), `LayoutBuilder`, specs       |
//! | [`document`] | `LayoutDocument` (serde), `Layout::from_json`              |
//! | [`error`]    | `LayoutError`, `LayoutResult<T>`                           |
//!
//! A `Layout` is built once per run and shared read-only (`Arc<Layout>`) by
//! every other component.

pub mod document;
pub mod error;
pub mod model;
pub mod network;

#[cfg(test)]
mod tests;

pub use document::{EdgeDocument, Entries, LayoutDocument, NodeDocument};
pub use error::{LayoutError, LayoutResult};
pub use model::{AllowedFlow, Edge, EdgeKind, Leg, Node, NodeKind};
pub use network::{EdgeSpec, Layout, LayoutBuilder, NodeSpec};
