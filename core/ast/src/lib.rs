#![warn(clippy::pedantic)]
//! Syntax trees for the Javelin compiler front end.
//!
//! The crate is organised around a single owned tree type, [`nodes::Tree`]:
//! a node id, a position, an optional type annotation and a [`nodes::TreeKind`]
//! holding one of the concrete node shapes. On top of that it provides:
//!
//! - [`builder::TreeBuilder`], the factory every tree is created through;
//! - [`position`] helpers computing start, end and diagnostic positions,
//!   together with the [`position::EndPosTable`] filled in by the parser;
//! - three traversals: [`visitor::Visitor`] (double dispatch with a
//!   parameter and a result), [`scanner::TreeScanner`] (read-only walk) and
//!   [`translator::TreeTranslator`] (in-place rewriting);
//! - [`copier::TreeCopier`], a deep copy with fresh node ids;
//! - [`pretty::Pretty`], a precedence-aware printer back to source text.

#[macro_use]
pub mod nodes;

pub mod builder;
pub mod copier;
pub(crate) mod enums_impl;
pub mod errors;
pub mod names;
pub(crate) mod nodes_impl;
pub mod position;
pub mod pretty;
pub mod scanner;
pub mod semantic;
pub mod tables;
pub mod translator;
pub mod tree_info;
pub mod visitor;

pub use enums_impl::{Constant, TypeTag, flags};
