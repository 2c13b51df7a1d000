//! Field-path resolution over schema-less JSON documents.
//!
//! A template field maps to its value through a dotted path such as
//! `user.payDetail.total_salary_amount`. Resolution is total: a path that
//! cannot be followed yields the field's default instead of an error, so a
//! partially populated document still renders.

pub mod ast;
pub mod display;
pub mod engine;
mod parser;

// --- Public API ---
pub use ast::FieldPath;
pub use display::display_string;
pub use engine::{DataNode, resolve, resolve_path, select};
pub use parser::parse_path;
