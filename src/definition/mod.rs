//! Script-definition data model and document parsing.

mod parse;
mod types;

pub use parse::{parse_document, ParsedDocument, Strictness};
pub use types::{
    visit_definitions, ArgValue, CommandEntry, CommandSpec, Scalar, ScriptDefinition, ScriptNode,
};
