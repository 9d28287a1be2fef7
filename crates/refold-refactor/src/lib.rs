//! Syntax-level refactorings for Refold.
//!
//! Today this crate exposes:
//! - Split into nested `if` for guards joined by `&&` (`split_into_nested_if_action`)
//! - Replace a getter/setter method pair with a property (`replace_method_with_property_action`)
//!
//! Every entrypoint takes an immutable [`Document`] and a selection and returns an optional
//! [`TransformAction`]. Actions are deferred: applying one produces a new document and leaves
//! the input alone. The algorithms are written against the [`facts`] traits so they can be
//! reused for other rowan languages; the C# front-end from `refold-syntax` is wired in through
//! [`CSharpFacts`].

mod accessors;
mod action;
mod document;
pub mod facts;
mod lookup;
mod replace_method_with_property;
mod split_if;
mod symbols;
pub mod trivia;

pub use accessors::{
    merge_leading_trivia, override_warning, GetAndSetMethods, METHOD_OVERRIDES_METADATA_WARNING,
};
pub use action::{check_cancelled, Cancelled, TransformAction};
pub use document::{Annotation, AnnotationKind, Document};
pub use facts::{CSharpFacts, ConditionalFacts, SyntaxFacts, TriviaKind};
pub use lookup::{find_enclosing_node, relevant_method_declaration};
pub use replace_method_with_property::replace_method_with_property_action;
pub use split_if::{split_condition, split_into_nested, split_into_nested_if_action, SplitCondition};
pub use symbols::{
    overrides_metadata_symbol, FileId, Location, MetadataMethod, MetadataType, MethodSymbol,
    SymbolIndex,
};

pub use text_size::{TextRange, TextSize};
pub use tokio_util::sync::CancellationToken;
