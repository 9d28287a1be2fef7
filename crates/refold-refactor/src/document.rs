use rowan::{GreenNode, Language};
use text_size::TextRange;

use refold_syntax::SyntaxNode;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// The host should re-format this range.
    Formatter,
    /// The host should show this message to the user before applying.
    Warning(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub range: TextRange,
}

/// An immutable snapshot of a file's syntax tree plus annotations against it.
///
/// Only green nodes are stored, so documents can cross threads; [`Document::syntax`] builds a
/// fresh red tree on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    green: GreenNode,
    annotations: Vec<Annotation>,
}

impl Document {
    pub fn new(green: GreenNode) -> Self {
        Self {
            green,
            annotations: Vec::new(),
        }
    }

    /// Parse `text` with the reference front-end. Syntax errors are logged and otherwise
    /// ignored; the tree is lossless either way.
    pub fn parse(text: &str) -> Self {
        let parse = refold_syntax::parse(text);
        if !parse.errors.is_empty() {
            tracing::debug!(errors = parse.errors.len(), "document has syntax errors");
        }
        Self::new(parse.green)
    }

    pub fn from_root<L: Language>(root: &rowan::SyntaxNode<L>) -> Self {
        Self::new(root.green().into_owned())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Red root for an arbitrary language.
    pub fn root<L: Language>(&self) -> rowan::SyntaxNode<L> {
        rowan::SyntaxNode::new_root(self.green.clone())
    }

    pub fn text(&self) -> String {
        self.green.to_string()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotate(&mut self, kind: AnnotationKind, range: TextRange) {
        self.annotations.push(Annotation { kind, range });
    }

    #[must_use]
    pub fn with_annotation(mut self, kind: AnnotationKind, range: TextRange) -> Self {
        self.annotate(kind, range);
        self
    }

    pub fn formatter_ranges(&self) -> impl Iterator<Item = TextRange> + '_ {
        self.annotations
            .iter()
            .filter(|annotation| annotation.kind == AnnotationKind::Formatter)
            .map(|annotation| annotation.range)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> + '_ {
        self.annotations
            .iter()
            .filter_map(|annotation| match &annotation.kind {
                AnnotationKind::Warning(message) => Some(message.as_str()),
                AnnotationKind::Formatter => None,
            })
    }
}
