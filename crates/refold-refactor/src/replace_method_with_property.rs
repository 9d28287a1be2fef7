//! Replace a `GetFoo()`/`SetFoo(value)` method pair with a `Foo` property.

use std::sync::Arc;

use rowan::{GreenNode, GreenNodeData, Language, NodeOrToken};
use text_size::{TextRange, TextSize};
use tokio_util::sync::CancellationToken;

use refold_config::AccessorConfig;
use refold_syntax::edit::{self, to_owned_element, GreenElement};
use refold_syntax::{make, AstNode, CSharpLanguage, MethodDeclaration, SyntaxKind, SyntaxNode};

use crate::accessors::{merge_leading_trivia, override_warning, GetAndSetMethods};
use crate::action::{check_cancelled, Cancelled, TransformAction};
use crate::document::{AnnotationKind, Document};
use crate::facts::CSharpFacts;
use crate::lookup::relevant_method_declaration;
use crate::symbols::{FileId, MethodSymbol, SymbolIndex};
use crate::trivia;

/// Name of the implicit setter parameter.
const SETTER_VALUE: &str = "value";

/// Offer to replace the getter under the caret (and its setter, if there is one) with a
/// property.
///
/// The getter must have a body, no parameters, a non-`void` return type, and a name made of a
/// configured get prefix and a non-empty property name. The setter is the sibling method named
/// with a set prefix and the same property name; it must return `void` and take one parameter
/// of the getter's return type.
///
/// Call sites of the methods are left alone.
pub fn replace_method_with_property_action(
    file: &FileId,
    document: &Document,
    index: &SymbolIndex,
    selection: TextRange,
    config: &AccessorConfig,
) -> Option<TransformAction> {
    let root = document.syntax();
    let getter = relevant_method_declaration(&root, selection)?;
    let getter_name = getter.name()?;
    let (_, property_name) = config.strip_get_prefix(&getter_name)?;
    if !is_getter(&getter) {
        tracing::debug!(method = %getter_name, "not offering property: not a getter");
        return None;
    }

    let Some(get_method) = index.method_symbol(file, &getter) else {
        tracing::debug!(method = %getter_name, "not offering property: no symbol for getter");
        return None;
    };

    let setter = find_setter(&getter, property_name, config);
    let set_method = setter
        .as_ref()
        .and_then(|setter| index.method_symbol(file, setter));
    // Without a symbol the setter cannot be checked for overrides, so leave it out.
    let setter = setter.filter(|_| set_method.is_some());

    let pair = GetAndSetMethods::<CSharpLanguage> {
        get_method,
        get_declaration: getter.syntax().clone(),
        set_method,
        set_declaration: setter.as_ref().map(|setter| setter.syntax().clone()),
    };
    let warning = override_warning(&pair);

    let label = match &setter {
        Some(setter) => format!(
            "Replace '{getter_name}' and '{}' with property",
            setter.name().unwrap_or_default()
        ),
        None => format!("Replace '{getter_name}' with property"),
    };
    tracing::debug!(%label, warning = warning.is_some(), "offering property replacement");

    let captured = Captured {
        green: document.green().clone(),
        property_name: property_name.to_owned(),
        getter_range: getter.syntax().text_range(),
        setter_range: setter.as_ref().map(|setter| setter.syntax().text_range()),
        get_method: pair.get_method,
        set_method: pair.set_method,
        warning,
    };
    Some(TransformAction::new(label, move |cancel: &CancellationToken| {
        captured.apply(cancel)
    }))
}

/// Everything `apply` needs, without red nodes.
struct Captured {
    green: GreenNode,
    property_name: String,
    getter_range: TextRange,
    setter_range: Option<TextRange>,
    get_method: Arc<MethodSymbol>,
    set_method: Option<Arc<MethodSymbol>>,
    warning: Option<&'static str>,
}

impl Captured {
    fn apply(&self, cancel: &CancellationToken) -> Result<Document, Cancelled> {
        check_cancelled(cancel)?;

        let root = SyntaxNode::new_root(self.green.clone());
        let getter = method_at(&root, self.getter_range);
        let setter = self.setter_range.map(|range| method_at(&root, range));
        let pair = GetAndSetMethods::<CSharpLanguage> {
            get_method: self.get_method.clone(),
            get_declaration: getter.syntax().clone(),
            set_method: self.set_method.clone(),
            set_declaration: setter.as_ref().map(|setter| setter.syntax().clone()),
        };

        let property = build_property(&pair, &getter, setter.as_ref(), &self.property_name);
        check_cancelled(cancel)?;

        let parent = getter
            .syntax()
            .parent()
            .expect("method declarations always have a parent");
        let getter_index = getter.syntax().index();
        let setter_index = setter.as_ref().map(|setter| setter.syntax().index());
        let new_root = edit::map_children(&parent, |idx, child| {
            if idx == getter_index {
                Some(NodeOrToken::Node(property.clone()))
            } else if Some(idx) == setter_index {
                None
            } else {
                Some(child)
            }
        });

        // A setter declared before the getter shifts the property left.
        let shift = match self.setter_range {
            Some(range) if range.start() < self.getter_range.start() => range.len(),
            _ => TextSize::from(0),
        };
        let range = TextRange::at(self.getter_range.start() - shift, property.text_len());

        let mut document =
            Document::from_root(&new_root).with_annotation(AnnotationKind::Formatter, range);
        if let Some(warning) = self.warning {
            document.annotate(AnnotationKind::Warning(warning.to_owned()), range);
        }

        check_cancelled(cancel)?;
        Ok(document)
    }
}

fn method_at(root: &SyntaxNode, range: TextRange) -> MethodDeclaration {
    root.descendants()
        .filter_map(MethodDeclaration::cast)
        .find(|method| method.syntax().text_range() == range)
        .expect("method captured when the action was created")
}

fn is_getter(method: &MethodDeclaration) -> bool {
    method.body().is_some()
        && method.parameters().next().is_none()
        && method.return_type().is_some_and(|ty| !ty.is_void())
}

fn find_setter(
    getter: &MethodDeclaration,
    property_name: &str,
    config: &AccessorConfig,
) -> Option<MethodDeclaration> {
    let return_type = getter.return_type()?.text();
    let names = config.setter_names(property_name);
    let parent = getter.syntax().parent()?;

    parent
        .children()
        .filter_map(MethodDeclaration::cast)
        .find(|candidate| {
            let named_like_setter = candidate.name().is_some_and(|name| names.contains(&name));
            if !named_like_setter || !candidate.returns_void() || candidate.body().is_none() {
                return false;
            }
            let params: Vec<_> = candidate.parameters().collect();
            params.len() == 1 && params[0].ty().is_some_and(|ty| ty.text() == return_type)
        })
}

fn build_property(
    pair: &GetAndSetMethods<CSharpLanguage>,
    getter: &MethodDeclaration,
    setter: Option<&MethodDeclaration>,
    name: &str,
) -> GreenNode {
    let facts = CSharpFacts;

    let modifiers = match getter.modifiers() {
        Some(modifiers) => modifiers.syntax().green().into_owned(),
        None => GreenNode::new(SyntaxKind::Modifiers.into(), Vec::<GreenElement>::new()),
    };
    let ty = getter
        .return_type()
        .map(|ty| ty.syntax().green().into_owned())
        .unwrap_or_else(|| GreenNode::new(SyntaxKind::Type.into(), Vec::<GreenElement>::new()));

    let mut accessors = Vec::new();
    if let Some(body) = getter.body() {
        // The body's trailing trivia is the getter's, which the property keeps.
        let body = trivia::trim_leading_layout(&facts, &body.syntax().green());
        let body = trivia::strip_trailing_trivia(&facts, &body);
        accessors.push(make::accessor_declaration(SyntaxKind::GetKw, body));
    }
    if let Some(setter) = setter {
        let parameter = setter
            .parameters()
            .next()
            .and_then(|param| param.name_token())
            .map(|token| token.text().to_owned());
        if let Some(body) = setter.body() {
            let mut body = body.syntax().green().into_owned();
            if let Some(parameter) = parameter {
                body = rename_name_references(&body, &parameter, SETTER_VALUE);
            }
            let body = trivia::trim_layout(&facts, &body);
            accessors.push(make::accessor_declaration(SyntaxKind::SetKw, body));
        }
    }

    let trailing = trivia::trailing_trivia(&facts, &getter.syntax().green());
    let property = make::property_declaration(modifiers, ty, name, accessors, trailing);
    let property = merge_leading_trivia(&facts, pair, &SyntaxNode::new_root(property));
    property.green().into_owned()
}

/// Rename simple-name references `from` to `to`. Member names (`x.from`) are left alone.
fn rename_name_references(node: &GreenNodeData, from: &str, to: &str) -> GreenNode {
    let is_name = CSharpLanguage::kind_from_raw(node.kind()) == SyntaxKind::NameExpression;
    let children: Vec<GreenElement> = node
        .children()
        .map(|child| match child {
            NodeOrToken::Node(inner) => {
                NodeOrToken::Node(rename_name_references(inner, from, to))
            }
            NodeOrToken::Token(token)
                if is_name
                    && token.text() == from
                    && CSharpLanguage::kind_from_raw(token.kind()).is_identifier_like() =>
            {
                NodeOrToken::Token(make::ident(to))
            }
            other => to_owned_element(other),
        })
        .collect();
    GreenNode::new(node.kind(), children)
}
