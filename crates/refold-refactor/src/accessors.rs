//! Getter/setter pairs and the trivia merge used when collapsing them into a property.

use std::sync::Arc;

use rowan::{GreenToken, Language};

use crate::facts::SyntaxFacts;
use crate::symbols::{overrides_metadata_symbol, MethodSymbol};
use crate::trivia;

pub const METHOD_OVERRIDES_METADATA_WARNING: &str =
    "Warning: Method overrides symbol from metadata";

/// A getter and its optional setter, with their symbols.
#[derive(Debug, Clone)]
pub struct GetAndSetMethods<L: Language> {
    pub get_method: Arc<MethodSymbol>,
    pub get_declaration: rowan::SyntaxNode<L>,
    pub set_method: Option<Arc<MethodSymbol>>,
    pub set_declaration: Option<rowan::SyntaxNode<L>>,
}

/// The warning to show before replacing `pair`, if either method overrides a member declared
/// in metadata. Such members cannot be turned into properties at their declaration site.
pub fn override_warning<L: Language>(pair: &GetAndSetMethods<L>) -> Option<&'static str> {
    let overrides_metadata = overrides_metadata_symbol(&pair.get_method)
        || pair
            .set_method
            .as_deref()
            .is_some_and(overrides_metadata_symbol);
    if overrides_metadata {
        tracing::debug!(getter = %pair.get_method.name, "accessor overrides a metadata symbol");
        Some(METHOD_OVERRIDES_METADATA_WARNING)
    } else {
        None
    }
}

/// `target` with its leading trivia replaced by the merged trivia of the getter and setter.
///
/// The merged sequence is:
/// 1. the getter's leading trivia;
/// 2. the trailing trivia of the getter's parameter list, if it holds anything besides
///    whitespace and line breaks (a same-line comment after `)`);
/// 3. the setter's leading trivia, without its initial line breaks and without directives;
/// 4. the setter's parameter-list trailing trivia, under the same rule as 2.
///
/// Everything else about `target` is kept, including its trailing trivia.
pub fn merge_leading_trivia<F: SyntaxFacts>(
    facts: &F,
    pair: &GetAndSetMethods<F::Language>,
    target: &rowan::SyntaxNode<F::Language>,
) -> rowan::SyntaxNode<F::Language> {
    let mut merged = trivia::leading_trivia(facts, &pair.get_declaration.green());
    append_parameter_list_comments(facts, &pair.get_declaration, &mut merged);

    if let Some(setter) = &pair.set_declaration {
        let setter_leading = trivia::leading_trivia(facts, &setter.green());
        merged.extend(
            setter_leading
                .into_iter()
                .skip_while(|token| facts.is_end_of_line_trivia(facts.token_kind(token)))
                .filter(|token| !facts.is_directive_trivia(facts.token_kind(token))),
        );
        append_parameter_list_comments(facts, setter, &mut merged);
    }

    tracing::trace!(
        items = merged.len(),
        has_setter = pair.set_declaration.is_some(),
        "merged accessor trivia"
    );
    rowan::SyntaxNode::new_root(trivia::with_leading_trivia(facts, &target.green(), merged))
}

fn append_parameter_list_comments<F: SyntaxFacts>(
    facts: &F,
    declaration: &rowan::SyntaxNode<F::Language>,
    out: &mut Vec<GreenToken>,
) {
    let Some(list) = facts.parameter_list(declaration) else {
        return;
    };
    let trailing = trivia::trailing_trivia(facts, &list.green());
    if trailing
        .iter()
        .any(|token| !facts.is_whitespace_or_end_of_line_trivia(facts.token_kind(token)))
    {
        out.extend(trailing);
    }
}
