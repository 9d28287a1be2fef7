//! Method symbols and their override chains.
//!
//! [`SymbolIndex`] is a small in-memory semantic model: it knows the classes of registered
//! source files and a set of types that only exist as compiled metadata, and links `override`
//! methods to the method they override.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use rowan::GreenNode;
use text_size::TextRange;

use refold_syntax::{AstNode, ClassDeclaration, CompilationUnit, MethodDeclaration, SyntaxNode};

/// Identifier for a source file.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

/// Where a symbol is declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Source { file: FileId, range: TextRange },
    /// Declared in a referenced binary; there is no source to edit.
    Metadata { module: String },
}

impl Location {
    pub fn is_in_metadata(&self) -> bool {
        matches!(self, Location::Metadata { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: String,
    pub containing_type: String,
    pub arity: usize,
    /// The method this one overrides, if any.
    pub overridden: Option<Arc<MethodSymbol>>,
    pub locations: Vec<Location>,
}

impl MethodSymbol {
    /// `self`, then every method it transitively overrides.
    pub fn override_chain(&self) -> impl Iterator<Item = &MethodSymbol> {
        std::iter::successors(Some(self), |method| method.overridden.as_deref())
    }
}

/// Whether `method` or anything it transitively overrides is declared in metadata.
pub fn overrides_metadata_symbol(method: &MethodSymbol) -> bool {
    let mut current = Some(method);
    while let Some(symbol) = current {
        if symbol.locations.iter().any(Location::is_in_metadata) {
            tracing::trace!(
                method = %method.name,
                declared_in = %symbol.containing_type,
                "override chain reaches metadata"
            );
            return true;
        }
        current = symbol.overridden.as_deref();
    }
    false
}

/// A type known only from compiled metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataType {
    pub name: String,
    /// Assembly or module the type was loaded from.
    pub module: String,
    pub base: Option<String>,
    pub methods: Vec<MetadataMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataMethod {
    pub name: String,
    pub arity: usize,
    pub is_override: bool,
}

impl MetadataMethod {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            is_override: false,
        }
    }

    pub fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SymbolKey {
    Source { file: FileId, range: TextRange },
    Metadata { ty: String, index: usize },
}

/// Resolution result for a type name.
enum TypeRef<'a> {
    Source {
        file: &'a FileId,
        class: ClassDeclaration,
    },
    Metadata(&'a MetadataType),
}

/// Method symbols for a set of source files and metadata types.
///
/// Types are looked up by simple name; when several declarations share a name, source files
/// win over metadata and earlier registrations win over later ones. Symbols are memoised, so
/// asking twice for the same method yields the same `Arc`.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    files: BTreeMap<FileId, GreenNode>,
    source_classes: HashMap<String, (FileId, TextRange)>,
    metadata: HashMap<String, MetadataType>,
    symbols: Mutex<HashMap<SymbolKey, Arc<MethodSymbol>>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a parsed source file.
    pub fn add_file(&mut self, file: FileId, green: GreenNode) {
        self.source_classes.retain(|_, (owner, _)| *owner != file);

        let root = SyntaxNode::new_root(green.clone());
        if let Some(unit) = CompilationUnit::cast(root) {
            for class in unit.classes() {
                let Some(name) = class.name() else { continue };
                self.source_classes
                    .entry(name)
                    .or_insert_with(|| (file.clone(), class.syntax().text_range()));
            }
        }

        tracing::debug!(file = %file.0, "indexed source file");
        self.files.insert(file, green);
        self.symbols.get_mut().clear();
    }

    pub fn add_metadata_type(&mut self, ty: MetadataType) {
        tracing::debug!(name = %ty.name, module = %ty.module, "indexed metadata type");
        self.metadata.entry(ty.name.clone()).or_insert(ty);
        self.symbols.get_mut().clear();
    }

    /// The symbol of a method declared in `file`.
    ///
    /// Returns `None` when the file is unknown or `method` is not part of the indexed version
    /// of it.
    pub fn method_symbol(
        &self,
        file: &FileId,
        method: &MethodDeclaration,
    ) -> Option<Arc<MethodSymbol>> {
        let root = SyntaxNode::new_root(self.files.get(file)?.clone());
        let range = method.syntax().text_range();
        let indexed = root
            .descendants()
            .filter_map(MethodDeclaration::cast)
            .find(|candidate| {
                candidate.syntax().text_range() == range
                    && candidate.syntax().text() == method.syntax().text()
            })?;

        let mut visited = HashSet::new();
        self.source_symbol(file, &indexed, &mut visited)
    }

    fn source_symbol(
        &self,
        file: &FileId,
        method: &MethodDeclaration,
        visited: &mut HashSet<String>,
    ) -> Option<Arc<MethodSymbol>> {
        let key = SymbolKey::Source {
            file: file.clone(),
            range: method.syntax().text_range(),
        };
        if let Some(symbol) = self.symbols.lock().get(&key) {
            return Some(symbol.clone());
        }

        let name = method.name()?;
        let class = method
            .syntax()
            .ancestors()
            .find_map(ClassDeclaration::cast)?;
        let containing_type = class.name()?;
        let arity = method.parameters().count();

        visited.insert(containing_type.clone());
        let overridden = if method.is_override() {
            let base = class.base_type_names().into_iter().next();
            self.find_overridden(base, &name, arity, visited)
        } else {
            None
        };

        let symbol = Arc::new(MethodSymbol {
            name,
            containing_type,
            arity,
            overridden,
            locations: vec![Location::Source {
                file: file.clone(),
                range: method.syntax().text_range(),
            }],
        });
        Some(self.memoise(key, symbol))
    }

    fn metadata_symbol(
        &self,
        ty: &MetadataType,
        index: usize,
        visited: &mut HashSet<String>,
    ) -> Arc<MethodSymbol> {
        let key = SymbolKey::Metadata {
            ty: ty.name.clone(),
            index,
        };
        if let Some(symbol) = self.symbols.lock().get(&key) {
            return symbol.clone();
        }

        let method = &ty.methods[index];
        visited.insert(ty.name.clone());
        let overridden = if method.is_override {
            self.find_overridden(ty.base.clone(), &method.name, method.arity, visited)
        } else {
            None
        };

        let symbol = Arc::new(MethodSymbol {
            name: method.name.clone(),
            containing_type: ty.name.clone(),
            arity: method.arity,
            overridden,
            locations: vec![Location::Metadata {
                module: ty.module.clone(),
            }],
        });
        self.memoise(key, symbol)
    }

    /// Walk up from `base` to the first type declaring `name` with `arity` parameters.
    fn find_overridden(
        &self,
        mut base: Option<String>,
        name: &str,
        arity: usize,
        visited: &mut HashSet<String>,
    ) -> Option<Arc<MethodSymbol>> {
        while let Some(type_name) = base.take() {
            if !visited.insert(type_name.clone()) {
                tracing::debug!(ty = %type_name, "cyclic base list; stopping override walk");
                return None;
            }

            match self.resolve_type(&type_name)? {
                TypeRef::Source { file, class } => {
                    let found = class.methods().find(|m| {
                        m.name().as_deref() == Some(name) && m.parameters().count() == arity
                    });
                    if let Some(method) = found {
                        return self.source_symbol(file, &method, visited);
                    }
                    base = class.base_type_names().into_iter().next();
                }
                TypeRef::Metadata(ty) => {
                    let found = ty
                        .methods
                        .iter()
                        .position(|m| m.name == name && m.arity == arity);
                    if let Some(index) = found {
                        return Some(self.metadata_symbol(ty, index, visited));
                    }
                    base = ty.base.clone();
                }
            }
        }
        None
    }

    fn resolve_type(&self, name: &str) -> Option<TypeRef<'_>> {
        if let Some((file, range)) = self.source_classes.get(name) {
            let root = SyntaxNode::new_root(self.files.get(file)?.clone());
            let class = root
                .descendants()
                .filter_map(ClassDeclaration::cast)
                .find(|class| class.syntax().text_range() == *range)?;
            return Some(TypeRef::Source { file, class });
        }
        self.metadata.get(name).map(TypeRef::Metadata)
    }

    fn memoise(&self, key: SymbolKey, symbol: Arc<MethodSymbol>) -> Arc<MethodSymbol> {
        self.symbols.lock().entry(key).or_insert(symbol).clone()
    }
}
