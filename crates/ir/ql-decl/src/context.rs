//! Declaration contexts
//!
//! A [`DeclContext`] is the arena for one compilation unit. It is the only way
//! to build a declaration, it owns every declaration it builds, and it
//! releases all of them at once when dropped.

use crate::attrs::DeclAttributes;
use crate::config::{ArenaConfig, DEFAULT_ALIGNMENT};
use crate::decl::{AnonDecl, ArgDecl, Decl, ElementRefDecl, FuncDecl, VarDecl};
use crate::error::{ConfigError, DowncastMismatch, ForeignVar};
use crate::handle::{ExprRef, TypeRef};
use derive_more::Display;
use ql_arena::{Arena, Idx};
use ql_intern::Symbol;
use ql_span::SourceLoc;
use std::ops::Index;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_CONTEXT: AtomicU32 = AtomicU32::new(0);

/// Index of a declaration within its context
///
/// Only the context that returned an id can resolve it. Indexing another
/// context with it names an unrelated declaration or panics.
pub type DeclId = Idx<Decl>;

/// Identity of one [`DeclContext`]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Display)]
#[display("context#{_0}")]
pub struct ContextId(u32);

impl ContextId {
    fn fresh() -> Self {
        Self(NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A [`DeclId`] known to name a [`VarDecl`] of the context that minted it
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct VarId {
    owner: ContextId,
    id: DeclId,
}

impl VarId {
    /// The untyped id
    pub fn decl_id(self) -> DeclId {
        self.id
    }

    /// The context that minted this id
    pub fn owner(self) -> ContextId {
        self.owner
    }
}

impl From<VarId> for DeclId {
    fn from(id: VarId) -> Self {
        id.id
    }
}

/// Owner of every declaration in one compilation unit
#[derive(Debug)]
pub struct DeclContext {
    id: ContextId,
    alignment: usize,
    decls: Arena<Decl>,
}

impl Default for DeclContext {
    fn default() -> Self {
        Self {
            id: ContextId::fresh(),
            alignment: DEFAULT_ALIGNMENT,
            decls: Arena::new(),
        }
    }
}

impl DeclContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context sized by `config`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAlignment`] if `config` does not validate.
    pub fn with_config(config: &ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            id: ContextId::fresh(),
            alignment: config.alignment,
            decls: Arena::with_capacity(config.capacity),
        })
    }

    /// Identity stamped into every [`VarId`] this context mints
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Alignment every declaration of this context is placed at
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    fn place(&mut self, decl: Decl) -> DeclId {
        let kind = decl.kind();
        let id = self.decls.alloc(decl);
        tracing::trace!(context = %self.id, id = u32::from(id.into_raw()), %kind, "allocated declaration");
        id
    }

    fn owns(&self, var: VarId) -> Result<(), ForeignVar> {
        if var.owner == self.id {
            return Ok(());
        }
        tracing::debug!(owner = %var.owner, context = %self.id, "rejected foreign var id");
        Err(ForeignVar {
            owner: var.owner,
            context: self.id,
        })
    }

    /// Builds a `var` declaration
    pub fn alloc_var(
        &mut self,
        var_loc: SourceLoc,
        name: Symbol,
        ty: Option<TypeRef>,
        init: Option<ExprRef>,
        attributes: DeclAttributes,
    ) -> VarId {
        let id = self.place(Decl::Var(VarDecl::new(var_loc, name, ty, init, attributes)));
        VarId { owner: self.id, id }
    }

    /// Builds a `func` declaration
    pub fn alloc_func(
        &mut self,
        func_loc: SourceLoc,
        name: Symbol,
        ty: Option<TypeRef>,
        init: Option<ExprRef>,
        attributes: DeclAttributes,
    ) -> DeclId {
        self.place(Decl::Func(FuncDecl::new(func_loc, name, ty, init, attributes)))
    }

    /// Builds a function argument
    pub fn alloc_arg(&mut self, func_loc: SourceLoc, name: Symbol, ty: Option<TypeRef>) -> DeclId {
        self.place(Decl::Arg(ArgDecl::new(func_loc, name, ty)))
    }

    /// Builds an anonymous closure argument
    pub fn alloc_anon(&mut self, use_loc: SourceLoc, name: Symbol, ty: Option<TypeRef>) -> DeclId {
        self.place(Decl::Anon(AnonDecl::new(use_loc, name, ty)))
    }

    /// Builds one element of the destructured `source`
    ///
    /// # Errors
    ///
    /// Returns [`ForeignVar`] if `source` was minted by another context.
    pub fn alloc_element_ref(
        &mut self,
        source: VarId,
        name_loc: SourceLoc,
        name: Symbol,
        ty: Option<TypeRef>,
    ) -> Result<DeclId, ForeignVar> {
        self.owns(source)?;
        Ok(self.place(Decl::ElementRef(ElementRefDecl::new(source, name_loc, name, ty))))
    }

    /// Looks up a declaration
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id]
    }

    /// Looks up a `var` declaration
    ///
    /// Returns `None` when `id` was minted by another context.
    pub fn var(&self, id: VarId) -> Option<&VarDecl> {
        self.owns(id).ok()?;
        self.decls[id.id].dyn_cast()
    }

    /// Proves that `id` names a `var` declaration
    ///
    /// # Errors
    ///
    /// Returns [`DowncastMismatch`] if the declaration is of another kind.
    pub fn var_id(&self, id: DeclId) -> Result<VarId, DowncastMismatch> {
        self.decls[id]
            .cast::<&VarDecl>()
            .map(|_| VarId { owner: self.id, id })
    }

    /// Number of declarations placed so far
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Whether nothing has been placed yet
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Every declaration in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Decl)> + '_ {
        self.decls.iter()
    }

    /// The element refs destructuring `var`, in allocation order
    pub fn elements_of(&self, var: VarId) -> impl Iterator<Item = (DeclId, &ElementRefDecl)> + '_ {
        self.iter().filter_map(move |(id, decl)| match decl {
            Decl::ElementRef(element) if element.source() == var => Some((id, element)),
            _ => None,
        })
    }
}

impl Index<DeclId> for DeclContext {
    type Output = Decl;

    fn index(&self, id: DeclId) -> &Decl {
        &self.decls[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::DeclKind;
    use ql_intern::Interner;
    use ql_span::FileId;

    fn loc(offset: u32) -> SourceLoc {
        SourceLoc::new(FileId::new(0), offset)
    }

    #[test]
    fn test_ids_follow_allocation_order() {
        let interner = Interner::new();
        let mut ctx = DeclContext::new();
        let first = ctx.alloc_var(loc(0), interner.intern("x"), None, None, DeclAttributes::default());
        let second = ctx.alloc_arg(loc(10), interner.intern("y"), None);

        assert_eq!(ctx.len(), 2);
        let order: Vec<_> = ctx.iter().map(|(id, decl)| (id, decl.kind())).collect();
        assert_eq!(order, vec![(first.decl_id(), DeclKind::Var), (second, DeclKind::Arg)]);
    }

    #[test]
    fn test_var_id_is_checked() {
        let interner = Interner::new();
        let mut ctx = DeclContext::new();
        let var = ctx.alloc_var(loc(0), interner.intern("x"), None, None, DeclAttributes::default());
        let func = ctx.alloc_func(loc(5), interner.intern("f"), None, None, DeclAttributes::default());

        assert_eq!(ctx.var_id(var.decl_id()), Ok(var));
        let err = ctx.var_id(func).unwrap_err();
        assert_eq!(err.found, DeclKind::Func);
        assert_eq!(err.target, "VarDecl");
    }

    #[test]
    fn test_elements_of_filters_by_source() {
        let interner = Interner::new();
        let empty = interner.intern("");
        let mut ctx = DeclContext::new();
        let left = ctx.alloc_var(loc(0), empty, None, Some(ExprRef(0)), DeclAttributes::default());
        let right = ctx.alloc_var(loc(20), empty, None, Some(ExprRef(1)), DeclAttributes::default());
        let first = ctx.alloc_element_ref(left, loc(5), interner.intern("a"), None).unwrap();
        ctx.alloc_element_ref(right, loc(25), interner.intern("c"), None).unwrap();
        let second = ctx.alloc_element_ref(left, loc(8), interner.intern("b"), None).unwrap();

        let ids: Vec<_> = ctx.elements_of(left).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(ctx.elements_of(right).count(), 1);
    }

    #[test]
    fn test_with_config_validates() {
        for alignment in [3, 16] {
            let config = ArenaConfig {
                capacity: 16,
                alignment,
            };
            assert!(DeclContext::with_config(&config).is_err());
        }

        let ctx = DeclContext::with_config(&ArenaConfig::default()).unwrap();
        assert!(ctx.is_empty());
        assert_eq!(ctx.alignment(), DEFAULT_ALIGNMENT);
    }

    #[test]
    fn test_nodes_are_placed_at_configured_alignment() {
        let interner = Interner::new();
        for alignment in [1, 4, 8] {
            let config = ArenaConfig {
                capacity: 4,
                alignment,
            };
            let mut ctx = DeclContext::with_config(&config).unwrap();
            let var = ctx.alloc_var(loc(0), interner.intern("x"), None, None, DeclAttributes::default());
            ctx.alloc_arg(loc(4), interner.intern("a"), None);
            ctx.alloc_element_ref(var, loc(8), interner.intern("e"), None).unwrap();

            assert_eq!(ctx.alignment(), alignment);
            for (_, decl) in ctx.iter() {
                assert_eq!(std::ptr::from_ref(decl).addr() % ctx.alignment(), 0);
            }
        }
    }

    #[test]
    fn test_contexts_have_distinct_ids() {
        let first = DeclContext::new();
        let second = DeclContext::new();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_element_ref_rejects_var_of_other_context() {
        let interner = Interner::new();
        let mut left = DeclContext::new();
        let mut right = DeclContext::new();
        let from_left = left.alloc_var(loc(0), interner.intern("from_left"), None, None, DeclAttributes::default());
        right.alloc_var(loc(0), interner.intern("from_right"), None, None, DeclAttributes::default());

        let err = right.alloc_element_ref(from_left, loc(4), interner.intern("e"), None).unwrap_err();
        assert_eq!(err.owner, left.id());
        assert_eq!(err.context, right.id());
        assert_eq!(right.len(), 1);
        assert_eq!(from_left.owner(), left.id());
    }

    #[test]
    fn test_var_ignores_ids_of_other_context() {
        let interner = Interner::new();
        let mut left = DeclContext::new();
        let mut right = DeclContext::new();
        let from_left = left.alloc_var(loc(0), interner.intern("from_left"), None, None, DeclAttributes::default());
        let from_right = right.alloc_var(loc(0), interner.intern("from_right"), None, None, DeclAttributes::default());

        assert_eq!(from_left.decl_id(), from_right.decl_id());
        assert!(right.var(from_left).is_none());
        assert!(DeclContext::new().var(from_left).is_none());
        assert_eq!(interner.resolve(left.var(from_left).unwrap().name()), "from_left");
        assert_eq!(interner.resolve(right.var(from_right).unwrap().name()), "from_right");
    }
}
