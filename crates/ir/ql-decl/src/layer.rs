//! Named and value layer views
//!
//! These are borrowed projections of a leaf onto the fields it shares with
//! every other leaf. They let callers treat any declaration uniformly without
//! matching on the variant.

use crate::attrs::DeclAttributes;
use crate::decl::{NamedFields, ValueFields};
use crate::handle::{ExprRef, TypeRef};
use crate::kind::DeclKind;
use ql_intern::Symbol;
use ql_span::SourceLoc;

/// A declaration seen through the named layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedDecl<'d> {
    kind: DeclKind,
    fields: &'d NamedFields,
    loc_start: SourceLoc,
}

impl<'d> NamedDecl<'d> {
    pub(crate) fn new(kind: DeclKind, fields: &'d NamedFields, loc_start: SourceLoc) -> Self {
        Self {
            kind,
            fields,
            loc_start,
        }
    }

    /// Kind of the underlying leaf
    pub fn kind(self) -> DeclKind {
        self.kind
    }

    /// Interned name
    pub fn name(self) -> Symbol {
        self.fields.name
    }

    /// Attributes written on the declaration
    pub fn attributes(self) -> &'d DeclAttributes {
        &self.fields.attributes
    }

    /// Identifying location of the underlying leaf
    pub fn loc_start(self) -> SourceLoc {
        self.loc_start
    }

    /// The shared record itself
    pub fn fields(self) -> &'d NamedFields {
        self.fields
    }
}

/// A declaration seen through the value layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDecl<'d> {
    named: NamedDecl<'d>,
    fields: &'d ValueFields,
}

impl<'d> ValueDecl<'d> {
    pub(crate) fn new(named: NamedDecl<'d>, fields: &'d ValueFields) -> Self {
        Self { named, fields }
    }

    /// The same declaration one layer up
    pub fn as_named(self) -> NamedDecl<'d> {
        self.named
    }

    /// Kind of the underlying leaf
    pub fn kind(self) -> DeclKind {
        self.named.kind()
    }

    /// Interned name
    pub fn name(self) -> Symbol {
        self.named.name()
    }

    /// Attributes written on the declaration
    pub fn attributes(self) -> &'d DeclAttributes {
        self.named.attributes()
    }

    /// Identifying location of the underlying leaf
    pub fn loc_start(self) -> SourceLoc {
        self.named.loc_start()
    }

    /// Type, if resolved
    pub fn ty(self) -> Option<TypeRef> {
        self.fields.ty
    }

    /// Initializer, if any
    pub fn init(self) -> Option<ExprRef> {
        self.fields.init
    }

    /// The shared record itself
    pub fn fields(self) -> &'d ValueFields {
        self.fields
    }
}
