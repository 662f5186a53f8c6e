//! Checked downcasts between declaration layers
//!
//! Each layer states which kinds it admits as a [`KindSet`]. Narrowing is a
//! single set-membership test on the discriminant, whatever the depth of the
//! layer. The kind set is closed: a new leaf means revisiting every `KINDS`
//! below.

use crate::decl::{AnonDecl, ArgDecl, Decl, ElementRefDecl, FuncDecl, VarDecl};
use crate::kind::{DeclKind, KindSet};
use crate::layer::{NamedDecl, ValueDecl};

/// A layer of the declaration family that a [`Decl`] can be narrowed to
pub trait Downcast<'d>: Sized {
    /// Layer name used in mismatch reports
    const NAME: &'static str;

    /// Kinds admitted by this layer
    const KINDS: KindSet;

    /// Membership test for this layer
    fn classof(kind: DeclKind) -> bool {
        Self::KINDS.admits(kind)
    }

    /// Projects `decl` onto this layer
    ///
    /// Only called after [`classof`](Self::classof) admitted the kind.
    fn project(decl: &'d Decl) -> Option<Self>;
}

impl<'d> Downcast<'d> for &'d Decl {
    const NAME: &'static str = "Decl";
    const KINDS: KindSet = KindSet::all();

    fn project(decl: &'d Decl) -> Option<Self> {
        Some(decl)
    }
}

impl<'d> Downcast<'d> for NamedDecl<'d> {
    const NAME: &'static str = "NamedDecl";
    const KINDS: KindSet = KindSet::all();

    fn project(decl: &'d Decl) -> Option<Self> {
        Some(decl.as_named())
    }
}

impl<'d> Downcast<'d> for ValueDecl<'d> {
    const NAME: &'static str = "ValueDecl";
    const KINDS: KindSet = KindSet::all();

    fn project(decl: &'d Decl) -> Option<Self> {
        Some(decl.as_value())
    }
}

macro_rules! leaf_downcast {
    ($leaf:ident, $variant:ident) => {
        impl<'d> Downcast<'d> for &'d $leaf {
            const NAME: &'static str = stringify!($leaf);
            const KINDS: KindSet = KindSet::of($leaf::KIND);

            fn project(decl: &'d Decl) -> Option<Self> {
                match decl {
                    Decl::$variant(leaf) => Some(leaf),
                    _ => None,
                }
            }
        }
    };
}

leaf_downcast!(VarDecl, Var);
leaf_downcast!(FuncDecl, Func);
leaf_downcast!(ArgDecl, Arg);
leaf_downcast!(AnonDecl, Anon);
leaf_downcast!(ElementRefDecl, ElementRef);
