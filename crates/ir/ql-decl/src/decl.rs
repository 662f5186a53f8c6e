//! The declaration family
//!
//! [`Decl`] is the base node. Its variant is the kind discriminant, so a node
//! can never report a kind other than the one it was built as. Each leaf keeps
//! the shared [`NamedFields`] and [`ValueFields`] records by value and adds the
//! one location that identifies it.

use crate::attrs::DeclAttributes;
use crate::cast::Downcast;
use crate::context::VarId;
use crate::error::DowncastMismatch;
use crate::handle::{ExprRef, TypeRef};
use crate::kind::DeclKind;
use crate::layer::{NamedDecl, ValueDecl};
use ql_intern::Symbol;
use ql_span::SourceLoc;

/// Storage shared by every named declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedFields {
    /// Interned name; the empty string for nameless declarations
    pub name: Symbol,
    /// Attributes written on the declaration
    pub attributes: DeclAttributes,
}

/// Storage shared by every value declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValueFields {
    /// Declared or inferred type; `None` until resolved
    pub ty: Option<TypeRef>,
    /// Initializer expression
    pub init: Option<ExprRef>,
}

/// A declaration placed in a [`DeclContext`](crate::DeclContext)
///
/// Nodes are not `Clone` and have no public constructor: the context is the
/// only way to make one, and the context owns it until the context is dropped.
/// Every node is aligned to [`NODE_ALIGNMENT`](crate::config::NODE_ALIGNMENT).
#[derive(Debug, PartialEq, Eq)]
#[repr(align(8))]
pub enum Decl {
    /// `var` declaration
    Var(VarDecl),
    /// `func` declaration
    Func(FuncDecl),
    /// Named function argument
    Arg(ArgDecl),
    /// Anonymous closure argument
    Anon(AnonDecl),
    /// Element of a destructured `var`
    ElementRef(ElementRefDecl),
}

impl Decl {
    /// The discriminant fixed when this node was built
    pub fn kind(&self) -> DeclKind {
        match self {
            Self::Var(_) => DeclKind::Var,
            Self::Func(_) => DeclKind::Func,
            Self::Arg(_) => DeclKind::Arg,
            Self::Anon(_) => DeclKind::Anon,
            Self::ElementRef(_) => DeclKind::ElementRef,
        }
    }

    /// View through the named layer
    pub fn as_named(&self) -> NamedDecl<'_> {
        match self {
            Self::Var(decl) => decl.as_named(),
            Self::Func(decl) => decl.as_named(),
            Self::Arg(decl) => decl.as_named(),
            Self::Anon(decl) => decl.as_named(),
            Self::ElementRef(decl) => decl.as_named(),
        }
    }

    /// View through the value layer
    pub fn as_value(&self) -> ValueDecl<'_> {
        match self {
            Self::Var(decl) => decl.as_value(),
            Self::Func(decl) => decl.as_value(),
            Self::Arg(decl) => decl.as_value(),
            Self::Anon(decl) => decl.as_value(),
            Self::ElementRef(decl) => decl.as_value(),
        }
    }

    /// The identifying location of whichever leaf this is
    pub fn loc_start(&self) -> SourceLoc {
        self.as_named().loc_start()
    }

    /// Interned name
    pub fn name(&self) -> Symbol {
        self.as_named().name()
    }

    /// Attributes written on the declaration
    pub fn attributes(&self) -> &DeclAttributes {
        self.as_named().attributes()
    }

    /// Type, if resolved
    pub fn ty(&self) -> Option<TypeRef> {
        self.as_value().ty()
    }

    /// Initializer, if any
    pub fn init(&self) -> Option<ExprRef> {
        self.as_value().init()
    }

    /// Whether this node belongs to layer `T`
    pub fn isa<'d, T: Downcast<'d>>(&'d self) -> bool {
        T::classof(self.kind())
    }

    /// Narrows to layer `T`, or `None` if the kind is not admitted
    pub fn dyn_cast<'d, T: Downcast<'d>>(&'d self) -> Option<T> {
        if T::classof(self.kind()) {
            T::project(self)
        } else {
            None
        }
    }

    /// Narrows to layer `T`
    ///
    /// # Errors
    ///
    /// Returns [`DowncastMismatch`] if this node's kind is not admitted by `T`.
    pub fn cast<'d, T: Downcast<'d>>(&'d self) -> Result<T, DowncastMismatch> {
        self.dyn_cast::<T>().ok_or_else(|| {
            let mismatch = DowncastMismatch {
                found: self.kind(),
                target: T::NAME,
            };
            tracing::debug!(found = %mismatch.found, target = mismatch.target, "declaration downcast rejected");
            mismatch
        })
    }
}

/// Accessors every leaf gets from the shared records
macro_rules! leaf_common {
    ($leaf:ident, $kind:ident, $loc:ident) => {
        impl $leaf {
            /// Kind carried by every instance of this variant
            pub const KIND: DeclKind = DeclKind::$kind;

            /// Interned name
            pub fn name(&self) -> Symbol {
                self.named.name
            }

            /// Attributes written on the declaration
            pub fn attributes(&self) -> &DeclAttributes {
                &self.named.attributes
            }

            /// Type, if resolved
            pub fn ty(&self) -> Option<TypeRef> {
                self.value.ty
            }

            /// Initializer, if any
            pub fn init(&self) -> Option<ExprRef> {
                self.value.init
            }

            /// The location identifying this declaration
            pub fn loc_start(&self) -> SourceLoc {
                self.$loc
            }

            /// View through the named layer
            pub fn as_named(&self) -> NamedDecl<'_> {
                NamedDecl::new(Self::KIND, &self.named, self.$loc)
            }

            /// View through the value layer
            pub fn as_value(&self) -> ValueDecl<'_> {
                ValueDecl::new(self.as_named(), &self.value)
            }
        }
    };
}

/// `var` declaration
#[derive(Debug, PartialEq, Eq)]
pub struct VarDecl {
    named: NamedFields,
    value: ValueFields,
    var_loc: SourceLoc,
}

impl VarDecl {
    pub(crate) fn new(
        var_loc: SourceLoc,
        name: Symbol,
        ty: Option<TypeRef>,
        init: Option<ExprRef>,
        attributes: DeclAttributes,
    ) -> Self {
        Self {
            named: NamedFields { name, attributes },
            value: ValueFields { ty, init },
            var_loc,
        }
    }

    /// Location of the `var` keyword
    pub fn var_loc(&self) -> SourceLoc {
        self.var_loc
    }
}

leaf_common!(VarDecl, Var, var_loc);

/// `func` declaration
#[derive(Debug, PartialEq, Eq)]
pub struct FuncDecl {
    named: NamedFields,
    value: ValueFields,
    func_loc: SourceLoc,
}

impl FuncDecl {
    pub(crate) fn new(
        func_loc: SourceLoc,
        name: Symbol,
        ty: Option<TypeRef>,
        init: Option<ExprRef>,
        attributes: DeclAttributes,
    ) -> Self {
        Self {
            named: NamedFields { name, attributes },
            value: ValueFields { ty, init },
            func_loc,
        }
    }

    /// Location of the `func` keyword
    pub fn func_loc(&self) -> SourceLoc {
        self.func_loc
    }
}

leaf_common!(FuncDecl, Func, func_loc);

/// A named argument of a `func`, e.g. `a` in `func x(a : int)`
///
/// Arguments never have an initializer or attributes.
#[derive(Debug, PartialEq, Eq)]
pub struct ArgDecl {
    named: NamedFields,
    value: ValueFields,
    func_loc: SourceLoc,
}

impl ArgDecl {
    pub(crate) fn new(func_loc: SourceLoc, name: Symbol, ty: Option<TypeRef>) -> Self {
        Self {
            named: NamedFields {
                name,
                attributes: DeclAttributes::default(),
            },
            value: ValueFields { ty, init: None },
            func_loc,
        }
    }

    /// Location of the enclosing `func`
    ///
    /// This is the best position available for an argument, not the position
    /// of its name.
    pub fn func_loc(&self) -> SourceLoc {
        self.func_loc
    }
}

leaf_common!(ArgDecl, Arg, func_loc);

/// Anonymous closure argument synthesized from a reference to `$0` ... `$9`
#[derive(Debug, PartialEq, Eq)]
pub struct AnonDecl {
    named: NamedFields,
    value: ValueFields,
    use_loc: SourceLoc,
}

impl AnonDecl {
    pub(crate) fn new(use_loc: SourceLoc, name: Symbol, ty: Option<TypeRef>) -> Self {
        Self {
            named: NamedFields {
                name,
                attributes: DeclAttributes::default(),
            },
            value: ValueFields { ty, init: None },
            use_loc,
        }
    }

    /// Location of the first use in its context
    pub fn use_loc(&self) -> SourceLoc {
        self.use_loc
    }
}

leaf_common!(AnonDecl, Anon, use_loc);

/// One element of a destructured `var`
///
/// `var (a, b) = f()` produces a nameless [`VarDecl`] holding the initializer
/// and two element refs, `a` and `b`, pointing back at it.
#[derive(Debug, PartialEq, Eq)]
pub struct ElementRefDecl {
    named: NamedFields,
    value: ValueFields,
    source: VarId,
    name_loc: SourceLoc,
}

impl ElementRefDecl {
    pub(crate) fn new(source: VarId, name_loc: SourceLoc, name: Symbol, ty: Option<TypeRef>) -> Self {
        Self {
            named: NamedFields {
                name,
                attributes: DeclAttributes::default(),
            },
            value: ValueFields { ty, init: None },
            source,
            name_loc,
        }
    }

    /// The `var` this is an element of
    pub fn source(&self) -> VarId {
        self.source
    }

    /// Location of this element's name
    pub fn name_loc(&self) -> SourceLoc {
        self.name_loc
    }
}

leaf_common!(ElementRefDecl, ElementRef, name_loc);
