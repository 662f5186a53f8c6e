//! Declaration kind discriminants and kind sets

use bitflags::bitflags;
use derive_more::Display;

/// Which leaf variant a declaration is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DeclKind {
    /// `var` declaration
    #[display("var_decl")]
    Var,
    /// `func` declaration
    #[display("func_decl")]
    Func,
    /// Named function argument
    #[display("arg_decl")]
    Arg,
    /// Anonymous closure argument (`$0` ... `$9`)
    #[display("anon_decl")]
    Anon,
    /// Element of a destructured `var`
    #[display("element_ref_decl")]
    ElementRef,
}

impl DeclKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Var,
        Self::Func,
        Self::Arg,
        Self::Anon,
        Self::ElementRef,
    ];
}

bitflags! {
    /// A set of declaration kinds, used to state which kinds a layer admits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindSet: u8 {
        /// [`DeclKind::Var`]
        const VAR = 1 << 0;
        /// [`DeclKind::Func`]
        const FUNC = 1 << 1;
        /// [`DeclKind::Arg`]
        const ARG = 1 << 2;
        /// [`DeclKind::Anon`]
        const ANON = 1 << 3;
        /// [`DeclKind::ElementRef`]
        const ELEMENT_REF = 1 << 4;
    }
}

impl KindSet {
    /// The singleton set holding `kind`
    pub const fn of(kind: DeclKind) -> Self {
        match kind {
            DeclKind::Var => Self::VAR,
            DeclKind::Func => Self::FUNC,
            DeclKind::Arg => Self::ARG,
            DeclKind::Anon => Self::ANON,
            DeclKind::ElementRef => Self::ELEMENT_REF,
        }
    }

    /// Whether `kind` is a member of this set
    pub const fn admits(self, kind: DeclKind) -> bool {
        self.contains(Self::of(kind))
    }
}
