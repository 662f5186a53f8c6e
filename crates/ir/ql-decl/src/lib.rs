//! Declaration nodes
//!
//! The closed family of named, value-bearing declarations produced while
//! parsing: `var`, `func`, function arguments, anonymous closure arguments and
//! elements of destructured `var`s.
//!
//! Declarations are built only through a [`DeclContext`], which owns them for
//! its whole lifetime. Consumers receive a [`Decl`] and narrow it with the
//! checked [`Decl::cast`] / [`Decl::dyn_cast`] protocol:
//!
//! ```
//! use ql_decl::{DeclAttributes, DeclContext, FuncDecl, VarDecl};
//! use ql_intern::Interner;
//! use ql_span::{FileId, SourceLoc};
//!
//! let interner = Interner::new();
//! let mut ctx = DeclContext::new();
//! let loc = SourceLoc::new(FileId::new(0), 0);
//! let var = ctx.alloc_var(loc, interner.intern("x"), None, None, DeclAttributes::default());
//!
//! let decl = &ctx[var.decl_id()];
//! assert!(decl.cast::<&VarDecl>().is_ok());
//! assert!(decl.cast::<&FuncDecl>().is_err());
//! ```

pub mod attrs;
pub mod cast;
pub mod config;
pub mod context;
pub mod decl;
pub mod error;
pub mod handle;
pub mod kind;
pub mod layer;
pub mod print;

pub use attrs::DeclAttributes;
pub use cast::Downcast;
pub use config::{ArenaConfig, DEFAULT_ALIGNMENT, NODE_ALIGNMENT};
pub use context::{ContextId, DeclContext, DeclId, VarId};
pub use decl::{AnonDecl, ArgDecl, Decl, ElementRefDecl, FuncDecl, NamedFields, ValueFields, VarDecl};
pub use error::{ConfigError, DowncastMismatch, ForeignVar};
pub use handle::{ExprRef, TypeRef};
pub use kind::{DeclKind, KindSet};
pub use layer::{NamedDecl, ValueDecl};
pub use print::{ExternalRender, OpaqueRender, Printer};
