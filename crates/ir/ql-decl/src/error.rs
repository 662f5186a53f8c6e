//! Error types for declaration contexts

use crate::context::ContextId;
use crate::kind::DeclKind;
use miette::Diagnostic;
use thiserror::Error;

/// A declaration was narrowed to a layer that does not admit its kind
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Diagnostic)]
#[error("cannot narrow a {found} to {target}")]
#[diagnostic(
    code(decl::downcast_mismatch),
    help("check `kind()` first, or use `dyn_cast` when the kind is not known")
)]
pub struct DowncastMismatch {
    /// Kind of the declaration that was narrowed
    pub found: DeclKind,
    /// Layer it was narrowed to
    pub target: &'static str,
}

/// Invalid arena configuration
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// The configuration text is not valid TOML for [`ArenaConfig`](crate::ArenaConfig)
    #[error("invalid arena configuration: {0}")]
    #[diagnostic(code(decl::config_parse))]
    Parse(#[from] toml::de::Error),

    /// Declarations cannot be placed at the requested alignment
    #[error("arena alignment {alignment} is not a power of two no larger than {supported}")]
    #[diagnostic(code(decl::config_alignment))]
    InvalidAlignment {
        /// Alignment that was requested
        alignment: usize,
        /// Largest alignment a declaration is placed at
        supported: usize,
    },
}

/// A [`VarId`](crate::VarId) was handed to a context that did not mint it
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Diagnostic)]
#[error("var id belongs to {owner}, not {context}")]
#[diagnostic(
    code(decl::foreign_var),
    help("element refs must destructure a var of the same context")
)]
pub struct ForeignVar {
    /// Context that minted the id
    pub owner: ContextId,
    /// Context the id was handed to
    pub context: ContextId,
}
