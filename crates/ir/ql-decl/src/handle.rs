//! Handles into stores owned outside the declaration context
//!
//! Types and expressions live in their own stores. A declaration only keeps a
//! handle; it never looks inside, and holding one puts no obligation on the
//! declaration to keep the target alive.

use std::fmt;

/// Handle to a type in an external type store
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct TypeRef(pub u32);

/// Handle to an expression in an external expression store
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct ExprRef(pub u32);

impl fmt::Display for TypeRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "type#{}", self.0)
    }
}

impl fmt::Display for ExprRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "expr#{}", self.0)
    }
}
