//! Attribute bag attached to named declarations

use ql_span::SourceRange;

/// Surface-syntax attributes written on a declaration, e.g. `[infix=120]`
///
/// Nothing here is validated. Whoever builds the bag is responsible for the
/// brackets being well formed and for the precedence being meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DeclAttributes {
    /// Locations of `[` and `]`; invalid when no attribute list was written
    pub brackets: SourceRange,
    /// Precedence when the declaration is an infix operator
    pub infix_precedence: Option<u8>,
}

impl DeclAttributes {
    /// Attaches the bracket locations of the attribute list
    #[must_use]
    pub fn with_brackets(mut self, brackets: SourceRange) -> Self {
        self.brackets = brackets;
        self
    }

    /// Marks the declaration as an infix operator of the given precedence
    #[must_use]
    pub fn with_infix_precedence(mut self, precedence: u8) -> Self {
        self.infix_precedence = Some(precedence);
        self
    }

    /// Whether the declaration is an infix operator
    pub fn is_infix(&self) -> bool {
        self.infix_precedence.is_some()
    }

    /// Whether this is the default, attribute-free bag
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_span::{FileId, SourceLoc};

    #[test]
    fn test_default_has_no_attributes() {
        let attrs = DeclAttributes::default();
        assert!(!attrs.brackets.is_valid());
        assert_eq!(attrs.infix_precedence, None);
        assert!(!attrs.is_infix());
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_precedence_extremes_are_infix() {
        for precedence in [0, 255] {
            let attrs = DeclAttributes::default().with_infix_precedence(precedence);
            assert!(attrs.is_infix());
            assert_eq!(attrs.infix_precedence, Some(precedence));
            assert!(!attrs.is_empty());
        }
    }

    #[test]
    fn test_brackets_alone_are_not_infix() {
        let file = FileId::new(0);
        let attrs = DeclAttributes::default()
            .with_brackets(SourceRange::new(SourceLoc::new(file, 0), SourceLoc::new(file, 9)));
        assert!(attrs.brackets.is_valid());
        assert!(!attrs.is_infix());
        assert!(!attrs.is_empty());
    }
}
