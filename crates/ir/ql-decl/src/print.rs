//! Rendering declarations as indented s-expressions
//!
//! Output looks like:
//!
//! ```text
//! (var_decl 'x' loc=0:4 type='Int'
//!   (attributes brackets=[0:0, 0:9] infix=100)
//!   (init
//!     (integer 42)))
//! ```
//!
//! Names are quoted with `'`; a `'` or `\` inside a name is escaped with a
//! backslash. Types and initializers live in external stores, so the caller
//! supplies an [`ExternalRender`] that knows how to write them.

use crate::attrs::DeclAttributes;
use crate::decl::Decl;
use crate::handle::{ExprRef, TypeRef};
use ql_intern::Interner;
use std::fmt::{self, Write};
use std::io::{self, Write as _};

/// Writes the external entities a declaration refers to
pub trait ExternalRender {
    /// Writes `ty` as a single-line fragment
    fn write_type(&self, ty: TypeRef, out: &mut dyn Write) -> fmt::Result;

    /// Writes `expr` starting at column `indent`, without a trailing newline
    fn write_expr(&self, expr: ExprRef, indent: usize, out: &mut dyn Write) -> fmt::Result;
}

/// Renders handles as their raw ids, without consulting any store
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueRender;

impl ExternalRender for OpaqueRender {
    fn write_type(&self, ty: TypeRef, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{ty}")
    }

    fn write_expr(&self, expr: ExprRef, indent: usize, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{:indent$}({expr})", "")
    }
}

/// Formatting capability handed to `print` and `dump`
#[derive(Clone, Copy)]
pub struct Printer<'a> {
    interner: &'a Interner,
    externals: &'a dyn ExternalRender,
}

impl<'a> Printer<'a> {
    /// A printer that resolves names through `interner` and renders types and
    /// initializers opaquely
    pub fn new(interner: &'a Interner) -> Self {
        Self {
            interner,
            externals: &OpaqueRender,
        }
    }

    /// Uses `externals` to render types and initializers
    #[must_use]
    pub fn with_externals(mut self, externals: &'a dyn ExternalRender) -> Self {
        self.externals = externals;
        self
    }

    /// Writes `decl` at column `indent`, without a trailing newline
    ///
    /// # Errors
    ///
    /// Propagates failures of `out` and of the external renderer.
    pub fn print(&self, decl: &Decl, indent: usize, out: &mut dyn Write) -> fmt::Result {
        let name = self.interner.try_resolve(decl.name()).unwrap_or("<unknown>");
        write!(out, "{:indent$}({} ", "", decl.kind())?;
        write_quoted(name, out)?;
        write!(out, " loc={}", decl.loc_start())?;

        if let Some(ty) = decl.ty() {
            write!(out, " type='")?;
            self.externals.write_type(ty, out)?;
            write!(out, "'")?;
        }

        if let Decl::ElementRef(element) = decl {
            let source = u32::from(element.source().decl_id().into_raw());
            write!(out, " source=#{source}")?;
        }

        print_attributes(decl.attributes(), indent + 2, out)?;

        if let Some(init) = decl.init() {
            writeln!(out)?;
            writeln!(out, "{:indent$}(init", "", indent = indent + 2)?;
            self.externals.write_expr(init, indent + 4, out)?;
            write!(out, ")")?;
        }

        write!(out, ")")
    }

    /// Renders `decl` into a fresh string
    ///
    /// # Errors
    ///
    /// Fails only if the external renderer fails.
    pub fn render(&self, decl: &Decl) -> Result<String, fmt::Error> {
        let mut out = String::new();
        self.print(decl, 0, &mut out)?;
        Ok(out)
    }

    /// Writes `decl` and a newline to stderr
    ///
    /// # Errors
    ///
    /// Fails if rendering fails or stderr cannot be written.
    pub fn dump(&self, decl: &Decl) -> io::Result<()> {
        let text = self
            .render(decl)
            .map_err(|_| io::Error::other("failed to render declaration"))?;
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{text}")
    }
}

fn write_quoted(text: &str, out: &mut dyn Write) -> fmt::Result {
    out.write_char('\'')?;
    for ch in text.chars() {
        if matches!(ch, '\'' | '\\') {
            out.write_char('\\')?;
        }
        out.write_char(ch)?;
    }
    out.write_char('\'')
}

fn print_attributes(attrs: &DeclAttributes, indent: usize, out: &mut dyn Write) -> fmt::Result {
    if attrs.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    write!(out, "{:indent$}(attributes brackets={}", "", attrs.brackets)?;
    if let Some(precedence) = attrs.infix_precedence {
        write!(out, " infix={precedence}")?;
    }
    write!(out, ")")
}

impl Decl {
    /// Writes this declaration at column `indent` through `printer`
    ///
    /// # Errors
    ///
    /// See [`Printer::print`].
    pub fn print(&self, printer: &Printer<'_>, out: &mut dyn Write, indent: usize) -> fmt::Result {
        printer.print(self, indent, out)
    }

    /// Writes this declaration to stderr through `printer`
    ///
    /// # Errors
    ///
    /// See [`Printer::dump`].
    pub fn dump(&self, printer: &Printer<'_>) -> io::Result<()> {
        printer.dump(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DeclContext;
    use expect_test::expect;
    use ql_span::{FileId, SourceLoc, SourceRange};

    fn loc(offset: u32) -> SourceLoc {
        SourceLoc::new(FileId::new(0), offset)
    }

    #[test]
    fn test_print_var_with_everything() {
        let interner = Interner::new();
        let mut ctx = DeclContext::new();
        let attrs = DeclAttributes::default()
            .with_brackets(SourceRange::new(loc(0), loc(9)))
            .with_infix_precedence(100);
        let var = ctx.alloc_var(loc(11), interner.intern("x"), Some(TypeRef(1)), Some(ExprRef(2)), attrs);

        let text = Printer::new(&interner).render(&ctx[var.decl_id()]).unwrap();
        expect![[r#"
            (var_decl 'x' loc=0:11 type='type#1'
              (attributes brackets=[0:0, 0:9] infix=100)
              (init
                (expr#2)))"#]]
        .assert_eq(&text);
    }

    #[test]
    fn test_print_leaves_without_initializer() {
        let interner = Interner::new();
        let mut ctx = DeclContext::new();
        let source = ctx.alloc_var(loc(0), interner.intern(""), None, Some(ExprRef(0)), DeclAttributes::default());
        let arg = ctx.alloc_arg(loc(30), interner.intern("a"), Some(TypeRef(4)));
        let anon = ctx.alloc_anon(loc(42), interner.intern("$0"), None);
        let element = ctx.alloc_element_ref(source, loc(5), interner.intern("b"), Some(TypeRef(2))).unwrap();

        let printer = Printer::new(&interner);
        expect![[r#"(arg_decl 'a' loc=0:30 type='type#4')"#]].assert_eq(&printer.render(&ctx[arg]).unwrap());
        expect![[r#"(anon_decl '$0' loc=0:42)"#]].assert_eq(&printer.render(&ctx[anon]).unwrap());
        expect![[r#"(element_ref_decl 'b' loc=0:5 type='type#2' source=#0)"#]]
            .assert_eq(&printer.render(&ctx[element]).unwrap());
    }

    #[test]
    fn test_print_honours_indent() {
        let interner = Interner::new();
        let mut ctx = DeclContext::new();
        let func = ctx.alloc_func(loc(3), interner.intern("f"), None, Some(ExprRef(9)), DeclAttributes::default());

        let mut out = String::new();
        ctx[func].print(&Printer::new(&interner), &mut out, 4).unwrap();
        assert_eq!(out, "    (func_decl 'f' loc=0:3\n      (init\n        (expr#9)))");
    }

    #[test]
    fn test_print_is_idempotent() {
        let interner = Interner::new();
        let mut ctx = DeclContext::new();
        let var = ctx.alloc_var(loc(1), interner.intern("y"), None, Some(ExprRef(3)), DeclAttributes::default());
        let printer = Printer::new(&interner);

        let first = printer.render(&ctx[var.decl_id()]).unwrap();
        let second = printer.render(&ctx[var.decl_id()]).unwrap();
        assert_eq!(first, second);
        assert!(ctx[var.decl_id()].dump(&printer).is_ok());
    }

    #[test]
    fn test_print_escapes_quotes_in_names() {
        let interner = Interner::new();
        let mut ctx = DeclContext::new();
        let func = ctx.alloc_func(loc(0), interner.intern(r"it's\"), None, None, DeclAttributes::default());

        let text = Printer::new(&interner).render(&ctx[func]).unwrap();
        assert_eq!(text, r"(func_decl 'it\'s\\' loc=0:0)");
    }
}
