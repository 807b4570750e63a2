//! Rendering trees back to source text.
//!
//! [`Pretty`] is a [`Visitor`] whose parameter is the precedence context the
//! current expression is printed in. An operator expression wraps itself in
//! parentheses when its own precedence is below that context, and raises the
//! context by one for the right operand of left-associative operators, so
//! `a - (b - c)` keeps its parentheses while `a - b - c` needs none.
//!
//! Statements are printed in the [`prec::NOT_EXPRESSION`] context, which is
//! also what makes expression statements and declarations end with `;`.
//!
//! # Output conventions
//!
//! - Blocks and class bodies open with `{` on the same line and indent their
//!   contents by [`PrettyConfig::indent_width`] columns.
//! - `case L:` groups are aligned with their `switch`; their statements are
//!   indented one level.
//! - A required child that is absent prints as `/*missing*/`; an erroneous
//!   node prints as `(ERROR)`.
//!
//! The only error a printer reports is a failure of the underlying writer.

use std::{
    fmt::{self, Display, Formatter},
    io::{self, Write},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    enums_impl::{Constant, TypeTag, flags},
    errors::PrettyError,
    names::Name,
    nodes::{
        Annotation, AnnotatedType, ArrayAccess, ArrayType, Assert, Assign, AssignOp, Binary,
        BindingPattern, Block, BoundKind, Break, Case, CaseKind, Catch, ClassDecl, ClassKind,
        Conditional, Continue, DefaultCaseLabel, DoWhileLoop, EnhancedForLoop, Erroneous,
        Exports, ExpressionStatement, FieldAccess, ForLoop, GuardPattern, Ident, If, Import,
        InstanceOf, LabeledStatement, Lambda, LetExpr, Literal, MemberReference, MethodDecl,
        MethodInvocation, ModuleDecl, ModuleKind, Modifiers, NewArray, NewClass, Opens,
        PackageDecl, ParameterKind, Parens, ParenthesizedPattern, PrimitiveType, Provides,
        ReferenceMode, Requires, Return, Skip, Switch, SwitchExpression, Synchronized, Tag,
        Throw, TopLevel, Tree, TreeKind, Try, TypeApply, TypeBoundKind, TypeCast,
        TypeIntersection, TypeParameter, TypeUnion, Unary, Uses, VariableDecl, WhileLoop,
        Wildcard, Yield,
    },
    tables::DocCommentTable,
    tree_info::{self, op_prec, prec},
    visitor::Visitor,
};

const MISSING: &str = "/*missing*/";
const ELLIPSIS: &str = "[...]";

/// Printer settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettyConfig {
    /// Columns added per nesting level.
    pub indent_width: usize,
    pub line_separator: String,
    /// Print compilable source: hide constructors of anonymous classes and
    /// the implicit modifiers of enum constants.
    pub source_output: bool,
    /// Length budget of [`to_simple_string`] when called through
    /// [`Pretty::simple_string`].
    pub simple_string_length: usize,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        PrettyConfig {
            indent_width: 4,
            line_separator: "\n".to_string(),
            source_output: false,
            simple_string_length: 20,
        }
    }
}

/// Source printer writing to `W`.
pub struct Pretty<'d, W> {
    out: W,
    config: PrettyConfig,
    lmargin: usize,
    encl_class_name: Option<Name>,
    doc_comments: Option<&'d dyn DocCommentTable>,
}

impl<'d, W: Write> Pretty<'d, W> {
    pub fn new(out: W, config: PrettyConfig) -> Self {
        Pretty {
            out,
            config,
            lmargin: 0,
            encl_class_name: None,
            doc_comments: None,
        }
    }

    /// Prints `/** ... */` blocks for declarations that have a comment in
    /// `table`.
    #[must_use]
    pub fn with_doc_comments(mut self, table: &'d dyn DocCommentTable) -> Self {
        self.doc_comments = Some(table);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints `tree` as an expression in the lowest precedence context.
    ///
    /// # Errors
    ///
    /// Returns [`PrettyError::Io`] if the writer fails.
    pub fn print_expr(&mut self, tree: &Tree) -> Result<(), PrettyError> {
        self.print_expr_prec(tree, prec::NO_PREC)
    }

    /// Prints `tree` as an expression in the context of precedence `prec`.
    ///
    /// # Errors
    ///
    /// Returns [`PrettyError::Io`] if the writer fails.
    pub fn print_expr_prec(&mut self, tree: &Tree, prec: i32) -> Result<(), PrettyError> {
        Ok(self.expr(tree, prec)?)
    }

    /// Prints `tree` as a statement.
    ///
    /// # Errors
    ///
    /// Returns [`PrettyError::Io`] if the writer fails.
    pub fn print_stat(&mut self, tree: &Tree) -> Result<(), PrettyError> {
        Ok(self.stat(tree)?)
    }

    /// Prints each statement on its own line at the current margin.
    ///
    /// # Errors
    ///
    /// Returns [`PrettyError::Io`] if the writer fails.
    pub fn print_stats(&mut self, trees: &[Tree]) -> Result<(), PrettyError> {
        Ok(self.stats(trees)?)
    }

    /// Prints a compilation unit: package clause, imports, then the type
    /// and module declarations separated by blank lines. Any other tree is
    /// printed as a statement.
    ///
    /// # Errors
    ///
    /// Returns [`PrettyError::Io`] if the writer fails.
    pub fn print_unit(&mut self, tree: &Tree) -> Result<(), PrettyError> {
        match &tree.kind {
            TreeKind::TopLevel(unit) => Ok(self.unit(tree, unit)?),
            _ => self.print_stat(tree),
        }
    }

    fn unit(&mut self, tree: &Tree, unit: &TopLevel) -> io::Result<()> {
        self.doc_comment(tree)?;
        let mut wrote_any = false;
        let mut in_imports = false;
        for def in &unit.defs {
            match &def.kind {
                TreeKind::PackageDecl(_) => {
                    self.stat(def)?;
                    self.println()?;
                }
                TreeKind::Import(_) => {
                    if wrote_any && !in_imports {
                        self.println()?;
                    }
                    in_imports = true;
                    self.stat(def)?;
                    self.println()?;
                }
                _ => {
                    if wrote_any {
                        self.println()?;
                    }
                    in_imports = false;
                    self.align()?;
                    self.stat(def)?;
                    self.println()?;
                }
            }
            wrote_any = true;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn println(&mut self) -> io::Result<()> {
        self.out.write_all(self.config.line_separator.as_bytes())
    }

    fn align(&mut self) -> io::Result<()> {
        write!(self.out, "{:width$}", "", width = self.lmargin)
    }

    fn indent(&mut self) {
        self.lmargin += self.config.indent_width;
    }

    fn undent(&mut self) {
        self.lmargin = self.lmargin.saturating_sub(self.config.indent_width);
    }

    fn open(&mut self, context: i32, own: i32) -> io::Result<()> {
        if own < context {
            self.print("(")?;
        }
        Ok(())
    }

    fn close(&mut self, context: i32, own: i32) -> io::Result<()> {
        if own < context {
            self.print(")")?;
        }
        Ok(())
    }

    fn expr(&mut self, tree: &Tree, prec: i32) -> io::Result<()> {
        tree.accept(self, prec)
    }

    fn expr_opt(&mut self, tree: Option<&Tree>, prec: i32) -> io::Result<()> {
        match tree {
            Some(tree) => self.expr(tree, prec),
            None => {
                warn!("printing a tree with a missing child");
                self.print(MISSING)
            }
        }
    }

    fn exprs(&mut self, trees: &[Tree], separator: &str) -> io::Result<()> {
        for (i, tree) in trees.iter().enumerate() {
            if i > 0 {
                self.print(separator)?;
            }
            self.expr(tree, prec::NO_PREC)?;
        }
        Ok(())
    }

    fn stat(&mut self, tree: &Tree) -> io::Result<()> {
        self.expr(tree, prec::NOT_EXPRESSION)
    }

    fn stats(&mut self, trees: &[Tree]) -> io::Result<()> {
        for tree in trees {
            self.align()?;
            self.stat(tree)?;
            self.println()?;
        }
        Ok(())
    }

    fn block(&mut self, stats: &[Tree]) -> io::Result<()> {
        self.print("{")?;
        self.println()?;
        self.indent();
        self.stats(stats)?;
        self.undent();
        self.align()?;
        self.print("}")
    }

    fn class_body<'t>(&mut self, defs: impl IntoIterator<Item = &'t Tree>) -> io::Result<()> {
        self.print("{")?;
        self.println()?;
        self.indent();
        for def in defs {
            if self.is_hidden_member(def) {
                continue;
            }
            self.member(def)?;
        }
        self.undent();
        self.align()?;
        self.print("}")
    }

    fn member(&mut self, def: &Tree) -> io::Result<()> {
        if matches!(def.kind, TreeKind::MethodDecl(_) | TreeKind::ClassDecl(_)) {
            self.println()?;
        }
        self.align()?;
        self.stat(def)?;
        self.println()
    }

    fn enum_body(&mut self, defs: &[Tree]) -> io::Result<()> {
        self.print("{")?;
        self.println()?;
        self.indent();
        let mut first = true;
        for constant in defs.iter().filter(|def| tree_info::is_enum_constant(def)) {
            if !first {
                self.print(",")?;
                self.println()?;
            }
            self.align()?;
            self.stat(constant)?;
            first = false;
        }
        self.print(";")?;
        self.println()?;
        for def in defs.iter().filter(|def| !tree_info::is_enum_constant(def)) {
            if self.is_hidden_member(def) {
                continue;
            }
            self.member(def)?;
        }
        self.undent();
        self.align()?;
        self.print("}")
    }

    fn is_hidden_member(&self, def: &Tree) -> bool {
        self.config.source_output
            && self.encl_class_name.is_none()
            && tree_info::is_constructor(def)
    }

    fn flags(&mut self, bits: u64) -> io::Result<()> {
        if bits & flags::SYNTHETIC != 0 {
            self.print("/*synthetic*/ ")?;
        }
        let words = flags::keywords(bits);
        if !words.is_empty() {
            self.print(&words.join(" "))?;
            self.print(" ")?;
        }
        if bits & flags::ANNOTATION != 0 {
            self.print("@")?;
        }
        Ok(())
    }

    /// Declaration annotations, one per line.
    fn decl_annotations(&mut self, annotations: &[Tree]) -> io::Result<()> {
        for annotation in annotations {
            self.expr(annotation, prec::NO_PREC)?;
            self.println()?;
            self.align()?;
        }
        Ok(())
    }

    fn type_annotations(&mut self, annotations: &[Tree]) -> io::Result<()> {
        for annotation in annotations {
            self.expr(annotation, prec::NO_PREC)?;
            self.print(" ")?;
        }
        Ok(())
    }

    fn type_parameters(&mut self, typarams: &[Tree]) -> io::Result<()> {
        if !typarams.is_empty() {
            self.print("<")?;
            self.exprs(typarams, ", ")?;
            self.print(">")?;
        }
        Ok(())
    }

    fn doc_comment(&mut self, tree: &Tree) -> io::Result<()> {
        let Some(text) = self.doc_comments.and_then(|table| table.comment_text(tree)) else {
            return Ok(());
        };
        self.print("/**")?;
        self.println()?;
        for line in text.lines() {
            self.align()?;
            self.print(" *")?;
            if line.chars().next().is_some_and(|c| c > ' ') {
                self.print(" ")?;
            }
            self.print(line)?;
            self.println()?;
        }
        self.align()?;
        self.print(" */")?;
        self.println()?;
        self.align()
    }

    /// A condition in parentheses, unless it already is a parenthesized
    /// expression.
    fn cond(&mut self, cond: &Tree) -> io::Result<()> {
        if matches!(cond.kind, TreeKind::Parens(_)) {
            self.expr(cond, prec::NO_PREC)
        } else {
            self.print("(")?;
            self.expr(cond, prec::NO_PREC)?;
            self.print(")")
        }
    }

    fn base_element_type(&mut self, tree: &Tree) -> io::Result<()> {
        self.expr(tree_info::innermost_type(tree, false), prec::NO_PREC)
    }

    /// The `[]` suffixes of an array type, with any annotations on each
    /// dimension.
    fn brackets(&mut self, tree: &Tree) -> io::Result<()> {
        let mut elem = tree;
        loop {
            if let TreeKind::AnnotatedType(annotated) = &elem.kind {
                elem = &annotated.underlying_type;
                if matches!(elem.kind, TreeKind::ArrayType(_)) {
                    self.print(" ")?;
                    self.type_annotations(&annotated.annotations)?;
                }
            }
            match &elem.kind {
                TreeKind::ArrayType(array) => {
                    self.print("[]")?;
                    elem = &array.elemtype;
                }
                _ => return Ok(()),
            }
        }
    }

    fn switch_body(&mut self, selector: &Tree, cases: &[Tree]) -> io::Result<()> {
        self.print("switch ")?;
        self.cond(selector)?;
        self.print(" {")?;
        self.println()?;
        self.stats(cases)?;
        self.align()?;
        self.print("}")
    }

    fn enum_constant(&mut self, node: &VariableDecl) -> io::Result<()> {
        if !self.config.source_output {
            self.print("/*public static final*/ ")?;
        }
        self.print(&node.name)?;
        let Some(init) = node.init.as_deref() else {
            return Ok(());
        };
        match &init.kind {
            TreeKind::NewClass(creation) => {
                if !creation.args.is_empty() {
                    self.print("(")?;
                    self.exprs(&creation.args, ", ")?;
                    self.print(")")?;
                }
                if let Some(TreeKind::ClassDecl(body)) = creation.def.as_deref().map(|def| &def.kind) {
                    self.print(" ")?;
                    let prev = self.encl_class_name.take();
                    self.class_body(&body.defs)?;
                    self.encl_class_name = prev;
                }
                Ok(())
            }
            _ => {
                self.print(" /* = ")?;
                self.expr(init, prec::NO_PREC)?;
                self.print(" */")
            }
        }
    }

    fn record_components(&mut self, defs: &[Tree]) -> io::Result<()> {
        self.print("(")?;
        let mut first = true;
        for def in defs {
            let TreeKind::VariableDecl(component) = &def.kind else {
                continue;
            };
            if component.flags() & flags::RECORD == 0 {
                continue;
            }
            if !first {
                self.print(", ")?;
            }
            self.expr_opt(component.vartype.as_deref(), prec::NO_PREC)?;
            self.print(" ")?;
            self.print(&component.name)?;
            first = false;
        }
        self.print(")")
    }

    /// `break` or `continue`; the `;` is printed in every context.
    fn jump(&mut self, keyword: &str, label: Option<&Name>) -> io::Result<()> {
        self.print(keyword)?;
        if let Some(label) = label {
            self.print(" ")?;
            self.print(label)?;
        }
        self.print(";")
    }
}

fn modifiers_of(mods: &Tree) -> (&[Tree], u64) {
    match &mods.kind {
        TreeKind::Modifiers(node) => (&node.annotations, node.flags),
        _ => (&[][..], 0),
    }
}

fn is_record_component(def: &Tree) -> bool {
    matches!(&def.kind, TreeKind::VariableDecl(var) if var.flags() & flags::RECORD != 0)
}

/// `- -x` and `- -1` must not print as `--x` and `--1`.
fn prefix_needs_space(opcode: Tag, arg: &Tree) -> bool {
    let sign = match opcode {
        Tag::Neg | Tag::PreDec => '-',
        Tag::Pos | Tag::PreInc => '+',
        _ => return false,
    };
    match &arg.kind {
        TreeKind::Unary(inner) if !inner.opcode.is_post_unary_op() => inner
            .opcode
            .operator_name()
            .is_some_and(|name| name.starts_with(sign)),
        TreeKind::Literal(literal) => sign == '-' && is_negative(&literal.value),
        _ => false,
    }
}

fn is_negative(value: &Constant) -> bool {
    match value {
        Constant::Int(v) => *v < 0,
        Constant::Long(v) => *v < 0,
        Constant::Float(v) => v.is_sign_negative(),
        Constant::Double(v) => v.is_sign_negative(),
        _ => false,
    }
}

fn literal_text(node: &Literal) -> String {
    let value = &node.value;
    match node.typetag {
        TypeTag::Int | TypeTag::Byte | TypeTag::Short => match value.as_i64() {
            Some(v) => v.to_string(),
            None => value.to_string(),
        },
        TypeTag::Long => match value.as_i64() {
            Some(v) => format!("{v}L"),
            None => format!("{value}L"),
        },
        TypeTag::Float => match value {
            Constant::Float(v) => format!("{}F", java_floating(format!("{v:?}"), v.is_finite())),
            Constant::Double(v) => format!("{}F", java_floating(format!("{v:?}"), v.is_finite())),
            other => format!("{other}F"),
        },
        TypeTag::Double => match value {
            Constant::Float(v) => java_floating(format!("{v:?}"), v.is_finite()),
            Constant::Double(v) => java_floating(format!("{v:?}"), v.is_finite()),
            other => other.to_string(),
        },
        TypeTag::Char => {
            let c = match value {
                Constant::Char(c) => Some(*c),
                other => other
                    .as_i64()
                    .and_then(|code| u32::try_from(code).ok())
                    .and_then(char::from_u32),
            };
            match c {
                Some(c) => format!("'{}'", quote_char(c)),
                None => format!("'{value}'"),
            }
        }
        TypeTag::Boolean => match value {
            Constant::Bool(b) => b.to_string(),
            other => (other.as_i64() == Some(1)).to_string(),
        },
        TypeTag::Bot => "null".to_string(),
        _ => format!("\"{}\"", quote(&value.to_string())),
    }
}

/// Rust's shortest round-trip float rendering, in Java literal syntax.
fn java_floating(text: String, finite: bool) -> String {
    if !finite {
        return match text.as_str() {
            "NaN" => "(0.0/0.0)".to_string(),
            "-inf" => "(-1.0/0.0)".to_string(),
            _ => "(1.0/0.0)".to_string(),
        };
    }
    match text.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => text,
    }
}

/// Escapes a character for a Java character or string literal.
fn quote_char(c: char) -> String {
    match c {
        '\u{8}' => "\\b".to_string(),
        '\u{c}' => "\\f".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\'' => "\\'".to_string(),
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        ' '..='~' => c.to_string(),
        _ => {
            let mut units = [0u16; 2];
            c.encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("\\u{unit:04x}"))
                .collect()
        }
    }
}

fn quote(text: &str) -> String {
    text.chars().map(quote_char).collect()
}

impl<W: Write> Visitor<i32> for Pretty<'_, W> {
    type Output = io::Result<()>;

    fn visit_top_level(&mut self, tree: &Tree, node: &TopLevel, _prec: i32) -> io::Result<()> {
        self.unit(tree, node)
    }

    fn visit_package_decl(&mut self, tree: &Tree, node: &PackageDecl, _prec: i32) -> io::Result<()> {
        self.doc_comment(tree)?;
        self.decl_annotations(&node.annotations)?;
        self.print("package ")?;
        self.expr(&node.pid, prec::NO_PREC)?;
        self.print(";")
    }

    fn visit_import(&mut self, _tree: &Tree, node: &Import, _prec: i32) -> io::Result<()> {
        self.print("import ")?;
        if node.static_import {
            self.print("static ")?;
        }
        self.expr(&node.qualid, prec::NO_PREC)?;
        self.print(";")
    }

    fn visit_class_decl(&mut self, tree: &Tree, node: &ClassDecl, _prec: i32) -> io::Result<()> {
        self.doc_comment(tree)?;
        let (annotations, bits) = modifiers_of(&node.mods);
        self.decl_annotations(annotations)?;
        self.flags(bits & !flags::INTERFACE)?;
        let prev = self.encl_class_name.replace(node.name.clone());
        let kind = node.class_kind();
        match kind {
            ClassKind::Interface | ClassKind::Annotation => {
                self.print("interface ")?;
                self.print(&node.name)?;
                self.type_parameters(&node.typarams)?;
                if !node.implementing.is_empty() {
                    self.print(" extends ")?;
                    self.exprs(&node.implementing, ", ")?;
                }
            }
            ClassKind::Class | ClassKind::Enum | ClassKind::Record => {
                self.print(match kind {
                    ClassKind::Enum => "enum ",
                    ClassKind::Record => "record ",
                    _ => "class ",
                })?;
                self.print(&node.name)?;
                self.type_parameters(&node.typarams)?;
                if kind == ClassKind::Record {
                    self.record_components(&node.defs)?;
                }
                if let Some(extending) = &node.extending {
                    self.print(" extends ")?;
                    self.expr(extending, prec::NO_PREC)?;
                }
                if !node.implementing.is_empty() {
                    self.print(" implements ")?;
                    self.exprs(&node.implementing, ", ")?;
                }
            }
        }
        if !node.permitting.is_empty() {
            self.print(" permits ")?;
            self.exprs(&node.permitting, ", ")?;
        }
        self.print(" ")?;
        match kind {
            ClassKind::Enum => self.enum_body(&node.defs)?,
            ClassKind::Record => {
                self.class_body(node.defs.iter().filter(|def| !is_record_component(def)))?;
            }
            _ => self.class_body(&node.defs)?,
        }
        self.encl_class_name = prev;
        Ok(())
    }

    fn visit_method_decl(&mut self, tree: &Tree, node: &MethodDecl, _prec: i32) -> io::Result<()> {
        if self.is_hidden_member(tree) {
            return Ok(());
        }
        self.doc_comment(tree)?;
        let (annotations, bits) = modifiers_of(&node.mods);
        self.decl_annotations(annotations)?;
        self.flags(bits)?;
        if !node.typarams.is_empty() {
            self.type_parameters(&node.typarams)?;
            self.print(" ")?;
        }
        if node.is_constructor() {
            let name = self.encl_class_name.clone().unwrap_or_else(|| node.name.clone());
            self.print(&name)?;
        } else {
            self.expr_opt(node.restype.as_deref(), prec::NO_PREC)?;
            self.print(" ")?;
            self.print(&node.name)?;
        }
        self.print("(")?;
        if let Some(recvparam) = &node.recvparam {
            self.expr(recvparam, prec::NO_PREC)?;
            if !node.params.is_empty() {
                self.print(", ")?;
            }
        }
        self.exprs(&node.params, ", ")?;
        self.print(")")?;
        if !node.thrown.is_empty() {
            self.print(" throws ")?;
            self.exprs(&node.thrown, ", ")?;
        }
        if let Some(default_value) = &node.default_value {
            self.print(" default ")?;
            self.expr(default_value, prec::NO_PREC)?;
        }
        match &node.body {
            Some(body) => {
                self.print(" ")?;
                self.stat(body)
            }
            None => self.print(";"),
        }
    }

    fn visit_variable_decl(&mut self, tree: &Tree, node: &VariableDecl, prec: i32) -> io::Result<()> {
        self.doc_comment(tree)?;
        if node.is_enum_constant() {
            return self.enum_constant(node);
        }
        self.expr(&node.mods, prec::NO_PREC)?;
        if node.flags() & flags::VARARGS != 0 {
            let (annotations, vartype) = match node.vartype.as_deref().map(|t| (t, &t.kind)) {
                Some((_, TreeKind::AnnotatedType(annotated))) => {
                    (annotated.annotations.as_slice(), Some(&*annotated.underlying_type))
                }
                Some((vartype, _)) => (&[][..], Some(vartype)),
                None => (&[][..], None),
            };
            match vartype.map(|t| &t.kind) {
                Some(TreeKind::ArrayType(array)) => self.expr(&array.elemtype, prec::NO_PREC)?,
                _ => self.expr_opt(vartype, prec::NO_PREC)?,
            }
            if !annotations.is_empty() {
                self.print(" ")?;
                self.type_annotations(annotations)?;
            }
            self.print("... ")?;
            self.print(&node.name)?;
        } else if let Some(vartype) = &node.vartype {
            self.expr(vartype, prec::NO_PREC)?;
            self.print(" ")?;
            self.print(&node.name)?;
        } else if node.declared_using_var {
            self.print("var ")?;
            self.print(&node.name)?;
        } else {
            self.print(&node.name)?;
        }
        if let Some(init) = &node.init {
            self.print(" = ")?;
            self.expr(init, prec::NO_PREC)?;
        }
        if prec == prec::NOT_EXPRESSION {
            self.print(";")?;
        }
        Ok(())
    }

    fn visit_skip(&mut self, _tree: &Tree, _node: &Skip, _prec: i32) -> io::Result<()> {
        self.print(";")
    }

    fn visit_block(&mut self, _tree: &Tree, node: &Block, _prec: i32) -> io::Result<()> {
        self.flags(node.flags)?;
        self.block(&node.stats)
    }

    fn visit_do_while_loop(&mut self, _tree: &Tree, node: &DoWhileLoop, _prec: i32) -> io::Result<()> {
        self.print("do ")?;
        self.stat(&node.body)?;
        self.print(" while ")?;
        self.cond(&node.cond)?;
        self.print(";")
    }

    fn visit_while_loop(&mut self, _tree: &Tree, node: &WhileLoop, _prec: i32) -> io::Result<()> {
        self.print("while ")?;
        self.cond(&node.cond)?;
        self.print(" ")?;
        self.stat(&node.body)
    }

    fn visit_for_loop(&mut self, _tree: &Tree, node: &ForLoop, _prec: i32) -> io::Result<()> {
        self.print("for (")?;
        if let Some((first, rest)) = node.init.split_first() {
            if matches!(first.kind, TreeKind::VariableDecl(_)) {
                self.expr(first, prec::NO_PREC)?;
                for def in rest {
                    if let TreeKind::VariableDecl(var) = &def.kind {
                        self.print(", ")?;
                        self.print(&var.name)?;
                        if let Some(init) = &var.init {
                            self.print(" = ")?;
                            self.expr(init, prec::NO_PREC)?;
                        }
                    }
                }
            } else {
                self.exprs(&node.init, ", ")?;
            }
        }
        self.print("; ")?;
        if let Some(cond) = &node.cond {
            self.expr(cond, prec::NO_PREC)?;
        }
        self.print("; ")?;
        self.exprs(&node.step, ", ")?;
        self.print(") ")?;
        self.stat(&node.body)
    }

    fn visit_enhanced_for_loop(
        &mut self,
        _tree: &Tree,
        node: &EnhancedForLoop,
        _prec: i32,
    ) -> io::Result<()> {
        self.print("for (")?;
        self.expr(&node.var, prec::NO_PREC)?;
        self.print(" : ")?;
        self.expr(&node.expr, prec::NO_PREC)?;
        self.print(") ")?;
        self.stat(&node.body)
    }

    fn visit_labeled_statement(
        &mut self,
        _tree: &Tree,
        node: &LabeledStatement,
        _prec: i32,
    ) -> io::Result<()> {
        self.print(&node.label)?;
        self.print(": ")?;
        self.stat(&node.body)
    }

    fn visit_switch(&mut self, _tree: &Tree, node: &Switch, _prec: i32) -> io::Result<()> {
        self.switch_body(&node.selector, &node.cases)
    }

    fn visit_case(&mut self, _tree: &Tree, node: &Case, _prec: i32) -> io::Result<()> {
        match node.labels.as_slice() {
            [only] if matches!(only.kind, TreeKind::DefaultCaseLabel(_)) => self.print("default")?,
            labels => {
                self.print("case ")?;
                self.exprs(labels, ", ")?;
            }
        }
        match node.kind {
            CaseKind::Statement => {
                self.print(":")?;
                self.indent();
                for stat in &node.stats {
                    self.println()?;
                    self.align()?;
                    self.stat(stat)?;
                }
                self.undent();
                Ok(())
            }
            CaseKind::Rule => {
                self.print(" -> ")?;
                match node.stats.as_slice() {
                    [body] => self.stat(body),
                    stats => self.block(stats),
                }
            }
        }
    }

    fn visit_switch_expression(
        &mut self,
        _tree: &Tree,
        node: &SwitchExpression,
        _prec: i32,
    ) -> io::Result<()> {
        self.switch_body(&node.selector, &node.cases)
    }

    fn visit_synchronized(&mut self, _tree: &Tree, node: &Synchronized, _prec: i32) -> io::Result<()> {
        self.print("synchronized ")?;
        self.cond(&node.lock)?;
        self.print(" ")?;
        self.stat(&node.body)
    }

    fn visit_try(&mut self, _tree: &Tree, node: &Try, _prec: i32) -> io::Result<()> {
        self.print("try ")?;
        if !node.resources.is_empty() {
            self.print("(")?;
            self.exprs(&node.resources, "; ")?;
            self.print(") ")?;
        }
        self.stat(&node.body)?;
        for catcher in &node.catchers {
            self.stat(catcher)?;
        }
        if let Some(finalizer) = &node.finalizer {
            self.print(" finally ")?;
            self.stat(finalizer)?;
        }
        Ok(())
    }

    fn visit_catch(&mut self, _tree: &Tree, node: &Catch, _prec: i32) -> io::Result<()> {
        self.print(" catch (")?;
        self.expr(&node.param, prec::NO_PREC)?;
        self.print(") ")?;
        self.stat(&node.body)
    }

    fn visit_conditional(&mut self, _tree: &Tree, node: &Conditional, prec: i32) -> io::Result<()> {
        self.open(prec, prec::COND)?;
        self.expr(&node.cond, prec::COND + 1)?;
        self.print(" ? ")?;
        self.expr(&node.truepart, prec::NO_PREC)?;
        self.print(" : ")?;
        self.expr(&node.falsepart, prec::COND)?;
        self.close(prec, prec::COND)
    }

    fn visit_if(&mut self, _tree: &Tree, node: &If, _prec: i32) -> io::Result<()> {
        self.print("if ")?;
        self.cond(&node.cond)?;
        self.print(" ")?;
        self.stat(&node.thenpart)?;
        if let Some(elsepart) = &node.elsepart {
            self.print(" else ")?;
            self.stat(elsepart)?;
        }
        Ok(())
    }

    fn visit_expression_statement(
        &mut self,
        _tree: &Tree,
        node: &ExpressionStatement,
        prec: i32,
    ) -> io::Result<()> {
        self.expr(&node.expr, prec::NO_PREC)?;
        if prec == prec::NOT_EXPRESSION {
            self.print(";")?;
        }
        Ok(())
    }

    fn visit_break(&mut self, _tree: &Tree, node: &Break, _prec: i32) -> io::Result<()> {
        self.jump("break", node.label.as_ref())
    }

    fn visit_yield(&mut self, _tree: &Tree, node: &Yield, _prec: i32) -> io::Result<()> {
        self.print("yield ")?;
        self.expr(&node.value, prec::NO_PREC)?;
        self.print(";")
    }

    fn visit_continue(&mut self, _tree: &Tree, node: &Continue, _prec: i32) -> io::Result<()> {
        self.jump("continue", node.label.as_ref())
    }

    fn visit_return(&mut self, _tree: &Tree, node: &Return, _prec: i32) -> io::Result<()> {
        self.print("return")?;
        if let Some(expr) = &node.expr {
            self.print(" ")?;
            self.expr(expr, prec::NO_PREC)?;
        }
        self.print(";")
    }

    fn visit_throw(&mut self, _tree: &Tree, node: &Throw, _prec: i32) -> io::Result<()> {
        self.print("throw ")?;
        self.expr(&node.expr, prec::NO_PREC)?;
        self.print(";")
    }

    fn visit_assert(&mut self, _tree: &Tree, node: &Assert, _prec: i32) -> io::Result<()> {
        self.print("assert ")?;
        self.expr(&node.cond, prec::NO_PREC)?;
        if let Some(detail) = &node.detail {
            self.print(" : ")?;
            self.expr(detail, prec::NO_PREC)?;
        }
        self.print(";")
    }

    fn visit_method_invocation(
        &mut self,
        _tree: &Tree,
        node: &MethodInvocation,
        _prec: i32,
    ) -> io::Result<()> {
        if node.typeargs.is_empty() {
            self.expr(&node.meth, prec::NO_PREC)?;
        } else if let TreeKind::FieldAccess(select) = &node.meth.kind {
            self.expr(&select.selected, prec::POSTFIX)?;
            self.print(".<")?;
            self.exprs(&node.typeargs, ", ")?;
            self.print(">")?;
            self.print(&select.name)?;
        } else {
            self.print("<")?;
            self.exprs(&node.typeargs, ", ")?;
            self.print(">")?;
            self.expr(&node.meth, prec::NO_PREC)?;
        }
        self.print("(")?;
        self.exprs(&node.args, ", ")?;
        self.print(")")
    }

    fn visit_new_class(&mut self, _tree: &Tree, node: &NewClass, _prec: i32) -> io::Result<()> {
        if let Some(encl) = &node.encl {
            self.expr(encl, prec::POSTFIX)?;
            self.print(".")?;
        }
        self.print("new ")?;
        if !node.typeargs.is_empty() {
            self.print("<")?;
            self.exprs(&node.typeargs, ", ")?;
            self.print(">")?;
        }
        let body = match node.def.as_deref().map(|def| &def.kind) {
            Some(TreeKind::ClassDecl(body)) => Some(body),
            _ => None,
        };
        if let Some(body) = body {
            let (annotations, _) = modifiers_of(&body.mods);
            self.type_annotations(annotations)?;
        }
        self.expr(&node.clazz, prec::NO_PREC)?;
        self.print("(")?;
        self.exprs(&node.args, ", ")?;
        self.print(")")?;
        if let Some(body) = body {
            self.print(" ")?;
            if body.flags() & flags::ENUM != 0 {
                self.print("/*enum*/")?;
            }
            let prev = self.encl_class_name.take();
            if !body.name.is_empty() {
                self.encl_class_name = Some(body.name.clone());
            }
            self.class_body(&body.defs)?;
            self.encl_class_name = prev;
        }
        Ok(())
    }

    fn visit_new_array(&mut self, _tree: &Tree, node: &NewArray, _prec: i32) -> io::Result<()> {
        if let Some(elemtype) = &node.elemtype {
            self.print("new ")?;
            self.base_element_type(elemtype)?;
            if !node.annotations.is_empty() {
                self.print(" ")?;
                self.type_annotations(&node.annotations)?;
            }
            if node.elems.is_some() {
                self.print("[]")?;
            }
            for (i, dim) in node.dims.iter().enumerate() {
                if let Some(annotations) = node.dim_annotations.get(i).filter(|a| !a.is_empty()) {
                    self.print(" ")?;
                    self.type_annotations(annotations)?;
                }
                self.print("[")?;
                self.expr(dim, prec::NO_PREC)?;
                self.print("]")?;
            }
            self.brackets(elemtype)?;
        }
        if let Some(elems) = &node.elems {
            self.print("{")?;
            self.exprs(elems, ", ")?;
            self.print("}")?;
        }
        Ok(())
    }

    fn visit_lambda(&mut self, _tree: &Tree, node: &Lambda, _prec: i32) -> io::Result<()> {
        self.print("(")?;
        match node.param_kind {
            ParameterKind::Explicit => self.exprs(&node.params, ", ")?,
            ParameterKind::Implicit => {
                for (i, param) in node.params.iter().enumerate() {
                    if i > 0 {
                        self.print(", ")?;
                    }
                    match &param.kind {
                        TreeKind::VariableDecl(var) => self.print(&var.name)?,
                        _ => self.expr(param, prec::NO_PREC)?,
                    }
                }
            }
        }
        self.print(") -> ")?;
        if matches!(node.body.kind, TreeKind::Block(_)) {
            self.stat(&node.body)
        } else {
            self.expr(&node.body, prec::NO_PREC)
        }
    }

    fn visit_parens(&mut self, _tree: &Tree, node: &Parens, _prec: i32) -> io::Result<()> {
        self.print("(")?;
        self.expr(&node.expr, prec::NO_PREC)?;
        self.print(")")
    }

    fn visit_assign(&mut self, _tree: &Tree, node: &Assign, prec: i32) -> io::Result<()> {
        self.open(prec, prec::ASSIGN)?;
        self.expr(&node.lhs, prec::ASSIGN + 1)?;
        self.print(" = ")?;
        self.expr(&node.rhs, prec::ASSIGN)?;
        self.close(prec, prec::ASSIGN)
    }

    fn visit_assign_op(&mut self, _tree: &Tree, node: &AssignOp, prec: i32) -> io::Result<()> {
        self.open(prec, prec::ASSIGNOP)?;
        self.expr(&node.lhs, prec::ASSIGNOP + 1)?;
        self.print(" ")?;
        self.print(node.opcode.operator_name().unwrap_or("?="))?;
        self.print(" ")?;
        self.expr(&node.rhs, prec::ASSIGNOP)?;
        self.close(prec, prec::ASSIGNOP)
    }

    fn visit_unary(&mut self, _tree: &Tree, node: &Unary, prec: i32) -> io::Result<()> {
        let own = op_prec(node.opcode);
        let name = node.opcode.operator_name().unwrap_or("?");
        self.open(prec, own)?;
        if node.opcode.is_post_unary_op() {
            self.expr(&node.arg, own)?;
            self.print(name)?;
        } else {
            self.print(name)?;
            if prefix_needs_space(node.opcode, &node.arg) {
                self.print(" ")?;
            }
            self.expr(&node.arg, own)?;
        }
        self.close(prec, own)
    }

    fn visit_binary(&mut self, _tree: &Tree, node: &Binary, prec: i32) -> io::Result<()> {
        let own = op_prec(node.opcode);
        self.open(prec, own)?;
        self.expr(&node.lhs, own)?;
        self.print(" ")?;
        self.print(node.opcode.operator_name().unwrap_or("?"))?;
        self.print(" ")?;
        self.expr(&node.rhs, own + 1)?;
        self.close(prec, own)
    }

    fn visit_type_cast(&mut self, _tree: &Tree, node: &TypeCast, prec: i32) -> io::Result<()> {
        self.open(prec, prec::PREFIX)?;
        self.print("(")?;
        self.expr(&node.clazz, prec::NO_PREC)?;
        self.print(")")?;
        self.expr(&node.expr, prec::PREFIX)?;
        self.close(prec, prec::PREFIX)
    }

    fn visit_instance_of(&mut self, _tree: &Tree, node: &InstanceOf, prec: i32) -> io::Result<()> {
        self.open(prec, prec::ORD)?;
        self.expr(&node.expr, prec::ORD)?;
        self.print(" instanceof ")?;
        let is_pattern = matches!(
            node.pattern.kind,
            TreeKind::BindingPattern(_) | TreeKind::ParenthesizedPattern(_) | TreeKind::GuardPattern(_)
        );
        if is_pattern {
            self.expr(&node.pattern, prec::NO_PREC)?;
        } else {
            self.expr(&node.pattern, prec::ORD + 1)?;
        }
        self.close(prec, prec::ORD)
    }

    fn visit_binding_pattern(&mut self, _tree: &Tree, node: &BindingPattern, _prec: i32) -> io::Result<()> {
        self.expr(&node.var, prec::NO_PREC)
    }

    fn visit_default_case_label(
        &mut self,
        _tree: &Tree,
        _node: &DefaultCaseLabel,
        _prec: i32,
    ) -> io::Result<()> {
        self.print("default")
    }

    fn visit_parenthesized_pattern(
        &mut self,
        _tree: &Tree,
        node: &ParenthesizedPattern,
        _prec: i32,
    ) -> io::Result<()> {
        self.print("(")?;
        self.expr(&node.pattern, prec::NO_PREC)?;
        self.print(")")
    }

    fn visit_guard_pattern(&mut self, _tree: &Tree, node: &GuardPattern, _prec: i32) -> io::Result<()> {
        self.expr(&node.patt, prec::NO_PREC)?;
        self.print(" && ")?;
        self.expr(&node.expr, prec::NO_PREC)
    }

    fn visit_array_access(&mut self, _tree: &Tree, node: &ArrayAccess, _prec: i32) -> io::Result<()> {
        self.expr(&node.indexed, prec::POSTFIX)?;
        self.print("[")?;
        self.expr(&node.index, prec::NO_PREC)?;
        self.print("]")
    }

    fn visit_field_access(&mut self, _tree: &Tree, node: &FieldAccess, _prec: i32) -> io::Result<()> {
        self.expr(&node.selected, prec::POSTFIX)?;
        self.print(".")?;
        self.print(&node.name)
    }

    fn visit_member_reference(
        &mut self,
        _tree: &Tree,
        node: &MemberReference,
        _prec: i32,
    ) -> io::Result<()> {
        self.expr(&node.expr, prec::NO_PREC)?;
        self.print("::")?;
        if !node.typeargs.is_empty() {
            self.print("<")?;
            self.exprs(&node.typeargs, ", ")?;
            self.print(">")?;
        }
        match node.mode {
            ReferenceMode::Invoke => self.print(&node.name),
            ReferenceMode::New => self.print("new"),
        }
    }

    fn visit_ident(&mut self, _tree: &Tree, node: &Ident, _prec: i32) -> io::Result<()> {
        self.print(&node.name)
    }

    fn visit_literal(&mut self, _tree: &Tree, node: &Literal, _prec: i32) -> io::Result<()> {
        self.print(&literal_text(node))
    }

    fn visit_primitive_type(&mut self, _tree: &Tree, node: &PrimitiveType, _prec: i32) -> io::Result<()> {
        self.print(node.typetag.keyword().unwrap_or("error"))
    }

    fn visit_array_type(&mut self, tree: &Tree, _node: &ArrayType, _prec: i32) -> io::Result<()> {
        self.base_element_type(tree)?;
        self.brackets(tree)
    }

    fn visit_type_apply(&mut self, _tree: &Tree, node: &TypeApply, _prec: i32) -> io::Result<()> {
        self.expr(&node.clazz, prec::NO_PREC)?;
        self.print("<")?;
        self.exprs(&node.arguments, ", ")?;
        self.print(">")
    }

    fn visit_type_union(&mut self, _tree: &Tree, node: &TypeUnion, _prec: i32) -> io::Result<()> {
        self.exprs(&node.alternatives, " | ")
    }

    fn visit_type_intersection(
        &mut self,
        _tree: &Tree,
        node: &TypeIntersection,
        _prec: i32,
    ) -> io::Result<()> {
        self.exprs(&node.bounds, " & ")
    }

    fn visit_type_parameter(&mut self, _tree: &Tree, node: &TypeParameter, _prec: i32) -> io::Result<()> {
        self.type_annotations(&node.annotations)?;
        self.print(&node.name)?;
        if !node.bounds.is_empty() {
            self.print(" extends ")?;
            self.exprs(&node.bounds, " & ")?;
        }
        Ok(())
    }

    fn visit_wildcard(&mut self, _tree: &Tree, node: &Wildcard, _prec: i32) -> io::Result<()> {
        self.expr(&node.kind, prec::NO_PREC)?;
        let unbound = matches!(
            &node.kind.kind,
            TreeKind::TypeBoundKind(bound) if bound.kind == BoundKind::Unbound
        );
        if !unbound {
            self.expr_opt(node.inner.as_deref(), prec::NO_PREC)?;
        }
        Ok(())
    }

    fn visit_type_bound_kind(&mut self, _tree: &Tree, node: &TypeBoundKind, _prec: i32) -> io::Result<()> {
        self.print(match node.kind {
            BoundKind::Extends => "? extends ",
            BoundKind::Super => "? super ",
            BoundKind::Unbound => "?",
        })
    }

    fn visit_annotation(&mut self, _tree: &Tree, node: &Annotation, _prec: i32) -> io::Result<()> {
        self.print("@")?;
        self.expr(&node.annotation_type, prec::NO_PREC)?;
        if !node.args.is_empty() {
            self.print("(")?;
            self.exprs(&node.args, ", ")?;
            self.print(")")?;
        }
        Ok(())
    }

    fn visit_modifiers(&mut self, _tree: &Tree, node: &Modifiers, _prec: i32) -> io::Result<()> {
        self.type_annotations(&node.annotations)?;
        self.flags(node.flags)
    }

    fn visit_annotated_type(&mut self, tree: &Tree, node: &AnnotatedType, _prec: i32) -> io::Result<()> {
        match &node.underlying_type.kind {
            TreeKind::FieldAccess(access) => {
                self.expr(&access.selected, prec::POSTFIX)?;
                self.print(".")?;
                self.type_annotations(&node.annotations)?;
                self.print(&access.name)
            }
            TreeKind::ArrayType(_) => {
                self.base_element_type(tree)?;
                self.brackets(tree)
            }
            _ => {
                self.type_annotations(&node.annotations)?;
                self.expr(&node.underlying_type, prec::NO_PREC)
            }
        }
    }

    fn visit_erroneous(&mut self, _tree: &Tree, _node: &Erroneous, _prec: i32) -> io::Result<()> {
        self.print("(ERROR)")
    }

    fn visit_module_decl(&mut self, tree: &Tree, node: &ModuleDecl, _prec: i32) -> io::Result<()> {
        self.doc_comment(tree)?;
        let (annotations, _) = modifiers_of(&node.mods);
        self.decl_annotations(annotations)?;
        if node.kind == ModuleKind::Open {
            self.print("open ")?;
        }
        self.print("module ")?;
        self.expr(&node.qual_id, prec::NO_PREC)?;
        self.print(" ")?;
        self.block(&node.directives)
    }

    fn visit_exports(&mut self, _tree: &Tree, node: &Exports, _prec: i32) -> io::Result<()> {
        self.print("exports ")?;
        self.expr(&node.qualid, prec::NO_PREC)?;
        if !node.module_names.is_empty() {
            self.print(" to ")?;
            self.exprs(&node.module_names, ", ")?;
        }
        self.print(";")
    }

    fn visit_opens(&mut self, _tree: &Tree, node: &Opens, _prec: i32) -> io::Result<()> {
        self.print("opens ")?;
        self.expr(&node.qualid, prec::NO_PREC)?;
        if !node.module_names.is_empty() {
            self.print(" to ")?;
            self.exprs(&node.module_names, ", ")?;
        }
        self.print(";")
    }

    fn visit_provides(&mut self, _tree: &Tree, node: &Provides, _prec: i32) -> io::Result<()> {
        self.print("provides ")?;
        self.expr(&node.service_name, prec::NO_PREC)?;
        self.print(" with ")?;
        self.exprs(&node.impl_names, ", ")?;
        self.print(";")
    }

    fn visit_requires(&mut self, _tree: &Tree, node: &Requires, _prec: i32) -> io::Result<()> {
        self.print("requires ")?;
        if node.is_static_phase {
            self.print("static ")?;
        }
        if node.is_transitive {
            self.print("transitive ")?;
        }
        self.expr(&node.module_name, prec::NO_PREC)?;
        self.print(";")
    }

    fn visit_uses(&mut self, _tree: &Tree, node: &Uses, _prec: i32) -> io::Result<()> {
        self.print("uses ")?;
        self.expr(&node.qualid, prec::NO_PREC)?;
        self.print(";")
    }

    fn visit_let_expr(&mut self, _tree: &Tree, node: &LetExpr, _prec: i32) -> io::Result<()> {
        self.print("(let ")?;
        self.exprs(&node.defs, ", ")?;
        self.print(" in ")?;
        self.expr(&node.expr, prec::NO_PREC)?;
        self.print(")")
    }
}

impl<W: Write> Pretty<'_, W> {
    /// [`to_simple_string`] with this printer's configured length budget.
    #[must_use]
    pub fn simple_string(&self, tree: &Tree) -> String {
        to_simple_string(tree, self.config.simple_string_length)
    }
}

/// Renders `tree` as an expression with the default configuration.
///
/// # Errors
///
/// Returns [`PrettyError::InvalidUtf8`] if the rendering is not UTF-8.
pub fn pretty_string(tree: &Tree) -> Result<String, PrettyError> {
    let mut printer = Pretty::new(Vec::new(), PrettyConfig::default());
    printer.print_expr(tree)?;
    Ok(String::from_utf8(printer.into_inner())?)
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = pretty_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// A one-line summary of `tree` of at most `max_len` characters, for
/// diagnostics. Longer renderings keep their head and tail around `[...]`.
#[must_use]
pub fn to_simple_string(tree: &Tree, max_len: usize) -> String {
    let rendered = pretty_string(tree).unwrap_or_default();
    let collapsed = collapse_whitespace(&rendered).replace(MISSING, "");
    truncate_middle(&collapsed, max_len)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_middle(text: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return text.to_string();
    }
    if max_len < ELLIPSIS.len() {
        return chars[..max_len].iter().collect();
    }
    let budget = max_len - ELLIPSIS.len();
    let head = budget * 2 / 3;
    let tail = budget - head;
    let mut result: String = chars[..head].iter().collect();
    result.push_str(ELLIPSIS);
    result.extend(&chars[chars.len() - tail..]);
    result
}
