//! Structural queries over trees and the operator precedence table.

use crate::{
    enums_impl::{TypeTag, flags},
    names::{self, Name},
    nodes::{Tag, Tree, TreeKind},
    position::Pos,
    semantic::SymbolHandle,
};

/// Operator precedence levels, lowest binding first.
///
/// The printer threads one of these through every expression; an operand is
/// parenthesized when its own level is below the level of its context.
pub mod prec {
    /// Statement context: the expression is followed by `;`.
    pub const NOT_EXPRESSION: i32 = -1;
    pub const NO_PREC: i32 = 0;
    pub const ASSIGN: i32 = 1;
    pub const ASSIGNOP: i32 = 2;
    pub const COND: i32 = 3;
    pub const OR: i32 = 4;
    pub const AND: i32 = 5;
    pub const BITOR: i32 = 6;
    pub const BITXOR: i32 = 7;
    pub const BITAND: i32 = 8;
    pub const EQ: i32 = 9;
    pub const ORD: i32 = 10;
    pub const SHIFT: i32 = 11;
    pub const ADD: i32 = 12;
    pub const MUL: i32 = 13;
    pub const PREFIX: i32 = 14;
    pub const POSTFIX: i32 = 15;
}

/// Precedence level of an operator tag.
///
/// # Panics
///
/// Panics for tags that are not operators, `Assign` or `TypeTest`.
#[must_use]
pub fn op_prec(tag: Tag) -> i32 {
    match tag {
        Tag::Pos | Tag::Neg | Tag::Not | Tag::Compl | Tag::PreInc | Tag::PreDec => prec::PREFIX,
        Tag::PostInc | Tag::PostDec | Tag::NullChk => prec::POSTFIX,
        Tag::Assign => prec::ASSIGN,
        Tag::BitOrAsg
        | Tag::BitXorAsg
        | Tag::BitAndAsg
        | Tag::SlAsg
        | Tag::SrAsg
        | Tag::UsrAsg
        | Tag::PlusAsg
        | Tag::MinusAsg
        | Tag::MulAsg
        | Tag::DivAsg
        | Tag::ModAsg => prec::ASSIGNOP,
        Tag::Or => prec::OR,
        Tag::And => prec::AND,
        Tag::Eq | Tag::Ne => prec::EQ,
        Tag::Lt | Tag::Gt | Tag::Le | Tag::Ge | Tag::TypeTest => prec::ORD,
        Tag::BitOr => prec::BITOR,
        Tag::BitXor => prec::BITXOR,
        Tag::BitAnd => prec::BITAND,
        Tag::Sl | Tag::Sr | Tag::Usr => prec::SHIFT,
        Tag::Plus | Tag::Minus => prec::ADD,
        Tag::Mul | Tag::Div | Tag::Mod => prec::MUL,
        other => panic!("no operator precedence for {other:?}"),
    }
}

/// Strips any number of enclosing parentheses.
#[must_use]
pub fn skip_parens(mut tree: &Tree) -> &Tree {
    while let TreeKind::Parens(parens) = &tree.kind {
        tree = &parens.expr;
    }
    tree
}

/// The simple name a tree refers to: identifiers, selections and the class
/// part of a parameterized type.
#[must_use]
pub fn name(tree: &Tree) -> Option<&Name> {
    match &tree.kind {
        TreeKind::Ident(ident) => Some(&ident.name),
        TreeKind::FieldAccess(select) => Some(&select.name),
        TreeKind::TypeApply(apply) => name(&apply.clazz),
        _ => None,
    }
}

/// The dotted name of an identifier or selection chain, `None` if any part
/// of the chain is not a name.
#[must_use]
pub fn full_name(tree: &Tree) -> Option<String> {
    match &tree.kind {
        TreeKind::Ident(ident) => Some(ident.name.to_string()),
        TreeKind::FieldAccess(select) => {
            let mut qualifier = full_name(&select.selected)?;
            qualifier.push('.');
            qualifier.push_str(&select.name);
            Some(qualifier)
        }
        _ => None,
    }
}

/// The symbol a name-like tree resolved to.
#[must_use]
pub fn symbol(tree: &Tree) -> Option<&SymbolHandle> {
    match &skip_parens(tree).kind {
        TreeKind::Ident(ident) => ident.sym.as_ref(),
        TreeKind::FieldAccess(select) => select.sym.as_ref(),
        TreeKind::MemberReference(reference) => reference.sym.as_ref(),
        TreeKind::TypeApply(apply) => symbol(&apply.clazz),
        TreeKind::AnnotatedType(annotated) => symbol(&annotated.underlying_type),
        _ => None,
    }
}

/// The symbol a declaration tree declares.
#[must_use]
pub fn symbol_for(tree: &Tree) -> Option<&SymbolHandle> {
    match &tree.kind {
        TreeKind::ClassDecl(decl) => decl.sym.as_ref(),
        TreeKind::MethodDecl(decl) => decl.sym.as_ref(),
        TreeKind::VariableDecl(decl) => decl.sym.as_ref(),
        TreeKind::PackageDecl(decl) => decl.sym.as_ref(),
        TreeKind::ModuleDecl(decl) => decl.sym.as_ref(),
        _ => None,
    }
}

#[must_use]
pub fn is_constructor(tree: &Tree) -> bool {
    match &tree.kind {
        TreeKind::MethodDecl(method) => method.name.as_str() == names::INIT,
        _ => false,
    }
}

/// `true` for the expressions that may stand alone as a statement.
#[must_use]
pub fn is_expression_statement(tree: &Tree) -> bool {
    match tree.tag() {
        Tag::PreInc
        | Tag::PreDec
        | Tag::PostInc
        | Tag::PostDec
        | Tag::Assign
        | Tag::Apply
        | Tag::NewClass
        | Tag::Erroneous => true,
        tag => tag.is_assignop(),
    }
}

#[must_use]
pub fn is_enum_constant(tree: &Tree) -> bool {
    match &tree.kind {
        TreeKind::VariableDecl(var) => var.flags() & flags::ENUM != 0,
        _ => false,
    }
}

/// The element type under any array, wildcard and annotated-type wrappers.
/// Unless `skip_annotations` is set, an annotated type directly wrapping the
/// element type is returned instead of the bare element type.
#[must_use]
pub fn innermost_type(tree: &Tree, skip_annotations: bool) -> &Tree {
    let mut last_annotated = None;
    let mut current = tree;
    loop {
        match &current.kind {
            TreeKind::ArrayType(array) => {
                last_annotated = None;
                current = &array.elemtype;
            }
            TreeKind::Wildcard(wildcard) => match &wildcard.inner {
                Some(inner) => {
                    last_annotated = None;
                    current = inner;
                }
                None => break,
            },
            TreeKind::AnnotatedType(annotated) => {
                last_annotated = Some(current);
                current = &annotated.underlying_type;
            }
            _ => break,
        }
    }
    match last_annotated {
        Some(annotated) if !skip_annotations => annotated,
        _ => current,
    }
}

/// Anchor of the first statement of a block, or of the tree itself.
#[must_use]
pub fn first_stat_pos(tree: &Tree) -> Pos {
    match &tree.kind {
        TreeKind::Block(block) => block.stats.first().map_or(tree.pos, |first| first.pos),
        _ => tree.pos,
    }
}

/// `true` for the `null` literal.
#[must_use]
pub fn is_null(tree: &Tree) -> bool {
    match &tree.kind {
        TreeKind::Literal(literal) => literal.typetag == TypeTag::Bot,
        _ => false,
    }
}

/// `true` for `this(...)` and `super(...)` constructor calls.
#[must_use]
pub fn is_self_or_super_call(tree: &Tree) -> bool {
    let TreeKind::ExpressionStatement(exec) = &tree.kind else {
        return false;
    };
    let TreeKind::MethodInvocation(apply) = &exec.expr.kind else {
        return false;
    };
    matches!(name(&apply.meth), Some(callee) if matches!(callee.as_str(), "this" | "super"))
}
