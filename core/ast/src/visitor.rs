//! The double-dispatch contract shared by every tree walker.
//!
//! [`Tree::accept`] matches on the tree's shape once and calls the matching
//! `visit_*` method of a [`Visitor`]. Every method defaults to
//! [`Visitor::visit_tree`], which panics: a visitor that is handed a shape it
//! does not handle is a compiler bug, not a user error.
//!
//! The parameter `P` is threaded through unchanged, so a visitor can carry a
//! per-call argument (the copier passes its caller's parameter, the printer
//! passes the precedence context).

use crate::nodes::{
    Annotation, AnnotatedType, ArrayAccess, ArrayType, Assert, Assign, AssignOp, Binary,
    BindingPattern, Block, Break, Case, Catch, ClassDecl, Conditional, Continue,
    DefaultCaseLabel, DoWhileLoop, EnhancedForLoop, Erroneous, Exports, ExpressionStatement,
    FieldAccess, ForLoop, GuardPattern, Ident, If, Import, InstanceOf, LabeledStatement, Lambda,
    LetExpr, Literal, MemberReference, MethodDecl, MethodInvocation, Modifiers, ModuleDecl,
    NewArray, NewClass, Opens, PackageDecl, Parens, ParenthesizedPattern, PrimitiveType,
    Provides, Requires, Return, Skip, Switch, SwitchExpression, Synchronized, Throw, TopLevel,
    Tree, TreeKind, Try, TypeApply, TypeBoundKind, TypeCast, TypeIntersection, TypeParameter,
    TypeUnion, Unary, Uses, VariableDecl, WhileLoop, Wildcard, Yield,
};

macro_rules! visitor_trait {
    ($($variant:ident => $visit:ident, $translate:ident;)+) => {
        /// A walker with one entry point per tree shape.
        pub trait Visitor<P> {
            type Output;

            /// Fallback for every shape the visitor does not override.
            ///
            /// # Panics
            ///
            /// Always; reaching it means the visitor is missing a case.
            fn visit_tree(&mut self, tree: &Tree, _p: P) -> Self::Output {
                panic!(
                    "{} reached a visitor with no case for it (node {})",
                    tree.kind.kind_name(),
                    tree.id
                )
            }

            $(
                fn $visit(&mut self, tree: &Tree, _node: &$variant, p: P) -> Self::Output {
                    self.visit_tree(tree, p)
                }
            )+
        }

        impl Tree {
            /// Calls the `visit_*` method of `visitor` matching this tree's shape.
            pub fn accept<V, P>(&self, visitor: &mut V, p: P) -> V::Output
            where
                V: Visitor<P> + ?Sized,
            {
                match &self.kind {
                    $(
                        TreeKind::$variant(node) => visitor.$visit(self, node, p),
                    )+
                }
            }
        }
    };
}

for_each_tree_kind!(visitor_trait);
