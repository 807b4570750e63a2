//! Read-only traversal.
//!
//! A [`TreeScanner`] visits every structurally owned child of a tree in
//! source order and does nothing else. Implementors override the `visit_*`
//! methods for the shapes they care about and call [`walk_children`] to
//! resume the default descent.
//!
//! ```
//! use javelin_ast::{builder::TreeBuilder, nodes::{Ident, Tree}, scanner::TreeScanner};
//!
//! #[derive(Default)]
//! struct CountIdents(usize);
//!
//! impl TreeScanner for CountIdents {
//!     fn visit_ident(&mut self, _tree: &Tree, _node: &Ident) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut make = TreeBuilder::new();
//! let a = make.name("a");
//! let b = make.name("b");
//! let sum = make.binary(javelin_ast::nodes::Tag::Plus, a, b);
//! let mut counter = CountIdents::default();
//! counter.scan(&sum);
//! assert_eq!(counter.0, 2);
//! ```

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

macro_rules! scanner_trait {
    ($($variant:ident => $visit:ident, $translate:ident;)+) => {
        /// Read-only tree walker. Every `visit_*` method defaults to
        /// [`walk_children`].
        pub trait TreeScanner {
            /// Dispatches on the shape of `tree`.
            fn scan(&mut self, tree: &Tree) {
                match &tree.kind {
                    $(
                        TreeKind::$variant(node) => self.$visit(tree, node),
                    )+
                }
            }

            fn scan_opt(&mut self, tree: Option<&Tree>) {
                if let Some(tree) = tree {
                    self.scan(tree);
                }
            }

            fn scan_list(&mut self, trees: &[Tree]) {
                for tree in trees {
                    self.scan(tree);
                }
            }

            $(
                fn $visit(&mut self, tree: &Tree, _node: &$variant) {
                    walk_children(self, tree);
                }
            )+
        }
    };
}

for_each_tree_kind!(scanner_trait);

/// Scans the structurally owned children of `tree` in source order. Jump
/// targets are not children and are never visited.
pub fn walk_children<S: TreeScanner + ?Sized>(scanner: &mut S, tree: &Tree) {
    match &tree.kind {
        TreeKind::TopLevel(node) => scanner.scan_list(&node.defs),
        TreeKind::PackageDecl(node) => {
            scanner.scan_list(&node.annotations);
            scanner.scan(&node.pid);
        }
        TreeKind::Import(node) => scanner.scan(&node.qualid),
        TreeKind::ClassDecl(node) => {
            scanner.scan(&node.mods);
            scanner.scan_list(&node.typarams);
            scanner.scan_opt(node.extending.as_deref());
            scanner.scan_list(&node.implementing);
            scanner.scan_list(&node.permitting);
            scanner.scan_list(&node.defs);
        }
        TreeKind::MethodDecl(node) => {
            scanner.scan(&node.mods);
            scanner.scan_opt(node.restype.as_deref());
            scanner.scan_list(&node.typarams);
            scanner.scan_opt(node.recvparam.as_deref());
            scanner.scan_list(&node.params);
            scanner.scan_list(&node.thrown);
            scanner.scan_opt(node.default_value.as_deref());
            scanner.scan_opt(node.body.as_deref());
        }
        TreeKind::VariableDecl(node) => {
            scanner.scan(&node.mods);
            scanner.scan_opt(node.nameexpr.as_deref());
            scanner.scan_opt(node.vartype.as_deref());
            scanner.scan_opt(node.init.as_deref());
        }
        TreeKind::Block(node) => scanner.scan_list(&node.stats),
        TreeKind::DoWhileLoop(node) => {
            scanner.scan(&node.body);
            scanner.scan(&node.cond);
        }
        TreeKind::WhileLoop(node) => {
            scanner.scan(&node.cond);
            scanner.scan(&node.body);
        }
        TreeKind::ForLoop(node) => {
            scanner.scan_list(&node.init);
            scanner.scan_opt(node.cond.as_deref());
            scanner.scan_list(&node.step);
            scanner.scan(&node.body);
        }
        TreeKind::EnhancedForLoop(node) => {
            scanner.scan(&node.var);
            scanner.scan(&node.expr);
            scanner.scan(&node.body);
        }
        TreeKind::LabeledStatement(node) => scanner.scan(&node.body),
        TreeKind::Switch(node) => {
            scanner.scan(&node.selector);
            scanner.scan_list(&node.cases);
        }
        TreeKind::Case(node) => {
            scanner.scan_list(&node.labels);
            scanner.scan_list(&node.stats);
        }
        TreeKind::SwitchExpression(node) => {
            scanner.scan(&node.selector);
            scanner.scan_list(&node.cases);
        }
        TreeKind::Synchronized(node) => {
            scanner.scan(&node.lock);
            scanner.scan(&node.body);
        }
        TreeKind::Try(node) => {
            scanner.scan_list(&node.resources);
            scanner.scan(&node.body);
            scanner.scan_list(&node.catchers);
            scanner.scan_opt(node.finalizer.as_deref());
        }
        TreeKind::Catch(node) => {
            scanner.scan(&node.param);
            scanner.scan(&node.body);
        }
        TreeKind::Conditional(node) => {
            scanner.scan(&node.cond);
            scanner.scan(&node.truepart);
            scanner.scan(&node.falsepart);
        }
        TreeKind::If(node) => {
            scanner.scan(&node.cond);
            scanner.scan(&node.thenpart);
            scanner.scan_opt(node.elsepart.as_deref());
        }
        TreeKind::ExpressionStatement(node) => scanner.scan(&node.expr),
        TreeKind::Yield(node) => scanner.scan(&node.value),
        TreeKind::Return(node) => scanner.scan_opt(node.expr.as_deref()),
        TreeKind::Throw(node) => scanner.scan(&node.expr),
        TreeKind::Assert(node) => {
            scanner.scan(&node.cond);
            scanner.scan_opt(node.detail.as_deref());
        }
        TreeKind::MethodInvocation(node) => {
            scanner.scan_list(&node.typeargs);
            scanner.scan(&node.meth);
            scanner.scan_list(&node.args);
        }
        TreeKind::NewClass(node) => {
            scanner.scan_opt(node.encl.as_deref());
            scanner.scan_list(&node.typeargs);
            scanner.scan(&node.clazz);
            scanner.scan_list(&node.args);
            scanner.scan_opt(node.def.as_deref());
        }
        TreeKind::NewArray(node) => {
            scanner.scan_list(&node.annotations);
            scanner.scan_opt(node.elemtype.as_deref());
            scanner.scan_list(&node.dims);
            for annotations in &node.dim_annotations {
                scanner.scan_list(annotations);
            }
            if let Some(elems) = &node.elems {
                scanner.scan_list(elems);
            }
        }
        TreeKind::Lambda(node) => {
            scanner.scan_list(&node.params);
            scanner.scan(&node.body);
        }
        TreeKind::Parens(node) => scanner.scan(&node.expr),
        TreeKind::Assign(node) => {
            scanner.scan(&node.lhs);
            scanner.scan(&node.rhs);
        }
        TreeKind::AssignOp(node) => {
            scanner.scan(&node.lhs);
            scanner.scan(&node.rhs);
        }
        TreeKind::Unary(node) => scanner.scan(&node.arg),
        TreeKind::Binary(node) => {
            scanner.scan(&node.lhs);
            scanner.scan(&node.rhs);
        }
        TreeKind::TypeCast(node) => {
            scanner.scan(&node.clazz);
            scanner.scan(&node.expr);
        }
        TreeKind::InstanceOf(node) => {
            scanner.scan(&node.expr);
            scanner.scan(&node.pattern);
        }
        TreeKind::BindingPattern(node) => scanner.scan(&node.var),
        TreeKind::ParenthesizedPattern(node) => scanner.scan(&node.pattern),
        TreeKind::GuardPattern(node) => {
            scanner.scan(&node.patt);
            scanner.scan(&node.expr);
        }
        TreeKind::ArrayAccess(node) => {
            scanner.scan(&node.indexed);
            scanner.scan(&node.index);
        }
        TreeKind::FieldAccess(node) => scanner.scan(&node.selected),
        TreeKind::MemberReference(node) => {
            scanner.scan(&node.expr);
            scanner.scan_list(&node.typeargs);
        }
        TreeKind::ArrayType(node) => scanner.scan(&node.elemtype),
        TreeKind::TypeApply(node) => {
            scanner.scan(&node.clazz);
            scanner.scan_list(&node.arguments);
        }
        TreeKind::TypeUnion(node) => scanner.scan_list(&node.alternatives),
        TreeKind::TypeIntersection(node) => scanner.scan_list(&node.bounds),
        TreeKind::TypeParameter(node) => {
            scanner.scan_list(&node.annotations);
            scanner.scan_list(&node.bounds);
        }
        TreeKind::Wildcard(node) => {
            scanner.scan(&node.kind);
            scanner.scan_opt(node.inner.as_deref());
        }
        TreeKind::Annotation(node) => {
            scanner.scan(&node.annotation_type);
            scanner.scan_list(&node.args);
        }
        TreeKind::Modifiers(node) => scanner.scan_list(&node.annotations),
        TreeKind::AnnotatedType(node) => {
            scanner.scan_list(&node.annotations);
            scanner.scan(&node.underlying_type);
        }
        TreeKind::ModuleDecl(node) => {
            scanner.scan(&node.mods);
            scanner.scan(&node.qual_id);
            scanner.scan_list(&node.directives);
        }
        TreeKind::Exports(node) => {
            scanner.scan(&node.qualid);
            scanner.scan_list(&node.module_names);
        }
        TreeKind::Opens(node) => {
            scanner.scan(&node.qualid);
            scanner.scan_list(&node.module_names);
        }
        TreeKind::Provides(node) => {
            scanner.scan(&node.service_name);
            scanner.scan_list(&node.impl_names);
        }
        TreeKind::Requires(node) => scanner.scan(&node.module_name),
        TreeKind::Uses(node) => scanner.scan(&node.qualid),
        TreeKind::LetExpr(node) => {
            scanner.scan_list(&node.defs);
            scanner.scan(&node.expr);
        }
        TreeKind::Skip(_)
        | TreeKind::Break(_)
        | TreeKind::Continue(_)
        | TreeKind::DefaultCaseLabel(_)
        | TreeKind::Ident(_)
        | TreeKind::Literal(_)
        | TreeKind::PrimitiveType(_)
        | TreeKind::TypeBoundKind(_)
        | TreeKind::Erroneous(_) => {}
    }
}
