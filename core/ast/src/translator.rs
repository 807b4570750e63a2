//! In-place rewriting traversal.
//!
//! A [`TreeTranslator`] takes each tree by value and returns its
//! replacement. The default for every shape translates the children in
//! place and hands back the same node, so an identity translation neither
//! reallocates nor renumbers anything. Child slots keep their `Box`
//! allocations and lists keep their `Vec`s; only the slot contents change.

use tracing::debug;

use crate::nodes::{Tree, TreeKind};

macro_rules! translator_trait {
    ($($variant:ident => $visit:ident, $translate:ident;)+) => {
        /// Rewriting tree walker. Every `translate_*` method defaults to
        /// [`walk_children`].
        pub trait TreeTranslator {
            /// Dispatches on the shape of `tree` and returns its replacement.
            fn translate(&mut self, tree: Tree) -> Tree {
                match tree.kind {
                    $(
                        TreeKind::$variant(_) => self.$translate(tree),
                    )+
                }
            }

            /// Translates the tree in `slot`, reusing the allocation.
            fn translate_box(&mut self, slot: &mut Box<Tree>) {
                let before = slot.id;
                let tree = Tree::take(slot);
                **slot = self.translate(tree);
                if slot.id != before {
                    debug!(old = %before, new = %slot.id, kind = slot.kind.kind_name(), "replace subtree");
                }
            }

            fn translate_opt(&mut self, slot: &mut Option<Box<Tree>>) {
                if let Some(tree) = slot {
                    self.translate_box(tree);
                }
            }

            /// Translates every element of `trees` in place.
            fn translate_list(&mut self, trees: &mut [Tree]) {
                for slot in trees.iter_mut() {
                    let before = slot.id;
                    let tree = Tree::take(slot);
                    *slot = self.translate(tree);
                    if slot.id != before {
                        debug!(old = %before, new = %slot.id, kind = slot.kind.kind_name(), "replace list element");
                    }
                }
            }

            $(
                fn $translate(&mut self, tree: Tree) -> Tree {
                    walk_children(self, tree)
                }
            )+
        }
    };
}

for_each_tree_kind!(translator_trait);

/// Translates the structurally owned children of `tree` in place, in source
/// order, and returns `tree` itself.
#[allow(clippy::too_many_lines)]
pub fn walk_children<T: TreeTranslator + ?Sized>(translator: &mut T, mut tree: Tree) -> Tree {
    match &mut tree.kind {
        TreeKind::TopLevel(node) => translator.translate_list(&mut node.defs),
        TreeKind::PackageDecl(node) => {
            translator.translate_list(&mut node.annotations);
            translator.translate_box(&mut node.pid);
        }
        TreeKind::Import(node) => translator.translate_box(&mut node.qualid),
        TreeKind::ClassDecl(node) => {
            translator.translate_box(&mut node.mods);
            translator.translate_list(&mut node.typarams);
            translator.translate_opt(&mut node.extending);
            translator.translate_list(&mut node.implementing);
            translator.translate_list(&mut node.permitting);
            translator.translate_list(&mut node.defs);
        }
        TreeKind::MethodDecl(node) => {
            translator.translate_box(&mut node.mods);
            translator.translate_opt(&mut node.restype);
            translator.translate_list(&mut node.typarams);
            translator.translate_opt(&mut node.recvparam);
            translator.translate_list(&mut node.params);
            translator.translate_list(&mut node.thrown);
            translator.translate_opt(&mut node.default_value);
            translator.translate_opt(&mut node.body);
        }
        TreeKind::VariableDecl(node) => {
            translator.translate_box(&mut node.mods);
            translator.translate_opt(&mut node.nameexpr);
            translator.translate_opt(&mut node.vartype);
            translator.translate_opt(&mut node.init);
        }
        TreeKind::Block(node) => translator.translate_list(&mut node.stats),
        TreeKind::DoWhileLoop(node) => {
            translator.translate_box(&mut node.body);
            translator.translate_box(&mut node.cond);
        }
        TreeKind::WhileLoop(node) => {
            translator.translate_box(&mut node.cond);
            translator.translate_box(&mut node.body);
        }
        TreeKind::ForLoop(node) => {
            translator.translate_list(&mut node.init);
            translator.translate_opt(&mut node.cond);
            translator.translate_list(&mut node.step);
            translator.translate_box(&mut node.body);
        }
        TreeKind::EnhancedForLoop(node) => {
            translator.translate_box(&mut node.var);
            translator.translate_box(&mut node.expr);
            translator.translate_box(&mut node.body);
        }
        TreeKind::LabeledStatement(node) => translator.translate_box(&mut node.body),
        TreeKind::Switch(node) => {
            translator.translate_box(&mut node.selector);
            translator.translate_list(&mut node.cases);
        }
        TreeKind::Case(node) => {
            translator.translate_list(&mut node.labels);
            translator.translate_list(&mut node.stats);
        }
        TreeKind::SwitchExpression(node) => {
            translator.translate_box(&mut node.selector);
            translator.translate_list(&mut node.cases);
        }
        TreeKind::Synchronized(node) => {
            translator.translate_box(&mut node.lock);
            translator.translate_box(&mut node.body);
        }
        TreeKind::Try(node) => {
            translator.translate_list(&mut node.resources);
            translator.translate_box(&mut node.body);
            translator.translate_list(&mut node.catchers);
            translator.translate_opt(&mut node.finalizer);
        }
        TreeKind::Catch(node) => {
            translator.translate_box(&mut node.param);
            translator.translate_box(&mut node.body);
        }
        TreeKind::Conditional(node) => {
            translator.translate_box(&mut node.cond);
            translator.translate_box(&mut node.truepart);
            translator.translate_box(&mut node.falsepart);
        }
        TreeKind::If(node) => {
            translator.translate_box(&mut node.cond);
            translator.translate_box(&mut node.thenpart);
            translator.translate_opt(&mut node.elsepart);
        }
        TreeKind::ExpressionStatement(node) => translator.translate_box(&mut node.expr),
        TreeKind::Yield(node) => translator.translate_box(&mut node.value),
        TreeKind::Return(node) => translator.translate_opt(&mut node.expr),
        TreeKind::Throw(node) => translator.translate_box(&mut node.expr),
        TreeKind::Assert(node) => {
            translator.translate_box(&mut node.cond);
            translator.translate_opt(&mut node.detail);
        }
        TreeKind::MethodInvocation(node) => {
            translator.translate_list(&mut node.typeargs);
            translator.translate_box(&mut node.meth);
            translator.translate_list(&mut node.args);
        }
        TreeKind::NewClass(node) => {
            translator.translate_opt(&mut node.encl);
            translator.translate_list(&mut node.typeargs);
            translator.translate_box(&mut node.clazz);
            translator.translate_list(&mut node.args);
            translator.translate_opt(&mut node.def);
        }
        TreeKind::NewArray(node) => {
            translator.translate_list(&mut node.annotations);
            translator.translate_opt(&mut node.elemtype);
            translator.translate_list(&mut node.dims);
            for annotations in &mut node.dim_annotations {
                translator.translate_list(annotations);
            }
            if let Some(elems) = &mut node.elems {
                translator.translate_list(elems);
            }
        }
        TreeKind::Lambda(node) => {
            translator.translate_list(&mut node.params);
            translator.translate_box(&mut node.body);
        }
        TreeKind::Parens(node) => translator.translate_box(&mut node.expr),
        TreeKind::Assign(node) => {
            translator.translate_box(&mut node.lhs);
            translator.translate_box(&mut node.rhs);
        }
        TreeKind::AssignOp(node) => {
            translator.translate_box(&mut node.lhs);
            translator.translate_box(&mut node.rhs);
        }
        TreeKind::Unary(node) => translator.translate_box(&mut node.arg),
        TreeKind::Binary(node) => {
            translator.translate_box(&mut node.lhs);
            translator.translate_box(&mut node.rhs);
        }
        TreeKind::TypeCast(node) => {
            translator.translate_box(&mut node.clazz);
            translator.translate_box(&mut node.expr);
        }
        TreeKind::InstanceOf(node) => {
            translator.translate_box(&mut node.expr);
            translator.translate_box(&mut node.pattern);
        }
        TreeKind::BindingPattern(node) => translator.translate_box(&mut node.var),
        TreeKind::ParenthesizedPattern(node) => translator.translate_box(&mut node.pattern),
        TreeKind::GuardPattern(node) => {
            translator.translate_box(&mut node.patt);
            translator.translate_box(&mut node.expr);
        }
        TreeKind::ArrayAccess(node) => {
            translator.translate_box(&mut node.indexed);
            translator.translate_box(&mut node.index);
        }
        TreeKind::FieldAccess(node) => translator.translate_box(&mut node.selected),
        TreeKind::MemberReference(node) => {
            translator.translate_box(&mut node.expr);
            translator.translate_list(&mut node.typeargs);
        }
        TreeKind::ArrayType(node) => translator.translate_box(&mut node.elemtype),
        TreeKind::TypeApply(node) => {
            translator.translate_box(&mut node.clazz);
            translator.translate_list(&mut node.arguments);
        }
        TreeKind::TypeUnion(node) => translator.translate_list(&mut node.alternatives),
        TreeKind::TypeIntersection(node) => translator.translate_list(&mut node.bounds),
        TreeKind::TypeParameter(node) => {
            translator.translate_list(&mut node.annotations);
            translator.translate_list(&mut node.bounds);
        }
        TreeKind::Wildcard(node) => {
            translator.translate_box(&mut node.kind);
            translator.translate_opt(&mut node.inner);
        }
        TreeKind::Annotation(node) => {
            translator.translate_box(&mut node.annotation_type);
            translator.translate_list(&mut node.args);
        }
        TreeKind::Modifiers(node) => translator.translate_list(&mut node.annotations),
        TreeKind::AnnotatedType(node) => {
            translator.translate_list(&mut node.annotations);
            translator.translate_box(&mut node.underlying_type);
        }
        TreeKind::ModuleDecl(node) => {
            translator.translate_box(&mut node.mods);
            translator.translate_box(&mut node.qual_id);
            translator.translate_list(&mut node.directives);
        }
        TreeKind::Exports(node) => {
            translator.translate_box(&mut node.qualid);
            translator.translate_list(&mut node.module_names);
        }
        TreeKind::Opens(node) => {
            translator.translate_box(&mut node.qualid);
            translator.translate_list(&mut node.module_names);
        }
        TreeKind::Provides(node) => {
            translator.translate_box(&mut node.service_name);
            translator.translate_list(&mut node.impl_names);
        }
        TreeKind::Requires(node) => translator.translate_box(&mut node.module_name),
        TreeKind::Uses(node) => translator.translate_box(&mut node.qualid),
        TreeKind::LetExpr(node) => {
            translator.translate_list(&mut node.defs);
            translator.translate_box(&mut node.expr);
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
    tree
}
