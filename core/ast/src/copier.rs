//! Parametrized deep copy.
//!
//! A [`TreeCopier`] rebuilds a tree through a [`TreeBuilder`], moving the
//! builder's cursor to each source node's anchor first, so the copy has the
//! same shape and positions but fresh node ids. Names, literal values and
//! resolved symbols are shared with the original. The `ty` slot is left
//! empty: copies are made from syntactic templates that are attributed again
//! after instantiation.
//!
//! The caller's parameter `P` is passed unchanged to every recursive call.
//! Every `visit_*` method defaults to [`copy_children`], which copies each
//! child through [`TreeCopier::copy`], so an overridden method is consulted
//! at every depth. [`DeepCopier`] overrides nothing and ignores `P`.

use crate::{
    builder::TreeBuilder,
    nodes::{
        Annotation, AnnotatedType, ArrayAccess, ArrayType, Assert, Assign, AssignOp, Binary,
        BindingPattern, Block, Break, Case, Catch, ClassDecl, Conditional, Continue,
        DefaultCaseLabel, DoWhileLoop, EnhancedForLoop, Erroneous, Exports, ExpressionStatement,
        FieldAccess, ForLoop, GuardPattern, Ident, If, Import, InstanceOf, LabeledStatement,
        Lambda, LetExpr, Literal, MemberReference, MethodDecl, MethodInvocation, Modifiers,
        ModuleDecl, NewArray, NewClass, Opens, PackageDecl, Parens, ParenthesizedPattern,
        PrimitiveType, Provides, Requires, Return, Skip, Switch, SwitchExpression, Synchronized,
        Throw, TopLevel, Tree, TreeKind, Try, TypeApply, TypeBoundKind, TypeCast,
        TypeIntersection, TypeParameter, TypeUnion, Unary, Uses, VariableDecl, WhileLoop,
        Wildcard, Yield,
    },
};

macro_rules! copier_trait {
    ($($variant:ident => $visit:ident, $translate:ident;)+) => {
        /// Parametrized deep copier. Every `visit_*` method defaults to
        /// [`copy_children`].
        pub trait TreeCopier<P> {
            /// The builder copies are made with.
            fn builder(&mut self) -> &mut TreeBuilder;

            /// Dispatches on the shape of `tree`.
            fn copy(&mut self, tree: &Tree, p: &P) -> Tree {
                match &tree.kind {
                    $(
                        TreeKind::$variant(node) => self.$visit(tree, node, p),
                    )+
                }
            }

            fn copy_opt(&mut self, tree: Option<&Tree>, p: &P) -> Option<Tree> {
                tree.map(|tree| self.copy(tree, p))
            }

            fn copy_list(&mut self, trees: &[Tree], p: &P) -> Vec<Tree> {
                trees.iter().map(|tree| self.copy(tree, p)).collect()
            }

            fn copy_box(&mut self, tree: &Tree, p: &P) -> Box<Tree> {
                Box::new(self.copy(tree, p))
            }

            fn copy_box_opt(&mut self, tree: Option<&Tree>, p: &P) -> Option<Box<Tree>> {
                tree.map(|tree| self.copy_box(tree, p))
            }

            $(
                fn $visit(&mut self, tree: &Tree, _node: &$variant, p: &P) -> Tree {
                    copy_children(self, tree, p)
                }
            )+
        }
    };
}

for_each_tree_kind!(copier_trait);

/// Copier over a borrowed builder with no overrides.
pub struct DeepCopier<'b> {
    make: &'b mut TreeBuilder,
}

impl<'b> DeepCopier<'b> {
    pub fn new(make: &'b mut TreeBuilder) -> Self {
        DeepCopier { make }
    }
}

impl<P> TreeCopier<P> for DeepCopier<'_> {
    fn builder(&mut self) -> &mut TreeBuilder {
        self.make
    }
}

/// Copies `tree` without a parameter.
pub fn copy_tree(make: &mut TreeBuilder, tree: &Tree) -> Tree {
    DeepCopier::new(make).copy(tree, &())
}

/// Rebuilds `tree` at its own anchor, copying every child through
/// `copier`. Semantic slots (symbols, flags, literal values) are shared
/// and a unit's end-position table is dropped.
pub fn copy_children<P, C: TreeCopier<P> + ?Sized>(copier: &mut C, tree: &Tree, p: &P) -> Tree {
    let kind = match &tree.kind {
        TreeKind::TopLevel(node) => TreeKind::TopLevel(TopLevel {
            defs: copier.copy_list(&node.defs, p),
            source_file: node.source_file.clone(),
            end_positions: None,
            line_map: node.line_map.clone(),
        }),
        TreeKind::PackageDecl(node) => TreeKind::PackageDecl(PackageDecl {
            annotations: copier.copy_list(&node.annotations, p),
            pid: copier.copy_box(&node.pid, p),
            sym: node.sym.clone(),
        }),
        TreeKind::Import(node) => TreeKind::Import(Import {
            qualid: copier.copy_box(&node.qualid, p),
            static_import: node.static_import,
        }),
        TreeKind::ClassDecl(node) => TreeKind::ClassDecl(ClassDecl {
            mods: copier.copy_box(&node.mods, p),
            name: node.name.clone(),
            typarams: copier.copy_list(&node.typarams, p),
            extending: copier.copy_box_opt(node.extending.as_deref(), p),
            implementing: copier.copy_list(&node.implementing, p),
            permitting: copier.copy_list(&node.permitting, p),
            defs: copier.copy_list(&node.defs, p),
            sym: node.sym.clone(),
        }),
        TreeKind::MethodDecl(node) => TreeKind::MethodDecl(MethodDecl {
            mods: copier.copy_box(&node.mods, p),
            name: node.name.clone(),
            restype: copier.copy_box_opt(node.restype.as_deref(), p),
            typarams: copier.copy_list(&node.typarams, p),
            recvparam: copier.copy_box_opt(node.recvparam.as_deref(), p),
            params: copier.copy_list(&node.params, p),
            thrown: copier.copy_list(&node.thrown, p),
            body: copier.copy_box_opt(node.body.as_deref(), p),
            default_value: copier.copy_box_opt(node.default_value.as_deref(), p),
            sym: node.sym.clone(),
        }),
        TreeKind::VariableDecl(node) => TreeKind::VariableDecl(VariableDecl {
            mods: copier.copy_box(&node.mods, p),
            name: node.name.clone(),
            nameexpr: copier.copy_box_opt(node.nameexpr.as_deref(), p),
            vartype: copier.copy_box_opt(node.vartype.as_deref(), p),
            init: copier.copy_box_opt(node.init.as_deref(), p),
            start_pos: node.start_pos,
            declared_using_var: node.declared_using_var,
            sym: node.sym.clone(),
        }),
        TreeKind::Skip(_) => TreeKind::Skip(Skip {}),
        TreeKind::Block(node) => TreeKind::Block(Block {
            flags: node.flags,
            stats: copier.copy_list(&node.stats, p),
            endpos: node.endpos,
        }),
        TreeKind::DoWhileLoop(node) => TreeKind::DoWhileLoop(DoWhileLoop {
            body: copier.copy_box(&node.body, p),
            cond: copier.copy_box(&node.cond, p),
        }),
        TreeKind::WhileLoop(node) => TreeKind::WhileLoop(WhileLoop {
            cond: copier.copy_box(&node.cond, p),
            body: copier.copy_box(&node.body, p),
        }),
        TreeKind::ForLoop(node) => TreeKind::ForLoop(ForLoop {
            init: copier.copy_list(&node.init, p),
            cond: copier.copy_box_opt(node.cond.as_deref(), p),
            step: copier.copy_list(&node.step, p),
            body: copier.copy_box(&node.body, p),
        }),
        TreeKind::EnhancedForLoop(node) => TreeKind::EnhancedForLoop(EnhancedForLoop {
            var: copier.copy_box(&node.var, p),
            expr: copier.copy_box(&node.expr, p),
            body: copier.copy_box(&node.body, p),
        }),
        TreeKind::LabeledStatement(node) => TreeKind::LabeledStatement(LabeledStatement {
            label: node.label.clone(),
            body: copier.copy_box(&node.body, p),
        }),
        TreeKind::Switch(node) => TreeKind::Switch(Switch {
            selector: copier.copy_box(&node.selector, p),
            cases: copier.copy_list(&node.cases, p),
            endpos: node.endpos,
            has_total_pattern: node.has_total_pattern,
            pattern_switch: node.pattern_switch,
        }),
        TreeKind::Case(node) => TreeKind::Case(Case {
            kind: node.kind,
            labels: copier.copy_list(&node.labels, p),
            stats: copier.copy_list(&node.stats, p),
            completes_normally: node.completes_normally,
        }),
        TreeKind::SwitchExpression(node) => TreeKind::SwitchExpression(SwitchExpression {
            selector: copier.copy_box(&node.selector, p),
            cases: copier.copy_list(&node.cases, p),
            endpos: node.endpos,
            has_total_pattern: node.has_total_pattern,
            pattern_switch: node.pattern_switch,
            poly_kind: node.poly_kind,
        }),
        TreeKind::Synchronized(node) => TreeKind::Synchronized(Synchronized {
            lock: copier.copy_box(&node.lock, p),
            body: copier.copy_box(&node.body, p),
        }),
        TreeKind::Try(node) => TreeKind::Try(Try {
            resources: copier.copy_list(&node.resources, p),
            body: copier.copy_box(&node.body, p),
            catchers: copier.copy_list(&node.catchers, p),
            finalizer: copier.copy_box_opt(node.finalizer.as_deref(), p),
            finally_can_complete_normally: node.finally_can_complete_normally,
        }),
        TreeKind::Catch(node) => TreeKind::Catch(Catch {
            param: copier.copy_box(&node.param, p),
            body: copier.copy_box(&node.body, p),
        }),
        TreeKind::Conditional(node) => TreeKind::Conditional(Conditional {
            cond: copier.copy_box(&node.cond, p),
            truepart: copier.copy_box(&node.truepart, p),
            falsepart: copier.copy_box(&node.falsepart, p),
            poly_kind: node.poly_kind,
        }),
        TreeKind::If(node) => TreeKind::If(If {
            cond: copier.copy_box(&node.cond, p),
            thenpart: copier.copy_box(&node.thenpart, p),
            elsepart: copier.copy_box_opt(node.elsepart.as_deref(), p),
        }),
        TreeKind::ExpressionStatement(node) => TreeKind::ExpressionStatement(ExpressionStatement {
            expr: copier.copy_box(&node.expr, p),
        }),
        TreeKind::Break(node) => TreeKind::Break(Break {
            label: node.label.clone(),
        }),
        TreeKind::Yield(node) => TreeKind::Yield(Yield {
            value: copier.copy_box(&node.value, p),
        }),
        TreeKind::Continue(node) => TreeKind::Continue(Continue {
            label: node.label.clone(),
        }),
        TreeKind::Return(node) => TreeKind::Return(Return {
            expr: copier.copy_box_opt(node.expr.as_deref(), p),
        }),
        TreeKind::Throw(node) => TreeKind::Throw(Throw {
            expr: copier.copy_box(&node.expr, p),
        }),
        TreeKind::Assert(node) => TreeKind::Assert(Assert {
            cond: copier.copy_box(&node.cond, p),
            detail: copier.copy_box_opt(node.detail.as_deref(), p),
        }),
        TreeKind::MethodInvocation(node) => TreeKind::MethodInvocation(MethodInvocation {
            typeargs: copier.copy_list(&node.typeargs, p),
            meth: copier.copy_box(&node.meth, p),
            args: copier.copy_list(&node.args, p),
            varargs_element: node.varargs_element.clone(),
            poly_kind: node.poly_kind,
        }),
        TreeKind::NewClass(node) => TreeKind::NewClass(NewClass {
            encl: copier.copy_box_opt(node.encl.as_deref(), p),
            typeargs: copier.copy_list(&node.typeargs, p),
            clazz: copier.copy_box(&node.clazz, p),
            args: copier.copy_list(&node.args, p),
            def: copier.copy_box_opt(node.def.as_deref(), p),
            constructor: node.constructor.clone(),
            varargs_element: node.varargs_element.clone(),
            poly_kind: node.poly_kind,
        }),
        TreeKind::NewArray(node) => {
            let dim_annotations = node
                .dim_annotations
                .iter()
                .map(|annotations| copier.copy_list(annotations, p))
                .collect();
            let elems = node.elems.as_ref().map(|elems| copier.copy_list(elems, p));
            TreeKind::NewArray(NewArray {
                elemtype: copier.copy_box_opt(node.elemtype.as_deref(), p),
                dims: copier.copy_list(&node.dims, p),
                annotations: copier.copy_list(&node.annotations, p),
                dim_annotations,
                elems,
            })
        }
        TreeKind::Lambda(node) => TreeKind::Lambda(Lambda {
            params: copier.copy_list(&node.params, p),
            body: copier.copy_box(&node.body, p),
            param_kind: node.param_kind,
            can_complete_normally: node.can_complete_normally,
            target: node.target.clone(),
        }),
        TreeKind::Parens(node) => TreeKind::Parens(Parens {
            expr: copier.copy_box(&node.expr, p),
        }),
        TreeKind::Assign(node) => TreeKind::Assign(Assign {
            lhs: copier.copy_box(&node.lhs, p),
            rhs: copier.copy_box(&node.rhs, p),
        }),
        TreeKind::AssignOp(node) => TreeKind::AssignOp(AssignOp {
            opcode: node.opcode,
            lhs: copier.copy_box(&node.lhs, p),
            rhs: copier.copy_box(&node.rhs, p),
            operator: node.operator.clone(),
        }),
        TreeKind::Unary(node) => TreeKind::Unary(Unary {
            opcode: node.opcode,
            arg: copier.copy_box(&node.arg, p),
            operator: node.operator.clone(),
        }),
        TreeKind::Binary(node) => TreeKind::Binary(Binary {
            opcode: node.opcode,
            lhs: copier.copy_box(&node.lhs, p),
            rhs: copier.copy_box(&node.rhs, p),
            operator: node.operator.clone(),
        }),
        TreeKind::TypeCast(node) => TreeKind::TypeCast(TypeCast {
            clazz: copier.copy_box(&node.clazz, p),
            expr: copier.copy_box(&node.expr, p),
        }),
        TreeKind::InstanceOf(node) => TreeKind::InstanceOf(InstanceOf {
            expr: copier.copy_box(&node.expr, p),
            pattern: copier.copy_box(&node.pattern, p),
        }),
        TreeKind::BindingPattern(node) => TreeKind::BindingPattern(BindingPattern {
            var: copier.copy_box(&node.var, p),
        }),
        TreeKind::DefaultCaseLabel(_) => TreeKind::DefaultCaseLabel(DefaultCaseLabel {}),
        TreeKind::ParenthesizedPattern(node) => {
            TreeKind::ParenthesizedPattern(ParenthesizedPattern {
                pattern: copier.copy_box(&node.pattern, p),
            })
        }
        TreeKind::GuardPattern(node) => TreeKind::GuardPattern(GuardPattern {
            patt: copier.copy_box(&node.patt, p),
            expr: copier.copy_box(&node.expr, p),
        }),
        TreeKind::ArrayAccess(node) => TreeKind::ArrayAccess(ArrayAccess {
            indexed: copier.copy_box(&node.indexed, p),
            index: copier.copy_box(&node.index, p),
        }),
        TreeKind::FieldAccess(node) => TreeKind::FieldAccess(FieldAccess {
            selected: copier.copy_box(&node.selected, p),
            name: node.name.clone(),
            sym: node.sym.clone(),
        }),
        TreeKind::MemberReference(node) => TreeKind::MemberReference(MemberReference {
            mode: node.mode,
            name: node.name.clone(),
            expr: copier.copy_box(&node.expr, p),
            typeargs: copier.copy_list(&node.typeargs, p),
            sym: node.sym.clone(),
            target: node.target.clone(),
        }),
        TreeKind::Ident(node) => TreeKind::Ident(Ident {
            name: node.name.clone(),
            sym: node.sym.clone(),
        }),
        TreeKind::Literal(node) => TreeKind::Literal(Literal {
            typetag: node.typetag,
            value: node.value.clone(),
        }),
        TreeKind::PrimitiveType(node) => TreeKind::PrimitiveType(PrimitiveType {
            typetag: node.typetag,
        }),
        TreeKind::ArrayType(node) => TreeKind::ArrayType(ArrayType {
            elemtype: copier.copy_box(&node.elemtype, p),
        }),
        TreeKind::TypeApply(node) => TreeKind::TypeApply(TypeApply {
            clazz: copier.copy_box(&node.clazz, p),
            arguments: copier.copy_list(&node.arguments, p),
        }),
        TreeKind::TypeUnion(node) => TreeKind::TypeUnion(TypeUnion {
            alternatives: copier.copy_list(&node.alternatives, p),
        }),
        TreeKind::TypeIntersection(node) => TreeKind::TypeIntersection(TypeIntersection {
            bounds: copier.copy_list(&node.bounds, p),
        }),
        TreeKind::TypeParameter(node) => TreeKind::TypeParameter(TypeParameter {
            name: node.name.clone(),
            bounds: copier.copy_list(&node.bounds, p),
            annotations: copier.copy_list(&node.annotations, p),
        }),
        TreeKind::Wildcard(node) => TreeKind::Wildcard(Wildcard {
            kind: copier.copy_box(&node.kind, p),
            inner: copier.copy_box_opt(node.inner.as_deref(), p),
        }),
        TreeKind::TypeBoundKind(node) => TreeKind::TypeBoundKind(TypeBoundKind { kind: node.kind }),
        TreeKind::Annotation(node) => TreeKind::Annotation(Annotation {
            annotation_type: copier.copy_box(&node.annotation_type, p),
            args: copier.copy_list(&node.args, p),
            is_type_annotation: node.is_type_annotation,
        }),
        TreeKind::Modifiers(node) => TreeKind::Modifiers(Modifiers {
            flags: node.flags,
            annotations: copier.copy_list(&node.annotations, p),
        }),
        TreeKind::AnnotatedType(node) => TreeKind::AnnotatedType(AnnotatedType {
            annotations: copier.copy_list(&node.annotations, p),
            underlying_type: copier.copy_box(&node.underlying_type, p),
        }),
        TreeKind::Erroneous(node) => TreeKind::Erroneous(Erroneous {
            errs: copier.copy_list(&node.errs, p),
            text: node.text.clone(),
            message: node.message.clone(),
        }),
        TreeKind::ModuleDecl(node) => TreeKind::ModuleDecl(ModuleDecl {
            mods: copier.copy_box(&node.mods, p),
            kind: node.kind,
            qual_id: copier.copy_box(&node.qual_id, p),
            directives: copier.copy_list(&node.directives, p),
            sym: node.sym.clone(),
        }),
        TreeKind::Exports(node) => TreeKind::Exports(Exports {
            qualid: copier.copy_box(&node.qualid, p),
            module_names: copier.copy_list(&node.module_names, p),
        }),
        TreeKind::Opens(node) => TreeKind::Opens(Opens {
            qualid: copier.copy_box(&node.qualid, p),
            module_names: copier.copy_list(&node.module_names, p),
        }),
        TreeKind::Provides(node) => TreeKind::Provides(Provides {
            service_name: copier.copy_box(&node.service_name, p),
            impl_names: copier.copy_list(&node.impl_names, p),
        }),
        TreeKind::Requires(node) => TreeKind::Requires(Requires {
            is_transitive: node.is_transitive,
            is_static_phase: node.is_static_phase,
            module_name: copier.copy_box(&node.module_name, p),
        }),
        TreeKind::Uses(node) => TreeKind::Uses(Uses {
            qualid: copier.copy_box(&node.qualid, p),
        }),
        TreeKind::LetExpr(node) => TreeKind::LetExpr(LetExpr {
            defs: copier.copy_list(&node.defs, p),
            expr: copier.copy_box(&node.expr, p),
            needs_cond: node.needs_cond,
        }),
    };
    copier.builder().at(tree.pos).node(kind)
}
