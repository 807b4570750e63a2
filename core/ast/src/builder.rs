//! The tree factory.
//!
//! [`TreeBuilder`] is the only place trees are created. It owns:
//!
//! - a **position cursor**: every node built is stamped with the cursor's
//!   current position until the cursor is moved again with one of the `at*`
//!   methods;
//! - a **node id counter**: ids are assigned sequentially starting at 1 in
//!   construction order, with 0 reserved for [`NodeId::DUMMY`];
//! - the [`NameTable`] identifiers are interned in.
//!
//! One builder serves one compilation unit. It is cheap to create, so tests
//! and synthesizing passes simply make their own.
//!
//! # Example
//!
//! ```
//! use javelin_ast::{builder::TreeBuilder, nodes::Tag, position::Pos};
//!
//! let mut make = TreeBuilder::new();
//! let one = make.at_offset(0).literal(1);
//! let two = make.at_offset(4).literal(2);
//! let sum = make.at_offset(2).binary(Tag::Plus, one, two);
//!
//! assert_eq!(sum.tag(), Tag::Plus);
//! assert_eq!(sum.pos, Pos::new(2));
//! assert_eq!(sum.start_pos(), Pos::new(0));
//! ```
//!
//! # Checked construction
//!
//! The per-variant constructors trust their input. The convenience
//! constructors that take untyped input (dotted strings, operator tags) have
//! `checked_*` or `Result` forms returning [`AstError`].

use tracing::trace;

use crate::{
    enums_impl::{Constant, TypeTag},
    errors::AstError,
    names::{Name, NameTable},
    nodes::{
        Annotation, AnnotatedType, ArrayAccess, ArrayType, Assert, Assign, AssignOp, Binary,
        BindingPattern, Block, BoundKind, Break, Case, CaseKind, Catch, ClassDecl, Conditional,
        Continue, DefaultCaseLabel, DoWhileLoop, EnhancedForLoop, Erroneous, Exports,
        ExpressionStatement, FieldAccess, ForLoop, GuardPattern, Ident, If, Import, InstanceOf,
        LabeledStatement, Lambda, LetExpr, Literal, MemberReference, MethodDecl,
        MethodInvocation, ModuleDecl, ModuleKind, Modifiers, NewArray, NewClass, NodeId, Opens,
        PackageDecl, ParameterKind, Parens, ParenthesizedPattern, PolyKind, PrimitiveType,
        Provides, ReferenceMode, Requires, Return, Skip, Switch, SwitchExpression, Synchronized,
        Tag, Throw, TopLevel, Tree, TreeKind, Try, TypeApply, TypeBoundKind, TypeCast,
        TypeIntersection, TypeParameter, TypeUnion, Unary, Uses, VariableDecl, WhileLoop,
        Wildcard, Yield,
    },
    position::{DiagnosticPosition, Pos},
};

/// Factory for trees, carrying the current position and the id counter.
pub struct TreeBuilder {
    pos: Pos,
    next_id: u32,
    names: NameTable,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder::new()
    }
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        TreeBuilder::with_names(NameTable::new())
    }

    /// A builder interning identifiers into an existing table.
    #[must_use]
    pub fn with_names(names: NameTable) -> Self {
        TreeBuilder {
            pos: Pos::NOPOS,
            next_id: 1,
            names,
        }
    }

    /// The position stamped onto the next node.
    #[must_use]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn names(&mut self) -> &mut NameTable {
        &mut self.names
    }

    /// Interns `spelling`.
    pub fn intern(&mut self, spelling: &str) -> Name {
        self.names.from_str(spelling)
    }

    /// Gives back the name table, for handing to the next builder.
    #[must_use]
    pub fn into_names(self) -> NameTable {
        self.names
    }

    pub fn at(&mut self, pos: Pos) -> &mut Self {
        trace!(%pos, "move builder cursor");
        self.pos = pos;
        self
    }

    pub fn at_offset(&mut self, offset: u32) -> &mut Self {
        self.at(Pos::new(offset))
    }

    /// Moves the cursor to the start of `pos`, or to `NOPOS` for `None`.
    pub fn at_diagnostic(&mut self, pos: Option<&DiagnosticPosition>) -> &mut Self {
        self.at(pos.map_or(Pos::NOPOS, |pos| pos.start))
    }

    /// Moves the cursor to where `tree` starts, or to `NOPOS` for `None`.
    pub fn at_tree(&mut self, tree: Option<&Tree>) -> &mut Self {
        self.at(tree.map_or(Pos::NOPOS, Tree::start_pos))
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn node(&mut self, kind: impl Into<TreeKind>) -> Tree {
        let id = self.fresh_id();
        Tree::new(id, self.pos, kind)
    }

    pub fn top_level(&mut self, defs: Vec<Tree>) -> Tree {
        self.node(TopLevel {
            defs,
            source_file: None,
            end_positions: None,
            line_map: None,
        })
    }

    pub fn package_decl(&mut self, annotations: Vec<Tree>, pid: Tree) -> Tree {
        self.node(PackageDecl {
            annotations,
            pid: Box::new(pid),
            sym: None,
        })
    }

    pub fn import(&mut self, qualid: Tree, static_import: bool) -> Tree {
        self.node(Import {
            qualid: Box::new(qualid),
            static_import,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn class_def(
        &mut self,
        mods: Tree,
        name: Name,
        typarams: Vec<Tree>,
        extending: Option<Tree>,
        implementing: Vec<Tree>,
        permitting: Vec<Tree>,
        defs: Vec<Tree>,
    ) -> Tree {
        self.node(ClassDecl {
            mods: Box::new(mods),
            name,
            typarams,
            extending: extending.map(Box::new),
            implementing,
            permitting,
            defs,
            sym: None,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn method_def(
        &mut self,
        mods: Tree,
        name: Name,
        restype: Option<Tree>,
        typarams: Vec<Tree>,
        recvparam: Option<Tree>,
        params: Vec<Tree>,
        thrown: Vec<Tree>,
        body: Option<Tree>,
        default_value: Option<Tree>,
    ) -> Tree {
        self.node(MethodDecl {
            mods: Box::new(mods),
            name,
            restype: restype.map(Box::new),
            typarams,
            recvparam: recvparam.map(Box::new),
            params,
            thrown,
            body: body.map(Box::new),
            default_value: default_value.map(Box::new),
            sym: None,
        })
    }

    pub fn var_def(
        &mut self,
        mods: Tree,
        name: Name,
        vartype: Option<Tree>,
        init: Option<Tree>,
    ) -> Tree {
        self.variable(mods, name, None, vartype, init, false)
    }

    /// A local declared with `var`: no declared type.
    pub fn inferred_var_def(&mut self, mods: Tree, name: Name, init: Option<Tree>) -> Tree {
        self.variable(mods, name, None, None, init, true)
    }

    /// The explicit `this` parameter of a method, named by `nameexpr`.
    pub fn receiver_var_def(&mut self, mods: Tree, nameexpr: Tree, vartype: Tree) -> Tree {
        let name = match &nameexpr.kind {
            TreeKind::Ident(ident) => ident.name.clone(),
            TreeKind::FieldAccess(select) => select.name.clone(),
            _ => self.names.from_str("this"),
        };
        self.variable(mods, name, Some(nameexpr), Some(vartype), None, false)
    }

    fn variable(
        &mut self,
        mods: Tree,
        name: Name,
        nameexpr: Option<Tree>,
        vartype: Option<Tree>,
        init: Option<Tree>,
        declared_using_var: bool,
    ) -> Tree {
        self.node(VariableDecl {
            mods: Box::new(mods),
            name,
            nameexpr: nameexpr.map(Box::new),
            vartype: vartype.map(Box::new),
            init: init.map(Box::new),
            start_pos: Pos::NOPOS,
            declared_using_var,
            sym: None,
        })
    }

    pub fn skip(&mut self) -> Tree {
        self.node(Skip {})
    }

    pub fn block(&mut self, flags: u64, stats: Vec<Tree>) -> Tree {
        self.node(Block {
            flags,
            stats,
            endpos: Pos::NOPOS,
        })
    }

    pub fn do_loop(&mut self, body: Tree, cond: Tree) -> Tree {
        self.node(DoWhileLoop {
            body: Box::new(body),
            cond: Box::new(cond),
        })
    }

    pub fn while_loop(&mut self, cond: Tree, body: Tree) -> Tree {
        self.node(WhileLoop {
            cond: Box::new(cond),
            body: Box::new(body),
        })
    }

    pub fn for_loop(
        &mut self,
        init: Vec<Tree>,
        cond: Option<Tree>,
        step: Vec<Tree>,
        body: Tree,
    ) -> Tree {
        self.node(ForLoop {
            init,
            cond: cond.map(Box::new),
            step,
            body: Box::new(body),
        })
    }

    pub fn foreach_loop(&mut self, var: Tree, expr: Tree, body: Tree) -> Tree {
        self.node(EnhancedForLoop {
            var: Box::new(var),
            expr: Box::new(expr),
            body: Box::new(body),
        })
    }

    pub fn labelled(&mut self, label: Name, body: Tree) -> Tree {
        self.node(LabeledStatement {
            label,
            body: Box::new(body),
        })
    }

    pub fn switch(&mut self, selector: Tree, cases: Vec<Tree>) -> Tree {
        self.node(Switch {
            selector: Box::new(selector),
            cases,
            endpos: Pos::NOPOS,
            has_total_pattern: false,
            pattern_switch: false,
        })
    }

    pub fn switch_expression(&mut self, selector: Tree, cases: Vec<Tree>) -> Tree {
        self.node(SwitchExpression {
            selector: Box::new(selector),
            cases,
            endpos: Pos::NOPOS,
            has_total_pattern: false,
            pattern_switch: false,
            poly_kind: PolyKind::Standalone,
        })
    }

    /// A `case` group. For [`CaseKind::Rule`], `stats` is the single rule
    /// body.
    pub fn case(&mut self, kind: CaseKind, labels: Vec<Tree>, stats: Vec<Tree>) -> Tree {
        self.node(Case {
            kind,
            labels,
            stats,
            completes_normally: true,
        })
    }

    /// `case labels -> body`.
    pub fn case_rule(&mut self, labels: Vec<Tree>, body: Tree) -> Tree {
        self.case(CaseKind::Rule, labels, vec![body])
    }

    pub fn synchronized(&mut self, lock: Tree, body: Tree) -> Tree {
        self.node(Synchronized {
            lock: Box::new(lock),
            body: Box::new(body),
        })
    }

    pub fn try_(
        &mut self,
        resources: Vec<Tree>,
        body: Tree,
        catchers: Vec<Tree>,
        finalizer: Option<Tree>,
    ) -> Tree {
        self.node(Try {
            resources,
            body: Box::new(body),
            catchers,
            finalizer: finalizer.map(Box::new),
            finally_can_complete_normally: true,
        })
    }

    pub fn catch(&mut self, param: Tree, body: Tree) -> Tree {
        self.node(Catch {
            param: Box::new(param),
            body: Box::new(body),
        })
    }

    pub fn conditional(&mut self, cond: Tree, truepart: Tree, falsepart: Tree) -> Tree {
        self.node(Conditional {
            cond: Box::new(cond),
            truepart: Box::new(truepart),
            falsepart: Box::new(falsepart),
            poly_kind: PolyKind::Standalone,
        })
    }

    pub fn if_(&mut self, cond: Tree, thenpart: Tree, elsepart: Option<Tree>) -> Tree {
        self.node(If {
            cond: Box::new(cond),
            thenpart: Box::new(thenpart),
            elsepart: elsepart.map(Box::new),
        })
    }

    pub fn exec(&mut self, expr: Tree) -> Tree {
        self.node(ExpressionStatement {
            expr: Box::new(expr),
        })
    }

    pub fn break_(&mut self, label: Option<Name>) -> Tree {
        self.node(Break { label })
    }

    pub fn yield_(&mut self, value: Tree) -> Tree {
        self.node(Yield {
            value: Box::new(value),
        })
    }

    pub fn continue_(&mut self, label: Option<Name>) -> Tree {
        self.node(Continue { label })
    }

    pub fn return_(&mut self, expr: Option<Tree>) -> Tree {
        self.node(Return {
            expr: expr.map(Box::new),
        })
    }

    pub fn throw(&mut self, expr: Tree) -> Tree {
        self.node(Throw {
            expr: Box::new(expr),
        })
    }

    pub fn assert(&mut self, cond: Tree, detail: Option<Tree>) -> Tree {
        self.node(Assert {
            cond: Box::new(cond),
            detail: detail.map(Box::new),
        })
    }

    pub fn apply(&mut self, typeargs: Vec<Tree>, meth: Tree, args: Vec<Tree>) -> Tree {
        self.node(MethodInvocation {
            typeargs,
            meth: Box::new(meth),
            args,
            varargs_element: None,
            poly_kind: PolyKind::Standalone,
        })
    }

    pub fn new_class(
        &mut self,
        encl: Option<Tree>,
        typeargs: Vec<Tree>,
        clazz: Tree,
        args: Vec<Tree>,
        def: Option<Tree>,
    ) -> Tree {
        self.node(NewClass {
            encl: encl.map(Box::new),
            typeargs,
            clazz: Box::new(clazz),
            args,
            def: def.map(Box::new),
            constructor: None,
            varargs_element: None,
            poly_kind: PolyKind::Standalone,
        })
    }

    /// `new T[d1][d2]...` or `new T[]{...}`. Dimension annotations start
    /// out empty.
    pub fn new_array(
        &mut self,
        elemtype: Option<Tree>,
        dims: Vec<Tree>,
        elems: Option<Vec<Tree>>,
    ) -> Tree {
        self.node(NewArray {
            elemtype: elemtype.map(Box::new),
            dims,
            annotations: Vec::new(),
            dim_annotations: Vec::new(),
            elems,
        })
    }

    /// Parameters without declared types make an implicitly typed lambda.
    pub fn lambda(&mut self, params: Vec<Tree>, body: Tree) -> Tree {
        let param_kind = match params.first().map(|param| &param.kind) {
            Some(TreeKind::VariableDecl(var)) if var.vartype.is_none() => ParameterKind::Implicit,
            _ => ParameterKind::Explicit,
        };
        self.node(Lambda {
            params,
            body: Box::new(body),
            param_kind,
            can_complete_normally: true,
            target: None,
        })
    }

    pub fn parens(&mut self, expr: Tree) -> Tree {
        self.node(Parens {
            expr: Box::new(expr),
        })
    }

    pub fn assign(&mut self, lhs: Tree, rhs: Tree) -> Tree {
        self.node(Assign {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// # Panics
    ///
    /// Panics if `opcode` is not a compound assignment tag; see
    /// [`TreeBuilder::checked_assignop`].
    pub fn assignop(&mut self, opcode: Tag, lhs: Tree, rhs: Tree) -> Tree {
        assert!(opcode.is_assignop(), "{opcode:?} is not a compound assignment operator");
        self.node(AssignOp {
            opcode,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            operator: None,
        })
    }

    /// # Panics
    ///
    /// Panics if `opcode` is not a unary operator tag; see
    /// [`TreeBuilder::checked_unary`].
    pub fn unary(&mut self, opcode: Tag, arg: Tree) -> Tree {
        assert!(opcode.is_unary_op(), "{opcode:?} is not a unary operator");
        self.node(Unary {
            opcode,
            arg: Box::new(arg),
            operator: None,
        })
    }

    /// # Panics
    ///
    /// Panics if `opcode` is not a binary operator tag; see
    /// [`TreeBuilder::checked_binary`].
    pub fn binary(&mut self, opcode: Tag, lhs: Tree, rhs: Tree) -> Tree {
        assert!(opcode.is_binary_op(), "{opcode:?} is not a binary operator");
        self.node(Binary {
            opcode,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            operator: None,
        })
    }

    pub fn checked_assignop(&mut self, opcode: Tag, lhs: Tree, rhs: Tree) -> Result<Tree, AstError> {
        if !opcode.is_assignop() {
            return Err(AstError::NotAnOperator {
                tag: opcode,
                expected: "compound assignment",
            });
        }
        Ok(self.assignop(opcode, lhs, rhs))
    }

    pub fn checked_unary(&mut self, opcode: Tag, arg: Tree) -> Result<Tree, AstError> {
        if !opcode.is_unary_op() {
            return Err(AstError::NotAnOperator {
                tag: opcode,
                expected: "unary",
            });
        }
        Ok(self.unary(opcode, arg))
    }

    pub fn checked_binary(&mut self, opcode: Tag, lhs: Tree, rhs: Tree) -> Result<Tree, AstError> {
        if !opcode.is_binary_op() {
            return Err(AstError::NotAnOperator {
                tag: opcode,
                expected: "binary",
            });
        }
        Ok(self.binary(opcode, lhs, rhs))
    }

    pub fn type_cast(&mut self, clazz: Tree, expr: Tree) -> Tree {
        self.node(TypeCast {
            clazz: Box::new(clazz),
            expr: Box::new(expr),
        })
    }

    /// `expr instanceof pattern`; `pattern` may be a plain type.
    pub fn type_test(&mut self, expr: Tree, pattern: Tree) -> Tree {
        self.node(InstanceOf {
            expr: Box::new(expr),
            pattern: Box::new(pattern),
        })
    }

    pub fn binding_pattern(&mut self, var: Tree) -> Tree {
        self.node(BindingPattern { var: Box::new(var) })
    }

    pub fn default_case_label(&mut self) -> Tree {
        self.node(DefaultCaseLabel {})
    }

    pub fn parenthesized_pattern(&mut self, pattern: Tree) -> Tree {
        self.node(ParenthesizedPattern {
            pattern: Box::new(pattern),
        })
    }

    pub fn guard_pattern(&mut self, patt: Tree, expr: Tree) -> Tree {
        self.node(GuardPattern {
            patt: Box::new(patt),
            expr: Box::new(expr),
        })
    }

    pub fn indexed(&mut self, indexed: Tree, index: Tree) -> Tree {
        self.node(ArrayAccess {
            indexed: Box::new(indexed),
            index: Box::new(index),
        })
    }

    pub fn select(&mut self, selected: Tree, name: Name) -> Tree {
        self.node(FieldAccess {
            selected: Box::new(selected),
            name,
            sym: None,
        })
    }

    pub fn reference(
        &mut self,
        mode: ReferenceMode,
        name: Name,
        expr: Tree,
        typeargs: Vec<Tree>,
    ) -> Tree {
        self.node(MemberReference {
            mode,
            name,
            expr: Box::new(expr),
            typeargs,
            sym: None,
            target: None,
        })
    }

    pub fn ident(&mut self, name: Name) -> Tree {
        self.node(Ident { name, sym: None })
    }

    /// A literal whose type tag follows from the value.
    pub fn literal(&mut self, value: impl Into<Constant>) -> Tree {
        let value = value.into();
        let typetag = value.type_tag();
        self.node(Literal { typetag, value })
    }

    /// A literal with an explicit type tag. Integer values under the `Char`
    /// and `Boolean` tags are converted to characters and booleans.
    pub fn literal_tagged(&mut self, typetag: TypeTag, value: Constant) -> Tree {
        let value = match (typetag, value) {
            (TypeTag::Char, Constant::Int(code)) => u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .map_or(Constant::Int(code), Constant::Char),
            (TypeTag::Boolean, Constant::Int(bit)) => Constant::Bool(bit != 0),
            (_, value) => value,
        };
        self.node(Literal { typetag, value })
    }

    pub fn type_ident(&mut self, typetag: TypeTag) -> Tree {
        self.node(PrimitiveType { typetag })
    }

    pub fn type_array(&mut self, elemtype: Tree) -> Tree {
        self.node(ArrayType {
            elemtype: Box::new(elemtype),
        })
    }

    pub fn type_apply(&mut self, clazz: Tree, arguments: Vec<Tree>) -> Tree {
        self.node(TypeApply {
            clazz: Box::new(clazz),
            arguments,
        })
    }

    pub fn type_union(&mut self, alternatives: Vec<Tree>) -> Tree {
        self.node(TypeUnion { alternatives })
    }

    pub fn type_intersection(&mut self, bounds: Vec<Tree>) -> Tree {
        self.node(TypeIntersection { bounds })
    }

    pub fn type_parameter(&mut self, name: Name, bounds: Vec<Tree>, annotations: Vec<Tree>) -> Tree {
        self.node(TypeParameter {
            name,
            bounds,
            annotations,
        })
    }

    /// `kind` is a [`TypeBoundKind`] tree.
    pub fn wildcard(&mut self, kind: Tree, inner: Option<Tree>) -> Tree {
        self.node(Wildcard {
            kind: Box::new(kind),
            inner: inner.map(Box::new),
        })
    }

    pub fn type_bound_kind(&mut self, kind: BoundKind) -> Tree {
        self.node(TypeBoundKind { kind })
    }

    pub fn annotation(&mut self, annotation_type: Tree, args: Vec<Tree>) -> Tree {
        self.node(Annotation {
            annotation_type: Box::new(annotation_type),
            args,
            is_type_annotation: false,
        })
    }

    pub fn type_annotation(&mut self, annotation_type: Tree, args: Vec<Tree>) -> Tree {
        self.node(Annotation {
            annotation_type: Box::new(annotation_type),
            args,
            is_type_annotation: true,
        })
    }

    pub fn modifiers(&mut self, flags: u64, annotations: Vec<Tree>) -> Tree {
        self.node(Modifiers { flags, annotations })
    }

    pub fn modifiers_flags(&mut self, flags: u64) -> Tree {
        self.modifiers(flags, Vec::new())
    }

    pub fn annotated_type(&mut self, annotations: Vec<Tree>, underlying_type: Tree) -> Tree {
        self.node(AnnotatedType {
            annotations,
            underlying_type: Box::new(underlying_type),
        })
    }

    pub fn erroneous(&mut self, errs: Vec<Tree>) -> Tree {
        self.node(Erroneous {
            errs,
            text: None,
            message: None,
        })
    }

    /// An erroneous placeholder carrying the broken source text and the
    /// diagnostic that was reported for it.
    pub fn erroneous_text(&mut self, text: impl Into<String>, message: impl Into<String>) -> Tree {
        self.node(Erroneous {
            errs: Vec::new(),
            text: Some(text.into()),
            message: Some(message.into()),
        })
    }

    pub fn module_def(
        &mut self,
        mods: Tree,
        kind: ModuleKind,
        qual_id: Tree,
        directives: Vec<Tree>,
    ) -> Tree {
        self.node(ModuleDecl {
            mods: Box::new(mods),
            kind,
            qual_id: Box::new(qual_id),
            directives,
            sym: None,
        })
    }

    pub fn exports(&mut self, qualid: Tree, module_names: Vec<Tree>) -> Tree {
        self.node(Exports {
            qualid: Box::new(qualid),
            module_names,
        })
    }

    pub fn opens(&mut self, qualid: Tree, module_names: Vec<Tree>) -> Tree {
        self.node(Opens {
            qualid: Box::new(qualid),
            module_names,
        })
    }

    pub fn provides(&mut self, service_name: Tree, impl_names: Vec<Tree>) -> Tree {
        self.node(Provides {
            service_name: Box::new(service_name),
            impl_names,
        })
    }

    pub fn requires(&mut self, is_transitive: bool, is_static_phase: bool, module_name: Tree) -> Tree {
        self.node(Requires {
            is_transitive,
            is_static_phase,
            module_name: Box::new(module_name),
        })
    }

    pub fn uses(&mut self, qualid: Tree) -> Tree {
        self.node(Uses {
            qualid: Box::new(qualid),
        })
    }

    pub fn let_expr(&mut self, defs: Vec<Tree>, expr: Tree) -> Tree {
        self.node(LetExpr {
            defs,
            expr: Box::new(expr),
            needs_cond: false,
        })
    }

    /// An identifier for `spelling`.
    pub fn name(&mut self, spelling: &str) -> Tree {
        let name = self.names.from_str(spelling);
        self.ident(name)
    }

    /// A dotted name as nested selections: `a.b.c` is `(a.b).c`.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::InvalidQualifiedName`] if any segment is empty.
    pub fn qual_ident(&mut self, dotted: &str) -> Result<Tree, AstError> {
        let invalid = || AstError::InvalidQualifiedName {
            name: dotted.to_string(),
        };
        let mut segments = dotted.split('.');
        let first = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let mut tree = self.name(first);
        for segment in segments {
            if segment.is_empty() {
                return Err(invalid());
            }
            let name = self.names.from_str(segment);
            tree = self.select(tree, name);
        }
        Ok(tree)
    }

    /// A call without explicit type arguments.
    pub fn app(&mut self, meth: Tree, args: Vec<Tree>) -> Tree {
        self.apply(Vec::new(), meth, args)
    }

    /// One identifier per variable declaration, naming the declared variable.
    /// Other trees are skipped.
    pub fn idents(&mut self, decls: &[Tree]) -> Vec<Tree> {
        decls
            .iter()
            .filter_map(|decl| match &decl.kind {
                TreeKind::VariableDecl(var) => Some(var.name.clone()),
                _ => None,
            })
            .map(|name| self.ident(name))
            .collect()
    }
}
