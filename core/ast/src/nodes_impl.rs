use std::mem;

use crate::{
    enums_impl::flags,
    names::{self, Name},
    nodes::{
        Case, CaseKind, ClassDecl, ClassKind, Import, Lambda, LambdaBodyKind, MethodDecl,
        Modifiers, NewArray, NodeId, OperandPos, PolyKind, Skip, Tag, TopLevel, Tree, TreeKind,
        VariableDecl,
    },
    position::Pos,
    semantic::SymbolHandle,
};

impl Tree {
    #[must_use]
    pub fn new(id: NodeId, pos: Pos, kind: impl Into<TreeKind>) -> Self {
        Tree {
            id,
            pos,
            ty: None,
            kind: kind.into(),
        }
    }

    /// Placeholder tree swapped into a slot while its occupant is moved out.
    #[must_use]
    pub fn dummy() -> Self {
        Tree::new(NodeId::DUMMY, Pos::NOPOS, Skip {})
    }

    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.id == NodeId::DUMMY
    }

    /// Moves the tree out of `slot`, leaving a [`Tree::dummy`] behind.
    pub fn take(slot: &mut Tree) -> Tree {
        mem::replace(slot, Tree::dummy())
    }

    /// The discriminant. Operator expressions report their operator.
    #[must_use]
    pub fn tag(&self) -> Tag {
        match &self.kind {
            TreeKind::TopLevel(_) => Tag::TopLevel,
            TreeKind::PackageDecl(_) => Tag::PackageDef,
            TreeKind::Import(_) => Tag::Import,
            TreeKind::ClassDecl(_) => Tag::ClassDef,
            TreeKind::MethodDecl(_) => Tag::MethodDef,
            TreeKind::VariableDecl(_) => Tag::VarDef,
            TreeKind::Skip(_) => Tag::Skip,
            TreeKind::Block(_) => Tag::Block,
            TreeKind::DoWhileLoop(_) => Tag::DoLoop,
            TreeKind::WhileLoop(_) => Tag::WhileLoop,
            TreeKind::ForLoop(_) => Tag::ForLoop,
            TreeKind::EnhancedForLoop(_) => Tag::ForeachLoop,
            TreeKind::LabeledStatement(_) => Tag::Labelled,
            TreeKind::Switch(_) => Tag::Switch,
            TreeKind::Case(_) => Tag::Case,
            TreeKind::SwitchExpression(_) => Tag::SwitchExpression,
            TreeKind::Synchronized(_) => Tag::Synchronized,
            TreeKind::Try(_) => Tag::Try,
            TreeKind::Catch(_) => Tag::Catch,
            TreeKind::Conditional(_) => Tag::CondExpr,
            TreeKind::If(_) => Tag::If,
            TreeKind::ExpressionStatement(_) => Tag::Exec,
            TreeKind::Break(_) => Tag::Break,
            TreeKind::Yield(_) => Tag::Yield,
            TreeKind::Continue(_) => Tag::Continue,
            TreeKind::Return(_) => Tag::Return,
            TreeKind::Throw(_) => Tag::Throw,
            TreeKind::Assert(_) => Tag::Assert,
            TreeKind::MethodInvocation(_) => Tag::Apply,
            TreeKind::NewClass(_) => Tag::NewClass,
            TreeKind::NewArray(_) => Tag::NewArray,
            TreeKind::Lambda(_) => Tag::Lambda,
            TreeKind::Parens(_) => Tag::Parens,
            TreeKind::Assign(_) => Tag::Assign,
            TreeKind::AssignOp(node) => node.opcode,
            TreeKind::Unary(node) => node.opcode,
            TreeKind::Binary(node) => node.opcode,
            TreeKind::TypeCast(_) => Tag::TypeCast,
            TreeKind::InstanceOf(_) => Tag::TypeTest,
            TreeKind::BindingPattern(_) => Tag::BindingPattern,
            TreeKind::DefaultCaseLabel(_) => Tag::DefaultCaseLabel,
            TreeKind::ParenthesizedPattern(_) => Tag::ParenthesizedPattern,
            TreeKind::GuardPattern(_) => Tag::GuardPattern,
            TreeKind::ArrayAccess(_) => Tag::Indexed,
            TreeKind::FieldAccess(_) => Tag::Select,
            TreeKind::MemberReference(_) => Tag::Reference,
            TreeKind::Ident(_) => Tag::Ident,
            TreeKind::Literal(_) => Tag::Literal,
            TreeKind::PrimitiveType(_) => Tag::TypeIdent,
            TreeKind::ArrayType(_) => Tag::TypeArray,
            TreeKind::TypeApply(_) => Tag::TypeApply,
            TreeKind::TypeUnion(_) => Tag::TypeUnion,
            TreeKind::TypeIntersection(_) => Tag::TypeIntersection,
            TreeKind::TypeParameter(_) => Tag::TypeParameter,
            TreeKind::Wildcard(_) => Tag::Wildcard,
            TreeKind::TypeBoundKind(_) => Tag::TypeBoundKind,
            TreeKind::Annotation(node) if node.is_type_annotation => Tag::TypeAnnotation,
            TreeKind::Annotation(_) => Tag::Annotation,
            TreeKind::Modifiers(_) => Tag::Modifiers,
            TreeKind::AnnotatedType(_) => Tag::AnnotatedType,
            TreeKind::Erroneous(_) => Tag::Erroneous,
            TreeKind::ModuleDecl(_) => Tag::ModuleDef,
            TreeKind::Exports(_) => Tag::Exports,
            TreeKind::Opens(_) => Tag::Opens,
            TreeKind::Provides(_) => Tag::Provides,
            TreeKind::Requires(_) => Tag::Requires,
            TreeKind::Uses(_) => Tag::Uses,
            TreeKind::LetExpr(_) => Tag::LetExpr,
        }
    }

    #[must_use]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tag() == tag
    }

    /// Standalone/poly classification of a poly expression, `None` for every
    /// other kind of tree. Lambdas and method references are always poly.
    #[must_use]
    pub fn poly_kind(&self) -> Option<PolyKind> {
        match &self.kind {
            TreeKind::Conditional(node) => Some(node.poly_kind),
            TreeKind::SwitchExpression(node) => Some(node.poly_kind),
            TreeKind::MethodInvocation(node) => Some(node.poly_kind),
            TreeKind::NewClass(node) => Some(node.poly_kind),
            TreeKind::Lambda(_) | TreeKind::MemberReference(_) => Some(PolyKind::Poly),
            _ => None,
        }
    }

    /// Records the attribution result for a poly expression. Functional
    /// expressions stay poly.
    ///
    /// # Panics
    ///
    /// Panics if the tree is not a poly expression.
    pub fn set_poly_kind(&mut self, kind: PolyKind) {
        match &mut self.kind {
            TreeKind::Conditional(node) => node.poly_kind = kind,
            TreeKind::SwitchExpression(node) => node.poly_kind = kind,
            TreeKind::MethodInvocation(node) => node.poly_kind = kind,
            TreeKind::NewClass(node) => node.poly_kind = kind,
            TreeKind::Lambda(_) | TreeKind::MemberReference(_) => {}
            other => panic!("{} is not a poly expression", other.kind_name()),
        }
    }

    #[must_use]
    pub fn is_poly_expression(&self) -> bool {
        self.poly_kind() == Some(PolyKind::Poly)
    }

    #[must_use]
    pub fn is_standalone(&self) -> bool {
        self.poly_kind() == Some(PolyKind::Standalone)
    }

    /// `true` for unary, binary and compound-assignment expressions.
    #[must_use]
    pub fn is_operator_expression(&self) -> bool {
        matches!(
            self.kind,
            TreeKind::Unary(_) | TreeKind::Binary(_) | TreeKind::AssignOp(_)
        )
    }

    /// Operand of an operator expression. Both positions of a unary
    /// expression name its argument.
    ///
    /// # Panics
    ///
    /// Panics if the tree is not an operator expression.
    #[must_use]
    pub fn operand(&self, pos: OperandPos) -> &Tree {
        match (&self.kind, pos) {
            (TreeKind::Unary(node), _) => &node.arg,
            (TreeKind::Binary(node), OperandPos::Left) => &node.lhs,
            (TreeKind::Binary(node), OperandPos::Right) => &node.rhs,
            (TreeKind::AssignOp(node), OperandPos::Left) => &node.lhs,
            (TreeKind::AssignOp(node), OperandPos::Right) => &node.rhs,
            (other, _) => panic!("{} is not an operator expression", other.kind_name()),
        }
    }

    /// Mutable counterpart of [`Tree::operand`].
    ///
    /// # Panics
    ///
    /// Panics if the tree is not an operator expression.
    pub fn operand_mut(&mut self, pos: OperandPos) -> &mut Tree {
        match (&mut self.kind, pos) {
            (TreeKind::Unary(node), _) => &mut node.arg,
            (TreeKind::Binary(node), OperandPos::Left) => &mut node.lhs,
            (TreeKind::Binary(node), OperandPos::Right) => &mut node.rhs,
            (TreeKind::AssignOp(node), OperandPos::Left) => &mut node.lhs,
            (TreeKind::AssignOp(node), OperandPos::Right) => &mut node.rhs,
            (other, _) => panic!("{} is not an operator expression", other.kind_name()),
        }
    }

    /// Resolved operator of an operator expression, once attributed.
    #[must_use]
    pub fn operator_symbol(&self) -> Option<&SymbolHandle> {
        match &self.kind {
            TreeKind::Unary(node) => node.operator.as_ref(),
            TreeKind::Binary(node) => node.operator.as_ref(),
            TreeKind::AssignOp(node) => node.operator.as_ref(),
            _ => None,
        }
    }

    /// Records the resolved operator of an operator expression.
    ///
    /// # Panics
    ///
    /// Panics if the tree is not an operator expression.
    pub fn set_operator_symbol(&mut self, operator: SymbolHandle) {
        match &mut self.kind {
            TreeKind::Unary(node) => node.operator = Some(operator),
            TreeKind::Binary(node) => node.operator = Some(operator),
            TreeKind::AssignOp(node) => node.operator = Some(operator),
            other => panic!("{} is not an operator expression", other.kind_name()),
        }
    }

    /// Flags of a modifiers tree, 0 for anything else.
    #[must_use]
    pub fn modifier_flags(&self) -> u64 {
        match &self.kind {
            TreeKind::Modifiers(node) => node.flags,
            _ => 0,
        }
    }
}

impl TopLevel {
    /// The `package` clause, if any.
    #[must_use]
    pub fn package(&self) -> Option<&Tree> {
        self.defs
            .iter()
            .find(|def| matches!(def.kind, TreeKind::PackageDecl(_)))
    }

    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.defs.iter().filter_map(|def| match &def.kind {
            TreeKind::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Everything after the package clause and imports.
    pub fn type_decls(&self) -> impl Iterator<Item = &Tree> {
        self.defs.iter().filter(|def| {
            !matches!(
                def.kind,
                TreeKind::PackageDecl(_) | TreeKind::Import(_) | TreeKind::Skip(_)
            )
        })
    }

    #[must_use]
    pub fn module_decl(&self) -> Option<&Tree> {
        self.defs
            .iter()
            .find(|def| matches!(def.kind, TreeKind::ModuleDecl(_)))
    }
}

impl Modifiers {
    #[must_use]
    pub fn has(&self, flag: u64) -> bool {
        self.flags & flag != 0
    }
}

impl ClassDecl {
    #[must_use]
    pub fn class_kind(&self) -> ClassKind {
        let bits = self.mods.modifier_flags();
        if bits & flags::ANNOTATION != 0 {
            ClassKind::Annotation
        } else if bits & flags::INTERFACE != 0 {
            ClassKind::Interface
        } else if bits & flags::ENUM != 0 {
            ClassKind::Enum
        } else if bits & flags::RECORD != 0 {
            ClassKind::Record
        } else {
            ClassKind::Class
        }
    }

    #[must_use]
    pub fn flags(&self) -> u64 {
        self.mods.modifier_flags()
    }

    /// Anonymous classes have an empty name.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

impl MethodDecl {
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name.as_str() == names::INIT
    }

    #[must_use]
    pub fn flags(&self) -> u64 {
        self.mods.modifier_flags()
    }

    #[must_use]
    pub fn is_varargs(&self) -> bool {
        self.params
            .last()
            .is_some_and(|param| match &param.kind {
                TreeKind::VariableDecl(var) => var.flags() & flags::VARARGS != 0,
                _ => false,
            })
    }
}

impl VariableDecl {
    #[must_use]
    pub fn flags(&self) -> u64 {
        self.mods.modifier_flags()
    }

    /// Implicitly typed lambda parameters and `var` locals have no declared
    /// type.
    #[must_use]
    pub fn is_implicitly_typed(&self) -> bool {
        self.vartype.is_none()
    }

    #[must_use]
    pub fn is_enum_constant(&self) -> bool {
        self.flags() & flags::ENUM != 0
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }
}

impl Case {
    #[must_use]
    pub fn is_rule(&self) -> bool {
        self.kind == CaseKind::Rule
    }

    /// Body of a `case ... ->` rule: an expression statement, block or throw.
    #[must_use]
    pub fn body(&self) -> Option<&Tree> {
        match self.kind {
            CaseKind::Rule => self.stats.first(),
            CaseKind::Statement => None,
        }
    }

    /// `true` for `default:` and for case labels containing `default`.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.labels
            .iter()
            .any(|label| matches!(label.kind, TreeKind::DefaultCaseLabel(_)))
    }
}

impl Lambda {
    #[must_use]
    pub fn body_kind(&self) -> LambdaBodyKind {
        match self.body.kind {
            TreeKind::Block(_) => LambdaBodyKind::Statement,
            _ => LambdaBodyKind::Expression,
        }
    }
}

impl NewArray {
    /// Initializer elements; empty when there is no `{...}` part.
    #[must_use]
    pub fn initializers(&self) -> &[Tree] {
        self.elems.as_deref().unwrap_or(&[])
    }
}
