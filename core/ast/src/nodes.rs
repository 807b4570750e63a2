use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    enums_impl::{Constant, TypeTag},
    names::Name,
    position::{EndPosTable, LineMap, Pos},
    semantic::{SymbolHandle, TypeHandle},
};

/// Stable identity of a tree node within one compilation unit.
///
/// Identities are handed out by [`crate::builder::TreeBuilder`] starting at 1.
/// Side tables ([`EndPosTable`], [`crate::tables::JumpTargets`],
/// [`crate::tables::DocComments`]) are keyed by it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Identity of the transient placeholder swapped into a slot while the
    /// slot's owner is being rewritten. Never assigned by a builder.
    pub const DUMMY: NodeId = NodeId(0);

    #[must_use]
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant of a tree node.
///
/// Structural kinds have one tag each. Unary, binary and compound-assignment
/// nodes are tagged with their operator, so the tag alone is enough to pick a
/// precedence level or an operator spelling.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Tag {
    TopLevel,
    PackageDef,
    Import,
    ClassDef,
    MethodDef,
    VarDef,
    Skip,
    Block,
    DoLoop,
    WhileLoop,
    ForLoop,
    ForeachLoop,
    Labelled,
    Switch,
    Case,
    SwitchExpression,
    Synchronized,
    Try,
    Catch,
    CondExpr,
    If,
    Exec,
    Break,
    Yield,
    Continue,
    Return,
    Throw,
    Assert,
    Apply,
    NewClass,
    NewArray,
    Lambda,
    Parens,
    Assign,
    TypeCast,
    TypeTest,
    BindingPattern,
    DefaultCaseLabel,
    GuardPattern,
    ParenthesizedPattern,
    Indexed,
    Select,
    Reference,
    Ident,
    Literal,
    TypeIdent,
    TypeArray,
    TypeApply,
    TypeUnion,
    TypeIntersection,
    TypeParameter,
    Wildcard,
    TypeBoundKind,
    Annotation,
    TypeAnnotation,
    Modifiers,
    AnnotatedType,
    Erroneous,

    // unary operators
    Pos,
    Neg,
    Not,
    Compl,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
    NullChk,

    // binary operators
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Sl,
    Sr,
    Usr,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,

    // compound assignment operators
    BitOrAsg,
    BitXorAsg,
    BitAndAsg,
    SlAsg,
    SrAsg,
    UsrAsg,
    PlusAsg,
    MinusAsg,
    MulAsg,
    DivAsg,
    ModAsg,

    ModuleDef,
    Exports,
    Opens,
    Provides,
    Requires,
    Uses,

    LetExpr,
}

/// Whether an expression's type depends on its context.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum PolyKind {
    #[default]
    Standalone,
    Poly,
}

/// `case L:` statement groups versus `case L ->` rules.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CaseKind {
    Statement,
    Rule,
}

/// Whether lambda parameters carry declared types.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ParameterKind {
    Implicit,
    Explicit,
}

/// `expr::name` versus `Type::new`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ReferenceMode {
    Invoke,
    New,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BoundKind {
    Extends,
    Super,
    Unbound,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ModuleKind {
    Open,
    Strong,
}

/// What kind of type a [`ClassDecl`] declares, read from its modifier flags.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// Whether a lambda body is an expression or a block.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LambdaBodyKind {
    Expression,
    Statement,
}

/// Operand selector for unary, binary and compound-assignment expressions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum OperandPos {
    Left,
    Right,
}

/// A syntax tree node.
///
/// `pos` is the anchor offset stamped by the builder; it is not necessarily
/// where the construct starts or ends (see [`crate::position`]). `ty` is
/// written by attribution and never read by this crate.
#[derive(Debug)]
pub struct Tree {
    pub id: NodeId,
    pub pos: Pos,
    pub ty: Option<TypeHandle>,
    pub kind: TreeKind,
}

macro_rules! tree_kinds {
    (
        $(
            $(#[$outer:meta])*
            pub struct $name:ident { $($fields:tt)* }
        )+
    ) => {
        $(
            $(#[$outer])*
            #[derive(Debug)]
            pub struct $name { $($fields)* }

            impl From<$name> for TreeKind {
                fn from(node: $name) -> Self {
                    TreeKind::$name(node)
                }
            }
        )+

        /// The variant-specific shape of a [`Tree`].
        #[derive(Debug)]
        pub enum TreeKind {
            $(
                $name($name),
            )+
        }

        impl TreeKind {
            /// Name of the node shape, for diagnostics and internal errors.
            #[must_use]
            pub fn kind_name(&self) -> &'static str {
                match self {
                    $(
                        TreeKind::$name(_) => stringify!($name),
                    )+
                }
            }
        }
    };
}

tree_kinds! {

    /// One source file.
    pub struct TopLevel {
        pub defs: Vec<Tree>,
        pub source_file: Option<String>,
        pub end_positions: Option<EndPosTable>,
        pub line_map: Option<LineMap>,
    }

    pub struct PackageDecl {
        pub annotations: Vec<Tree>,
        pub pid: Box<Tree>,
        pub sym: Option<SymbolHandle>,
    }

    pub struct Import {
        pub qualid: Box<Tree>,
        pub static_import: bool,
    }

    /// Class, interface, enum, record and annotation type declarations.
    pub struct ClassDecl {
        pub mods: Box<Tree>,
        pub name: Name,
        pub typarams: Vec<Tree>,
        pub extending: Option<Box<Tree>>,
        pub implementing: Vec<Tree>,
        pub permitting: Vec<Tree>,
        pub defs: Vec<Tree>,
        pub sym: Option<SymbolHandle>,
    }

    /// Method and constructor declarations. Constructors are named `<init>`
    /// and have no result type.
    pub struct MethodDecl {
        pub mods: Box<Tree>,
        pub name: Name,
        pub restype: Option<Box<Tree>>,
        pub typarams: Vec<Tree>,
        pub recvparam: Option<Box<Tree>>,
        pub params: Vec<Tree>,
        pub thrown: Vec<Tree>,
        pub body: Option<Box<Tree>>,
        pub default_value: Option<Box<Tree>>,
        pub sym: Option<SymbolHandle>,
    }

    /// Fields, locals, parameters, resources and enum constants.
    pub struct VariableDecl {
        pub mods: Box<Tree>,
        pub name: Name,
        /// Qualified receiver name, only for receiver parameters.
        pub nameexpr: Option<Box<Tree>>,
        /// Absent for implicitly typed lambda parameters and `var` locals.
        pub vartype: Option<Box<Tree>>,
        pub init: Option<Box<Tree>>,
        pub start_pos: Pos,
        pub declared_using_var: bool,
        pub sym: Option<SymbolHandle>,
    }

    pub struct Skip {}

    pub struct Block {
        pub flags: u64,
        pub stats: Vec<Tree>,
        /// Offset of the closing brace.
        pub endpos: Pos,
    }

    pub struct DoWhileLoop {
        pub body: Box<Tree>,
        pub cond: Box<Tree>,
    }

    pub struct WhileLoop {
        pub cond: Box<Tree>,
        pub body: Box<Tree>,
    }

    pub struct ForLoop {
        pub init: Vec<Tree>,
        pub cond: Option<Box<Tree>>,
        pub step: Vec<Tree>,
        pub body: Box<Tree>,
    }

    pub struct EnhancedForLoop {
        pub var: Box<Tree>,
        pub expr: Box<Tree>,
        pub body: Box<Tree>,
    }

    pub struct LabeledStatement {
        pub label: Name,
        pub body: Box<Tree>,
    }

    pub struct Switch {
        pub selector: Box<Tree>,
        pub cases: Vec<Tree>,
        pub endpos: Pos,
        pub has_total_pattern: bool,
        pub pattern_switch: bool,
    }

    /// A `case`/`default` group. For rules, `stats` holds exactly the rule body.
    pub struct Case {
        pub kind: CaseKind,
        pub labels: Vec<Tree>,
        pub stats: Vec<Tree>,
        pub completes_normally: bool,
    }

    pub struct SwitchExpression {
        pub selector: Box<Tree>,
        pub cases: Vec<Tree>,
        pub endpos: Pos,
        pub has_total_pattern: bool,
        pub pattern_switch: bool,
        pub poly_kind: PolyKind,
    }

    pub struct Synchronized {
        pub lock: Box<Tree>,
        pub body: Box<Tree>,
    }

    pub struct Try {
        pub resources: Vec<Tree>,
        pub body: Box<Tree>,
        pub catchers: Vec<Tree>,
        pub finalizer: Option<Box<Tree>>,
        pub finally_can_complete_normally: bool,
    }

    pub struct Catch {
        pub param: Box<Tree>,
        pub body: Box<Tree>,
    }

    pub struct Conditional {
        pub cond: Box<Tree>,
        pub truepart: Box<Tree>,
        pub falsepart: Box<Tree>,
        pub poly_kind: PolyKind,
    }

    pub struct If {
        pub cond: Box<Tree>,
        pub thenpart: Box<Tree>,
        pub elsepart: Option<Box<Tree>>,
    }

    pub struct ExpressionStatement {
        pub expr: Box<Tree>,
    }

    /// The jump target is kept in [`crate::tables::JumpTargets`].
    pub struct Break {
        pub label: Option<Name>,
    }

    pub struct Yield {
        pub value: Box<Tree>,
    }

    pub struct Continue {
        pub label: Option<Name>,
    }

    pub struct Return {
        pub expr: Option<Box<Tree>>,
    }

    pub struct Throw {
        pub expr: Box<Tree>,
    }

    pub struct Assert {
        pub cond: Box<Tree>,
        pub detail: Option<Box<Tree>>,
    }

    pub struct MethodInvocation {
        pub typeargs: Vec<Tree>,
        pub meth: Box<Tree>,
        pub args: Vec<Tree>,
        pub varargs_element: Option<TypeHandle>,
        pub poly_kind: PolyKind,
    }

    pub struct NewClass {
        pub encl: Option<Box<Tree>>,
        pub typeargs: Vec<Tree>,
        pub clazz: Box<Tree>,
        pub args: Vec<Tree>,
        /// Anonymous class body.
        pub def: Option<Box<Tree>>,
        pub constructor: Option<SymbolHandle>,
        pub varargs_element: Option<TypeHandle>,
        pub poly_kind: PolyKind,
    }

    pub struct NewArray {
        pub elemtype: Option<Box<Tree>>,
        pub dims: Vec<Tree>,
        pub annotations: Vec<Tree>,
        pub dim_annotations: Vec<Vec<Tree>>,
        /// Initializer elements; `None` when there is no `{...}` part.
        pub elems: Option<Vec<Tree>>,
    }

    pub struct Lambda {
        pub params: Vec<Tree>,
        pub body: Box<Tree>,
        pub param_kind: ParameterKind,
        pub can_complete_normally: bool,
        pub target: Option<TypeHandle>,
    }

    pub struct Parens {
        pub expr: Box<Tree>,
    }

    pub struct Assign {
        pub lhs: Box<Tree>,
        pub rhs: Box<Tree>,
    }

    pub struct AssignOp {
        pub opcode: Tag,
        pub lhs: Box<Tree>,
        pub rhs: Box<Tree>,
        pub operator: Option<SymbolHandle>,
    }

    pub struct Unary {
        pub opcode: Tag,
        pub arg: Box<Tree>,
        pub operator: Option<SymbolHandle>,
    }

    pub struct Binary {
        pub opcode: Tag,
        pub lhs: Box<Tree>,
        pub rhs: Box<Tree>,
        pub operator: Option<SymbolHandle>,
    }

    pub struct TypeCast {
        pub clazz: Box<Tree>,
        pub expr: Box<Tree>,
    }

    /// `expr instanceof pattern`, where the pattern may also be a plain type.
    pub struct InstanceOf {
        pub expr: Box<Tree>,
        pub pattern: Box<Tree>,
    }

    pub struct BindingPattern {
        pub var: Box<Tree>,
    }

    pub struct DefaultCaseLabel {}

    pub struct ParenthesizedPattern {
        pub pattern: Box<Tree>,
    }

    pub struct GuardPattern {
        pub patt: Box<Tree>,
        pub expr: Box<Tree>,
    }

    pub struct ArrayAccess {
        pub indexed: Box<Tree>,
        pub index: Box<Tree>,
    }

    pub struct FieldAccess {
        pub selected: Box<Tree>,
        pub name: Name,
        pub sym: Option<SymbolHandle>,
    }

    pub struct MemberReference {
        pub mode: ReferenceMode,
        pub name: Name,
        pub expr: Box<Tree>,
        pub typeargs: Vec<Tree>,
        pub sym: Option<SymbolHandle>,
        pub target: Option<TypeHandle>,
    }

    pub struct Ident {
        pub name: Name,
        pub sym: Option<SymbolHandle>,
    }

    pub struct Literal {
        pub typetag: TypeTag,
        pub value: Constant,
    }

    pub struct PrimitiveType {
        pub typetag: TypeTag,
    }

    pub struct ArrayType {
        pub elemtype: Box<Tree>,
    }

    pub struct TypeApply {
        pub clazz: Box<Tree>,
        pub arguments: Vec<Tree>,
    }

    pub struct TypeUnion {
        pub alternatives: Vec<Tree>,
    }

    pub struct TypeIntersection {
        pub bounds: Vec<Tree>,
    }

    pub struct TypeParameter {
        pub name: Name,
        pub bounds: Vec<Tree>,
        pub annotations: Vec<Tree>,
    }

    pub struct Wildcard {
        /// A [`TypeBoundKind`] node.
        pub kind: Box<Tree>,
        pub inner: Option<Box<Tree>>,
    }

    pub struct TypeBoundKind {
        pub kind: BoundKind,
    }

    pub struct Annotation {
        pub annotation_type: Box<Tree>,
        pub args: Vec<Tree>,
        pub is_type_annotation: bool,
    }

    pub struct Modifiers {
        pub flags: u64,
        pub annotations: Vec<Tree>,
    }

    pub struct AnnotatedType {
        pub annotations: Vec<Tree>,
        pub underlying_type: Box<Tree>,
    }

    /// Placeholder for a syntactically broken fragment.
    pub struct Erroneous {
        pub errs: Vec<Tree>,
        pub text: Option<String>,
        pub message: Option<String>,
    }

    pub struct ModuleDecl {
        pub mods: Box<Tree>,
        pub kind: ModuleKind,
        pub qual_id: Box<Tree>,
        pub directives: Vec<Tree>,
        pub sym: Option<SymbolHandle>,
    }

    pub struct Exports {
        pub qualid: Box<Tree>,
        pub module_names: Vec<Tree>,
    }

    pub struct Opens {
        pub qualid: Box<Tree>,
        pub module_names: Vec<Tree>,
    }

    pub struct Provides {
        pub service_name: Box<Tree>,
        pub impl_names: Vec<Tree>,
    }

    pub struct Requires {
        pub is_transitive: bool,
        pub is_static_phase: bool,
        pub module_name: Box<Tree>,
    }

    pub struct Uses {
        pub qualid: Box<Tree>,
    }

    /// Synthetic `(let defs in expr)` produced by desugaring.
    pub struct LetExpr {
        pub defs: Vec<Tree>,
        pub expr: Box<Tree>,
        pub needs_cond: bool,
    }
}

/// Invokes `$callback!` with every tree kind paired with the name of its
/// visitor method and translator method.
macro_rules! for_each_tree_kind {
    ($callback:ident) => {
        $callback! {
            TopLevel => visit_top_level, translate_top_level;
            PackageDecl => visit_package_decl, translate_package_decl;
            Import => visit_import, translate_import;
            ClassDecl => visit_class_decl, translate_class_decl;
            MethodDecl => visit_method_decl, translate_method_decl;
            VariableDecl => visit_variable_decl, translate_variable_decl;
            Skip => visit_skip, translate_skip;
            Block => visit_block, translate_block;
            DoWhileLoop => visit_do_while_loop, translate_do_while_loop;
            WhileLoop => visit_while_loop, translate_while_loop;
            ForLoop => visit_for_loop, translate_for_loop;
            EnhancedForLoop => visit_enhanced_for_loop, translate_enhanced_for_loop;
            LabeledStatement => visit_labeled_statement, translate_labeled_statement;
            Switch => visit_switch, translate_switch;
            Case => visit_case, translate_case;
            SwitchExpression => visit_switch_expression, translate_switch_expression;
            Synchronized => visit_synchronized, translate_synchronized;
            Try => visit_try, translate_try;
            Catch => visit_catch, translate_catch;
            Conditional => visit_conditional, translate_conditional;
            If => visit_if, translate_if;
            ExpressionStatement => visit_expression_statement, translate_expression_statement;
            Break => visit_break, translate_break;
            Yield => visit_yield, translate_yield;
            Continue => visit_continue, translate_continue;
            Return => visit_return, translate_return;
            Throw => visit_throw, translate_throw;
            Assert => visit_assert, translate_assert;
            MethodInvocation => visit_method_invocation, translate_method_invocation;
            NewClass => visit_new_class, translate_new_class;
            NewArray => visit_new_array, translate_new_array;
            Lambda => visit_lambda, translate_lambda;
            Parens => visit_parens, translate_parens;
            Assign => visit_assign, translate_assign;
            AssignOp => visit_assign_op, translate_assign_op;
            Unary => visit_unary, translate_unary;
            Binary => visit_binary, translate_binary;
            TypeCast => visit_type_cast, translate_type_cast;
            InstanceOf => visit_instance_of, translate_instance_of;
            BindingPattern => visit_binding_pattern, translate_binding_pattern;
            DefaultCaseLabel => visit_default_case_label, translate_default_case_label;
            ParenthesizedPattern => visit_parenthesized_pattern, translate_parenthesized_pattern;
            GuardPattern => visit_guard_pattern, translate_guard_pattern;
            ArrayAccess => visit_array_access, translate_array_access;
            FieldAccess => visit_field_access, translate_field_access;
            MemberReference => visit_member_reference, translate_member_reference;
            Ident => visit_ident, translate_ident;
            Literal => visit_literal, translate_literal;
            PrimitiveType => visit_primitive_type, translate_primitive_type;
            ArrayType => visit_array_type, translate_array_type;
            TypeApply => visit_type_apply, translate_type_apply;
            TypeUnion => visit_type_union, translate_type_union;
            TypeIntersection => visit_type_intersection, translate_type_intersection;
            TypeParameter => visit_type_parameter, translate_type_parameter;
            Wildcard => visit_wildcard, translate_wildcard;
            TypeBoundKind => visit_type_bound_kind, translate_type_bound_kind;
            Annotation => visit_annotation, translate_annotation;
            Modifiers => visit_modifiers, translate_modifiers;
            AnnotatedType => visit_annotated_type, translate_annotated_type;
            Erroneous => visit_erroneous, translate_erroneous;
            ModuleDecl => visit_module_decl, translate_module_decl;
            Exports => visit_exports, translate_exports;
            Opens => visit_opens, translate_opens;
            Provides => visit_provides, translate_provides;
            Requires => visit_requires, translate_requires;
            Uses => visit_uses, translate_uses;
            LetExpr => visit_let_expr, translate_let_expr;
        }
    };
}
