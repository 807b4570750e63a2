use javelin_ast::{
    Constant, TypeTag,
    builder::TreeBuilder,
    flags,
    nodes::{CaseKind, ClassKind, LambdaBodyKind, NodeId, OperandPos, PolyKind, Tag, Tree, TreeKind},
    semantic::SymbolHandle,
    tree_info,
};

use crate::utils::{ident_name, local, no_mods, public_class};

#[test]
fn test_operator_tags_classify() {
    assert!(Tag::Neg.is_unary_op());
    assert!(Tag::PostInc.is_post_unary_op());
    assert!(!Tag::PreInc.is_post_unary_op());
    assert!(Tag::PreDec.is_inc_or_dec_unary_op());
    assert!(Tag::Usr.is_binary_op());
    assert!(Tag::UsrAsg.is_assignop());
    assert!(!Tag::Assign.is_assignop());
    assert!(!Tag::Ident.is_operator());
}

#[test]
fn test_assignment_operators_map_to_binary_and_back() {
    assert_eq!(Tag::PlusAsg.no_assign_op(), Tag::Plus);
    assert_eq!(Tag::UsrAsg.no_assign_op(), Tag::Usr);
    assert_eq!(Tag::Mod.assign_op(), Some(Tag::ModAsg));
    assert_eq!(Tag::Or.assign_op(), None);
    assert_eq!(Tag::BitXorAsg.operator_name(), Some("^="));
    assert_eq!(Tag::NullChk.operator_name(), Some("<*nullchk*>"));
}

#[test]
#[should_panic(expected = "not a compound assignment")]
fn test_no_assign_op_rejects_plain_operators() {
    let _ = Tag::Plus.no_assign_op();
}

#[test]
fn test_tree_tag_follows_operator() {
    let mut make = TreeBuilder::new();
    let a = make.name("a");
    let b = make.name("b");
    let lt = make.binary(Tag::Lt, a, b);
    assert_eq!(lt.tag(), Tag::Lt);
    assert!(lt.has_tag(Tag::Lt));
    assert!(lt.is_operator_expression());

    let x = make.name("x");
    let inc = make.unary(Tag::PostInc, x);
    assert_eq!(inc.tag(), Tag::PostInc);

    let block = make.block(0, Vec::new());
    assert_eq!(block.tag(), Tag::Block);
    assert!(!block.is_operator_expression());
}

#[test]
fn test_operands_of_binary_and_unary() {
    let mut make = TreeBuilder::new();
    let a = make.name("a");
    let b = make.name("b");
    let mut sum = make.binary(Tag::Plus, a, b);
    assert_eq!(ident_name(sum.operand(OperandPos::Left)), "a");
    assert_eq!(ident_name(sum.operand(OperandPos::Right)), "b");

    *sum.operand_mut(OperandPos::Right) = make.name("c");
    assert_eq!(ident_name(sum.operand(OperandPos::Right)), "c");

    let x = make.name("x");
    let neg = make.unary(Tag::Neg, x);
    assert_eq!(ident_name(neg.operand(OperandPos::Left)), "x");
    assert_eq!(ident_name(neg.operand(OperandPos::Right)), "x");
}

#[test]
#[should_panic(expected = "is not an operator expression")]
fn test_operand_of_non_operator_panics() {
    let mut make = TreeBuilder::new();
    let ident = make.name("a");
    let _ = ident.operand(OperandPos::Left);
}

#[test]
fn test_operator_symbol_is_attached() {
    let mut make = TreeBuilder::new();
    let a = make.name("a");
    let b = make.name("b");
    let mut sum = make.binary(Tag::Plus, a, b);
    assert!(sum.operator_symbol().is_none());
    sum.set_operator_symbol(SymbolHandle::new("int +(int, int)"));
    let symbol = sum.operator_symbol().unwrap();
    assert_eq!(symbol.downcast_ref::<&str>(), Some(&"int +(int, int)"));
}

#[test]
#[should_panic(expected = "Ident is not an operator expression")]
fn test_operator_symbol_on_non_operator_panics() {
    let mut make = TreeBuilder::new();
    let mut ident = make.name("a");
    ident.set_operator_symbol(SymbolHandle::new("int +(int, int)"));
}

#[test]
fn test_poly_kind_of_expressions() {
    let mut make = TreeBuilder::new();
    let meth = make.name("f");
    let mut call = make.app(meth, Vec::new());
    assert!(call.is_standalone());
    call.set_poly_kind(PolyKind::Poly);
    assert!(call.is_poly_expression());
    assert_eq!(call.poly_kind(), Some(PolyKind::Poly));

    let x = make.name("x");
    let mods = no_mods(&mut make);
    let name = make.intern("x");
    let param = make.var_def(mods, name, None, None);
    let mut lambda = make.lambda(vec![param], x);
    assert!(lambda.is_poly_expression());
    lambda.set_poly_kind(PolyKind::Standalone);
    assert!(lambda.is_poly_expression());

    let ident = make.name("y");
    assert_eq!(ident.poly_kind(), None);
}

#[test]
#[should_panic(expected = "is not a poly expression")]
fn test_set_poly_kind_on_ident_panics() {
    let mut make = TreeBuilder::new();
    let mut ident = make.name("y");
    ident.set_poly_kind(PolyKind::Poly);
}

#[test]
fn test_compilation_unit_queries() -> anyhow::Result<()> {
    let mut make = TreeBuilder::new();
    let pid = make.qual_ident("com.example")?;
    let package = make.package_decl(Vec::new(), pid);
    let list = make.qual_ident("java.util.List")?;
    let import = make.import(list, false);
    let class = public_class(&mut make, "Main", Vec::new());
    let skip = make.skip();
    let unit = make.top_level(vec![package, import, skip, class]);

    let TreeKind::TopLevel(unit) = &unit.kind else {
        panic!("expected a compilation unit");
    };
    assert_eq!(unit.package().map(Tree::tag), Some(Tag::PackageDef));
    assert_eq!(unit.imports().count(), 1);
    assert!(!unit.imports().next().unwrap().static_import);
    let decls: Vec<_> = unit.type_decls().map(Tree::tag).collect();
    assert_eq!(decls, vec![Tag::ClassDef]);
    assert!(unit.module_decl().is_none());
    Ok(())
}

#[test]
fn test_class_kind_from_flags() {
    let mut make = TreeBuilder::new();
    let kinds = [
        (0, ClassKind::Class),
        (flags::INTERFACE, ClassKind::Interface),
        (flags::INTERFACE | flags::ANNOTATION, ClassKind::Annotation),
        (flags::ENUM, ClassKind::Enum),
        (flags::RECORD | flags::FINAL, ClassKind::Record),
    ];
    for (bits, expected) in kinds {
        let mods = make.modifiers_flags(bits);
        let name = make.intern("T");
        let class = make.class_def(mods, name, Vec::new(), None, Vec::new(), Vec::new(), Vec::new());
        let TreeKind::ClassDecl(decl) = &class.kind else {
            panic!("expected a class declaration");
        };
        assert_eq!(decl.class_kind(), expected);
        assert!(!decl.is_anonymous());
    }
}

#[test]
fn test_case_rule_body_and_default() {
    let mut make = TreeBuilder::new();
    let one = make.literal(1);
    let target = make.name("a");
    let body = make.exec(target);
    let rule = make.case_rule(vec![one], body);
    let TreeKind::Case(rule) = &rule.kind else {
        panic!("expected a case");
    };
    assert!(rule.is_rule());
    assert_eq!(rule.body().map(Tree::tag), Some(Tag::Exec));
    assert!(!rule.is_default());

    let label = make.default_case_label();
    let brk = make.break_(None);
    let group = make.case(CaseKind::Statement, vec![label], vec![brk]);
    let TreeKind::Case(group) = &group.kind else {
        panic!("expected a case");
    };
    assert!(group.body().is_none());
    assert!(group.is_default());
}

#[test]
fn test_lambda_parameter_and_body_kinds() {
    let mut make = TreeBuilder::new();
    let int = make.type_ident(TypeTag::Int);
    let explicit = local(&mut make, int, "x", None);
    let body = make.block(0, Vec::new());
    let lambda = make.lambda(vec![explicit], body);
    let TreeKind::Lambda(lambda) = &lambda.kind else {
        panic!("expected a lambda");
    };
    assert_eq!(lambda.param_kind, javelin_ast::nodes::ParameterKind::Explicit);
    assert_eq!(lambda.body_kind(), LambdaBodyKind::Statement);
}

#[test]
fn test_literal_values_and_tags() {
    let mut make = TreeBuilder::new();
    let cases = [
        (make.literal(1), TypeTag::Int),
        (make.literal(1_i64), TypeTag::Long),
        (make.literal(1.5_f32), TypeTag::Float),
        (make.literal(1.5_f64), TypeTag::Double),
        (make.literal('c'), TypeTag::Char),
        (make.literal(true), TypeTag::Boolean),
        (make.literal("s"), TypeTag::Class),
        (make.literal(Constant::Null), TypeTag::Bot),
    ];
    for (tree, tag) in cases {
        let TreeKind::Literal(literal) = &tree.kind else {
            panic!("expected a literal");
        };
        assert_eq!(literal.typetag, tag);
    }

    let c = make.literal_tagged(TypeTag::Char, Constant::Int(65));
    let TreeKind::Literal(c) = &c.kind else {
        panic!("expected a literal");
    };
    assert_eq!(c.value, Constant::Char('A'));
}

#[test]
fn test_dummy_tree_and_take() {
    let mut make = TreeBuilder::new();
    let mut slot = make.name("a");
    let id = slot.id;
    let taken = Tree::take(&mut slot);
    assert_eq!(taken.id, id);
    assert!(slot.is_dummy());
    assert_eq!(slot.id, NodeId::DUMMY);
}

#[test]
fn test_tree_info_queries() -> anyhow::Result<()> {
    let mut make = TreeBuilder::new();
    let a = make.name("a");
    let parens = make.parens(a);
    let nested = make.parens(parens);
    assert_eq!(tree_info::skip_parens(&nested).tag(), Tag::Ident);

    let dotted = make.qual_ident("java.lang.String")?;
    assert_eq!(tree_info::full_name(&dotted).as_deref(), Some("java.lang.String"));
    assert_eq!(tree_info::name(&dotted).map(|n| n.as_str()), Some("String"));

    let null = make.literal(Constant::Null);
    assert!(tree_info::is_null(&null));

    let this = make.name("this");
    let call = make.app(this, Vec::new());
    assert!(tree_info::is_expression_statement(&call));
    let stat = make.exec(call);
    assert!(tree_info::is_self_or_super_call(&stat));
    assert!(!tree_info::is_expression_statement(&stat));
    Ok(())
}
