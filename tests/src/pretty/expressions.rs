use javelin_ast::{
    Constant, TypeTag,
    builder::TreeBuilder,
    nodes::{BoundKind, ReferenceMode, Tag, Tree},
    pretty::{Pretty, PrettyConfig, to_simple_string},
};

use crate::utils::{local, render, render_stat};

fn names(make: &mut TreeBuilder, spellings: &[&str]) -> Vec<Tree> {
    spellings.iter().map(|s| make.name(s)).collect()
}

#[test]
fn test_expression_statement_ends_with_semicolon() {
    let mut make = TreeBuilder::new();
    let one = make.literal(1);
    let two = make.literal(2);
    let sum = make.binary(Tag::Plus, one, two);
    let stat = make.exec(sum);
    assert_eq!(render_stat(&stat), "1 + 2;");
    // printed as an expression, the statement has no terminator
    assert_eq!(render(&stat), "1 + 2");
}

#[test]
fn test_precedence_adds_only_needed_parentheses() {
    let mut make = TreeBuilder::new();

    // a + b * c
    let [a, b, c]: [Tree; 3] = names(&mut make, &["a", "b", "c"]).try_into().unwrap();
    let product = make.binary(Tag::Mul, b, c);
    let sum = make.binary(Tag::Plus, a, product);
    assert_eq!(render(&sum), "a + b * c");

    // (a + b) * c, built without a Parens node
    let [a, b, c]: [Tree; 3] = names(&mut make, &["a", "b", "c"]).try_into().unwrap();
    let sum = make.binary(Tag::Plus, a, b);
    let product = make.binary(Tag::Mul, sum, c);
    assert_eq!(render(&product), "(a + b) * c");

    // a - (b - c) versus a - b - c
    let [a, b, c]: [Tree; 3] = names(&mut make, &["a", "b", "c"]).try_into().unwrap();
    let inner = make.binary(Tag::Minus, b, c);
    let outer = make.binary(Tag::Minus, a, inner);
    assert_eq!(render(&outer), "a - (b - c)");

    let [a, b, c]: [Tree; 3] = names(&mut make, &["a", "b", "c"]).try_into().unwrap();
    let inner = make.binary(Tag::Minus, a, b);
    let outer = make.binary(Tag::Minus, inner, c);
    assert_eq!(render(&outer), "a - b - c");
}

#[test]
fn test_conditional_nests_to_the_right() {
    let mut make = TreeBuilder::new();
    let [a, b, c, d, e]: [Tree; 5] = names(&mut make, &["a", "b", "c", "d", "e"]).try_into().unwrap();
    let inner = make.conditional(c, d, e);
    let outer = make.conditional(a, b, inner);
    assert_eq!(render(&outer), "a ? b : c ? d : e");

    let [a, b, c, d, e]: [Tree; 5] = names(&mut make, &["a", "b", "c", "d", "e"]).try_into().unwrap();
    let inner = make.conditional(a, b, c);
    let outer = make.conditional(inner, d, e);
    assert_eq!(render(&outer), "(a ? b : c) ? d : e");
}

#[test]
fn test_assignments_associate_to_the_right() {
    let mut make = TreeBuilder::new();
    let [a, b, c]: [Tree; 3] = names(&mut make, &["a", "b", "c"]).try_into().unwrap();
    let inner = make.assign(b, c);
    let outer = make.assign(a, inner);
    assert_eq!(render(&outer), "a = b = c");

    // a + (b += 1)
    let [a, b]: [Tree; 2] = names(&mut make, &["a", "b"]).try_into().unwrap();
    let one = make.literal(1);
    let op = make.assignop(Tag::PlusAsg, b, one);
    let sum = make.binary(Tag::Plus, a, op);
    assert_eq!(render(&sum), "a + (b += 1)");
}

#[test]
fn test_unary_operators() {
    let mut make = TreeBuilder::new();
    let x = make.name("x");
    let inner = make.unary(Tag::Neg, x);
    let outer = make.unary(Tag::Neg, inner);
    assert_eq!(render(&outer), "- -x");

    let minus_one = make.literal(-1);
    let neg = make.unary(Tag::Neg, minus_one);
    assert_eq!(render(&neg), "- -1");

    let x = make.name("x");
    let dec = make.unary(Tag::PreDec, x);
    let neg = make.unary(Tag::Neg, dec);
    assert_eq!(render(&neg), "- --x");

    let [a, b]: [Tree; 2] = names(&mut make, &["a", "b"]).try_into().unwrap();
    let both = make.binary(Tag::And, a, b);
    let not = make.unary(Tag::Not, both);
    assert_eq!(render(&not), "!(a && b)");

    let i = make.name("i");
    let inc = make.unary(Tag::PostInc, i);
    assert_eq!(render(&inc), "i++");
}

#[test]
fn test_casts_bind_tighter_than_binary_operators() {
    let mut make = TreeBuilder::new();
    let int = make.type_ident(TypeTag::Int);
    let x = make.name("x");
    let cast = make.type_cast(int, x);
    let one = make.literal(1);
    let sum = make.binary(Tag::Plus, cast, one);
    assert_eq!(render(&sum), "(int)x + 1");

    let int = make.type_ident(TypeTag::Int);
    let x = make.name("x");
    let one = make.literal(1);
    let sum = make.binary(Tag::Plus, x, one);
    let cast = make.type_cast(int, sum);
    assert_eq!(render(&cast), "(int)(x + 1)");
}

#[test]
fn test_instanceof_with_binding_pattern() {
    let mut make = TreeBuilder::new();
    let o = make.name("o");
    let string = make.name("String");
    let var = local(&mut make, string, "s", None);
    let pattern = make.binding_pattern(var);
    let test = make.type_test(o, pattern);
    assert_eq!(render(&test), "o instanceof String s");

    let o = make.name("o");
    let string = make.name("String");
    let test = make.type_test(o, string);
    let flag = make.name("flag");
    let both = make.binary(Tag::And, test, flag);
    assert_eq!(render(&both), "o instanceof String && flag");
}

#[test]
fn test_literals_use_java_syntax() {
    let mut make = TreeBuilder::new();
    let cases: Vec<(Constant, &str)> = vec![
        (Constant::Int(42), "42"),
        (Constant::Long(7), "7L"),
        (Constant::Float(1.5), "1.5F"),
        (Constant::Double(2.0), "2.0"),
        (Constant::Double(1e20), "1.0E20"),
        (Constant::Double(f64::NAN), "(0.0/0.0)"),
        (Constant::Char('\n'), "'\\n'"),
        (Constant::Bool(true), "true"),
        (Constant::from("a\"b"), "\"a\\\"b\""),
        (Constant::Null, "null"),
    ];
    for (value, expected) in cases {
        let literal = make.literal(value);
        assert_eq!(render(&literal), expected);
    }

    let letter = make.literal_tagged(TypeTag::Char, Constant::Int(65));
    assert_eq!(render(&letter), "'A'");
}

#[test]
fn test_calls_selections_and_indexing() -> anyhow::Result<()> {
    let mut make = TreeBuilder::new();

    // Collections.<String>emptyList()
    let collections = make.qual_ident("Collections.emptyList")?;
    let string = make.name("String");
    let call = make.apply(vec![string], collections, Vec::new());
    assert_eq!(render(&call), "Collections.<String>emptyList()");

    // a[i].b(c, d)
    let [a, i]: [Tree; 2] = names(&mut make, &["a", "i"]).try_into().unwrap();
    let indexed = make.indexed(a, i);
    let b = make.intern("b");
    let select = make.select(indexed, b);
    let args = names(&mut make, &["c", "d"]);
    let call = make.app(select, args);
    assert_eq!(render(&call), "a[i].b(c, d)");
    Ok(())
}

#[test]
fn test_object_and_array_creation() {
    let mut make = TreeBuilder::new();

    let list = make.name("ArrayList");
    let diamond = make.type_apply(list, Vec::new());
    let creation = make.new_class(None, Vec::new(), diamond, Vec::new(), None);
    assert_eq!(render(&creation), "new ArrayList<>()");

    // new int[3][]
    let int = make.type_ident(TypeTag::Int);
    let elemtype = make.type_array(int);
    let three = make.literal(3);
    let array = make.new_array(Some(elemtype), vec![three], None);
    assert_eq!(render(&array), "new int[3][]");

    // new int[]{1, 2}
    let int = make.type_ident(TypeTag::Int);
    let elems = vec![make.literal(1), make.literal(2)];
    let array = make.new_array(Some(int), Vec::new(), Some(elems));
    assert_eq!(render(&array), "new int[]{1, 2}");

    // the bare initializer of `int[] xs = {1, 2}`
    let elems = vec![make.literal(1), make.literal(2)];
    let init = make.new_array(None, Vec::new(), Some(elems));
    assert_eq!(render(&init), "{1, 2}");
}

#[test]
fn test_lambdas_and_member_references() {
    let mut make = TreeBuilder::new();

    let params: Vec<Tree> = ["a", "b"]
        .iter()
        .map(|name| {
            let mods = make.modifiers_flags(0);
            let name = make.intern(name);
            make.var_def(mods, name, None, None)
        })
        .collect();
    let [a, b]: [Tree; 2] = names(&mut make, &["a", "b"]).try_into().unwrap();
    let sum = make.binary(Tag::Plus, a, b);
    let lambda = make.lambda(params, sum);
    assert_eq!(render(&lambda), "(a, b) -> a + b");

    let int = make.type_ident(TypeTag::Int);
    let param = local(&mut make, int, "x", None);
    let body = make.block(0, Vec::new());
    let lambda = make.lambda(vec![param], body);
    assert_eq!(render(&lambda), "(int x) -> {\n}");

    let string = make.name("String");
    let value_of = make.intern("valueOf");
    let reference = make.reference(ReferenceMode::Invoke, value_of, string, Vec::new());
    assert_eq!(render(&reference), "String::valueOf");

    let list = make.name("ArrayList");
    let init = make.names().init();
    let reference = make.reference(ReferenceMode::New, init, list, Vec::new());
    assert_eq!(render(&reference), "ArrayList::new");
}

#[test]
fn test_types() {
    let mut make = TreeBuilder::new();

    let int = make.type_ident(TypeTag::Int);
    let ints = make.type_array(int);
    let var = local(&mut make, ints, "xs", None);
    assert_eq!(render_stat(&var), "int[] xs;");

    let list = make.name("List");
    let kind = make.type_bound_kind(BoundKind::Extends);
    let number = make.name("Number");
    let wildcard = make.wildcard(kind, Some(number));
    let applied = make.type_apply(list, vec![wildcard]);
    assert_eq!(render(&applied), "List<? extends Number>");

    let list = make.name("List");
    let kind = make.type_bound_kind(BoundKind::Unbound);
    let wildcard = make.wildcard(kind, None);
    let applied = make.type_apply(list, vec![wildcard]);
    assert_eq!(render(&applied), "List<?>");

    let alternatives = names(&mut make, &["IOException", "SQLException"]);
    let union = make.type_union(alternatives);
    assert_eq!(render(&union), "IOException | SQLException");
}

#[test]
fn test_broken_trees_still_print() {
    let mut make = TreeBuilder::new();
    let err = make.erroneous_text("@@", "illegal character");
    let one = make.literal(1);
    let sum = make.binary(Tag::Plus, err, one);
    assert_eq!(render(&sum), "(ERROR) + 1");

    // a method with no return type
    let mods = make.modifiers_flags(0);
    let name = make.intern("run");
    let method = make.method_def(mods, name, None, Vec::new(), None, Vec::new(), Vec::new(), None, None);
    assert_eq!(render(&method), "/*missing*/ run();");
    assert_eq!(to_simple_string(&method, 40), " run();");
}

#[test]
fn test_simple_string_truncates_the_middle() {
    let mut make = TreeBuilder::new();
    let args = names(&mut make, &["argumentOne", "argumentTwo"]);
    let meth = make.name("method");
    let call = make.app(meth, args);
    assert_eq!(to_simple_string(&call, 80), "method(argumentOne, argumentTwo)");
    assert_eq!(to_simple_string(&call, 20), "method(arg[...]tTwo)");

    let printer = Pretty::new(Vec::new(), PrettyConfig::default());
    assert_eq!(printer.simple_string(&call), "method(arg[...]tTwo)");

    let body = make.block(0, vec![]);
    let cond = make.name("c");
    let stat = make.while_loop(cond, body);
    assert_eq!(to_simple_string(&stat, 40), "while (c) { }");
}

#[test]
fn test_display_matches_expression_rendering() {
    let mut make = TreeBuilder::new();
    let [a, b]: [Tree; 2] = names(&mut make, &["a", "b"]).try_into().unwrap();
    let less = make.binary(Tag::Lt, a, b);
    assert_eq!(less.to_string(), "a < b");
    assert_eq!(format!("[{less}]"), "[a < b]");
}
