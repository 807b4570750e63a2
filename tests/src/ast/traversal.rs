use javelin_ast::{
    Constant,
    builder::TreeBuilder,
    nodes::{Binary, Ident, Literal, Tag, Tree, TreeKind},
    translator::{self, TreeTranslator},
    visitor::Visitor,
};

use crate::utils::{Collect, call_stat, ident_name};

#[test]
fn test_scan_visits_children_in_source_order() {
    // while (i < n) { f(i); i++; }
    let mut make = TreeBuilder::new();
    let i = make.name("i");
    let n = make.name("n");
    let cond = make.binary(Tag::Lt, i, n);
    let arg = make.name("i");
    let call = call_stat(&mut make, "f", vec![arg]);
    let i = make.name("i");
    let inc = make.unary(Tag::PostInc, i);
    let step = make.exec(inc);
    let body = make.block(0, vec![call, step]);
    let lp = make.while_loop(cond, body);

    let collected = Collect::of(&lp);
    assert_eq!(
        collected.kinds,
        vec![
            "WhileLoop",
            "Binary",
            "Ident",
            "Ident",
            "Block",
            "ExpressionStatement",
            "MethodInvocation",
            "Ident",
            "Ident",
            "ExpressionStatement",
            "Unary",
            "Ident",
        ]
    );
}

#[test]
fn test_scan_does_not_follow_jump_targets() {
    let mut make = TreeBuilder::new();
    let label = make.intern("outer");
    let brk = make.break_(Some(label.clone()));
    let body = make.block(0, vec![brk]);
    let cond = make.literal(true);
    let lp = make.while_loop(cond, body);
    let labelled = make.labelled(label, lp);
    let collected = Collect::of(&labelled);
    assert_eq!(collected.kinds.len(), 5);
    assert_eq!(collected.kinds.last(), Some(&"Break"));
}

struct Identity;

impl TreeTranslator for Identity {}

#[test]
fn test_identity_translation_keeps_nodes_and_allocations() {
    let mut make = TreeBuilder::new();
    let a = make.name("a");
    let b = make.name("b");
    let product = make.binary(Tag::Mul, a, b);
    let c = make.name("c");
    let sum = make.binary(Tag::Plus, product, c);

    let before = Collect::of(&sum).ids;
    let TreeKind::Binary(node) = &sum.kind else {
        panic!("expected a binary expression");
    };
    let lhs_addr: *const Tree = &*node.lhs;
    let rhs_addr: *const Tree = &*node.rhs;

    let sum = Identity.translate(sum);

    assert_eq!(Collect::of(&sum).ids, before);
    let TreeKind::Binary(node) = &sum.kind else {
        panic!("expected a binary expression");
    };
    assert!(std::ptr::eq(&*node.lhs, lhs_addr));
    assert!(std::ptr::eq(&*node.rhs, rhs_addr));
}

/// Folds `int + int` into a single literal.
struct FoldSums<'b> {
    make: &'b mut TreeBuilder,
}

impl TreeTranslator for FoldSums<'_> {
    fn translate_binary(&mut self, tree: Tree) -> Tree {
        let tree = translator::walk_children(self, tree);
        if let TreeKind::Binary(Binary {
            opcode: Tag::Plus,
            lhs,
            rhs,
            ..
        }) = &tree.kind
        {
            if let (TreeKind::Literal(l), TreeKind::Literal(r)) = (&lhs.kind, &rhs.kind) {
                if let (Constant::Int(l), Constant::Int(r)) = (&l.value, &r.value) {
                    let value = l + r;
                    return self.make.at(tree.pos).literal(value);
                }
            }
        }
        tree
    }
}

#[test]
fn test_translation_replaces_subtrees_bottom_up() {
    // f(1 + 2 + 3, x + 1)
    let mut make = TreeBuilder::new();
    let one = make.literal(1);
    let two = make.literal(2);
    let three = make.literal(3);
    let inner = make.binary(Tag::Plus, one, two);
    let outer = make.binary(Tag::Plus, inner, three);
    let x = make.name("x");
    let one = make.literal(1);
    let partial = make.binary(Tag::Plus, x, one);
    let meth = make.name("f");
    let call = make.app(meth, vec![outer, partial]);
    let call_id = call.id;

    let call = FoldSums { make: &mut make }.translate(call);

    assert_eq!(call.id, call_id);
    let TreeKind::MethodInvocation(node) = &call.kind else {
        panic!("expected a call");
    };
    match &node.args[0].kind {
        TreeKind::Literal(literal) => assert_eq!(literal.value, Constant::Int(6)),
        other => panic!("expected a folded literal, found {}", other.kind_name()),
    }
    assert_eq!(node.args[1].tag(), Tag::Plus);
}

/// Renders identifiers and `+` only; anything else reaches the panicking
/// fallback.
struct Spell;

impl Visitor<()> for Spell {
    type Output = String;

    fn visit_ident(&mut self, _tree: &Tree, node: &Ident, _p: ()) -> String {
        node.name.to_string()
    }

    fn visit_literal(&mut self, _tree: &Tree, node: &Literal, _p: ()) -> String {
        node.value.to_string()
    }

    fn visit_binary(&mut self, _tree: &Tree, node: &Binary, _p: ()) -> String {
        format!("({} {} {})", node.lhs.accept(self, ()), node.opcode.operator_name().unwrap(), node.rhs.accept(self, ()))
    }
}

#[test]
fn test_visitor_dispatches_on_shape() {
    let mut make = TreeBuilder::new();
    let a = make.name("a");
    let one = make.literal(1);
    let sum = make.binary(Tag::Plus, a, one);
    let b = make.name("b");
    let product = make.binary(Tag::Mul, sum, b);
    assert_eq!(product.accept(&mut Spell, ()), "((a + 1) * b)");
}

#[test]
#[should_panic(expected = "Parens reached a visitor with no case for it")]
fn test_visitor_without_case_panics() {
    let mut make = TreeBuilder::new();
    let a = make.name("a");
    let parens = make.parens(a);
    let _ = parens.accept(&mut Spell, ());
}

#[test]
fn test_walk_children_resumes_default_descent() {
    struct Rename;
    impl TreeTranslator for Rename {
        fn translate_ident(&mut self, mut tree: Tree) -> Tree {
            if let TreeKind::Ident(ident) = &mut tree.kind {
                if ident.name.as_str() == "old" {
                    let mut make = TreeBuilder::new();
                    ident.name = make.intern("new");
                }
            }
            tree
        }
    }

    let mut make = TreeBuilder::new();
    let old = make.name("old");
    let parens = make.parens(old);
    let parens = Rename.translate(parens);
    let TreeKind::Parens(node) = &parens.kind else {
        panic!("expected parentheses");
    };
    assert_eq!(ident_name(&node.expr), "new");
}

/// Records the identifiers and erroneous nodes a translation passes through.
#[derive(Default)]
struct Seen {
    idents: Vec<String>,
    erroneous: usize,
}

impl TreeTranslator for Seen {
    fn translate_ident(&mut self, tree: Tree) -> Tree {
        self.idents.push(ident_name(&tree).to_string());
        tree
    }

    fn translate_erroneous(&mut self, tree: Tree) -> Tree {
        self.erroneous += 1;
        translator::walk_children(self, tree)
    }
}

#[test]
fn test_erroneous_node_in_a_list_is_a_leaf() {
    // f(a, <error: b>, c)
    let mut make = TreeBuilder::new();
    let a = make.name("a");
    let b = make.name("b");
    let error = make.erroneous(vec![b]);
    let error_id = error.id;
    let c = make.name("c");
    let call = call_stat(&mut make, "f", vec![a, error, c]);

    let scanned = Collect::of(&call);
    assert_eq!(
        scanned.kinds,
        ["ExpressionStatement", "MethodInvocation", "Ident", "Ident", "Erroneous", "Ident"]
    );
    assert_eq!(scanned.ids[4], error_id);

    let mut seen = Seen::default();
    let call = seen.translate(call);
    assert_eq!(seen.idents, ["f", "a", "c"]);
    assert_eq!(seen.erroneous, 1);
    assert_eq!(Collect::of(&call).ids, scanned.ids);
}
