use std::{collections::HashSet, rc::Rc};

use javelin_ast::{
    Constant, TypeTag,
    builder::TreeBuilder,
    copier::{TreeCopier, copy_children, copy_tree},
    names::Name,
    nodes::{Ident, Tag, Tree, TreeKind},
    position::{EndPosTable, LineMap, Pos},
    semantic::{SymbolHandle, TypeHandle},
};

use crate::utils::{Collect, call_stat, local, public_class, render_stat};

fn sample_method(make: &mut TreeBuilder) -> Tree {
    // int twice(int x) { int y = x * 2; g(y); return y; }
    let int = make.at_offset(30).type_ident(TypeTag::Int);
    let param = local(make, int, "x", None);
    let int = make.at_offset(40).type_ident(TypeTag::Int);
    let x = make.at_offset(48).name("x");
    let two = make.at_offset(52).literal(2);
    let product = make.at_offset(50).binary(Tag::Mul, x, two);
    let y = local(make, int, "y", Some(product));
    let arg = make.at_offset(57).name("y");
    let call = call_stat(make, "g", vec![arg]);
    let y_ref = make.at_offset(68).name("y");
    let ret = make.at_offset(61).return_(Some(y_ref));
    let body = make.at_offset(38).block(0, vec![y, call, ret]);
    let mods = make.at(Pos::NOPOS).modifiers_flags(0);
    let restype = make.at_offset(16).type_ident(TypeTag::Int);
    let name = make.intern("twice");
    make.at_offset(20).method_def(mods, name, Some(restype), Vec::new(), None, vec![param], Vec::new(), Some(body), None)
}

#[test]
fn test_copy_has_same_shape_and_positions_with_fresh_ids() {
    let mut make = TreeBuilder::new();
    let original = sample_method(&mut make);
    let copy = copy_tree(&mut make, &original);

    let before = Collect::of(&original);
    let after = Collect::of(&copy);
    assert_eq!(before.kinds, after.kinds);
    assert_eq!(before.pos, after.pos);
    assert!(before.pos.contains(&Pos::new(61)));
    let old_ids: HashSet<_> = before.ids.iter().collect();
    assert!(after.ids.iter().all(|id| !old_ids.contains(id)));
    assert_eq!(render_stat(&original), render_stat(&copy));
}

struct IdentNames<'t>(Vec<&'t Name>);

impl<'t> IdentNames<'t> {
    fn of(tree: &'t Tree) -> Vec<&'t Name> {
        let mut names = IdentNames(Vec::new());
        names.collect(tree);
        names.0
    }

    fn collect(&mut self, tree: &'t Tree) {
        if let TreeKind::Ident(Ident { name, .. }) = &tree.kind {
            self.0.push(name);
        }
        match &tree.kind {
            TreeKind::Binary(node) => {
                self.collect(&node.lhs);
                self.collect(&node.rhs);
            }
            TreeKind::Parens(node) => self.collect(&node.expr),
            _ => {}
        }
    }
}

#[test]
fn test_copy_shares_names_and_symbols() {
    let mut make = TreeBuilder::new();
    let mut a = make.name("a");
    let symbol = SymbolHandle::new("a: int");
    if let TreeKind::Ident(ident) = &mut a.kind {
        ident.sym = Some(symbol.clone());
    }
    a.ty = Some(TypeHandle::new("int"));
    let b = make.name("b");
    let sum = make.binary(Tag::Plus, a, b);
    let original = make.parens(sum);

    let copy = copy_tree(&mut make, &original);
    let old_names = IdentNames::of(&original);
    let new_names = IdentNames::of(&copy);
    assert_eq!(old_names.len(), 2);
    for (old, new) in old_names.iter().zip(&new_names) {
        assert!(old.ptr_eq(new));
    }

    let TreeKind::Parens(parens) = &copy.kind else {
        panic!("expected parentheses");
    };
    let TreeKind::Binary(binary) = &parens.expr.kind else {
        panic!("expected a binary expression");
    };
    let TreeKind::Ident(ident) = &binary.lhs.kind else {
        panic!("expected an identifier");
    };
    assert!(ident.sym.as_ref().is_some_and(|sym| sym.ptr_eq(&symbol)));
    assert!(binary.lhs.ty.is_none());
}

#[test]
fn test_copy_shares_string_constants() {
    let mut make = TreeBuilder::new();
    let original = make.literal("shared");
    let copy = copy_tree(&mut make, &original);

    let (TreeKind::Literal(old), TreeKind::Literal(new)) = (&original.kind, &copy.kind) else {
        panic!("expected literals");
    };
    let (Constant::Str(old), Constant::Str(new)) = (&old.value, &new.value) else {
        panic!("expected string constants");
    };
    assert!(Rc::ptr_eq(old, new));
}

#[test]
fn test_copy_of_unit_drops_end_positions() {
    let mut make = TreeBuilder::new();
    let class = public_class(&mut make, "A", Vec::new());
    let mut unit = make.top_level(vec![class]);
    if let TreeKind::TopLevel(node) = &mut unit.kind {
        node.source_file = Some("A.java".to_string());
        node.line_map = Some(LineMap::new("public class A {\n}\n"));
        node.end_positions = Some(EndPosTable::new());
    }

    let copy = copy_tree(&mut make, &unit);
    let TreeKind::TopLevel(node) = &copy.kind else {
        panic!("expected a compilation unit");
    };
    assert_eq!(node.source_file.as_deref(), Some("A.java"));
    assert!(node.line_map.is_some());
    assert!(node.end_positions.is_none());
}

/// Copies an identifier spelled `placeholder` as the tree passed as the
/// parameter, and anything else as usual.
struct Substitute<'b> {
    make: &'b mut TreeBuilder,
}

impl TreeCopier<Tree> for Substitute<'_> {
    fn builder(&mut self) -> &mut TreeBuilder {
        self.make
    }

    fn visit_ident(&mut self, tree: &Tree, node: &Ident, p: &Tree) -> Tree {
        if node.name.as_str() == "placeholder" {
            self.copy(p, p)
        } else {
            copy_children(self, tree, p)
        }
    }
}

#[test]
fn test_copy_wrapper_substitutes_its_parameter() {
    let mut make = TreeBuilder::new();
    let hole = make.name("placeholder");
    let replacement = make.literal(7);
    let copy = Substitute { make: &mut make }.copy(&hole, &replacement);
    assert_eq!(copy.tag(), Tag::Literal);
    assert_ne!(copy.id, replacement.id);
}

#[test]
fn test_copy_wrapper_substitutes_nested_holes() {
    let mut make = TreeBuilder::new();
    // g(placeholder + 1);
    let hole = make.name("placeholder");
    let one = make.literal(1);
    let sum = make.binary(Tag::Plus, hole, one);
    let template = call_stat(&mut make, "g", vec![sum]);
    let replacement = make.literal(7);

    let copy = Substitute { make: &mut make }.copy(&template, &replacement);
    assert_eq!(render_stat(&copy), "g(7 + 1);");
    assert_eq!(render_stat(&template), "g(placeholder + 1);");

    let kinds = Collect::of(&copy).kinds;
    assert_eq!(kinds.iter().filter(|kind| **kind == "Literal").count(), 2);
    assert!(!Collect::of(&copy).ids.contains(&replacement.id));
}
