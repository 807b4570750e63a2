use javelin_ast::{
    TypeTag,
    builder::TreeBuilder,
    nodes::{Tag, Tree, TreeKind},
    position::{self, EndPosTable, LineMap, Pos},
    scanner::{self, TreeScanner},
};

/// An empty block whose closing brace is at `end`.
fn block_ending_at(make: &mut TreeBuilder, start: u32, end: u32) -> Tree {
    let mut block = make.at_offset(start).block(0, Vec::new());
    if let TreeKind::Block(node) = &mut block.kind {
        node.endpos = Pos::new(end);
    }
    block
}

fn catch_ending_at(make: &mut TreeBuilder, start: u32, end: u32) -> Tree {
    let int = make.at_offset(start + 7).name("E");
    let mods = make.at(Pos::NOPOS).modifiers_flags(0);
    let name = make.intern("e");
    let param = make.at_offset(start + 9).var_def(mods, name, Some(int), None);
    let body = block_ending_at(make, start + 12, end);
    make.at_offset(start).catch(param, body)
}

#[test]
fn test_binary_expression_spans_its_operands() {
    // 1 + 2
    let mut make = TreeBuilder::new();
    let one = make.at_offset(0).literal(1);
    let two = make.at_offset(4).literal(2);
    let mut table = EndPosTable::new();
    table.store_end(&one, Pos::new(1));
    table.store_end(&two, Pos::new(5));
    let sum = make.at_offset(2).binary(Tag::Plus, one, two);

    assert_eq!(sum.start_pos(), Pos::new(0));
    assert_eq!(sum.pos, Pos::new(2));
    assert_eq!(sum.end_pos(Some(&table)), Pos::new(5));
    // no table: the anchor is the best structural guess
    assert_eq!(sum.end_pos(None), Pos::new(2));

    let diag = sum.diagnostic_position(Some(&table));
    assert_eq!(diag.start, Pos::new(0));
    assert_eq!(diag.preferred, Pos::new(2));
    assert_eq!(diag.end, Pos::new(5));
}

#[test]
fn test_recorded_end_wins_over_children() {
    let mut make = TreeBuilder::new();
    let a = make.at_offset(0).name("a");
    let b = make.at_offset(4).name("b");
    let mut table = EndPosTable::new();
    table.store_end(&b, Pos::new(5));
    let sum = make.at_offset(2).binary(Tag::Plus, a, b);
    table.store_end(&sum, Pos::new(7));
    assert_eq!(position::end_pos(&sum, Some(&table)), Pos::new(7));
}

#[test]
fn test_try_end_falls_back_through_finalizer_catch_and_body() {
    let mut make = TreeBuilder::new();

    let body = block_ending_at(&mut make, 4, 10);
    let catcher = catch_ending_at(&mut make, 11, 20);
    let finalizer = block_ending_at(&mut make, 29, 30);
    let with_finally = make.at_offset(0).try_(Vec::new(), body, vec![catcher], Some(finalizer));
    assert_eq!(with_finally.end_pos(None), Pos::new(30));
    assert_eq!(with_finally.end_pos(Some(&EndPosTable::new())), Pos::new(30));

    let body = block_ending_at(&mut make, 4, 10);
    let catcher = catch_ending_at(&mut make, 11, 20);
    let with_catch = make.at_offset(0).try_(Vec::new(), body, vec![catcher], None);
    assert_eq!(with_catch.end_pos(None), Pos::new(20));
    assert_eq!(with_catch.end_pos(Some(&EndPosTable::new())), Pos::new(20));

    let body = block_ending_at(&mut make, 4, 10);
    let bare = make.at_offset(0).try_(Vec::new(), body, Vec::new(), None);
    assert_eq!(bare.end_pos(None), Pos::new(10));
}

#[test]
fn test_try_without_finalizer_ends_where_its_last_catch_ends() {
    let mut make = TreeBuilder::new();
    let body = block_ending_at(&mut make, 4, 10);
    let first = catch_ending_at(&mut make, 11, 20);
    let last = catch_ending_at(&mut make, 21, 35);
    let stat = make.at_offset(0).try_(Vec::new(), body, vec![first, last], None);
    let TreeKind::Try(node) = &stat.kind else {
        panic!("expected a try statement");
    };
    let last = &node.catchers[1];

    assert_eq!(stat.end_pos(None), last.end_pos(None));
    assert_eq!(last.end_pos(None), Pos::new(35));

    let mut table = EndPosTable::new();
    table.store_end(last, Pos::new(36));
    assert_eq!(stat.end_pos(Some(&table)), last.end_pos(Some(&table)));
    assert_eq!(stat.end_pos(Some(&table)), Pos::new(36));
}

#[test]
fn test_synchronized_ends_with_its_body() {
    let mut make = TreeBuilder::new();
    let lock = make.at_offset(13).name("lock");
    let body = block_ending_at(&mut make, 19, 40);
    let sync = make.at_offset(0).synchronized(lock, body);
    assert_eq!(sync.end_pos(None), Pos::new(40));
}

#[test]
fn test_if_ends_with_else_branch() {
    let mut make = TreeBuilder::new();
    let cond = make.at_offset(4).name("c");
    let thenpart = block_ending_at(&mut make, 7, 9);
    let elsepart = block_ending_at(&mut make, 15, 17);
    let stat = make.at_offset(0).if_(cond, thenpart, Some(elsepart));
    let table = EndPosTable::new();
    assert_eq!(stat.end_pos(Some(&table)), Pos::new(17));
}

#[test]
fn test_replace_tree_moves_the_recorded_end() {
    let mut make = TreeBuilder::new();
    let old = make.at_offset(3).name("a");
    let new = make.at_offset(3).name("b");
    let mut table = EndPosTable::new();
    table.store_end(&old, Pos::new(9));

    assert_eq!(table.replace_tree(&old, &new), Pos::new(9));
    assert_eq!(table.get_end_pos(&old), Pos::NOPOS);
    assert_eq!(table.get_end_pos(&new), Pos::new(9));
    assert_eq!(table.replace_tree(&old, &new), Pos::NOPOS);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_nopos_end_is_not_recorded() {
    let mut make = TreeBuilder::new();
    let a = make.at_offset(0).name("a");
    let mut table = EndPosTable::new();
    table.store_end(&a, Pos::NOPOS);
    assert!(table.is_empty());
}

#[test]
fn test_variable_starts_at_its_type_without_modifiers() {
    // int x = 1
    let mut make = TreeBuilder::new();
    let mods = make.at(Pos::NOPOS).modifiers_flags(0);
    let int = make.at_offset(0).type_ident(TypeTag::Int);
    let one = make.at_offset(8).literal(1);
    let name = make.intern("x");
    let var = make.at_offset(4).var_def(mods, name, Some(int), Some(one));
    assert_eq!(var.start_pos(), Pos::new(0));
    assert_eq!(var.pos, Pos::new(4));
}

#[test]
fn test_selection_and_call_start_at_the_qualifier() {
    // a.b(c)
    let mut make = TreeBuilder::new();
    let a = make.at_offset(0).name("a");
    let b = make.intern("b");
    let select = make.at_offset(1).select(a, b);
    let c = make.at_offset(4).name("c");
    let call = make.at_offset(3).app(select, vec![c]);
    assert_eq!(call.start_pos(), Pos::new(0));

    // i++
    let i = make.at_offset(10).name("i");
    let inc = make.at_offset(11).unary(Tag::PostInc, i);
    assert_eq!(inc.start_pos(), Pos::new(10));

    // -i
    let i = make.at_offset(21).name("i");
    let neg = make.at_offset(20).unary(Tag::Neg, i);
    assert_eq!(neg.start_pos(), Pos::new(20));
}

struct CheckOrdered<'t> {
    table: &'t EndPosTable,
    checked: usize,
}

impl TreeScanner for CheckOrdered<'_> {
    fn scan(&mut self, tree: &Tree) {
        let start = tree.start_pos();
        let end = tree.end_pos(Some(self.table));
        if let (Some(start), Some(end)) = (start.offset(), end.offset()) {
            assert!(start <= end, "{} starts at {start} after its end {end}", tree.kind.kind_name());
            self.checked += 1;
        }
        scanner::walk_children(self, tree);
    }
}

#[test]
fn test_start_never_exceeds_end() {
    // x = a[i] * -b + c ? d : e;
    let mut make = TreeBuilder::new();
    let mut table = EndPosTable::new();
    let x = make.at_offset(0).name("x");
    table.store_end(&x, Pos::new(1));
    let a = make.at_offset(4).name("a");
    table.store_end(&a, Pos::new(5));
    let i = make.at_offset(6).name("i");
    table.store_end(&i, Pos::new(7));
    let indexed = make.at_offset(5).indexed(a, i);
    table.store_end(&indexed, Pos::new(8));
    let b = make.at_offset(12).name("b");
    table.store_end(&b, Pos::new(13));
    let neg = make.at_offset(11).unary(Tag::Neg, b);
    let product = make.at_offset(9).binary(Tag::Mul, indexed, neg);
    let c = make.at_offset(16).name("c");
    table.store_end(&c, Pos::new(17));
    let sum = make.at_offset(14).binary(Tag::Plus, product, c);
    let d = make.at_offset(20).name("d");
    table.store_end(&d, Pos::new(21));
    let e = make.at_offset(24).name("e");
    table.store_end(&e, Pos::new(25));
    let cond = make.at_offset(18).conditional(sum, d, e);
    let assign = make.at_offset(2).assign(x, cond);
    table.store_end(&assign, Pos::new(25));
    let stat = make.at_offset(0).exec(assign);
    table.store_end(&stat, Pos::new(26));

    let mut check = CheckOrdered {
        table: &table,
        checked: 0,
    };
    check.scan(&stat);
    assert_eq!(check.checked, 14);
}

#[test]
fn test_line_map_reports_lines_and_columns() {
    let source = "class A {\n    int x;\n}\n";
    let map = LineMap::new(source);
    let field = source.find("int").unwrap();
    let pos = Pos::new(u32::try_from(field).unwrap());
    assert_eq!(map.line_number(pos), Some(2));
    assert_eq!(map.column_number(pos), Some(5));
    assert_eq!(map.start_position(3), Some(Pos::new(21)));
}
