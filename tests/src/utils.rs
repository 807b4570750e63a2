use javelin_ast::{
    builder::TreeBuilder,
    flags,
    nodes::{NodeId, Tree, TreeKind},
    position::Pos,
    pretty::{Pretty, PrettyConfig},
    scanner::TreeScanner,
};

/// Renders `tree` as an expression with the default configuration.
pub(crate) fn render(tree: &Tree) -> String {
    javelin_ast::pretty::pretty_string(tree).unwrap()
}

/// Renders `tree` as a statement with the default configuration.
pub(crate) fn render_stat(tree: &Tree) -> String {
    render_stat_with(tree, PrettyConfig::default())
}

pub(crate) fn render_stat_with(tree: &Tree, config: PrettyConfig) -> String {
    let mut printer = Pretty::new(Vec::new(), config);
    printer.print_stat(tree).unwrap();
    String::from_utf8(printer.into_inner()).unwrap()
}

/// An empty modifiers node.
pub(crate) fn no_mods(make: &mut TreeBuilder) -> Tree {
    make.modifiers_flags(0)
}

/// `type name [= init]` with no modifiers.
pub(crate) fn local(make: &mut TreeBuilder, vartype: Tree, name: &str, init: Option<Tree>) -> Tree {
    let mods = no_mods(make);
    let name = make.intern(name);
    make.var_def(mods, name, Some(vartype), init)
}

/// `name(args)` as an expression statement.
pub(crate) fn call_stat(make: &mut TreeBuilder, name: &str, args: Vec<Tree>) -> Tree {
    let meth = make.name(name);
    let call = make.app(meth, args);
    make.exec(call)
}

/// `public class name { defs }`.
pub(crate) fn public_class(make: &mut TreeBuilder, name: &str, defs: Vec<Tree>) -> Tree {
    let mods = make.modifiers_flags(flags::PUBLIC);
    let name = make.intern(name);
    make.class_def(mods, name, Vec::new(), None, Vec::new(), Vec::new(), defs)
}

/// Every tree reachable from the root, in scan order.
#[derive(Default)]
pub(crate) struct Collect {
    pub(crate) kinds: Vec<&'static str>,
    pub(crate) ids: Vec<NodeId>,
    pub(crate) pos: Vec<Pos>,
}

impl Collect {
    pub(crate) fn of(tree: &Tree) -> Self {
        let mut collect = Collect::default();
        collect.scan(tree);
        collect
    }
}

impl TreeScanner for Collect {
    fn scan(&mut self, tree: &Tree) {
        self.kinds.push(tree.kind.kind_name());
        self.ids.push(tree.id);
        self.pos.push(tree.pos);
        javelin_ast::scanner::walk_children(self, tree);
    }
}

/// The identifier spelled by an `Ident` tree.
pub(crate) fn ident_name(tree: &Tree) -> &str {
    match &tree.kind {
        TreeKind::Ident(ident) => ident.name.as_str(),
        other => panic!("expected an identifier, found {}", other.kind_name()),
    }
}
