//! Source positions and the start/end reconstruction rules.
//!
//! A [`Tree`] stores a single anchor offset. Where a construct actually starts
//! is computed by [`start_pos`], which descends into the leftmost meaningful
//! child. Where it ends is looked up in the compilation unit's
//! [`EndPosTable`] first and otherwise derived by [`end_pos`] from the
//! rightmost meaningful child, falling back to [`structural_end_pos`] when
//! nothing better is known.
//!
//! Offsets are byte offsets into the source text. [`Pos::NOPOS`] marks an
//! unknown position and is never treated as an offset.

use std::fmt::{self, Display, Formatter};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::nodes::{NodeId, Tree, TreeKind};

/// A source offset, or [`Pos::NOPOS`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Pos(u32);

impl Pos {
    /// The "no position" sentinel.
    pub const NOPOS: Pos = Pos(u32::MAX);

    #[must_use]
    pub const fn new(offset: u32) -> Self {
        Pos(offset)
    }

    /// The offset, or `None` for [`Pos::NOPOS`].
    #[must_use]
    pub const fn offset(self) -> Option<u32> {
        if self.is_none() { None } else { Some(self.0) }
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[must_use]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    /// `self` if it is a position, otherwise `other`.
    #[must_use]
    pub const fn or(self, other: Pos) -> Pos {
        if self.is_none() { other } else { self }
    }
}

impl Default for Pos {
    fn default() -> Self {
        Pos::NOPOS
    }
}

impl From<u32> for Pos {
    fn from(offset: u32) -> Self {
        Pos(offset)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(offset) => write!(f, "{offset}"),
            None => f.write_str("NOPOS"),
        }
    }
}

/// The `{start, preferred, end}` triple a diagnostic is reported against.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DiagnosticPosition {
    pub start: Pos,
    pub preferred: Pos,
    pub end: Pos,
}

impl DiagnosticPosition {
    /// A position that starts, ends and points at `pos`.
    #[must_use]
    pub const fn point(pos: Pos) -> Self {
        DiagnosticPosition { start: pos, preferred: pos, end: pos }
    }
}

/// End offsets recorded by the parser for nodes whose end cannot be derived
/// from their children. Owned by the compilation unit.
#[derive(Clone, Debug, Default)]
pub struct EndPosTable {
    ends: FxHashMap<NodeId, Pos>,
}

impl EndPosTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the end offset of `tree`. A `NOPOS` end is not recorded.
    pub fn store_end(&mut self, tree: &Tree, end: Pos) {
        if end.is_none() {
            return;
        }
        trace!(node = %tree.id, %end, "store end position");
        self.ends.insert(tree.id, end);
    }

    /// The recorded end offset of `tree`, or `NOPOS`.
    #[must_use]
    pub fn get_end_pos(&self, tree: &Tree) -> Pos {
        self.get(tree.id)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Pos {
        self.ends.get(&id).copied().unwrap_or(Pos::NOPOS)
    }

    /// Moves the end offset recorded for `old` to `new` and returns it, or
    /// returns `NOPOS` when `old` had none.
    pub fn replace_tree(&mut self, old: &Tree, new: &Tree) -> Pos {
        self.replace_id(old.id, new.id)
    }

    pub fn replace_id(&mut self, old: NodeId, new: NodeId) -> Pos {
        match self.ends.remove(&old) {
            Some(end) => {
                debug!(%old, %new, %end, "rebase end position");
                self.ends.insert(new, end);
                end
            }
            None => Pos::NOPOS,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}

/// Line starts of one source file, for turning offsets into line and column
/// numbers. Lines are terminated by `\n`, `\r\n` or a lone `\r`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMap {
    starts: Vec<u32>,
}

impl LineMap {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 2;
                    starts.push(to_offset(i));
                }
                b'\r' | b'\n' => {
                    i += 1;
                    starts.push(to_offset(i));
                }
                _ => i += 1,
            }
        }
        LineMap { starts }
    }

    /// 1-based line containing `pos`.
    #[must_use]
    pub fn line_number(&self, pos: Pos) -> Option<u32> {
        let offset = pos.offset()?;
        let line = self.starts.partition_point(|&start| start <= offset);
        u32::try_from(line).ok()
    }

    /// 1-based column of `pos` within its line.
    #[must_use]
    pub fn column_number(&self, pos: Pos) -> Option<u32> {
        let line = self.line_number(pos)?;
        let start = self.start_position(line)?;
        Some(pos.offset()? - start.offset()? + 1)
    }

    /// Offset of the first character of the 1-based `line`.
    #[must_use]
    pub fn start_position(&self, line: u32) -> Option<Pos> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.starts.get(index).map(|&start| Pos::new(start))
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

fn to_offset(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX - 1)
}

/// Start offset of `tree`: its own anchor, or the start of its leftmost
/// meaningful child for compound constructs.
#[must_use]
pub fn start_pos(tree: &Tree) -> Pos {
    match &tree.kind {
        TreeKind::ModuleDecl(node) => {
            if let Some(first) = annotations_of(&node.mods).first() {
                return start_pos(first);
            }
        }
        TreeKind::PackageDecl(node) => {
            if let Some(first) = node.annotations.first() {
                return start_pos(first);
            }
        }
        TreeKind::MethodInvocation(node) => return start_pos(&node.meth),
        TreeKind::Assign(node) => return start_pos(&node.lhs),
        TreeKind::AssignOp(node) => return start_pos(&node.lhs),
        TreeKind::Binary(node) => return start_pos(&node.lhs),
        TreeKind::Unary(node) if node.opcode.is_post_unary_op() => return start_pos(&node.arg),
        TreeKind::ClassDecl(node) => {
            if node.mods.pos.is_some() {
                return node.mods.pos;
            }
        }
        TreeKind::MethodDecl(node) => {
            if node.mods.pos.is_some() {
                return node.mods.pos;
            }
            if let Some(first) = node.typarams.first() {
                return start_pos(first);
            }
            return match &node.restype {
                Some(restype) => start_pos(restype),
                None => tree.pos,
            };
        }
        TreeKind::Conditional(node) => return start_pos(&node.cond),
        TreeKind::ExpressionStatement(node) => return start_pos(&node.expr),
        TreeKind::ArrayAccess(node) => return start_pos(&node.indexed),
        TreeKind::FieldAccess(node) => return start_pos(&node.selected),
        TreeKind::MemberReference(node) => return start_pos(&node.expr),
        TreeKind::TypeApply(node) => return start_pos(&node.clazz),
        TreeKind::ArrayType(node) => return start_pos(&node.elemtype),
        TreeKind::InstanceOf(node) => return start_pos(&node.expr),
        TreeKind::GuardPattern(node) => return start_pos(&node.patt),
        TreeKind::AnnotatedType(node) => {
            let underlying = &node.underlying_type;
            return match node.annotations.first() {
                Some(first)
                    if !matches!(
                        underlying.kind,
                        TreeKind::ArrayType(_) | TreeKind::FieldAccess(_)
                    ) =>
                {
                    start_pos(first)
                }
                _ => start_pos(underlying),
            };
        }
        TreeKind::NewClass(node) => {
            if let Some(encl) = &node.encl {
                return start_pos(encl);
            }
        }
        TreeKind::VariableDecl(node) => {
            if node.start_pos.is_some() {
                return node.start_pos;
            }
            if node.mods.pos.is_some() {
                return node.mods.pos;
            }
            return match &node.vartype {
                Some(vartype) if vartype.pos.is_some() => start_pos(vartype),
                // implicitly typed lambda parameter
                _ => tree.pos,
            };
        }
        TreeKind::BindingPattern(node) => return start_pos(&node.var),
        TreeKind::Erroneous(node) => {
            if let Some(first) = node.errs.first() {
                return start_pos(first);
            }
        }
        TreeKind::Modifiers(node) => {
            if tree.pos.is_none() {
                if let Some(first) = node.annotations.first() {
                    return start_pos(first);
                }
            }
        }
        _ => {}
    }
    tree.pos
}

/// [`start_pos`] of an optional tree; `NOPOS` for an absent one.
#[must_use]
pub fn start_pos_opt(tree: Option<&Tree>) -> Pos {
    tree.map_or(Pos::NOPOS, start_pos)
}

/// End offset of `tree`.
///
/// With a table, a recorded entry wins; otherwise the end of the rightmost
/// meaningful child is used, and [`structural_end_pos`] when no child rule
/// applies. Without a table the structural end is returned directly.
#[must_use]
pub fn end_pos(tree: &Tree, table: Option<&EndPosTable>) -> Pos {
    let Some(table) = table else {
        return structural_end_pos(tree);
    };
    let recorded = table.get_end_pos(tree);
    if recorded.is_some() {
        return recorded;
    }
    end_by_children(tree, table).or(structural_end_pos(tree))
}

/// [`end_pos`] of an optional tree; `NOPOS` for an absent one.
#[must_use]
pub fn end_pos_opt(tree: Option<&Tree>, table: Option<&EndPosTable>) -> Pos {
    tree.map_or(Pos::NOPOS, |tree| end_pos(tree, table))
}

fn end_by_children(tree: &Tree, table: &EndPosTable) -> Pos {
    let end = |child: &Tree| end_pos(child, Some(table));
    let end_last = |children: &[Tree]| children.last().map_or(Pos::NOPOS, end);
    match &tree.kind {
        TreeKind::AssignOp(node) => end(&node.rhs),
        TreeKind::Binary(node) => end(&node.rhs),
        TreeKind::Unary(node) => end(&node.arg),
        TreeKind::Case(node) => end_last(&node.stats),
        TreeKind::Catch(node) => end(&node.body),
        TreeKind::Conditional(node) => end(&node.falsepart),
        TreeKind::ForLoop(node) => end(&node.body),
        TreeKind::EnhancedForLoop(node) => end(&node.body),
        TreeKind::WhileLoop(node) => end(&node.body),
        TreeKind::If(node) => match &node.elsepart {
            Some(elsepart) => end(elsepart),
            None => end(&node.thenpart),
        },
        TreeKind::LabeledStatement(node) => end(&node.body),
        TreeKind::Modifiers(node) => end_last(&node.annotations),
        TreeKind::Synchronized(node) => end(&node.body),
        TreeKind::TopLevel(node) => end_last(&node.defs),
        TreeKind::Try(node) => {
            if let Some(finalizer) = &node.finalizer {
                end(finalizer)
            } else if let Some(last) = node.catchers.last() {
                end(last)
            } else {
                end(&node.body)
            }
        }
        TreeKind::Wildcard(node) => node.inner.as_deref().map_or(Pos::NOPOS, end),
        TreeKind::TypeCast(node) => end(&node.expr),
        TreeKind::InstanceOf(node) => end(&node.pattern),
        TreeKind::AnnotatedType(node) => end(&node.underlying_type),
        TreeKind::Erroneous(node) => end_last(&node.errs),
        _ => Pos::NOPOS,
    }
}

/// End offset derivable from the tree alone: the closing brace of a block or
/// switch, the end of the body of a `synchronized` statement or a catch
/// clause, the end of a `try` statement's last part, else the anchor.
#[must_use]
pub fn structural_end_pos(tree: &Tree) -> Pos {
    match &tree.kind {
        TreeKind::Block(node) if node.endpos.is_some() => node.endpos,
        TreeKind::Switch(node) if node.endpos.is_some() => node.endpos,
        TreeKind::SwitchExpression(node) if node.endpos.is_some() => node.endpos,
        TreeKind::Synchronized(node) => structural_end_pos(&node.body),
        TreeKind::Catch(node) => structural_end_pos(&node.body),
        TreeKind::Try(node) => {
            let last = match (&node.finalizer, node.catchers.last()) {
                (Some(finalizer), _) => finalizer.as_ref(),
                (None, Some(catcher)) => catcher,
                (None, None) => node.body.as_ref(),
            };
            structural_end_pos(last)
        }
        _ => tree.pos,
    }
}

/// A diagnostic position pointing at the structural end of `tree`.
#[must_use]
pub fn diag_end_pos(tree: &Tree) -> DiagnosticPosition {
    DiagnosticPosition::point(structural_end_pos(tree))
}

fn annotations_of(mods: &Tree) -> &[Tree] {
    match &mods.kind {
        TreeKind::Modifiers(node) => &node.annotations,
        _ => &[],
    }
}

impl Tree {
    /// Start, anchor and end of this tree for diagnostic reporting.
    #[must_use]
    pub fn diagnostic_position(&self, table: Option<&EndPosTable>) -> DiagnosticPosition {
        DiagnosticPosition {
            start: start_pos(self),
            preferred: self.pos,
            end: end_pos(self, table),
        }
    }

    #[must_use]
    pub fn start_pos(&self) -> Pos {
        start_pos(self)
    }

    #[must_use]
    pub fn end_pos(&self, table: Option<&EndPosTable>) -> Pos {
        end_pos(self, table)
    }
}
