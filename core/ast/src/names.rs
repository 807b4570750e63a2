//! Interned identifier handles.
//!
//! Every identifier that appears in a tree (class, method and variable names,
//! labels, selected members) is a [`Name`]. Names are created through a
//! [`NameTable`], which hands out the same shared allocation for equal
//! spellings, so copies of a tree share their names with the original.
//!
//! ```
//! use javelin_ast::names::NameTable;
//!
//! let mut names = NameTable::new();
//! let a = names.from_str("length");
//! let b = names.from_str("length");
//! assert!(a.ptr_eq(&b));
//! ```

use std::{
    fmt::{self, Display, Formatter},
    ops::Deref,
    rc::Rc,
};

use rustc_hash::FxHashSet;

/// An interned identifier.
///
/// Equality compares spellings; [`Name::ptr_eq`] tells whether two names are
/// the same handle.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Rc<str>);

impl Name {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Name) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", &*self.0)
    }
}

/// Spelling of the constructor name.
pub const INIT: &str = "<init>";
/// Spelling of the wildcard import name.
pub const ASTERISK: &str = "*";
/// Spelling of the name used for unresolvable identifiers.
pub const ERROR: &str = "<error>";

/// Interning table for [`Name`]s.
#[derive(Default)]
pub struct NameTable {
    names: FxHashSet<Rc<str>>,
}

impl NameTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared handle for `spelling`, interning it on first use.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&mut self, spelling: &str) -> Name {
        if let Some(existing) = self.names.get(spelling) {
            return Name(existing.clone());
        }
        let interned: Rc<str> = Rc::from(spelling);
        self.names.insert(interned.clone());
        Name(interned)
    }

    pub fn init(&mut self) -> Name {
        self.from_str(INIT)
    }

    pub fn empty(&mut self) -> Name {
        self.from_str("")
    }

    pub fn asterisk(&mut self) -> Name {
        self.from_str(ASTERISK)
    }

    pub fn error(&mut self) -> Name {
        self.from_str(ERROR)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
