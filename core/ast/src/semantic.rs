//! Opaque annotation slots filled in by later compiler phases.
//!
//! Semantic analysis stores resolved types and symbols on tree nodes, and the
//! doc-comment subsystem hands out parsed comment trees. This crate never
//! looks inside any of them: each handle is a reference-counted `dyn Any`
//! that the owning phase downcasts back to its own type.

use std::{any::Any, fmt, rc::Rc};

macro_rules! opaque_handle {
    (
        $(
            $(#[$outer:meta])*
            $vis:vis struct $name:ident;
        )+
    ) => {
        $(
            $(#[$outer])*
            #[derive(Clone)]
            $vis struct $name(Rc<dyn Any>);

            impl $name {
                pub fn new<T: Any>(value: T) -> Self {
                    $name(Rc::new(value))
                }

                #[must_use]
                pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
                    self.0.downcast_ref::<T>()
                }

                #[must_use]
                pub fn ptr_eq(&self, other: &$name) -> bool {
                    Rc::ptr_eq(&self.0, &other.0)
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!(stringify!($name), "({:p})"), Rc::as_ptr(&self.0))
                }
            }
        )+
    };
}

opaque_handle! {
    /// A resolved type attached to a tree by attribution.
    pub struct TypeHandle;

    /// A resolved symbol (class, method, variable, operator, package, module).
    pub struct SymbolHandle;

    /// A parsed documentation comment owned by the doc-comment subsystem.
    pub struct DocTreeHandle;
}
