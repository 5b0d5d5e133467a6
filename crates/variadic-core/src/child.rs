//! Shared handles to flattened host elements.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::identity::Identity;
use crate::traits::{TraitKey, TraitStore};

struct ChildInner<P> {
    identity: Identity,
    traits: RefCell<TraitStore>,
    payload: P,
}

/// One flattened element: identity, traits and a renderable payload.
///
/// `Child` is a reference handle. Clones point at the same element, so a trait
/// written through one clone is observed by every other clone.
pub struct Child<P> {
    inner: Rc<ChildInner<P>>,
}

impl<P> Child<P> {
    pub fn new(identity: Identity, payload: P) -> Self {
        Self::with_traits(identity, TraitStore::new(), payload)
    }

    pub fn with_traits(identity: Identity, traits: TraitStore, payload: P) -> Self {
        Self {
            inner: Rc::new(ChildInner {
                identity,
                traits: RefCell::new(traits),
                payload,
            }),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.inner.identity
    }

    pub fn payload(&self) -> &P {
        &self.inner.payload
    }

    pub fn traits(&self) -> Ref<'_, TraitStore> {
        self.inner.traits.borrow()
    }

    pub fn traits_mut(&self) -> RefMut<'_, TraitStore> {
        self.inner.traits.borrow_mut()
    }

    pub fn trait_value<K: TraitKey>(&self) -> K::Value {
        self.traits().get::<K>()
    }

    pub fn set_trait<K: TraitKey>(&self, value: K::Value) {
        self.traits_mut().set::<K>(value);
    }

    /// Returns `true` if both handles refer to the same element.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<P> Clone for Child<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P> fmt::Debug for Child<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Child")
            .field("identity", self.identity())
            .field("traits", &*self.traits())
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable list of children produced by one flattening pass.
pub struct ChildList<P> {
    children: Rc<[Child<P>]>,
}

impl<P> ChildList<P> {
    pub fn empty() -> Self {
        Self {
            children: Rc::from(Vec::new()),
        }
    }

    pub fn as_slice(&self) -> &[Child<P>] {
        &self.children
    }

    /// Returns `true` if both lists share the same backing storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.children, &other.children)
    }
}

impl<P> Deref for ChildList<P> {
    type Target = [Child<P>];

    fn deref(&self) -> &Self::Target {
        &self.children
    }
}

impl<P> From<Vec<Child<P>>> for ChildList<P> {
    fn from(children: Vec<Child<P>>) -> Self {
        Self {
            children: Rc::from(children),
        }
    }
}

impl<P> FromIterator<Child<P>> for ChildList<P> {
    fn from_iter<I: IntoIterator<Item = Child<P>>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

impl<P> Clone for ChildList<P> {
    fn clone(&self) -> Self {
        Self {
            children: Rc::clone(&self.children),
        }
    }
}

impl<P> Default for ChildList<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P> fmt::Debug for ChildList<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.children.iter()).finish()
    }
}
