use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use indexmap::map::Entry;
use indexmap::IndexMap;
use variadic_core::{Child, ChildList, Identity};

use super::Subview;
use crate::view::View;

/// Ordered, randomly indexable collection of [`Subview`]s.
///
/// Wraps the host's child list without copying it. Subviews are created on
/// access: asking for the same index twice yields two wrappers around the
/// same child.
#[derive(Clone, Default)]
pub struct VariadicCollection {
    children: ChildList<View>,
}

impl VariadicCollection {
    pub fn new(children: ChildList<View>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the subview at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn subview(&self, index: usize) -> Subview {
        match self.children.get(index) {
            Some(child) => Subview::new(child.clone()),
            None => panic!(
                "subview index {index} out of range for collection of {} children",
                self.len()
            ),
        }
    }

    pub fn get(&self, index: usize) -> Option<Subview> {
        self.children.get(index).cloned().map(Subview::new)
    }

    pub fn first(&self) -> Option<Subview> {
        self.get(0)
    }

    pub fn last(&self) -> Option<Subview> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.children.iter(),
        }
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &Identity> + '_ {
        self.children.iter().map(Child::identity)
    }

    /// Index of the first child with identity `id`.
    pub fn position_of(&self, id: &Identity) -> Option<usize> {
        self.children.iter().position(|child| child.identity() == id)
    }

    /// Subviews keyed by identity, in collection order.
    ///
    /// When identities repeat, the first child with a given identity is kept.
    pub fn keyed(&self) -> IndexMap<Identity, Subview> {
        let mut keyed = IndexMap::with_capacity(self.len());
        for subview in self.iter() {
            if let Entry::Vacant(entry) = keyed.entry(subview.id().clone()) {
                entry.insert(subview);
            }
        }
        keyed
    }

    pub fn to_vec(&self) -> Vec<Subview> {
        self.iter().collect()
    }

    pub fn children(&self) -> &ChildList<View> {
        &self.children
    }
}

impl From<ChildList<View>> for VariadicCollection {
    fn from(children: ChildList<View>) -> Self {
        Self::new(children)
    }
}

impl fmt::Debug for VariadicCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a [`VariadicCollection`].
#[derive(Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, Child<View>>,
}

impl Iterator for Iter<'_> {
    type Item = Subview;

    fn next(&mut self) -> Option<Subview> {
        self.inner.next().cloned().map(Subview::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Subview> {
        self.inner.nth(n).cloned().map(Subview::new)
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Subview> {
        self.inner.next_back().cloned().map(Subview::new)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a VariadicCollection {
    type Item = Subview;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Owning iterator over a [`VariadicCollection`].
pub struct IntoIter {
    children: ChildList<View>,
    front: usize,
    back: usize,
}

impl Iterator for IntoIter {
    type Item = Subview;

    fn next(&mut self) -> Option<Subview> {
        if self.front == self.back {
            return None;
        }
        let child = self.children[self.front].clone();
        self.front += 1;
        Some(Subview::new(child))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Subview> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(Subview::new(self.children[self.back].clone()))
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl IntoIterator for VariadicCollection {
    type Item = Subview;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        let back = self.children.len();
        IntoIter {
            children: self.children,
            front: 0,
            back,
        }
    }
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
