use std::fmt;

use variadic_core::{
    Child, Identity, LayoutPriorityTrait, TagTrait, TagValue, TraitKey, TraitRegistry, ZIndexTrait,
};

use crate::view::View;

/// A single type-erased child of a variadic collection.
///
/// `Subview` is a thin handle over the host's [`Child`]; it never copies the
/// element. Writing a trait through [`set_trait`](Self::set_trait) mutates the
/// shared child, so the write is visible to every other `Subview` (and to the
/// host) that refers to the same element for the rest of the render pass.
/// Treat subviews as read-only unless that sharing is what you want.
#[derive(Clone)]
pub struct Subview {
    child: Child<View>,
}

impl Subview {
    pub fn new(child: Child<View>) -> Self {
        Self { child }
    }

    /// The type-erased identity of the child.
    pub fn id(&self) -> &Identity {
        self.child.identity()
    }

    /// The identity narrowed to `T`, or `None` if it is not a `T`.
    pub fn id_as<T: Clone + 'static>(&self) -> Option<T> {
        self.child.identity().downcast::<T>()
    }

    pub fn id_ref<T: 'static>(&self) -> Option<&T> {
        self.child.identity().downcast_ref::<T>()
    }

    pub fn trait_value<K: TraitKey>(&self) -> K::Value {
        self.child.trait_value::<K>()
    }

    /// Overwrites a trait on the shared child.
    pub fn set_trait<K: TraitKey>(&self, value: K::Value) {
        self.child.set_trait::<K>(value);
    }

    /// Looks up a trait by its registered key name and narrows it to `T`.
    pub fn trait_named<T: Clone + 'static>(&self, name: &str) -> Option<T> {
        self.child.traits().get_named::<T>(name)
    }

    pub fn trait_named_in<T: Clone + 'static>(
        &self,
        registry: &TraitRegistry,
        name: &str,
    ) -> Option<T> {
        self.child.traits().get_named_in::<T>(registry, name)
    }

    /// The tag value when the child is tagged with a `T`.
    pub fn tag<T: Clone + 'static>(&self) -> Option<T> {
        self.tag_value().value::<T>().cloned()
    }

    pub fn tag_value(&self) -> TagValue {
        self.trait_value::<TagTrait>()
    }

    pub fn has_tag(&self) -> bool {
        self.tag_value().is_tagged()
    }

    pub fn layout_priority(&self) -> f64 {
        self.trait_value::<LayoutPriorityTrait>()
    }

    pub fn z_index(&self) -> f64 {
        self.trait_value::<ZIndexTrait>()
    }

    /// The payload this subview renders as.
    pub fn view(&self) -> &View {
        self.child.payload()
    }

    pub fn child(&self) -> &Child<View> {
        &self.child
    }

    /// Returns `true` if both subviews wrap the same child.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.child.ptr_eq(&other.child)
    }
}

impl PartialEq for Subview {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Subview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subview")
            .field("id", self.id())
            .field("view", self.view())
            .finish()
    }
}
