//! Typed per-child metadata.
//!
//! A trait is a value attached to a child under a [`TraitKey`]. Keys are
//! distinguished by their Rust type, never by their name: two key types with
//! the same `Value` type (or even the same `NAME`) occupy separate slots.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use crate::collections::map::HashMap;
use crate::registry::{ExtractAs, TraitRegistry};

/// Type-level identifier for a piece of child metadata.
pub trait TraitKey: 'static {
    type Value: Clone + 'static;

    /// Name used for type-erased lookup through the [`TraitRegistry`].
    const NAME: &'static str;

    /// Value reported when the trait was never set on a child.
    fn default_value() -> Self::Value;
}

/// Declares a unit struct implementing [`TraitKey`].
///
/// ```rust,ignore
/// declare_trait_key!(pub SectionHeader: bool = false, "section_header");
/// ```
#[macro_export]
macro_rules! declare_trait_key {
    ($(#[$meta:meta])* $vis:vis $name:ident : $value:ty = $default:expr, $key_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::TraitKey for $name {
            type Value = $value;
            const NAME: &'static str = $key_name;

            fn default_value() -> Self::Value {
                $default
            }
        }
    };
}

#[derive(Clone)]
struct TraitSlot {
    key_name: &'static str,
    value: Rc<dyn Any>,
}

/// Keyed storage of trait values for a single child.
///
/// Values are reference counted, so cloning a store is a shallow snapshot:
/// later writes to either copy are not seen by the other.
#[derive(Clone, Default)]
pub struct TraitStore {
    slots: HashMap<TypeId, TraitSlot>,
}

impl TraitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `K`, or `K::default_value()`.
    pub fn get<K: TraitKey>(&self) -> K::Value {
        self.get_ref::<K>()
            .cloned()
            .unwrap_or_else(K::default_value)
    }

    /// Returns the stored value under `K` without falling back to the default.
    pub fn get_ref<K: TraitKey>(&self) -> Option<&K::Value> {
        self.slots
            .get(&TypeId::of::<K>())
            .and_then(|slot| slot.value.downcast_ref::<K::Value>())
    }

    /// Overwrites (or inserts) the value stored under `K`.
    ///
    /// `K` is registered with the global [`TraitRegistry`] on first use, so a
    /// value written here is always reachable through [`get_named`](Self::get_named).
    pub fn set<K: TraitKey>(&mut self, value: K::Value) {
        TraitRegistry::global().ensure_registered::<K>();
        self.slots.insert(
            TypeId::of::<K>(),
            TraitSlot {
                key_name: K::NAME,
                value: Rc::new(value),
            },
        );
    }

    pub fn remove<K: TraitKey>(&mut self) -> Option<K::Value> {
        self.slots
            .remove(&TypeId::of::<K>())
            .and_then(|slot| slot.value.downcast::<K::Value>().ok())
            .map(|value| Rc::try_unwrap(value).unwrap_or_else(|shared| (*shared).clone()))
    }

    pub fn contains<K: TraitKey>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<K>())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Names of the keys that currently hold a value, in no particular order.
    pub fn key_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.values().map(|slot| slot.key_name)
    }

    /// Looks up a trait by registered key name and narrows it to `T`.
    ///
    /// Returns `None` when the name is not registered or the value is not a
    /// `T`. A registered key that was never set yields its default, narrowed.
    pub fn get_named<T: Clone + 'static>(&self, name: &str) -> Option<T> {
        self.get_named_in(TraitRegistry::global(), name)
    }

    /// Same as [`get_named`](Self::get_named) against an explicit registry.
    pub fn get_named_in<T: Clone + 'static>(
        &self,
        registry: &TraitRegistry,
        name: &str,
    ) -> Option<T> {
        let descriptor = registry.descriptor(name)?;
        let mut extract = ExtractAs::<T>::new();
        descriptor.visit(self, &mut extract);
        extract.into_inner()
    }
}

impl fmt::Debug for TraitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&'static str> = self.key_names().collect();
        names.sort_unstable();
        f.debug_struct("TraitStore").field("keys", &names).finish()
    }
}
