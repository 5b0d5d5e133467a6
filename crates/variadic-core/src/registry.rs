//! Name-based resolution of trait keys.
//!
//! The registry maps a key's `NAME` back to a [`TraitDescriptor`] for the
//! concrete key type. Extracting a value is a double dispatch: the descriptor
//! knows the key type and pulls the value out of a [`TraitStore`], the
//! [`TraitVisitor`] knows the requested type and narrows the value to it.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::tag::{LayoutPriorityTrait, TagTrait, ZIndexTrait};
use crate::traits::{TraitKey, TraitStore};

/// Receives a type-erased trait value from a [`TraitDescriptor`].
pub trait TraitVisitor {
    fn visit_value(&mut self, value: &dyn Any);
}

/// Visitor that narrows the visited value to `T`.
pub struct ExtractAs<T> {
    value: Option<T>,
}

impl<T: Clone + 'static> ExtractAs<T> {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T: Clone + 'static> Default for ExtractAs<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> TraitVisitor for ExtractAs<T> {
    fn visit_value(&mut self, value: &dyn Any) {
        self.value = value.downcast_ref::<T>().cloned();
    }
}

/// Runtime handle for one concrete [`TraitKey`] type.
pub trait TraitDescriptor: Send + Sync {
    fn name(&self) -> &'static str;
    fn key_type_id(&self) -> TypeId;
    fn key_type_name(&self) -> &'static str;
    fn value_type_name(&self) -> &'static str;

    /// Hands the value stored for this key (or its default) to `visitor`.
    fn visit(&self, store: &TraitStore, visitor: &mut dyn TraitVisitor);
}

struct KeyDescriptor<K>(PhantomData<fn() -> K>);

impl<K: TraitKey> TraitDescriptor for KeyDescriptor<K> {
    fn name(&self) -> &'static str {
        K::NAME
    }

    fn key_type_id(&self) -> TypeId {
        TypeId::of::<K>()
    }

    fn key_type_name(&self) -> &'static str {
        type_name::<K>()
    }

    fn value_type_name(&self) -> &'static str {
        type_name::<K::Value>()
    }

    fn visit(&self, store: &TraitStore, visitor: &mut dyn TraitVisitor) {
        match store.get_ref::<K>() {
            Some(value) => visitor.visit_value(value),
            None => visitor.visit_value(&K::default_value()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Another key type already owns the name.
    NameConflict {
        name: &'static str,
        existing: &'static str,
        attempted: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NameConflict {
                name,
                existing,
                attempted,
            } => write!(
                f,
                "trait key name {name:?} is registered to {existing}, cannot register {attempted}"
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry of trait keys addressable by name.
pub struct TraitRegistry {
    entries: RwLock<IndexMap<&'static str, Arc<dyn TraitDescriptor>>>,
}

static GLOBAL: OnceLock<TraitRegistry> = OnceLock::new();

impl TraitRegistry {
    /// Creates a registry pre-populated with the well-known keys.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.ensure_registered::<TagTrait>();
        registry.ensure_registered::<LayoutPriorityTrait>();
        registry.ensure_registered::<ZIndexTrait>();
        registry
    }

    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// The process-wide registry used by name-based lookups.
    pub fn global() -> &'static TraitRegistry {
        GLOBAL.get_or_init(TraitRegistry::new)
    }

    /// Registers `K` under `K::NAME`.
    ///
    /// Registering the same key type twice is a no-op.
    pub fn register<K: TraitKey>(&self) -> Result<(), RegistryError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.entry(K::NAME) {
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if existing.key_type_id() == TypeId::of::<K>() {
                    Ok(())
                } else {
                    Err(RegistryError::NameConflict {
                        name: K::NAME,
                        existing: existing.key_type_name(),
                        attempted: type_name::<K>(),
                    })
                }
            }
            Entry::Vacant(entry) => {
                log::trace!("registered trait key {:?} -> {}", K::NAME, type_name::<K>());
                entry.insert(Arc::new(KeyDescriptor::<K>(PhantomData)));
                Ok(())
            }
        }
    }

    /// Registers `K`, keeping the existing entry if the name is taken.
    pub fn ensure_registered<K: TraitKey>(&self) {
        if self.is_registered::<K>() {
            return;
        }
        if let Err(err) = self.register::<K>() {
            log::warn!("{err}; name-based lookups keep the first registration");
        }
    }

    pub fn is_registered<K: TraitKey>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(K::NAME)
            .is_some_and(|descriptor| descriptor.key_type_id() == TypeId::of::<K>())
    }

    pub fn descriptor(&self, name: &str) -> Option<Arc<dyn TraitDescriptor>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Registered names in registration order.
    pub fn registered_names(&self) -> Vec<&'static str> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }
}

impl Default for TraitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TraitRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraitRegistry")
            .field("names", &self.registered_names())
            .finish()
    }
}
