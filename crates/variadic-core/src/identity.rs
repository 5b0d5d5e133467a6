//! Type-erased child identity.
//!
//! Every flattened child carries an [`Identity`]: either the value the producer
//! assigned with `.id(..)` or a [`StructuralId`] fallback derived from the
//! child's position in the source expression. Identities compare by dynamic
//! type first and value second, so `1u32` and `1u64` are different identities.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::rc::Rc;

use smallvec::SmallVec;

/// Object-safe view over a hashable identity value.
trait IdentityValue: Any {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn IdentityValue) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn type_name(&self) -> &'static str;
}

impl<T> IdentityValue for T
where
    T: Hash + Eq + fmt::Debug + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn IdentityValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A type-erased, hashable identity.
///
/// Cloning is a reference-count bump. String literals are stored as `String`
/// so that `Identity::new("row")` narrows with `downcast_ref::<String>()`.
#[derive(Clone)]
pub struct Identity(Rc<dyn IdentityValue>);

impl Identity {
    pub fn new<T>(value: T) -> Self
    where
        T: Hash + Eq + fmt::Debug + 'static,
    {
        let any = &value as &dyn Any;
        if let Some(identity) = any.downcast_ref::<Identity>() {
            return identity.clone();
        }
        if let Some(text) = any.downcast_ref::<&'static str>() {
            return Identity(Rc::new(text.to_string()));
        }
        Identity(Rc::new(value))
    }

    /// Returns a reference to the underlying value when its dynamic type is `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Returns an owned copy of the underlying value when its dynamic type is `T`.
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    pub fn value_type_id(&self) -> TypeId {
        self.0.as_any().type_id()
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Returns `true` if this identity is a host-assigned positional fallback.
    pub fn is_structural(&self) -> bool {
        self.is::<StructuralId>()
    }

    /// Stable 64-bit key for this identity within the current process.
    ///
    /// Used where a compact key is needed (diffing tables, logging).
    pub fn hash_key(&self) -> u64 {
        let state = ahash::RandomState::with_seeds(
            0x243f_6a88_85a3_08d3,
            0x1319_8a2e_0370_7344,
            0xa409_3822_299f_31d0,
            0x082e_fa98_ec4e_6c89,
        );
        let mut hasher = state.build_hasher();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0.dyn_eq(other.0.as_ref())
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value_type_id().hash(state);
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.dyn_fmt(f)
    }
}

impl From<StructuralId> for Identity {
    fn from(id: StructuralId) -> Self {
        Identity::new(id)
    }
}

/// Positional fallback identity.
///
/// The path lists the child's index at every transparent level between the
/// flattening root and the leaf, outermost first.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct StructuralId {
    path: SmallVec<[usize; 4]>,
}

impl StructuralId {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_path(path: &[usize]) -> Self {
        Self {
            path: SmallVec::from_slice(path),
        }
    }

    /// Returns a new id one level deeper.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(index);
        Self { path }
    }

    /// Appends `suffix` below this id.
    pub fn join(&self, suffix: &StructuralId) -> Self {
        let mut path = self.path.clone();
        path.extend_from_slice(&suffix.path);
        Self { path }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl fmt::Debug for StructuralId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        for (i, index) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}
