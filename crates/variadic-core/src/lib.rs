//! Core data model for variadic child-view collections.
//!
//! A host framework flattens a composed view expression into an ordered list of
//! [`Child`] elements. Each child carries a type-erased [`Identity`] and a
//! [`TraitStore`] of typed metadata keyed by [`TraitKey`] types. Traits can
//! also be resolved by name through the process-wide [`TraitRegistry`].

pub mod child;
pub mod collections;
pub mod identity;
pub mod registry;
pub mod tag;
pub mod traits;

pub use child::{Child, ChildList};
pub use identity::{Identity, StructuralId};
pub use registry::{ExtractAs, RegistryError, TraitDescriptor, TraitRegistry, TraitVisitor};
pub use tag::{LayoutPriorityTrait, TagTrait, TagValue, ZIndexTrait};
pub use traits::{TraitKey, TraitStore};

pub mod prelude {
    pub use crate::declare_trait_key;
    pub use crate::{Child, ChildList, Identity, StructuralId, TagValue, TraitKey, TraitStore};
}
