//! Variadic child views for a declarative view tree.
//!
//! A container built with [`variadic`] receives its source's children as a
//! [`VariadicCollection`]: an ordered, indexable list of [`Subview`]s that
//! keep the identity, traits and tag the host attached to each child.

pub mod debug;
pub mod flatten;
pub mod host;
pub mod renderer;
pub mod variadic;
pub mod view;

pub use flatten::{Flattener, HostConfig, HostFlattener, DEBUG_FLATTEN_ENV};
pub use host::Host;
pub use renderer::{RecordedRenderScene, RenderOp, Renderer};
pub use variadic::{variadic, Subview, Variadic, VariadicCollection};
pub use view::{
    empty, for_each, group, hstack, spaced_stack, spacer, text, vstack, when, when_else, zstack,
    Axis, Decoration, ForEach, Stack, TraitWriter, View,
};

pub use debug::{format_child_list, format_render_scene, log_child_list, log_render_scene};

pub use variadic_core::{
    declare_trait_key, Identity, LayoutPriorityTrait, StructuralId, TagTrait, TagValue, TraitKey,
    TraitRegistry, ZIndexTrait,
};

pub mod prelude {
    pub use crate::variadic::{variadic, Subview, VariadicCollection};
    pub use crate::view::{
        empty, for_each, group, hstack, spacer, text, vstack, when, when_else, zstack, View,
    };
    pub use crate::{declare_trait_key, Identity, TraitKey};
}
