//! Type-erased access to the children of a composed view.
//!
//! - [`Variadic`] - flattens a source expression and hands the children to a content function
//! - [`VariadicCollection`] - ordered, indexable view over the flattened children
//! - [`Subview`] - one child: identity, traits and tag, rendered as its payload
//!
//! # Example
//!
//! ```rust,ignore
//! variadic(
//!     || (text("One"), text("Two"), text("Three")),
//!     |children| {
//!         vstack(group(children.iter().map(|child| {
//!             View::from((View::from(child), text("---")))
//!         })))
//!     },
//! );
//! ```

mod adapter;
mod collection;
mod subview;

pub use adapter::{variadic, Variadic};
pub use collection::{IntoIter, Iter, VariadicCollection};
pub use subview::Subview;
