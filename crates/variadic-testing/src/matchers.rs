use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;

use variadic_core::{Identity, TraitKey};
use variadic_ui::{Subview, VariadicCollection};

pub struct SubviewMatcher {
    description: String,
    matcher: Box<dyn Fn(&Subview) -> bool>,
}

impl SubviewMatcher {
    pub fn new(
        description: impl Into<String>,
        matcher: impl Fn(&Subview) -> bool + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            matcher: Box::new(matcher),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matches(&self, subview: &Subview) -> bool {
        (self.matcher)(subview)
    }

    /// Indices of the subviews in `collection` that match.
    pub fn find_all(&self, collection: &VariadicCollection) -> Vec<usize> {
        collection
            .iter()
            .enumerate()
            .filter(|(_, subview)| self.matches(subview))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn assert_any(&self, collection: &VariadicCollection) {
        assert!(
            collection.iter().any(|subview| self.matches(&subview)),
            "no subview matches {} in {:?}",
            self.description,
            collection
        );
    }

    pub fn assert_all(&self, collection: &VariadicCollection) {
        for (index, subview) in collection.iter().enumerate() {
            assert!(
                self.matches(&subview),
                "subview [{index}] {:?} does not match {}",
                subview,
                self.description
            );
        }
    }

    pub fn assert_none(&self, collection: &VariadicCollection) {
        let found = self.find_all(collection);
        assert!(
            found.is_empty(),
            "subviews {found:?} unexpectedly match {}",
            self.description
        );
    }
}

pub fn has_id<T>(id: T) -> SubviewMatcher
where
    T: Hash + Eq + Debug + 'static,
{
    let id = Identity::new(id);
    SubviewMatcher::new(format!("has_id({id:?})"), move |subview| subview.id() == &id)
}

/// Matches subviews tagged with `tag`.
///
/// String literal tags are stored as `String`, so a `&str` argument is
/// compared against the `String` tag.
pub fn has_tag<T>(tag: T) -> SubviewMatcher
where
    T: PartialEq + Debug + Clone + 'static,
{
    let description = format!("has_tag({tag:?})");
    if let Some(text) = (&tag as &dyn Any).downcast_ref::<&'static str>() {
        let text = text.to_string();
        return SubviewMatcher::new(description, move |subview| {
            subview.tag::<String>().as_deref() == Some(text.as_str())
        });
    }
    SubviewMatcher::new(description, move |subview| {
        subview.tag::<T>().as_ref() == Some(&tag)
    })
}

pub fn has_trait<K>(value: K::Value) -> SubviewMatcher
where
    K: TraitKey,
    K::Value: PartialEq + Debug,
{
    SubviewMatcher::new(format!("has_trait({}={:?})", K::NAME, value), move |subview| {
        subview.trait_value::<K>() == value
    })
}

pub fn is_structural() -> SubviewMatcher {
    SubviewMatcher::new("is_structural", |subview| subview.id().is_structural())
}
