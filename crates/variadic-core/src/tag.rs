//! Well-known trait keys attached by host decorations.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::traits::TraitKey;

/// Value of the well-known tag trait.
#[derive(Clone, Default)]
pub enum TagValue {
    Tagged(Rc<dyn Any>),
    #[default]
    Untagged,
}

impl TagValue {
    /// Wraps `value` as a tag. String literals are stored as `String`.
    pub fn tagged<T: 'static>(value: T) -> Self {
        if let Some(text) = (&value as &dyn Any).downcast_ref::<&'static str>() {
            return TagValue::Tagged(Rc::new(text.to_string()));
        }
        TagValue::Tagged(Rc::new(value))
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, TagValue::Tagged(_))
    }

    /// Returns the tag payload when tagged with a value of type `T`.
    pub fn value<T: 'static>(&self) -> Option<&T> {
        match self {
            TagValue::Tagged(value) => value.downcast_ref::<T>(),
            TagValue::Untagged => None,
        }
    }
}

impl fmt::Debug for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Tagged(value) => {
                if let Some(text) = value.downcast_ref::<String>() {
                    write!(f, "Tagged({text:?})")
                } else {
                    f.write_str("Tagged(..)")
                }
            }
            TagValue::Untagged => f.write_str("Untagged"),
        }
    }
}

/// The trait key set by `.tag(..)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TagTrait;

impl TraitKey for TagTrait {
    type Value = TagValue;
    const NAME: &'static str = "tag";

    fn default_value() -> TagValue {
        TagValue::Untagged
    }
}

crate::declare_trait_key!(
    /// Relative priority a container uses when distributing space.
    pub LayoutPriorityTrait: f64 = 0.0, "layout_priority"
);

crate::declare_trait_key!(
    /// Stacking order among overlapping siblings.
    pub ZIndexTrait: f64 = 0.0, "z_index"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraitStore;

    #[test]
    fn tag_lookup_requires_matching_type() {
        let tag = TagValue::tagged("1");
        assert_eq!(tag.value::<String>().map(String::as_str), Some("1"));
        assert!(tag.value::<i32>().is_none());
        assert!(tag.is_tagged());
    }

    #[test]
    fn untagged_is_the_default() {
        let store = TraitStore::new();
        let tag = store.get::<TagTrait>();
        assert!(!tag.is_tagged());
        assert!(tag.value::<String>().is_none());
        assert_eq!(format!("{tag:?}"), "Untagged");
    }
}
