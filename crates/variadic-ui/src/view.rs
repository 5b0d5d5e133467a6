//! Composed view expressions.
//!
//! A [`View`] is the value a source closure returns. Leaves (`Text`, `Spacer`)
//! and containers (`Stack`) are unary: they flatten to exactly one child.
//! `Group`, `ForEach` and tuples are transparent and expand into their parts.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use variadic_core::{
    Identity, LayoutPriorityTrait, TagTrait, TagValue, TraitKey, TraitRegistry, TraitStore,
    ZIndexTrait,
};

use crate::variadic::{Subview, Variadic};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
    Depth,
}

/// A unary container. Its content is laid out inside it and never expanded
/// into the container's siblings.
#[derive(Clone)]
pub struct Stack {
    pub axis: Axis,
    pub spacing: f32,
    pub content: Box<View>,
}

/// Repetition over a data set, one element per item.
///
/// Elements are produced eagerly; each carries the item's key as identity
/// unless the element view assigns its own.
#[derive(Clone)]
pub struct ForEach {
    items: Rc<[(Identity, View)]>,
}

impl ForEach {
    pub fn new<T, K, KeyFn, ContentFn>(data: impl IntoIterator<Item = T>, key: KeyFn, content: ContentFn) -> Self
    where
        K: Hash + Eq + fmt::Debug + 'static,
        KeyFn: Fn(&T) -> K,
        ContentFn: Fn(&T) -> View,
    {
        let items = data
            .into_iter()
            .map(|item| (Identity::new(key(&item)), content(&item)))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[(Identity, View)] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Writes one trait into a child's store when the host flattens a decorated view.
#[derive(Clone)]
pub struct TraitWriter {
    key_name: &'static str,
    write: Rc<dyn Fn(&mut TraitStore)>,
}

impl TraitWriter {
    pub fn new<K: TraitKey>(value: K::Value) -> Self {
        TraitRegistry::global().ensure_registered::<K>();
        Self {
            key_name: K::NAME,
            write: Rc::new(move |store: &mut TraitStore| store.set::<K>(value.clone())),
        }
    }

    pub fn key_name(&self) -> &'static str {
        self.key_name
    }

    pub fn apply(&self, store: &mut TraitStore) {
        (self.write)(store);
    }
}

#[derive(Clone)]
pub enum Decoration {
    Id(Identity),
    Trait(TraitWriter),
}

impl fmt::Debug for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoration::Id(id) => write!(f, "id({id:?})"),
            Decoration::Trait(writer) => write!(f, "trait({})", writer.key_name()),
        }
    }
}

#[derive(Clone, Default)]
pub enum View {
    #[default]
    Empty,
    Text(Rc<str>),
    Spacer,
    Stack(Stack),
    Group(Vec<View>),
    ForEach(ForEach),
    Conditional {
        condition: bool,
        then: Box<View>,
        otherwise: Box<View>,
    },
    Decorated {
        view: Box<View>,
        decoration: Decoration,
    },
    /// Renders exactly as the wrapped child's payload.
    Subview(Subview),
    Variadic(Variadic),
}

impl View {
    fn decorated(self, decoration: Decoration) -> View {
        View::Decorated {
            view: Box::new(self),
            decoration,
        }
    }

    /// Assigns an explicit identity to the child this view flattens to.
    pub fn id<T>(self, id: T) -> View
    where
        T: Hash + Eq + fmt::Debug + 'static,
    {
        self.decorated(Decoration::Id(Identity::new(id)))
    }

    /// Attaches the well-known tag trait.
    pub fn tag<T: 'static>(self, tag: T) -> View {
        self.trait_value::<TagTrait>(TagValue::tagged(tag))
    }

    pub fn trait_value<K: TraitKey>(self, value: K::Value) -> View {
        self.decorated(Decoration::Trait(TraitWriter::new::<K>(value)))
    }

    pub fn layout_priority(self, priority: f64) -> View {
        self.trait_value::<LayoutPriorityTrait>(priority)
    }

    pub fn z_index(self, z_index: f64) -> View {
        self.trait_value::<ZIndexTrait>(z_index)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, View::Empty)
    }

    fn kind(&self) -> &'static str {
        match self {
            View::Empty => "Empty",
            View::Text(_) => "Text",
            View::Spacer => "Spacer",
            View::Stack(_) => "Stack",
            View::Group(_) => "Group",
            View::ForEach(_) => "ForEach",
            View::Conditional { .. } => "Conditional",
            View::Decorated { .. } => "Decorated",
            View::Subview(_) => "Subview",
            View::Variadic(_) => "Variadic",
        }
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Text(text) => write!(f, "Text({text:?})"),
            View::Stack(stack) => f
                .debug_struct("Stack")
                .field("axis", &stack.axis)
                .field("content", &stack.content)
                .finish(),
            View::Group(children) => f.debug_tuple("Group").field(children).finish(),
            View::ForEach(for_each) => write!(f, "ForEach({} items)", for_each.len()),
            View::Conditional {
                condition,
                then,
                otherwise,
            } => {
                if *condition {
                    f.debug_tuple("If").field(then).finish()
                } else {
                    f.debug_tuple("Else").field(otherwise).finish()
                }
            }
            View::Decorated { view, decoration } => write!(f, "{view:?}.{decoration:?}"),
            View::Subview(subview) => write!(f, "Subview({:?})", subview.id()),
            other => f.write_str(other.kind()),
        }
    }
}

pub fn text(value: impl Into<Rc<str>>) -> View {
    View::Text(value.into())
}

pub fn spacer() -> View {
    View::Spacer
}

pub fn empty() -> View {
    View::Empty
}

fn stack(axis: Axis, spacing: f32, content: impl Into<View>) -> View {
    View::Stack(Stack {
        axis,
        spacing,
        content: Box::new(content.into()),
    })
}

pub fn vstack(content: impl Into<View>) -> View {
    stack(Axis::Vertical, 0.0, content)
}

pub fn hstack(content: impl Into<View>) -> View {
    stack(Axis::Horizontal, 0.0, content)
}

pub fn zstack(content: impl Into<View>) -> View {
    stack(Axis::Depth, 0.0, content)
}

/// Stack with explicit spacing between its children.
pub fn spaced_stack(axis: Axis, spacing: f32, content: impl Into<View>) -> View {
    stack(axis, spacing, content)
}

pub fn group<I>(children: I) -> View
where
    I: IntoIterator,
    I::Item: Into<View>,
{
    View::Group(children.into_iter().map(Into::into).collect())
}

pub fn for_each<T, K, KeyFn, ContentFn>(data: impl IntoIterator<Item = T>, key: KeyFn, content: ContentFn) -> View
where
    K: Hash + Eq + fmt::Debug + 'static,
    KeyFn: Fn(&T) -> K,
    ContentFn: Fn(&T) -> View,
{
    View::ForEach(ForEach::new(data, key, content))
}

/// Shows `view` only when `condition` holds.
pub fn when(condition: bool, view: impl Into<View>) -> View {
    when_else(condition, view, View::Empty)
}

pub fn when_else(condition: bool, then: impl Into<View>, otherwise: impl Into<View>) -> View {
    View::Conditional {
        condition,
        then: Box::new(then.into()),
        otherwise: Box::new(otherwise.into()),
    }
}

impl From<&str> for View {
    fn from(value: &str) -> Self {
        text(value)
    }
}

impl From<String> for View {
    fn from(value: String) -> Self {
        text(value)
    }
}

impl From<Vec<View>> for View {
    fn from(children: Vec<View>) -> Self {
        View::Group(children)
    }
}

impl From<()> for View {
    fn from(_: ()) -> Self {
        View::Empty
    }
}

impl From<Subview> for View {
    fn from(subview: Subview) -> Self {
        View::Subview(subview)
    }
}

impl From<Variadic> for View {
    fn from(variadic: Variadic) -> Self {
        View::Variadic(variadic)
    }
}

macro_rules! impl_tuple_views {
    ($($name:ident),+) => {
        impl<$($name: Into<View>),+> From<($($name,)+)> for View {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                View::Group(vec![$($name.into()),+])
            }
        }
    };
}

impl_tuple_views!(A);
impl_tuple_views!(A, B);
impl_tuple_views!(A, B, C);
impl_tuple_views!(A, B, C, D);
impl_tuple_views!(A, B, C, D, E);
impl_tuple_views!(A, B, C, D, E, F);
impl_tuple_views!(A, B, C, D, E, F, G);
impl_tuple_views!(A, B, C, D, E, F, G, H);
