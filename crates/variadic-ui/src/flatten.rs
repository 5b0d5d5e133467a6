//! Host flattening of view expressions into child lists.

use smallvec::SmallVec;
use variadic_core::{Child, ChildList, Identity, StructuralId, TraitStore};

use crate::view::{Decoration, TraitWriter, View};

/// Environment variable that turns on child-list dumps for every flattening pass.
pub const DEBUG_FLATTEN_ENV: &str = "VARIADIC_DEBUG_FLATTEN";

/// Turns a source view expression into the ordered list of children the
/// host framework produces for it.
pub trait Flattener {
    fn flatten(&self, source: &View) -> ChildList<View>;
}

impl<F: Flattener + ?Sized> Flattener for &F {
    fn flatten(&self, source: &View) -> ChildList<View> {
        (**self).flatten(source)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostConfig {
    pub debug_flatten: bool,
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads [`DEBUG_FLATTEN_ENV`].
    pub fn from_env() -> Self {
        Self {
            debug_flatten: std::env::var_os(DEBUG_FLATTEN_ENV).is_some(),
        }
    }

    pub fn debug_flatten(mut self, enabled: bool) -> Self {
        self.debug_flatten = enabled;
        self
    }
}

struct PendingChild {
    path: StructuralId,
    explicit_id: Option<Identity>,
    base_traits: Option<TraitStore>,
    writers: SmallVec<[TraitWriter; 2]>,
    view: View,
}

impl PendingChild {
    fn leaf(path: &StructuralId, view: &View) -> Self {
        Self {
            path: path.clone(),
            explicit_id: None,
            base_traits: None,
            writers: SmallVec::new(),
            view: view.clone(),
        }
    }

    fn into_child(self) -> Child<View> {
        let identity = self.explicit_id.unwrap_or_else(|| self.path.into());
        let mut traits = self.base_traits.unwrap_or_default();
        // Writers were collected innermost first; the innermost decoration wins.
        for writer in self.writers.iter().rev() {
            writer.apply(&mut traits);
        }
        Child::with_traits(identity, traits, self.view)
    }
}

/// The reference host flattening rule.
///
/// * `Empty` yields nothing.
/// * Leaves, stacks and subviews yield one child each.
/// * Groups, tuples and `ForEach` expand recursively.
/// * Conditionals expand their active branch.
/// * Decorations apply to every child their view expands to; an explicit id
///   applies only when the view expands to exactly one child.
/// * A nested adapter is evaluated and its output expanded in place.
/// * A subview keeps an explicit identity. A positional one is re-rooted
///   under the subview's new position.
#[derive(Clone, Debug, Default)]
pub struct HostFlattener {
    config: HostConfig,
}

impl HostFlattener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HostConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> HostConfig {
        self.config
    }

    fn expand(&self, view: &View, path: &StructuralId, out: &mut Vec<PendingChild>) {
        match view {
            View::Empty => {}
            View::Text(_) | View::Spacer | View::Stack(_) => {
                out.push(PendingChild::leaf(path, view));
            }
            View::Subview(subview) => {
                let mut pending = PendingChild::leaf(path, view);
                // Positional ids are only unique within the list they came from.
                let id = match subview.id().downcast_ref::<StructuralId>() {
                    Some(inner) => path.join(inner).into(),
                    None => subview.id().clone(),
                };
                pending.explicit_id = Some(id);
                pending.base_traits = Some(subview.child().traits().clone());
                out.push(pending);
            }
            View::Group(children) => {
                for (index, child) in children.iter().enumerate() {
                    self.expand(child, &path.child(index), out);
                }
            }
            View::ForEach(for_each) => {
                for (index, (key, item)) in for_each.items().iter().enumerate() {
                    let start = out.len();
                    self.expand(item, &path.child(index), out);
                    let produced = &mut out[start..];
                    if produced.len() == 1 {
                        produced[0].explicit_id.get_or_insert_with(|| key.clone());
                    } else {
                        for (offset, pending) in produced.iter_mut().enumerate() {
                            pending
                                .explicit_id
                                .get_or_insert_with(|| Identity::new((key.clone(), offset)));
                        }
                    }
                }
            }
            View::Conditional {
                condition,
                then,
                otherwise,
            } => {
                if *condition {
                    self.expand(then, &path.child(0), out);
                } else {
                    self.expand(otherwise, &path.child(1), out);
                }
            }
            View::Decorated { view, decoration } => {
                let start = out.len();
                self.expand(view, path, out);
                let produced = &mut out[start..];
                match decoration {
                    Decoration::Id(id) => {
                        if produced.len() == 1 {
                            produced[0].explicit_id.get_or_insert_with(|| id.clone());
                        } else {
                            log::trace!(
                                "id {:?} ignored: decorated view expanded to {} children",
                                id,
                                produced.len()
                            );
                        }
                    }
                    Decoration::Trait(writer) => {
                        for pending in produced.iter_mut() {
                            pending.writers.push(writer.clone());
                        }
                    }
                }
            }
            View::Variadic(variadic) => {
                let output = variadic.evaluate(self);
                self.expand(&output, path, out);
            }
        }
    }
}

impl Flattener for HostFlattener {
    fn flatten(&self, source: &View) -> ChildList<View> {
        let mut pending = Vec::new();
        self.expand(source, &StructuralId::root(), &mut pending);
        let children: ChildList<View> = pending.into_iter().map(PendingChild::into_child).collect();

        log::debug!("flattened {:?} into {} children", source, children.len());
        for child in children.iter() {
            log::trace!("  child {:?}", child.identity());
        }
        if self.config.debug_flatten {
            crate::debug::log_child_list(&children);
        }
        children
    }
}
