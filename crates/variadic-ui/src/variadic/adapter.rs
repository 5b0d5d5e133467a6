use std::fmt;
use std::rc::Rc;

use super::VariadicCollection;
use crate::flatten::Flattener;
use crate::view::View;

/// Composes a source expression with a content function over its children.
///
/// Evaluation flattens the source through the host [`Flattener`], wraps the
/// children in a [`VariadicCollection`] and returns whatever the content
/// function builds from it. Nothing is retained between evaluations.
#[derive(Clone)]
pub struct Variadic {
    source: Rc<dyn Fn() -> View>,
    content: Rc<dyn Fn(VariadicCollection) -> View>,
}

impl Variadic {
    pub fn new<S, C, V>(source: S, content: C) -> Self
    where
        S: Fn() -> V + 'static,
        V: Into<View>,
        C: Fn(VariadicCollection) -> View + 'static,
    {
        Self {
            source: Rc::new(move || -> View { source().into() }),
            content: Rc::new(content),
        }
    }

    /// Runs only the flattening phase.
    pub fn collect(&self, flattener: &dyn Flattener) -> VariadicCollection {
        let source = (self.source)();
        VariadicCollection::new(flattener.flatten(&source))
    }

    /// Runs both phases and returns the content's output unchanged.
    pub fn evaluate(&self, flattener: &dyn Flattener) -> View {
        let collection = self.collect(flattener);
        log::trace!("variadic content invoked with {} subviews", collection.len());
        (self.content)(collection)
    }
}

impl fmt::Debug for Variadic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Variadic")
    }
}

/// Builds a [`View::Variadic`] from a source and a content function.
pub fn variadic<S, C, V>(source: S, content: C) -> View
where
    S: Fn() -> V + 'static,
    V: Into<View>,
    C: Fn(VariadicCollection) -> View + 'static,
{
    View::Variadic(Variadic::new(source, content))
}
