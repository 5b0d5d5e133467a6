use std::cell::RefCell;
use std::rc::Rc;

use variadic_ui::{
    format_render_scene, variadic, Host, HostConfig, RecordedRenderScene, VariadicCollection, View,
};

/// Drives render passes over a content function and records what happened.
///
/// Content is rebuilt on every [`render`](Self::render), the way a host
/// re-runs a view body on each pass.
pub struct VariadicTestRule {
    host: Host,
    content: Option<Box<dyn Fn() -> View>>,
    last_scene: Option<RecordedRenderScene>,
}

impl VariadicTestRule {
    pub fn new() -> Self {
        Self::with_config(HostConfig::new())
    }

    pub fn with_config(config: HostConfig) -> Self {
        Self {
            host: Host::new(config),
            content: None,
            last_scene: None,
        }
    }

    pub fn set_content(&mut self, content: impl Fn() -> View + 'static) {
        self.content = Some(Box::new(content));
        self.last_scene = None;
    }

    /// Runs one render pass and returns its scene.
    pub fn render(&mut self) -> &RecordedRenderScene {
        let Some(content) = self.content.as_ref() else {
            panic!("set_content must be called before render");
        };
        let root = content();
        let scene = self.host.render(&root);
        log::debug!("test rule scene:\n{}", format_render_scene(&scene));
        self.last_scene.insert(scene)
    }

    pub fn last_scene(&self) -> Option<&RecordedRenderScene> {
        self.last_scene.as_ref()
    }

    /// Flattens `source` with the rule's host.
    pub fn collect(&self, source: impl Into<View>) -> VariadicCollection {
        self.host.collect(&source.into())
    }

    /// Renders a variadic adapter around `source` and returns the collection
    /// its content function received.
    pub fn capture<S, V>(&mut self, source: S) -> VariadicCollection
    where
        S: Fn() -> V + 'static,
        V: Into<View>,
    {
        let captured: Rc<RefCell<Option<VariadicCollection>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&captured);
        let root = variadic(source, move |children| {
            *sink.borrow_mut() = Some(children);
            View::Empty
        });
        self.host.render(&root);
        let collection = captured.borrow_mut().take();
        match collection {
            Some(collection) => collection,
            None => panic!("variadic content was not invoked"),
        }
    }

    pub fn render_count(&self) -> u64 {
        self.host.render_passes()
    }

    pub fn host(&self) -> &Host {
        &self.host
    }
}

impl Default for VariadicTestRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use variadic_ui::{text, vstack};

    #[test]
    fn render_requires_content_and_counts_passes() {
        let mut rule = VariadicTestRule::new();
        rule.set_content(|| vstack(text("a")));
        assert_eq!(rule.render().texts(), vec!["a"]);
        rule.render();
        assert_eq!(rule.render_count(), 2);
        assert!(rule.last_scene().is_some());
    }

    #[test]
    fn capture_returns_content_collection() {
        let mut rule = VariadicTestRule::new();
        let collection = rule.capture(|| (text("a"), text("b")));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    #[should_panic(expected = "set_content must be called before render")]
    fn render_without_content_panics() {
        VariadicTestRule::new().render();
    }
}
