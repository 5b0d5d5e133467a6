//! Headless renderer that records a flat list of draw operations.

use std::rc::Rc;

use crate::flatten::Flattener;
use crate::view::{Axis, View};

#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    Text(Rc<str>),
    Spacer,
    BeginStack { axis: Axis, spacing: f32 },
    EndStack,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedRenderScene {
    ops: Vec<RenderOp>,
}

impl RecordedRenderScene {
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Text runs in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                RenderOp::Text(text) => Some(&**text),
                _ => None,
            })
            .collect()
    }
}

/// Walks a view tree, evaluating variadic adapters with the given flattener.
pub struct Renderer<'a> {
    flattener: &'a dyn Flattener,
}

impl<'a> Renderer<'a> {
    pub fn new(flattener: &'a dyn Flattener) -> Self {
        Self { flattener }
    }

    pub fn render(&self, view: &View) -> RecordedRenderScene {
        let mut scene = RecordedRenderScene::default();
        self.render_into(view, &mut scene.ops);
        log::debug!("rendered scene with {} ops", scene.len());
        scene
    }

    fn render_into(&self, view: &View, ops: &mut Vec<RenderOp>) {
        match view {
            View::Empty => {}
            View::Text(text) => ops.push(RenderOp::Text(Rc::clone(text))),
            View::Spacer => ops.push(RenderOp::Spacer),
            View::Stack(stack) => {
                ops.push(RenderOp::BeginStack {
                    axis: stack.axis,
                    spacing: stack.spacing,
                });
                self.render_into(&stack.content, ops);
                ops.push(RenderOp::EndStack);
            }
            View::Group(children) => {
                for child in children {
                    self.render_into(child, ops);
                }
            }
            View::ForEach(for_each) => {
                for (_, item) in for_each.items() {
                    self.render_into(item, ops);
                }
            }
            View::Conditional {
                condition,
                then,
                otherwise,
            } => {
                let branch = if *condition { then } else { otherwise };
                self.render_into(branch, ops);
            }
            View::Decorated { view, .. } => self.render_into(view, ops),
            View::Subview(subview) => self.render_into(subview.view(), ops),
            View::Variadic(variadic) => {
                let output = variadic.evaluate(self.flattener);
                self.render_into(&output, ops);
            }
        }
    }
}
