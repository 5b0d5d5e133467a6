//! Text dumps of child lists and render scenes.

use std::fmt::Write;

use variadic_core::ChildList;

use crate::renderer::{RecordedRenderScene, RenderOp};
use crate::view::View;

pub fn format_child_list(children: &ChildList<View>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} children", children.len());
    for (index, child) in children.iter().enumerate() {
        let traits = child.traits();
        let mut names: Vec<&str> = traits.key_names().collect();
        names.sort_unstable();
        let _ = writeln!(
            out,
            "  [{index}] id={:?} traits={:?} view={:?}",
            child.identity(),
            names,
            child.payload()
        );
    }
    out
}

pub fn log_child_list(children: &ChildList<View>) {
    log::debug!("{}", format_child_list(children));
}

pub fn format_render_scene(scene: &RecordedRenderScene) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for op in scene.ops() {
        if matches!(op, RenderOp::EndStack) {
            depth = depth.saturating_sub(1);
        }
        let indent = "  ".repeat(depth);
        let _ = match op {
            RenderOp::Text(text) => writeln!(out, "{indent}Text {text:?}"),
            RenderOp::Spacer => writeln!(out, "{indent}Spacer"),
            RenderOp::BeginStack { axis, spacing } => {
                writeln!(out, "{indent}Stack {axis:?} spacing={spacing}")
            }
            RenderOp::EndStack => writeln!(out, "{indent}End"),
        };
        if matches!(op, RenderOp::BeginStack { .. }) {
            depth += 1;
        }
    }
    out
}

pub fn log_render_scene(scene: &RecordedRenderScene) {
    log::info!("render scene:\n{}", format_render_scene(scene));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::{Flattener, HostFlattener};
    use crate::renderer::Renderer;
    use crate::view::{text, vstack};

    #[test]
    fn scene_format_indents_stack_content() {
        let flattener = HostFlattener::new();
        let scene = Renderer::new(&flattener).render(&vstack((text("a"), text("b"))));
        assert_eq!(
            format_render_scene(&scene),
            "Stack Vertical spacing=0\n  Text \"a\"\n  Text \"b\"\nEnd\n"
        );
    }

    #[test]
    fn child_list_format_lists_traits() {
        let children = HostFlattener::new().flatten(&text("a").id(7).tag("t"));
        let dump = format_child_list(&children);
        assert!(dump.starts_with("1 children\n"));
        assert!(dump.contains("id=7"));
        assert!(dump.contains("[\"tag\"]"));
    }
}
