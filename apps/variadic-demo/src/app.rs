//! Preview screens for variadic containers.

use variadic_ui::prelude::*;
use variadic_ui::{format_render_scene, log_render_scene, Host, Subview};

declare_trait_key!(
    /// Marks a child that a container should draw emphasised.
    pub Emphasis: bool = false, "emphasis"
);

/// Places a separator between consecutive children.
pub(crate) fn divided_list(source: impl Fn() -> View + 'static) -> View {
    variadic(source, |children| {
        let last = children.len().saturating_sub(1);
        let mut rows = Vec::with_capacity(children.len() * 2);
        for (index, child) in children.iter().enumerate() {
            rows.push(View::from(child));
            if index < last {
                rows.push(text("----"));
            }
        }
        vstack(rows)
    })
}

/// Shows only the child whose tag equals `selection`.
pub(crate) fn tag_picker(selection: &'static str, source: impl Fn() -> View + 'static) -> View {
    variadic(source, move |children| {
        let picked = children
            .iter()
            .find(|child| child.tag::<String>().as_deref() == Some(selection));
        match picked {
            Some(child) => hstack((text(format!("[{selection}]")), child)),
            None => text(format!("no option tagged {selection:?}")),
        }
    })
}

/// Orders children by descending layout priority, emphasised ones first.
pub(crate) fn priority_column(source: impl Fn() -> View + 'static) -> View {
    variadic(source, |children| {
        let mut ordered: Vec<Subview> = children.to_vec();
        ordered.sort_by(|a, b| {
            b.trait_value::<Emphasis>()
                .cmp(&a.trait_value::<Emphasis>())
                .then(b.layout_priority().total_cmp(&a.layout_priority()))
        });
        vstack(ordered.into_iter().map(View::from).collect::<Vec<_>>())
    })
}

fn fruit_rows() -> View {
    for_each(["Apple", "Banana", "Cherry"], |name| name.to_string(), |name| text(*name))
}

fn options() -> View {
    group([
        text("Small").tag("s"),
        text("Medium").tag("m"),
        text("Large").tag("l"),
    ])
}

fn tasks() -> View {
    View::from((
        text("Write docs").layout_priority(1.0),
        text("Fix crash").layout_priority(5.0).trait_value::<Emphasis>(true),
        text("Refactor").layout_priority(3.0),
        when(true, text("Review").layout_priority(2.0)),
    ))
}

pub(crate) fn previews() -> Vec<(&'static str, View)> {
    vec![
        ("Divided list", divided_list(fruit_rows)),
        ("Divided mixed content", divided_list(|| {
            View::from((text("Header"), group([text("One"), text("Two")]), hstack(text("Row"))))
        })),
        ("Tag picker", tag_picker("m", options)),
        ("Tag picker without match", tag_picker("xl", options)),
        ("Priority column", priority_column(tasks)),
    ]
}

pub(crate) fn run_previews() {
    let host = Host::from_env();
    for (title, view) in previews() {
        let scene = host.render(&view);
        log_render_scene(&scene);
        println!("== {title}\n{}", format_render_scene(&scene));
    }
    log::info!("rendered {} previews", host.render_passes());
}
