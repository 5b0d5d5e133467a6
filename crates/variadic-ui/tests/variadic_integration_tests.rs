//! Integration tests for variadic collections driven through the host
//! render pipeline, the way a container view would use them.

use std::cell::RefCell;
use std::rc::Rc;

use variadic_testing::prelude::*;
use variadic_ui::{
    declare_trait_key, for_each, group, hstack, spacer, text, variadic, vstack, when, Identity,
    LayoutPriorityTrait, StructuralId, TagTrait, TagValue, View,
};

declare_trait_key!(Badge: u32 = 0, "integration_badge");
declare_trait_key!(Highlighted: bool = false, "integration_highlighted");

#[test]
fn count_and_identities_match_flattened_children() {
    let mut rule = VariadicTestRule::new();
    let collection = rule.capture(|| {
        (
            text("header").id("header"),
            for_each(1..=3, |n| *n, |n| text(format!("row {n}"))),
            text("footer"),
        )
    });

    assert_eq!(collection.len(), 5);
    assert_eq!(collection.subview(0).id_as::<String>(), Some("header".to_string()));
    assert_eq!(collection.subview(1).id_as::<i32>(), Some(1));
    assert_eq!(collection.subview(3).id_as::<i32>(), Some(3));
    assert_eq!(
        collection.subview(4).id_as::<StructuralId>(),
        Some(StructuralId::from_path(&[2]))
    );
}

#[test]
fn id_narrowing_to_wrong_type_is_absent() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect(text("a").id("1"));
    let subview = collection.subview(0);
    assert_eq!(subview.id_as::<String>(), Some("1".to_string()));
    assert_eq!(subview.id_as::<i32>(), None);
}

#[test]
fn tag_lookup_matches_type_and_presence() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect((text("a").tag("1"), text("b")));

    assert_eq!(collection.subview(0).tag::<String>(), Some("1".to_string()));
    assert_eq!(collection.subview(0).tag::<i32>(), None);
    assert_eq!(collection.subview(1).tag::<String>(), None);

    has_tag("1".to_string()).assert_any(&collection);
    has_tag(1i32).assert_none(&collection);
}

#[test]
fn trait_lookup_by_name_and_by_key() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect((text("a").trait_value::<Badge>(7), text("b")));

    let tagged = collection.subview(0);
    assert_eq!(tagged.trait_value::<Badge>(), 7);
    assert_eq!(tagged.trait_named::<u32>("integration_badge"), Some(7));
    assert_eq!(tagged.trait_named::<String>("integration_badge"), None);

    let plain = collection.subview(1);
    assert_eq!(plain.trait_value::<Badge>(), 0);
    assert_eq!(plain.trait_named::<u32>("integration_badge"), Some(0));
    assert_eq!(plain.trait_named::<u32>("no_such_trait"), None);
}

#[test]
fn tag_is_reachable_by_name() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect(text("a").tag(42u8));
    let tag = collection.subview(0).trait_named::<TagValue>("tag");
    assert_eq!(tag.and_then(|tag| tag.value::<u8>().copied()), Some(42));
}

#[test]
fn adapter_is_idempotent_across_passes() {
    let source = || {
        (
            text("a").id(1).tag("first"),
            text("b").layout_priority(2.0),
            group([text("c"), text("d")]),
        )
    };
    let mut rule = VariadicTestRule::new();
    let first = rule.capture(source);
    let second = rule.capture(source);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id(), b.id());
        assert_eq!(a.tag::<String>(), b.tag::<String>());
        assert_eq!(a.layout_priority(), b.layout_priority());
        assert!(!a.ptr_eq(&b));
    }
    assert_eq!(rule.render_count(), 2);
}

#[test]
fn empty_and_single_sources() {
    let mut rule = VariadicTestRule::new();
    let empty = rule.capture(View::default);
    assert!(empty.is_empty());
    assert_eq!(empty.iter().next(), None);

    let single = rule.capture(|| text("only"));
    assert_eq!(single.len(), 1);
}

#[test]
fn nested_transparent_groups_flatten_recursively() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect(group([group([text("a"), text("b")]), text("c")]));
    assert_eq!(collection.len(), 3);

    let nested = rule.collect(group([group([text("a"), text("b")]), group([text("c")])]));
    assert_eq!(nested.len(), 3);
    is_structural().assert_all(&nested);
}

#[test]
fn unary_container_is_one_child() {
    let rule = VariadicTestRule::new();
    assert_eq!(rule.collect(vstack((text("a"), text("b")))).len(), 1);
    assert_eq!(rule.collect((hstack(text("a")), spacer())).len(), 2);
    assert_eq!(rule.collect(when(false, text("hidden"))).len(), 0);
}

#[test]
fn trait_mutation_is_visible_through_later_wrappers() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect((text("a"), text("b")));

    collection.subview(0).set_trait::<Highlighted>(true);

    assert!(collection.subview(0).trait_value::<Highlighted>());
    assert!(!collection.subview(1).trait_value::<Highlighted>());
    has_trait::<Highlighted>(true).assert_any(&collection);
}

#[test]
fn content_can_filter_and_key_subviews() {
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selected);

    let mut rule = VariadicTestRule::new();
    rule.set_content(move || {
        let sink = Rc::clone(&sink);
        vstack(variadic(
            || for_each(["apple", "pear", "plum"], |s| s.to_string(), |s| text(*s).tag(s.len())),
            move |children| {
                let short: Vec<View> = children
                    .iter()
                    .filter(|child| child.tag::<usize>().is_some_and(|len| len == 4))
                    .map(View::from)
                    .collect();
                *sink.borrow_mut() = children
                    .keyed()
                    .keys()
                    .filter_map(|id| id.downcast::<String>())
                    .collect();
                short.into()
            },
        ))
    });

    assert_eq!(rule.render().texts(), vec!["pear", "plum"]);
    assert_eq!(
        *selected.borrow(),
        vec!["apple".to_string(), "pear".to_string(), "plum".to_string()]
    );
}

#[test]
fn subviews_passed_back_through_an_adapter_keep_identity_and_traits() {
    let mut rule = VariadicTestRule::new();
    let outer = rule.capture(|| {
        variadic(
            || (text("a").id("a").tag(1), text("b").id("b")),
            |children| children.iter().rev().map(View::from).collect::<Vec<_>>().into(),
        )
    });

    assert_eq!(outer.len(), 2);
    assert!(has_id("b").matches(&outer.subview(0)));
    assert_eq!(outer.subview(0).id(), &Identity::new("b"));
    assert_eq!(outer.subview(1).tag::<i32>(), Some(1));
}

#[test]
fn layout_priority_sorting_in_content() {
    let mut rule = VariadicTestRule::new();
    rule.set_content(|| {
        variadic(
            || {
                (
                    text("low").layout_priority(1.0),
                    text("high").layout_priority(3.0),
                    text("mid").layout_priority(2.0),
                )
            },
            |children| {
                let mut sorted = children.to_vec();
                sorted.sort_by(|a, b| b.layout_priority().total_cmp(&a.layout_priority()));
                vstack(sorted.into_iter().map(View::from).collect::<Vec<_>>())
            },
        )
    });
    assert_eq!(rule.render().texts(), vec!["high", "mid", "low"]);
}

#[test]
fn group_decoration_reaches_every_child() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect(group([text("a"), text("b")]).trait_value::<LayoutPriorityTrait>(5.0));
    has_trait::<LayoutPriorityTrait>(5.0).assert_all(&collection);
    assert!(matches!(
        collection.subview(0).trait_value::<TagTrait>(),
        TagValue::Untagged
    ));
}

#[test]
fn nested_adapter_children_have_unique_identities_among_siblings() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect((
        variadic(
            || (text("a"), text("b")),
            |children| children.iter().map(View::from).collect::<Vec<_>>().into(),
        ),
        text("c"),
    ));

    assert_eq!(collection.len(), 3);
    assert_eq!(collection.keyed().len(), 3);
    is_structural().assert_all(&collection);
    assert_eq!(collection.position_of(collection.subview(2).id()), Some(2));
}

declare_trait_key!(Pinned: bool = false, "integration_pinned_without_decoration");

#[test]
fn trait_set_through_subview_is_found_by_name() {
    let rule = VariadicTestRule::new();
    let collection = rule.collect((text("a"), text("b")));

    collection.subview(0).set_trait::<Pinned>(true);

    let pinned = collection.subview(0);
    assert!(pinned.trait_value::<Pinned>());
    assert_eq!(
        pinned.trait_named::<bool>("integration_pinned_without_decoration"),
        Some(true)
    );
    assert_eq!(
        collection
            .subview(1)
            .trait_named::<bool>("integration_pinned_without_decoration"),
        Some(false)
    );
}
