use super::*;
use crate::flatten::{Flattener, HostFlattener};
use crate::view::{for_each, group, text, vstack};
use variadic_core::StructuralId;

fn collect(source: View) -> VariadicCollection {
    VariadicCollection::new(HostFlattener::new().flatten(&source))
}

#[test]
fn count_and_identities_follow_child_list() {
    let collection = collect(for_each(["a", "b", "c"], |s| s.to_string(), |s| text(*s)));
    assert_eq!(collection.len(), 3);
    for (index, child) in collection.children().iter().enumerate() {
        assert_eq!(collection.subview(index).id(), child.identity());
    }
}

#[test]
fn empty_collection_iterates_nothing() {
    let collection = collect(View::Empty);
    assert!(collection.is_empty());
    assert_eq!(collection.iter().count(), 0);
    assert!(collection.first().is_none());
    assert!(collection.last().is_none());
    assert!(collection.get(0).is_none());
}

#[test]
fn single_leaf_yields_one_subview() {
    let collection = collect(text("only"));
    assert_eq!(collection.len(), 1);
    assert_eq!(
        collection.subview(0).id(),
        &Identity::from(StructuralId::root())
    );
}

#[test]
fn nested_transparent_groups_are_counted_per_leaf() {
    let collection = collect(group([group([text("a"), text("b")]), group([text("c")])]));
    assert_eq!(collection.len(), 3);
}

#[test]
fn unary_container_counts_once() {
    assert_eq!(collect(vstack((text("a"), text("b")))).len(), 1);
}

#[test]
fn repeated_access_creates_distinct_but_equal_wrappers() {
    let collection = collect(text("a"));
    let first = collection.subview(0);
    let second = collection.subview(0);
    assert_eq!(first, second);
    assert!(first.ptr_eq(&second));
}

#[test]
fn iteration_is_restartable_and_reversible() {
    let collection = collect(for_each(0..4, |n| *n, |n| text(n.to_string())));
    let iter = collection.iter();
    assert_eq!(iter.len(), 4);

    let forward: Vec<i32> = iter.clone().filter_map(|s| s.id_as::<i32>()).collect();
    let backward: Vec<i32> = iter.rev().filter_map(|s| s.id_as::<i32>()).collect();
    assert_eq!(forward, vec![0, 1, 2, 3]);
    assert_eq!(backward, vec![3, 2, 1, 0]);

    let again: Vec<i32> = (&collection).into_iter().filter_map(|s| s.id_as::<i32>()).collect();
    assert_eq!(again, forward);
}

#[test]
fn owned_iteration_matches_borrowed() {
    let collection = collect(for_each(0..3, |n| *n, |n| text(n.to_string())));
    let borrowed: Vec<Identity> = collection.ids().cloned().collect();
    let owned: Vec<Identity> = collection.clone().into_iter().map(|s| s.id().clone()).collect();
    assert_eq!(borrowed, owned);

    let mut iter = collection.into_iter();
    assert_eq!(iter.next_back().and_then(|s| s.id_as::<i32>()), Some(2));
    assert_eq!(iter.len(), 2);
}

#[test]
fn keyed_lookup_by_identity() {
    let collection = collect(for_each(["x", "y"], |s| s.to_string(), |s| text(*s)));
    assert_eq!(collection.position_of(&Identity::new("y")), Some(1));
    assert_eq!(collection.position_of(&Identity::new("z")), None);

    let keyed = collection.keyed();
    let keys: Vec<Option<String>> = keyed.keys().map(|id| id.downcast::<String>()).collect();
    assert_eq!(keys, vec![Some("x".to_string()), Some("y".to_string())]);
}

#[test]
fn keyed_keeps_first_of_duplicate_identities() {
    let collection = collect(group([text("a").id(1), text("b").id(1)]));
    let keyed = collection.keyed();
    assert_eq!(keyed.len(), 1);
    assert!(keyed[&Identity::new(1)].ptr_eq(&collection.subview(0)));
}

#[test]
#[should_panic(expected = "subview index 2 out of range for collection of 2 children")]
fn out_of_range_access_panics() {
    let collection = collect(group([text("a"), text("b")]));
    let _ = collection.subview(2);
}
