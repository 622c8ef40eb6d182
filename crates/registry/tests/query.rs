
use corral_registry::{FieldMap, Registry, RegistryError, fields, value::json};
use fixtures::{Person, diana, seed};

#[test]
fn filter_requires_every_listed_field() {
    let people = Registry::<Person>::new();
    let (david, carolina) = seed(&people);

    let aged = people.filter(&fields! { "age": 27 });
    assert_eq!(aged.len(), 1);
    assert!(aged[0].ptr_eq(&david));

    let both = people.filter(&fields! { "age": 24, "sex": "female" });
    assert_eq!(both.len(), 1);
    assert!(both[0].ptr_eq(&carolina));

    assert!(people.filter(&fields! { "age": 24, "sex": "male" }).is_empty());
}

#[test]
fn filter_with_an_empty_map_matches_nothing() {
    let people = Registry::<Person>::new();
    seed(&people);

    assert!(people.filter(&FieldMap::new()).is_empty());
}

#[test]
fn filter_with_a_closure() {
    let people = Registry::<Person>::new();
    let (_, carolina) = seed(&people);
    diana(&people);

    let women = people.filter_with(|person| person.sex.as_deref() == Some("female"));
    assert_eq!(women.len(), 2);
    assert!(women[0].ptr_eq(&carolina));
}

#[test]
fn exclude_drops_on_any_listed_match() {
    let people = Registry::<Person>::new();
    seed(&people);
    let third = diana(&people);

    // david matches by name, carolina by age; only diana survives
    let kept = people.exclude(&fields! { "name": "david", "age": 24 });
    assert_eq!(kept.len(), 1);
    assert!(kept[0].ptr_eq(&third));
}

#[test]
fn exclude_single_key_partitions_the_collection() {
    let people = Registry::<Person>::new();
    seed(&people);
    diana(&people);

    let kept = people.filter(&fields! { "sex": "female" });
    let dropped = people.exclude(&fields! { "sex": "female" });

    assert_eq!(kept.len() + dropped.len(), people.count());
    for entry in &kept {
        assert!(dropped.iter().all(|other| !entry.ptr_eq(other)));
    }
}

#[test]
fn exclude_with_an_empty_map_keeps_everything() {
    let people = Registry::<Person>::new();
    seed(&people);

    assert_eq!(people.exclude(&FieldMap::new()).len(), 2);
}

#[test]
fn exclude_with_a_closure() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);
    diana(&people);

    let men = people.exclude_with(|person| person.sex.as_deref() == Some("female"));
    assert_eq!(men.len(), 1);
    assert!(men[0].ptr_eq(&david));
}

#[test]
fn sort_by_a_numeric_field() {
    let people = Registry::<Person>::new();
    let (david, carolina) = seed(&people);
    let third = diana(&people);

    assert!(people.all()[0].ptr_eq(&david), "the collection itself keeps creation order");

    let by_age = people.sort("age");
    assert!(by_age[0].ptr_eq(&third));
    assert!(by_age[1].ptr_eq(&carolina));
    assert!(by_age[2].ptr_eq(&david));
}

#[test]
fn sort_by_a_string_field() {
    let people = Registry::<Person>::new();
    let (david, carolina) = seed(&people);
    let third = diana(&people);

    let by_name = people.sort("name");
    assert!(by_name[0].ptr_eq(&carolina));
    assert!(by_name[1].ptr_eq(&david));
    assert!(by_name[2].ptr_eq(&third));
}

#[test]
fn sort_keeps_creation_order_for_equal_keys() {
    let people = Registry::<Person>::new();
    let first = people.create(&fields! { "name": "first", "age": 27 });
    let second = people.create(&fields! { "name": "second", "age": 27 });
    let youngest = people.create(&fields! { "name": "third", "age": 19 });

    let by_age = people.sort("age");
    assert!(by_age[0].ptr_eq(&youngest));
    assert!(by_age[1].ptr_eq(&first));
    assert!(by_age[2].ptr_eq(&second));
}

#[test]
fn sort_by_an_undeclared_field_keeps_creation_order() {
    let people = Registry::<Person>::new();
    let (david, carolina) = seed(&people);

    let unchanged = people.sort("height");
    assert!(unchanged[0].ptr_eq(&david));
    assert!(unchanged[1].ptr_eq(&carolina));
}

#[test]
fn sort_with_a_comparator() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);
    diana(&people);

    let oldest_first = people.sort_with(|a, b| b.age.cmp(&a.age));
    assert!(oldest_first[0].ptr_eq(&david));
}

#[test]
fn sort_never_reorders_the_registry() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);
    diana(&people);

    let _ = people.sort("age");
    assert!(people.all()[0].ptr_eq(&david));
}

#[test]
fn get_by_field_map_scans_per_key_in_map_order() {
    let people = Registry::<Person>::new();
    let (_, carolina) = seed(&people);
    diana(&people);

    // the first key matches nothing, the second decides
    let found = people.get(fields! { "name": "nobody", "sex": "female" });
    assert!(found.is_some_and(|entry| entry.ptr_eq(&carolina)));

    // a leading key with any match wins outright, even over an exact later key
    let found = people.get(fields! { "sex": "female", "name": "david" });
    assert!(found.is_some_and(|entry| entry.ptr_eq(&carolina)));
}

#[test]
fn get_by_field_and_value_pair() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);

    let found = people.get(("name", json!("david")));
    assert!(found.is_some_and(|entry| entry.ptr_eq(&david)));
}

#[test]
fn get_misses_are_none_never_errors() {
    let people = Registry::<Person>::new();
    seed(&people);

    assert_eq!(people.get(fields! { "name": "nobody" }), None);
    assert_eq!(people.get(99_u64), None);
    assert_eq!(people.get(FieldMap::new()), None);
    assert_eq!(people.get(("height", json!(170))), None);
}

#[test]
fn get_or_create_returns_the_existing_match() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);

    let found = people
        .get_or_create(fields! { "name": "david" }, FieldMap::new())
        .expect("existing match");
    assert!(found.ptr_eq(&david));
    assert_eq!(people.count(), 2);
}

#[test]
fn get_or_create_merges_extra_into_the_search_fields() {
    let people = Registry::<Person>::new();
    seed(&people);

    let created = people
        .get_or_create(fields! { "name": "Diana", "age": 34 }, fields! { "sex": "female" })
        .expect("creatable selector");

    assert_eq!(people.count(), 3);
    assert_eq!(created.read().name.as_deref(), Some("Diana"));
    assert_eq!(created.read().age, Some(34));
    assert_eq!(created.read().sex.as_deref(), Some("female"));
}

#[test]
fn get_or_create_extra_wins_on_key_collision() {
    let people = Registry::<Person>::new();

    let created = people
        .get_or_create(fields! { "name": "sam", "sex": "male" }, fields! { "sex": "female" })
        .expect("creatable selector");
    assert_eq!(created.read().sex.as_deref(), Some("female"));
}

#[test]
fn get_or_create_by_identity() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);

    let found = people.get_or_create(david.id(), FieldMap::new()).expect("existing identity");
    assert!(found.ptr_eq(&david));

    // an absent identity cannot seed an instance
    let missing = people.get_or_create(99_u64, fields! { "sex": "female" });
    assert!(matches!(missing, Err(RegistryError::SelectorNotCreatable { .. })));
    assert_eq!(people.count(), 2);
}
