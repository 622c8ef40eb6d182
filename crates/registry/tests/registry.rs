
use corral_registry::{Model, Registries, Registry, fields, value};
use fixtures::{Person, diana, seed};

#[test]
fn counts_and_lists_in_creation_order() {
    let people = Registry::<Person>::new();
    let (david, carolina) = seed(&people);

    assert_eq!(people.count(), 2);
    assert!(!people.is_empty());

    let all = people.all();
    assert_eq!(all.len(), 2);
    assert!(all[0].ptr_eq(&david));
    assert!(all[1].ptr_eq(&carolina));
}

#[test]
fn identity_round_trip() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);

    let found = people.get(david.id()).expect("created instance must be retrievable");
    assert!(found.ptr_eq(&david));

    assert!(people.remove(david.id()));
    assert_eq!(people.get(david.id()), None);
}

#[test]
fn identities_are_never_reused() {
    let people = Registry::<Person>::new();
    let (david, carolina) = seed(&people);
    assert_eq!(david.id().as_u64(), 0);
    assert_eq!(carolina.id().as_u64(), 1);

    assert!(people.remove(david.id()));
    assert!(people.remove(carolina.id()));
    assert!(people.is_empty());

    let third = diana(&people);
    assert_eq!(third.id().as_u64(), 2, "deleted identities must never come back");
}

#[test]
fn add_registers_external_values_with_fresh_identities() {
    let people = Registry::<Person>::new();
    seed(&people);

    let new_guy =
        people.add(Person { name: Some("New guy".into()), age: None, sex: Some("male".into()) });

    assert_eq!(people.count(), 3);
    assert_eq!(new_guy.id().as_u64(), 2);
    assert!(people.get(new_guy.id()).is_some_and(|found| found.ptr_eq(&new_guy)));

    let another = people.add(Person::default());
    assert_ne!(another.id(), new_guy.id(), "every direct add mints its own identity");
}

#[test]
fn restore_reuses_a_trusted_identity() {
    let people = Registry::<Person>::new();
    seed(&people);
    let third = diana(&people);

    assert!(people.remove_entry(&third));
    assert_eq!(people.count(), 2);

    people.restore(third.clone());
    assert_eq!(people.count(), 3);
    assert!(people.get(third.id()).is_some_and(|found| found.ptr_eq(&third)));

    let next = people.create(&fields! { "name": "jack" });
    assert!(next.id() > third.id(), "the counter must stay ahead of restored identities");
}

#[test]
fn remove_of_an_unknown_identity_changes_nothing() {
    let people = Registry::<Person>::new();
    seed(&people);

    assert!(!people.remove(99_u64));
    assert_eq!(people.count(), 2);
}

#[test]
fn remove_entry_by_handle() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);

    assert!(people.remove_entry(&david));
    assert_eq!(people.count(), 1);
    assert!(!people.remove_entry(&david), "an instance can only be deleted once");
}

#[test]
fn cardinality_always_matches_all() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);
    assert_eq!(people.count(), people.all().len());

    people.remove_entry(&david);
    assert_eq!(people.count(), people.all().len());

    diana(&people);
    assert_eq!(people.count(), people.all().len());
}

#[test]
fn entries_point_back_at_their_registry() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);

    let home = david.registry().expect("owner is alive");
    assert!(home.ptr_eq(&people));
    assert_eq!(home.count(), 2);
}

#[test]
fn entries_outlive_a_dropped_registry() {
    let orphan = {
        let people = Registry::<Person>::new();
        people.create(&fields! { "name": "ada" })
    };

    assert!(orphan.registry().is_none());
    assert_eq!(orphan.read().name.as_deref(), Some("ada"));
}

#[test]
fn custom_initializer_replaces_the_field_copy() {
    let people = Registry::builder()
        .initializer(|fields| {
            let mut person = Person::from_fields(fields);
            person.sex.get_or_insert_with(|| "unspecified".into());
            person
        })
        .capacity(8)
        .build();

    let ghost = people.create(&fields! { "name": "ghost" });
    assert_eq!(ghost.id().as_u64(), 0, "identity assignment is unaffected by the initializer");
    assert_eq!(ghost.read().name.as_deref(), Some("ghost"));
    assert_eq!(ghost.read().sex.as_deref(), Some("unspecified"));

    let named = people.create(&fields! { "name": "eve", "sex": "female" });
    assert_eq!(named.read().sex.as_deref(), Some("female"));
}

#[test]
fn writes_through_handles_are_visible_to_queries() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);

    david.write().age = Some(30);

    assert_eq!(people.filter(&fields! { "age": 30 }).len(), 1);
    assert_eq!(people.filter(&fields! { "age": 27 }).len(), 0);
}

#[test]
fn serialization_excludes_identity() {
    let people = Registry::<Person>::new();
    let (david, _) = seed(&people);

    let json = value::to_value(&david).expect("person serializes");
    let object = json.as_object().expect("person serializes to an object");
    assert_eq!(object.len(), Person::FIELDS.len());
    assert!(object.keys().all(|key| Person::FIELDS.contains(&key.as_str())));
}

#[test]
fn one_registry_per_model_type() {
    let registries = Registries::new();

    let people = registries.of::<Person>();
    people.create(&fields! { "name": "ada" });

    let same = registries.of::<Person>();
    assert!(same.ptr_eq(&people));
    assert_eq!(same.count(), 1);
    assert_eq!(registries.models(), 1);
}
