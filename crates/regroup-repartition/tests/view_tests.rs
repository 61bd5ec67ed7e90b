use pretty_assertions::assert_eq;
use regroup_core::{KTableValueGetterSupplier, KeyValue, StreamsError, ValueAndTimestamp};
use regroup_repartition::KTableRepartitionMap;
use regroup_test_utils::{init_tracing, swap, FixedTimestamp, InMemoryTable};
use std::sync::Arc;

fn s(v: &str) -> String {
    v.to_string()
}

fn map_over(
    table: &InMemoryTable<String, String>,
) -> KTableRepartitionMap<String, String, String, String> {
    init_tracing();
    KTableRepartitionMap::new(Arc::new(table.clone()), swap)
}

#[test]
fn test_get_maps_parent_value_with_parent_timestamp() {
    let table = InMemoryTable::<String, String>::new("users");
    table.put(s("A"), s("x"), 40);

    let mut getter = map_over(&table).view().get();
    getter.init(&FixedTimestamp(0)).unwrap();

    assert_eq!(
        getter.get(&s("A"), &FixedTimestamp(500)).unwrap(),
        Some(ValueAndTimestamp::new(KeyValue::pair(s("x"), s("A")), 40))
    );
}

#[test]
fn test_get_absent_value_uses_current_timestamp() {
    let table = InMemoryTable::<String, String>::new("users");
    let mapper = |k: &String, v: Option<&String>| {
        Some(KeyValue::new(v.cloned(), Some(k.clone())))
    };
    let map = KTableRepartitionMap::new(Arc::new(table.clone()), mapper);

    let mut getter = map.view().get();
    getter.init(&FixedTimestamp(0)).unwrap();

    assert_eq!(
        getter.get(&s("B"), &FixedTimestamp(500)).unwrap(),
        Some(ValueAndTimestamp::new(KeyValue::new(None, Some(s("B"))), 500))
    );
}

#[test]
fn test_get_absent_value_with_suppressing_mapper_is_none() {
    let table = InMemoryTable::<String, String>::new("users");
    table.put(s("A"), s("x"), 1);
    table.delete(s("A"), 2);

    let mut getter = map_over(&table).view().get();
    getter.init(&FixedTimestamp(0)).unwrap();

    assert_eq!(getter.get(&s("A"), &FixedTimestamp(9)).unwrap(), None);
}

#[test]
fn test_get_as_of_uses_versioned_parent() {
    let table = InMemoryTable::<String, String>::versioned("users");
    table.put(s("A"), s("x"), 10);
    table.put(s("A"), s("y"), 20);

    let mut getter = map_over(&table).view().get();
    getter.init(&FixedTimestamp(0)).unwrap();
    assert!(getter.is_versioned());

    let at_15 = getter.get_as_of(&s("A"), 15, &FixedTimestamp(99)).unwrap();
    assert_eq!(
        at_15,
        Some(ValueAndTimestamp::new(KeyValue::pair(s("x"), s("A")), 10))
    );

    let latest = getter.get(&s("A"), &FixedTimestamp(99)).unwrap();
    assert_eq!(
        latest,
        Some(ValueAndTimestamp::new(KeyValue::pair(s("y"), s("A")), 20))
    );
}

#[test]
fn test_get_as_of_before_first_write_falls_back_to_current_timestamp() {
    let table = InMemoryTable::<String, String>::versioned("users");
    table.put(s("A"), s("x"), 10);
    let map = KTableRepartitionMap::new(
        Arc::new(table.clone()),
        |k: &String, v: Option<&String>| Some(KeyValue::new(v.cloned(), Some(k.clone()))),
    );

    let mut getter = map.view().get();
    getter.init(&FixedTimestamp(0)).unwrap();

    let vt = getter.get_as_of(&s("A"), 5, &FixedTimestamp(77)).unwrap().unwrap();
    assert_eq!(vt.value, KeyValue::new(None, Some(s("A"))));
    assert_eq!(vt.timestamp, 77);
}

#[test]
fn test_get_as_of_on_unversioned_parent_fails() {
    let table = InMemoryTable::<String, String>::new("users");
    let mut getter = map_over(&table).view().get();
    getter.init(&FixedTimestamp(0)).unwrap();

    assert!(!getter.is_versioned());
    assert!(matches!(
        getter.get_as_of(&s("A"), 5, &FixedTimestamp(0)),
        Err(StreamsError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_parent_lookup_failure_propagates() {
    let table = InMemoryTable::<String, String>::new("users");
    let mut getter = map_over(&table).view().get();
    getter.init(&FixedTimestamp(0)).unwrap();

    table.fail_lookups(true);
    let err = getter.get(&s("A"), &FixedTimestamp(0)).unwrap_err();

    assert!(matches!(err, StreamsError::Lookup(_)));
    assert!(!err.is_fatal());
}

#[test]
fn test_init_and_close_reach_parent() {
    let table = InMemoryTable::<String, String>::new("users");
    let mut getter = map_over(&table).view().get();

    getter.init(&FixedTimestamp(0)).unwrap();
    assert_eq!(table.init_count(), 1);

    getter.close();
    getter.close();
    assert_eq!(table.close_count(), 1);
    assert!(matches!(
        getter.get(&s("A"), &FixedTimestamp(0)),
        Err(StreamsError::IllegalState(_))
    ));
}

#[test]
fn test_each_view_getter_has_own_parent() {
    let table = InMemoryTable::<String, String>::new("users");
    let view = map_over(&table).view();

    let mut first = view.get();
    let mut second = view.get();
    first.init(&FixedTimestamp(0)).unwrap();
    second.init(&FixedTimestamp(0)).unwrap();
    first.close();

    assert_eq!(table.init_count(), 2);
    assert_eq!(table.close_count(), 1);
    assert!(second.get(&s("A"), &FixedTimestamp(0)).is_ok());
}

#[test]
fn test_store_names_not_accessible() {
    let table = InMemoryTable::<String, String>::versioned("users");
    assert_eq!(table.store_names().unwrap(), vec![s("users")]);

    let view = map_over(&table).view();
    assert_eq!(view.store_names(), Err(StreamsError::StoreNotAccessible));
}
