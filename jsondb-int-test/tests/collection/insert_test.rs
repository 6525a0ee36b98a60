use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_insert_and_find() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_one(doc! {
                name: "Alice",
                age: 30,
                address: { city: "London" },
            })?;

            let results = collection.find(doc! { name: "Alice" })?;
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].get("name"), Some(&Value::from("Alice")));
            assert_eq!(results[0].get("address.city"), Some(&Value::from("London")));
            assert!(results[0].has_id());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_returns_generated_id() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            let id = collection.insert_one(doc! { name: "Alice" })?;
            assert_eq!(id.len(), 36);

            let found = collection.find_one(doc! { "_id": (id.as_str()) })?;
            assert_eq!(found.unwrap().id(), Some(id.as_str()));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_keeps_caller_id() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            let id = collection.insert_one(doc! { "_id": "user-1", name: "Alice" })?;
            assert_eq!(id, "user-1");
            assert_eq!(collection.count()?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_duplicate_id() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_one(doc! { "_id": "user-1", name: "Alice" })?;
            let err = collection
                .insert_one(doc! { "_id": "user-1", name: "Bob" })
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UniqueConstraintViolation);
            assert_eq!(collection.count()?, 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_non_string_id() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            let err = collection.insert_one(doc! { "_id": 42 }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidId);
            assert_eq!(collection.count()?, 0);
            Ok(())
        },
        cleanup,
    )
}
