use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb::filter::field;
use jsondb_int_test::test_util::{cleanup, create_test_context, insert_test_documents, run_test};

#[test]
fn test_update() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_one(doc! { name: "Carol", age: 22 })?;

            let updated = collection.update(doc! { name: "Carol" }, &doc! { age: 23 })?;
            assert_eq!(updated, 1);

            let result = collection.find_one(doc! { name: "Carol" })?.unwrap();
            assert_eq!(result.get("age"), Some(&Value::I64(23)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_all_matches() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;

            let updated = collection.update(doc! { team: "A" }, &doc! { active: true })?;
            assert_eq!(updated, 2);
            assert_eq!(collection.find(doc! { active: true })?.len(), 2);
            assert_eq!(collection.count()?, 4);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_nothing_matched() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            let updated = collection.update(doc! { name: "Nobody" }, &doc! { age: 1 })?;
            assert_eq!(updated, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_preserves_id() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            let id = collection.insert_one(doc! { name: "Alice" })?;

            collection.update(doc! { name: "Alice" }, &doc! { "_id": "other", age: 31 })?;
            let result = collection.find_one(doc! { name: "Alice" })?.unwrap();
            assert_eq!(result.id(), Some(id.as_str()));
            assert_eq!(result.get("age"), Some(&Value::I64(31)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_nested_path() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;

            collection.update(doc! { name: "Dave" }, &doc! { "address.zip": "10115" })?;
            collection.update(doc! { name: "Bob" }, &doc! { "contact.email": "bob@example.com" })?;

            let dave = collection.find_one(field("name").eq("Dave"))?.unwrap();
            assert_eq!(dave.get("address.city"), Some(&Value::from("Berlin")));
            assert_eq!(dave.get("address.zip"), Some(&Value::from("10115")));

            let bob = collection.find_one(doc! { "contact.email": "bob@example.com" })?;
            assert!(bob.is_some());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_invalid_patch_key() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            let err = collection
                .update(doc! { name: "Alice" }, &doc! { "address..city": "Rome" })
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidFieldName);
            assert_eq!(collection.find(doc! { "address.city": "London" })?.len(), 2);
            Ok(())
        },
        cleanup,
    )
}
