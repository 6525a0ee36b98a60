use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb_int_test::test_util::{cleanup, create_test_context, insert_test_documents, run_test};

#[test]
fn test_create_index_and_query() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_one(doc! { name: "Eve", age: 28 })?;
            collection.create_index("name")?;

            let results = collection.find(doc! { name: "Eve" })?;
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].get("name"), Some(&Value::from("Eve")));
            assert!(collection.has_index("name")?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_indexed_and_scan_results_agree() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            let scanned = collection.find(doc! { team: "A" })?;

            collection.create_index("team")?;
            let indexed = collection.find(doc! { team: "A" })?;
            assert_eq!(indexed, scanned);
            assert!(collection.find(doc! { team: "C" })?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_index_follows_writes() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            collection.create_index("team")?;

            collection.insert_one(doc! { name: "Erin", team: "B" })?;
            assert_eq!(collection.find(doc! { team: "B" })?.len(), 2);

            collection.update(doc! { name: "Alice" }, &doc! { team: "B" })?;
            assert_eq!(collection.find(doc! { team: "A" })?.len(), 1);
            assert_eq!(collection.find(doc! { team: "B" })?.len(), 3);

            collection.delete(doc! { name: "Carol" })?;
            let team_b = collection.find(doc! { team: "B" })?;
            let names: Vec<_> = team_b.iter().filter_map(|d| d.get("name")).collect();
            assert_eq!(names, vec![&Value::from("Alice"), &Value::from("Erin")]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_nested_field_index() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            collection.create_index("address.city")?;
            assert_eq!(collection.find(doc! { "address.city": "London" })?.len(), 2);
            assert_eq!(collection.indexed_fields()?, vec!["address.city"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_numeric_index_lookup() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            collection.create_index("age")?;
            assert_eq!(collection.find(doc! { age: 30 })?.len(), 1);
            assert_eq!(collection.find(doc! { age: 30.0 })?.len(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_drop_index() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            collection.create_index("name")?;
            collection.drop_index("name")?;
            assert!(!collection.has_index("name")?);
            assert_eq!(collection.find(doc! { name: "Bob" })?.len(), 1);

            let err = collection.drop_index("name").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::IndexNotFound);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_invalid_index_field() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            let err = collection.create_index("").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidFieldName);
            Ok(())
        },
        cleanup,
    )
}
