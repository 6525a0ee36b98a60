use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb::filter::{all, field};
use jsondb_int_test::test_util::{cleanup, create_test_context, insert_test_documents, run_test};

#[test]
fn test_find_one() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_one(doc! { name: "Bob", age: 25 })?;

            let result = collection.find_one(doc! { name: "Bob" })?;
            assert!(result.is_some());
            assert_eq!(result.unwrap().get("age"), Some(&Value::I64(25)));
            assert!(collection.find_one(doc! { name: "Nobody" })?.is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_all() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;

            let names: Vec<_> = collection
                .find(doc! {})?
                .iter()
                .map(|doc| doc.get("name").cloned())
                .collect();
            assert_eq!(
                names,
                vec![
                    Some(Value::from("Alice")),
                    Some(Value::from("Bob")),
                    Some(Value::from("Carol")),
                    Some(Value::from("Dave")),
                ]
            );
            assert_eq!(collection.find(all())?.len(), 4);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_with_operators() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;

            assert_eq!(collection.find(doc! { age: { "$gt": 25 } })?.len(), 2);
            assert_eq!(collection.find(doc! { age: { "$gte": 25 } })?.len(), 3);
            assert_eq!(collection.find(doc! { age: { "$lt": 25 } })?.len(), 1);
            assert_eq!(collection.find(doc! { age: { "$lte": 25, "$gt": 22 } })?.len(), 1);
            assert_eq!(collection.find(doc! { team: { "$ne": "A" } })?.len(), 2);
            assert_eq!(collection.find(doc! { name: { "$in": ["Bob", "Dave", "Zed"] } })?.len(), 2);
            assert_eq!(collection.find(doc! { name: { "$regex": "^[A-C]" } })?.len(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_nested_and_conjunction() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;

            let londoners = collection.find(doc! { "address.city": "London" })?;
            assert_eq!(londoners.len(), 2);

            let filter = field("address.city").eq("London").and(field("age").lt(25));
            let young = collection.find(filter)?;
            assert_eq!(young.len(), 1);
            assert_eq!(young[0].get("name"), Some(&Value::from("Carol")));

            assert!(collection.find(doc! { "address.zip.code": "E1" })?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_with_fluent_filter() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;

            assert_eq!(collection.find(field("age").gt(25))?.len(), 2);
            assert_eq!(collection.find(field("team").in_array(vec!["B"]))?.len(), 1);
            assert_eq!(collection.find(field("name").regex("o")?)?.len(), 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_type_mismatch_is_no_match() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            assert!(collection.find(doc! { age: { "$gt": "20" } })?.is_empty());
            assert!(collection.find(doc! { name: { "$lt": 100 } })?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_invalid_operator() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            let err = collection.find(doc! { age: { "$between": [1, 2] } }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidOperator);
            Ok(())
        },
        cleanup,
    )
}
