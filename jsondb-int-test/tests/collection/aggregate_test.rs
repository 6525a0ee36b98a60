use jsondb::aggregate::GroupKey;
use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb_int_test::test_util::{cleanup, create_test_context, insert_test_documents, run_test};

#[test]
fn test_group_by() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_one(doc! { name: "Frank", age: 20, group: "A" })?;
            collection.insert_one(doc! { name: "Grace", age: 21, group: "A" })?;
            collection.insert_one(doc! { name: "Heidi", age: 22, group: "B" })?;

            let grouped = collection.group_by("group")?;
            assert_eq!(grouped.len(), 2);
            assert_eq!(grouped.get("A").map(Vec::len), Some(2));
            assert_eq!(grouped.get("B").map(Vec::len), Some(1));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_group_by_absent_field() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;

            let grouped = collection.group_by("team")?;
            let keys: Vec<_> = grouped.keys().cloned().collect();
            assert_eq!(
                keys,
                vec![
                    GroupKey::Value(Value::from("A")),
                    GroupKey::Value(Value::from("B")),
                    GroupKey::Absent,
                ]
            );
            assert_eq!(grouped.absent().map(Vec::len), Some(1));
            assert_eq!(grouped.document_count(), collection.count()?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_aggregate() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_one(doc! { name: "Ivan", score: 10 })?;
            collection.insert_one(doc! { name: "Judy", score: 20 })?;
            collection.insert_one(doc! { name: "Karl", score: 30 })?;

            assert_eq!(collection.aggregate("score", "sum")?, Some(Value::I64(60)));
            assert_eq!(collection.aggregate("score", "avg")?, Some(Value::F64(20.0)));
            assert_eq!(collection.aggregate("score", "min")?, Some(Value::I64(10)));
            assert_eq!(collection.aggregate("score", "max")?, Some(Value::I64(30)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_aggregate_skips_non_numeric() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            collection.insert_one(doc! { score: 10 })?;
            collection.insert_one(doc! { score: "high" })?;
            collection.insert_one(doc! { score: 2.5 })?;
            collection.insert_one(doc! { other: 1 })?;

            assert_eq!(collection.aggregate("score", "sum")?, Some(Value::F64(12.5)));
            assert_eq!(collection.aggregate("score", "min")?, Some(Value::F64(2.5)));
            assert_eq!(collection.aggregate("missing", "avg")?, None);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_aggregate_unknown_operation() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            let collection = ctx.db().collection("people")?;
            let err = collection.aggregate("score", "median").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_alice_bob_scenario() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("users")?;
            collection.insert_one(doc! { name: "Alice", age: 30, address: { city: "London" } })?;
            collection.insert_one(doc! { name: "Bob", age: 20, address: { city: "Paris" } })?;
            collection.create_index("name")?;

            let alice = collection.find(doc! { name: "Alice" })?;
            assert_eq!(alice.len(), 1);
            assert_eq!(alice[0].get("address.city"), Some(&Value::from("London")));

            assert_eq!(collection.aggregate("age", "sum")?, Some(Value::I64(50)));
            assert_eq!(collection.aggregate("age", "avg")?, Some(Value::F64(25.0)));

            let older = collection.find(doc! { age: { "$gt": 25 } })?;
            assert_eq!(older.len(), 1);
            assert_eq!(older[0].get("name"), Some(&Value::from("Alice")));

            let by_city = collection.group_by("address.city")?;
            assert_eq!(by_city.len(), 2);
            let names = |city: &str| -> Vec<Value> {
                by_city
                    .get(city)
                    .map(|docs| docs.iter().filter_map(|d| d.get("name").cloned()).collect())
                    .unwrap_or_default()
            };
            assert_eq!(names("London"), vec![Value::from("Alice")]);
            assert_eq!(names("Paris"), vec![Value::from("Bob")]);
            Ok(())
        },
        cleanup,
    )
}
