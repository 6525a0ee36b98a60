use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb_int_test::test_util::{
    cleanup, create_in_memory_test_context, create_test_context, run_test,
};

#[test]
fn test_get_name() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("test")?;
            assert_eq!(collection.name(), "test");
            assert!(collection.is_open());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_list_collections() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            assert!(db.list_collections()?.is_empty());
            db.collection("users")?;
            db.collection("orders")?.create_index("total")?;
            assert_eq!(db.list_collections()?, vec!["orders", "users"]);
            assert!(db.has_collection("orders")?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_drop_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let collection = db.collection("test")?;
            collection.insert_one(doc! { name: "Alice" })?;

            db.drop_collection("test")?;
            assert!(!db.has_collection("test")?);
            assert!(!collection.is_open());
            let err = collection.find(doc! {}).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);

            let err = db.drop_collection("test").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_close_database() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            let collection = db.collection("test")?;
            db.close()?;
            assert!(db.is_closed());
            assert!(!collection.is_open());

            let err = db.collection("test").err().unwrap();
            assert_eq!(err.kind(), &ErrorKind::StoreAlreadyClosed);
            assert_eq!(
                db.list_collections().unwrap_err().kind(),
                &ErrorKind::StoreAlreadyClosed
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_invalid_collection_names() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            for name in ["", "a/b", "..", "users.index"] {
                let err = db.collection(name).err().unwrap();
                assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_in_memory_database() {
    run_test(
        create_in_memory_test_context,
        |ctx| {
            let db = ctx.db();
            assert!(db.config().is_in_memory());
            let collection = db.collection("test")?;
            collection.insert_one(doc! { name: "Alice" })?;
            assert_eq!(collection.count()?, 1);
            assert_eq!(db.list_collections()?, vec!["test"]);
            Ok(())
        },
        cleanup,
    )
}
