use jsondb::collection::Document;
use jsondb::common::Value;
use jsondb::doc;
use jsondb::jsondb::JsonDb;
use jsondb_int_test::test_util::{
    cleanup, create_test_context, insert_test_documents, random_path, run_test,
};
use std::fs;
use std::path::Path;

#[test]
fn test_documents_survive_reopen() {
    run_test(
        create_test_context,
        |ctx| {
            let ids = insert_test_documents(&ctx.db(), "people")?;
            ctx.db()
                .collection("people")?
                .update(doc! { name: "Bob" }, &doc! { age: 26 })?;

            let db = ctx.reopen()?;
            let collection = db.collection("people")?;
            assert_eq!(collection.count()?, 4);

            let bob = collection.find_one(doc! { name: "Bob" })?.unwrap();
            assert_eq!(bob.id(), Some(ids[1].as_str()));
            assert_eq!(bob.get("age"), Some(&Value::I64(26)));
            assert_eq!(bob.get("address.city"), Some(&Value::from("Paris")));
            db.close()
        },
        cleanup,
    )
}

#[test]
fn test_indexes_survive_reopen() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            ctx.db().collection("people")?.create_index("team")?;

            let db = ctx.reopen()?;
            let collection = db.collection("people")?;
            assert_eq!(collection.indexed_fields()?, vec!["team"]);
            assert_eq!(collection.find(doc! { team: "A" })?.len(), 2);
            db.close()
        },
        cleanup,
    )
}

#[test]
fn test_stale_index_file_is_rebuilt() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(&ctx.db(), "people")?;
            ctx.db().collection("people")?.create_index("team")?;
            ctx.db().close()?;

            let index_file = Path::new(ctx.path()).join("people.index.json");
            fs::write(&index_file, r#"{ "team": [ { "value": "A", "ids": ["bogus"] } ] }"#)?;

            let db = JsonDb::builder().path(ctx.path()).open()?;
            let collection = db.collection("people")?;
            assert_eq!(collection.find(doc! { team: "A" })?.len(), 2);
            db.close()
        },
        cleanup,
    )
}

#[test]
fn test_collection_file_layout() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.db().collection("users")?;
            collection.insert_one(doc! { "_id": "u1", name: "Alice", address: { city: "London" } })?;
            collection.create_index("name")?;

            let dir = Path::new(ctx.path());
            let content = fs::read_to_string(dir.join("users.json"))?;
            assert!(content.contains("\n  "));
            let stored = parse_documents(&content)?;
            assert_eq!(stored.len(), 1);
            assert_eq!(stored[0].id(), Some("u1"));

            let index = fs::read_to_string(dir.join("users.index.json"))?;
            assert!(index.contains("\"name\""));
            assert!(index.contains("\"u1\""));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_compact_output() {
    let path = random_path();
    let db = JsonDb::builder().path(&path).pretty_print(false).open().unwrap();
    db.collection("users")
        .unwrap()
        .insert_one(doc! { name: "Alice" })
        .unwrap();

    let content = fs::read_to_string(Path::new(&path).join("users.json")).unwrap();
    assert!(!content.contains('\n'));
    db.close().unwrap();
    fs::remove_dir_all(&path).unwrap();
}

#[test]
fn test_dropped_collection_files_removed() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.collection("users")?.create_index("name")?;
            db.drop_collection("users")?;

            let dir = Path::new(ctx.path());
            assert!(!dir.join("users.json").exists());
            assert!(!dir.join("users.index.json").exists());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_open_existing_file() {
    let path = random_path();
    fs::create_dir_all(&path).unwrap();
    fs::write(
        Path::new(&path).join("legacy.json"),
        r#"[{"_id": "a", "name": "Alice"}, {"name": "Bob"}]"#,
    )
    .unwrap();

    let db = JsonDb::builder().path(&path).open().unwrap();
    let collection = db.collection("legacy").unwrap();
    assert_eq!(collection.count().unwrap(), 2);
    let bob = collection.find_one(doc! { name: "Bob" }).unwrap().unwrap();
    assert!(bob.has_id());
    db.close().unwrap();
    fs::remove_dir_all(&path).unwrap();
}

#[test]
fn test_open_with_value_map_index_file() {
    let path = random_path();
    let dir = Path::new(&path);
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("people.json"), r#"[{"_id": "a", "name": "Alice"}]"#).unwrap();
    fs::write(dir.join("people.index.json"), r#"{"name": {"Alice": ["a"]}}"#).unwrap();

    let db = JsonDb::builder().path(&path).open().unwrap();
    let people = db.collection("people").unwrap();
    assert!(people.has_index("name").unwrap());
    let alice = people.find(doc! { name: "Alice" }).unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].id(), Some("a"));

    people.insert_one(doc! { name: "Alice" }).unwrap();
    assert_eq!(people.find(doc! { name: "Alice" }).unwrap().len(), 2);
    let index = fs::read_to_string(dir.join("people.index.json")).unwrap();
    assert!(index.contains("\"ids\""));

    db.close().unwrap();
    fs::remove_dir_all(&path).unwrap();
}

#[test]
fn test_open_with_unreadable_index_file() {
    let path = random_path();
    let dir = Path::new(&path);
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("people.json"), r#"[{"_id": "a", "name": "Alice"}]"#).unwrap();
    fs::write(dir.join("people.index.json"), "{ truncated").unwrap();

    let db = JsonDb::builder().path(&path).open().unwrap();
    let people = db.collection("people").unwrap();
    assert!(people.indexed_fields().unwrap().is_empty());
    people.create_index("name").unwrap();
    assert_eq!(people.find(doc! { name: "Alice" }).unwrap().len(), 1);

    db.close().unwrap();
    fs::remove_dir_all(&path).unwrap();
}

#[test]
fn test_in_memory_overrides_path() {
    let path = random_path();
    let db = JsonDb::builder().path(&path).in_memory().open().unwrap();
    assert!(db.config().is_in_memory());
    db.collection("x")
        .unwrap()
        .insert_one(doc! { name: "Alice" })
        .unwrap();
    assert!(!Path::new(&path).join("x.json").exists());
    assert!(!Path::new(&path).exists());
    db.close().unwrap();
}

fn parse_documents(content: &str) -> jsondb::errors::JsonDbResult<Vec<Document>> {
    let documents: Vec<Document> = Document::from_json(&format!("{{\"items\": {}}}", content))?
        .get("items")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(|v| v.as_document().cloned()).collect())
        .unwrap_or_default();
    Ok(documents)
}
