use jsondb::collection::Document;
use jsondb::doc;
use jsondb::errors::JsonDbResult;
use jsondb::jsondb::JsonDb;
use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::time::Instant;
use std::{env, fs};

/// Runs a test between `before` and `after`. `after` always runs once a
/// context was created, even when the test fails.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> JsonDbResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> JsonDbResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> JsonDbResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let start_time = Instant::now();
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let test_ctx = ctx.clone();
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| test(test_ctx)));
    let after_result = after(ctx);

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            let backtrace = Backtrace::capture().to_string();
            eprintln!("\n==================== TEST FAILED ====================");
            eprintln!("Took {:?}", start_time.elapsed());
            if !backtrace.is_empty() && !backtrace.contains("disabled") {
                eprintln!("\nBacktrace:\n{}", backtrace);
            }
            eprintln!("=====================================================\n");
            panic!("Test failed: {:?}", e);
        }
        Err(panic_err) => std::panic::resume_unwind(panic_err),
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    path: String,
    db: JsonDb,
}

impl TestContext {
    pub fn new(path: String, db: JsonDb) -> Self {
        Self { path, db }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn db(&self) -> JsonDb {
        self.db.clone()
    }

    /// Opens a second database on the same directory, as a later process
    /// would.
    pub fn reopen(&self) -> JsonDbResult<JsonDb> {
        self.db.close()?;
        JsonDb::builder().path(&self.path).open()
    }
}

pub fn random_path() -> String {
    let id = uuid::Uuid::new_v4();
    let temp_dir = env::temp_dir();
    temp_dir
        .join(format!("jsondb-{}", id))
        .to_string_lossy()
        .into_owned()
}

pub fn create_test_context() -> JsonDbResult<TestContext> {
    let path = random_path();
    if Path::new(&path).exists() {
        let _ = fs::remove_dir_all(&path);
    }

    let db = JsonDb::builder().path(&path).open()?;
    Ok(TestContext::new(path, db))
}

pub fn create_in_memory_test_context() -> JsonDbResult<TestContext> {
    let db = JsonDb::builder().in_memory().open()?;
    Ok(TestContext::new(String::new(), db))
}

pub fn cleanup(ctx: TestContext) -> JsonDbResult<()> {
    if let Err(e) = ctx.db().close() {
        eprintln!("Warning: Failed to close database: {:?}", e);
    }

    let path = ctx.path();
    if path.is_empty() || !Path::new(path).exists() {
        return Ok(());
    }

    if let Err(e) = fs::remove_dir_all(path) {
        eprintln!("Warning: Failed to remove test directory {}: {:?}", path, e);
    }
    Ok(())
}

pub fn create_test_docs() -> Vec<Document> {
    vec![
        doc! {
            name: "Alice",
            age: 30,
            team: "A",
            score: 10,
            address: { city: "London", zip: "E1" },
        },
        doc! {
            name: "Bob",
            age: 25,
            team: "A",
            score: 20,
            address: { city: "Paris", zip: "75001" },
        },
        doc! {
            name: "Carol",
            age: 22,
            team: "B",
            score: 30,
            address: { city: "London", zip: "SW1" },
        },
        doc! {
            name: "Dave",
            age: 40,
            address: { city: "Berlin" },
        },
    ]
}

pub fn insert_test_documents(db: &JsonDb, name: &str) -> JsonDbResult<Vec<String>> {
    let collection = db.collection(name)?;
    create_test_docs()
        .into_iter()
        .map(|doc| collection.insert_one(doc))
        .collect()
}
