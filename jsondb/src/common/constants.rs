// doc constants
pub const DOC_ID: &str = "_id";
pub const FIELD_SEPARATOR: &str = ".";
pub const OPERATOR_PREFIX: char = '$';

// store constants
pub const COLLECTION_FILE_EXTENSION: &str = "json";
pub const INDEX_FILE_SUFFIX: &str = ".index.json";
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

pub const JSONDB_VERSION: &str = env!("CARGO_PKG_VERSION");
