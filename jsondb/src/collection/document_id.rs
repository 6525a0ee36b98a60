use uuid::Uuid;

/// Generates a new document identifier.
///
/// Identifiers are random (v4) UUIDs in their hyphenated string form, unique
/// across collections and processes.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
