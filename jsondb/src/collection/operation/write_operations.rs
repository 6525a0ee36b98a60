use crate::collection::{new_id, Collection, Document};
use crate::common::{split_path, DOC_ID, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, JsonDbError, JsonDbResult};
use crate::filter::IntoFilter;
use std::collections::HashSet;

impl Collection {
    /// Inserts a document and returns its `_id`.
    ///
    /// A document without `_id` is given a new UUID. A caller supplied `_id`
    /// is kept as long as it is a string not used by another document.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::InvalidId] for a non-string `_id`
    /// * [ErrorKind::UniqueConstraintViolation] for an `_id` already in use
    pub fn insert_one(&mut self, mut document: Document) -> JsonDbResult<String> {
        if !document.has_id() {
            document.put(DOC_ID, new_id())?;
        }
        let id = self.validate_new_id(&document)?;

        let previous = self.bump_generation();
        self.indexes.on_insert(&document, previous, self.generation);
        self.positions.insert(id.clone(), self.documents.len());
        self.documents.push(document);
        Ok(id)
    }

    /// Merges `patch` into every document matching the filter and returns how
    /// many documents were updated.
    ///
    /// Patch fields overwrite existing ones. A dotted patch key writes into
    /// nested documents, creating them as needed. `_id` can never be changed;
    /// a patch entry targeting it is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Filter compile errors, or [ErrorKind::InvalidFieldName] for an invalid
    /// patch key. Nothing is modified on error.
    pub fn update<F: IntoFilter>(&mut self, filter: F, patch: &Document) -> JsonDbResult<usize> {
        let filter = filter.into_filter()?;
        validate_patch(patch)?;

        let positions = self.matching_positions(&filter);
        for position in &positions {
            apply_patch(&mut self.documents[*position], patch)?;
        }

        if !positions.is_empty() {
            self.bump_generation();
        }
        log::debug!(
            "Updated {} document(s) in collection '{}'",
            positions.len(),
            self.name
        );
        Ok(positions.len())
    }

    /// Removes every document matching the filter and returns how many were
    /// removed.
    pub fn delete<F: IntoFilter>(&mut self, filter: F) -> JsonDbResult<usize> {
        let filter = filter.into_filter()?;
        let positions: HashSet<usize> = self.matching_positions(&filter).into_iter().collect();
        if positions.is_empty() {
            return Ok(0);
        }

        let mut position = 0;
        self.documents.retain(|_| {
            let keep = !positions.contains(&position);
            position += 1;
            keep
        });
        self.rebuild_positions();
        self.bump_generation();

        log::debug!(
            "Deleted {} document(s) from collection '{}'",
            positions.len(),
            self.name
        );
        Ok(positions.len())
    }
}

fn targets_id(key: &str) -> bool {
    key.split(FIELD_SEPARATOR).next() == Some(DOC_ID)
}

fn validate_patch(patch: &Document) -> JsonDbResult<()> {
    for key in patch.fields() {
        if split_path(key).is_none() {
            log::error!("Invalid field name '{}' in update", key);
            return Err(JsonDbError::new(
                &format!("Invalid field name '{}' in update", key),
                ErrorKind::InvalidFieldName,
            ));
        }
    }
    Ok(())
}

fn apply_patch(document: &mut Document, patch: &Document) -> JsonDbResult<()> {
    for (key, value) in patch.iter() {
        if targets_id(key) {
            log::warn!("Ignoring update of immutable field '{}'", key);
            continue;
        }
        document.put_path(key, value.clone())?;
    }
    Ok(())
}
