use crate::collection::{Collection, Document, FindPlan};
use crate::filter::{Filter, IntoFilter};
use crate::errors::JsonDbResult;

impl Collection {
    /// Returns every document matching the filter, in collection order.
    ///
    /// The filter is compiled before any document is inspected, so an invalid
    /// filter fails without partial results. A single literal equality on an
    /// indexed field is answered from the index (rebuilt first if stale); the
    /// result is the same sequence a full scan would return.
    ///
    /// # Errors
    ///
    /// [crate::errors::ErrorKind::InvalidOperator] or
    /// [crate::errors::ErrorKind::FilterError] for an invalid filter.
    pub fn find<F: IntoFilter>(&mut self, filter: F) -> JsonDbResult<Vec<Document>> {
        let filter = filter.into_filter()?;
        let positions = self.matching_positions(&filter);
        Ok(positions
            .into_iter()
            .map(|position| self.documents[position].clone())
            .collect())
    }

    /// Returns the first document, in collection order, matching the filter.
    pub fn find_one<F: IntoFilter>(&mut self, filter: F) -> JsonDbResult<Option<Document>> {
        let filter = filter.into_filter()?;
        let first = match self.find_plan(&filter) {
            FindPlan::FullScan => self.documents.iter().find(|document| filter.matches(document)),
            FindPlan::IndexedEquality { .. } => self
                .matching_positions(&filter)
                .first()
                .map(|position| &self.documents[*position]),
        };
        Ok(first.cloned())
    }

    /// Number of documents matching the filter.
    pub fn count_matching<F: IntoFilter>(&mut self, filter: F) -> JsonDbResult<usize> {
        let filter = filter.into_filter()?;
        Ok(self.matching_positions(&filter).len())
    }

    /// Decides how the filter would be executed against this collection.
    pub fn find_plan(&self, filter: &Filter) -> FindPlan {
        match filter.single_equality() {
            Some((field, value)) if self.indexes.has_index(field) => FindPlan::IndexedEquality {
                field: field.to_string(),
                value: value.clone(),
            },
            _ => FindPlan::FullScan,
        }
    }

    /// Positions of the matching documents, ascending.
    pub(crate) fn matching_positions(&mut self, filter: &Filter) -> Vec<usize> {
        let plan = self.find_plan(filter);
        log::debug!("Executing {} on collection '{}'", plan, self.name);

        match plan {
            FindPlan::IndexedEquality { field, value } => {
                self.indexes
                    .ensure_current(&field, &self.documents, self.generation);
                let mut positions: Vec<usize> = self
                    .indexes
                    .lookup(&field, &value)
                    .filter_map(|id| self.positions.get(id).copied())
                    .collect();
                positions.sort_unstable();
                positions
            }
            FindPlan::FullScan => self
                .documents
                .iter()
                .enumerate()
                .filter(|(_, document)| filter.matches(document))
                .map(|(position, _)| position)
                .collect(),
        }
    }
}
