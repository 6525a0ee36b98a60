use crate::collection::Document;
use crate::common::{resolve, Value};
use indexmap::IndexMap;
use std::fmt::Display;

/// The key of a group: the value found at the grouping path, or `Absent` for
/// documents where the path does not resolve.
///
/// `Absent` is distinct from `Value(Value::Null)`: a document holding an
/// explicit `null` is grouped apart from one missing the field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Value(Value),
    Absent,
}

impl GroupKey {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            GroupKey::Value(value) => Some(value),
            GroupKey::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, GroupKey::Absent)
    }
}

impl From<Option<&Value>> for GroupKey {
    fn from(value: Option<&Value>) -> Self {
        match value {
            Some(value) => GroupKey::Value(value.clone()),
            None => GroupKey::Absent,
        }
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Value(value) => write!(f, "{}", value),
            GroupKey::Absent => write!(f, "<absent>"),
        }
    }
}

/// Documents partitioned by the value of a field.
///
/// Groups appear in the order their key was first seen, and documents keep
/// their collection order inside each group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupResult {
    groups: IndexMap<GroupKey, Vec<Document>>,
}

impl GroupResult {
    /// Documents whose field equals `value`.
    pub fn get<T: Into<Value>>(&self, value: T) -> Option<&Vec<Document>> {
        self.groups.get(&GroupKey::Value(value.into()))
    }

    pub fn get_key(&self, key: &GroupKey) -> Option<&Vec<Document>> {
        self.groups.get(key)
    }

    /// Documents where the grouping field is absent.
    pub fn absent(&self) -> Option<&Vec<Document>> {
        self.groups.get(&GroupKey::Absent)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &Vec<Document>)> {
        self.groups.iter()
    }

    /// Total number of documents across all groups.
    pub fn document_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn into_inner(self) -> IndexMap<GroupKey, Vec<Document>> {
        self.groups
    }
}

impl IntoIterator for GroupResult {
    type Item = (GroupKey, Vec<Document>);
    type IntoIter = indexmap::map::IntoIter<GroupKey, Vec<Document>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Partitions documents by the value at a dotted field path.
pub fn group_by<'a, I>(documents: I, field: &str) -> GroupResult
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut groups: IndexMap<GroupKey, Vec<Document>> = IndexMap::new();
    for document in documents {
        let key = GroupKey::from(resolve(document, field));
        groups.entry(key).or_default().push(document.clone());
    }
    GroupResult { groups }
}
