//! Projection of processor responses onto flat result records

use std::sync::Arc;

use cashier_config::{FieldMap, OperationKind, SourcePath};
use cashier_core::RawResponse;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::MappingError;

/// Flat record returned to callers on success
///
/// Keys follow the declaration order of the field map that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectedResult(IndexMap<String, Value>);

impl ProjectedResult {
    /// Value of a local field
    pub fn get(&self, local: &str) -> Option<&Value> {
        self.0.get(local)
    }

    /// Local field names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the result has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take ownership of the underlying map
    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }
}

/// Projects raw processor responses according to the configured field map
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    fields: Arc<FieldMap>,
}

impl FieldMapper {
    /// Create a mapper over a shared field map
    pub const fn new(fields: Arc<FieldMap>) -> Self {
        Self { fields }
    }

    /// Project `raw` using the spec registered for `kind`
    ///
    /// Without a registered spec the whole response is returned under the
    /// kind's key, so unmapped operations still produce a usable record.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] if a declared path is absent from `raw`.
    /// No partial result is produced in that case.
    pub fn project(&self, kind: OperationKind, raw: &RawResponse) -> Result<ProjectedResult, MappingError> {
        let Some(spec) = self.fields.get(kind) else {
            let mut wrapped = IndexMap::with_capacity(1);
            wrapped.insert(kind.as_str().to_owned(), raw.clone());
            return Ok(ProjectedResult(wrapped));
        };

        let mut result = IndexMap::with_capacity(spec.len());

        for (local, path) in spec.iter() {
            let value = resolve(raw, path).ok_or_else(|| MappingError {
                kind,
                local: local.to_owned(),
                path: path.clone(),
            })?;

            result.insert(local.to_owned(), value.clone());
        }

        Ok(ProjectedResult(result))
    }
}

/// Look up `path` on `raw`; `None` when any segment is absent
fn resolve<'a>(raw: &'a RawResponse, path: &SourcePath) -> Option<&'a Value> {
    match path {
        SourcePath::Attribute(name) => raw.as_object()?.get(name),
        SourcePath::Nested { object, attribute } => raw.as_object()?.get(object)?.as_object()?.get(attribute),
    }
}
