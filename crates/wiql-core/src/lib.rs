#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Work item field metadata for the WIQL compiler.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the field list returned by the
//!   work item tracking REST endpoint
//! - **Lookup layer**: case-insensitive index over reference names and display names
//!
//! The parser never resolves field identity. Consumers of the AST (validators,
//! translators) resolve `Field` nodes through a [`FieldLookup`].

use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::IndexMap;

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Field definition as returned by the work item tracking REST endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemField {
    /// Display name, e.g. `Assigned To`.
    pub name: String,
    /// Reference name, e.g. `System.AssignedTo`.
    pub reference_name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub is_identity: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl WorkItemField {
    pub fn new(name: impl Into<String>, reference_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference_name: reference_name.into(),
            field_type: None,
            read_only: false,
            is_identity: false,
            description: None,
        }
    }
}

/// Either a bare array or the `{ "count": n, "value": [...] }` list envelope.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawFieldList {
    Bare(Vec<WorkItemField>),
    Envelope { value: Vec<WorkItemField> },
}

/// Parse a field list JSON document into field definitions.
pub fn parse_fields(json: &str) -> Result<Vec<WorkItemField>, serde_json::Error> {
    let raw: RawFieldList = serde_json::from_str(json)?;
    Ok(match raw {
        RawFieldList::Bare(fields) => fields,
        RawFieldList::Envelope { value } => value,
    })
}

// ============================================================================
// Lookup Layer
// ============================================================================

static NEXT_LOOKUP_ID: AtomicU32 = AtomicU32::new(0);

/// Case-insensitive field index keyed by reference name and display name.
///
/// Built once per metadata version and shared read-only afterwards.
/// `lookup_id` distinguishes versions so callers can invalidate results
/// computed against an older lookup.
#[derive(Debug, Clone)]
pub struct FieldLookup {
    values: Vec<WorkItemField>,
    index: IndexMap<String, usize>,
    lookup_id: u32,
}

impl FieldLookup {
    pub fn new(values: Vec<WorkItemField>) -> Self {
        let mut index = IndexMap::with_capacity(values.len() * 2);
        for (i, field) in values.iter().enumerate() {
            index.insert(field.reference_name.to_lowercase(), i);
            index.insert(field.name.to_lowercase(), i);
        }
        Self {
            values,
            index,
            lookup_id: NEXT_LOOKUP_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        parse_fields(json).map(Self::new)
    }

    pub fn lookup_id(&self) -> u32 {
        self.lookup_id
    }

    pub fn values(&self) -> &[WorkItemField] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolve a reference name or display name, ignoring case.
    pub fn get_field(&self, ref_or_name: &str) -> Option<&WorkItemField> {
        self.index
            .get(&ref_or_name.to_lowercase())
            .map(|&i| &self.values[i])
    }

    /// True when both names resolve to fields with the same display name.
    pub fn equal_fields(&self, ref_or_name1: &str, ref_or_name2: &str) -> bool {
        match (self.get_field(ref_or_name1), self.get_field(ref_or_name2)) {
            (Some(a), Some(b)) => a.name == b.name,
            _ => false,
        }
    }
}
