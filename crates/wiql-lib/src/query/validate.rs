//! Field validation against work item field metadata.

use wiql_core::FieldLookup;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast::{Field, Select};

use super::Query;

impl Query<'_> {
    /// Resolves every field reference through `lookup`.
    ///
    /// Reports `UnknownField` for names that do not resolve and
    /// `DuplicateField` for SELECT entries naming an already selected field.
    /// Replaces the results of any earlier validation.
    pub fn validate_fields(&mut self, lookup: &FieldLookup) {
        let mut diagnostics = Diagnostics::new();
        if let Some(root) = self.root() {
            for field in root.descendants().filter_map(Field::cast) {
                let name = field.name();
                if lookup.get_field(name).is_none() {
                    diagnostics
                        .report(DiagnosticKind::UnknownField, field.identifier().span())
                        .message(name)
                        .emit();
                }
            }

            if let Some(select) = Select::cast(root) {
                let selected: Vec<Field<'_>> = select.field_list().fields().collect();
                for (i, field) in selected.iter().enumerate() {
                    let first = selected[..i]
                        .iter()
                        .find(|prev| lookup.equal_fields(prev.name(), field.name()));
                    if let Some(first) = first {
                        diagnostics
                            .report(DiagnosticKind::DuplicateField, field.identifier().span())
                            .message(field.name())
                            .related_to("first selected here", first.identifier().span())
                            .emit();
                    }
                }
            }
        }
        self.validate_diagnostics = diagnostics;
    }
}
