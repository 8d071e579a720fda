// ABOUTME: Conversion of typed operation fields into SQL literal text
// ABOUTME: Trait defaults carry the common forms; PgConverter overrides the PostgreSQL dialect

use chrono::{DateTime, NaiveDate, Utc};

use crate::workload::Organisation;

/// Renders semantic values as literal text for direct inclusion in a query.
///
/// Every method is total: absent optional fields become the backend's `NULL`
/// literal rather than an error. Implementations are stateless and shared
/// freely across threads.
///
/// `id` and `id_for_insertion` are deliberately separate entry points. The
/// first references an existing row; the second establishes a new row's own
/// identifier, which some backends spell differently. Substituting one for
/// the other is a correctness bug, not a style choice.
pub trait Converter: Send + Sync {
    /// Reference form of an identifier, used for reads and foreign keys.
    fn id(&self, id: i64) -> String {
        id.to_string()
    }

    /// Insertion form of an identifier, used for the row being created.
    fn id_for_insertion(&self, id: i64) -> String {
        self.id(id)
    }

    /// Reference form of an optional identifier.
    fn opt_id(&self, id: Option<i64>) -> String {
        id.map_or_else(|| "NULL".to_string(), |v| self.id(v))
    }

    fn integer(&self, value: i32) -> String {
        value.to_string()
    }

    /// Date literal, `'YYYY-MM-DD'`.
    fn date(&self, date: NaiveDate) -> String {
        format!("'{}'", date.format("%Y-%m-%d"))
    }

    /// Timestamp literal with millisecond precision, in UTC.
    fn date_time(&self, value: DateTime<Utc>) -> String {
        format!("'{}'", value.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }

    /// Quoted string literal with embedded delimiters escaped.
    fn string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn opt_string(&self, value: Option<&str>) -> String {
        value.map_or_else(|| "NULL".to_string(), |v| self.string(v))
    }

    /// Sequence literal for a list of strings.
    fn string_list(&self, values: &[String]) -> String {
        let items: Vec<String> = values.iter().map(|v| self.string(v)).collect();
        format!("ARRAY[{}]::text[]", items.join(","))
    }

    /// Sequence literal for a list of identifiers, in reference form.
    fn id_list(&self, ids: &[i64]) -> String {
        let items: Vec<String> = ids.iter().map(|&v| self.id(v)).collect();
        format!("ARRAY[{}]::bigint[]", items.join(","))
    }

    /// An organisation sub-record as its two substitution values:
    /// (reference-form organisation id, year). Only compound-write
    /// decomposition consumes this; no single-statement template does.
    fn organisation(&self, org: &Organisation) -> (String, String) {
        (self.id(org.organisation_id), self.integer(org.year))
    }
}

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConverter;

impl Converter for PgConverter {
    // The row being created carries an explicit cast; plain decimal text is
    // kept for every later reference to the same identifier.
    fn id_for_insertion(&self, id: i64) -> String {
        format!("{id}::bigint")
    }

    fn date_time(&self, value: DateTime<Utc>) -> String {
        format!("'{}'", value.format("%Y-%m-%d %H:%M:%S%.3f+00"))
    }
}
