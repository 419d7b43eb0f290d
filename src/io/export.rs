//! Dataset export
//!
//! Emits the full store as the schema-versioned JSON envelope, fit for
//! re-import or for committing as the new default dataset.

use std::fs;
use std::path::PathBuf;

use crate::core::store::RecordStore;
use crate::io::persist::{Dataset, PersistError};

/// Serialize the store as the export document
pub fn render(store: &RecordStore) -> Result<String, PersistError> {
    let dataset = Dataset::from_store(store);
    Ok(serde_json::to_string_pretty(&dataset)?)
}

/// Write the export document to a file, or stdout when no path is
/// given
pub fn write(store: &RecordStore, output: Option<PathBuf>) -> Result<(), PersistError> {
    let document = render(store)?;
    match output {
        Some(path) => fs::write(path, document)?,
        None => println!("{}", document),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::ProjectId;
    use crate::core::store::RecordStore;
    use crate::io::default_data;
    use crate::io::import::parse_json;

    #[test]
    fn test_export_reimport_roundtrip() {
        let store = RecordStore::from_locations(default_data::seed_locations());
        let document = render(&store).unwrap();

        let outcome = parse_json(&document, None).unwrap();
        let mut reimported = RecordStore::new();
        reimported.merge(outcome.locations);

        assert_eq!(reimported, store);
    }

    #[test]
    fn test_export_is_schema_versioned() {
        let store = RecordStore::from_locations(vec![crate::core::location::Location::new(
            "RX1",
            ProjectId::P7lh,
        )]);
        let document = render(&store).unwrap();
        assert!(document.contains("\"schemaVersion\": \"1\""));
        assert!(document.contains("\"savedAt\""));
    }
}
