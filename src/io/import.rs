//! Bulk import from CSV and JSON
//!
//! File-level failures reject the whole batch; row-level issues skip
//! the row, leave a diagnostic, and let the batch proceed. Rows are
//! grouped into Locations keyed by (location, project) in read order;
//! merging replaces existing keys wholesale and appends new ones.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use thiserror::Error;

use crate::core::location::{Location, ProjectId};
use crate::core::record::ComponentRecord;
use crate::core::stage::Stage;

/// Errors that reject an entire import batch
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported import format '{0}'. Use a .csv or .json file")]
    UnknownFormat(String),
}

/// Import file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

/// Per-category skip counts for row-level issues
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub unknown_stage: usize,
    pub wrong_project: usize,
    pub missing_field: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.unknown_stage + self.wrong_project + self.missing_field
    }
}

/// A parsed batch, not yet merged into a store
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// Rows read from the source (CSV rows or JSON location objects)
    pub rows: usize,

    /// Accepted locations in read order
    pub locations: Vec<Location>,

    pub skipped: SkipCounts,

    /// One line per skipped row
    pub diagnostics: Vec<String>,
}

/// Detect the import format from the file extension
pub fn detect_format(path: &Path) -> Result<ImportFormat, ImportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match ext.as_str() {
        "csv" => Ok(ImportFormat::Csv),
        "json" => Ok(ImportFormat::Json),
        other => Err(ImportError::UnknownFormat(other.to_string())),
    }
}

/// Read and parse an import file. `project` is the active project
/// context; rows from other projects are counted, not imported. With
/// no context every valid project is accepted.
pub fn parse_file(path: &Path, project: Option<ProjectId>) -> Result<ImportOutcome, ImportError> {
    let format = detect_format(path)?;
    let content = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.display().to_string(),
        source,
    })?;

    match format {
        ImportFormat::Csv => parse_csv(&content, project),
        ImportFormat::Json => parse_json(&content, project),
    }
}

/// Normalize a header for matching: lowercase, all whitespace stripped
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Build a map from normalized header name to column index
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect()
}

/// Get a non-empty, trimmed field value from a CSV record
fn get_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Accumulates accepted rows into Locations keyed by
/// (location, project) in first-seen order
#[derive(Default)]
struct LocationGrouper {
    order: Vec<Location>,
    index: HashMap<(String, ProjectId), usize>,
}

impl LocationGrouper {
    fn push(&mut self, code: String, project: ProjectId, stage: Stage, record: ComponentRecord) {
        let key = (code.clone(), project);
        let idx = *self.index.entry(key).or_insert_with(|| {
            self.order.push(Location::new(code, project));
            self.order.len() - 1
        });
        self.order[idx]
            .stages
            .entry(stage)
            .or_default()
            .push(record);
    }

    fn finish(self) -> Vec<Location> {
        self.order
    }
}

/// Parse spreadsheet rows: columns Location, Project, Stage,
/// Part Number, Description, Configs, Noted (headers matched
/// case- and whitespace-insensitively)
pub fn parse_csv(content: &str, project: Option<ProjectId>) -> Result<ImportOutcome, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = rdr.headers()?.clone();
    let header_map = build_header_map(&headers);

    let mut outcome = ImportOutcome::default();
    let mut grouper = LocationGrouper::default();

    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2;
        outcome.rows += 1;

        let record = result?;

        let code = get_field(&record, &header_map, "location");
        let project_cell = get_field(&record, &header_map, "project");
        let stage_cell = get_field(&record, &header_map, "stage");
        let part_number = get_field(&record, &header_map, "partnumber");

        let (code, project_cell, stage_cell, part_number) =
            match (code, project_cell, stage_cell, part_number) {
                (Some(c), Some(p), Some(s), Some(pn)) => (c, p, s, pn),
                _ => {
                    outcome.skipped.missing_field += 1;
                    outcome.diagnostics.push(format!(
                        "Row {}: missing required field (Location, Project, Stage, Part Number); row skipped",
                        row_num
                    ));
                    continue;
                }
            };

        let row_project = match ProjectId::from_str(&project_cell) {
            Ok(p) => p,
            Err(_) => {
                outcome.skipped.wrong_project += 1;
                outcome.diagnostics.push(format!(
                    "Row {}: unrecognized project '{}'; row skipped",
                    row_num, project_cell
                ));
                continue;
            }
        };

        if let Some(active) = project {
            if row_project != active {
                outcome.skipped.wrong_project += 1;
                outcome.diagnostics.push(format!(
                    "Row {}: project {} does not match active project {}; row skipped",
                    row_num, row_project, active
                ));
                continue;
            }
        }

        let stage = match Stage::from_str(&stage_cell) {
            Ok(s) => s,
            Err(_) => {
                outcome.skipped.unknown_stage += 1;
                outcome.diagnostics.push(format!(
                    "Row {}: unknown stage '{}'; row skipped",
                    row_num, stage_cell
                ));
                continue;
            }
        };

        let configs: Vec<String> = get_field(&record, &header_map, "configs")
            .map(|cell| {
                cell.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if configs.is_empty() {
            outcome.skipped.missing_field += 1;
            outcome.diagnostics.push(format!(
                "Row {}: Configs must list at least one build variant; row skipped",
                row_num
            ));
            continue;
        }

        let description = get_field(&record, &header_map, "description").unwrap_or_default();
        let notes = get_field(&record, &header_map, "noted");

        let mut component = ComponentRecord::new(part_number, description).with_configs(configs);
        component.notes = notes;

        grouper.push(code, row_project, stage, component);
    }

    outcome.locations = grouper.finish();
    Ok(outcome)
}

/// Accepted JSON shapes: the export envelope, a bare array of
/// locations, or a single location object
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Envelope { locations: Vec<Location> },
    Many(Vec<Location>),
    One(Box<Location>),
}

/// Parse a JSON batch; same project filtering and merge policy as CSV
pub fn parse_json(content: &str, project: Option<ProjectId>) -> Result<ImportOutcome, ImportError> {
    let payload: JsonPayload = serde_json::from_str(content)?;
    let incoming = match payload {
        JsonPayload::Envelope { locations } => locations,
        JsonPayload::Many(locations) => locations,
        JsonPayload::One(location) => vec![*location],
    };

    let mut outcome = ImportOutcome::default();
    for loc in incoming {
        outcome.rows += 1;
        if let Some(active) = project {
            if loc.project != active {
                outcome.skipped.wrong_project += 1;
                outcome.diagnostics.push(format!(
                    "Location {} ({}): project does not match active project {}; skipped",
                    loc.location, loc.project, active
                ));
                continue;
            }
        }
        outcome.locations.push(loc);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_HEADER: &str = "Location,Project,Stage,Part Number,Description,Configs,Noted\n";

    #[test]
    fn test_header_normalization() {
        for header in ["Part Number", "partnumber", "PART NUMBER", " part  number "] {
            assert_eq!(normalize_header(header), "partnumber");
        }
    }

    #[test]
    fn test_csv_rows_group_by_location_and_project() {
        let csv = format!(
            "{}RF883,P7LH,P1b,118S00495,RES 226K,\"FBU, Mini, Main\",\n\
             RF883,P7LH,EVT,118S00495,RES 226K,\"FBU, Main\",\n\
             RF883,P7MH,EVT,118S01040,RES 232K,Mini,\n",
            CSV_HEADER
        );
        let outcome = parse_csv(&csv, None).unwrap();
        assert_eq!(outcome.rows, 3);
        assert_eq!(outcome.skipped.total(), 0);
        // two distinct (location, project) keys
        assert_eq!(outcome.locations.len(), 2);
        assert_eq!(outcome.locations[0].project, ProjectId::P7lh);
        assert_eq!(outcome.locations[0].stages[&Stage::P1b].len(), 1);
        assert_eq!(
            outcome.locations[0].stages[&Stage::P1b][0].configs,
            vec!["FBU", "Mini", "Main"]
        );
        assert_eq!(outcome.locations[1].project, ProjectId::P7mh);
    }

    #[test]
    fn test_csv_unknown_stage_skipped_with_diagnostic() {
        let csv = format!(
            "{}RF885,P7LH,PreBuild,118S00373,RES,Main,\n\
             RF885,P7LH,evt,118S00521,RES,Main,\n",
            CSV_HEADER
        );
        let outcome = parse_csv(&csv, None).unwrap();
        assert_eq!(outcome.skipped.unknown_stage, 1);
        assert_eq!(outcome.locations.len(), 1);
        assert!(outcome.locations[0].has_stage(Stage::Evt));
        assert!(outcome.diagnostics[0].contains("PreBuild"));
    }

    #[test]
    fn test_csv_project_context_filters_rows() {
        let csv = format!(
            "{}RF885,P7LH,EVT,118S00521,RES,Main,\n\
             UN400,P7MH,EVT,338S01281,PMU,Build B,\n",
            CSV_HEADER
        );
        let outcome = parse_csv(&csv, Some(ProjectId::P7lh)).unwrap();
        assert_eq!(outcome.skipped.wrong_project, 1);
        assert_eq!(outcome.locations.len(), 1);
        assert_eq!(outcome.locations[0].location, "RF885");

        let unfiltered = parse_csv(&csv, None).unwrap();
        assert_eq!(unfiltered.locations.len(), 2);
    }

    #[test]
    fn test_csv_missing_fields_and_empty_configs_skipped() {
        let csv = format!(
            "{}RF885,P7LH,EVT,,RES,Main,\n\
             RC305,P7LH,EVT,103S00578,RES,,\n",
            CSV_HEADER
        );
        let outcome = parse_csv(&csv, None).unwrap();
        assert_eq!(outcome.skipped.missing_field, 2);
        assert!(outcome.locations.is_empty());
    }

    #[test]
    fn test_csv_noted_column_becomes_notes() {
        let csv = format!(
            "{}FP700,P7LH,EVT,740S0146,FUSE,Main,requalified vendor\n",
            CSV_HEADER
        );
        let outcome = parse_csv(&csv, None).unwrap();
        let rec = &outcome.locations[0].stages[&Stage::Evt][0];
        assert_eq!(rec.notes.as_deref(), Some("requalified vendor"));
    }

    #[test]
    fn test_json_accepts_array_object_and_envelope() {
        let one = r#"{"location":"RX1","project":"P7LH","stages":{}}"#;
        assert_eq!(parse_json(one, None).unwrap().locations.len(), 1);

        let many = r#"[{"location":"RX1","project":"P7LH","stages":{}},
                       {"location":"RX2","project":"P7MH","stages":{}}]"#;
        assert_eq!(parse_json(many, None).unwrap().locations.len(), 2);

        let envelope = r#"{"schemaVersion":"1","savedAt":"2024-01-01T00:00:00Z",
                           "locations":[{"location":"RX1","project":"P7LH","stages":{}}]}"#;
        assert_eq!(parse_json(envelope, None).unwrap().locations.len(), 1);
    }

    #[test]
    fn test_json_project_filter_counts_mismatches() {
        let many = r#"[{"location":"RX1","project":"P7LH","stages":{}},
                       {"location":"RX2","project":"P7MH","stages":{}}]"#;
        let outcome = parse_json(many, Some(ProjectId::P7mh)).unwrap();
        assert_eq!(outcome.skipped.wrong_project, 1);
        assert_eq!(outcome.locations.len(), 1);
        assert_eq!(outcome.locations[0].location, "RX2");
    }

    #[test]
    fn test_json_unknown_stage_key_rejects_batch() {
        // stage map keys must come from the canonical enumeration
        let bad = r#"[{"location":"RX1","project":"P7LH","stages":{"PreBuild":[]}}]"#;
        assert!(parse_json(bad, None).is_err());
    }

    #[test]
    fn test_garbage_file_rejects_batch() {
        assert!(parse_json("{{{", None).is_err());
    }
}
