use crate::impact::{FieldValue, ProjectRecord};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ProjectRecord>, csv::Error> {
    // Short rows leave trailing columns absent; surplus cells are dropped.
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(clean_header).collect();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let record = headers
            .iter()
            .zip(row.iter())
            .filter_map(|(header, cell)| parse_cell(cell).map(|value| (header.clone(), value)))
            .collect::<ProjectRecord>();
        records.push(record);
    }

    Ok(records)
}

fn clean_header(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Empty cells are absent; everything else is kept as written.
///
/// Numbers and dates are only interpreted when a column is scored, so
/// descriptive columns pass through verbatim.
fn parse_cell(raw: &str) -> Option<FieldValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(FieldValue::Text(trimmed.to_string()))
    }
}

#[cfg(test)]
pub(crate) fn parse_cell_for_tests(raw: &str) -> Option<FieldValue> {
    parse_cell(raw)
}
