use super::*;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[test]
fn with_columns_starts_empty() {
    let table = Table::with_columns(["A", "B"]);
    assert_eq!(table.columns(), strings(&["A", "B"]).as_slice());
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
}

#[test]
fn from_grid_uses_first_row_as_header() {
    let grid = vec![strings(&["Name", "City"]), strings(&["Acme", "Pune"]), strings(&["Beta", "Surat"])];
    let table = Table::from_grid(grid);
    assert_eq!(table.columns(), strings(&["Name", "City"]).as_slice());
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1], strings(&["Beta", "Surat"]));
}

#[test]
fn from_grid_empty_is_default() {
    assert_eq!(Table::from_grid(Vec::new()), Table::default());
}

#[test]
fn ragged_rows_are_padded_and_truncated() {
    let table = Table::from_rows(strings(&["A", "B", "C"]), vec![strings(&["1"]), strings(&["1", "2", "3", "4"])]);
    assert_eq!(table.rows()[0], strings(&["1", "", ""]));
    assert_eq!(table.rows()[1], strings(&["1", "2", "3"]));
}

#[test]
fn to_grid_puts_header_first() {
    let table = Table::from_rows(strings(&["A"]), vec![strings(&["x"])]);
    assert_eq!(table.to_grid(), vec![strings(&["A"]), strings(&["x"])]);
}

// =============================================================================
// concat
// =============================================================================

#[test]
fn concat_appends_rows_in_order() {
    let existing = Table::from_rows(strings(&["A", "B"]), vec![strings(&["1", "2"]), strings(&["3", "4"])]);
    let new_row = Table::from_rows(strings(&["A", "B"]), vec![strings(&["5", "6"])]);
    let merged = existing.concat(new_row);
    assert_eq!(merged.len(), 3);
    assert_eq!(merged.rows()[0], strings(&["1", "2"]));
    assert_eq!(merged.rows()[2], strings(&["5", "6"]));
}

#[test]
fn concat_keeps_duplicate_rows() {
    let row = Table::from_rows(strings(&["A"]), vec![strings(&["same"])]);
    let merged = row.clone().concat(row);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.rows()[0], merged.rows()[1]);
}

#[test]
fn concat_aligns_columns_by_name() {
    let existing = Table::from_rows(strings(&["B", "A"]), vec![strings(&["b1", "a1"])]);
    let new_row = Table::from_rows(strings(&["A", "B"]), vec![strings(&["a2", "b2"])]);
    let merged = existing.concat(new_row);
    assert_eq!(merged.columns(), strings(&["B", "A"]).as_slice());
    assert_eq!(merged.rows()[1], strings(&["b2", "a2"]));
}

#[test]
fn concat_unions_columns_and_fills_gaps() {
    let existing = Table::from_rows(strings(&["A", "Legacy"]), vec![strings(&["a1", "old"])]);
    let new_row = Table::from_rows(strings(&["A", "C"]), vec![strings(&["a2", "c2"])]);
    let merged = existing.concat(new_row);
    assert_eq!(merged.columns(), strings(&["A", "Legacy", "C"]).as_slice());
    assert_eq!(merged.rows()[0], strings(&["a1", "old", ""]));
    assert_eq!(merged.rows()[1], strings(&["a2", "", "c2"]));
}

#[test]
fn concat_onto_empty_table_takes_other_header() {
    let new_row = Table::from_rows(strings(&["A", "B"]), vec![strings(&["1", "2"])]);
    let merged = Table::default().concat(new_row.clone());
    assert_eq!(merged, new_row);
}

// =============================================================================
// contains_row
// =============================================================================

#[test]
fn contains_row_matches_by_column_name() {
    let table = Table::from_rows(strings(&["Name", "City"]), vec![strings(&["Acme", "Pune"])]);
    assert!(table.contains_row(&[("City", "Pune"), ("Name", "Acme")]));
    assert!(!table.contains_row(&[("City", "Pune"), ("Name", "Beta")]));
}

#[test]
fn contains_row_treats_missing_column_as_empty() {
    let table = Table::from_rows(strings(&["Name"]), vec![strings(&["Acme"])]);
    assert!(table.contains_row(&[("Name", "Acme"), ("Remarks", "")]));
    assert!(!table.contains_row(&[("Name", "Acme"), ("Remarks", "hello")]));
}
