use super::table_wrapper::TableWrapper;
use crate::{Operator, ScanType, TableScan};
use std::sync::Arc;
use strata_base::{AnyValue, ColumnId, DataType, PosList, RowId};
use strata_store::{ReferenceSegment, Segment, Table};
use test_log::test;

fn five_row_table() -> Arc<Table> {
    let mut table = Table::new(2);
    table.add_column("a", DataType::Int, false);
    table.add_column("b", DataType::String, false);
    for (value, word) in [(1, "one"), (2, "two"), (3, "three"), (4, "four"), (5, "five")] {
        table.append(&[AnyValue::Int(value), AnyValue::from(word)]);
    }
    Arc::new(table)
}

fn nullable_table() -> Arc<Table> {
    let mut table = Table::new(8);
    table.add_column("a", DataType::Int, true);
    for value in [AnyValue::Int(1), AnyValue::Null, AnyValue::Int(3)] {
        table.append(&[value]);
    }
    Arc::new(table)
}

fn even_value_table() -> Arc<Table> {
    let mut table = Table::new(16);
    table.add_column("a", DataType::Int, false);
    for value in (0..=10).step_by(2) {
        table.append(&[AnyValue::Int(value)]);
    }
    table.compress_chunk(0);
    Arc::new(table)
}

fn scan(
    input: Arc<Table>,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: AnyValue,
) -> Arc<Table> {
    let mut wrapper = TableWrapper::new(input);
    wrapper.execute();
    let mut scan = TableScan::new(Box::new(wrapper), column_id, scan_type, search_value);
    scan.execute();
    scan.get_output().unwrap()
}

fn output_pos_list(output: &Table) -> PosList {
    let segment = output.get_chunk(0).get_segment(0);
    let reference_segment = segment
        .as_any()
        .downcast_ref::<ReferenceSegment>()
        .unwrap();
    reference_segment.pos_list().as_ref().clone()
}

#[test]
fn test_scan_value_segments() {
    let output = scan(five_row_table(), 0, ScanType::GreaterThan, AnyValue::Int(2));
    assert_eq!(output.row_count(), 3);
    assert_eq!(output.chunk_count(), 1);
    assert_eq!(output.column_count(), 2);
    assert_eq!(
        output_pos_list(&output),
        vec![RowId::new(1, 0), RowId::new(1, 1), RowId::new(2, 0)]
    );
    let chunk = output.get_chunk(0);
    assert_eq!(chunk.get_segment(0).value_at(0), AnyValue::Int(3));
    assert_eq!(chunk.get_segment(1).value_at(2), AnyValue::from("five"));
}

#[test]
fn test_scan_mixed_encodings() {
    let table = five_row_table();
    table.compress_chunk(0); // chunk 0 dictionary, chunks 1 and 2 still value
    let output = scan(table.clone(), 0, ScanType::GreaterThan, AnyValue::Int(2));
    assert_eq!(
        output_pos_list(&output),
        vec![RowId::new(1, 0), RowId::new(1, 1), RowId::new(2, 0)]
    );

    let output = scan(table, 0, ScanType::LessThanEquals, AnyValue::Int(2));
    assert_eq!(
        output_pos_list(&output),
        vec![RowId::new(0, 0), RowId::new(0, 1)]
    );
}

#[test]
fn test_scan_string_column() {
    let output = scan(five_row_table(), 1, ScanType::Equals, AnyValue::from("three"));
    assert_eq!(output_pos_list(&output), vec![RowId::new(1, 0)]);
}

#[test]
fn test_scan_output_schema_is_cloned() {
    let output = scan(five_row_table(), 0, ScanType::GreaterThan, AnyValue::Int(4));
    assert_eq!(output.column_name(0), "a");
    assert_eq!(output.column_name(1), "b");
    assert_eq!(output.column_type(1), DataType::String);
}

#[test]
fn test_chained_scan_references_the_origin_table() {
    let table = five_row_table();
    let first = scan(table.clone(), 0, ScanType::GreaterThan, AnyValue::Int(1));
    assert_eq!(first.row_count(), 4);

    let second = scan(first, 0, ScanType::LessThan, AnyValue::Int(5));
    assert_eq!(
        output_pos_list(&second),
        vec![RowId::new(0, 1), RowId::new(1, 0), RowId::new(1, 1)]
    );
    let segment = second.get_chunk(0).get_segment(1);
    let reference_segment = segment
        .as_any()
        .downcast_ref::<ReferenceSegment>()
        .unwrap();
    assert!(Arc::ptr_eq(reference_segment.referenced_table(), &table));
    assert_eq!(segment.value_at(0), AnyValue::from("two"));
}

#[test]
#[should_panic(expected = "single-chunk")]
fn test_reference_input_with_extra_chunks() {
    let first = scan(five_row_table(), 0, ScanType::GreaterThan, AnyValue::Int(1));
    // Appending re-opens the table with a second, value-backed chunk, which
    // puts its reference segment outside the single-chunk case.
    first.append(&[AnyValue::Int(6), AnyValue::from("six")]);
    scan(first, 0, ScanType::GreaterThan, AnyValue::Int(0));
}

#[test]
fn test_null_rows_never_match() {
    let table = nullable_table();
    let output = scan(table.clone(), 0, ScanType::NotEquals, AnyValue::Int(2));
    assert_eq!(
        output_pos_list(&output),
        vec![RowId::new(0, 0), RowId::new(0, 2)]
    );

    // Same scan over the dictionary encoding.
    table.compress_chunk(0);
    let output = scan(table, 0, ScanType::NotEquals, AnyValue::Int(2));
    assert_eq!(
        output_pos_list(&output),
        vec![RowId::new(0, 0), RowId::new(0, 2)]
    );
}

#[test]
fn test_null_rows_never_match_through_references() {
    let first = scan(
        nullable_table(),
        0,
        ScanType::GreaterThanEquals,
        AnyValue::Int(0),
    );
    assert_eq!(first.row_count(), 2);

    let second = scan(first, 0, ScanType::NotEquals, AnyValue::Int(1));
    assert_eq!(output_pos_list(&second), vec![RowId::new(0, 2)]);
}

#[test]
fn test_null_search_value_matches_nothing() {
    let output = scan(five_row_table(), 0, ScanType::Equals, AnyValue::Null);
    assert_eq!(output.row_count(), 0);

    let output = scan(nullable_table(), 0, ScanType::NotEquals, AnyValue::Null);
    assert_eq!(output.row_count(), 0);
}

#[test]
fn test_dictionary_scan_with_resident_search_value() {
    let table = even_value_table();
    assert_eq!(
        output_pos_list(&scan(table.clone(), 0, ScanType::Equals, AnyValue::Int(4))),
        vec![RowId::new(0, 2)]
    );
    assert_eq!(
        scan(table.clone(), 0, ScanType::NotEquals, AnyValue::Int(4)).row_count(),
        5
    );
    assert_eq!(
        output_pos_list(&scan(
            table.clone(),
            0,
            ScanType::LessThanEquals,
            AnyValue::Int(4)
        )),
        vec![RowId::new(0, 0), RowId::new(0, 1), RowId::new(0, 2)]
    );
    assert_eq!(
        output_pos_list(&scan(
            table,
            0,
            ScanType::GreaterThanEquals,
            AnyValue::Int(6)
        )),
        vec![RowId::new(0, 3), RowId::new(0, 4), RowId::new(0, 5)]
    );
}

#[test]
fn test_dictionary_scan_with_absent_search_value() {
    let table = even_value_table();
    // 5 sits between two dictionary entries.
    assert_eq!(
        scan(table.clone(), 0, ScanType::Equals, AnyValue::Int(5)).row_count(),
        0
    );
    assert_eq!(
        scan(table.clone(), 0, ScanType::NotEquals, AnyValue::Int(5)).row_count(),
        6
    );
    assert_eq!(
        output_pos_list(&scan(table.clone(), 0, ScanType::LessThan, AnyValue::Int(5))),
        vec![RowId::new(0, 0), RowId::new(0, 1), RowId::new(0, 2)]
    );
    assert_eq!(
        output_pos_list(&scan(
            table.clone(),
            0,
            ScanType::GreaterThan,
            AnyValue::Int(5)
        )),
        vec![RowId::new(0, 3), RowId::new(0, 4), RowId::new(0, 5)]
    );

    // Past either end of the dictionary.
    assert_eq!(
        scan(table.clone(), 0, ScanType::GreaterThan, AnyValue::Int(15)).row_count(),
        0
    );
    assert_eq!(
        scan(table.clone(), 0, ScanType::LessThan, AnyValue::Int(15)).row_count(),
        6
    );
    assert_eq!(
        scan(table.clone(), 0, ScanType::LessThan, AnyValue::Int(-1)).row_count(),
        0
    );
    assert_eq!(
        scan(table, 0, ScanType::GreaterThanEquals, AnyValue::Int(-1)).row_count(),
        6
    );
}

#[test]
fn test_rescan_produces_the_same_positions() {
    let table = five_row_table();
    let first = output_pos_list(&scan(
        table.clone(),
        0,
        ScanType::GreaterThan,
        AnyValue::Int(2),
    ));
    let second = output_pos_list(&scan(table, 0, ScanType::GreaterThan, AnyValue::Int(2)));
    assert_eq!(first, second);
}

#[test]
#[should_panic(expected = "incompatible")]
fn test_incompatible_search_value() {
    scan(five_row_table(), 1, ScanType::Equals, AnyValue::Int(3));
}

#[test]
fn test_accessors() {
    let mut wrapper = TableWrapper::new(five_row_table());
    wrapper.execute();
    let scan = TableScan::new(
        Box::new(wrapper),
        1,
        ScanType::LessThan,
        AnyValue::from("x"),
    );
    assert_eq!(scan.column_id(), 1);
    assert_eq!(scan.scan_type(), ScanType::LessThan);
    assert_eq!(*scan.search_value(), AnyValue::from("x"));
}
