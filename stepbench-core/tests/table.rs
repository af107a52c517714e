use std::fs;

use stepbench::{
    data::{read_vector, write_vector},
    FileFormatError, LogisticDataset, ParameterState, Table,
};

#[test]
fn parameter_state_round_trips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("w.txt");
    let state = ParameterState::new(vec![0.1, -2.5e-300, 1.0 / 3.0, 12345.678901234567]);

    write_vector(state.as_slice(), &path).unwrap();
    let back = ParameterState::new(read_vector(&path).unwrap());
    assert_eq!(back, state);
}

#[test]
fn written_rows_are_space_delimited() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.txt");
    Table::from_rows(&[[1.0, 2.0], [3.0, 4.0]])
        .unwrap()
        .write(&path)
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "1.000000000000000000e0 2.000000000000000000e0");
}

#[test]
fn reads_hand_written_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.txt");
    fs::write(&path, "# header comment\n1 2 3\n\n4   5 6\n").unwrap();

    let t = Table::read(&path).unwrap();
    assert_eq!(t.shape(), (2, 3));
    assert_eq!(t.row(1), &[4.0, 5.0, 6.0]);
}

#[test]
fn ragged_row_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.txt");
    fs::write(&path, "1 2 3\n4 5\n").unwrap();

    match Table::read(&path).unwrap_err() {
        FileFormatError::RaggedRow {
            line,
            expected,
            found,
            ..
        } => {
            assert_eq!(line, 2);
            assert_eq!((expected, found), (3, 2));
        }
        other => panic!("expected RaggedRow, got {other:?}"),
    }
}

#[test]
fn bad_token_is_invalid_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.txt");
    fs::write(&path, "1 2\n3 abc\n").unwrap();

    let err = Table::read(&path).unwrap_err();
    assert!(matches!(err, FileFormatError::InvalidNumber { ref token, .. } if token == "abc"));
}

#[test]
fn missing_and_empty_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Table::read(dir.path().join("nope.txt")).unwrap_err(),
        FileFormatError::Io { .. }
    ));

    let empty = dir.path().join("empty.txt");
    fs::write(&empty, "# nothing\n\n").unwrap();
    assert!(matches!(
        Table::read(&empty).unwrap_err(),
        FileFormatError::Empty { .. }
    ));
}

#[test]
fn label_count_must_match_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (x, y) = (dir.path().join("X.txt"), dir.path().join("y.txt"));
    Table::from_rows(&[[1.0], [2.0], [3.0]]).unwrap().write(&x).unwrap();
    write_vector(&[0.0, 1.0], &y).unwrap();

    assert!(matches!(
        LogisticDataset::read(&x, &y).unwrap_err(),
        FileFormatError::RowCountMismatch { rows: 3, labels: 2 }
    ));
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = LogisticDataset::generate(40, 8, Some(5));
    let b = LogisticDataset::generate(40, 8, Some(5));
    let c = LogisticDataset::generate(40, 8, Some(6));
    assert_eq!(a, b);
    assert_ne!(a.x, c.x);
    assert!(a.y.iter().all(|&v| v == 0.0 || v == 1.0));
}

#[test]
fn indented_and_trailing_comments_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.txt");
    fs::write(&path, "  # note\n1 2 # trailing\n3 4\n").unwrap();

    let t = Table::read(&path).unwrap();
    assert_eq!(t.shape(), (2, 2));
    assert_eq!(t.row(0), &[1.0, 2.0]);
}

#[test]
fn empty_vector_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("w.txt");

    let err = write_vector(&[], &path).unwrap_err();
    assert!(matches!(err, FileFormatError::Empty { .. }));
    assert!(!path.exists());
}
