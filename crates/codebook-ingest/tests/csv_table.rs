use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use codebook_ingest::{DEFAULT_DELIMITER, LoadError, read_data_table};

fn temp_file(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    (dir, path)
}

#[test]
fn reads_semicolon_separated_data() {
    let (_dir, path) = temp_file(
        "data.csv",
        "\u{feff}respondent ; v_1;v_2\n1;34;1\n2; 51 ;2\n",
    );
    let table = read_data_table(&path, DEFAULT_DELIMITER).expect("read data");
    assert_eq!(table.headers, vec!["respondent", "v_1", "v_2"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[1], vec!["2", "51", "2"]);
}

#[test]
fn skips_blank_rows_and_pads_short_ones() {
    let (_dir, path) = temp_file("data.csv", "a,b,c\n1,2\n,,\n4,5,6\n");
    let table = read_data_table(&path, b',').expect("read data");
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[0], vec!["1", "2", ""]);
    let c: Vec<&str> = table.column("c").expect("column c").collect();
    assert_eq!(c, vec!["", "6"]);
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn warns_when_row_is_wider_than_header() {
    let (_dir, path) = temp_file("data.csv", "a;b\n1;2;3;4\n5;6\n");
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let table = tracing::subscriber::with_default(subscriber, || {
        read_data_table(&path, DEFAULT_DELIMITER).expect("read data")
    });

    assert_eq!(table.rows, vec![vec!["1", "2"], vec!["5", "6"]]);
    let text = logs.text();
    assert!(text.contains("row is wider than the header"), "{text}");
    assert_eq!(text.matches("extra cells dropped").count(), 1, "{text}");
    assert!(text.contains("cells=4"), "{text}");
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("absent.csv");
    let error = read_data_table(&path, DEFAULT_DELIMITER).unwrap_err();
    assert!(matches!(error, LoadError::Csv { .. }));
    assert!(error.to_string().contains("absent.csv"));
}
