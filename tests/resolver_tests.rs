//! Tests for Resolver
//!
//! These tests verify:
//! - Write/read round trips and positional windows
//! - Whole-group and positional replace
//! - Whole-group and positional delete
//! - Search scoping and ordering
//! - Title listing
//! - Not-found handling

use chrono::DateTime;
use tempfile::TempDir;
use tsvnotes::resolver::Line;
use tsvnotes::{Command, Config, LineSelector, NotesError, Outcome, Resolver};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_resolver() -> (TempDir, Resolver) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .notes_file(temp_dir.path().join("notes.tsv"))
        .build();
    let resolver = Resolver::open(&config).unwrap();
    (temp_dir, resolver)
}

fn write(resolver: &Resolver, title: &str, text: &str) {
    resolver.write(title, text, &[]).unwrap();
}

fn read_lines(resolver: &Resolver, title: &str, selector: Option<LineSelector>) -> Vec<Line> {
    match resolver.read(title, selector).unwrap() {
        Outcome::Lines { lines, .. } => lines,
        other => panic!("expected lines, got {other:?}"),
    }
}

fn read_notes(resolver: &Resolver, title: &str) -> Vec<String> {
    read_lines(resolver, title, None)
        .into_iter()
        .map(|line| line.row.note().to_string())
        .collect()
}

fn range(start: usize, end: usize) -> Option<LineSelector> {
    Some(LineSelector::Range { start, end })
}

// =============================================================================
// Write/Read Tests
// =============================================================================

#[test]
fn test_write_three_then_read() {
    let (_temp, resolver) = setup_temp_resolver();

    for _ in 0..3 {
        write(&resolver, "t1", "hello");
    }

    let lines = read_lines(&resolver, "t1", None);
    assert_eq!(lines.len(), 3);
    for (expected, line) in lines.iter().enumerate() {
        assert_eq!(line.index, expected);
        assert!(line.row.note().contains("hello"));
    }
}

#[test]
fn test_write_adds_exactly_one_line() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "a");
    write(&resolver, "t2", "b");

    let before = read_notes(&resolver, "t1");
    write(&resolver, "t1", "fresh");
    let after = read_notes(&resolver, "t1");

    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.iter().filter(|n| *n == "fresh").count(), 1);
}

#[test]
fn test_write_sets_iso_timestamp() {
    let (_temp, resolver) = setup_temp_resolver();

    let row = resolver.write("t1", "dated", &[]).unwrap();

    let date = row.date().expect("date column should be filled");
    assert!(DateTime::parse_from_rfc3339(date).is_ok(), "bad date {date}");
}

#[test]
fn test_write_without_date_column_leaves_date_out() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .notes_file(temp_dir.path().join("plain.tsv"))
        .columns(["title", "note"])
        .build();
    let resolver = Resolver::open(&config).unwrap();

    let row = resolver.write("t1", "undated", &[]).unwrap();

    assert_eq!(row.date(), None);
    assert_eq!(read_notes(&resolver, "t1"), vec!["undated"]);
}

#[test]
fn test_write_extra_fields() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .notes_file(temp_dir.path().join("legacy.tsv"))
        .legacy_columns()
        .build();
    let resolver = Resolver::open(&config).unwrap();

    let fields = vec![("theme".to_string(), "work".to_string())];
    resolver.write("t1", "body", &fields).unwrap();

    let lines = read_lines(&resolver, "t1", None);
    assert_eq!(lines[0].row.get("theme"), Some("work"));
}

#[test]
fn test_write_unknown_field_is_validation_error() {
    let (_temp, resolver) = setup_temp_resolver();

    let fields = vec![("chapter".to_string(), "1".to_string())];
    let err = resolver.write("t1", "body", &fields).unwrap_err();

    assert!(matches!(err, NotesError::Validation { ref field, .. } if field == "chapter"));
    assert!(resolver.read("t1", None).unwrap().is_not_found());
}

#[test]
fn test_read_range_sizes() {
    let (_temp, resolver) = setup_temp_resolver();
    for i in 0..5 {
        write(&resolver, "t1", &format!("line {i}"));
    }

    assert_eq!(read_lines(&resolver, "t1", range(1, 3)).len(), 3);
    assert_eq!(read_lines(&resolver, "t1", range(3, 10)).len(), 2);
    assert_eq!(read_lines(&resolver, "t1", range(0, 0)).len(), 1);
    assert!(read_lines(&resolver, "t1", range(5, 8)).is_empty());
}

#[test]
fn test_read_single_index_keeps_original_position() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "zero");
    write(&resolver, "other", "x");
    write(&resolver, "t1", "one");

    let lines = read_lines(&resolver, "t1", Some(LineSelector::Single(1)));

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].index, 1);
    assert_eq!(lines[0].row.note(), "one");
}

#[test]
fn test_read_index_past_end_is_empty() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "zero");

    assert!(read_lines(&resolver, "t1", Some(LineSelector::Single(4))).is_empty());
}

#[test]
fn test_read_missing_title() {
    let (_temp, resolver) = setup_temp_resolver();

    let outcome = resolver.read("nope", None).unwrap();

    assert_eq!(outcome, Outcome::TitleNotFound("nope".to_string()));
}

// =============================================================================
// Replace Tests
// =============================================================================

#[test]
fn test_replace_whole_group_leaves_one_line() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "a");
    write(&resolver, "t1", "b");
    write(&resolver, "t2", "keep");
    write(&resolver, "t1", "c");

    let outcome = resolver.replace("t1", None, Some("new"), &[]).unwrap();

    match outcome {
        Outcome::Replaced { removed, inserted, .. } => {
            assert_eq!(removed, 3);
            assert_eq!(inserted.unwrap().note(), "new");
        }
        other => panic!("expected replaced, got {other:?}"),
    }
    assert_eq!(read_notes(&resolver, "t1"), vec!["new"]);
    assert_eq!(read_notes(&resolver, "t2"), vec!["keep"]);
    assert_eq!(resolver.store().all_notes().unwrap(), vec!["keep", "new"]);
}

#[test]
fn test_replace_missing_title_with_text_creates_it() {
    let (_temp, resolver) = setup_temp_resolver();

    resolver.replace("t1", None, Some("first"), &[]).unwrap();

    assert_eq!(read_notes(&resolver, "t1"), vec!["first"]);
}

#[test]
fn test_replace_single_line_in_place() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "zero");
    write(&resolver, "t1", "one");
    write(&resolver, "t1", "two");

    resolver
        .replace("t1", Some(LineSelector::Single(1)), Some("ONE"), &[])
        .unwrap();

    assert_eq!(read_notes(&resolver, "t1"), vec!["zero", "ONE", "two"]);
}

#[test]
fn test_replace_range_collapses_to_one_line() {
    let (_temp, resolver) = setup_temp_resolver();
    for text in ["a", "b", "c", "d"] {
        write(&resolver, "t1", text);
    }

    resolver.replace("t1", range(1, 2), Some("bc"), &[]).unwrap();

    assert_eq!(read_notes(&resolver, "t1"), vec!["a", "bc", "d"]);
}

#[test]
fn test_replace_without_text_deletes() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "a");

    let outcome = resolver.replace("t1", None, None, &[]).unwrap();

    assert_eq!(
        outcome,
        Outcome::Replaced { title: "t1".to_string(), removed: 1, inserted: None }
    );
    assert!(resolver.read("t1", None).unwrap().is_not_found());
}

#[test]
fn test_replace_selector_past_end_changes_nothing() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "a");

    let outcome = resolver
        .replace("t1", Some(LineSelector::Single(3)), Some("x"), &[])
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::LineNotFound { title: "t1".to_string(), selector: LineSelector::Single(3) }
    );
    assert_eq!(read_notes(&resolver, "t1"), vec!["a"]);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_then_read_is_not_found() {
    let (_temp, resolver) = setup_temp_resolver();
    for _ in 0..3 {
        write(&resolver, "t1", "hello");
    }

    let outcome = resolver.delete("t1", None).unwrap();

    assert_eq!(outcome, Outcome::Deleted { title: "t1".to_string(), removed: 3 });
    assert!(resolver.read("t1", None).unwrap().is_not_found());
}

#[test]
fn test_delete_only_group_leaves_header() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "only");

    resolver.delete("t1", None).unwrap();

    assert!(resolver.list_titles().unwrap().is_empty());
    assert_eq!(resolver.store().header(), &["date", "title", "note"]);
    // writing still works after the file became header-only
    write(&resolver, "t1", "again");
    assert_eq!(read_notes(&resolver, "t1"), vec!["again"]);
}

#[test]
fn test_delete_selected_lines() {
    let (_temp, resolver) = setup_temp_resolver();
    for text in ["a", "b", "c"] {
        write(&resolver, "t1", text);
    }

    resolver.delete("t1", Some(LineSelector::Single(0))).unwrap();

    assert_eq!(read_notes(&resolver, "t1"), vec!["b", "c"]);
}

#[test]
fn test_delete_missing_title() {
    let (_temp, resolver) = setup_temp_resolver();

    let outcome = resolver.delete("ghost", None).unwrap();

    assert_eq!(outcome, Outcome::TitleNotFound("ghost".to_string()));
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_search_global_counts_matches() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "apple pie");
    write(&resolver, "t2", "banana");
    write(&resolver, "t2", "apple juice");
    write(&resolver, "t3", "Apple upper");

    match resolver.search("apple", None).unwrap() {
        Outcome::Matches { lines, .. } => {
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0].0, "t1");
            assert_eq!(lines[1].0, "t2");
            assert_eq!(lines[1].1.index, 1);
            assert!(lines.iter().all(|(_, l)| l.row.note().contains("apple")));
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn test_search_scoped_to_title() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "apple pie");
    write(&resolver, "t2", "apple juice");

    match resolver.search("apple", Some("t2")).unwrap() {
        Outcome::Matches { lines, .. } => {
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].1.row.note(), "apple juice");
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[test]
fn test_search_missing_title_scope() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "apple");

    assert!(resolver.search("apple", Some("nope")).unwrap().is_not_found());
}

#[test]
fn test_search_no_hits_is_empty() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "t1", "apple");

    let outcome = resolver.search("kiwi", None).unwrap();

    assert_eq!(
        outcome,
        Outcome::Matches { needle: "kiwi".to_string(), lines: Vec::new() }
    );
}

// =============================================================================
// List / Execute Tests
// =============================================================================

#[test]
fn test_list_collapses_duplicates() {
    let (_temp, resolver) = setup_temp_resolver();
    write(&resolver, "A", "1");
    write(&resolver, "B", "2");
    write(&resolver, "A", "3");

    assert_eq!(resolver.list_titles().unwrap(), vec!["A", "B"]);
}

#[test]
fn test_execute_routes_commands() {
    let (_temp, resolver) = setup_temp_resolver();

    let written = resolver
        .execute(Command::Write {
            title: "t1".to_string(),
            text: "hello".to_string(),
            fields: Vec::new(),
        })
        .unwrap();
    assert_eq!(written.render(), vec!["hello"]);

    let listed = resolver.execute(Command::List).unwrap();
    assert_eq!(listed, Outcome::Titles(vec!["t1".to_string()]));

    let read = resolver
        .execute(Command::Read { title: "t1".to_string(), selector: None })
        .unwrap();
    let rendered = read.render();
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].starts_with("[0] "));
    assert!(rendered[0].ends_with("hello"));

    resolver
        .execute(Command::Delete { title: "t1".to_string(), selector: None })
        .unwrap();
    let gone = resolver
        .execute(Command::Read { title: "t1".to_string(), selector: None })
        .unwrap();
    assert_eq!(gone.render(), vec!["title not found: t1"]);
}
