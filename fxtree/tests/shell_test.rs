//! Scripted sessions against the interactive shell.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use fxtree::cli::shell::{FAREWELL, GREETING};
use fxtree::cli::Shell;
use fxtree::config::Settings;
use fxtree::util::testing;

type ScriptedShell = Shell<Cursor<Vec<u8>>, Vec<u8>>;

fn layout(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/layouts")
        .join(name)
}

fn scripted(lines: &[&str]) -> ScriptedShell {
    testing::init_test_setup();
    let mut settings = Settings::default();
    settings.shell.show_menu = false;
    let mut script = lines.join("\n");
    script.push('\n');
    Shell::new(settings, Cursor::new(script.into_bytes()), Vec::new())
}

fn run(lines: &[&str]) -> (ScriptedShell, String) {
    let mut shell = scripted(lines);
    shell.run().unwrap();
    let transcript = String::from_utf8(shell.output().clone()).unwrap();
    (shell, transcript)
}

#[test]
fn given_add_add_up_print_when_running_then_outline_shows_cursor_on_hbox() {
    let (shell, out) = run(&["A", "H", "1", "a", "b", "Go", "1", "U", "P", "Q"]);

    assert!(out.starts_with(GREETING));
    assert_eq!(out.matches("Added").count(), 2);
    assert!(out.contains("Cursor moved to HBox\n"));
    assert!(out.contains("+--AnchorPane\n\t==>HBox\n\t\t+--Button: Go\n"));
    assert!(out.trim_end().ends_with(FAREWELL));
    assert_eq!(shell.tree().node_count(), 3);
}

#[test]
fn given_fixture_when_loading_navigating_and_deleting_then_tree_updated() {
    let path = layout("login.txt");
    let (shell, out) = run(&["L", path.to_str().unwrap(), "C", "1", "D", "2", "Q"]);

    assert!(out.contains("login.txt loaded"));
    assert!(out.contains("Cursor moved to VBox"));
    assert!(out.contains("HBox removed"));
    // root, VBox, welcome label and the button row remain
    assert_eq!(shell.tree().node_count(), 6);
}

#[test]
fn given_missing_file_when_loading_then_reports_and_continues() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");
    let (shell, out) = run(&["L", missing.to_str().unwrap(), "R", "Q"]);

    assert!(out.contains("nope.txt not found"));
    assert!(out.contains("Cursor is at root."));
    assert_eq!(shell.tree().node_count(), 1);
}

#[test]
fn given_broken_layout_when_loading_then_error_names_line() {
    let path = layout("unknown_kind.txt");
    let (_, out) = run(&["L", path.to_str().unwrap(), "Q"]);
    assert!(out.contains("Error: line 2:"), "{out}");
}

#[test]
fn given_markup_file_when_loading_and_printing_then_raw_document_shown() {
    let path = layout("greeting.fxml");
    let expected = fs::read_to_string(&path).unwrap();
    let (_, out) = run(&["L", path.to_str().unwrap(), "P", "Q"]);

    assert!(out.contains("greeting.fxml loaded"));
    assert!(out.contains(&expected));
}

#[test]
fn given_text_area_when_exporting_then_file_holds_generated_id() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("form.fxml");
    let (_, out) = run(&[
        "A",
        "T",
        "Enter your name",
        "1",
        "X",
        target.to_str().unwrap(),
        "Q",
    ]);

    assert!(out.contains("form.fxml saved to computer"));
    let markup = fs::read_to_string(&target).unwrap();
    assert!(markup.contains("\t<TextArea fx:id=\"enterYourName\" text=\"Enter your name\"/>\n"));
}

#[test]
fn given_session_when_saving_then_outline_written() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("outline.txt");
    let (_, out) = run(&["A", "V", "1", "S", target.to_str().unwrap(), "Q"]);

    assert!(out.contains("outline.txt saved to computer"));
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "+--AnchorPane\n\t==>VBox\n"
    );
}

#[test]
fn given_control_cursor_when_editing_then_text_changes() {
    let (shell, out) = run(&["A", "L", "old", "1", "E", "new", "P", "Q"]);

    assert!(out.contains("Text edited."));
    assert!(out.contains("\t==>Label: new\n"));
    assert_eq!(shell.tree().cursor_node().text(), Some("new"));
}

#[test]
fn given_bad_answers_when_running_then_each_is_reported() {
    let (shell, out) = run(&["C", "abc", "A", "Z", "D", "5", "U", "W", "Q"]);

    assert!(out.contains("Invalid\n"));
    assert!(out.contains("Invalid component type"));
    assert!(out.contains("Error: index 4 out of range for 0 children"));
    assert!(out.contains("Cursor already at root"));
    assert!(out.contains("Please enter a valid choice."));
    assert_eq!(shell.tree().node_count(), 1);
}

#[test]
fn given_second_child_for_root_when_adding_then_full_reported() {
    let (shell, out) = run(&["A", "V", "1", "R", "A", "H", "1", "Q"]);
    assert!(out.contains("Error: node is full (capacity 1)"), "{out}");
    assert_eq!(shell.tree().node_count(), 2);
}

#[test]
fn given_input_ending_mid_command_when_running_then_leaves_cleanly() {
    let (shell, out) = run(&["A", "H"]);
    assert!(out.trim_end().ends_with(FAREWELL));
    assert_eq!(shell.tree().node_count(), 1);
}

#[test]
fn given_menu_enabled_when_running_then_menu_and_prompt_printed() {
    testing::init_test_setup();
    let mut shell = Shell::new(
        Settings::default(),
        Cursor::new(b"q\n".to_vec()),
        Vec::new(),
    );
    shell.run().unwrap();
    let out = String::from_utf8(shell.into_output()).unwrap();

    assert!(out.contains("\tX) Export to FXML\n"));
    assert!(out.contains("Please select an option: "));
}
