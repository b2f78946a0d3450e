//! Integration tests for FXML export.

use std::fs;
use std::path::{Path, PathBuf};

use rstest::rstest;
use tempfile::TempDir;

use fxtree::codec::{
    export_markup, load_tree, read_markup_file, read_tree, render_markup, MarkupOptions,
};
use fxtree::domain::{Component, ComponentKind, ComponentTree};

const PREAMBLE: &str = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<?import javafx.scene.control.*?>
<?import javafx.scene.layout.*?>
";

fn layout(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/layouts")
        .join(name)
}

fn document(body: &str) -> String {
    format!("{PREAMBLE}<AnchorPane xmlns:fx=\"http://javafx.com/fxml\">\n{body}</AnchorPane>\n")
}

#[test]
fn given_hbox_with_button_when_exporting_then_nested_elements() {
    let mut tree = ComponentTree::new();
    tree.add_child(0, Component::hbox()).unwrap();
    tree.cursor_to_child(0).unwrap();
    tree.add_child(0, Component::button("Go")).unwrap();

    let markup = render_markup(&tree, &MarkupOptions::default());

    assert_eq!(
        markup,
        document("\t<HBox>\n\t\t<Button text=\"Go\"/>\n\t</HBox>\n")
    );
}

#[test]
fn given_empty_tree_when_exporting_then_only_preamble_and_root() {
    let markup = render_markup(&ComponentTree::new(), &MarkupOptions::default());
    assert_eq!(markup, document(""));
}

#[test]
fn given_fixture_when_exporting_then_matches_expected_document() {
    let tree = load_tree(&layout("login.txt")).unwrap();

    let markup = render_markup(&tree, &MarkupOptions::default());

    let body = "\
\t<VBox>
\t\t<Label text=\"Welcome back\"/>
\t\t<HBox>
\t\t\t<Label text=\"Name:\"/>
\t\t\t<TextArea fx:id=\"enterYourName\" text=\"Enter your name\"/>
\t\t</HBox>
\t\t<HBox>
\t\t\t<Button text=\"OK\"/>
\t\t\t<Button text=\"Cancel\"/>
\t\t</HBox>
\t</VBox>
";
    assert_eq!(markup, document(body));
}

#[test]
fn given_same_tree_when_exporting_twice_then_identical_output() {
    let tree = load_tree(&layout("login.txt")).unwrap();
    let options = MarkupOptions::default();
    assert_eq!(render_markup(&tree, &options), render_markup(&tree, &options));
}

#[rstest]
#[case(true, ["notes", "notes2", "notes3"])]
#[case(false, ["notes", "notes", "notes"])]
fn given_repeated_text_area_text_when_exporting_then_ids_follow_unique_setting(
    #[case] unique_ids: bool,
    #[case] expected: [&str; 3],
) {
    let tree = read_tree(
        "1-0 VBox\n1-0-0 TextArea Notes\n1-0-1 TextArea notes\n1-0-2 TextArea  Notes \n".as_bytes(),
    )
    .unwrap();
    let options = MarkupOptions {
        unique_ids,
        ..MarkupOptions::default()
    };

    let markup = render_markup(&tree, &options);

    let ids: Vec<&str> = markup
        .lines()
        .filter_map(|line| line.split("fx:id=\"").nth(1))
        .filter_map(|rest| rest.split('"').next())
        .collect();
    assert_eq!(ids, expected);
}

#[test]
fn given_text_area_without_words_when_exporting_then_fallback_id() {
    let tree = read_tree("1-0 TextArea ?!\n".as_bytes()).unwrap();
    let markup = render_markup(&tree, &MarkupOptions::default());
    assert!(markup.contains("<TextArea fx:id=\"textArea\" text=\"?!\"/>"));
}

#[test]
fn given_nested_anchor_pane_when_exporting_then_closed_symmetrically() {
    let mut tree = ComponentTree::new();
    tree.add_child(0, Component::vbox()).unwrap();
    tree.cursor_to_child(0).unwrap();
    tree.add_child(0, Component::container(ComponentKind::AnchorPane))
        .unwrap();

    let markup = render_markup(&tree, &MarkupOptions::default());

    assert_eq!(
        markup,
        document("\t<VBox>\n\t\t<AnchorPane>\n\t\t</AnchorPane>\n\t</VBox>\n")
    );
}

#[test]
fn given_markup_characters_in_text_when_exporting_then_escaped() {
    let mut tree = ComponentTree::new();
    tree.add_child(0, Component::button(r#"Say "hi" & <go>"#))
        .unwrap();

    let markup = render_markup(&tree, &MarkupOptions::default());

    assert!(markup.contains(r#"<Button text="Say &quot;hi&quot; &amp; &lt;go&gt;"/>"#));
}

#[test]
fn given_custom_namespace_when_exporting_then_root_uses_it() {
    let options = MarkupOptions {
        namespace: "http://example.com/fxml/1".to_string(),
        ..MarkupOptions::default()
    };
    let markup = render_markup(&ComponentTree::new(), &options);
    assert!(markup.contains("<AnchorPane xmlns:fx=\"http://example.com/fxml/1\">"));
}

#[test]
fn given_export_to_file_when_reading_back_then_same_document() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("login.fxml");
    let tree = load_tree(&layout("login.txt")).unwrap();
    let options = MarkupOptions::default();

    export_markup(&tree, &options, &target).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), render_markup(&tree, &options));
    assert_eq!(read_markup_file(&target).unwrap(), render_markup(&tree, &options));
}

#[test]
fn given_markup_fixture_when_reading_then_content_kept_verbatim() {
    let content = read_markup_file(&layout("greeting.fxml")).unwrap();
    assert!(content.starts_with("<?xml"));
    assert!(content.contains("\t<Button text=\"Hi\"/>\n"));
}
