use super::*;
use serde_json::json;

#[test]
fn object_root_with_one_child() {
    let root = normalize_roadmap(&json!({
        "name": "root",
        "items": [{ "name": "a", "status": "ready" }]
    }))
    .unwrap();
    assert_eq!(root.name, "root");
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "a");
    assert_eq!(root.children[0].status, Status::Ready);
    assert!(root.children[0].is_leaf());
}

#[test]
fn single_element_array_is_unwrapped() {
    let root = normalize_roadmap(&json!([{ "name": "only", "items": [{ "name": "x" }] }])).unwrap();
    assert_eq!(root.name, "only");
    assert_eq!(root.children.len(), 1);
}

#[test]
fn multi_element_array_gets_synthetic_root() {
    let root = normalize_roadmap(&json!([
        { "name": "a" },
        { "status": "soon" },
        { "name": "b" }
    ]))
    .unwrap();
    assert_eq!(root.name, SYNTHETIC_ROOT_NAME);
    let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn unnamed_array_root_is_empty_tree() {
    let err = normalize_roadmap(&json!([{ "status": "x" }])).unwrap_err();
    assert!(matches!(err, Error::EmptyTree { .. }), "{err}");

    let err = normalize_roadmap(&json!([])).unwrap_err();
    assert!(matches!(err, Error::EmptyTree { .. }));

    let err = normalize_roadmap(&json!("just text")).unwrap_err();
    assert!(matches!(err, Error::EmptyTree { .. }));
}

#[test]
fn unnamed_child_is_dropped_with_subtree() {
    let out = normalize_roadmap_with_diagnostics(&json!({
        "name": "root",
        "items": [{ "status": "x", "items": [{ "name": "orphan" }, { "name": "orphan2" }] }]
    }))
    .unwrap();
    assert_eq!(out.root.count(), 1);
    assert_eq!(out.diagnostics.len(), 1);
    let d = &out.diagnostics[0];
    assert_eq!(d.kind, DiagnosticKind::MissingName);
    assert_eq!(d.path, "$.items[0]");
    assert!(d.message.contains("2 descendant"), "{}", d.message);
}

#[test]
fn link_falls_back_to_links() {
    let root = normalize_roadmap(&json!({
        "name": "root",
        "items": [
            { "name": "a", "links": "https://a.example" },
            { "name": "b", "link": "https://b.example", "links": "https://ignored.example" },
            { "name": "c", "links": [null, "https://c.example"] }
        ]
    }))
    .unwrap();
    assert_eq!(root.children[0].link.as_deref(), Some("https://a.example"));
    assert_eq!(root.children[1].link.as_deref(), Some("https://b.example"));
    assert_eq!(root.children[2].link.as_deref(), Some("https://c.example"));
}

#[test]
fn attributes_are_copied_and_unknown_side_is_reported() {
    let out = normalize_roadmap_with_diagnostics(&json!({
        "name": "root",
        "items": [
            { "name": "a", "category": "Infra", "side": "LEFT", "visibility": "public" },
            { "name": "b", "side": "sideways" }
        ]
    }))
    .unwrap();
    let a = &out.root.children[0];
    assert_eq!(a.category.as_deref(), Some("Infra"));
    assert_eq!(a.side, Some(Side::Left));
    assert_eq!(a.visibility.as_deref(), Some("public"));
    assert_eq!(out.root.children[1].side, None);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnknownSide);
    assert_eq!(out.diagnostics[0].path, "$.items[1]");
}

#[test]
fn scalar_names_and_bad_items_degrade_gracefully() {
    let out = normalize_roadmap_with_diagnostics(&json!({
        "name": 2025,
        "items": [
            { "name": "q1", "items": "oops" },
            42,
            { "name": "   " }
        ]
    }))
    .unwrap();
    assert_eq!(out.root.name, "2025");
    assert_eq!(out.root.children.len(), 1);
    assert!(out.root.children[0].is_leaf());
    let kinds: Vec<DiagnosticKind> = out.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::InvalidItems,
            DiagnosticKind::InvalidItem,
            DiagnosticKind::MissingName
        ]
    );
}

#[test]
fn yaml_records_normalize_like_json() {
    let yaml = "
name: Platform
category: Core
items:
  - name: Auth
    status: Not Started
  - name: Billing
    side: left
";
    let value: Value = serde_yaml::from_str(yaml).unwrap();
    let root = normalize_roadmap(&value).unwrap();
    assert_eq!(root.category.as_deref(), Some("Core"));
    assert_eq!(root.children[0].status, Status::NotStarted);
    assert_eq!(root.children[1].side, Some(Side::Left));
}
