//! Integration test: a full session as a UI would drive it.

use mnemo::prelude::*;
use mnemo_test_utils::fragmented_manager;

#[test]
fn ui_style_workflow() {
    let mut s = Session::with_capacity(2048).unwrap();
    assert!(s.add_program("editor", "editor.cpp", 1024));
    assert!(s.add_program("viewer", "viewer.cpp", 1024));
    assert!(!s.add_program("editor", "again.cpp", 10));

    assert!(s.allocate_variable("editor", "count", ValueType::SizeT));
    assert!(s.allocate_array("editor", "title", 8, ValueType::Char));
    assert!(s.allocate_shared("editor", "buffer", 16, ValueType::Double));
    assert!(s.request_access("buffer", "viewer"));
    assert!(s.make_reference("buf", "buffer", "viewer"));

    for (i, ch) in "mnemo".bytes().enumerate() {
        assert!(s.set("title", Value::Char(ch), &Span::Index(i)));
    }
    assert!(s.set_text("count", "5", &Span::Whole));
    assert!(s.set_text("buf", "0.25", &Span::Index(1)));

    assert_eq!(s.render_value("count", &Span::Whole).unwrap(), "5");
    assert_eq!(
        s.render_value("title", &Span::from_bounds(0, 5)).unwrap(),
        "m, n, e, m, o"
    );
    assert_eq!(s.render_value("buffer", &Span::from_bounds(0, 2)).unwrap(), "0, 0.25");
    assert_eq!(s.value_type("buf"), Some(ValueType::Double));

    assert_eq!(s.list_programs(), ["editor", "viewer"]);
    assert_eq!(s.list_elements("viewer"), ["buffer", "buf"]);
    assert_eq!(s.list_shared_segments(Some("viewer")), ["buffer"]);

    let stats = s.statistics();
    assert_eq!(stats["viewer"], 128.0 / 2048.0);
    assert_eq!(stats["editor"], (8.0 + 8.0 + 128.0) / 2048.0);

    // One rejected program registration so far.
    let errors = s.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error: ACCESS_ERROR"));
}

#[test]
fn wrapping_a_prepared_manager() {
    let mut s = Session::new(fragmented_manager());
    // Elements created outside the session are not typed.
    assert_eq!(s.value_type("var1"), None);
    assert!(s.render_value("var1", &Span::Whole).is_none());

    let report = s.defragment();
    assert_eq!(report.free_from, 400);
    assert_eq!(s.manager().get_element("var3").unwrap().offset(), 100);
}

#[test]
fn dangling_reference_renders_empty() {
    let mut s = Session::with_capacity(256).unwrap();
    s.add_program("p", "p.cpp", 256);
    s.allocate_variable("p", "x", ValueType::Int);
    s.make_reference("rx", "x", "p");
    s.delete_element("x", "p");
    assert_eq!(s.dangling_references(), ["rx"]);
    assert!(s.render_value("rx", &Span::Whole).is_none());
}

#[test]
fn reference_to_reused_reference_name_has_no_type() {
    let mut s = Session::with_capacity(256).unwrap();
    s.add_program("p", "p.cpp", 256);
    s.allocate_variable("p", "a", ValueType::Int);
    s.allocate_variable("p", "b", ValueType::Double);
    s.make_reference("r", "a", "p");
    s.delete_element("a", "p");
    assert!(s.make_reference("a", "b", "p"));

    assert_eq!(s.value_type("a"), Some(ValueType::Double));
    assert_eq!(s.value_type("r"), None);
    assert_eq!(s.dangling_references(), ["r"]);
}
