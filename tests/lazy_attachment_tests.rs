use std::cell::RefCell;
use std::rc::Rc;

use chart_options_tree::api::ChartOptions;
use chart_options_tree::core::{Key, Node, NoDefaults, ObjectRef, Value};
use serde_json::json;

#[test]
fn nested_write_adds_only_the_font_key() {
    let options = ChartOptions::detached();
    let font = options.font();
    assert!(!options.node().is_materialized());

    font.set_size(14.0);

    assert_eq!(options.node().keys(), vec!["font".to_owned()]);
    assert_eq!(options.to_json(), json!({ "font": { "size": 14 } }));
}

#[test]
fn accessor_chains_do_not_change_store_shape() {
    let store = ObjectRef::from_json_str(r#"{"responsive": false}"#).expect("store json");
    let options = ChartOptions::with_store(store.clone(), Rc::new(NoDefaults));

    let label = options.plugins().annotation().annotation("limit").expect("id").label();
    let _ = label.font().size();
    let _ = label.content_lines();
    let _ = options.title().text();
    let _ = options.elements().point().radius();

    assert_eq!(store.keys(), vec!["responsive".to_owned()]);
    assert!(!label.node().is_materialized());
}

#[test]
fn removal_is_local_to_the_child() {
    let options = ChartOptions::from_json_str(
        r##"{"font": {"size": 14, "color": "#000"}}"##,
        Rc::new(NoDefaults),
    )
    .expect("options json");
    let font = options.font();

    font.node().remove(&Key::new("color"));

    assert_eq!(options.to_json(), json!({ "font": { "size": 14 } }));

    font.node().remove(&Key::new("size"));
    assert_eq!(options.to_json(), json!({ "font": {} }));
}

#[test]
fn repeated_write_is_idempotent() {
    let options = ChartOptions::detached();
    let font = options.font();
    font.set_size(14.0);
    let attached = options.node().read(&ChartOptions::FONT).expect("font attached");

    font.set_size(14.0);

    let again = options.node().read(&ChartOptions::FONT).expect("font still attached");
    match (attached, again) {
        (Value::Object(first), Value::Object(second)) => assert!(first.ptr_eq(&second)),
        other => panic!("expected object slots, got {other:?}"),
    }
    assert_eq!(options.to_json(), json!({ "font": { "size": 14 } }));
}

#[test]
fn wrappers_for_the_same_child_share_one_store() {
    let options = ChartOptions::detached();
    let first = options.font();
    let second = options.font();

    first.set_size(16.0);
    second.set_family("serif");

    assert_eq!(first.family().as_deref(), Some("serif"));
    assert_eq!(second.size(), 16.0);
    let first_store = first.node().store().expect("first materialized");
    let second_store = second.node().store().expect("second materialized");
    assert!(first_store.ptr_eq(&second_store));
}

#[test]
fn deep_write_materializes_every_missing_ancestor() {
    let options = ChartOptions::detached();
    let annotation = options
        .plugins()
        .annotation()
        .annotation("threshold")
        .expect("valid id");

    annotation.label().font().set_size(10.0);

    assert_eq!(
        options.to_json(),
        json!({
            "plugins": {
                "annotation": {
                    "annotations": {
                        "threshold": {
                            "label": { "font": { "size": 10 } },
                            "type": "line"
                        }
                    }
                }
            }
        })
    );
}

#[test]
fn write_through_partially_materialized_chain_reuses_existing_ancestors() {
    let options = ChartOptions::from_json_str(
        r#"{"plugins": {"title": {"display": true}}}"#,
        Rc::new(NoDefaults),
    )
    .expect("options json");
    let plugins_store = options.plugins().node().store().expect("plugins present");

    options.plugins().annotation().set_clip(false);

    let after = options.plugins().node().store().expect("plugins still present");
    assert!(plugins_store.ptr_eq(&after));
    assert_eq!(
        options.to_json(),
        json!({ "plugins": { "title": { "display": true }, "annotation": { "clip": false } } })
    );
}

#[test]
fn root_write_creates_store_on_demand() {
    let root = Node::detached();
    assert!(root.is_root());
    assert!(!root.is_materialized());

    root.set_bool(&Key::new("responsive"), false);

    assert!(root.is_materialized());
    assert_eq!(root.to_json(), json!({ "responsive": false }));
}

#[test]
fn remove_self_detaches_and_next_write_rematerializes() {
    let options = ChartOptions::detached();
    let font = options.font();
    font.set_size(20.0);
    let old_store = font.node().store().expect("materialized");

    assert!(font.node().remove_self());
    assert!(!font.node().is_materialized());
    assert_eq!(font.size(), 12.0);
    assert_eq!(options.to_json(), json!({}));
    assert!(!font.node().remove_self());

    font.set_family("monospace");
    let new_store = font.node().store().expect("rematerialized");
    assert!(!old_store.ptr_eq(&new_store));
    assert_eq!(options.to_json(), json!({ "font": { "family": "monospace" } }));
}

#[test]
fn detached_wrapper_observes_absence() {
    let options = ChartOptions::detached();
    let held = options.font();
    held.set_size(9.0);

    options.font().node().remove_self();

    assert!(!held.node().is_materialized());
    assert_eq!(held.node().read(&Key::new("size")), None);
}

#[test]
fn update_listener_runs_after_each_write() {
    let options = ChartOptions::detached();
    let font = options.font();
    let seen = Rc::new(RefCell::new(Vec::<serde_json::Value>::new()));
    let sink = Rc::clone(&seen);
    font.node()
        .set_update_listener(move |node| sink.borrow_mut().push(node.to_json()));

    font.set_size(11.0);
    font.set_family("serif");
    font.node().remove(&Key::new("size"));

    let seen = seen.borrow();
    assert_eq!(
        *seen,
        vec![
            json!({ "size": 11 }),
            json!({ "size": 11, "family": "serif" }),
        ]
    );
}

#[test]
fn set_node_shares_the_assigned_store() {
    let options = ChartOptions::detached();
    let shared = Node::detached();
    shared.set_string(&Key::new("color"), "#123");

    options.node().set_node(&ChartOptions::FONT, &shared);
    shared.set_number(&Key::new("size"), 15.0);

    assert_eq!(options.font().size(), 15.0);
    assert_eq!(options.font().color().as_deref(), Some("#123"));
}

#[test]
fn runtime_keys_reject_blank_names() {
    let options = ChartOptions::detached();
    assert!(options.node().child_named("").is_err());
    assert!(options.plugins().annotation().annotation("   ").is_err());
    assert!(!options.node().is_materialized());
}

#[test]
fn node_lists_keep_order_and_share_stores() {
    let options = ChartOptions::detached();
    let first = Node::detached();
    let second = Node::detached();
    first.set_string(&Key::new("label"), "open");
    second.set_string(&Key::new("label"), "close");

    let datasets = Key::new("datasets");
    options.node().set_nodes(&datasets, &[first.clone(), second.clone()]);
    second.set_number(&Key::new("borderWidth"), 2.0);

    assert_eq!(
        options.to_json(),
        json!({ "datasets": [
            { "label": "open" },
            { "label": "close", "borderWidth": 2 }
        ] })
    );

    let read = options.node().get_nodes(&datasets).expect("node list");
    assert_eq!(read.len(), 2);
    assert_eq!(read[0].get::<String>(&Key::new("label")).as_deref(), Some("open"));
    read[0].set_bool(&Key::new("hidden"), true);
    assert_eq!(first.get::<bool>(&Key::new("hidden")), Some(true));
}

#[test]
fn single_node_list_is_stored_as_object() {
    let options = ChartOptions::detached();
    let only = Node::detached();
    only.set_number(&Key::new("order"), 1.0);
    let key = Key::new("datasets");

    options.node().set_nodes(&key, std::slice::from_ref(&only));

    assert_eq!(options.to_json(), json!({ "datasets": { "order": 1 } }));
    assert_eq!(options.node().get_nodes(&key).map(|nodes| nodes.len()), Some(1));

    options.node().set_value(&key, Value::Array(vec![Value::from(1.0)]));
    assert!(options.node().get_nodes(&key).is_none());
}

#[test]
#[should_panic(expected = "contains the store of")]
fn adopting_an_ancestor_store_fails_fast() {
    let root = Node::detached();
    root.set_bool(&Key::new("responsive"), true);
    let child = root.child(Key::new("a"));

    child.set_node(&Key::new("back"), &root);
}

#[test]
#[should_panic(expected = "contains the store of")]
fn list_containing_own_store_fails_fast() {
    let root = Node::detached();
    let child = root.child(Key::new("a"));
    child.set_number(&Key::new("x"), 1.0);

    child.set_nodes(&Key::new("items"), &[Node::detached(), child.clone()]);
}

#[test]
fn sharing_a_sibling_store_is_allowed() {
    let root = Node::detached();
    let left = root.child(Key::new("left"));
    left.set_number(&Key::new("x"), 1.0);

    root.child(Key::new("right")).set_node(&Key::new("copy"), &left);

    assert_eq!(
        root.to_json(),
        json!({ "left": { "x": 1 }, "right": { "copy": { "x": 1 } } })
    );
}

#[test]
fn remove_self_leaves_scalar_slots_alone() {
    let options = ChartOptions::detached();
    let line = options.plugins().annotation().annotation("l").expect("valid id");
    line.set_control_point_scalar(chart_options_tree::core::Dimension::Pixels(5.0));

    assert!(!line.control_point().node().remove_self());
    assert_eq!(line.node().to_json()["controlPoint"], json!(5));
}

#[test]
fn bulk_removal_and_presence_checks() {
    let font = ChartOptions::detached().font();
    let keys = [Key::new("size"), Key::new("family")];
    assert!(!font.node().has_all(&keys));

    font.set_size(10.0);
    assert!(!font.node().has_all(&keys));
    font.set_family("serif");
    assert!(font.node().has_all(&keys));
    assert!(!font.node().has_all(&[]));

    font.set_style(chart_options_tree::api::FontStyle::Italic);
    font.node().remove_all(&keys);
    assert_eq!(font.node().keys(), vec!["style".to_owned()]);
    assert!(font.node().is_materialized());
}

#[test]
fn cleared_listener_is_not_called() {
    let font = ChartOptions::detached().font();
    let calls = Rc::new(RefCell::new(0_usize));
    let counter = Rc::clone(&calls);
    font.node()
        .set_update_listener(move |_| *counter.borrow_mut() += 1);

    font.set_size(10.0);
    font.node().clear_update_listener();
    font.set_size(11.0);

    assert_eq!(*calls.borrow(), 1);
}
