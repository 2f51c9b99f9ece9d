use std::collections::HashSet;

use chart_options_tree::api::{ChartOptions, Elements, Font, Plugins, PointElement, Title};
use chart_options_tree::core::{Key, LineHeight, Node};
use chart_options_tree::extensions::{AnnotationPlugin, ControlPoint, LineAnnotation, LineLabel};
use chrono::{TimeZone, Utc};
use serde_json::json;

fn assert_unique(table: &[Key]) {
    let names: HashSet<&str> = table.iter().map(Key::name).collect();
    assert_eq!(names.len(), table.len(), "duplicate key in {table:?}");
}

#[test]
fn key_tables_are_unique() {
    for table in [
        ChartOptions::KEYS,
        Font::KEYS,
        Title::KEYS,
        Elements::KEYS,
        PointElement::KEYS,
        Plugins::KEYS,
        AnnotationPlugin::KEYS,
        LineAnnotation::KEYS,
        ControlPoint::KEYS,
        LineLabel::KEYS,
    ] {
        assert_unique(table);
    }
}

#[test]
fn key_names_match_the_rendering_schema() {
    assert_eq!(PointElement::BACKGROUND_COLOR.name(), "backgroundColor");
    assert_eq!(PointElement::BORDER_WIDTH.name(), "borderWidth");
    assert_eq!(LineAnnotation::X_MIN.name(), "xMin");
    assert_eq!(LineAnnotation::SCALE_ID.name(), "scaleID");
    assert_eq!(LineAnnotation::CONTROL_POINT.name(), "controlPoint");
    assert_eq!(Font::LINE_HEIGHT.name(), "lineHeight");
    assert_eq!(ChartOptions::ASPECT_RATIO.name(), "aspectRatio");
}

#[test]
fn serialized_keys_keep_write_order() {
    let options = ChartOptions::detached();
    options.set_responsive(false);
    options.font().set_size(14.0);
    options.set_aspect_ratio(1.5);
    options.font().set_family("serif");
    options.set_responsive(true);

    let text = serde_json::to_string(&options.to_json()).expect("serialize");
    assert_eq!(
        text,
        r#"{"responsive":true,"font":{"size":14,"family":"serif"},"aspectRatio":1.5}"#
    );
}

#[test]
fn removal_keeps_order_of_remaining_keys() {
    let node = Node::from_json_str(
        r#"{"c": 1, "a": 2, "b": 3}"#,
        std::rc::Rc::new(chart_options_tree::core::NoDefaults),
    )
    .expect("json");
    node.remove(&Key::new("a"));
    node.set_number(&Key::new("d"), 4.0);

    let text = serde_json::to_string(&node.to_json()).expect("serialize");
    assert_eq!(text, r#"{"c":1,"b":3,"d":4}"#);
}

#[test]
fn list_values_keep_declaration_order() {
    let options = ChartOptions::detached();
    options.title().set_text(&["second", "first", "third"]);
    options.node().set_numbers(&Key::new("stops"), &[0.75, 0.0, 0.25]);

    assert_eq!(
        options.to_json(),
        json!({
            "plugins": { "title": { "text": ["second", "first", "third"] } },
            "stops": [0.75, 0, 0.25]
        })
    );
    assert_eq!(
        options.title().text(),
        vec!["second".to_owned(), "first".to_owned(), "third".to_owned()]
    );
}

#[test]
fn single_value_lists_are_stored_as_scalars() {
    let options = ChartOptions::detached();
    options.title().set_text(&["Revenue"]);
    options.node().set_numbers(&Key::new("stops"), &[0.5]);

    assert_eq!(
        options.to_json(),
        json!({ "plugins": { "title": { "text": "Revenue" } }, "stops": 0.5 })
    );
    assert_eq!(options.title().text(), vec!["Revenue".to_owned()]);
}

#[test]
fn scalar_encodings() {
    let node = Node::detached();
    let when = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid date");
    node.set_date(&Key::new("min"), when);
    node.set_number(&Key::new("nan"), f64::NAN);
    node.set_integer(&Key::new("count"), 3);
    node.set_token(&Key::new("weight"), chart_options_tree::api::FontWeight::Bolder);

    assert_eq!(
        node.to_json(),
        json!({ "min": 1_704_164_645_000_i64, "nan": null, "count": 3, "weight": "bolder" })
    );
    assert_eq!(node.get::<chrono::DateTime<Utc>>(&Key::new("min")), Some(when));
}

#[test]
fn font_css_shorthand() {
    let font = ChartOptions::detached().font();
    assert_eq!(
        font.to_css(),
        format!("12px/1.2 {}", Font::DEFAULT_FAMILY)
    );

    font.set_style(chart_options_tree::api::FontStyle::Italic);
    font.set_weight(chart_options_tree::api::FontWeight::Bold);
    font.set_size(14.0);
    font.set_line_height(LineHeight::Css("20px".to_owned()));
    font.set_family("serif");
    assert_eq!(font.to_css(), "italic bold 14px/20px serif");
}

#[test]
fn disabled_plugins_store_false() {
    let options = ChartOptions::detached();
    assert!(options.plugins().is_enabled("legend"));

    options.plugins().disable("legend").expect("valid id");

    assert!(!options.plugins().is_enabled("legend"));
    assert_eq!(options.to_json(), json!({ "plugins": { "legend": false } }));
    assert!(options.plugins().disable(" ").is_err());
}

#[test]
fn invalid_aspect_ratio_stores_default() {
    let options = ChartOptions::detached();
    options.set_aspect_ratio(-1.0);
    assert_eq!(options.to_json(), json!({ "aspectRatio": 2 }));

    options.set_locale(Some("de-DE"));
    assert_eq!(options.locale().as_deref(), Some("de-DE"));
    options.set_locale(None);
    assert_eq!(options.locale().as_deref(), Some(ChartOptions::DEFAULT_LOCALE));
}
