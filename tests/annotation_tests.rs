use chart_options_tree::api::ChartOptions;
use chart_options_tree::core::{Dimension, ImageRef};
use chart_options_tree::extensions::{
    AnnotationPlugin, ControlPoint, LineAnnotation, LineLabel, TextAlign,
};
use serde_json::json;

fn plugin() -> (ChartOptions, AnnotationPlugin) {
    let options = ChartOptions::detached();
    let plugin = options.plugins().annotation();
    (options, plugin)
}

#[test]
fn first_write_tags_the_annotation_type() {
    let (options, plugin) = plugin();
    let line = plugin.annotation("max").expect("valid id");
    assert!(plugin.annotation_ids().is_empty());

    line.set_scale_id("y");
    line.set_value(42.0);

    assert_eq!(plugin.annotation_ids(), vec!["max".to_owned()]);
    assert_eq!(
        options.to_json(),
        json!({
            "plugins": { "annotation": { "annotations": {
                "max": { "scaleID": "y", "type": "line", "value": 42 }
            } } }
        })
    );
}

#[test]
fn annotation_ids_keep_insertion_order() {
    let (_options, plugin) = plugin();
    for id in ["zeta", "alpha", "mid"] {
        plugin.annotation(id).expect("valid id").set_x_min(1.0);
    }
    assert_eq!(
        plugin.annotation_ids(),
        vec!["zeta".to_owned(), "alpha".to_owned(), "mid".to_owned()]
    );

    assert!(plugin.remove_annotation("alpha").expect("valid id"));
    assert!(!plugin.remove_annotation("alpha").expect("valid id"));
    assert_eq!(
        plugin.annotation_ids(),
        vec!["zeta".to_owned(), "mid".to_owned()]
    );
}

#[test]
fn line_box_and_style_properties() {
    let (_options, plugin) = plugin();
    let line = plugin.annotation("box").expect("valid id");
    assert_eq!(line.border_width(), LineAnnotation::DEFAULT_BORDER_WIDTH);
    assert!(!line.curve());
    assert_eq!(line.x_min(), None);

    line.set_x_min(1.0);
    line.set_x_max(4.5);
    line.set_y_min(-2.0);
    line.set_y_max(8.0);
    line.set_end_value(3.0);
    line.set_border_color("rgb(255, 99, 132)");
    line.set_border_width(-1.0);
    line.set_curve(true);

    assert_eq!(line.x_min(), Some(1.0));
    assert_eq!(line.x_max(), Some(4.5));
    assert_eq!(line.y_min(), Some(-2.0));
    assert_eq!(line.y_max(), Some(8.0));
    assert_eq!(line.end_value(), Some(3.0));
    assert_eq!(line.border_color().as_deref(), Some("rgb(255, 99, 132)"));
    assert_eq!(line.border_width(), 0.0);
    assert!(line.curve());
    assert!(plugin.clip());
}

#[test]
fn control_point_object_form_uses_defaults() {
    let (_options, plugin) = plugin();
    let line = plugin.annotation("curve").expect("valid id");
    let point = line.control_point();

    assert_eq!(point.x(), Some(Dimension::Percentage(0.0)));
    assert_eq!(point.y(), Some(Dimension::Percentage(-0.5)));

    point.set_x(Dimension::Percentage(2.5));
    point.set_y(Dimension::Pixels(-30.0));
    assert_eq!(
        line.node().to_json()["controlPoint"],
        json!({ "x": "250%", "y": -30 })
    );
    assert_eq!(line.control_point_scalar(), None);
}

#[test]
fn control_point_percentages_outside_range_use_axis_defaults() {
    let point = ControlPoint::with_percentages(11.0, -12.0);
    assert_eq!(point.node().to_json(), json!({ "x": "0%", "y": "-50%" }));
}

#[test]
fn standalone_control_point_is_shared_after_assignment() {
    let (_options, plugin) = plugin();
    let line = plugin.annotation("shared").expect("valid id");
    let point = ControlPoint::with_pixels(12.0, None);

    line.set_control_point(&point);
    point.set_x(Dimension::Pixels(20.0));

    assert_eq!(line.control_point().x(), Some(Dimension::Pixels(20.0)));
    assert_eq!(line.control_point().y(), Some(Dimension::Percentage(-0.5)));
    assert_eq!(line.node().to_json()["type"], json!("line"));
}

#[test]
fn scalar_control_point_replaces_object_form() {
    let (_options, plugin) = plugin();
    let line = plugin.annotation("scalar").expect("valid id");
    line.control_point().set_x(Dimension::Pixels(5.0));

    line.set_control_point_scalar(Dimension::Percentage(-0.25));

    assert_eq!(
        line.control_point_scalar(),
        Some(Dimension::Percentage(-0.25))
    );
    assert!(!line.control_point().node().is_materialized());
}

#[test]
fn label_defaults_and_fonts() {
    let (options, plugin) = plugin();
    let label = plugin.annotation("lbl").expect("valid id").label();

    assert!(!label.display());
    assert_eq!(label.color().as_deref(), Some(LineLabel::DEFAULT_COLOR));
    assert_eq!(
        label.background_color().as_deref(),
        Some(LineLabel::DEFAULT_BACKGROUND_COLOR)
    );
    assert_eq!(label.text_align(), Some(TextAlign::Center));
    assert_eq!(label.content(), None);
    assert!(!options.node().is_materialized());

    label.set_display(true);
    label.set_text_align(TextAlign::Start);
    label.font().set_size(9.0);
    label.set_content_image(ImageRef::new("flag.png", 12, 8));

    assert!(label.display());
    assert_eq!(label.text_align(), Some(TextAlign::Start));
    assert_eq!(label.font().size(), 9.0);
    assert_eq!(
        label.node().to_json()["content"],
        json!({ "image": { "src": "flag.png", "width": 12, "height": 8 } })
    );

    label.remove_content();
    assert_eq!(label.content_as_image(), None);
}
