use super::*;

const DOC: &str = r##"{
  "className": "Stage",
  "attrs": { "width": 300, "height": 999, "fill": "#ffffff" },
  "children": [
    {
      "className": "Layer",
      "children": [
        { "className": "Image", "attrs": { "path": "bg.png", "x": 5, "y": 6, "scaleX": 2 } },
        { "className": "Text", "attrs": { "text": "hi", "fill": "red", "fontSize": 40 } }
      ]
    },
    { "className": "Text", "attrs": { "text": "plain" } }
  ]
}"##;

#[test]
fn parses_tree_with_defaults() {
    let t = Template::from_json(DOC).unwrap();
    assert_eq!(t.fill, Rgba8::WHITE);
    assert_eq!(t.canvas_side(2048).unwrap(), 300);

    let Node::Group(top) = &t.root else {
        panic!("root should be a group");
    };
    assert_eq!(top.len(), 2);
    let Node::Group(layer) = &top[0] else {
        panic!("layer should be a group");
    };
    assert_eq!(
        layer[0],
        Node::Image(ImageNode {
            path: "bg.png".to_string(),
            x: 5.0,
            y: 6.0,
            scale_x: 2.0,
            scale_y: 1.0,
        })
    );
    let Node::Text(hi) = &layer[1] else {
        panic!("expected text");
    };
    assert_eq!(hi.fill, Rgba8::new(255, 0, 0, 255));
    assert_eq!(hi.font_size, 40.0);

    let Node::Text(plain) = &top[1] else {
        panic!("expected text");
    };
    assert_eq!(plain.font_size, 24.0);
    assert_eq!(plain.fill, Rgba8::BLACK);
}

#[test]
fn root_fill_defaults_to_transparent() {
    let t = Template::from_json(r#"{"className":"Stage","attrs":{"width":10}}"#).unwrap();
    assert_eq!(t.fill, Rgba8::TRANSPARENT);
    assert_eq!(t.root, Node::Group(vec![]));
}

#[test]
fn canvas_side_is_bounded() {
    for w in ["0", "-5", "2049", "0.5"] {
        let t = Template::from_json(&format!(r#"{{"attrs":{{"width":{w}}}}}"#)).unwrap();
        assert!(
            matches!(t.canvas_side(2048), Err(KritiError::InvalidCanvasSize(_))),
            "{w}"
        );
    }
    let t = Template::from_json(r#"{"attrs":{"width":2048}}"#).unwrap();
    assert_eq!(t.canvas_side(2048).unwrap(), 2048);
}

#[test]
fn bad_json_and_bad_colors_fail() {
    assert!(matches!(
        Template::from_json("{not json"),
        Err(KritiError::InvalidTemplate(_))
    ));
    assert!(matches!(
        Template::from_json(r#"{"attrs":{"width":10,"fill":"nope"}}"#),
        Err(KritiError::UnsupportedColorFormat(_))
    ));
}

#[test]
fn walk_is_depth_first_parents_first() {
    let t = Template::from_json(DOC).unwrap();
    let mut kinds = Vec::new();
    t.root
        .walk(&mut |n: &Node| -> Result<(), ()> {
            kinds.push(match n {
                Node::Group(_) => "group",
                Node::Image(_) => "image",
                Node::Text(_) => "text",
            });
            Ok(())
        })
        .unwrap();
    assert_eq!(kinds, ["group", "group", "image", "text", "text"]);
}
