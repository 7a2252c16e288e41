use serde::Deserialize;

use crate::{
    foundation::{
        core::Rgba8,
        error::{KritiError, KritiResult},
    },
    parse::color::parse_color,
};

const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Node as it appears in template JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeDef {
    #[serde(default)]
    class_name: String,
    #[serde(default)]
    attrs: AttrsDef,
    #[serde(default)]
    children: Vec<NodeDef>,
}

/// Attribute superset shared by every node kind; each kind reads only its own fields.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AttrsDef {
    width: f64,
    x: f64,
    y: f64,
    scale_x: f64,
    scale_y: f64,
    font_size: f64,
    text: String,
    fill: String,
    path: String,
}

impl AttrsDef {
    fn scale(&self) -> (f64, f64) {
        let or_one = |v: f64| if v == 0.0 { 1.0 } else { v };
        (or_one(self.scale_x), or_one(self.scale_y))
    }

    fn fill_or(&self, default: Rgba8) -> KritiResult<Rgba8> {
        if self.fill.trim().is_empty() {
            Ok(default)
        } else {
            parse_color(&self.fill)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageNode {
    pub path: String,
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub fill: Rgba8,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// A drawing instruction in the template tree.
///
/// Any class name other than `Image` and `Text` becomes a [`Node::Group`], which draws
/// nothing itself and only visits its children.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Group(Vec<Node>),
    Image(ImageNode),
    Text(TextNode),
}

impl Node {
    fn from_def(def: NodeDef) -> KritiResult<Self> {
        let (scale_x, scale_y) = def.attrs.scale();
        Ok(match def.class_name.as_str() {
            "Image" => Node::Image(ImageNode {
                path: def.attrs.path,
                x: def.attrs.x,
                y: def.attrs.y,
                scale_x,
                scale_y,
            }),
            "Text" => {
                let fill = def.attrs.fill_or(Rgba8::BLACK)?;
                let font_size = if def.attrs.font_size == 0.0 {
                    DEFAULT_FONT_SIZE
                } else {
                    def.attrs.font_size
                };
                Node::Text(TextNode {
                    text: def.attrs.text,
                    x: def.attrs.x,
                    y: def.attrs.y,
                    font_size,
                    fill,
                    scale_x,
                    scale_y,
                })
            }
            _ => Node::Group(
                def.children
                    .into_iter()
                    .map(Node::from_def)
                    .collect::<KritiResult<_>>()?,
            ),
        })
    }

    /// Visit this node and its descendants depth-first, parents before children.
    pub fn walk<E>(&self, f: &mut impl FnMut(&Node) -> Result<(), E>) -> Result<(), E> {
        f(self)?;
        if let Node::Group(children) = self {
            for child in children {
                child.walk(f)?;
            }
        }
        Ok(())
    }
}

/// A parsed template: canvas settings from the root plus the drawing tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    /// Raw root `width`; the canvas is square with this side.
    pub width: f64,
    pub fill: Rgba8,
    pub root: Node,
}

impl Template {
    /// Parse already-substituted template JSON.
    pub fn from_json(json: &str) -> KritiResult<Self> {
        let def: NodeDef = serde_json::from_str(json)
            .map_err(|e| KritiError::InvalidTemplate(format!("parse template json: {e}")))?;
        let width = def.attrs.width;
        let fill = def.attrs.fill_or(Rgba8::TRANSPARENT)?;
        Ok(Self {
            width,
            fill,
            root: Node::from_def(def)?,
        })
    }

    /// Side of the square canvas, validated against `(0, max]`.
    pub fn canvas_side(&self, max: u32) -> KritiResult<u32> {
        let w = self.width.trunc();
        if !(1.0..=f64::from(max)).contains(&w) {
            return Err(KritiError::InvalidCanvasSize(format!(
                "{}x{} (must be within 1..={max})",
                self.width, self.width
            )));
        }
        Ok(w as u32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/node.rs"]
mod tests;
