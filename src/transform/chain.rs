use image::RgbaImage;

use crate::{
    foundation::error::KritiResult,
    parse::{
        options::{OperationKind, ParsedOptions},
        value::{parse_border_radius, parse_float_or, parse_rotate_angle},
    },
    raster::blur::gaussian_blur,
    transform::{
        adjust,
        border_radius::{CornerRadii, apply_border_radius},
        fit::{Fit, FitMode},
        geometry::{self, Flip},
    },
};

/// One interpreted pixel operation, ready to run.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Fit(Fit),
    Flip(Flip),
    /// Clockwise degrees.
    Rotate(f32),
    Brightness(f32),
    Contrast(f32),
    Gamma(f32),
    Saturation(f32),
    /// Gaussian sigma.
    Blur(f32),
    Sharpen(f32),
    BorderRadius(CornerRadii),
}

impl Filter {
    /// Output size when applied to a `width` x `height` input.
    pub fn bounds(&self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Fit(fit) => fit.bounds(width, height),
            Self::Rotate(deg) => geometry::rotated_bounds(width, height, *deg),
            Self::Flip(_)
            | Self::Brightness(_)
            | Self::Contrast(_)
            | Self::Gamma(_)
            | Self::Saturation(_)
            | Self::Blur(_)
            | Self::Sharpen(_)
            | Self::BorderRadius(_) => (width, height),
        }
    }

    pub fn apply(&self, img: &RgbaImage) -> KritiResult<RgbaImage> {
        Ok(match self {
            Self::Fit(fit) => fit.apply(img),
            Self::Flip(flip) => flip.apply(img),
            Self::Rotate(deg) => geometry::rotate(img, *deg),
            Self::Brightness(pct) => adjust::brightness(img, *pct),
            Self::Contrast(pct) => adjust::contrast(img, *pct),
            Self::Gamma(g) => adjust::gamma(img, *g),
            Self::Saturation(pct) => adjust::saturation(img, *pct),
            Self::Blur(sigma) => gaussian_blur(img, *sigma)?,
            Self::Sharpen(amount) => adjust::sharpen(img, *amount)?,
            Self::BorderRadius(radii) => apply_border_radius(img, radii),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fit(_) => "fit",
            Self::Flip(_) => "flip",
            Self::Rotate(_) => "rotate",
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
            Self::Gamma(_) => "gamma",
            Self::Saturation(_) => "saturation",
            Self::Blur(_) => "blur",
            Self::Sharpen(_) => "sharpen",
            Self::BorderRadius(_) => "radius",
        }
    }
}

/// Interpret parsed options into an ordered filter chain.
///
/// Explicit `width`/`height` without a `fit` token resize with `crop`. Filters come out in
/// canonical [`OperationKind`] order regardless of their order in the request.
pub fn build_chain(options: &ParsedOptions) -> KritiResult<Vec<Filter>> {
    let mut chain = Vec::with_capacity(options.operations.len() + 1);

    if options.has_dimensions() && !options.operations.contains(OperationKind::Fit) {
        chain.push(Filter::Fit(Fit::new(
            FitMode::Crop,
            options.width,
            options.height,
            options.background,
        )?));
    }

    for op in options.operations.iter() {
        let arg = op.arg.as_str();
        let filter = match op.kind {
            OperationKind::Fit => Filter::Fit(Fit::new(
                FitMode::parse(arg)?,
                options.width,
                options.height,
                options.background,
            )?),
            OperationKind::Flip => match Flip::parse(arg) {
                Some(flip) => Filter::Flip(flip),
                None => {
                    tracing::debug!(value = arg, "ignoring unknown flip value");
                    continue;
                }
            },
            OperationKind::Rotate => Filter::Rotate(parse_rotate_angle(arg)?.degrees),
            OperationKind::Brightness => {
                Filter::Brightness(parse_float_or(arg, -100.0, 100.0, 0.0))
            }
            OperationKind::Contrast => Filter::Contrast(parse_float_or(arg, -100.0, 100.0, 0.0)),
            OperationKind::Gamma => Filter::Gamma(parse_float_or(arg, 0.0, 2.0, 1.0)),
            OperationKind::Saturation => {
                Filter::Saturation(parse_float_or(arg, -100.0, 500.0, 0.0))
            }
            OperationKind::Blur => Filter::Blur(parse_float_or(arg, 1.0, 250.0, 1.0)),
            OperationKind::Sharpen => Filter::Sharpen(parse_float_or(arg, 0.5, 1.5, 0.5)),
            OperationKind::BorderRadius => {
                Filter::BorderRadius(CornerRadii::uniform(parse_border_radius(arg)?))
            }
        };
        chain.push(filter);
    }

    tracing::debug!(
        filters = ?chain.iter().map(Filter::name).collect::<Vec<_>>(),
        "built filter chain"
    );
    Ok(chain)
}

/// Fold the chain over the source size to get the final raster size.
pub fn chain_bounds(chain: &[Filter], width: u32, height: u32) -> (u32, u32) {
    chain
        .iter()
        .fold((width, height), |(w, h), f| f.bounds(w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/chain.rs"]
mod tests;
