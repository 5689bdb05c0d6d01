//! SVG output for paths and frames, used for previews

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{
    Circle as SvgCircle, Ellipse as SvgEllipse, Path as SvgPath, PathData, Svg, SvgNode, SvgStyle, facet_xml,
};
use glam::DVec2;

use super::geometry::Outline;
use super::path_builder::{Path, PathCommand, rect_path};
use super::types::{Frame, Paint};
use crate::types::{Color, Size};

/// Placeholder fill for the image area; the preview carries no pixels.
const IMAGE_PLACEHOLDER: Color = Color::rgb(0xCC, 0xCC, 0xCC);
/// Stroke for the frame of the placed image.
const IMAGE_FRAME: Color = Color::rgb(0x66, 0x66, 0x66);

impl Path {
    /// SVG path data for this outline.
    pub fn to_path_data(&self) -> PathData {
        path_data(self, DVec2::ZERO)
    }
}

fn path_data(path: &Path, offset: DVec2) -> PathData {
    path.commands().iter().fold(PathData::new(), |data, command| match *command {
        PathCommand::MoveTo(p) => {
            let p = p + offset;
            data.m(p.x, p.y)
        }
        PathCommand::LineTo(p) => {
            let p = p + offset;
            data.l(p.x, p.y)
        }
        PathCommand::QuadTo { ctrl, to } => {
            let (ctrl, to) = (ctrl + offset, to + offset);
            data.q(ctrl.x, ctrl.y, to.x, to.y)
        }
        PathCommand::Close => data.z(),
    })
}

/// Format with 6 significant figures and trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    const SIG_FIGS: i32 = 6;

    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(SIG_FIGS - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (SIG_FIGS - 1 - magnitude).max(0) as usize;
    let s = format!("{rounded:.decimals$}");
    let s = if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { &s };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

impl Frame {
    /// The SVG DOM drawing every layer of this frame.
    ///
    /// Shadows are drawn offset but not blurred. The image layer is the
    /// outline filled with a grey placeholder, followed by a dashed frame
    /// around where the image lands under its fit matrix.
    pub fn to_svg_document(&self, size: Size<f64>) -> Svg {
        let mut children: Vec<SvgNode> = Vec::new();

        for layer in &self.layers {
            match layer.paint {
                Paint::Shadow { color, offset, .. } => {
                    children.push(outline_node(&layer.outline, offset, fill_style(color)));
                }
                Paint::Fill(color) => {
                    children.push(outline_node(&layer.outline, DVec2::ZERO, fill_style(color)));
                }
                Paint::Image { matrix, image_size } => {
                    children.push(outline_node(&layer.outline, DVec2::ZERO, fill_style(IMAGE_PLACEHOLDER)));

                    let placed = matrix.map_rect(image_size);
                    let frame_style = SvgStyle::new()
                        .add("fill", "none")
                        .add("stroke", &IMAGE_FRAME.to_string())
                        .add("stroke-dasharray", "4,4");
                    children.push(path_node(rect_path(placed).to_path_data(), frame_style));
                }
            }
        }

        crate::log::debug!(layers = self.layers.len(), nodes = children.len(), "svg document");

        Svg {
            width: Some(fmt_num(size.w)),
            height: Some(fmt_num(size.h)),
            view_box: Some(format!("0 0 {} {}", fmt_num(size.w), fmt_num(size.h))),
            children,
        }
    }

    /// A standalone SVG document for this frame, serialized with `facet_xml`.
    pub fn to_svg(&self, size: Size<f64>) -> Result<String, miette::Report> {
        fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
            write!(writer, "{}", fmt_num(value))
        }

        let options = SerializeOptions {
            float_formatter: Some(format_float),
            preserve_entities: true,
            ..Default::default()
        };
        facet_xml::to_string_with_options(&self.to_svg_document(size), &options)
            .map_err(|e| miette::miette!("XML serialization error: {}", e))
    }
}

fn fill_style(color: Color) -> SvgStyle {
    SvgStyle::new().add("fill", &color.to_string())
}

fn path_node(d: PathData, style: SvgStyle) -> SvgNode {
    SvgNode::Path(SvgPath {
        d: Some(d),
        fill: None,
        stroke: None,
        stroke_width: None,
        stroke_dasharray: None,
        style,
    })
}

/// One SVG element for an outline, shifted by `offset`.
fn outline_node(outline: &Outline, offset: DVec2, style: SvgStyle) -> SvgNode {
    match outline {
        Outline::Rect(r) => path_node(path_data(&rect_path(*r), offset), style),
        Outline::Circle { center, radius } => {
            let center = *center + offset;
            SvgNode::Circle(SvgCircle {
                cx: Some(center.x),
                cy: Some(center.y),
                r: Some(*radius),
                fill: None,
                stroke: None,
                stroke_width: None,
                stroke_dasharray: None,
                style,
            })
        }
        Outline::Oval(r) => SvgNode::Ellipse(SvgEllipse {
            cx: Some(r.center_x() + offset.x),
            cy: Some(r.center_y() + offset.y),
            rx: Some(r.width() / 2.0),
            ry: Some(r.height() / 2.0),
            fill: None,
            stroke: None,
            stroke_width: None,
            stroke_dasharray: None,
            style,
        }),
        Outline::Path(p) => path_node(path_data(p, offset), style),
    }
}
