//! SVG export of a circuit.
//!
//! Renders wires, symbol bodies, node dots, voltage arcs, and text marks
//! into a standalone SVG document string. Diagram coordinates are y-up;
//! SVG is y-down, so every emitted y is negated rather than wrapping the
//! document in a flipping transform (which would mirror the text).

use std::fmt::Write as _;

use schemkit_core::{Point, Result, Vec3};
use schemkit_layout::ArcGeometry;

use crate::circuit::Circuit;
use crate::component::Component;
use crate::mark::{Mark, MarkAlignment};

/// Padding around the circuit bounds in the viewBox.
const VIEW_PADDING: f64 = 0.5;

/// Scale from diagram units to SVG user units.
const UNIT_SCALE: f64 = 100.0;

struct SvgWriter {
    out: String,
}

impl SvgWriter {
    fn xy(&self, p: Point) -> (f64, f64) {
        (p.x * UNIT_SCALE, -p.y * UNIT_SCALE)
    }
}

/// Render the circuit as a complete SVG document.
pub fn render_svg(circuit: &Circuit) -> Result<String> {
    let config = circuit.config();
    let bounds = circuit.bounds().expanded(VIEW_PADDING);
    let mut writer = SvgWriter { out: String::new() };

    let (min_x, max_y_flipped) = writer.xy(bounds.min);
    let width = bounds.width() * UNIT_SCALE;
    let height = bounds.height() * UNIT_SCALE;
    let min_y = max_y_flipped - height;
    writeln!(
        writer.out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}">"#,
        min_x, min_y, width, height
    )
    .ok();

    for wire in circuit.wires() {
        let from = circuit.terminal(wire.from_terminal())?;
        let to = circuit.terminal(wire.to_terminal())?;
        let points = wire.points(from, to);
        write_polyline(&mut writer, &points, config.wire_stroke_width);
    }

    for component in circuit.components() {
        write_component(&mut writer, component, config.component_stroke_width, config.wire_stroke_width);
    }

    for voltage in circuit.voltages() {
        let arc = circuit.voltage_arc(voltage.id())?;
        write_arc(&mut writer, &arc, config.wire_stroke_width);
        let anchor = arc.bow()?;
        write_text(
            &mut writer,
            anchor,
            &voltage.label,
            MarkAlignment::Middle,
            config.mark_font_size,
        );
    }

    for component in circuit.components() {
        write_marks(&mut writer, component, config);
    }

    writer.out.push_str("</svg>\n");
    Ok(writer.out)
}

fn write_polyline(writer: &mut SvgWriter, points: &[Point], stroke_width: f64) {
    if points.len() < 2 {
        return;
    }
    let mut attr = String::new();
    for p in points {
        let (x, y) = writer.xy(*p);
        let _ = write!(attr, "{:.2},{:.2} ", x, y);
    }
    let _ = writeln!(
        writer.out,
        r#"  <polyline points="{}" fill="none" stroke="black" stroke-width="{:.2}"/>"#,
        attr.trim_end(),
        stroke_width
    );
}

fn write_component(
    writer: &mut SvgWriter,
    component: &Component,
    body_stroke: f64,
    wire_stroke: f64,
) {
    // Terminal stems draw at the wire weight, like the wires they meet.
    for terminal in component.terminals() {
        write_polyline(writer, &[terminal.position(), terminal.end()], wire_stroke);
    }

    for path in &component.body().strokes {
        let data = path_data(writer, path, component);
        if !data.is_empty() {
            let _ = writeln!(
                writer.out,
                r#"  <path d="{}" fill="none" stroke="black" stroke-width="{:.2}"/>"#,
                data.trim_end(),
                body_stroke
            );
        }
    }

    for dot in &component.body().dots {
        // Node dots obey the blob visibility flag; fixed symbol dots
        // (switch contacts) always draw.
        if component.symbol().has_dynamic_terminals() && !component.blob_visible() {
            continue;
        }
        let (cx, cy) = writer.xy(component.to_world(dot.center));
        let fill = if dot.filled { "black" } else { "white" };
        let _ = writeln!(
            writer.out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="black" stroke-width="{:.2}"/>"#,
            cx,
            cy,
            dot.radius * UNIT_SCALE,
            fill,
            wire_stroke
        );
    }
}

/// Flatten a body path into SVG path data, mapping every point through the
/// component's placement and the y-flip.
fn path_data(writer: &SvgWriter, path: &lyon::path::Path, component: &Component) -> String {
    let world = |p: lyon::math::Point| -> (f64, f64) {
        writer.xy(component.to_world(Vec3::xy(p.x as f64, p.y as f64)))
    };
    let mut d = String::new();
    for event in path.iter() {
        match event {
            lyon::path::Event::Begin { at } => {
                let (x, y) = world(at);
                let _ = write!(d, "M {:.2} {:.2} ", x, y);
            }
            lyon::path::Event::Line { from: _, to } => {
                let (x, y) = world(to);
                let _ = write!(d, "L {:.2} {:.2} ", x, y);
            }
            lyon::path::Event::Quadratic { from: _, ctrl, to } => {
                let (cx, cy) = world(ctrl);
                let (x, y) = world(to);
                let _ = write!(d, "Q {:.2} {:.2} {:.2} {:.2} ", cx, cy, x, y);
            }
            lyon::path::Event::Cubic {
                from: _,
                ctrl1,
                ctrl2,
                to,
            } => {
                let (c1x, c1y) = world(ctrl1);
                let (c2x, c2y) = world(ctrl2);
                let (x, y) = world(to);
                let _ = write!(
                    d,
                    "C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2} ",
                    c1x, c1y, c2x, c2y, x, y
                );
            }
            lyon::path::Event::End {
                last: _,
                first: _,
                close,
            } => {
                if close {
                    d.push_str("Z ");
                }
            }
        }
    }
    d
}

fn write_arc(writer: &mut SvgWriter, arc: &ArcGeometry, stroke_width: f64) {
    let radius = arc.radius() * UNIT_SCALE;
    let (sx, sy) = writer.xy(arc.start);
    let (ex, ey) = writer.xy(arc.end);
    let large_arc = i32::from(arc.angle.abs() > std::f64::consts::PI);
    // Anticlockwise in diagram space turns clockwise once y flips.
    let sweep = i32::from(arc.angle < 0.0);
    let _ = writeln!(
        writer.out,
        r#"  <path d="M {:.2} {:.2} A {:.2} {:.2} 0 {} {} {:.2} {:.2}" fill="none" stroke="black" stroke-width="{:.2}"/>"#,
        sx,
        sy,
        radius,
        radius,
        large_arc,
        sweep,
        ex,
        ey,
        stroke_width
    );
}

fn write_marks(writer: &mut SvgWriter, component: &Component, config: &schemkit_core::SymbolConfig) {
    let anchors = component.anchors();
    let margin = config.cardinal_alignment_margin;
    let font_size = config.mark_font_size;
    let mut write_mark = |mark: &Mark| {
        let position = mark.position(anchors);
        write_text(
            writer,
            position,
            &mark.text,
            mark.alignment(anchors, margin),
            font_size,
        );
    };
    if let Some(label) = component.label() {
        write_mark(label);
    }
    if let Some(annotation) = component.annotation() {
        write_mark(annotation);
    }

    for (terminal_id, current) in component.currents() {
        let Some(terminal) = component.terminal(*terminal_id) else {
            continue;
        };
        write_current_arrow(
            writer,
            terminal.tap_point(),
            current.arrow_direction(terminal.direction()),
            config.current_arrow_radius,
        );
        let offset = current.label_offset(terminal.direction(), terminal.length() * 0.5);
        write_text(
            writer,
            terminal.tap_point() + offset,
            &current.text,
            MarkAlignment::Middle,
            font_size,
        );
    }
}

/// A filled triangle on the terminal stem, pointing along `direction`.
fn write_current_arrow(writer: &mut SvgWriter, centre: Point, direction: Vec3, radius: f64) {
    let side = direction.cross_out();
    let tip = centre + direction * radius;
    let back = centre - direction * (radius * 0.5);
    let (tx, ty) = writer.xy(tip);
    let (ax, ay) = writer.xy(back + side * (radius * 0.75));
    let (bx, by) = writer.xy(back - side * (radius * 0.75));
    let _ = writeln!(
        writer.out,
        r#"  <path d="M {tx:.2} {ty:.2} L {ax:.2} {ay:.2} L {bx:.2} {by:.2} Z" fill="black"/>"#,
    );
}

fn write_text(
    writer: &mut SvgWriter,
    position: Point,
    text: &str,
    alignment: MarkAlignment,
    font_size: f64,
) {
    let (x, y) = writer.xy(position);
    let anchor = match alignment {
        MarkAlignment::Start => "start",
        MarkAlignment::Middle => "middle",
        MarkAlignment::End => "end",
    };
    let _ = writeln!(
        writer.out,
        r#"  <text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="{}">{}</text>"#,
        x,
        y,
        font_size,
        anchor,
        escape(text)
    );
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use schemkit_core::{SymbolConfig, Vec3};
    use schemkit_symbols::Symbol;

    use crate::component::Component;
    use crate::voltage::Voltage;

    use super::*;

    fn two_resistor_circuit() -> Circuit {
        let config = SymbolConfig::default();
        let mut circuit = Circuit::new(config.clone());
        let mut r1 = Component::new(Symbol::Resistor, &config).unwrap();
        r1.set_position(Vec3::xy(-2.0, 0.0)).unwrap();
        r1.set_label("R_1");
        let mut r2 = Component::new(Symbol::Resistor, &config).unwrap();
        r2.set_position(Vec3::xy(2.0, 0.0)).unwrap();
        let a = circuit.add(r1);
        let b = circuit.add(r2);
        let from = *circuit.component(a).unwrap().right().unwrap();
        let to = *circuit.component(b).unwrap().left().unwrap();
        circuit.connect(&from, &to).unwrap();
        circuit
    }

    #[test]
    fn test_document_structure() {
        let svg = render_svg(&two_resistor_circuit()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("<path"));
        assert!(svg.contains(">R_1</text>"));
    }

    #[test]
    fn test_voltage_renders_an_arc_command() {
        let mut circuit = two_resistor_circuit();
        let component = circuit.components().next().unwrap();
        let id = component.id();
        let from = component.left().unwrap().id();
        let to = component.right().unwrap().id();
        circuit.add_voltage(Voltage::new(from, to, "V").avoiding(id));

        let svg = render_svg(&circuit).unwrap();
        assert!(svg.contains(" A "), "no arc command in {svg}");
        assert!(svg.contains(">V</text>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let config = SymbolConfig::default();
        let mut circuit = Circuit::new(config.clone());
        let mut r = Component::new(Symbol::Resistor, &config).unwrap();
        r.set_label("a<b");
        circuit.add(r);
        let svg = render_svg(&circuit).unwrap();
        assert!(svg.contains("a&lt;b"));
    }
}
