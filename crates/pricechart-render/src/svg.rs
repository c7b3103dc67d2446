//! SVG backend.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use pricechart_layout::{Anchor, Rect, ScreenPos};

use crate::color::Color;
use crate::error::RenderError;
use crate::surface::{DrawSurface, TextStyle};
use crate::{FONT_FAMILY, PANEL_GAP};

/// Writes panels one below the other into a single SVG document.
#[derive(Debug, Default)]
pub struct SvgSurface {
    body: String,
    width: f64,
    /// Top of the next panel.
    cursor: f64,
    panels: usize,
    open: bool,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel_count(&self) -> usize {
        self.panels
    }

    /// Document size, in pixels.
    pub fn size(&self) -> (f64, f64) {
        let height = if self.panels == 0 {
            0.0
        } else {
            self.cursor - PANEL_GAP
        };
        (self.width, height)
    }

    /// The complete SVG document.
    pub fn to_svg(&self) -> String {
        let (width, height) = self.size();
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(width),
            h = num(height)
        );
        out.push_str(&self.body);
        if self.open {
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        out
    }

    /// Write the document to `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        fs::write(path, self.to_svg())?;
        log::info!("Wrote chart to {}", path.display());
        Ok(())
    }

    fn close_group(&mut self) {
        if self.open {
            self.body.push_str("</g>\n");
            self.open = false;
        }
    }
}

impl DrawSurface for SvgSurface {
    fn begin_panel(&mut self, width: f64, height: f64, background: Color) {
        self.close_group();
        let top = self.cursor;
        let _ = writeln!(
            self.body,
            r#"<g transform="translate(0,{})">"#,
            num(top)
        );
        let _ = writeln!(
            self.body,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{background}"/>"#,
            num(width),
            num(height)
        );
        self.open = true;
        self.width = self.width.max(width);
        self.cursor = top + height + PANEL_GAP;
        self.panels += 1;
    }

    fn end_panel(&mut self) {
        self.close_group();
    }

    fn fill_rect(&mut self, rect: Rect, fill: Color, outline: Option<Color>) {
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height)
        );
        if let Some(outline) = outline {
            let _ = write!(self.body, r#" stroke="{outline}" stroke-width="1""#);
        }
        self.body.push_str("/>\n");
    }

    fn line(&mut self, from: ScreenPos, to: ScreenPos, color: Color, width: f64) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{color}" stroke-width="{}"/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            num(width)
        );
    }

    fn text(&mut self, pos: ScreenPos, text: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" fill="{}" text-anchor="{anchor}" dominant-baseline="middle""#,
            num(pos.x),
            num(pos.y),
            num(f64::from(style.font_size)),
            style.color
        );
        if style.bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        if style.angle != 0.0 {
            // SVG rotates clockwise.
            let _ = write!(
                self.body,
                r#" transform="rotate({} {} {})""#,
                num(-style.angle),
                num(pos.x),
                num(pos.y)
            );
        }
        let _ = writeln!(self.body, ">{}</text>", escape(text));
    }
}

/// Coordinates rounded to hundredths, without trailing zeros.
fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num() {
        assert_eq!(num(80.0), "80");
        assert_eq!(num(145.125), "145.13");
        assert_eq!(num(-45.0), "-45");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("S&P <500>"), "S&amp;P &lt;500&gt;");
    }

    #[test]
    fn test_empty_document() {
        let svg = SvgSurface::new().to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="0" height="0""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_panels_stack_vertically() {
        let mut surface = SvgSurface::new();
        surface.begin_panel(1150.0, 500.0, Color::WHITE);
        surface.end_panel();
        surface.begin_panel(1150.0, 150.0, Color::WHITE);
        surface.end_panel();

        assert_eq!(surface.panel_count(), 2);
        assert_eq!(surface.size(), (1150.0, 660.0));

        let svg = surface.to_svg();
        assert!(svg.contains(r#"<g transform="translate(0,0)">"#));
        assert!(svg.contains(r#"<g transform="translate(0,510)">"#));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }

    #[test]
    fn test_unclosed_panel_is_closed_on_output() {
        let mut surface = SvgSurface::new();
        surface.begin_panel(100.0, 50.0, Color::WHITE);
        surface.fill_rect(Rect::new(1.0, 2.0, 3.0, 4.0), Color::BLACK, None);
        let svg = surface.to_svg();
        assert!(svg.contains(r##"<rect x="1" y="2" width="3" height="4" fill="#000000"/>"##));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }

    #[test]
    fn test_rotated_bold_text() {
        let mut surface = SvgSurface::new();
        surface.begin_panel(100.0, 50.0, Color::WHITE);
        let style = TextStyle {
            bold: true,
            angle: 45.0,
            anchor: Anchor::End,
            ..TextStyle::new(8.0, Color::BLACK)
        };
        surface.text(ScreenPos::new(10.0, 20.0), "09:30", &style);
        let svg = surface.to_svg();
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(r#"transform="rotate(-45 10 20)">09:30</text>"#));
    }
}
