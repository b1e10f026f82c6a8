//! Drawing primitives and the SVG canvas that records them.
//!
//! Track renderers only ever talk to [`DrawingSurface`]; [`SvgCanvas`] keeps
//! the primitives in draw order so later ones paint over earlier ones, and
//! serializes them through its `Display` impl.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: &'static str,
    pub opacity: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: &'static str,
    pub width: f64,
    pub opacity: f64,
    pub dasharray: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub size: f64,
    pub anchor: Anchor,
    pub fill: &'static str,
    pub bold: bool,
    pub underline: bool,
    /// Baseline shift applied after positioning.
    pub dy: f64,
}

impl Text {
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            size: 8.0,
            anchor: Anchor::Start,
            fill: "black",
            bold: false,
            underline: false,
            dy: 0.0,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn fill(mut self, fill: &'static str) -> Self {
        self.fill = fill;
        self
    }

    pub fn dy(mut self, dy: f64) -> Self {
        self.dy = dy;
        self
    }

    pub fn emphasized(mut self) -> Self {
        self.bold = true;
        self.underline = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(Rect),
    Line(Line),
    Text(Text),
}

pub trait DrawingSurface {
    fn rect(&mut self, rect: Rect);
    fn line(&mut self, line: Line);
    fn text(&mut self, text: Text);
}

/// Fixed-size canvas that serializes to a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    primitives: Vec<Primitive>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl DrawingSurface for SvgCanvas {
    fn rect(&mut self, rect: Rect) {
        self.primitives.push(Primitive::Rect(rect));
    }

    fn line(&mut self, line: Line) {
        self.primitives.push(Primitive::Line(line));
    }

    fn text(&mut self, text: Text) {
        self.primitives.push(Primitive::Text(text));
    }
}

impl fmt::Display for SvgCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
        writeln!(
            f,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}px\" height=\"{h}px\" \
             viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height,
        )?;
        writeln!(f, "<g font-family=\"sans-serif\">")?;

        for primitive in &self.primitives {
            match primitive {
                Primitive::Rect(r) => writeln!(
                    f,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" \
                     opacity=\"{}\" stroke-width=\"0\"/>",
                    r.x, r.y, r.width, r.height, r.fill, r.opacity
                )?,
                Primitive::Line(l) => {
                    write!(
                        f,
                        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" \
                         stroke-width=\"{}\" opacity=\"{}\"",
                        l.x1, l.y1, l.x2, l.y2, l.stroke, l.width, l.opacity
                    )?;
                    if let Some(dash) = l.dasharray {
                        write!(f, " stroke-dasharray=\"{dash}\"")?;
                    }
                    writeln!(f, "/>")?;
                }
                Primitive::Text(t) => {
                    write!(
                        f,
                        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"{}\" fill=\"{}\"",
                        t.x,
                        t.y,
                        t.size,
                        t.anchor.as_str(),
                        t.fill
                    )?;
                    if t.dy != 0.0 {
                        write!(f, " dy=\"{}\"", t.dy)?;
                    }
                    if t.bold {
                        write!(f, " font-weight=\"bold\"")?;
                    }
                    if t.underline {
                        write!(f, " text-decoration=\"underline\"")?;
                    }
                    write!(f, ">")?;
                    write_escaped(f, &t.content)?;
                    writeln!(f, "</text>")?;
                }
            }
        }

        writeln!(f, "</g>")?;
        write!(f, "</svg>")
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    for c in s.chars() {
        match c {
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '&' => f.write_str("&amp;")?,
            '"' => f.write_str("&quot;")?,
            _ => fmt::Write::write_char(f, c)?,
        }
    }
    Ok(())
}
