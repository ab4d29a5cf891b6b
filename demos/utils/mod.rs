#![allow(dead_code)]
use dotmesh_rs::{render::Renderer, render::Rgba, Float, Point, Surface};
use svg::{Document, Node};

/// Renderer drawing each frame into an svg document
pub struct SvgRenderer {
    surface: Surface,
    doc: Document,
}

impl SvgRenderer {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            doc: Self::blank(surface),
        }
    }

    fn blank(surface: Surface) -> Document {
        Document::new()
            .set("viewBox", (0., 0., surface.width, surface.height))
            .set("style", "background-color: #F5F5F5")
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn save(&self, path: std::path::PathBuf) {
        svg::save(path, &self.doc).unwrap();
    }
}

impl Renderer for SvgRenderer {
    fn clear(&mut self) {
        self.doc = Self::blank(self.surface);
    }

    fn draw_triangle(&mut self, points: [Point; 3], intensity: Float) {
        let color = Rgba::for_triangle(points, self.surface, intensity);
        self.doc.append(triangle(points, "clear", &color.to_css()));
    }

    fn draw_dot(&mut self, point: Point, color: Rgba, size: Float) {
        self.doc.append(
            svg::node::element::Rectangle::new()
                .set("x", point.x - size / 2.)
                .set("y", point.y - size / 2.)
                .set("width", size)
                .set("height", size)
                .set("fill", color.to_css()),
        );
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba) {
        self.doc.append(line(from, to, &color.to_css()));
    }
}

pub fn line(p: Point, q: Point, color: &str) -> svg::node::element::Line {
    svg::node::element::Line::new()
        .set("class", "edge")
        .set("stroke", to_color(color))
        .set("x1", p.x)
        .set("y1", p.y)
        .set("x2", q.x)
        .set("y2", q.y)
}

pub fn triangle(points: [Point; 3], border_color: &str, fill_color: &str) -> svg::node::element::Path {
    let [p0, p1, p2] = points;
    let data = svg::node::element::path::Data::new()
        .move_to((p0.x, p0.y))
        .line_to((p1.x, p1.y))
        .line_to((p2.x, p2.y))
        .close();

    svg::node::element::Path::new()
        .set("d", data)
        .set("stroke", to_color(border_color))
        .set("fill", to_color(fill_color))
}

pub fn text(content: impl Into<String>, p: Point) -> svg::node::element::Text {
    svg::node::element::Text::new()
        .add(svg::node::Text::new(content))
        .set("x", p.x)
        .set("y", p.y)
}

pub fn to_color(name: &str) -> String {
    match name {
        "blue" => "#29B6F6",
        "red" => "#EF5350",
        "black" => "#3E2723",
        "gray" => "#616161",
        "clear" => "#00000000",
        _ => name,
    }
    .into()
}
