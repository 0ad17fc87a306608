use std::fmt::Write as _;

use crate::{
    config::HeroConfig,
    field::generator::FIELD_VIEWBOX,
    foundation::core::{Canvas, fmt_num},
    scene::{EvaluatedField, EvaluatedHero},
    title::reveal::{GLOW_COLOR, LetterFrame},
};

pub const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";
const MAX_FONT_SIZE: f64 = 96.0;
/// Horizontal advance per glyph as a fraction of the font size.
const ADVANCE_EM: f64 = 0.57;
const WORD_GAP_PX: f64 = 16.0;

/// Glyph box of one letter in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterBox {
    pub x: f64,
    pub baseline: f64,
    pub advance: f64,
    pub font_size: f64,
}

impl LetterBox {
    pub fn center(&self) -> (f64, f64) {
        (
            self.x + self.advance / 2.0,
            self.baseline - self.font_size * 0.35,
        )
    }
}

pub fn title_font_size(canvas: Canvas) -> f64 {
    (f64::from(canvas.height) * 0.18)
        .min(f64::from(canvas.width) * 0.09)
        .min(MAX_FONT_SIZE)
}

/// Lay the title out on one centered line with a fixed advance per glyph.
pub fn layout_title(canvas: Canvas, word_lengths: &[usize]) -> Vec<Vec<LetterBox>> {
    let font_size = title_font_size(canvas);
    let advance = font_size * ADVANCE_EM;

    let letters: usize = word_lengths.iter().sum();
    let gaps = word_lengths.len().saturating_sub(1) as f64;
    let total = letters as f64 * advance + gaps * WORD_GAP_PX;

    let mut x = (f64::from(canvas.width) - total) / 2.0;
    let baseline = f64::from(canvas.height) / 2.0 + font_size * 0.35;

    word_lengths
        .iter()
        .map(|&n| {
            let boxes: Vec<LetterBox> = (0..n)
                .map(|_| {
                    let b = LetterBox {
                        x,
                        baseline,
                        advance,
                        font_size,
                    };
                    x += advance;
                    b
                })
                .collect();
            x += WORD_GAP_PX;
            boxes
        })
        .collect()
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Standalone SVG document for one evaluated frame.
#[tracing::instrument(skip_all, fields(time = hero.time_secs))]
pub fn render_frame_svg(hero: &EvaluatedHero, config: &HeroConfig) -> String {
    let canvas = config.canvas;
    let (w, h) = (canvas.width, canvas.height);
    let palette = config.theme.palette();
    let (overlay_alpha, dot_alpha) = config.theme.overlay_alpha();

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    svg.push_str("<defs>\n");
    let _ = writeln!(
        svg,
        r#"<linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{}"/><stop offset="0.5" stop-color="{}"/><stop offset="1" stop-color="{}"/></linearGradient>"#,
        palette.background[0].hex(),
        palette.background[1].hex(),
        palette.background[2].hex(),
    );
    let _ = writeln!(
        svg,
        r#"<linearGradient id="overlay" x1="0" y1="1" x2="1" y2="0"><stop offset="0" stop-color="{}" stop-opacity="{a}"/><stop offset="0.5" stop-color="{}" stop-opacity="0"/><stop offset="1" stop-color="{}" stop-opacity="{a}"/></linearGradient>"#,
        palette.overlay_tint[0].hex(),
        palette.overlay_tint[0].hex(),
        palette.overlay_tint[1].hex(),
        a = fmt_num(overlay_alpha),
    );
    let _ = writeln!(
        svg,
        r#"<linearGradient id="title" x1="0" y1="0" x2="1" y2="0"><stop offset="0" stop-color="{}"/><stop offset="1" stop-color="{}"/></linearGradient>"#,
        palette.title_gradient[0].hex(),
        palette.title_gradient[1].hex(),
    );
    let _ = writeln!(
        svg,
        r#"<pattern id="dots" width="20" height="20" patternUnits="userSpaceOnUse"><circle cx="1" cy="1" r="1" fill="{}"/></pattern>"#,
        palette.dot.hex()
    );
    for letter in hero.words.iter().flat_map(|w| &w.letters) {
        if letter.glow_alpha > 0.0 && letter.glow_radius > 0.0 {
            let _ = writeln!(
                svg,
                r#"<filter id="{}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="0" dy="0" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#,
                glow_id(letter),
                fmt_num(letter.glow_radius / 2.0),
                GLOW_COLOR.hex(),
                fmt_num(letter.glow_alpha),
            );
        }
    }
    svg.push_str("</defs>\n");

    let _ = writeln!(svg, r#"<rect width="{w}" height="{h}" fill="url(#bg)"/>"#);
    let _ = writeln!(svg, r#"<rect width="{w}" height="{h}" fill="url(#overlay)"/>"#);
    let _ = writeln!(
        svg,
        r#"<rect width="{w}" height="{h}" fill="url(#dots)" opacity="{}"/>"#,
        fmt_num(dot_alpha)
    );

    for field in &hero.fields {
        write_field(&mut svg, field, canvas);
    }

    write_title(&mut svg, hero, canvas);
    svg.push_str("</svg>\n");
    svg
}

fn write_field(svg: &mut String, field: &EvaluatedField, canvas: Canvas) {
    let (vw, vh) = FIELD_VIEWBOX;
    let _ = writeln!(
        svg,
        r#"<svg x="0" y="0" width="{}" height="{}" viewBox="0 0 {} {}" fill="none"><g stroke="{}">"#,
        canvas.width,
        canvas.height,
        fmt_num(vw),
        fmt_num(vh),
        field.stroke.hex()
    );
    for path in &field.paths {
        let visible = path.frame.path_length.clamp(0.0, 1.0) * path.length;
        let _ = writeln!(
            svg,
            r#"<path d="{}" stroke-width="{}" stroke-opacity="{}" opacity="{}" stroke-dasharray="{} {}" stroke-dashoffset="{}"/>"#,
            path.d,
            fmt_num(path.stroke_width),
            fmt_num(path.stroke_opacity),
            fmt_num(path.frame.opacity),
            fmt_num(visible),
            fmt_num(path.length),
            fmt_num(-path.frame.path_offset * path.length),
        );
    }
    svg.push_str("</g></svg>\n");
}

fn write_title(svg: &mut String, hero: &EvaluatedHero, canvas: Canvas) {
    let lengths: Vec<usize> = hero.words.iter().map(|w| w.letters.len()).collect();
    let layout = layout_title(canvas, &lengths);

    let _ = writeln!(
        svg,
        r#"<g opacity="{}" font-family="{}" font-weight="bold" fill="url(#title)">"#,
        fmt_num(hero.container_opacity),
        FONT_FAMILY
    );
    for (word, boxes) in hero.words.iter().zip(&layout) {
        for (letter, b) in word.letters.iter().zip(boxes) {
            let (cx, cy) = b.center();
            let filter = if letter.glow_alpha > 0.0 && letter.glow_radius > 0.0 {
                format!(r#" filter="url(#{})""#, glow_id(letter))
            } else {
                String::new()
            };
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" font-size="{}" opacity="{}" transform="translate({} {}) scale({}) translate({} {})"{}>{}</text>"#,
                fmt_num(b.x),
                fmt_num(b.baseline),
                fmt_num(b.font_size),
                fmt_num(letter.opacity),
                fmt_num(cx),
                fmt_num(cy + letter.y_offset),
                fmt_num(letter.scale),
                fmt_num(-cx),
                fmt_num(-cy),
                filter,
                escape_xml(&letter.character.to_string()),
            );
        }
    }
    svg.push_str("</g>\n");
}

fn glow_id(letter: &LetterFrame) -> String {
    format!("glow-{}-{}", letter.word_index, letter.letter_index)
}
