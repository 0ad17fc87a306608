//! HTML document shell for the landing page.
//!
//! The live page is driven by CSS animations generated from the same motion
//! descriptors the frame renderer samples, so the browser and the rasterized
//! frames agree on timing.

use std::{fmt::Write as _, path::Path};

use anyhow::Context as _;

use crate::{
    animation::{ease::Ease, tween::Tween},
    config::{ColorScheme, HeroConfig, PageMetadata},
    field::{
        generator::{Direction, FIELD_VIEWBOX},
        motion::PathMotion,
    },
    foundation::{core::fmt_num, error::HeroResult},
    render::{
        raster::ensure_parent_dir,
        svg::{FONT_FAMILY, escape_xml},
    },
    scene::{CONTAINER_FADE_SECS, FieldInstance},
    title::{
        reveal::{
            ENTRANCE_RISE_PX, ENTRANCE_SPRING, GLOW_COLOR, PULSE_DURATION_SECS,
            PULSE_GLOW_ALPHA, PULSE_GLOW_RADIUS, PULSE_REPEAT_DELAY_SECS, PULSE_SCALE,
        },
        sequencer::sequence,
    },
};

const SPRING_SAMPLES: usize = 40;

type CssValue = fn(f64) -> String;

fn head(meta: &PageMetadata) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<meta charset="utf-8">"#);
    let _ = writeln!(
        out,
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#
    );
    let _ = writeln!(out, "<title>{}</title>", escape_xml(&meta.title));
    let _ = writeln!(
        out,
        r#"<meta name="description" content="{}">"#,
        escape_xml(&meta.description)
    );
    let _ = writeln!(
        out,
        r#"<meta name="generator" content="{}">"#,
        escape_xml(&meta.generator)
    );
    let _ = writeln!(
        out,
        r#"<link rel="icon" href="{}">"#,
        escape_xml(&meta.icons.icon)
    );
    let _ = writeln!(
        out,
        r#"<link rel="shortcut icon" href="{}">"#,
        escape_xml(&meta.icons.shortcut)
    );
    let _ = writeln!(
        out,
        r#"<link rel="apple-touch-icon" href="{}">"#,
        escape_xml(&meta.icons.apple)
    );
    out
}

/// `@keyframes` block whose stops are the union of the tweens' keyframe offsets.
fn keyframes_css(name: &str, tweens: &[(&str, &Tween, CssValue)]) -> String {
    let mut offsets: Vec<f64> = tweens
        .iter()
        .flat_map(|(_, tw, _)| {
            (0..tw.keyframes.values.len()).map(move |i| tw.keyframes.offset(i))
        })
        .collect();
    offsets.sort_by(f64::total_cmp);
    offsets.dedup();

    let mut out = format!("@keyframes {name} {{\n");
    for p in offsets {
        let decls: Vec<String> = tweens
            .iter()
            .map(|(prop, tw, fmt)| format!("{prop}: {}", fmt(tw.keyframes.at(p, Ease::Linear))))
            .collect();
        let _ = writeln!(out, "  {}% {{ {}; }}", fmt_num(p * 100.0), decls.join("; "));
    }
    out.push_str("}\n");
    out
}

fn path_keyframes() -> String {
    fn dash(v: f64) -> String {
        format!("{} 1", fmt_num(v))
    }
    fn offset(v: f64) -> String {
        fmt_num(-v)
    }

    let motion = PathMotion::with_duration(1.0);
    keyframes_css(
        "path-flow",
        &[
            ("stroke-dasharray", &motion.path_length, dash as CssValue),
            ("stroke-dashoffset", &motion.path_offset, offset as CssValue),
            ("opacity", &motion.opacity, fmt_num as CssValue),
        ],
    )
}

/// Pulse keyframes with the repeat delay folded into the cycle, since CSS
/// has no per-iteration pause.
fn pulse_keyframes() -> String {
    let cycle = PULSE_DURATION_SECS + PULSE_REPEAT_DELAY_SECS;
    let active = PULSE_DURATION_SECS / cycle;
    let n = PULSE_SCALE.len();

    let mut out = String::from("@keyframes letter-pulse {\n");
    for i in 0..n {
        let pct = active * (i as f64) / ((n - 1) as f64) * 100.0;
        let _ = writeln!(
            out,
            "  {}% {{ transform: scale({}); text-shadow: 0 0 {}px {}; }}",
            fmt_num(pct),
            fmt_num(PULSE_SCALE[i]),
            fmt_num(PULSE_GLOW_RADIUS[i]),
            GLOW_COLOR.css_rgba(PULSE_GLOW_ALPHA[i]),
        );
    }
    let _ = writeln!(
        out,
        "  100% {{ transform: scale(1); text-shadow: 0 0 0px {}; }}",
        GLOW_COLOR.css_rgba(0.0)
    );
    out.push_str("}\n");
    out
}

fn stylesheet(config: &HeroConfig) -> String {
    let palette = config.theme.palette();
    let (overlay_alpha, dot_alpha) = config.theme.overlay_alpha();
    let primary = ColorScheme::Primary.stroke(config.theme);
    let secondary = ColorScheme::Secondary.stroke(config.theme);

    let mut css = String::new();
    let _ = writeln!(css, "* {{ box-sizing: border-box; }}");
    let _ = writeln!(css, "body {{ margin: 0; font-family: {}; }}", FONT_FAMILY);
    let _ = writeln!(
        css,
        ".hero {{ position: relative; min-height: 100vh; width: 100%; display: flex; align-items: center; justify-content: center; overflow: hidden; background: linear-gradient(to bottom right, {}, {}, {}); }}",
        palette.background[0].hex(),
        palette.background[1].hex(),
        palette.background[2].hex()
    );
    let _ = writeln!(
        css,
        ".hero-overlay {{ position: absolute; inset: 0; background: linear-gradient(to top right, {}, transparent, {}); }}",
        palette.overlay_tint[0].css_rgba(overlay_alpha),
        palette.overlay_tint[1].css_rgba(overlay_alpha)
    );
    let _ = writeln!(
        css,
        ".hero-dots {{ position: absolute; inset: 0; opacity: {}; background-image: radial-gradient({} 1px, transparent 1px); background-size: 20px 20px; }}",
        fmt_num(dot_alpha),
        palette.dot.hex()
    );
    let _ = writeln!(
        css,
        ".hero-fields, .field-layer {{ position: absolute; inset: 0; pointer-events: none; }}"
    );
    let _ = writeln!(css, ".field {{ width: 100%; height: 100%; }}");
    let _ = writeln!(css, ".field-primary {{ color: {}; }}", primary.hex());
    let _ = writeln!(css, ".field-secondary {{ color: {}; }}", secondary.hex());
    let _ = writeln!(
        css,
        ".field path {{ stroke-dasharray: 0.3 1; opacity: 0.6; animation-name: path-flow; animation-timing-function: linear; animation-iteration-count: infinite; }}"
    );
    let _ = writeln!(
        css,
        ".hero-content {{ position: relative; z-index: 10; max-width: 56rem; margin: 0 auto; padding: 0 1.5rem; text-align: center; animation: hero-fade {}s {} both; }}",
        fmt_num(CONTAINER_FADE_SECS),
        Ease::EaseInOut.css()
    );
    let _ = writeln!(css, "@keyframes hero-fade {{ from {{ opacity: 0; }} to {{ opacity: 1; }} }}");
    let _ = writeln!(
        css,
        "h1 {{ font-size: clamp(3rem, 9vw, 6rem); font-weight: 700; letter-spacing: -0.05em; margin: 0 0 2rem; }}"
    );
    let _ = writeln!(css, ".word {{ display: inline-block; margin-right: 1rem; }}");
    let _ = writeln!(css, ".word:last-child {{ margin-right: 0; }}");
    let _ = writeln!(
        css,
        ".letter {{ display: inline-block; animation: letter-rise {}s {} var(--reveal-delay) both; }}",
        fmt_num(ENTRANCE_SPRING.settle_time()),
        ENTRANCE_SPRING.css_linear(SPRING_SAMPLES)
    );
    let _ = writeln!(
        css,
        ".beat {{ display: inline-block; color: transparent; background-clip: text; -webkit-background-clip: text; background-image: linear-gradient(to right, {}, {}); animation: letter-pulse {}s {} var(--pulse-delay) infinite; }}",
        palette.title_gradient[0].hex(),
        palette.title_gradient[1].hex(),
        fmt_num(PULSE_DURATION_SECS + PULSE_REPEAT_DELAY_SECS),
        Ease::EaseInOut.css()
    );
    let _ = writeln!(
        css,
        "@keyframes letter-rise {{ from {{ transform: translateY({}px); opacity: 0; }} to {{ transform: translateY(0); opacity: 1; }} }}",
        fmt_num(ENTRANCE_RISE_PX)
    );
    css.push_str(&pulse_keyframes());
    css.push_str(&path_keyframes());
    css
}

fn field_markup(out: &mut String, field: &FieldInstance) {
    let class = match field.scheme {
        ColorScheme::Primary => "field-primary",
        ColorScheme::Secondary => "field-secondary",
    };
    let (vw, vh) = FIELD_VIEWBOX;
    let _ = writeln!(out, r#"<div class="field-layer">"#);
    let _ = writeln!(
        out,
        r#"<svg class="field {class}" viewBox="0 0 {} {}" fill="none"><title>Background Paths</title>"#,
        fmt_num(vw),
        fmt_num(vh)
    );
    for (path, motion) in field.paths.iter().zip(&field.motions) {
        let _ = writeln!(
            out,
            r#"<path d="{}" stroke="currentColor" stroke-width="{}" stroke-opacity="{}" pathLength="1" style="animation-duration: {}s"/>"#,
            path.curve_command(),
            fmt_num(path.stroke_width),
            fmt_num(path.stroke_opacity),
            fmt_num(motion.duration)
        );
    }
    out.push_str("</svg>\n</div>\n");
}

/// Complete `index.html` for the landing page.
#[tracing::instrument(skip_all, fields(title = %config.title))]
pub fn render_document(config: &HeroConfig) -> HeroResult<String> {
    config.validate()?;

    let fields = [Direction::Right, Direction::Left]
        .map(|d| FieldInstance::new(d, config.path_count, config.seed));
    let phase_delay = config.phase_delay().as_secs_f64();

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str(&head(&config.metadata));
    let _ = writeln!(html, "<style>\n{}</style>", stylesheet(config));
    html.push_str("</head>\n<body>\n<div class=\"hero\">\n");
    html.push_str("<div class=\"hero-overlay\"></div>\n<div class=\"hero-dots\"></div>\n");
    html.push_str("<div class=\"hero-fields\">\n");
    for field in &fields {
        field_markup(&mut html, field);
    }
    html.push_str("</div>\n<div class=\"hero-content\">\n<h1>");

    for word in sequence(&config.title) {
        html.push_str(r#"<span class="word">"#);
        for letter in &word.letters {
            let _ = write!(
                html,
                r#"<span class="letter" style="--reveal-delay: {}s; --pulse-delay: {}s"><span class="beat">{}</span></span>"#,
                fmt_num(letter.reveal_delay),
                fmt_num(phase_delay + letter.pulse_delay),
                escape_xml(&letter.character.to_string())
            );
        }
        html.push_str("</span>");
    }

    html.push_str("</h1>\n</div>\n</div>\n</body>\n</html>\n");
    Ok(html)
}

pub fn write_document(config: &HeroConfig, path: &Path) -> HeroResult<()> {
    let html = render_document(config)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, html).with_context(|| format!("write page '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote landing page");
    Ok(())
}
