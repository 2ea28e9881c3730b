//! SVG output
//!
//! Writes an [`Animation`] as a standalone SVG using SMIL `<animate>`
//! elements, all looping over the same duration.

use std::fmt::Write;

use glam::Vec2;

use crate::anim::{Animation, Timeline};
use crate::config::Config;
use crate::palette::{Color, Colors};
use crate::sim::Geometry;

/// At most two decimals, trailing zeros dropped
fn num(v: f32) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn join<T>(timeline: &Timeline<T>, fmt: impl Fn(&T) -> String) -> String {
    timeline.values().map(fmt).collect::<Vec<_>>().join(";")
}

fn key_times<T>(timeline: &Timeline<T>) -> String {
    timeline
        .times()
        .map(|t| format!("{:.4}", t))
        .collect::<Vec<_>>()
        .join(";")
}

/// One `<animate>` element. Linear uniform timelines omit `keyTimes`: SMIL
/// already puts value `i` at `i / (n - 1)`. Discrete mode gives each value
/// `1 / n` of the loop instead, so discrete ones always carry explicit times.
fn animate<T>(
    out: &mut String,
    attribute: &str,
    timeline: &Timeline<T>,
    discrete: bool,
    dur: &str,
    fmt: impl Fn(&T) -> String,
) {
    if timeline.is_empty() {
        return;
    }
    let _ = write!(out, r#"<animate attributeName="{}" dur="{}""#, attribute, dur);
    if discrete {
        out.push_str(r#" calcMode="discrete""#);
    }
    if discrete || !timeline.is_uniform() {
        let _ = write!(out, r#" keyTimes="{}""#, key_times(timeline));
    }
    let _ = write!(
        out,
        r#" values="{}" repeatCount="indefinite"/>"#,
        join(timeline, fmt)
    );
}

fn color(c: &Color) -> String {
    c.to_string()
}

fn first_or(timeline: &Timeline<f32>, fallback: f32) -> f32 {
    timeline.values().next().copied().unwrap_or(fallback)
}

/// Render the whole scene
pub fn write_svg(anim: &Animation, geometry: &Geometry, colors: &Colors, config: &Config) -> String {
    let (w, h) = (num(geometry.canvas_width), num(geometry.canvas_height));
    let dur = format!("{}s", num(anim.duration));
    let animated = anim.frame_count > 0;
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = write!(
        out,
        r#"<rect width="{w}" height="{h}" fill="{}"/>"#,
        colors.background
    );

    let size = num(config.cell_size);
    for brick in &anim.bricks {
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{size}" height="{size}" rx="2" fill="{}""#,
            num(brick.x),
            num(brick.y),
            brick.fill
        );
        if brick.ghost {
            let _ = write!(out, r#" opacity="{}""#, num(config.ghost_opacity));
        }
        match &brick.fill_timeline {
            Some(timeline) if animated => {
                out.push('>');
                animate(&mut out, "fill", timeline, true, &dur, color);
                out.push_str("</rect>");
            }
            _ => out.push_str("/>"),
        }
    }

    let paddle_x = first_or(
        &anim.paddle_x,
        (geometry.canvas_width - config.paddle_width) / 2.0,
    );
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}">"#,
        num(paddle_x),
        num(geometry.paddle_y),
        num(config.paddle_width),
        num(config.paddle_height),
        num(config.paddle_height / 2.0),
        colors.paddle
    );
    if animated {
        animate(&mut out, "x", &anim.paddle_x, false, &dur, |v| num(*v));
    }
    out.push_str("</rect>");

    let ball_x = first_or(&anim.ball_x, geometry.canvas_width / 2.0);
    let ball_y = first_or(&anim.ball_y, geometry.paddle_y - config.ball_radius);
    let _ = write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}">"#,
        num(ball_x),
        num(ball_y),
        num(config.ball_radius),
        colors.ball
    );
    if animated {
        animate(&mut out, "cx", &anim.ball_x, false, &dur, |v| num(*v));
        animate(&mut out, "cy", &anim.ball_y, false, &dur, |v| num(*v));
        animate(&mut out, "fill", &anim.ball_fill, true, &dur, color);
    }
    out.push_str("</circle>");

    if animated {
        for particle in &anim.particles {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" opacity="0">"#,
                num(particle.origin.x),
                num(particle.origin.y),
                num(config.particle_radius),
                particle.fill
            );
            animate(&mut out, "opacity", &particle.opacity, false, &dur, |v| num(*v));
            let _ = write!(
                out,
                r#"<animateTransform attributeName="transform" type="translate" dur="{}" keyTimes="{}" values="{}" repeatCount="indefinite"/>"#,
                dur,
                key_times(&particle.translate),
                join(&particle.translate, |v: &Vec2| format!("{} {}", num(v.x), num(v.y)))
            );
            out.push_str("</circle>");
        }
    }

    out.push_str("</svg>\n");
    out
}
