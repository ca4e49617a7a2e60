//! Triangle mesh builders for the wheel face and needle
//!
//! Coordinates are wheel units with y pointing down, so increasing angle
//! runs clockwise on screen.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::polar_to_cartesian;

/// Arc tessellation density
pub const STEPS_PER_RADIAN: f32 = 24.0;

fn arc_steps(span: f32) -> u32 {
    ((span * STEPS_PER_RADIAN).ceil() as u32).max(2)
}

/// Filled pie slice from `theta_start` to `theta_end`
pub fn wedge(radius: f32, theta_start: f32, theta_end: f32, color: [f32; 4]) -> Vec<Vertex> {
    let span = theta_end - theta_start;
    if span <= 0.0 {
        return Vec::new();
    }
    let steps = arc_steps(span);
    let mut vertices = Vec::with_capacity((steps * 3) as usize);

    for i in 0..steps {
        let theta1 = theta_start + span * (i as f32 / steps as f32);
        let theta2 = theta_start + span * ((i + 1) as f32 / steps as f32);
        let p1 = polar_to_cartesian(radius, theta1);
        let p2 = polar_to_cartesian(radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(0.0, 0.0, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Filled circle around the wheel center
pub fn circle(radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    wedge(radius, 0.0, TAU, color)
}

/// Ring (hollow circle) around the wheel center
pub fn ring(inner_radius: f32, outer_radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let steps = arc_steps(TAU);
    let mut vertices = Vec::with_capacity((steps * 6) as usize);

    for i in 0..steps {
        let theta1 = (i as f32 / steps as f32) * TAU;
        let theta2 = ((i + 1) as f32 / steps as f32) * TAU;

        let inner1 = polar_to_cartesian(inner_radius, theta1);
        let outer1 = polar_to_cartesian(outer_radius, theta1);
        let inner2 = polar_to_cartesian(inner_radius, theta2);
        let outer2 = polar_to_cartesian(outer_radius, theta2);

        // Two triangles per step
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Thin line from the center out to `radius` at angle `theta` (segment border)
pub fn spoke(radius: f32, theta: f32, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = polar_to_cartesian(1.0, theta);
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    let tip = dir * radius;

    let a = perp;
    let b = -perp;
    let c = tip + perp;
    let d = tip - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Needle at angle 0, tip pointing at the center. Does not rotate with the wheel.
pub fn needle(
    tip_radius: f32,
    base_radius: f32,
    half_width: f32,
    outline: f32,
    fill: [f32; 4],
    stroke: [f32; 4],
) -> Vec<Vertex> {
    let triangle = |grow: f32, color: [f32; 4]| {
        [
            Vertex::fixed(tip_radius - grow * 2.0, 0.0, color),
            Vertex::fixed(base_radius + grow, -(half_width + grow), color),
            Vertex::fixed(base_radius + grow, half_width + grow, color),
        ]
    };

    // Outline first so the fill draws over it
    let mut vertices = Vec::with_capacity(6);
    vertices.extend(triangle(outline, stroke));
    vertices.extend(triangle(0.0, fill));
    vertices
}
