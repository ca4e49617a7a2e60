//! Cached wheel face
//!
//! A [`WheelFace`] is built once per participant list: segment layout,
//! colors, truncated labels and the full triangle mesh. Drawing a frame only
//! needs the face plus the current angle. [`FaceCache`] rebuilds it when the
//! ids, names or order of the pool change and never otherwise.

use crate::consts::*;
use crate::palette::{Color, ui};
use crate::sim::{Participant, ParticipantId, Segment, index_at_angle, segments};

use super::shapes;
use super::vertex::Vertex;

/// Needle tip distance from the center (wheel units)
const NEEDLE_TIP_RADIUS: f32 = 0.86;
/// Needle base distance from the center
const NEEDLE_BASE_RADIUS: f32 = 1.07;
const NEEDLE_HALF_WIDTH: f32 = 0.035;
const NEEDLE_OUTLINE: f32 = 0.006;
const SPOKE_WIDTH: f32 = 0.006;

/// Half-size of the visible area in wheel units (face plus needle)
pub const VIEW_EXTENT: f32 = 1.15;

/// First `max_chars` characters of a name
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}

/// One drawn segment
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSegment {
    pub participant: ParticipantId,
    pub name: String,
    /// Text drawn on the wheel
    pub label: String,
    pub color: Color,
    pub segment: Segment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelFace {
    segments: Vec<FaceSegment>,
    label_max_chars: usize,
    mesh: Vec<Vertex>,
}

impl WheelFace {
    /// Lay out and tessellate the face for `participants`, in order
    pub fn build(participants: &[Participant], label_max_chars: usize) -> Self {
        let layout = segments(participants.len()).unwrap_or_default();
        let segments: Vec<FaceSegment> = participants
            .iter()
            .zip(layout)
            .map(|(p, segment)| FaceSegment {
                participant: p.id,
                name: p.name.clone(),
                label: truncate_label(&p.name, label_max_chars),
                color: p.color,
                segment,
            })
            .collect();

        let mesh = Self::tessellate(&segments);
        log::debug!(
            "Built wheel face: {} segments, {} vertices",
            segments.len(),
            mesh.len()
        );

        Self {
            segments,
            label_max_chars,
            mesh,
        }
    }

    fn tessellate(segments: &[FaceSegment]) -> Vec<Vertex> {
        let mut mesh = Vec::new();

        if segments.is_empty() {
            mesh.extend(shapes::circle(WHEEL_RADIUS, ui::EMPTY_FACE.to_rgba(1.0)));
        }
        for s in segments {
            mesh.extend(shapes::wedge(
                WHEEL_RADIUS,
                s.segment.theta_start as f32,
                s.segment.theta_end as f32,
                s.color.to_rgba(1.0),
            ));
        }
        if segments.len() > 1 {
            let border = ui::SEGMENT_BORDER.to_rgba(1.0);
            for s in segments {
                mesh.extend(shapes::spoke(
                    WHEEL_RADIUS,
                    s.segment.theta_start as f32,
                    SPOKE_WIDTH,
                    border,
                ));
            }
        }

        mesh.extend(shapes::ring(
            WHEEL_RADIUS - RIM_THICKNESS,
            WHEEL_RADIUS,
            ui::RIM.to_rgba(1.0),
        ));
        mesh.extend(shapes::circle(HUB_RADIUS, ui::HUB.to_rgba(1.0)));
        mesh.extend(shapes::needle(
            NEEDLE_TIP_RADIUS,
            NEEDLE_BASE_RADIUS,
            NEEDLE_HALF_WIDTH,
            NEEDLE_OUTLINE,
            ui::NEEDLE.to_rgba(1.0),
            ui::NEEDLE_OUTLINE.to_rgba(1.0),
        ));
        mesh
    }

    pub fn segments(&self) -> &[FaceSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn mesh(&self) -> &[Vertex] {
        &self.mesh
    }

    pub fn label_max_chars(&self) -> usize {
        self.label_max_chars
    }

    /// Segment under the needle at `angle`
    pub fn segment_at(&self, angle: f64) -> Option<&FaceSegment> {
        let index = index_at_angle(angle, self.segments.len()).ok()?;
        self.segments.get(index)
    }

    /// Label under the needle at `angle`
    pub fn label_at(&self, angle: f64) -> Option<&str> {
        self.segment_at(angle).map(|s| s.label.as_str())
    }

    /// Whether this face was built from exactly these participants
    pub fn matches(&self, participants: &[Participant], label_max_chars: usize) -> bool {
        self.label_max_chars == label_max_chars
            && self.segments.len() == participants.len()
            && self
                .segments
                .iter()
                .zip(participants)
                .all(|(s, p)| s.participant == p.id && s.name == p.name)
    }
}

/// Holds the current face and rebuilds it on pool changes only
#[derive(Debug, Clone)]
pub struct FaceCache {
    face: WheelFace,
    builds: u64,
}

impl FaceCache {
    pub fn new(participants: &[Participant], label_max_chars: usize) -> Self {
        Self {
            face: WheelFace::build(participants, label_max_chars),
            builds: 1,
        }
    }

    pub fn face(&self) -> &WheelFace {
        &self.face
    }

    /// Number of times the face has been built
    pub fn builds(&self) -> u64 {
        self.builds
    }

    /// Rebuild if the pool differs from the cached face. Returns whether it did.
    pub fn refresh(&mut self, participants: &[Participant], label_max_chars: usize) -> bool {
        if self.face.matches(participants, label_max_chars) {
            return false;
        }
        self.face = WheelFace::build(participants, label_max_chars);
        self.builds += 1;
        true
    }
}
