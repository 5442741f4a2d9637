/*
 * Copyright (c) Ferran Pujol Camins. All rights reserved.
 *
 * This software is distributed under the "New BSD License" agreement.
 * The full license text is reproduced in the recognizer sources of this crate.
 */
use crate::{geometry::Rect, point::Point};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Where in a stroke a point is being admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokePhase {
    /// The pointer just went down.
    Start,
    /// The pointer is being dragged.
    Continue,
}

/// How drawing is limited to the configured area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LimitType {
    /// Drawing is not limited in any way.
    #[default]
    Unlimited,
    /// A stroke has to start inside the area, but may leave it afterwards.
    StartInArea,
    /// Points outside the area are moved onto its boundary.
    ClampToArea,
    /// Points outside the area are dropped.
    IgnoreOutside,
}

impl LimitType {
    /// Decides whether `point` takes part in the capture.
    /// Returns the point to register, possibly moved, or `None` if it is rejected.
    pub fn evaluate(&self, point: Point, area: &Rect, phase: StrokePhase) -> Option<Point> {
        match self {
            LimitType::Unlimited => Some(point),
            LimitType::StartInArea => match phase {
                StrokePhase::Start if !area.contains(&point) => None,
                _ => Some(point),
            },
            LimitType::ClampToArea => Some(area.clamp(&point)),
            LimitType::IgnoreOutside => area.contains(&point).then_some(point),
        }
    }
}
