/*
 * Copyright (c) Ferran Pujol Camins. All rights reserved.
 *
 * This software is distributed under the "New BSD License" agreement.
 * The full license text is reproduced in the recognizer sources of this crate.
 */
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// A captured point, tagged with the stroke it belongs to.
/// `int_x` and `int_y` are only meaningful after gesture normalization,
/// where they index the $Q lookup table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub stroke_id: i32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub int_x: i32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub int_y: i32,
}

impl Point {
    pub fn new(x: f32, y: f32, stroke_id: i32) -> Self {
        Self {
            x,
            y,
            stroke_id,
            int_x: 0,
            int_y: 0,
        }
    }

    /// Same position, different stroke.
    pub fn with_stroke(self, stroke_id: i32) -> Self {
        Self::new(self.x, self.y, stroke_id)
    }
}
