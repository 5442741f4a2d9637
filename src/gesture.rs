/*
 * The $P Point-Cloud Recognizer (rust version)
 * 
 * Translated to rust from the original authors' C# code with an AI tool.
 * The translated code has been reviewed by Ferran Pujol Camins.
 *
 * Original authors:
 * 
 * 	    Radu-Daniel Vatavu, Ph.D.
 *	    University Stefan cel Mare of Suceava
 *	    Suceava 720229, Romania
 *	    vatavu@eed.usv.ro
 *
 *	    Lisa Anthony, Ph.D.
 *      UMBC
 *      Information Systems Department
 *      1000 Hilltop Circle
 *      Baltimore, MD 21250
 *      lanthony@umbc.edu
 *
 *	    Jacob O. Wobbrock, Ph.D.
 * 	    The Information School
 *	    University of Washington
 *	    Seattle, WA 98195-2840
 *	    wobbrock@uw.edu
 *
 * The academic publication for the $P recognizer, and what should be 
 * used to cite it, is:
 *
 *	Vatavu, R.-D., Anthony, L. and Wobbrock, J.O. (2012).  
 *	  Gestures as point clouds: A $P recognizer for user interface 
 *	  prototypes. Proceedings of the ACM Int'l Conference on  
 *	  Multimodal Interfaces (ICMI '12). Santa Monica, California  
 *	  (October 22-26, 2012). New York: ACM Press, pp. 273-280.
 *
 * This software is distributed under the "New BSD License" agreement:
 *
 * Copyright (c) 2012, Radu-Daniel Vatavu, Lisa Anthony, and 
 * Jacob O. Wobbrock. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without
 * modification, are permitted provided that the following conditions are met:
 *    * Redistributions of source code must retain the above copyright
 *      notice, this list of conditions and the following disclaimer.
 *    * Redistributions in binary form must reproduce the above copyright
 *      notice, this list of conditions and the following disclaimer in the
 *      documentation and/or other materials provided with the distribution.
 *    * Neither the names of the University Stefan cel Mare of Suceava, 
 *	    University of Washington, nor UMBC, nor the names of its contributors 
 *	    may be used to endorse or promote products derived from this software 
 *	    without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS
 * IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO,
 * THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
 * PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL Radu-Daniel Vatavu OR Lisa Anthony
 * OR Jacob O. Wobbrock OR Ferran Pujol Camins BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, 
 * EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT 
 * OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS 
 * INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, 
 * STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
 * OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
 * SUCH DAMAGE.
 */
use crate::{geometry, point::Point};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Default number of points on the gesture path
pub const SAMPLING_RESOLUTION: usize = 64;
/// Each point has two additional x and y integer coordinates in the interval [0..MAX_INT_COORDINATES-1] used to operate the LUT table efficiently (O(1))
const MAX_INT_COORDINATES: usize = 1024;
/// The default size of the lookup table is 64 x 64
pub const LUT_SIZE: usize = 64;
/// Scale factor to convert between integer x and y coordinates and the size of the LUT
pub const LUT_SCALE_FACTOR: usize = MAX_INT_COORDINATES / LUT_SIZE;
/// Smallest number of captured points a gesture needs before it can be matched
pub const MIN_POINTS: usize = 3;

/// A gesture as a cloud of points spanning one or more strokes.
///
/// The captured points are kept verbatim in `raw_points` so they can be redrawn.
/// `points` holds the normalized cloud used for matching: resampled, scaled
/// into the unit box and translated so the centroid sits at the origin.
/// For $Q, a LUT is also computed.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "StoredGesture", into = "StoredGesture")
)]
pub struct Gesture {
    /// Gesture class
    pub name: String,
    /// Points as captured, in stroke order
    pub raw_points: Vec<Point>,
    /// Gesture points (normalized)
    pub points: Vec<Point>,
    /// Look-up table
    pub lut: Option<Vec<Vec<usize>>>,
}

/// Persisted form of a gesture. Only the captured points are stored;
/// everything else is derived again on load.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct StoredGesture {
    name: String,
    points: Vec<Point>,
}

#[cfg(feature = "serde")]
impl From<StoredGesture> for Gesture {
    fn from(stored: StoredGesture) -> Self {
        Gesture::new(stored.points, &stored.name)
    }
}

#[cfg(feature = "serde")]
impl From<Gesture> for StoredGesture {
    fn from(gesture: Gesture) -> Self {
        StoredGesture {
            name: gesture.name,
            points: gesture.raw_points,
        }
    }
}

impl Gesture {
    /// Constructs a new gesture from a list of points and a name
    pub fn new(pts: Vec<Point>, name: &str) -> Self {
        let mut g = Self {
            points: Vec::new(),
            raw_points: pts,
            name: name.into(),
            lut: None,
        };
        g.normalize();
        g
    }

    /// Number of captured points, before resampling.
    pub fn len(&self) -> usize {
        self.raw_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_points.is_empty()
    }

    /// Number of distinct strokes in the captured points.
    pub fn stroke_count(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for p in &self.raw_points {
            if last != Some(p.stroke_id) {
                count += 1;
                last = Some(p.stroke_id);
            }
        }
        count
    }

    /// Recomputes the normalized cloud and the LUT from the captured points.
    pub fn normalize(&mut self) {
        if self.raw_points.is_empty() {
            self.points.clear();
            self.lut = None;
            return;
        }
        // standard $-family processing: resample, scale, and translate to origin
        self.points = Self::resample(&self.raw_points, SAMPLING_RESOLUTION);
        self.points = Self::scale(&self.points);
        let c = Self::centroid(&self.points);
        self.points = Self::translate_to(&self.points, &c);

        // constructs a lookup table for fast lower bounding (used by $Q)
        self.transform_coordinates_to_integers();
        self.construct_lut();
    }

    /// Returns a copy whose normalized cloud is rotated about the centroid
    /// so that the first point lies on the positive x axis.
    pub fn rotated_to_indicative_angle(&self) -> Gesture {
        let mut g = self.clone();
        let Some(first) = g.points.first().copied() else {
            return g;
        };
        let theta = first.y.atan2(first.x);
        let (sin, cos) = (-theta).sin_cos();
        for p in &mut g.points {
            let (x, y) = (p.x, p.y);
            p.x = x * cos - y * sin;
            p.y = x * sin + y * cos;
        }
        g.transform_coordinates_to_integers();
        g.construct_lut();
        g
    }

    /// Performs scale normalization with shape preservation into [0..1]x[0..1]
    fn scale(points: &[Point]) -> Vec<Point> {
        let (mut minx, mut miny) = (f32::MAX, f32::MAX);
        let (mut maxx, mut maxy) = (f32::MIN, f32::MIN);
        for p in points {
            minx = minx.min(p.x);
            miny = miny.min(p.y);
            maxx = maxx.max(p.x);
            maxy = maxy.max(p.y);
        }
        let mut scale = (maxx - minx).max(maxy - miny);
        // a single repeated point has no extent to normalize
        if scale <= f32::EPSILON {
            scale = 1.0;
        }
        points
            .iter()
            .map(|p| Point::new((p.x - minx) / scale, (p.y - miny) / scale, p.stroke_id))
            .collect()
    }

    /// Translates the array of points by p
    fn translate_to(points: &[Point], p: &Point) -> Vec<Point> {
        points
            .iter()
            .map(|point| Point::new(point.x - p.x, point.y - p.y, point.stroke_id))
            .collect()
    }

    /// Computes the centroid for an array of points
    fn centroid(points: &[Point]) -> Point {
        let mut cx = 0.0;
        let mut cy = 0.0;
        for p in points {
            cx += p.x;
            cy += p.y;
        }
        let n = points.len() as f32;
        Point::new(cx / n, cy / n, 0)
    }

    /// Resamples the array of points into exactly n equally-distanced points
    fn resample(points: &[Point], n: usize) -> Vec<Point> {
        let first = points[0];
        let interval = Self::path_length(points) / (n as f32 - 1.0);
        if interval <= f32::EPSILON {
            return vec![first; n];
        }

        let mut new_points = Vec::with_capacity(n);
        new_points.push(first);
        let mut d = 0.0;

        for i in 1..points.len() {
            if points[i].stroke_id != points[i - 1].stroke_id {
                continue;
            }
            let mut dist = geometry::euclidean_distance(&points[i - 1], &points[i]);
            if (d + dist) >= interval {
                let mut prev = points[i - 1];
                while (d + dist) >= interval && new_points.len() < n {
                    let t = if dist != 0. {
                        ((interval - d) / dist).clamp(0.0, 1.0)
                    } else {
                        0.5
                    };
                    let nx = (1.0 - t) * prev.x + t * points[i].x;
                    let ny = (1.0 - t) * prev.y + t * points[i].y;
                    let q = Point::new(nx, ny, points[i].stroke_id);
                    new_points.push(q);

                    // update partial length
                    dist = d + dist - interval;
                    d = 0.0;
                    prev = q;
                }
                d = dist;
            } else {
                d += dist;
            }
        }
        // rounding can leave us a point (or, across strokes, a few) short
        let last = points[points.len() - 1];
        while new_points.len() < n {
            new_points.push(last);
        }
        new_points.truncate(n);
        new_points
    }

    /// Computes the path length for an array of points
    fn path_length(points: &[Point]) -> f32 {
        points
            .windows(2)
            .filter(|w| w[0].stroke_id == w[1].stroke_id)
            .map(|w| geometry::euclidean_distance(&w[0], &w[1]))
            .sum()
    }

    /// Scales point coordinates to the integer domain [0..MAXINT-1] x [0..MAXINT-1]
    fn transform_coordinates_to_integers(&mut self) {
        let max = MAX_INT_COORDINATES as i32 - 1;
        for p in &mut self.points {
            p.int_x = (((p.x + 1.0) / 2.0 * max as f32) as i32).clamp(0, max);
            p.int_y = (((p.y + 1.0) / 2.0 * max as f32) as i32).clamp(0, max);
        }
    }

    /// Constructs a Lookup Table that maps grid points to the closest point from the gesture path
    fn construct_lut(&mut self) {
        let mut table: Vec<Vec<usize>> = vec![vec![0; LUT_SIZE]; LUT_SIZE];
        for (i, row_entries) in table.iter_mut().enumerate() {
            for (j, entry) in row_entries.iter_mut().enumerate() {
                let mut min_dist = i32::MAX;
                let mut idx_min: usize = 0;
                for (t, p) in self.points.iter().enumerate() {
                    let row = p.int_y / LUT_SCALE_FACTOR as i32;
                    let col = p.int_x / LUT_SCALE_FACTOR as i32;
                    let dr = row - i as i32;
                    let dc = col - j as i32;
                    let dist = dr * dr + dc * dc;
                    if dist < min_dist {
                        min_dist = dist;
                        idx_min = t;
                    }
                }
                *entry = idx_min;
            }
        }
        self.lut = Some(table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(stroke_id: i32) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, stroke_id),
            Point::new(100.0, 0.0, stroke_id),
            Point::new(100.0, 100.0, stroke_id),
            Point::new(0.0, 100.0, stroke_id),
            Point::new(0.0, 0.0, stroke_id),
        ]
    }

    #[test]
    fn normalized_cloud_has_fixed_size_and_centered_centroid() {
        let g = Gesture::new(square(0), "square");
        assert_eq!(g.points.len(), SAMPLING_RESOLUTION);
        assert_eq!(g.raw_points.len(), 5);
        let c = Gesture::centroid(&g.points);
        assert!(c.x.abs() < 1e-4 && c.y.abs() < 1e-4);
        for p in &g.points {
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0);
        }
        assert!(g.lut.is_some());
    }

    #[test]
    fn normalization_is_scale_invariant() {
        let small = Gesture::new(square(0), "a");
        let big: Vec<Point> = square(0)
            .iter()
            .map(|p| Point::new(p.x * 7.0 + 30.0, p.y * 7.0 - 5.0, 0))
            .collect();
        let big = Gesture::new(big, "b");
        for (a, b) in small.points.iter().zip(&big.points) {
            assert!((a.x - b.x).abs() < 1e-3);
            assert!((a.y - b.y).abs() < 1e-3);
        }
    }

    #[test]
    fn stroke_ids_survive_normalization() {
        let mut pts = vec![Point::new(0.0, 0.0, 0), Point::new(100.0, 0.0, 0)];
        pts.extend([Point::new(50.0, -50.0, 1), Point::new(50.0, 50.0, 1)]);
        let g = Gesture::new(pts, "plus");
        assert_eq!(g.stroke_count(), 2);
        assert_eq!(g.points.len(), SAMPLING_RESOLUTION);
        assert!(g.points.iter().any(|p| p.stroke_id == 0));
        assert!(g.points.iter().any(|p| p.stroke_id == 1));
    }

    #[test]
    fn degenerate_input_does_not_produce_nan() {
        let g = Gesture::new(vec![Point::new(5.0, 5.0, 0); 4], "dot");
        assert_eq!(g.points.len(), SAMPLING_RESOLUTION);
        assert!(g.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));

        let empty = Gesture::new(Vec::new(), "");
        assert!(empty.is_empty());
        assert!(empty.points.is_empty());
        assert!(empty.lut.is_none());
    }

    #[test]
    fn rotation_puts_first_point_on_x_axis() {
        let g = Gesture::new(square(0), "square").rotated_to_indicative_angle();
        let first = g.points[0];
        assert!(first.y.abs() < 1e-4);
        assert!(first.x > 0.0);
        for p in &g.points {
            assert!((0..MAX_INT_COORDINATES as i32).contains(&p.int_x));
            assert!((0..MAX_INT_COORDINATES as i32).contains(&p.int_y));
        }
    }
}
