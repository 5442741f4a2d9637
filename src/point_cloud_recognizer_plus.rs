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
use crate::{geometry, gesture::Gesture, point::Point};
use std::f32::consts::PI;

/// Main function of the $P+ recognizer.
/// Classifies a candidate gesture against a set of training samples.
/// Returns the index of the closest neighbor in the template set and its distance,
/// or `None` when the template set is empty. Ties go to the earlier template.
pub fn classify(candidate: &Gesture, training_set: &[Gesture]) -> Option<(usize, f32)> {
    let theta = compute_local_shape_descriptors(&candidate.points);
    let mut best = None;
    let mut min_distance = f32::MAX;
    for (index, template) in training_set.iter().enumerate() {
        let template_theta = compute_local_shape_descriptors(&template.points);
        let dist = greedy_cloud_match(&candidate.points, &theta, &template.points, &template_theta);
        if dist < min_distance || best.is_none() {
            min_distance = dist;
            best = Some(index);
        }
    }
    best.map(|index| (index, min_distance))
}

/// Mean per-point distance at which the score drops to 0.
const MEAN_DISTANCE_AT_ZERO_SCORE: f32 = 0.3;

/// Converts a $P+ cloud distance between clouds of `n` points into a score in [0..1].
/// The distance sums one term per point, so it is averaged over `n` first.
pub fn score(distance: f32, n: usize) -> f32 {
    let mean = distance / n.max(1) as f32;
    (1.0 - mean / MEAN_DISTANCE_AT_ZERO_SCORE).clamp(0.0, 1.0)
}

/// Matches in both directions and keeps the closer one.
fn greedy_cloud_match(points1: &[Point], theta1: &[f32], points2: &[Point], theta2: &[f32]) -> f32 {
    if points1.is_empty() || points2.is_empty() {
        return f32::MAX;
    }
    let d1 = cloud_distance(points1, theta1, points2, theta2);
    let d2 = cloud_distance(points2, theta2, points1, theta1);
    d1.min(d2)
}

/// Computes the distance between two point clouds
/// using local shape descriptors (theta turning angles).
fn cloud_distance(points1: &[Point], theta1: &[f32], points2: &[Point], theta2: &[f32]) -> f32 {
    let mut matched = vec![false; points2.len()];
    let mut sum = 0.0;

    for (p, &theta) in points1.iter().zip(theta1) {
        let (dist, index) = closest_point_in_cloud(p, theta, points2, theta2);
        sum += dist;
        matched[index] = true;
    }
    // points of the 2nd cloud nobody picked still have to be accounted for
    for (i, p) in points2.iter().enumerate() {
        if !matched[i] {
            sum += closest_point_in_cloud(p, theta2[i], points1, theta1).0;
        }
    }
    sum
}

/// Searches for the point from point-cloud cloud that is closest to point p.
/// Returns the distance and the index of that point.
fn closest_point_in_cloud(p: &Point, theta: f32, cloud: &[Point], theta_cloud: &[f32]) -> (f32, usize) {
    let mut min = f32::MAX;
    let mut index_min = 0;
    for (i, q) in cloud.iter().enumerate() {
        let dx = geometry::sqr_euclidean_distance(p, q);
        let dtheta = theta - theta_cloud[i];
        let dist = (dx + dtheta * dtheta).sqrt();
        if dist < min {
            min = dist;
            index_min = i;
        }
    }
    (min, index_min)
}

/// Computes local shape descriptors (theta turning angles) at each point on the gesture path.
pub fn compute_local_shape_descriptors(points: &[Point]) -> Vec<f32> {
    let n = points.len();
    let mut theta = vec![0.0; n];
    for i in 1..n.saturating_sub(1) {
        theta[i] = short_angle(&points[i - 1], &points[i], &points[i + 1]) / PI;
    }
    theta
}

/// Computes the smallest turning angle between vectors (a,b) and (b,c) in radians in the interval [0..PI].
fn short_angle(a: &Point, b: &Point, c: &Point) -> f32 {
    let length_ab = geometry::euclidean_distance(a, b);
    let length_bc = geometry::euclidean_distance(b, c);
    if (length_ab * length_bc).abs() <= f32::EPSILON {
        return 0.0;
    }
    // compute cosine of the angle between vectors (a,b) and (b,c)
    let dot = (b.x - a.x) * (c.x - b.x) + (b.y - a.y) * (c.y - b.y);
    let cos_angle = dot / (length_ab * length_bc);

    // deal with special cases near limits of the [-1,1] interval
    if cos_angle <= -1.0 {
        PI
    } else if cos_angle >= 1.0 {
        0.0
    } else {
        cos_angle.acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_path_has_no_turning() {
        let pts: Vec<Point> = (0..5).map(|i| Point::new(i as f32, 0.0, 0)).collect();
        assert!(compute_local_shape_descriptors(&pts).iter().all(|t| *t == 0.0));
    }

    #[test]
    fn right_angle_turn_is_half_pi() {
        let pts = [Point::new(0.0, 0.0, 0), Point::new(1.0, 0.0, 0), Point::new(1.0, 1.0, 0)];
        let theta = compute_local_shape_descriptors(&pts);
        assert!((theta[1] - 0.5).abs() < 1e-5);
        assert_eq!(theta[0], 0.0);
        assert_eq!(theta[2], 0.0);
    }

    #[test]
    fn short_inputs_do_not_underflow() {
        assert!(compute_local_shape_descriptors(&[]).is_empty());
        assert_eq!(compute_local_shape_descriptors(&[Point::new(0.0, 0.0, 0)]), vec![0.0]);
    }

    #[test]
    fn classifies_by_shape() {
        let corner: Vec<Point> = vec![
            Point::new(0.0, 0.0, 0),
            Point::new(100.0, 0.0, 0),
            Point::new(100.0, 100.0, 0),
        ];
        let line: Vec<Point> = (0..5).map(|i| Point::new(0.0, i as f32 * 25.0, 0)).collect();
        let templates = [Gesture::new(line, "line"), Gesture::new(corner.clone(), "corner")];
        let candidate = Gesture::new(corner, "");
        let (index, distance) = classify(&candidate, &templates).unwrap();
        assert_eq!(index, 1);
        assert_eq!(score(distance, candidate.points.len()), 1.0);
    }

    #[test]
    fn score_averages_over_the_cloud_size() {
        // the same mean per-point distance scores the same at any resolution
        assert!((score(3.2, 64) - score(1.6, 32)).abs() < 1e-6);
        assert!(score(3.0, 64) > 0.8);
        assert!(score(3.0, 64) > score(6.0, 64));
        assert_eq!(score(64.0, 64), 0.0);
    }
}
