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

/// Number of points the $P score formula was calibrated for.
const REFERENCE_RESOLUTION: f32 = 32.0;

/// Main function of the $P recognizer.
/// Classifies a candidate gesture against a set of training samples.
/// Returns the index of the closest neighbor in the training set and its distance,
/// or `None` when the training set is empty. Ties go to the earlier template.
pub fn classify(candidate: &Gesture, training_set: &[Gesture]) -> Option<(usize, f32)> {
    let mut best = None;
    let mut min_distance = f32::MAX;
    for (index, template) in training_set.iter().enumerate() {
        let dist = greedy_cloud_match(&candidate.points, &template.points);
        if dist < min_distance || best.is_none() {
            min_distance = dist;
            best = Some(index);
        }
    }
    best.map(|index| (index, min_distance))
}

/// Converts a $P cloud distance between clouds of `n` points into a score in [0..1].
pub fn score(distance: f32, n: usize) -> f32 {
    let distance = distance * REFERENCE_RESOLUTION / n.max(1) as f32;
    ((2.0 - distance) / 2.0).clamp(0.0, 1.0)
}

/// Implements greedy search for a minimum-distance matching between two point clouds
fn greedy_cloud_match(points1: &[Point], points2: &[Point]) -> f32 {
    // the two clouds should have the same number of points by now
    let n = points1.len().min(points2.len());
    if n == 0 {
        return f32::MAX;
    }

    // controls the number of greedy search trials (eps is in [0..1])
    let eps = 0.5;

    let step = ((n as f32).powf(1.0 - eps).floor() as usize).max(1);
    let mut min_distance = f32::MAX;
    for i in (0..n).step_by(step) {
        // match points1 --> points2 starting with index point i
        let dist1 = cloud_distance(&points1[..n], &points2[..n], i);
        // match points2 --> points1 starting with index point i
        let dist2 = cloud_distance(&points2[..n], &points1[..n], i);
        min_distance = min_distance.min(dist1).min(dist2);
    }
    min_distance
}

/// Computes the distance between two point clouds by performing a minimum-distance greedy matching
/// starting with point startIndex
fn cloud_distance(points1: &[Point], points2: &[Point], start_index: usize) -> f32 {
    let n = points1.len();
    // matched[i] signals whether point i from the 2nd cloud has been already matched
    let mut matched = vec![false; n];
    // computes the sum of distances between matched points (i.e., the distance between the two clouds)
    let mut sum = 0.0;
    let mut i = start_index;
    loop {
        let mut index = 0;
        let mut min_dist = f32::MAX;
        for (j, p) in points2.iter().enumerate() {
            if !matched[j] {
                let dist = geometry::euclidean_distance(&points1[i], p);
                if dist < min_dist {
                    min_dist = dist;
                    index = j;
                }
            }
        }
        // point index from the 2nd cloud is matched to point i from the 1st cloud
        matched[index] = true;
        // weight each distance with a confidence coefficient that decreases from 1 to 0
        let weight = 1.0 - (((i + n - start_index) % n) as f32 / n as f32);
        sum += weight * min_dist;
        i = (i + 1) % n;
        if i == start_index {
            break;
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(stroke_id: i32) -> Vec<Point> {
        (0..10).map(|i| Point::new(i as f32 * 10.0, 0.0, stroke_id)).collect()
    }

    fn vee() -> Vec<Point> {
        let mut pts: Vec<Point> = (0..5).map(|i| Point::new(i as f32 * 10.0, i as f32 * 20.0, 0)).collect();
        pts.extend((0..5).map(|i| Point::new(50.0 + i as f32 * 10.0, 80.0 - i as f32 * 20.0, 0)));
        pts
    }

    #[test]
    fn identical_clouds_have_zero_distance() {
        let a = Gesture::new(vee(), "v");
        let b = Gesture::new(vee(), "v");
        assert!(greedy_cloud_match(&a.points, &b.points) < 1e-4);
        assert!((score(0.0, a.points.len()) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn picks_nearest_template() {
        let templates = [Gesture::new(line(0), "line"), Gesture::new(vee(), "v")];
        let candidate = Gesture::new(vee(), "");
        let (index, distance) = classify(&candidate, &templates).unwrap();
        assert_eq!(index, 1);
        assert!(score(distance, candidate.points.len()) > 0.9);
    }

    #[test]
    fn empty_training_set_has_no_match() {
        let candidate = Gesture::new(vee(), "");
        assert!(classify(&candidate, &[]).is_none());
    }

    #[test]
    fn earlier_template_wins_a_tie() {
        let templates = [Gesture::new(vee(), "first"), Gesture::new(vee(), "second")];
        let candidate = Gesture::new(vee(), "");
        assert_eq!(classify(&candidate, &templates).unwrap().0, 0);
    }

    #[test]
    fn score_is_monotonic_in_distance() {
        let n = 64;
        assert!(score(1.0, n) > score(2.0, n));
        assert_eq!(score(1000.0, n), 0.0);
    }
}
