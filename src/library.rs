/*
 * Copyright (c) Ferran Pujol Camins. All rights reserved.
 *
 * This software is distributed under the "New BSD License" agreement.
 * The full license text is reproduced in the recognizer sources of this crate.
 */
use crate::{
    error::GestureError,
    gesture::{Gesture, MIN_POINTS},
    point_cloud_recognizer, point_cloud_recognizer_plus,
    q_point_cloud_recognizer::{self, QParameters},
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Which point-cloud matcher scores candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// $P greedy cloud matching.
    #[default]
    P,
    /// $P+ with turning-angle descriptors.
    PPlus,
    /// $Q with early abandoning and lower bounding.
    Q,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LibraryConfig {
    pub algorithm: Algorithm,
    /// Rotate every cloud so its first point lies on the x axis before matching.
    pub rotation_invariant: bool,
    /// Best matches scoring below this are reported as unrecognized.
    pub score_threshold: f32,
    /// Only used by [`Algorithm::Q`].
    pub q: QParameters,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::P,
            rotation_invariant: false,
            score_threshold: 0.7,
            q: QParameters::default(),
        }
    }
}

/// Outcome of one recognition.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognitionResult {
    /// Best template, present only when `recognized` is set.
    pub name: Option<String>,
    /// Similarity of the best template in [0..1]; 0 when the library is empty.
    pub score: f32,
    pub recognized: bool,
}

impl RecognitionResult {
    pub fn unrecognized(score: f32) -> Self {
        Self {
            name: None,
            score,
            recognized: false,
        }
    }
}

/// Anything able to classify a captured gesture.
pub trait Recognizer {
    fn recognize(&self, gesture: &Gesture) -> Result<RecognitionResult, GestureError>;
}

/// Named template gestures, kept in registration order.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "StoredLibrary", into = "StoredLibrary")
)]
pub struct GestureLibrary {
    config: LibraryConfig,
    templates: Vec<Gesture>,
    /// `templates` rotated to their indicative angle, index for index.
    /// Empty unless `config.rotation_invariant` is set.
    rotated: Vec<Gesture>,
}

/// Persisted form of a library. The rotated copies are rebuilt on load.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct StoredLibrary {
    config: LibraryConfig,
    templates: Vec<Gesture>,
}

#[cfg(feature = "serde")]
impl From<StoredLibrary> for GestureLibrary {
    fn from(stored: StoredLibrary) -> Self {
        let mut library = GestureLibrary::new(stored.config);
        library.templates = stored.templates;
        library.rebuild_rotated();
        library
    }
}

#[cfg(feature = "serde")]
impl From<GestureLibrary> for StoredLibrary {
    fn from(library: GestureLibrary) -> Self {
        StoredLibrary {
            config: library.config,
            templates: library.templates,
        }
    }
}

impl GestureLibrary {
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            config,
            templates: Vec::new(),
            rotated: Vec::new(),
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LibraryConfig) {
        let rotation_changed = config.rotation_invariant != self.config.rotation_invariant;
        self.config = config;
        if rotation_changed {
            self.rebuild_rotated();
        }
    }

    fn rebuild_rotated(&mut self) {
        self.rotated = if self.config.rotation_invariant {
            self.templates.iter().map(Gesture::rotated_to_indicative_angle).collect()
        } else {
            Vec::new()
        };
    }

    /// Registers `gesture` under `name`, replacing (in place) any template with the same name.
    pub fn add_template(&mut self, name: &str, mut gesture: Gesture) -> Result<(), GestureError> {
        check_size(&gesture)?;
        gesture.name = name.to_owned();
        let rotated = self
            .config
            .rotation_invariant
            .then(|| gesture.rotated_to_indicative_angle());
        match self.templates.iter().position(|t| t.name == name) {
            Some(index) => {
                debug!(name, points = gesture.len(), "replacing gesture template");
                self.templates[index] = gesture;
                if let Some(rotated) = rotated {
                    self.rotated[index] = rotated;
                }
            }
            None => {
                debug!(name, points = gesture.len(), "adding gesture template");
                self.templates.push(gesture);
                self.rotated.extend(rotated);
            }
        }
        Ok(())
    }

    pub fn remove_template(&mut self, name: &str) -> Option<Gesture> {
        let index = self.templates.iter().position(|t| t.name == name)?;
        if !self.rotated.is_empty() {
            self.rotated.remove(index);
        }
        Some(self.templates.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Gesture> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Template names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Finds the closest template and its score, if the library is not empty.
    fn best_match(&self, candidate: &Gesture) -> Option<(usize, f32)> {
        let (candidate, templates) = if self.config.rotation_invariant {
            (Cow::Owned(candidate.rotated_to_indicative_angle()), &self.rotated)
        } else {
            (Cow::Borrowed(candidate), &self.templates)
        };

        match self.config.algorithm {
            Algorithm::P => point_cloud_recognizer::classify(&candidate, templates)
                .map(|(i, d)| (i, point_cloud_recognizer::score(d, candidate.points.len()))),
            Algorithm::PPlus => point_cloud_recognizer_plus::classify(&candidate, templates)
                .map(|(i, d)| (i, point_cloud_recognizer_plus::score(d, candidate.points.len()))),
            Algorithm::Q => q_point_cloud_recognizer::classify(&candidate, templates, &self.config.q)
                .map(|(i, d)| (i, q_point_cloud_recognizer::score(d))),
        }
    }
}

impl Recognizer for GestureLibrary {
    fn recognize(&self, gesture: &Gesture) -> Result<RecognitionResult, GestureError> {
        check_size(gesture)?;
        let result = match self.best_match(gesture) {
            Some((index, score)) if score >= self.config.score_threshold => RecognitionResult {
                name: Some(self.templates[index].name.clone()),
                score,
                recognized: true,
            },
            Some((_, score)) => RecognitionResult::unrecognized(score),
            None => RecognitionResult::unrecognized(0.0),
        };
        debug!(
            name = result.name.as_deref(),
            score = result.score,
            recognized = result.recognized,
            "gesture matched against library"
        );
        Ok(result)
    }
}

fn check_size(gesture: &Gesture) -> Result<(), GestureError> {
    if gesture.len() < MIN_POINTS {
        return Err(GestureError::InvalidInput {
            points: gesture.len(),
            minimum: MIN_POINTS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use std::f32::consts::PI;

    fn circle(cx: f32, cy: f32, r: f32) -> Gesture {
        let pts = (0..=16)
            .map(|i| {
                let a = i as f32 * 2.0 * PI / 16.0;
                Point::new(cx + r * a.cos(), cy + r * a.sin(), 0)
            })
            .collect();
        Gesture::new(pts, "")
    }

    fn zigzag() -> Gesture {
        let pts = (0..9)
            .map(|i| Point::new(i as f32 * 10.0, if i % 2 == 0 { 0.0 } else { 30.0 }, 0))
            .collect();
        Gesture::new(pts, "")
    }

    fn line() -> Gesture {
        Gesture::new((0..6).map(|i| Point::new(i as f32 * 20.0, 0.0, 0)).collect(), "")
    }

    fn library(algorithm: Algorithm) -> GestureLibrary {
        let mut lib = GestureLibrary::new(LibraryConfig {
            algorithm,
            ..Default::default()
        });
        lib.add_template("circle", circle(0.0, 0.0, 10.0)).unwrap();
        lib.add_template("zigzag", zigzag()).unwrap();
        lib
    }

    #[test]
    fn every_algorithm_recognizes_a_scaled_copy() {
        for algorithm in [Algorithm::P, Algorithm::PPlus, Algorithm::Q] {
            let lib = library(algorithm);
            let result = lib.recognize(&circle(300.0, 120.0, 75.0)).unwrap();
            assert!(result.recognized, "{algorithm:?}: {result:?}");
            assert_eq!(result.name.as_deref(), Some("circle"));
            assert!(result.score > 0.9, "{algorithm:?}: {result:?}");
        }
    }

    #[test]
    fn dissimilar_shape_is_not_recognized() {
        let mut lib = GestureLibrary::default();
        lib.add_template("circle", circle(0.0, 0.0, 10.0)).unwrap();
        let result = lib.recognize(&line()).unwrap();
        assert!(!result.recognized);
        assert_eq!(result.name, None);
        assert!(result.score < lib.config().score_threshold);
    }

    #[test]
    fn empty_library_reports_no_match() {
        let result = GestureLibrary::default().recognize(&line()).unwrap();
        assert_eq!(result, RecognitionResult::unrecognized(0.0));
    }

    #[test]
    fn too_few_points_is_invalid_input() {
        let lib = library(Algorithm::P);
        let tiny = Gesture::new(vec![Point::new(0.0, 0.0, 0), Point::new(5.0, 5.0, 0)], "");
        assert_eq!(
            lib.recognize(&tiny),
            Err(GestureError::InvalidInput { points: 2, minimum: 3 })
        );
        let mut lib = lib;
        assert!(lib.add_template("tiny", tiny).is_err());
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn re_adding_a_name_replaces_in_place() {
        let mut lib = library(Algorithm::P);
        lib.add_template("circle", line()).unwrap();
        assert_eq!(lib.names().collect::<Vec<_>>(), ["circle", "zigzag"]);
        assert_eq!(lib.get("circle").unwrap().raw_points, line().raw_points);
        assert!(lib.remove_template("circle").is_some());
        assert!(lib.remove_template("circle").is_none());
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut lib = library(Algorithm::P);
        lib.add_template("Circle", line()).unwrap();
        assert_eq!(lib.len(), 3);
    }

    #[test]
    fn ties_go_to_the_earlier_template() {
        let mut lib = GestureLibrary::default();
        lib.add_template("first", zigzag()).unwrap();
        lib.add_template("second", zigzag()).unwrap();
        let result = lib.recognize(&zigzag()).unwrap();
        assert_eq!(result.name.as_deref(), Some("first"));
    }

    #[test]
    fn recognition_is_deterministic() {
        for algorithm in [Algorithm::P, Algorithm::PPlus, Algorithm::Q] {
            let lib = library(algorithm);
            let candidate = zigzag();
            assert_eq!(lib.recognize(&candidate).unwrap(), lib.recognize(&candidate).unwrap());
        }
    }

    #[test]
    fn rotation_invariance_accepts_a_rotated_copy() {
        let rotated: Vec<Point> = zigzag()
            .raw_points
            .iter()
            .map(|p| Point::new(-p.y, p.x, p.stroke_id))
            .collect();
        let mut lib = GestureLibrary::new(LibraryConfig {
            rotation_invariant: true,
            ..Default::default()
        });
        lib.add_template("zigzag", zigzag()).unwrap();
        let result = lib.recognize(&Gesture::new(rotated, "")).unwrap();
        assert!(result.recognized, "{result:?}");
        assert!(result.score > 0.9, "{result:?}");
    }

    #[test]
    fn rotated_templates_are_cached_alongside_the_library() {
        let mut lib = GestureLibrary::new(LibraryConfig {
            rotation_invariant: true,
            ..Default::default()
        });
        lib.add_template("zigzag", zigzag()).unwrap();
        lib.add_template("circle", circle(0.0, 0.0, 10.0)).unwrap();
        lib.add_template("zigzag", line()).unwrap();
        assert_eq!(lib.rotated.len(), 2);
        for (template, rotated) in lib.templates.iter().zip(&lib.rotated) {
            assert_eq!(template.name, rotated.name);
            assert_eq!(template.raw_points, rotated.raw_points);
            assert!(rotated.points[0].y.abs() < 1e-4);
        }

        lib.remove_template("zigzag");
        assert_eq!(lib.rotated.len(), 1);
        assert_eq!(lib.rotated[0].name, "circle");

        lib.set_config(LibraryConfig::default());
        assert!(lib.rotated.is_empty());
    }

    #[test]
    fn enabling_rotation_later_rotates_existing_templates() {
        let mut lib = GestureLibrary::default();
        lib.add_template("zigzag", zigzag()).unwrap();
        assert!(lib.rotated.is_empty());

        lib.set_config(LibraryConfig {
            rotation_invariant: true,
            ..Default::default()
        });
        assert_eq!(lib.rotated.len(), 1);
        let turned: Vec<Point> = zigzag()
            .raw_points
            .iter()
            .map(|p| Point::new(p.y, -p.x, p.stroke_id))
            .collect();
        let result = lib.recognize(&Gesture::new(turned, "")).unwrap();
        assert_eq!(result.name.as_deref(), Some("zigzag"));
    }
}
