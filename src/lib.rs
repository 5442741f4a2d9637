/*
 * Copyright (c) Ferran Pujol Camins. All rights reserved.
 *
 * This software is distributed under the "New BSD License" agreement.
 * The full license text is reproduced in the recognizer sources of this crate.
 */
//! Multi-stroke gesture capture and recognition.
//!
//! [`GestureCapture`] turns pointer input into strokes, filtered by an area
//! [`LimitType`] and a minimum point spacing. On request the strokes become a
//! [`Gesture`] that a [`GestureLibrary`] matches against its named templates
//! with the $P, $P+ or $Q point-cloud recognizers.
//!
//! ```
//! use gesture_capture::{CaptureConfig, Gesture, GestureCapture, GestureLibrary, Point};
//!
//! let mut library = GestureLibrary::default();
//! let line = (0..8).map(|i| Point::new(i as f32 * 20.0, 0.0, 0)).collect();
//! library.add_template("line", Gesture::new(line, "line"))?;
//!
//! let mut capture = GestureCapture::new(CaptureConfig::default(), library);
//! capture.begin_stroke(0.0, 5.0);
//! for i in 1..8 {
//!     capture.append_point(i as f32 * 25.0, 5.0);
//! }
//! let result = capture.recognize().unwrap();
//! assert_eq!(result.name.as_deref(), Some("line"));
//! # Ok::<(), gesture_capture::GestureError>(())
//! ```

pub mod area;
pub mod capture;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod library;
pub mod point;
pub mod point_cloud_recognizer;
pub mod point_cloud_recognizer_plus;
pub mod q_point_cloud_recognizer;

pub use area::{LimitType, StrokePhase};
pub use capture::{CaptureConfig, CaptureState, GestureCapture, InputEvent, SubscriptionId};
pub use error::GestureError;
pub use geometry::Rect;
pub use gesture::Gesture;
pub use library::{Algorithm, GestureLibrary, LibraryConfig, RecognitionResult, Recognizer};
pub use point::Point;
pub use q_point_cloud_recognizer::QParameters;
