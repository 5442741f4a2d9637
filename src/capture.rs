/*
 * Copyright (c) Ferran Pujol Camins. All rights reserved.
 *
 * This software is distributed under the "New BSD License" agreement.
 * The full license text is reproduced in the recognizer sources of this crate.
 */
use crate::{
    area::{LimitType, StrokePhase},
    geometry::{self, Rect},
    gesture::{Gesture, MIN_POINTS},
    library::{GestureLibrary, RecognitionResult, Recognizer},
    point::Point,
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CaptureConfig {
    /// When false every input operation is ignored.
    pub enabled: bool,
    /// How drawing is limited to `area`.
    pub limit: LimitType,
    /// Screen-space drawing area. Ignored for [`LimitType::Unlimited`].
    pub area: Rect,
    /// A new point is only registered if it is further than this from the last one.
    pub min_point_distance: f32,
    /// Points needed before a gesture is handed to the recognizer. Never less than 3.
    pub min_points_to_recognize: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: LimitType::Unlimited,
            area: Rect::default(),
            min_point_distance: 10.0,
            min_points_to_recognize: MIN_POINTS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    CapturingStroke,
    /// The gesture is being matched; only observable while the recognizer runs.
    Recognizing,
    /// A result was produced. The points stay until the next stroke or a clear.
    Recognized,
}

/// Raw input, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerDrag { x: f32, y: f32 },
    RecognizeTrigger,
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Gesture, &RecognitionResult)>;

/// Accumulates pointer input into strokes and hands finished gestures to a recognizer.
pub struct GestureCapture<R = GestureLibrary> {
    config: CaptureConfig,
    recognizer: R,
    state: CaptureState,
    current_stroke_id: Option<i32>,
    last_point: Option<Point>,
    points: Vec<Point>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<R: Recognizer> GestureCapture<R> {
    pub fn new(config: CaptureConfig, recognizer: R) -> Self {
        Self {
            config,
            recognizer,
            state: CaptureState::Idle,
            current_stroke_id: None,
            last_point: None,
            points: Vec::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Swaps the configuration. Points already captured are kept as they are.
    pub fn set_config(&mut self, config: CaptureConfig) {
        self.config = config;
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut R {
        &mut self.recognizer
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_recognized(&self) -> bool {
        self.state == CaptureState::Recognized
    }

    pub fn current_stroke_id(&self) -> Option<i32> {
        self.current_stroke_id
    }

    /// Every accepted point of the current gesture, in capture order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Accepted points grouped by stroke, for drawing.
    pub fn strokes(&self) -> impl Iterator<Item = &[Point]> {
        self.points.chunk_by(|a, b| a.stroke_id == b.stroke_id)
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes().count()
    }

    /// Registers a callback fired with every gesture that gets recognized.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Gesture, &RecognitionResult) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.begin_stroke(x, y);
            }
            InputEvent::PointerDrag { x, y } => {
                self.append_point(x, y);
            }
            InputEvent::RecognizeTrigger => {
                self.recognize();
            }
            InputEvent::Clear => self.clear_gesture(),
        }
    }

    /// Starts a new stroke at (x, y). Returns false if the area policy rejected the start point.
    pub fn begin_stroke(&mut self, x: f32, y: f32) -> bool {
        if !self.config.enabled {
            return false;
        }
        let Some(point) = self
            .config
            .limit
            .evaluate(Point::new(x, y, 0), &self.config.area, StrokePhase::Start)
        else {
            return false;
        };

        if self.state == CaptureState::Recognized {
            self.clear_gesture();
        }

        let stroke_id = self.current_stroke_id.map_or(0, |id| id + 1);
        trace!(stroke_id, "stroke started");
        self.current_stroke_id = Some(stroke_id);
        self.state = CaptureState::CapturingStroke;
        self.register(point.with_stroke(stroke_id));
        true
    }

    /// Adds a point to the open stroke. Returns false if the point was dropped,
    /// either by the area policy or because it is too close to the previous one.
    pub fn append_point(&mut self, x: f32, y: f32) -> bool {
        if !self.config.enabled || self.state != CaptureState::CapturingStroke {
            return false;
        }
        let Some(stroke_id) = self.current_stroke_id else {
            return false;
        };
        let Some(point) = self
            .config
            .limit
            .evaluate(Point::new(x, y, stroke_id), &self.config.area, StrokePhase::Continue)
        else {
            return false;
        };

        if let Some(last) = &self.last_point {
            if geometry::euclidean_distance(last, &point) <= self.config.min_point_distance {
                return false;
            }
        }
        self.register(point.with_stroke(stroke_id));
        true
    }

    /// Matches the captured strokes and notifies observers.
    /// Does nothing and returns `None` without an open stroke or with too few points.
    pub fn recognize(&mut self) -> Option<RecognitionResult> {
        let min_points = self.config.min_points_to_recognize.max(MIN_POINTS);
        if !self.config.enabled || self.state != CaptureState::CapturingStroke || self.points.len() < min_points {
            return None;
        }

        self.state = CaptureState::Recognizing;
        let gesture = Gesture::new(self.points.clone(), "");
        let result = match self.recognizer.recognize(&gesture) {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, points = gesture.len(), "gesture recognition failed");
                self.state = CaptureState::CapturingStroke;
                return None;
            }
        };
        self.state = CaptureState::Recognized;
        debug!(
            name = result.name.as_deref(),
            score = result.score,
            strokes = gesture.stroke_count(),
            "gesture recognized"
        );

        for (_, observer) in &mut self.observers {
            observer(&gesture, &result);
        }
        Some(result)
    }

    /// Drops every stroke and returns to idle. Calling it again changes nothing.
    pub fn clear_gesture(&mut self) {
        if self.state != CaptureState::Idle {
            debug!(points = self.points.len(), "gesture cleared");
        }
        self.state = CaptureState::Idle;
        self.current_stroke_id = None;
        self.last_point = None;
        self.points.clear();
    }

    fn register(&mut self, point: Point) {
        self.points.push(point);
        self.last_point = Some(point);
    }
}
