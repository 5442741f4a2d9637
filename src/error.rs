/*
 * Copyright (c) Ferran Pujol Camins. All rights reserved.
 *
 * This software is distributed under the "New BSD License" agreement.
 * The full license text is reproduced in the recognizer sources of this crate.
 */
use thiserror::Error;

/// Errors reported by the recognizers.
///
/// Noisy input coming through the capture controller never produces one of
/// these; they signal a caller handing the matcher something it cannot score.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GestureError {
    #[error("gesture has {points} points, at least {minimum} are required")]
    InvalidInput { points: usize, minimum: usize },
}
