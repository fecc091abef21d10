//! Numeric constants shared by the generation passes.

/// Maximum spacing between consecutive balls along a subdivided bone.
pub const DEFAULT_STEP_DISTANCE: f32 = 0.4;

/// Slack applied when comparing a bone length against the step distance.
///
/// Inbetween balls are placed by interpolation, so an evenly spaced chain
/// measures a hair above the step it was built with. Without the slack a
/// second subdivision round would split every segment again.
pub const STEP_EPSILON: f32 = 1e-4;

/// Squared length under which a direction or cross product is treated as zero.
pub const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// Default tolerance for hull plane-side tests.
pub const DEFAULT_HULL_EPSILON: f32 = 1e-5;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
