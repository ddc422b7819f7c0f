/// Failures of the geometric solvers.
///
/// Classifiers treat all of these as "no candidate" rather than aborting a
/// frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("too few points: need {needed}, got {got}")]
    TooFewPoints { needed: usize, got: usize },
    #[error("fitted conic is not an ellipse")]
    NotAnEllipse,
    #[error("degenerate configuration: {0}")]
    Degenerate(&'static str),
}
