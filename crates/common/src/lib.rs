//! Core library for the route pulse display.
//!
//! This crate holds everything the route display needs apart from the host
//! surface itself: the geographic data model and projection, the path builder
//! that turns a route into screen geometry, the looping pulse animator, the
//! viewport-change observer, the directions seam, plus configuration, error
//! handling and telemetry shared by the binaries.

// Geographic data model and projection onto the view
pub mod map;
pub use map::{CoordinateSpan, GeoCoordinate, MercatorProjection, Projection, ScreenPoint, Viewport};

// Route to screen path conversion
pub mod path;
pub use path::{build_path, Path, StrokeStyle};

// Timing curves for the stroke phases
pub mod timing;
pub use timing::TimingCurve;

// Looping two-phase stroke animation
pub mod animator;
pub use animator::{AnimatorState, PhaseKind, PulseAnimator, StrokeFrame};

// Viewport-change polling
pub mod viewport;
pub use viewport::ViewportObserver;

// Route lookup between two coordinates
pub mod directions;
pub use directions::{DirectionsProvider, DirectionsRequest, GreatCircleDirections, Route};

// Configuration management
pub mod config;
pub use config::Config;

// Error handling types
pub mod error;
pub use error::{PulseError, Result};

// Telemetry and observability
pub mod telemetry;

pub use telemetry::{init_tracing, LogFormat};
