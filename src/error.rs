//! Error types returned by the optimizer.
//!
//! Validation and infeasibility are client-side problems; provider and
//! internal errors indicate the service could not produce an answer.

use std::fmt;

use crate::distance::ProviderError;

/// Input rejected before any search work was done.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The request has no stops.
    NoStops,
    /// Stop count outside the configured business limits.
    StopCount {
        count: usize,
        min: usize,
        max: Option<usize>,
    },
    /// A matrix needed by the request was not supplied.
    MissingMatrix { matrix: &'static str },
    /// Matrix row count differs from the node count.
    MatrixDimension {
        matrix: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A matrix row has the wrong length.
    MatrixNotSquare {
        matrix: &'static str,
        row: usize,
        len: usize,
    },
    /// A matrix entry is negative or not finite.
    InvalidMatrixEntry {
        matrix: &'static str,
        from: usize,
        to: usize,
        value: f64,
    },
    /// Stop demand is zero or negative.
    NonPositiveDemand { stop_id: String, demand: i32 },
    /// Vehicle capacity is zero or negative.
    NonPositiveCapacity(i32),
    /// Maximum route duration is zero or negative.
    NonPositiveMaxDuration(i32),
    /// Two stops share an identifier.
    DuplicateStopId(String),
    /// A stop has an empty identifier.
    EmptyStopId { index: usize },
    /// Time window bounds are inconsistent or only one bound is given.
    InvalidTimeWindow { stop_id: String },
    /// Coordinates out of range.
    InvalidLocation { id: String, lat: f64, lon: f64 },
    /// Service time is negative or not finite.
    InvalidServiceTime(f64),
}

impl ValidationError {
    /// Human-readable reason, suitable for a client-facing rejection.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoStops => write!(f, "at least one stop is required"),
            ValidationError::StopCount { count, min, max } => match max {
                Some(max) => write!(f, "{count} stops given, expected {min}..={max}"),
                None => write!(f, "{count} stops given, expected at least {min}"),
            },
            ValidationError::MissingMatrix { matrix } => write!(f, "{matrix} matrix is missing"),
            ValidationError::MatrixDimension {
                matrix,
                expected,
                actual,
            } => write!(
                f,
                "{matrix} matrix size ({actual}) doesn't match number of locations ({expected})"
            ),
            ValidationError::MatrixNotSquare { matrix, row, len } => {
                write!(f, "{matrix} matrix row {row} has {len} entries")
            }
            ValidationError::InvalidMatrixEntry {
                matrix,
                from,
                to,
                value,
            } => write!(f, "{matrix} matrix entry [{from}][{to}] is invalid: {value}"),
            ValidationError::NonPositiveDemand { stop_id, demand } => {
                write!(f, "stop {stop_id} has non-positive demand {demand}")
            }
            ValidationError::NonPositiveCapacity(c) => {
                write!(f, "vehicle capacity must be positive, got {c}")
            }
            ValidationError::NonPositiveMaxDuration(d) => {
                write!(f, "max duration must be positive, got {d} minutes")
            }
            ValidationError::DuplicateStopId(id) => write!(f, "duplicate stop id {id}"),
            ValidationError::EmptyStopId { index } => write!(f, "stop #{index} has an empty id"),
            ValidationError::InvalidTimeWindow { stop_id } => {
                write!(f, "stop {stop_id} has an invalid time window")
            }
            ValidationError::InvalidLocation { id, lat, lon } => {
                write!(f, "location of {id} out of range: ({lat}, {lon})")
            }
            ValidationError::InvalidServiceTime(t) => {
                write!(f, "service time must be a non-negative number, got {t}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Resource dimension whose bound was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Cumulative load exceeded the vehicle capacity.
    Load,
    /// Cumulative elapsed time exceeded the maximum route duration.
    Duration,
    /// Arrival after the latest time of a stop's window.
    TimeWindow,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Load => "capacity",
            Resource::Duration => "max duration",
            Resource::TimeWindow => "time window",
        };
        f.write_str(name)
    }
}

/// No feasible initial route could be constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct InfeasibleProblem {
    /// Id of the first stop that could not be placed.
    pub stop_id: String,
    /// Resource that blocked the placement.
    pub resource: Resource,
    /// Number of stops left unrouted.
    pub unplaced: usize,
}

impl InfeasibleProblem {
    /// Human-readable reason, suitable for a client-facing rejection.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InfeasibleProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no feasible route: stop {} cannot be placed without exceeding {} ({} stop(s) unplaced); \
             relax capacity or duration, or reduce the number of stops",
            self.stop_id, self.resource, self.unplaced
        )
    }
}

impl std::error::Error for InfeasibleProblem {}

/// Unexpected engine state. Always fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalError {
    /// Diagnostic context.
    pub context: String,
}

impl InternalError {
    /// Creates an internal error with the given context.
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "internal optimizer fault: {}", self.context)
    }
}

impl std::error::Error for InternalError {}

/// Any failure of an optimization request.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeError {
    Validation(ValidationError),
    Infeasible(InfeasibleProblem),
    Provider(ProviderError),
    Internal(InternalError),
}

impl OptimizeError {
    /// Returns `true` for errors caused by the request itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, OptimizeError::Validation(_) | OptimizeError::Infeasible(_))
    }
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeError::Validation(e) => write!(f, "invalid request: {e}"),
            OptimizeError::Infeasible(e) => e.fmt(f),
            OptimizeError::Provider(e) => e.fmt(f),
            OptimizeError::Internal(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for OptimizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptimizeError::Validation(e) => Some(e),
            OptimizeError::Infeasible(e) => Some(e),
            OptimizeError::Provider(e) => Some(e),
            OptimizeError::Internal(e) => Some(e),
        }
    }
}

impl From<ValidationError> for OptimizeError {
    fn from(e: ValidationError) -> Self {
        OptimizeError::Validation(e)
    }
}

impl From<InfeasibleProblem> for OptimizeError {
    fn from(e: InfeasibleProblem) -> Self {
        OptimizeError::Infeasible(e)
    }
}

impl From<ProviderError> for OptimizeError {
    fn from(e: ProviderError) -> Self {
        OptimizeError::Provider(e)
    }
}

impl From<InternalError> for OptimizeError {
    fn from(e: InternalError) -> Self {
        OptimizeError::Internal(e)
    }
}
