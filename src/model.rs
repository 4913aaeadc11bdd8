use std::collections::HashMap;
use std::fmt;

use failure_derive::Fail;

/// Index into `ReservationInfra::detectors`.
pub type DetectorId = usize;
/// Index into `ReservationInfra::sections`.
pub type SectionId = usize;
/// Index into `RouteGraph::routes`.
pub type RouteId = usize;
/// Index into `DiTrackInfra::tracks`.
pub type TrackId = usize;
/// A track endpoint in the directed track graph.
pub type TrackNodeId = usize;
/// Index into `DiTrackInfra::edges`.
pub type DiTrackEdgeId = usize;

pub type NameMap<Ref> = HashMap<Ref, usize>;

use smallvec::SmallVec;

/// Direction of travel along a track, in track coordinate order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

pub const DIRECTIONS: [Direction; 2] = [Direction::Forward, Direction::Backward];

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Stable slot for 2-element per-detector arrays.
    pub fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// A physical sensing point on a track, bounding occupancy zones.
#[derive(Debug, Clone, PartialEq)]
pub struct Detector {
    pub name: String,
    pub track: TrackId,
    pub position: f64,
}

/// A detector paired with a direction of travel. The node unit of the
/// route graph; every detector has exactly two of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiDetector {
    pub detector: DetectorId,
    pub direction: Direction,
}

impl DiDetector {
    pub fn new(detector: DetectorId, direction: Direction) -> DiDetector {
        DiDetector { detector, direction }
    }
}

/// A track-circuit-like occupancy zone, bounded by oriented detectors.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSection {
    pub name: String,
    pub detectors: SmallVec<[DiDetector; 4]>,
}

/// An atomic lockable path segment between two oriented detectors, the
/// unit reserved by a movement authority engine. `track_path` lists the
/// directed track edges the route covers, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRoute {
    pub name: String,
    pub entry: DiDetector,
    pub exit: DiDetector,
    pub track_path: SmallVec<[DiTrackEdgeId; 4]>,
    pub length: f64,
}

/// Fatal load-time error. Lookup misses are not errors; they are `None`.
#[derive(Debug, Fail, PartialEq)]
pub enum ConstructionError {
    #[fail(display = "track name index entry {} points to track named {}", key, found)]
    TrackNameMismatch { key: String, found: String },
    #[fail(display = "track name index entry {} points to unknown track id {}", key, id)]
    UnknownTrackId { key: String, id: TrackId },
    #[fail(display = "directed track edge {} refers to unknown track {}", edge, track)]
    EdgeUnknownTrack { edge: DiTrackEdgeId, track: TrackId },
    #[fail(display = "directed track edge {} has an endpoint outside the node range", edge)]
    EdgeUnknownNode { edge: DiTrackEdgeId },

    #[fail(display = "detector name index entry {} points to detector named {}", key, found)]
    DetectorNameMismatch { key: String, found: String },
    #[fail(display = "detector name index entry {} points to unknown detector id {}", key, id)]
    UnknownDetectorId { key: String, id: DetectorId },
    #[fail(display = "detector {} placed on unknown track {}", detector, track)]
    DetectorUnknownTrack { detector: String, track: TrackId },
    #[fail(display = "detector {} at {} is outside its track of length {}", detector, position, length)]
    DetectorOutOfRange { detector: String, position: f64, length: f64 },

    #[fail(display = "oriented detector index has {} entries for {} detectors", entries, detectors)]
    DiDetectorCount { entries: usize, detectors: usize },
    #[fail(display = "missing {} oriented detector for {}", direction, detector)]
    MissingDiDetector { detector: String, direction: Direction },
    #[fail(display = "{} oriented detector entry for {} points to another detector", direction, detector)]
    DiDetectorMismatch { detector: String, direction: Direction },

    #[fail(display = "section {} bounded by unknown detector id {}", section, detector)]
    SectionUnknownDetector { section: String, detector: DetectorId },
    #[fail(display = "section index entry for detector {} ({}) points to unknown detector", detector, direction)]
    SectionMapUnknownDetector { detector: DetectorId, direction: Direction },
    #[fail(display = "section index entry for detector {} ({}) points to unknown section id {}", detector, direction, section)]
    SectionOutOfRange { detector: DetectorId, direction: Direction, section: SectionId },
    #[fail(display = "route graph node {} ({}) has no detection section", detector, direction)]
    MissingSection { detector: String, direction: Direction },

    #[fail(display = "route {} enters and exits at the same oriented detector", route)]
    SelfLoopRoute { route: String },
    #[fail(display = "route {} endpoint (detector {}, {}) is not a route graph node", route, detector, direction)]
    UnknownRouteEndpoint { route: String, detector: DetectorId, direction: Direction },
    #[fail(display = "duplicate route graph node (detector {}, {})", detector, direction)]
    DuplicateRouteNode { detector: DetectorId, direction: Direction },
    #[fail(display = "route graph node refers to unknown detector id {}", detector)]
    RouteUnknownDetector { detector: DetectorId },
    #[fail(display = "route {} covers unknown directed track edge {}", route, edge)]
    RouteUnknownTrackEdge { route: String, edge: DiTrackEdgeId },
}
