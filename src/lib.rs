//! Reservation-layer view of a railway infrastructure: detectors, their
//! oriented projections, detection sections, and the directed multigraph of
//! reservation routes, layered on a directed track topology.
//!
//! The whole structure is assembled once by a loading collaborator,
//! validated during construction, and is read-only afterwards; see
//! `reservation::ReservationInfra`.

pub mod graph;
pub mod model;
pub mod reservation;
pub mod tracks;
