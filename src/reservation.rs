//! The reservation-layer infrastructure composite: four cross-checked
//! indexes over a shared detector set, plus the route graph, layered by
//! composition on the directed track infrastructure.
//!
//! Built once at load time from pre-assembled parts, immutable after.
//! Construction validates the indexes against each other and fails with a
//! `ConstructionError` naming the first offending entity; no partially
//! constructed value is ever observable.

use std::collections::HashMap;

use log::{debug, info};

use crate::graph::RouteGraph;
use crate::model::*;
use crate::tracks::{DiTrackEdge, DiTrackInfra};

#[derive(Debug)]
pub struct ReservationInfra {
    tracks: DiTrackInfra,
    detectors: Vec<Detector>,
    detector_names: NameMap<String>,
    di_detectors: Vec<[DiDetector; 2]>,
    sections: Vec<DetectionSection>,
    section_map: HashMap<DiDetector, SectionId>,
    route_graph: RouteGraph,
}

impl ReservationInfra {
    /// Composes an infrastructure from its parts.
    ///
    /// The loading collaborator builds the parts; this constructor does not
    /// derive any index, it only checks them against each other:
    ///
    /// * every detector-name entry resolves to the detector carrying that
    ///   name, and every detector sits within its track;
    /// * the oriented index holds both directions of every detector;
    /// * every route graph node has a detection section (the converse is
    ///   not required: detectors outside the route graph have none);
    /// * every route's track path refers to directed track edges that
    ///   exist in the underlying track graph.
    ///
    /// Self-loops and unknown route endpoints were already rejected by
    /// `RouteGraph::new`.
    pub fn new(
        tracks: DiTrackInfra,
        detectors: Vec<Detector>,
        detector_names: NameMap<String>,
        di_detectors: Vec<[DiDetector; 2]>,
        sections: Vec<DetectionSection>,
        section_map: HashMap<DiDetector, SectionId>,
        route_graph: RouteGraph,
    ) -> Result<ReservationInfra, ConstructionError> {
        for (name, id) in detector_names.iter() {
            match detectors.get(*id) {
                Some(d) if d.name == *name => {}
                Some(d) => {
                    return Err(ConstructionError::DetectorNameMismatch {
                        key: name.clone(),
                        found: d.name.clone(),
                    });
                }
                None => {
                    return Err(ConstructionError::UnknownDetectorId {
                        key: name.clone(),
                        id: *id,
                    });
                }
            }
        }

        for d in detectors.iter() {
            let track = tracks.track_section(d.track).ok_or_else(|| {
                ConstructionError::DetectorUnknownTrack {
                    detector: d.name.clone(),
                    track: d.track,
                }
            })?;
            if !(d.position >= 0.0 && d.position <= track.length) {
                return Err(ConstructionError::DetectorOutOfRange {
                    detector: d.name.clone(),
                    position: d.position,
                    length: track.length,
                });
            }
        }
        debug!("detector index checked: {} detectors", detectors.len());

        if di_detectors.len() != detectors.len() {
            return Err(ConstructionError::DiDetectorCount {
                entries: di_detectors.len(),
                detectors: detectors.len(),
            });
        }
        for (id, slots) in di_detectors.iter().enumerate() {
            for dir in DIRECTIONS.iter() {
                let entry = slots[dir.index()];
                if entry.direction != *dir {
                    return Err(ConstructionError::MissingDiDetector {
                        detector: detectors[id].name.clone(),
                        direction: *dir,
                    });
                }
                if entry.detector != id {
                    return Err(ConstructionError::DiDetectorMismatch {
                        detector: detectors[id].name.clone(),
                        direction: *dir,
                    });
                }
            }
        }
        debug!("oriented detector index checked: {} entries", 2 * di_detectors.len());

        for s in sections.iter() {
            for di in s.detectors.iter() {
                if di.detector >= detectors.len() {
                    return Err(ConstructionError::SectionUnknownDetector {
                        section: s.name.clone(),
                        detector: di.detector,
                    });
                }
            }
        }
        for (di, sec) in section_map.iter() {
            if di.detector >= detectors.len() {
                return Err(ConstructionError::SectionMapUnknownDetector {
                    detector: di.detector,
                    direction: di.direction,
                });
            }
            if *sec >= sections.len() {
                return Err(ConstructionError::SectionOutOfRange {
                    detector: di.detector,
                    direction: di.direction,
                    section: *sec,
                });
            }
        }

        for n in route_graph.nodes() {
            if n.detector >= detectors.len() {
                return Err(ConstructionError::RouteUnknownDetector { detector: n.detector });
            }
            if !section_map.contains_key(n) {
                return Err(ConstructionError::MissingSection {
                    detector: detectors[n.detector].name.clone(),
                    direction: n.direction,
                });
            }
        }
        for r in route_graph.routes() {
            for e in r.track_path.iter() {
                if tracks.edge(*e).is_none() {
                    return Err(ConstructionError::RouteUnknownTrackEdge {
                        route: r.name.clone(),
                        edge: *e,
                    });
                }
            }
        }

        info!(
            "reservation infrastructure: {} detectors, {} sections, {} routes over {} tracks",
            detectors.len(),
            sections.len(),
            route_graph.num_routes(),
            tracks.tracks().len()
        );
        Ok(ReservationInfra {
            tracks,
            detectors,
            detector_names,
            di_detectors,
            sections,
            section_map,
            route_graph,
        })
    }

    pub fn detector_id(&self, name: &str) -> Option<DetectorId> {
        self.detector_names.get(name).cloned()
    }

    pub fn detector(&self, name: &str) -> Option<&Detector> {
        self.detector_id(name).map(|i| &self.detectors[i])
    }

    /// The oriented detector for a physical detector name and a direction.
    pub fn di_detector(&self, direction: Direction, name: &str) -> Option<DiDetector> {
        self.detector_id(name)
            .map(|i| self.di_detectors[i][direction.index()])
    }

    /// `None` is the normal outcome for oriented detectors outside the
    /// route graph, not an error.
    pub fn section_id(&self, di: DiDetector) -> Option<SectionId> {
        self.section_map.get(&di).cloned()
    }

    pub fn detection_section(&self, di: DiDetector) -> Option<&DetectionSection> {
        self.section_id(di).map(|i| &self.sections[i])
    }

    pub fn section(&self, id: SectionId) -> Option<&DetectionSection> {
        self.sections.get(id)
    }

    pub fn sections(&self) -> &[DetectionSection] {
        &self.sections
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    pub fn num_detectors(&self) -> usize {
        self.detectors.len()
    }

    pub fn route_graph(&self) -> &RouteGraph {
        &self.route_graph
    }

    /// The directed track layer this infrastructure is built on.
    pub fn tracks(&self) -> &DiTrackInfra {
        &self.tracks
    }

    /// The directed track edges a route covers, in traversal order.
    pub fn route_path<'a>(
        &'a self,
        route: RouteId,
    ) -> Option<impl Iterator<Item = &'a DiTrackEdge> + 'a> {
        let tracks = &self.tracks;
        self.route_graph
            .route(route)
            .map(move |r| r.track_path.iter().map(move |id| &tracks.edges()[*id]))
    }
}
