//! Directed track topology that the reservation layer is built on.
//!
//! This is the boundary to the track-infrastructure collaborator: nodes are
//! track endpoints, edges are track sections traversed in one direction.

use log::debug;
use smallvec::SmallVec;

use crate::model::*;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackSection {
    pub name: String,
    pub length: f64,
}

/// A track section traversed in one direction, from endpoint `from` to
/// endpoint `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiTrackEdge {
    pub track: TrackId,
    pub direction: Direction,
    pub from: TrackNodeId,
    pub to: TrackNodeId,
}

#[derive(Debug)]
pub struct DiTrackInfra {
    tracks: Vec<TrackSection>,
    track_names: NameMap<String>,
    num_nodes: usize,
    edges: Vec<DiTrackEdge>,
    outgoing: Vec<SmallVec<[DiTrackEdgeId; 2]>>,
    incoming: Vec<SmallVec<[DiTrackEdgeId; 2]>>,
}

impl DiTrackInfra {
    /// Builds the directed track graph, checking the name index against the
    /// track list and every edge against the track and node ranges.
    pub fn new(
        tracks: Vec<TrackSection>,
        track_names: NameMap<String>,
        num_nodes: usize,
        edges: Vec<DiTrackEdge>,
    ) -> Result<DiTrackInfra, ConstructionError> {
        for (name, id) in track_names.iter() {
            match tracks.get(*id) {
                Some(t) if t.name == *name => {}
                Some(t) => {
                    return Err(ConstructionError::TrackNameMismatch {
                        key: name.clone(),
                        found: t.name.clone(),
                    });
                }
                None => {
                    return Err(ConstructionError::UnknownTrackId {
                        key: name.clone(),
                        id: *id,
                    });
                }
            }
        }

        let mut outgoing: Vec<SmallVec<[DiTrackEdgeId; 2]>> = vec![SmallVec::new(); num_nodes];
        let mut incoming: Vec<SmallVec<[DiTrackEdgeId; 2]>> = vec![SmallVec::new(); num_nodes];
        for (i, e) in edges.iter().enumerate() {
            if e.track >= tracks.len() {
                return Err(ConstructionError::EdgeUnknownTrack { edge: i, track: e.track });
            }
            if e.from >= num_nodes || e.to >= num_nodes {
                return Err(ConstructionError::EdgeUnknownNode { edge: i });
            }
            outgoing[e.from].push(i);
            incoming[e.to].push(i);
        }

        debug!(
            "track graph: {} tracks, {} nodes, {} directed edges",
            tracks.len(),
            num_nodes,
            edges.len()
        );
        Ok(DiTrackInfra {
            tracks,
            track_names,
            num_nodes,
            edges,
            outgoing,
            incoming,
        })
    }

    pub fn track(&self, name: &str) -> Option<&TrackSection> {
        self.track_names.get(name).map(|i| &self.tracks[*i])
    }

    pub fn track_id(&self, name: &str) -> Option<TrackId> {
        self.track_names.get(name).cloned()
    }

    pub fn track_section(&self, id: TrackId) -> Option<&TrackSection> {
        self.tracks.get(id)
    }

    pub fn tracks(&self) -> &[TrackSection] {
        &self.tracks
    }

    pub fn edge(&self, id: DiTrackEdgeId) -> Option<&DiTrackEdge> {
        self.edges.get(id)
    }

    pub fn edges(&self) -> &[DiTrackEdge] {
        &self.edges
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Directed edges leaving a track endpoint. Empty for unknown endpoints.
    pub fn edges_from(&self, node: TrackNodeId) -> &[DiTrackEdgeId] {
        self.outgoing.get(node).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Directed edges arriving at a track endpoint.
    pub fn edges_into(&self, node: TrackNodeId) -> &[DiTrackEdgeId] {
        self.incoming.get(node).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
