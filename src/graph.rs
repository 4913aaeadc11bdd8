//! Route graph: a directed multigraph with oriented detectors as nodes and
//! reservation routes as edges. Parallel routes between the same ordered
//! pair of nodes are allowed; self-loops are not.

use std::collections::HashMap;

use log::debug;
use smallvec::SmallVec;

use crate::model::*;

#[derive(Debug)]
pub struct RouteGraph {
    nodes: Vec<DiDetector>,
    node_index: HashMap<DiDetector, usize>,
    routes: Vec<ReservationRoute>,
    outgoing: Vec<SmallVec<[RouteId; 2]>>,
    incoming: Vec<SmallVec<[RouteId; 2]>>,
}

impl RouteGraph {
    /// Builds the adjacency structure from a node list and a route list.
    /// Every route endpoint must be a declared node, and no route may
    /// connect an oriented detector to itself.
    pub fn new(
        nodes: Vec<DiDetector>,
        routes: Vec<ReservationRoute>,
    ) -> Result<RouteGraph, ConstructionError> {
        let mut node_index = HashMap::with_capacity(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            if node_index.insert(*n, i).is_some() {
                return Err(ConstructionError::DuplicateRouteNode {
                    detector: n.detector,
                    direction: n.direction,
                });
            }
        }

        let mut outgoing: Vec<SmallVec<[RouteId; 2]>> = vec![SmallVec::new(); nodes.len()];
        let mut incoming: Vec<SmallVec<[RouteId; 2]>> = vec![SmallVec::new(); nodes.len()];
        for (i, r) in routes.iter().enumerate() {
            if r.entry == r.exit {
                return Err(ConstructionError::SelfLoopRoute { route: r.name.clone() });
            }
            let from = lookup_node(&node_index, &r.name, r.entry)?;
            let to = lookup_node(&node_index, &r.name, r.exit)?;
            outgoing[from].push(i);
            incoming[to].push(i);
        }

        debug!("route graph: {} nodes, {} routes", nodes.len(), routes.len());
        Ok(RouteGraph {
            nodes,
            node_index,
            routes,
            outgoing,
            incoming,
        })
    }

    pub fn nodes(&self) -> &[DiDetector] {
        &self.nodes
    }

    pub fn routes(&self) -> &[ReservationRoute] {
        &self.routes
    }

    pub fn route(&self, id: RouteId) -> Option<&ReservationRoute> {
        self.routes.get(id)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn contains(&self, node: DiDetector) -> bool {
        self.node_index.contains_key(&node)
    }

    /// Routes leaving an oriented detector. Empty for non-nodes.
    pub fn routes_from(&self, node: DiDetector) -> &[RouteId] {
        self.node_index
            .get(&node)
            .map(|i| self.outgoing[*i].as_slice())
            .unwrap_or(&[])
    }

    /// Routes arriving at an oriented detector. Empty for non-nodes.
    pub fn routes_into(&self, node: DiDetector) -> &[RouteId] {
        self.node_index
            .get(&node)
            .map(|i| self.incoming[*i].as_slice())
            .unwrap_or(&[])
    }

    pub fn successors<'a>(&'a self, node: DiDetector) -> impl Iterator<Item = DiDetector> + 'a {
        self.routes_from(node).iter().map(move |r| self.routes[*r].exit)
    }

    pub fn predecessors<'a>(&'a self, node: DiDetector) -> impl Iterator<Item = DiDetector> + 'a {
        self.routes_into(node).iter().map(move |r| self.routes[*r].entry)
    }
}

fn lookup_node(
    index: &HashMap<DiDetector, usize>,
    route: &str,
    endpoint: DiDetector,
) -> Result<usize, ConstructionError> {
    index
        .get(&endpoint)
        .cloned()
        .ok_or_else(|| ConstructionError::UnknownRouteEndpoint {
            route: route.to_string(),
            detector: endpoint.detector,
            direction: endpoint.direction,
        })
}
