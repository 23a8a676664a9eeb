// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::net::Error;
use crate::EdgeId;

use super::model::{self, NetworkDescription};
use super::{ElementReader, Options};

/// Edge currently being read, between its start and end tags.
#[derive(Debug, Clone, Copy, PartialEq)]
enum OpenEdge {
    None,
    Skipped,
    Edge { id: EdgeId, length: Option<f32> },
}

/// Helper object used for storing state related to converting
/// [network elements](model::Element) into a [NetworkDescription].
pub(super) struct DescriptionBuilder<'a> {
    desc: NetworkDescription,
    options: &'a Options,
    open: OpenEdge,
    seen: HashSet<EdgeId>,
    connection_count: usize,
}

impl<'a> DescriptionBuilder<'a> {
    /// Create a new, empty description builder.
    pub(super) fn new(options: &'a Options) -> Self {
        Self {
            desc: NetworkDescription::default(),
            options,
            open: OpenEdge::None,
            seen: HashSet::default(),
            connection_count: 0,
        }
    }

    /// Add all elements from the provided [ElementReader] and return the
    /// resulting description.
    pub(super) fn build<R: ElementReader>(
        mut self,
        mut elements: R,
    ) -> Result<NetworkDescription, Error> {
        while let Some(e) = elements.next_element()? {
            self.add_element(e)?;
        }
        self.close_edge()?;

        log::info!(
            "read {} edges and {} connections",
            self.desc.edges.len(),
            self.connection_count,
        );
        Ok(self.desc)
    }

    fn add_element(&mut self, e: model::Element) -> Result<(), Error> {
        match e {
            model::Element::Edge(edge) => self.open_edge(edge),
            model::Element::Lane(length) => {
                self.add_lane(length);
                Ok(())
            }
            model::Element::EdgeEnd => self.close_edge(),
            model::Element::Connection(c) => {
                self.add_connection(c);
                Ok(())
            }
        }
    }

    fn open_edge(&mut self, edge: model::Edge) -> Result<(), Error> {
        // Edges can't be nested, but be lenient about a missing end tag
        self.close_edge()?;

        if !edge.is_normal() {
            self.open = OpenEdge::Skipped;
            return Ok(());
        }

        let id: EdgeId = match edge.id.parse() {
            Ok(id) => id,
            Err(e) => {
                log::warn!("skipping edge: {}", e);
                self.open = OpenEdge::Skipped;
                return Ok(());
            }
        };

        if !self.seen.insert(id) {
            return Err(Error::DuplicateEdge(id));
        }

        self.desc.edges.push(id);
        self.open = OpenEdge::Edge { id, length: None };
        Ok(())
    }

    fn add_lane(&mut self, lane_length: f32) {
        // Only the first lane determines the edge length
        if let OpenEdge::Edge {
            length: ref mut length @ None,
            ..
        } = self.open
        {
            *length = Some(lane_length);
        }
    }

    fn close_edge(&mut self) -> Result<(), Error> {
        match std::mem::replace(&mut self.open, OpenEdge::None) {
            OpenEdge::Edge {
                id,
                length: Some(length),
            } => {
                self.desc.lengths.insert(id, length);
                Ok(())
            }
            OpenEdge::Edge { id, length: None } => Err(Error::MissingLane(id)),
            OpenEdge::None | OpenEdge::Skipped => Ok(()),
        }
    }

    fn add_connection(&mut self, c: model::Connection) {
        // Connections of internal lanes have ids like ":J1_0" - skip them
        let (from, to) = match (c.from.parse::<EdgeId>(), c.to.parse::<EdgeId>()) {
            (Ok(from), Ok(to)) => (from, to),
            _ => {
                log::debug!("skipping connection {} -> {}", c.from, c.to);
                return;
            }
        };

        if !self.desc.connections.contains_key(&from) {
            self.desc.sources.push(from);
        }

        let successors = self.desc.connections.entry(from).or_default();
        if self.options.dedup_connections && successors.contains(&to) {
            return;
        }
        successors.push(to);
        self.connection_count += 1;
    }
}
