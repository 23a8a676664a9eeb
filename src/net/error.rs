// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use crate::{ConsistencyError, EdgeId};

/// Error conditions which may occur when reading a network description.
///
/// All of them are fatal - no partial description or graph is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed xml attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("<{element}> has an invalid {attribute} attribute: {value:?}")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("<{element}> is missing the {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("edge {0} has no lanes")]
    MissingLane(EdgeId),

    #[error("edge {0} is declared more than once")]
    DuplicateEdge(EdgeId),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}
