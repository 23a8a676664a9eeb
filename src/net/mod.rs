// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Reading [SUMO road networks](https://sumo.dlr.de/docs/Networks/SUMO_Road_Networks.html).

mod error;
mod reader;

pub use error::Error;
pub use reader::{
    load_graph_from_buffer, load_graph_from_file, load_graph_from_io,
    read_description_from_buffer, read_description_from_file, read_description_from_io,
    FileFormat, NetworkDescription, Options,
};
