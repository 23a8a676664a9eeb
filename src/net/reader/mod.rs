// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use builder::DescriptionBuilder;

use crate::net::Error;
use crate::RoadGraph;

mod builder;
pub(super) mod model;
mod xml;

pub use model::NetworkDescription;

/// Format of the input network file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    #[default]
    Unknown,

    /// Force uncompressed XML
    Xml,

    /// Force XML with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force XML with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format of a file from its first few bytes.
    /// Never returns [FileFormat::Unknown].
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            Self::XmlGz
        } else if prefix.starts_with(b"BZh") {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Additional controls for interpreting a network file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Network files list one connection per pair of lanes, so two edges joined
    /// by multiple lanes appear multiple times as successors. Set to `true` to only
    /// keep the first occurrence. This never changes route costs, but it does change
    /// the traversal order of [farthest_edge](crate::farthest_edge).
    pub dedup_connections: bool,
}

/// Internal trait for objects which can stream [network elements](model::Element)
/// from an underlying source.
trait ElementReader {
    fn next_element(&mut self) -> Result<Option<model::Element>, Error>;
}

impl<I: Iterator<Item = Result<model::Element, Error>>> ElementReader for I {
    #[inline]
    fn next_element(&mut self) -> Result<Option<model::Element>, Error> {
        self.next().transpose()
    }
}

/// Parse a network description from a reader as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn read_description_from_io<R: io::Read>(
    options: &Options,
    mut reader: R,
) -> Result<NetworkDescription, Error> {
    // Readers may return fewer bytes than requested, so keep reading
    // until the whole magic number is available (or the stream ends)
    let mut prefix = Vec::with_capacity(3);
    reader.by_ref().take(3).read_to_end(&mut prefix)?;

    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(&prefix),
        format => format,
    };

    let b = io::BufReader::new(io::Cursor::new(prefix).chain(reader));

    match format {
        FileFormat::Unknown | FileFormat::Xml => {
            DescriptionBuilder::new(options).build(xml::Reader::from_io(b))
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            let b = io::BufReader::new(d);
            DescriptionBuilder::new(options).build(xml::Reader::from_io(b))
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            let b = io::BufReader::new(d);
            DescriptionBuilder::new(options).build(xml::Reader::from_io(b))
        }
    }
}

/// Parse a network description from a file at the provided path as per the provided [Options].
pub fn read_description_from_file<P: AsRef<Path>>(
    options: &Options,
    path: P,
) -> Result<NetworkDescription, Error> {
    let f = File::open(path)?;
    read_description_from_io(options, f)
}

/// Parse a network description from a static buffer as per the provided [Options].
pub fn read_description_from_buffer(
    options: &Options,
    data: &[u8],
) -> Result<NetworkDescription, Error> {
    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(data),
        format => format,
    };

    if format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        DescriptionBuilder::new(options).build(xml::Reader::from_buffer(data))
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let cursor = io::Cursor::new(data);
        read_description_from_io(options, cursor)
    }
}

/// Parse and validate a [RoadGraph] from a reader, see [read_description_from_io].
pub fn load_graph_from_io<R: io::Read>(options: &Options, reader: R) -> Result<RoadGraph, Error> {
    let desc = read_description_from_io(options, reader)?;
    Ok(RoadGraph::from_description(desc)?)
}

/// Parse and validate a [RoadGraph] from a file, see [read_description_from_file].
pub fn load_graph_from_file<P: AsRef<Path>>(
    options: &Options,
    path: P,
) -> Result<RoadGraph, Error> {
    let desc = read_description_from_file(options, path)?;
    Ok(RoadGraph::from_description(desc)?)
}

/// Parse and validate a [RoadGraph] from a static buffer, see [read_description_from_buffer].
pub fn load_graph_from_buffer(options: &Options, data: &[u8]) -> Result<RoadGraph, Error> {
    let desc = read_description_from_buffer(options, data)?;
    Ok(RoadGraph::from_description(desc)?)
}
