// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;
use std::str::from_utf8;

use super::model;
use crate::net::Error;

/// Parser is a trait for objects which can parse XML.
///
/// This trait only exists to fix the mismatch of
/// [quick_xml::Reader::read_event] when working on buffered data
/// and [quick_xml::Reader::read_event_into] when working on IO.
pub(super) trait Parser {
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<quick_xml::events::Event<'a>>;
}

/// IoParser implements [Parser] over an [std::io::BufRead].
pub(super) struct IoParser<R: io::BufRead>(quick_xml::Reader<R>, Vec<u8>);

impl<R: io::BufRead> IoParser<R> {
    #[inline]
    fn new(reader: R) -> Self {
        Self(quick_xml::Reader::from_reader(reader), Vec::default())
    }
}

impl<R: io::BufRead> Parser for IoParser<R> {
    #[inline]
    fn read_event<'a>(&'a mut self) -> quick_xml::Result<quick_xml::events::Event<'a>> {
        self.1.clear();
        self.0.read_event_into(&mut self.1)
    }
}

/// BufParser implements [Parser] over a slice of bytes (`&[u8]`).
pub(super) struct BufParser<'a>(quick_xml::Reader<&'a [u8]>);

impl<'a> BufParser<'a> {
    #[inline]
    fn new(data: &'a [u8]) -> Self {
        Self(quick_xml::Reader::from_reader(data))
    }
}

impl<'a> Parser for BufParser<'a> {
    #[inline]
    fn read_event<'b>(&'b mut self) -> quick_xml::Result<quick_xml::events::Event<'b>> {
        self.0.read_event()
    }
}

/// Reader streams routing-relevant [Elements](model::Element)
/// from a SUMO network XML file.
pub(super) struct Reader<P: Parser> {
    parser: P,
    pending: Option<model::Element>,
    eof: bool,
}

impl<P: Parser> Reader<P> {
    #[inline]
    fn new(parser: P) -> Self {
        Self {
            parser,
            pending: None,
            eof: false,
        }
    }
}

impl<P: Parser> Iterator for Reader<P> {
    type Item = Result<model::Element, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending.take() {
            return Some(Ok(e));
        }

        while !self.eof {
            let event = match self.parser.read_event() {
                Ok(e) => e,
                Err(e) => {
                    self.eof = true;
                    return Some(Err(e.into()));
                }
            };

            let element = match event {
                quick_xml::events::Event::Start(start) => parse_element(&start),

                quick_xml::events::Event::Empty(start) => {
                    let element = parse_element(&start);
                    // A self-closing edge has no lanes, but it still needs to be closed
                    if let Some(Ok(model::Element::Edge(_))) = element {
                        self.pending = Some(model::Element::EdgeEnd);
                    }
                    element
                }

                quick_xml::events::Event::End(end) => match end.local_name().as_ref() {
                    b"edge" => Some(Ok(model::Element::EdgeEnd)),
                    _ => None,
                },

                quick_xml::events::Event::Eof => {
                    self.eof = true;
                    None
                }

                _ => None,
            };

            if element.is_some() {
                return element;
            }
        }

        None
    }
}

impl<'a> Reader<BufParser<'a>> {
    #[inline]
    pub(super) fn from_buffer(data: &'a [u8]) -> Self {
        Self::new(BufParser::new(data))
    }
}

impl<R: io::BufRead> Reader<IoParser<R>> {
    #[inline]
    pub(super) fn from_io(reader: R) -> Self {
        Self::new(IoParser::new(reader))
    }
}

fn parse_element(start: &quick_xml::events::BytesStart<'_>) -> Option<Result<model::Element, Error>> {
    match start.local_name().as_ref() {
        b"edge" => Some(parse_edge(start).map(model::Element::Edge)),
        b"lane" => Some(parse_lane(start).map(model::Element::Lane)),
        b"connection" => Some(parse_connection(start).map(model::Element::Connection)),
        _ => None,
    }
}

fn attribute_str(
    element: &'static str,
    attribute: &'static str,
    value: &[u8],
) -> Result<String, Error> {
    from_utf8(value)
        .map(str::to_string)
        .map_err(|_| Error::InvalidAttribute {
            element,
            attribute,
            value: String::from_utf8_lossy(value).into_owned(),
        })
}

fn parse_edge(start: &quick_xml::events::BytesStart<'_>) -> Result<model::Edge, Error> {
    let mut id = None;
    let mut function = None;

    for attr in start.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"id" => id = Some(attribute_str("edge", "id", &attr.value)?),
            b"function" => function = Some(attribute_str("edge", "function", &attr.value)?),
            _ => {}
        }
    }

    match id {
        Some(id) => Ok(model::Edge { id, function }),
        None => Err(Error::MissingAttribute {
            element: "edge",
            attribute: "id",
        }),
    }
}

fn parse_lane(start: &quick_xml::events::BytesStart<'_>) -> Result<f32, Error> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"length" {
            let value = attribute_str("lane", "length", &attr.value)?;
            return match value.parse::<f32>() {
                Ok(length) if length.is_finite() && length >= 0.0 => Ok(length),
                _ => Err(Error::InvalidAttribute {
                    element: "lane",
                    attribute: "length",
                    value,
                }),
            };
        }
    }

    Err(Error::MissingAttribute {
        element: "lane",
        attribute: "length",
    })
}

fn parse_connection(start: &quick_xml::events::BytesStart<'_>) -> Result<model::Connection, Error> {
    let mut from = None;
    let mut to = None;

    for attr in start.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"from" => from = Some(attribute_str("connection", "from", &attr.value)?),
            b"to" => to = Some(attribute_str("connection", "to", &attr.value)?),
            _ => {}
        }
    }

    match (from, to) {
        (Some(from), Some(to)) => Ok(model::Connection { from, to }),
        (None, _) => Err(Error::MissingAttribute {
            element: "connection",
            attribute: "from",
        }),
        (_, None) => Err(Error::MissingAttribute {
            element: "connection",
            attribute: "to",
        }),
    }
}
