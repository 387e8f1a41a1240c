// src/track/reader.rs
//! Single-pass GPX track decoder
//!
//! The input is scanned once by a small tokenizer that only knows about
//! opening tags, closing tags and the text in between. Every completed tag
//! is handed to an interpreter which looks at the tag-name prefix and
//! builds track points. No document tree is ever built.

use crate::geo::{Location, PathTime, Track, TrackPoint};
use crate::time::{epoch, parse_utc};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

const POINT_START_PREFIX: &str = "<trkp";
const POINT_END_PREFIX: &str = "</trkp";
const ELEVATION_END_PREFIX: &str = "</el";
const TIME_END_PREFIX: &str = "</ti";

const LATITUDE_ATTRIBUTE: &str = "<trkpt lat=\"";
const LONGITUDE_ATTRIBUTE: &str = " lon=\"";

const READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InOpeningTag,
    InClosingTag,
}

/// A completed tag, including its angle brackets.
#[derive(Debug, PartialEq)]
enum Tag<'a> {
    Opening(&'a str),
    /// `text` is everything between the previous tag and this one.
    Closing { tag: &'a str, text: &'a str },
}

#[derive(Debug)]
struct Tokenizer {
    state: ScanState,
    // A '<' was seen outside a tag; the next byte decides which kind of tag it opens.
    pending_open: bool,
    tag: Vec<u8>,
    text: Vec<u8>,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            state: ScanState::Outside,
            pending_open: false,
            tag: Vec::with_capacity(128),
            text: Vec::with_capacity(128),
        }
    }

    /// Scan `bytes`, calling `on_tag` once for every tag completed in them.
    /// Tags may span calls.
    fn scan<F>(&mut self, bytes: &[u8], mut on_tag: F)
    where
        F: FnMut(Tag<'_>),
    {
        for &byte in bytes {
            match self.state {
                ScanState::Outside => {
                    if self.pending_open {
                        self.pending_open = false;
                        self.tag.clear();
                        self.tag.push(b'<');
                        self.tag.push(byte);

                        if byte == b'/' {
                            self.state = ScanState::InClosingTag;
                        } else {
                            self.text.clear();
                            self.state = ScanState::InOpeningTag;
                        }
                    } else if byte == b'<' {
                        self.pending_open = true;
                    } else {
                        self.text.push(byte);
                    }
                }
                ScanState::InOpeningTag => {
                    self.tag.push(byte);
                    if byte == b'>' {
                        {
                            let tag = String::from_utf8_lossy(&self.tag);
                            on_tag(Tag::Opening(&tag));
                        }
                        self.tag.clear();
                        self.state = ScanState::Outside;
                    }
                }
                ScanState::InClosingTag => {
                    self.tag.push(byte);
                    if byte == b'>' {
                        {
                            let tag = String::from_utf8_lossy(&self.tag);
                            let text = String::from_utf8_lossy(&self.text);
                            on_tag(Tag::Closing {
                                tag: &tag,
                                text: &text,
                            });
                        }
                        self.tag.clear();
                        self.text.clear();
                        self.state = ScanState::Outside;
                    }
                }
            }
        }
    }
}

/// Turns completed tags into track points.
///
/// Field accumulators are not reset between points, a point without an
/// elevation or time child carries the previous point's value.
#[derive(Debug)]
struct Interpreter {
    in_point: bool,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    timestamp: PathTime,
    sequence: usize,
    points: Track,
}

impl Interpreter {
    fn new() -> Self {
        Self {
            in_point: false,
            latitude: 0.0,
            longitude: 0.0,
            elevation: 0.0,
            timestamp: epoch(),
            sequence: 0,
            points: Track::new(),
        }
    }

    /// Numeric fields must parse whole: `12.5m` or a missing `lon` gives 0.0
    /// instead of a numeric prefix or the previous point's value.
    fn handle(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Opening(tag) => {
                if tag.starts_with(POINT_START_PREFIX) {
                    self.in_point = true;
                    let (latitude, longitude) = parse_point_attributes(tag);
                    self.latitude = latitude.unwrap_or(0.0);
                    self.longitude = longitude.unwrap_or(0.0);
                }
            }
            Tag::Closing { tag, text } => {
                if self.in_point {
                    if tag.starts_with(TIME_END_PREFIX) {
                        self.timestamp = parse_utc(text).unwrap_or_else(|_| epoch());
                    } else if tag.starts_with(ELEVATION_END_PREFIX) {
                        self.elevation = text.trim().parse().unwrap_or(0.0);
                    }
                }

                if tag.starts_with(POINT_END_PREFIX) {
                    self.in_point = false;
                    self.points.push(TrackPoint::new(
                        Location::with_elevation(self.latitude, self.longitude, self.elevation),
                        self.timestamp,
                        self.sequence,
                    ));
                    self.sequence += 1;
                }
            }
        }
    }
}

/// Reads `lat` and `lon` from a tag of the exact form `<trkpt lat="…" lon="…"`.
fn parse_point_attributes(tag: &str) -> (Option<f64>, Option<f64>) {
    let Some(rest) = tag.strip_prefix(LATITUDE_ATTRIBUTE) else {
        return (None, None);
    };
    let Some((latitude, rest)) = rest.split_once('"') else {
        return (None, None);
    };

    let longitude = rest
        .strip_prefix(LONGITUDE_ATTRIBUTE)
        .and_then(|rest| rest.split_once('"'))
        .and_then(|(longitude, _)| longitude.trim().parse().ok());

    (latitude.trim().parse().ok(), longitude)
}

/// Incremental decoder, feed it bytes in any chunking and call `finish`.
#[derive(Debug)]
pub struct TrackDecoder {
    tokenizer: Tokenizer,
    interpreter: Interpreter,
}

impl TrackDecoder {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            interpreter: Interpreter::new(),
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        let Self {
            tokenizer,
            interpreter,
        } = self;
        tokenizer.scan(bytes, |tag| interpreter.handle(tag));
    }

    /// Number of points completed so far
    pub fn points_decoded(&self) -> usize {
        self.interpreter.points.len()
    }

    pub fn finish(self) -> Track {
        self.interpreter.points
    }
}

impl Default for TrackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode all track points from `reader`.
///
/// A read error ends the decode; the points completed before it are returned.
pub fn decode_track<R: Read>(reader: R) -> Track {
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, reader);
    let mut decoder = TrackDecoder::new();

    loop {
        let consumed = match reader.fill_buf() {
            Ok([]) => break,
            Ok(chunk) => {
                decoder.feed(chunk);
                chunk.len()
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Error reading track data after {} points: {}", decoder.points_decoded(), e);
                break;
            }
        };
        reader.consume(consumed);
    }

    decoder.finish()
}

/// Decode all track points from an in-memory document
pub fn decode_str(text: &str) -> Track {
    let mut decoder = TrackDecoder::new();
    decoder.feed(text.as_bytes());
    decoder.finish()
}

/// Load a track file. A file that cannot be opened gives an empty track.
pub fn load_track<P: AsRef<Path>>(path: P) -> Track {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Failed to open track file {}: {}", path.display(), e);
            return Track::new();
        }
    };

    let track = decode_track(file);
    debug!("Decoded {} points from {}", track.len(), path.display());
    track
}
