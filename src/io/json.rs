//! JSON record input and JSON-lines fragment output.
//!
//! Input is one array of records tagged by `kind`:
//!
//! ```json
//! [
//!   {"kind": "talus", "id": 1, "side": "LOW", "points": [{"x": 0.0, "y": 0.0}, {"x": 10.0, "y": 0.0}]},
//!   {"kind": "courbe", "id": 7, "layer": "PRINCIPALE", "points": [{"x": -5.0, "y": 2.0}, {"x": 15.0, "y": 2.0}]}
//! ]
//! ```
//!
//! Output is one object per line, carrying the fragment's source courbe, its
//! CAD layer name, and its points.

use std::io::{Read, Write};

use crate::dataset::Record;
use crate::geometry::Point2D;
use crate::ids::CourbeId;
use crate::trim::TrimmedCourbe;
use crate::trim_error::TrimError;

use super::CourbeSink;

/// Reads a JSON array of records.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, TrimError> {
    Ok(serde_json::from_reader(reader)?)
}

#[derive(serde::Serialize)]
struct FragmentLine<'a> {
    source: CourbeId,
    layer: &'static str,
    points: &'a [Point2D],
}

/// Writes each fragment as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CourbeSink for JsonLinesSink<W> {
    fn write_courbes(&mut self, fragments: &[TrimmedCourbe]) -> Result<(), TrimError> {
        for frag in fragments {
            let line = FragmentLine {
                source: frag.source,
                layer: frag.layer.cad_layer_name(),
                points: frag.line.points(),
            };
            serde_json::to_writer(&mut self.writer, &line)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
