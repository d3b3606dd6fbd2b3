// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Cells: the tagged sum of the two grids' native shapes, plus the shared
//! `(face, resolution, location)` header and the textual wire format.

use crate::error::{DggsError, Result};

/// Maximum total length of a serialised cell ID, characters (§3/§6).
pub const MAX_CELL_ID_LENGTH: usize = 42;

/// Maximum resolution accepted when creating a cell from a face coordinate
/// or parsing an ID string (§4.6). Bounded by the single base-36 resolution
/// digit in the wire format (§3, §6): digits `0`-`9` then `a`-`z` cover
/// 0-35, so 35 is the highest resolution that digit can carry.
pub const MAX_RESOLUTION: u8 = 35;

/// Whether a triangle points "up" (standard) or is flipped (rotated), or
/// whether a hexagon is pointy-top (standard) or flat-top (rotated).
/// Alternates with resolution for both grids (§3, §4.3, §4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Standard,
    Rotated,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Standard => Orientation::Rotated,
            Orientation::Rotated => Orientation::Standard,
        }
    }

    /// Triangle orientation at a given resolution: upright at 0, inverted
    /// at 1, upright at 2, ... (§4.3).
    pub fn for_triangle_resolution(resolution: u8) -> Self {
        if resolution % 2 == 0 {
            Orientation::Standard
        } else {
            Orientation::Rotated
        }
    }

    /// Hexagon orientation at a given resolution: standard (pointy-top)
    /// for odd resolutions, rotated (flat-top) for even (§4.4).
    pub fn for_hexagon_resolution(resolution: u8) -> Self {
        if resolution % 2 == 1 {
            Orientation::Standard
        } else {
            Orientation::Rotated
        }
    }
}

/// Where a cell or a single-cell result sits relative to face boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// Entirely within the interior of one face.
    Interior,
    /// On the shared edge between two faces.
    Edge,
    /// At a vertex shared by many faces.
    Vertex,
    /// No meaningful location (e.g. a cell not obtained from a point).
    NotApplicable,
}

/// The grid-specific payload of a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellShape {
    /// ISEA4T: a base-4 digit path from the face root, plus the
    /// orientation accumulated by descending it.
    Triangle {
        digits: Vec<u8>,
        orientation: Orientation,
    },
    /// ISEA3H: an offset (row, column) pair. Resolution 0 is always
    /// `row == column == 0`.
    Offset { row: i64, column: i64 },
}

/// A cell: shared header plus grid-specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub face: u8,
    pub resolution: u8,
    pub location: Location,
    pub shape: CellShape,
}

impl Cell {
    pub fn triangle(face: u8, digits: Vec<u8>, location: Location) -> Self {
        let resolution = digits.len() as u8;
        let orientation = digits.iter().fold(Orientation::Standard, |o, &d| {
            if d == 0 {
                o.flip()
            } else {
                o
            }
        });
        Cell {
            face,
            resolution,
            location,
            shape: CellShape::Triangle { digits, orientation },
        }
    }

    pub fn offset(face: u8, resolution: u8, row: i64, column: i64, location: Location) -> Self {
        Cell {
            face,
            resolution,
            location,
            shape: CellShape::Offset { row, column },
        }
    }

    /// Serialises to the textual wire format `FF` + base-36 resolution
    /// digit + payload (§3, §6).
    pub fn to_id_string(&self) -> Result<String> {
        if self.face > 19 {
            return Err(DggsError::model(format!("face index {} out of range", self.face)));
        }
        let resolution_digit = resolution_to_base36(self.resolution)?;
        let payload = match &self.shape {
            CellShape::Triangle { digits, .. } => {
                digits.iter().map(|d| (b'0' + d) as char).collect::<String>()
            }
            CellShape::Offset { row, column } => format!("{row},{column}"),
        };
        let id = format!("{:02}{}{}", self.face, resolution_digit, payload);
        if id.len() > MAX_CELL_ID_LENGTH {
            return Err(DggsError::CellIdTooLong {
                actual: id.len(),
                max: MAX_CELL_ID_LENGTH,
            });
        }
        Ok(id)
    }

    /// Parses a triangle (ISEA4T) cell ID.
    pub fn parse_triangle(id: &str, location: Location) -> Result<Self> {
        let (face, resolution, payload) = split_id(id)?;
        if payload.len() != resolution as usize {
            return Err(DggsError::model(format!(
                "triangle cell id payload length {} does not match resolution {}",
                payload.len(),
                resolution
            )));
        }
        let mut digits = Vec::with_capacity(payload.len());
        for c in payload.chars() {
            let d = c
                .to_digit(4)
                .ok_or_else(|| DggsError::model(format!("invalid triangle digit '{c}' in cell id")))?;
            digits.push(d as u8);
        }
        Ok(Cell::triangle(face, digits, location))
    }

    /// Parses a hexagon (ISEA3H) cell ID.
    pub fn parse_offset(id: &str, location: Location) -> Result<Self> {
        let (face, resolution, payload) = split_id(id)?;
        let (row_str, col_str) = payload
            .split_once(',')
            .ok_or_else(|| DggsError::model(format!("hexagon cell id '{id}' missing ',' separator")))?;
        let row: i64 = row_str
            .parse()
            .map_err(|_| DggsError::model(format!("invalid row '{row_str}' in cell id")))?;
        let column: i64 = col_str
            .parse()
            .map_err(|_| DggsError::model(format!("invalid column '{col_str}' in cell id")))?;
        Ok(Cell::offset(face, resolution, row, column, location))
    }
}

fn resolution_to_base36(resolution: u8) -> Result<char> {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    ALPHABET
        .get(resolution as usize)
        .map(|&b| b as char)
        .ok_or_else(|| {
            DggsError::model(format!(
                "resolution {resolution} cannot be represented by a single base-36 digit"
            ))
        })
}

fn base36_to_resolution(c: char) -> Result<u8> {
    c.to_digit(36)
        .map(|d| d as u8)
        .ok_or_else(|| DggsError::model(format!("invalid resolution digit '{c}' in cell id")))
}

fn split_id(id: &str) -> Result<(u8, u8, &str)> {
    if id.len() > MAX_CELL_ID_LENGTH {
        return Err(DggsError::CellIdTooLong {
            actual: id.len(),
            max: MAX_CELL_ID_LENGTH,
        });
    }
    if id.len() < 3 {
        return Err(DggsError::model(format!("cell id '{id}' too short")));
    }
    let face: u8 = id[0..2]
        .parse()
        .map_err(|_| DggsError::model(format!("invalid face index in cell id '{id}'")))?;
    if face > 19 {
        return Err(DggsError::model(format!("face index {face} out of range")));
    }
    let resolution_char = id[2..3].chars().next().expect("checked length above");
    let resolution = base36_to_resolution(resolution_char)?;
    if resolution > MAX_RESOLUTION {
        return Err(DggsError::model(format!(
            "resolution {resolution} exceeds maximum of {MAX_RESOLUTION}"
        )));
    }
    Ok((face, resolution, &id[3..]))
}
