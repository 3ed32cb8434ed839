//! Serialization of region and border lists
//!
//! Line-oriented text format.
//!
//! # Format
//!
//! ```text
//! Sandfill RegionSet Version 1
//! Size = W x H; regions = N; borders = M
//! Region ID color = RRGGBBAA; pixels = K
//!   name = NAME
//!   color_name = NAME          (omitted when unset)
//!   pixels: x0,y0 x1,y1 ...
//! Border color = RRGGBBAA; shrink = S; pixels = K
//!   name = NAME
//!   pixels: x0,y0 x1,y1 ...
//! ```

use crate::error::{RegionError, RegionResult};
use crate::region::{BorderRegion, Region};
use sandfill_core::{Point, Rgba};
use std::io::{BufReader, BufWriter, Read, Write};
use std::iter::Peekable;
use std::path::Path;

/// Serialization format version
const REGION_SET_VERSION: u32 = 1;

/// Maximum input size in bytes.
const MAX_INPUT_SIZE: usize = 100_000_000;

/// Regions and borders of one segmented raster
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSet {
    /// Raster width
    pub width: u32,
    /// Raster height
    pub height: u32,
    /// Regions in id order
    pub regions: Vec<Region>,
    /// Remaining borders
    pub borders: Vec<BorderRegion>,
}

impl RegionSet {
    /// Bundle segmentation results.
    pub fn new(width: u32, height: u32, regions: Vec<Region>, borders: Vec<BorderRegion>) -> Self {
        Self {
            width,
            height,
            regions,
            borders,
        }
    }

    /// Read a RegionSet from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> RegionResult<Self> {
        let mut buf = Vec::new();
        reader
            .take((MAX_INPUT_SIZE + 1) as u64)
            .read_to_end(&mut buf)?;
        if buf.len() > MAX_INPUT_SIZE {
            return Err(RegionError::DecodeError(format!(
                "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read a RegionSet from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> RegionResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from_reader(&mut BufReader::new(file))
    }

    /// Read a RegionSet from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::DecodeError`] on malformed input.
    pub fn read_from_bytes(data: &[u8]) -> RegionResult<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| RegionError::DecodeError(format!("invalid UTF-8: {e}")))?;
        let mut lines = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .peekable();

        let header = next_line(&mut lines)?;
        let version: u32 = header
            .trim()
            .strip_prefix("Sandfill RegionSet Version ")
            .ok_or_else(|| decode_err(format!("invalid header: '{header}'")))
            .and_then(|v| parse_num(v, "version"))?;
        if version != REGION_SET_VERSION {
            return Err(decode_err(format!("unsupported version {version}")));
        }

        let size_line = next_line(&mut lines)?;
        let size = field(size_line, "Size")?;
        let (w, h) = size
            .split_once('x')
            .ok_or_else(|| decode_err(format!("invalid size: '{size}'")))?;
        let width: u32 = parse_num(w, "width")?;
        let height: u32 = parse_num(h, "height")?;
        let nregions: usize = parse_num(field(size_line, "regions")?, "region count")?;
        let nborders: usize = parse_num(field(size_line, "borders")?, "border count")?;

        let mut regions = Vec::with_capacity(nregions.min(1 << 16));
        for _ in 0..nregions {
            let head = next_line(&mut lines)?;
            let id: u32 = head
                .trim()
                .strip_prefix("Region ")
                .and_then(|rest| rest.split_whitespace().next())
                .ok_or_else(|| decode_err(format!("expected region, got '{head}'")))
                .and_then(|v| parse_num(v, "region id"))?;
            let color = parse_color(field(head, "color")?)?;
            let count: usize = parse_num(field(head, "pixels")?, "pixel count")?;
            let name = keyed_line(&mut lines, "name = ")?;
            let color_name = match lines.peek() {
                Some(l) if l.trim_start().starts_with("color_name = ") => {
                    Some(keyed_line(&mut lines, "color_name = ")?)
                }
                _ => None,
            };
            let pixels = parse_pixels(next_line(&mut lines)?, count)?;
            regions.push(Region {
                id,
                name,
                pixels,
                color,
                color_name,
            });
        }

        let mut borders = Vec::with_capacity(nborders.min(1 << 16));
        for _ in 0..nborders {
            let head = next_line(&mut lines)?;
            if !head.trim_start().starts_with("Border ") {
                return Err(decode_err(format!("expected border, got '{head}'")));
            }
            let color = parse_color(field(head, "color")?)?;
            let shrink_amount: f32 = parse_num(field(head, "shrink")?, "shrink")?;
            let count: usize = parse_num(field(head, "pixels")?, "pixel count")?;
            let name = keyed_line(&mut lines, "name = ")?;
            let pixels = parse_pixels(next_line(&mut lines)?, count)?;
            borders.push(BorderRegion {
                name,
                pixels,
                color,
                shrink_amount,
            });
        }

        Ok(Self::new(width, height, regions, borders))
    }

    /// Write a RegionSet to a writer.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EncodeError`] before writing anything if a name
    /// contains a line break.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> RegionResult<()> {
        self.check_names()?;
        writeln!(writer, "Sandfill RegionSet Version {REGION_SET_VERSION}")?;
        writeln!(
            writer,
            "Size = {} x {}; regions = {}; borders = {}",
            self.width,
            self.height,
            self.regions.len(),
            self.borders.len()
        )?;
        for region in &self.regions {
            writeln!(
                writer,
                "Region {} color = {:08x}; pixels = {}",
                region.id,
                region.color.to_pixel(),
                region.pixels.len()
            )?;
            writeln!(writer, "  name = {}", region.name)?;
            if let Some(name) = &region.color_name {
                writeln!(writer, "  color_name = {}", name)?;
            }
            write_pixels(writer, &region.pixels)?;
        }
        for border in &self.borders {
            writeln!(
                writer,
                "Border color = {:08x}; shrink = {}; pixels = {}",
                border.color.to_pixel(),
                border.shrink_amount,
                border.pixels.len()
            )?;
            writeln!(writer, "  name = {}", border.name)?;
            write_pixels(writer, &border.pixels)?;
        }
        Ok(())
    }

    /// Names are stored one per line, so line breaks cannot be represented.
    fn check_names(&self) -> RegionResult<()> {
        let region_names = self.regions.iter().flat_map(|r| {
            std::iter::once(("region", r.id, r.name.as_str()))
                .chain(r.color_name.as_deref().map(|n| ("color", r.id, n)))
        });
        let border_names = self
            .borders
            .iter()
            .enumerate()
            .map(|(i, b)| ("border", i as u32, b.name.as_str()));
        for (kind, index, name) in region_names.chain(border_names) {
            if name.contains(['\n', '\r']) {
                return Err(RegionError::EncodeError(format!(
                    "{kind} name of entry {index} contains a line break: {name:?}"
                )));
            }
        }
        Ok(())
    }

    /// Write a RegionSet to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> RegionResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a RegionSet to a byte vector.
    pub fn write_to_bytes(&self) -> RegionResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

// ============================================================================
// Internal helpers
// ============================================================================

fn decode_err(msg: String) -> RegionError {
    RegionError::DecodeError(msg)
}

fn next_line<'a>(lines: &mut impl Iterator<Item = &'a str>) -> RegionResult<&'a str> {
    lines
        .next()
        .ok_or_else(|| decode_err("unexpected end of input".to_string()))
}

/// Consume a line of the form `  KEY VALUE` and return the value.
fn keyed_line<'a, I: Iterator<Item = &'a str>>(
    lines: &mut Peekable<I>,
    key: &str,
) -> RegionResult<String> {
    let line = next_line(lines)?;
    line.trim_start()
        .strip_prefix(key)
        .map(str::to_string)
        .ok_or_else(|| decode_err(format!("expected '{}', got '{line}'", key.trim())))
}

/// Value of `key = value` up to the next `;`.
fn field<'a>(line: &'a str, key: &str) -> RegionResult<&'a str> {
    let pat = format!("{key} = ");
    let start = line
        .find(&pat)
        .ok_or_else(|| decode_err(format!("missing '{key}' in '{line}'")))?
        + pat.len();
    Ok(line[start..].split(';').next().unwrap_or("").trim())
}

fn parse_num<T: std::str::FromStr>(s: &str, what: &str) -> RegionResult<T> {
    s.trim()
        .parse()
        .map_err(|_| decode_err(format!("invalid {what}: '{s}'")))
}

fn parse_color(s: &str) -> RegionResult<Rgba> {
    u32::from_str_radix(s, 16)
        .map(Rgba::from_pixel)
        .map_err(|_| decode_err(format!("invalid color: '{s}'")))
}

fn parse_pixels(line: &str, count: usize) -> RegionResult<Vec<Point>> {
    let list = line
        .trim_start()
        .strip_prefix("pixels:")
        .ok_or_else(|| decode_err(format!("expected pixel list, got '{line}'")))?;
    let pixels = list
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| decode_err(format!("invalid pixel: '{pair}'")))?;
            Ok(Point::new(parse_num(x, "x")?, parse_num(y, "y")?))
        })
        .collect::<RegionResult<Vec<_>>>()?;
    if pixels.len() != count {
        return Err(decode_err(format!(
            "pixel count mismatch: header says {count}, found {}",
            pixels.len()
        )));
    }
    Ok(pixels)
}

fn write_pixels(writer: &mut impl Write, pixels: &[Point]) -> RegionResult<()> {
    write!(writer, "  pixels:")?;
    for p in pixels {
        write!(writer, " {},{}", p.x, p.y)?;
    }
    writeln!(writer)?;
    Ok(())
}
