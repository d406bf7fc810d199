//! ESRI shapefile header validation.

use super::{layer_name, BaseLayer, BaseMapError, BaseMapLoader, Extent};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

const HEADER_LEN: usize = 100;
const FILE_CODE: i32 = 9994;
const VERSION: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Null,
    Point,
    PolyLine,
    Polygon,
    MultiPoint,
    PointZ,
    PolyLineZ,
    PolygonZ,
    MultiPointZ,
    PointM,
    PolyLineM,
    PolygonM,
    MultiPointM,
    MultiPatch,
}

impl ShapeType {
    fn from_code(code: i32) -> Option<Self> {
        let shape = match code {
            0 => ShapeType::Null,
            1 => ShapeType::Point,
            3 => ShapeType::PolyLine,
            5 => ShapeType::Polygon,
            8 => ShapeType::MultiPoint,
            11 => ShapeType::PointZ,
            13 => ShapeType::PolyLineZ,
            15 => ShapeType::PolygonZ,
            18 => ShapeType::MultiPointZ,
            21 => ShapeType::PointM,
            23 => ShapeType::PolyLineM,
            25 => ShapeType::PolygonM,
            28 => ShapeType::MultiPointM,
            31 => ShapeType::MultiPatch,
            _ => return None,
        };
        Some(shape)
    }
}

/// Loads a `.shp` file after checking its companions and header.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapefileLoader;

impl ShapefileLoader {
    fn companion(path: &Path, ext: &str) -> Result<PathBuf, BaseMapError> {
        [ext.to_lowercase(), ext.to_uppercase()]
            .iter()
            .map(|e| path.with_extension(e))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| BaseMapError::MissingCompanion {
                path: path.to_path_buf(),
                companion: path.with_extension(ext),
            })
    }

    fn read_header(path: &Path) -> Result<[u8; HEADER_LEN], BaseMapError> {
        let io_err = |source: std::io::Error| BaseMapError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::open(path).map_err(io_err)?;
        let mut header = [0u8; HEADER_LEN];
        file.read_exact(&mut header).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                BaseMapError::Invalid {
                    path: path.to_path_buf(),
                    reason: "file is shorter than the 100-byte header".to_string(),
                }
            } else {
                io_err(e)
            }
        })?;
        Ok(header)
    }
}

fn be_i32(bytes: &[u8]) -> i32 {
    i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn le_i32(bytes: &[u8]) -> i32 {
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn le_f64(bytes: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    f64::from_le_bytes(buf)
}

impl BaseMapLoader for ShapefileLoader {
    fn load(&self, source: &Path) -> Result<BaseLayer, BaseMapError> {
        let is_shp = source
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("shp"));
        if !is_shp {
            return Err(BaseMapError::Invalid {
                path: source.to_path_buf(),
                reason: "expected a .shp extension".to_string(),
            });
        }
        if !source.is_file() {
            return Err(BaseMapError::NotFound(source.to_path_buf()));
        }
        Self::companion(source, "shx")?;
        Self::companion(source, "dbf")?;

        let header = Self::read_header(source)?;
        let invalid = |reason: String| BaseMapError::Invalid {
            path: source.to_path_buf(),
            reason,
        };

        let file_code = be_i32(&header[0..4]);
        if file_code != FILE_CODE {
            return Err(invalid(format!("bad file code {}", file_code)));
        }
        let version = le_i32(&header[28..32]);
        if version != VERSION {
            return Err(invalid(format!("unsupported version {}", version)));
        }
        let code = le_i32(&header[32..36]);
        let shape_type =
            ShapeType::from_code(code).ok_or_else(|| invalid(format!("unknown shape type {}", code)))?;

        let extent = Extent {
            min_x: le_f64(&header[36..44]),
            min_y: le_f64(&header[44..52]),
            max_x: le_f64(&header[52..60]),
            max_y: le_f64(&header[60..68]),
        };
        debug!(
            "Validated shapefile {} ({:?}, {:?})",
            source.display(),
            shape_type,
            extent
        );

        Ok(BaseLayer {
            name: layer_name(source),
            source: source.to_path_buf(),
            shape_type,
            extent,
        })
    }
}
