use tracing::debug;

use super::luma::LumaPlane;

/// A single decode attempt on a prepared grayscale plane.
///
/// Implementations must be deterministic: the same plane gives the same
/// answer every time.
pub trait SymbolDecoder: Send + Sync {
    /// Human-readable decoder name.
    fn name(&self) -> &str;

    /// Decoded text of the first readable symbol, if any.
    fn decode(&self, plane: &LumaPlane) -> Option<String>;
}

/// QR decoder backed by `rqrr`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RqrrDecoder;

impl SymbolDecoder for RqrrDecoder {
    fn name(&self) -> &str {
        "rqrr"
    }

    fn decode(&self, plane: &LumaPlane) -> Option<String> {
        if plane.is_empty() {
            return None;
        }
        let data = &plane.data;
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(plane.width(), plane.height(), |x, y| {
                data[[y, x]]
            });
        let grids = prepared.detect_grids();
        if grids.is_empty() {
            return None;
        }

        grids.iter().find_map(|grid| match grid.decode() {
            Ok((meta, content)) => {
                debug!(
                    version = ?meta.version,
                    ecc_level = ?meta.ecc_level,
                    length = content.len(),
                    "QR grid decoded"
                );
                Some(content)
            }
            Err(e) => {
                debug!(error = ?e, "QR grid found but not decodable");
                None
            }
        })
    }
}
