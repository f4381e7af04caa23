//! Per-kind parameter views.
//!
//! [`CoveringParams::from_snapshot`] reads the snapshot once and hands each
//! calculation branch a struct holding only the fields that branch may use.
//! Required values stay `Option` so a branch can bail out early on an
//! incomplete snapshot instead of guessing.

use serde::{Deserialize, Serialize};

use super::covering::{
    CoveringFamily, CoveringKind, EnvironmentClass, MosaicFormat, SurfaceKind, TrafficClass, WaterproofingKind,
};
use super::defaults;
use super::snapshot::InputSnapshot;

/// Floor and wall tile parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileParams {
    pub kind: CoveringKind,
    pub surface: Option<SurfaceKind>,
    pub environment: Option<EnvironmentClass>,
    pub piece_length_cm: Option<f64>,
    pub piece_width_cm: Option<f64>,
    pub thickness_mm: Option<f64>,
    pub joint_mm: Option<f64>,
    pub pieces_per_box: Option<u32>,
    pub waste_percent: f64,
}

/// Mosaic parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicParams {
    pub format: Option<MosaicFormat>,
    pub environment: Option<EnvironmentClass>,
    pub joint_mm: Option<f64>,
    pub waste_percent: f64,
}

/// Flagstone, marble and granite parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoneParams {
    pub kind: CoveringKind,
    pub environment: Option<EnvironmentClass>,
    /// Explicit piece size (length, width) in cm, if given
    pub piece_cm: Option<(f64, f64)>,
    /// Size used for joint formulas: explicit or nominal
    pub joint_piece_cm: Option<(f64, f64)>,
    pub thickness_mm: Option<f64>,
    pub joint_mm: Option<f64>,
    pub unevenness_cm: f64,
    pub pieces_per_box: Option<u32>,
    pub waste_percent: f64,
}

/// Interlocking pavement parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PavementParams {
    pub traffic: Option<TrafficClass>,
    pub environment: Option<EnvironmentClass>,
    pub piece_length_cm: Option<f64>,
    pub piece_width_cm: Option<f64>,
    pub thickness_mm: Option<f64>,
    pub joint_mm: Option<f64>,
    pub pieces_per_box: Option<u32>,
    pub waste_percent: f64,
    /// Waterproofing toggle; the layer goes under the sand bed
    pub waterproofing_enabled: bool,
    pub waterproofing_kind: Option<WaterproofingKind>,
}

/// Kind-specific parameters, one variant per calculation branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "branch", rename_all = "snake_case")]
pub enum CoveringParams {
    Tile(TileParams),
    Mosaic(MosaicParams),
    Stone(StoneParams),
    Pavement(PavementParams),
}

impl CoveringParams {
    /// Build the view for the snapshot's covering kind, or `None` if no kind
    /// has been chosen yet.
    pub fn from_snapshot(snapshot: &InputSnapshot) -> Option<Self> {
        let kind = snapshot.covering_kind()?;
        let environment = snapshot.environment();
        let waste_percent = snapshot.effective_waste_percent();

        let params = match kind.family() {
            CoveringFamily::Tile => CoveringParams::Tile(TileParams {
                kind,
                surface: snapshot.surface_kind(),
                environment,
                piece_length_cm: snapshot.piece_length_cm(),
                piece_width_cm: snapshot.piece_width_cm(),
                thickness_mm: snapshot.effective_thickness_mm(),
                joint_mm: snapshot.joint_mm(),
                pieces_per_box: snapshot.pieces_per_box(),
                waste_percent,
            }),
            CoveringFamily::Mosaic => CoveringParams::Mosaic(MosaicParams {
                format: snapshot.mosaic_format(),
                environment,
                joint_mm: snapshot.effective_joint_mm(),
                waste_percent,
            }),
            CoveringFamily::Stone => {
                let piece_cm = snapshot
                    .piece_length_cm()
                    .zip(snapshot.piece_width_cm());
                CoveringParams::Stone(StoneParams {
                    kind,
                    environment,
                    piece_cm,
                    joint_piece_cm: piece_cm.or_else(|| defaults::nominal_piece_cm(kind)),
                    thickness_mm: snapshot.effective_thickness_mm(),
                    joint_mm: snapshot.effective_joint_mm(),
                    unevenness_cm: snapshot.unevenness_cm().unwrap_or(0.0),
                    pieces_per_box: snapshot.pieces_per_box(),
                    waste_percent,
                })
            }
            CoveringFamily::Pavement => CoveringParams::Pavement(PavementParams {
                traffic: snapshot.traffic_class(),
                environment,
                piece_length_cm: snapshot.piece_length_cm(),
                piece_width_cm: snapshot.piece_width_cm(),
                thickness_mm: snapshot.piece_thickness_mm(),
                joint_mm: snapshot.effective_joint_mm(),
                pieces_per_box: snapshot.pieces_per_box(),
                waste_percent,
                waterproofing_enabled: snapshot.waterproofing().enabled,
                waterproofing_kind: snapshot.waterproofing().kind,
            }),
        };
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_kind_no_params() {
        assert!(CoveringParams::from_snapshot(&InputSnapshot::new()).is_none());
    }

    #[test]
    fn test_stone_uses_nominal_size_for_joints() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Marble);
        match CoveringParams::from_snapshot(&s) {
            Some(CoveringParams::Stone(p)) => {
                assert_eq!(p.piece_cm, None);
                assert_eq!(p.joint_piece_cm, Some((60.0, 60.0)));
                assert_eq!(p.joint_mm, Some(2.0));
                assert_eq!(p.unevenness_cm, 0.0);
            }
            other => panic!("expected stone params, got {:?}", other),
        }
    }

    #[test]
    fn test_tile_joint_has_no_default() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Tile);
        match CoveringParams::from_snapshot(&s) {
            Some(CoveringParams::Tile(p)) => {
                assert_eq!(p.joint_mm, None);
                assert_eq!(p.thickness_mm, Some(8.0));
            }
            other => panic!("expected tile params, got {:?}", other),
        }
    }
}
