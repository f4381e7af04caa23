//! Covering, surface and environment classifications.
//!
//! These closed sets drive every branch of the engine: which wizard steps are
//! shown, which validation predicate applies, and which calculation branch
//! produces the material list.

use serde::{Deserialize, Serialize};

/// Category of surface-finish material being installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveringKind {
    /// Floor tile (ceramic or porcelain)
    Tile,
    /// Wall tile (ceramic or porcelain)
    WallTile,
    /// Mosaic sheets (glass, porcelain or stone tesserae on a mesh)
    Mosaic,
    /// Natural irregular flagstone
    Flagstone,
    /// Interlocking concrete pavers
    InterlockingPavement,
    /// Marble tiles or slabs
    Marble,
    /// Granite tiles or slabs
    Granite,
}

/// Calculation branch a covering kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveringFamily {
    Tile,
    Mosaic,
    Stone,
    Pavement,
}

impl CoveringKind {
    /// All covering kinds for UI selection
    pub const ALL: [CoveringKind; 7] = [
        CoveringKind::Tile,
        CoveringKind::WallTile,
        CoveringKind::Mosaic,
        CoveringKind::Flagstone,
        CoveringKind::InterlockingPavement,
        CoveringKind::Marble,
        CoveringKind::Granite,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            CoveringKind::Tile => "Floor tile",
            CoveringKind::WallTile => "Wall tile",
            CoveringKind::Mosaic => "Mosaic",
            CoveringKind::Flagstone => "Flagstone",
            CoveringKind::InterlockingPavement => "Interlocking pavement",
            CoveringKind::Marble => "Marble",
            CoveringKind::Granite => "Granite",
        }
    }

    /// Calculation branch for this kind
    pub fn family(&self) -> CoveringFamily {
        match self {
            CoveringKind::Tile | CoveringKind::WallTile => CoveringFamily::Tile,
            CoveringKind::Mosaic => CoveringFamily::Mosaic,
            CoveringKind::Flagstone | CoveringKind::Marble | CoveringKind::Granite => CoveringFamily::Stone,
            CoveringKind::InterlockingPavement => CoveringFamily::Pavement,
        }
    }

    /// Whether the user picks ceramic vs porcelain for this kind
    pub fn uses_surface_kind(&self) -> bool {
        matches!(self, CoveringKind::Tile | CoveringKind::WallTile)
    }

    /// Whether the kind can go on both floors and walls
    pub fn allows_surface_choice(&self) -> bool {
        matches!(self, CoveringKind::Mosaic | CoveringKind::Marble | CoveringKind::Granite)
    }

    /// Application surface for kinds that only go on one surface
    pub fn fixed_surface(&self) -> Option<ApplicationSurface> {
        match self {
            CoveringKind::Tile | CoveringKind::Flagstone | CoveringKind::InterlockingPavement => {
                Some(ApplicationSurface::Floor)
            }
            CoveringKind::WallTile => Some(ApplicationSurface::Wall),
            CoveringKind::Mosaic | CoveringKind::Marble | CoveringKind::Granite => None,
        }
    }

    /// Whether a baseboard can be estimated alongside this covering
    pub fn supports_baseboard(&self) -> bool {
        matches!(self, CoveringKind::Tile | CoveringKind::Marble | CoveringKind::Granite)
    }

    pub fn is_pavement(&self) -> bool {
        matches!(self, CoveringKind::InterlockingPavement)
    }
}

impl std::fmt::Display for CoveringKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tile body type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Ceramic,
    Porcelain,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 2] = [SurfaceKind::Ceramic, SurfaceKind::Porcelain];

    pub fn display_name(&self) -> &'static str {
        match self {
            SurfaceKind::Ceramic => "Ceramic",
            SurfaceKind::Porcelain => "Porcelain",
        }
    }
}

/// Surface the covering is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationSurface {
    Floor,
    Wall,
}

impl ApplicationSurface {
    pub const ALL: [ApplicationSurface; 2] = [ApplicationSurface::Floor, ApplicationSurface::Wall];

    pub fn display_name(&self) -> &'static str {
        match self {
            ApplicationSurface::Floor => "Floor",
            ApplicationSurface::Wall => "Wall",
        }
    }
}

/// Moisture exposure of the installed covering.
///
/// Drives the adhesive class, the grout class and whether the waterproofing
/// step is shown at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentClass {
    /// Interior dry rooms (bedrooms, living rooms)
    Dry,
    /// Covered exteriors, laundries, kitchens
    SemiHumid,
    /// Bathrooms, open balconies, uncovered exteriors
    Wet,
    /// Pools, saunas, permanently wet areas
    AlwaysWet,
}

impl EnvironmentClass {
    pub const ALL: [EnvironmentClass; 4] = [
        EnvironmentClass::Dry,
        EnvironmentClass::SemiHumid,
        EnvironmentClass::Wet,
        EnvironmentClass::AlwaysWet,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            EnvironmentClass::Dry => "Dry",
            EnvironmentClass::SemiHumid => "Semi-humid",
            EnvironmentClass::Wet => "Wet",
            EnvironmentClass::AlwaysWet => "Always wet",
        }
    }

    pub fn is_dry(&self) -> bool {
        matches!(self, EnvironmentClass::Dry)
    }

    /// Wet or permanently wet
    pub fn is_wet(&self) -> bool {
        matches!(self, EnvironmentClass::Wet | EnvironmentClass::AlwaysWet)
    }
}

/// Expected traffic over interlocking pavement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficClass {
    /// Pedestrians, sidewalks, patios
    Light,
    /// Cars, residential driveways
    Medium,
    /// Trucks, loading areas
    Heavy,
}

impl TrafficClass {
    pub const ALL: [TrafficClass; 3] = [TrafficClass::Light, TrafficClass::Medium, TrafficClass::Heavy];

    pub fn display_name(&self) -> &'static str {
        match self {
            TrafficClass::Light => "Light (pedestrian)",
            TrafficClass::Medium => "Medium (cars)",
            TrafficClass::Heavy => "Heavy (trucks)",
        }
    }
}

/// Retail mosaic sheet formats.
///
/// | Format | Sheet side | Piece side | Thickness |
/// |--------|-----------|-----------|-----------|
/// | Glass 15 mm | 30.0 cm | 1.5 cm | 4 mm |
/// | Glass 20 mm | 30.0 cm | 2.0 cm | 4 mm |
/// | Porcelain 25 mm | 31.5 cm | 2.5 cm | 5 mm |
/// | Porcelain 50 mm | 30.5 cm | 5.0 cm | 6 mm |
/// | Stone 50 mm | 30.5 cm | 5.0 cm | 8 mm |
/// | Hexagonal 25 mm | 26.0 cm | 2.5 cm | 6 mm |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MosaicFormat {
    #[serde(rename = "glass_15mm")]
    Glass15mm,
    #[serde(rename = "glass_20mm")]
    Glass20mm,
    #[serde(rename = "porcelain_25mm")]
    Porcelain25mm,
    #[serde(rename = "porcelain_50mm")]
    Porcelain50mm,
    #[serde(rename = "stone_50mm")]
    Stone50mm,
    #[serde(rename = "hexagonal_25mm")]
    Hexagonal25mm,
}

impl MosaicFormat {
    pub const ALL: [MosaicFormat; 6] = [
        MosaicFormat::Glass15mm,
        MosaicFormat::Glass20mm,
        MosaicFormat::Porcelain25mm,
        MosaicFormat::Porcelain50mm,
        MosaicFormat::Stone50mm,
        MosaicFormat::Hexagonal25mm,
    ];

    /// Side of the square mesh sheet in cm
    pub fn sheet_side_cm(&self) -> f64 {
        match self {
            MosaicFormat::Glass15mm | MosaicFormat::Glass20mm => 30.0,
            MosaicFormat::Porcelain25mm => 31.5,
            MosaicFormat::Porcelain50mm | MosaicFormat::Stone50mm => 30.5,
            MosaicFormat::Hexagonal25mm => 26.0,
        }
    }

    /// Side of one tessera in cm
    pub fn piece_side_cm(&self) -> f64 {
        match self {
            MosaicFormat::Glass15mm => 1.5,
            MosaicFormat::Glass20mm => 2.0,
            MosaicFormat::Porcelain25mm | MosaicFormat::Hexagonal25mm => 2.5,
            MosaicFormat::Porcelain50mm | MosaicFormat::Stone50mm => 5.0,
        }
    }

    /// Tessera thickness in mm
    pub fn thickness_mm(&self) -> f64 {
        match self {
            MosaicFormat::Glass15mm | MosaicFormat::Glass20mm => 4.0,
            MosaicFormat::Porcelain25mm => 5.0,
            MosaicFormat::Porcelain50mm | MosaicFormat::Hexagonal25mm => 6.0,
            MosaicFormat::Stone50mm => 8.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MosaicFormat::Glass15mm => "Glass 1.5x1.5 cm",
            MosaicFormat::Glass20mm => "Glass 2x2 cm",
            MosaicFormat::Porcelain25mm => "Porcelain 2.5x2.5 cm",
            MosaicFormat::Porcelain50mm => "Porcelain 5x5 cm",
            MosaicFormat::Stone50mm => "Stone 5x5 cm",
            MosaicFormat::Hexagonal25mm => "Hexagonal 2.5 cm",
        }
    }
}

/// How the baseboard is sourced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseboardMaterial {
    /// Strips cut from the main covering pieces
    #[default]
    SamePiece,
    /// Factory-made baseboard pieces of a commercial length
    PreMade,
}

/// Where the baseboard perimeter comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerimeterMode {
    /// Derived from the room dimensions
    #[default]
    Computed,
    /// Typed in by the user
    Manual,
}

/// Waterproofing system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterproofingKind {
    /// Crystallizing additive mixed into the mortar or concrete
    CrystallizingAdditive,
    /// Geotextile membrane under the bedding sand
    GeotextileMembrane,
    /// Torch-applied asphaltic membrane
    AsphalticMembrane,
    /// Two-component polymeric cementitious mortar
    PolymericMortar,
    /// Liquid acrylic membrane
    AcrylicMembrane,
}

impl WaterproofingKind {
    pub const ALL: [WaterproofingKind; 5] = [
        WaterproofingKind::CrystallizingAdditive,
        WaterproofingKind::GeotextileMembrane,
        WaterproofingKind::AsphalticMembrane,
        WaterproofingKind::PolymericMortar,
        WaterproofingKind::AcrylicMembrane,
    ];

    /// Kinds offered for interlocking pavement
    pub const PAVEMENT: [WaterproofingKind; 3] = [
        WaterproofingKind::CrystallizingAdditive,
        WaterproofingKind::GeotextileMembrane,
        WaterproofingKind::AsphalticMembrane,
    ];

    pub fn is_pavement_kind(&self) -> bool {
        Self::PAVEMENT.contains(self)
    }

    /// Short code used as the material grade
    pub fn code(&self) -> &'static str {
        match self {
            WaterproofingKind::CrystallizingAdditive => "additive",
            WaterproofingKind::GeotextileMembrane => "geotextile",
            WaterproofingKind::AsphalticMembrane => "asphaltic",
            WaterproofingKind::PolymericMortar => "polymeric",
            WaterproofingKind::AcrylicMembrane => "acrylic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WaterproofingKind::CrystallizingAdditive => "Crystallizing additive",
            WaterproofingKind::GeotextileMembrane => "Geotextile membrane",
            WaterproofingKind::AsphalticMembrane => "Asphaltic membrane",
            WaterproofingKind::PolymericMortar => "Polymeric mortar",
            WaterproofingKind::AcrylicMembrane => "Acrylic membrane",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families() {
        assert_eq!(CoveringKind::WallTile.family(), CoveringFamily::Tile);
        assert_eq!(CoveringKind::Flagstone.family(), CoveringFamily::Stone);
        assert_eq!(CoveringKind::InterlockingPavement.family(), CoveringFamily::Pavement);
    }

    #[test]
    fn test_surface_rules() {
        for kind in CoveringKind::ALL {
            // A kind either fixes its surface or lets the user choose, never both
            assert_ne!(kind.fixed_surface().is_some(), kind.allows_surface_choice());
        }
        assert_eq!(CoveringKind::WallTile.fixed_surface(), Some(ApplicationSurface::Wall));
    }

    #[test]
    fn test_mosaic_table_is_consistent() {
        for format in MosaicFormat::ALL {
            assert!(format.sheet_side_cm() > format.piece_side_cm());
            assert!(format.thickness_mm() > 0.0);
        }
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&CoveringKind::InterlockingPavement).unwrap();
        assert_eq!(json, "\"interlocking_pavement\"");
        let format: MosaicFormat = serde_json::from_str("\"glass_20mm\"").unwrap();
        assert_eq!(format, MosaicFormat::Glass20mm);
    }

    #[test]
    fn test_pavement_waterproofing_kinds() {
        assert!(WaterproofingKind::GeotextileMembrane.is_pavement_kind());
        assert!(!WaterproofingKind::PolymericMortar.is_pavement_kind());
    }
}
