//! # Input Snapshot
//!
//! The single aggregate of everything the user has entered in one estimation
//! session.
//!
//! Fields are private. Setters reject physically meaningless values (negative
//! lengths, NaN, a wall count outside 1..=20, ...) and leave the field
//! unchanged, returning `false`. Domain ranges such as "piece length between 5
//! and 200 cm" are left to [`crate::validation`] so the UI can explain them.
//!
//! Getters only expose fields that are relevant to the current covering kind;
//! everything else reads as `None`. Changing the covering kind wipes every
//! other field.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::model::{CoveringKind, InputSnapshot, SurfaceKind, TrafficClass};
//!
//! let mut snapshot = InputSnapshot::new();
//! snapshot.set_covering_kind(CoveringKind::Tile);
//! assert!(snapshot.set_surface_kind(SurfaceKind::Porcelain));
//!
//! // Traffic class only applies to interlocking pavement
//! assert!(!snapshot.set_traffic_class(TrafficClass::Light));
//! assert_eq!(snapshot.traffic_class(), None);
//!
//! // Out-of-range wall counts are rejected
//! assert!(!snapshot.set_wall_count(Some(0)));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::covering::{
    ApplicationSurface, BaseboardMaterial, CoveringFamily, CoveringKind, EnvironmentClass, MosaicFormat,
    PerimeterMode, SurfaceKind, TrafficClass, WaterproofingKind,
};
use super::defaults;
use crate::errors::EstimateResult;
use crate::geometry;
use crate::units::{Centimeters, Meters, SquareMeters};

/// Smallest accepted wall count
pub const MIN_WALL_COUNT: u32 = 1;
/// Largest accepted wall count
pub const MAX_WALL_COUNT: u32 = 20;
/// Largest waste percentage the snapshot will store
pub const MAX_WASTE_PERCENT: f64 = 100.0;

/// Baseboard options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseboardConfig {
    pub enabled: bool,
    /// Strip height in cm
    pub height_cm: Option<f64>,
    pub material: BaseboardMaterial,
    /// Length of one pre-made piece in cm
    pub commercial_length_cm: Option<f64>,
    pub perimeter_mode: PerimeterMode,
    /// Perimeter typed by the user, in m (manual mode)
    pub manual_perimeter_m: Option<f64>,
    /// Length without baseboard (door openings), in m
    pub deduction_m: Option<f64>,
}

/// Waterproofing options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterproofingConfig {
    pub enabled: bool,
    pub kind: Option<WaterproofingKind>,
}

/// How the covered area is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaMode {
    /// Length x width
    Floor,
    /// Length x height x wall count
    Wall,
}

/// All user-entered parameters for one estimate.
///
/// Deserializing always goes through [`InputSnapshot::normalized`], so a
/// snapshot read from JSON (alone or inside a session) obeys the same rules as
/// one built with the setters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self", default)]
pub struct InputSnapshot {
    covering_kind: Option<CoveringKind>,
    surface_kind: Option<SurfaceKind>,
    application_surface: Option<ApplicationSurface>,
    environment: Option<EnvironmentClass>,
    traffic_class: Option<TrafficClass>,

    total_area_m2: Option<f64>,
    length_m: Option<f64>,
    width_m: Option<f64>,
    height_m: Option<f64>,
    wall_count: Option<u32>,
    opening_area_m2: Option<f64>,

    piece_length_cm: Option<f64>,
    piece_width_cm: Option<f64>,
    piece_thickness_mm: Option<f64>,
    joint_mm: Option<f64>,
    pieces_per_box: Option<u32>,
    unevenness_cm: Option<f64>,
    waste_percent: Option<f64>,
    mosaic_format: Option<MosaicFormat>,

    baseboard: BaseboardConfig,
    waterproofing: WaterproofingConfig,
}

impl Serialize for InputSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        InputSnapshot::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for InputSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        InputSnapshot::deserialize(deserializer).map(|raw| raw.normalized())
    }
}

/// Accept a finite, non-negative value (or a clear)
fn non_negative(value: Option<f64>) -> Option<Option<f64>> {
    match value {
        None => Some(None),
        Some(v) if v.is_finite() && v >= 0.0 => Some(Some(v)),
        Some(_) => None,
    }
}

/// Accept a finite, strictly positive value (or a clear)
fn positive(value: Option<f64>) -> Option<Option<f64>> {
    match value {
        None => Some(None),
        Some(v) if v.is_finite() && v > 0.0 => Some(Some(v)),
        Some(_) => None,
    }
}

/// Store `value` into `slot` when `check` accepts it
fn store(slot: &mut Option<f64>, checked: Option<Option<f64>>) -> bool {
    match checked {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

impl InputSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from JSON; invalid or irrelevant values are dropped.
    pub fn from_json(json: &str) -> EstimateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the snapshot through its setters.
    ///
    /// Values a setter would reject and fields irrelevant to the covering kind
    /// are dropped. Used after deserialization, which bypasses the setters.
    pub fn normalized(&self) -> Self {
        let mut out = Self::default();
        let Some(kind) = self.covering_kind else {
            return out;
        };
        out.set_covering_kind(kind);
        if let Some(surface) = self.surface_kind {
            out.set_surface_kind(surface);
        }
        if let Some(surface) = self.application_surface {
            out.set_application_surface(surface);
        }
        if let Some(environment) = self.environment {
            out.set_environment(environment);
        }
        if let Some(traffic) = self.traffic_class {
            out.set_traffic_class(traffic);
        }
        out.set_total_area_m2(self.total_area_m2());
        out.set_length_m(self.length_m());
        out.set_width_m(self.width_m());
        out.set_height_m(self.height_m());
        out.set_wall_count(self.wall_count());
        out.set_opening_area_m2(self.opening_area_m2());
        out.set_piece_length_cm(self.piece_length_cm());
        out.set_piece_width_cm(self.piece_width_cm());
        out.set_piece_thickness_mm(self.piece_thickness_mm());
        out.set_joint_mm(self.joint_mm());
        out.set_pieces_per_box(self.pieces_per_box());
        out.set_unevenness_cm(self.unevenness_cm());
        out.set_waste_percent(self.waste_percent());
        if let Some(format) = self.mosaic_format() {
            out.set_mosaic_format(format);
        }

        let baseboard = &self.baseboard;
        out.set_baseboard_enabled(baseboard.enabled);
        out.set_baseboard_height_cm(baseboard.height_cm);
        out.set_baseboard_material(baseboard.material);
        out.set_baseboard_commercial_length_cm(baseboard.commercial_length_cm);
        out.set_baseboard_perimeter_mode(baseboard.perimeter_mode);
        out.set_baseboard_manual_perimeter_m(baseboard.manual_perimeter_m);
        out.set_baseboard_deduction_m(baseboard.deduction_m);

        out.set_waterproofing_enabled(self.waterproofing.enabled);
        out.set_waterproofing_kind(self.waterproofing.kind);
        out
    }

    /// Whether nothing has been entered yet
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Select the covering kind.
    ///
    /// Choosing a different kind clears every other field, since all later
    /// answers depend on it.
    pub fn set_covering_kind(&mut self, kind: CoveringKind) -> bool {
        if self.covering_kind != Some(kind) {
            *self = Self {
                covering_kind: Some(kind),
                ..Self::default()
            };
        }
        true
    }

    pub fn set_surface_kind(&mut self, surface: SurfaceKind) -> bool {
        match self.covering_kind {
            Some(kind) if kind.uses_surface_kind() => {
                self.surface_kind = Some(surface);
                true
            }
            _ => false,
        }
    }

    pub fn set_application_surface(&mut self, surface: ApplicationSurface) -> bool {
        match self.covering_kind {
            Some(kind) if kind.allows_surface_choice() => {
                self.application_surface = Some(surface);
                true
            }
            _ => false,
        }
    }

    pub fn set_environment(&mut self, environment: EnvironmentClass) -> bool {
        self.environment = Some(environment);
        true
    }

    pub fn set_traffic_class(&mut self, traffic: TrafficClass) -> bool {
        match self.covering_kind {
            Some(kind) if kind.is_pavement() => {
                self.traffic_class = Some(traffic);
                true
            }
            _ => false,
        }
    }

    pub fn set_total_area_m2(&mut self, value: Option<f64>) -> bool {
        store(&mut self.total_area_m2, non_negative(value))
    }

    pub fn set_length_m(&mut self, value: Option<f64>) -> bool {
        store(&mut self.length_m, non_negative(value))
    }

    pub fn set_width_m(&mut self, value: Option<f64>) -> bool {
        store(&mut self.width_m, non_negative(value))
    }

    pub fn set_height_m(&mut self, value: Option<f64>) -> bool {
        store(&mut self.height_m, non_negative(value))
    }

    /// Set the number of walls; counts outside 1..=20 are rejected
    pub fn set_wall_count(&mut self, value: Option<u32>) -> bool {
        match value {
            Some(n) if !(MIN_WALL_COUNT..=MAX_WALL_COUNT).contains(&n) => false,
            other => {
                self.wall_count = other;
                true
            }
        }
    }

    pub fn set_opening_area_m2(&mut self, value: Option<f64>) -> bool {
        store(&mut self.opening_area_m2, non_negative(value))
    }

    pub fn set_piece_length_cm(&mut self, value: Option<f64>) -> bool {
        store(&mut self.piece_length_cm, positive(value))
    }

    pub fn set_piece_width_cm(&mut self, value: Option<f64>) -> bool {
        store(&mut self.piece_width_cm, positive(value))
    }

    pub fn set_piece_thickness_mm(&mut self, value: Option<f64>) -> bool {
        store(&mut self.piece_thickness_mm, positive(value))
    }

    pub fn set_joint_mm(&mut self, value: Option<f64>) -> bool {
        store(&mut self.joint_mm, positive(value))
    }

    pub fn set_pieces_per_box(&mut self, value: Option<u32>) -> bool {
        match value {
            Some(0) => false,
            other => {
                self.pieces_per_box = other;
                true
            }
        }
    }

    pub fn set_unevenness_cm(&mut self, value: Option<f64>) -> bool {
        store(&mut self.unevenness_cm, non_negative(value))
    }

    /// Set the waste percentage; values outside 0..=100 are rejected
    pub fn set_waste_percent(&mut self, value: Option<f64>) -> bool {
        match value {
            Some(v) if !v.is_finite() || !(0.0..=MAX_WASTE_PERCENT).contains(&v) => false,
            other => {
                self.waste_percent = other;
                true
            }
        }
    }

    pub fn set_mosaic_format(&mut self, format: MosaicFormat) -> bool {
        if self.covering_kind == Some(CoveringKind::Mosaic) {
            self.mosaic_format = Some(format);
            true
        } else {
            false
        }
    }

    pub fn set_baseboard_enabled(&mut self, enabled: bool) -> bool {
        if enabled && !self.covering_kind.is_some_and(|k| k.supports_baseboard()) {
            return false;
        }
        self.baseboard.enabled = enabled;
        true
    }

    pub fn set_baseboard_height_cm(&mut self, value: Option<f64>) -> bool {
        store(&mut self.baseboard.height_cm, positive(value))
    }

    pub fn set_baseboard_material(&mut self, material: BaseboardMaterial) -> bool {
        self.baseboard.material = material;
        true
    }

    pub fn set_baseboard_commercial_length_cm(&mut self, value: Option<f64>) -> bool {
        store(&mut self.baseboard.commercial_length_cm, positive(value))
    }

    pub fn set_baseboard_perimeter_mode(&mut self, mode: PerimeterMode) -> bool {
        self.baseboard.perimeter_mode = mode;
        true
    }

    pub fn set_baseboard_manual_perimeter_m(&mut self, value: Option<f64>) -> bool {
        store(&mut self.baseboard.manual_perimeter_m, non_negative(value))
    }

    pub fn set_baseboard_deduction_m(&mut self, value: Option<f64>) -> bool {
        store(&mut self.baseboard.deduction_m, non_negative(value))
    }

    pub fn set_waterproofing_enabled(&mut self, enabled: bool) -> bool {
        self.waterproofing.enabled = enabled;
        if !enabled {
            self.waterproofing.kind = None;
        }
        true
    }

    pub fn set_waterproofing_kind(&mut self, kind: Option<WaterproofingKind>) -> bool {
        if kind.is_some() && !self.waterproofing.enabled {
            return false;
        }
        self.waterproofing.kind = kind;
        true
    }

    // ========================================================================
    // Relevance-filtered getters
    // ========================================================================

    pub fn covering_kind(&self) -> Option<CoveringKind> {
        self.covering_kind
    }

    pub fn family(&self) -> Option<CoveringFamily> {
        self.covering_kind.map(|k| k.family())
    }

    /// Ceramic/porcelain choice (tile and wall tile only)
    pub fn surface_kind(&self) -> Option<SurfaceKind> {
        self.covering_kind
            .filter(|k| k.uses_surface_kind())
            .and(self.surface_kind)
    }

    /// Effective application surface: the kind's fixed surface, the user's
    /// choice, or floor when a selectable kind has no choice yet.
    pub fn application_surface(&self) -> Option<ApplicationSurface> {
        let kind = self.covering_kind?;
        Some(
            kind.fixed_surface()
                .or(self.application_surface)
                .unwrap_or(ApplicationSurface::Floor),
        )
    }

    pub fn environment(&self) -> Option<EnvironmentClass> {
        self.environment
    }

    /// Traffic class (interlocking pavement only)
    pub fn traffic_class(&self) -> Option<TrafficClass> {
        self.covering_kind
            .filter(|k| k.is_pavement())
            .and(self.traffic_class)
    }

    /// Mosaic sheet format (mosaic only)
    pub fn mosaic_format(&self) -> Option<MosaicFormat> {
        self.covering_kind
            .filter(|k| *k == CoveringKind::Mosaic)
            .and(self.mosaic_format)
    }

    pub fn area_mode(&self) -> AreaMode {
        match self.application_surface() {
            Some(ApplicationSurface::Wall) => AreaMode::Wall,
            _ => AreaMode::Floor,
        }
    }

    pub fn total_area_m2(&self) -> Option<f64> {
        self.total_area_m2
    }

    pub fn length_m(&self) -> Option<f64> {
        self.length_m
    }

    /// Room width (floor mode only)
    pub fn width_m(&self) -> Option<f64> {
        match self.area_mode() {
            AreaMode::Floor => self.width_m,
            AreaMode::Wall => None,
        }
    }

    /// Wall height (wall mode only)
    pub fn height_m(&self) -> Option<f64> {
        match self.area_mode() {
            AreaMode::Wall => self.height_m,
            AreaMode::Floor => None,
        }
    }

    /// Wall count (wall mode only)
    pub fn wall_count(&self) -> Option<u32> {
        match self.area_mode() {
            AreaMode::Wall => self.wall_count,
            AreaMode::Floor => None,
        }
    }

    pub fn opening_area_m2(&self) -> Option<f64> {
        self.opening_area_m2
    }

    /// Piece length in cm (not used by mosaic, whose format fixes it)
    pub fn piece_length_cm(&self) -> Option<f64> {
        self.unless_mosaic(self.piece_length_cm)
    }

    pub fn piece_width_cm(&self) -> Option<f64> {
        self.unless_mosaic(self.piece_width_cm)
    }

    /// Explicit piece thickness in mm
    pub fn piece_thickness_mm(&self) -> Option<f64> {
        self.unless_mosaic(self.piece_thickness_mm)
    }

    /// Explicit joint width in mm
    pub fn joint_mm(&self) -> Option<f64> {
        self.covering_kind.and(self.joint_mm)
    }

    pub fn pieces_per_box(&self) -> Option<u32> {
        self.unless_mosaic(self.pieces_per_box)
    }

    /// Subfloor unevenness in cm (stone kinds only)
    pub fn unevenness_cm(&self) -> Option<f64> {
        (self.family() == Some(CoveringFamily::Stone))
            .then_some(self.unevenness_cm)
            .flatten()
    }

    /// Explicit waste percentage
    pub fn waste_percent(&self) -> Option<f64> {
        self.covering_kind.and(self.waste_percent)
    }

    /// Baseboard options, whatever the kind
    pub fn baseboard(&self) -> &BaseboardConfig {
        &self.baseboard
    }

    pub fn waterproofing(&self) -> &WaterproofingConfig {
        &self.waterproofing
    }

    fn unless_mosaic<T>(&self, value: Option<T>) -> Option<T> {
        match self.covering_kind {
            Some(CoveringKind::Mosaic) | None => None,
            Some(_) => value,
        }
    }

    // ========================================================================
    // Effective values (explicit or default)
    // ========================================================================

    /// Joint width: explicit value or the kind's default
    pub fn effective_joint_mm(&self) -> Option<f64> {
        let kind = self.covering_kind?;
        self.joint_mm.or_else(|| defaults::default_joint_mm(kind))
    }

    /// Piece thickness: explicit value, the mosaic format's, or the kind's default
    pub fn effective_thickness_mm(&self) -> Option<f64> {
        let kind = self.covering_kind?;
        if kind == CoveringKind::Mosaic {
            return self.mosaic_format().map(|f| f.thickness_mm());
        }
        self.piece_thickness_mm
            .or_else(|| defaults::default_thickness_mm(kind, self.surface_kind()))
    }

    /// Waste percentage: explicit value or the kind's default
    pub fn effective_waste_percent(&self) -> f64 {
        match self.covering_kind {
            Some(kind) => self
                .waste_percent
                .unwrap_or_else(|| defaults::default_waste_percent(kind)),
            None => 0.0,
        }
    }

    /// Whether the baseboard step applies: the kind supports baseboards and
    /// the covering goes on a floor.
    pub fn is_baseboard_eligible(&self) -> bool {
        self.covering_kind.is_some_and(|k| k.supports_baseboard())
            && self.application_surface() == Some(ApplicationSurface::Floor)
    }

    /// Baseboard options when enabled and applicable
    pub fn active_baseboard(&self) -> Option<&BaseboardConfig> {
        (self.baseboard.enabled && self.is_baseboard_eligible()).then_some(&self.baseboard)
    }

    // ========================================================================
    // Measurements
    // ========================================================================

    /// Gross geometric area before openings, if the dimensions are complete
    pub fn gross_geometric_area(&self) -> Option<SquareMeters> {
        let length = Meters(self.length_m?);
        match self.area_mode() {
            AreaMode::Floor => Some(geometry::rectangle_area(length, Meters(self.width_m()?))),
            AreaMode::Wall => Some(geometry::wall_area(
                length,
                Meters(self.height_m()?),
                self.wall_count()?,
            )),
        }
    }

    /// Gross geometric area minus openings
    pub fn net_geometric_area(&self) -> Option<SquareMeters> {
        let gross = self.gross_geometric_area()?;
        let opening = SquareMeters(self.opening_area_m2.unwrap_or(0.0));
        Some(geometry::net_area(gross, opening))
    }

    /// Area to cover: an explicit total wins over the room dimensions
    pub fn base_area(&self) -> Option<SquareMeters> {
        match self.total_area_m2 {
            Some(total) => Some(SquareMeters(total)),
            None => self.net_geometric_area(),
        }
    }

    /// Area shown to the user before openings are subtracted
    pub fn gross_area(&self) -> Option<SquareMeters> {
        match self.total_area_m2 {
            Some(total) => Some(SquareMeters(total)),
            None => self.gross_geometric_area(),
        }
    }

    /// Room perimeter derived from the measurements: 2(L+W) whenever a floor's
    /// length and width are known, otherwise 4·√A of the base area.
    pub fn computed_perimeter(&self) -> Option<Meters> {
        if self.area_mode() == AreaMode::Floor {
            if let (Some(length), Some(width)) = (self.length_m, self.width_m) {
                return Some(geometry::rectangle_perimeter(Meters(length), Meters(width)));
            }
        }
        self.base_area().map(geometry::square_perimeter_from_area)
    }

    /// Perimeter according to the baseboard's perimeter mode
    pub fn perimeter(&self) -> Option<Meters> {
        match self.baseboard.perimeter_mode {
            PerimeterMode::Manual => self.baseboard.manual_perimeter_m.map(Meters),
            PerimeterMode::Computed => self.computed_perimeter(),
        }
    }

    /// Baseboard length: perimeter minus the declared deduction, never negative
    pub fn baseboard_net_perimeter(&self) -> Option<Meters> {
        let perimeter = self.perimeter()?;
        let deduction = self.baseboard.deduction_m.unwrap_or(0.0);
        Some(Meters((perimeter.0 - deduction).max(0.0)))
    }

    /// Area consumed by baseboard strips (perimeter x height) when enabled
    pub fn baseboard_area(&self) -> Option<SquareMeters> {
        let baseboard = self.active_baseboard()?;
        let height: Meters = Centimeters(baseboard.height_cm?).into();
        Some(self.baseboard_net_perimeter()? * height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile_room() -> InputSnapshot {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Tile);
        s.set_surface_kind(SurfaceKind::Ceramic);
        s.set_environment(EnvironmentClass::Dry);
        s.set_length_m(Some(5.0));
        s.set_width_m(Some(4.0));
        s
    }

    #[test]
    fn test_changing_kind_resets_dependents() {
        let mut s = tile_room();
        s.set_waste_percent(Some(12.0));
        s.set_covering_kind(CoveringKind::Marble);
        assert_eq!(s.covering_kind(), Some(CoveringKind::Marble));
        assert_eq!(s.environment(), None);
        assert_eq!(s.length_m(), None);
        assert_eq!(s.waste_percent(), None);
    }

    #[test]
    fn test_same_kind_keeps_fields() {
        let mut s = tile_room();
        s.set_covering_kind(CoveringKind::Tile);
        assert_eq!(s.length_m(), Some(5.0));
    }

    #[test]
    fn test_setters_reject_bad_values() {
        let mut s = tile_room();
        assert!(!s.set_length_m(Some(-1.0)));
        assert!(!s.set_length_m(Some(f64::NAN)));
        assert_eq!(s.length_m(), Some(5.0));
        assert!(!s.set_wall_count(Some(21)));
        assert!(!s.set_waste_percent(Some(150.0)));
        assert!(!s.set_piece_length_cm(Some(0.0)));
        assert!(!s.set_pieces_per_box(Some(0)));
        assert!(s.set_length_m(None));
        assert_eq!(s.length_m(), None);
    }

    #[test]
    fn test_irrelevant_fields_read_as_absent() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Mosaic);
        assert!(!s.set_surface_kind(SurfaceKind::Porcelain));
        s.set_piece_length_cm(Some(30.0));
        assert_eq!(s.piece_length_cm(), None);
        assert_eq!(s.surface_kind(), None);
        assert_eq!(s.unevenness_cm(), None);
    }

    #[test]
    fn test_area_priority() {
        let mut s = tile_room();
        s.set_opening_area_m2(Some(2.0));
        assert!((s.base_area().unwrap().0 - 18.0).abs() < 1e-12);
        assert!((s.gross_area().unwrap().0 - 20.0).abs() < 1e-12);

        s.set_total_area_m2(Some(25.0));
        assert!((s.base_area().unwrap().0 - 25.0).abs() < 1e-12);
        assert!((s.gross_area().unwrap().0 - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_wall_mode_area() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::WallTile);
        s.set_length_m(Some(3.0));
        s.set_width_m(Some(9.0));
        s.set_height_m(Some(2.5));
        s.set_wall_count(Some(4));
        assert_eq!(s.area_mode(), AreaMode::Wall);
        assert_eq!(s.width_m(), None);
        assert!((s.gross_area().unwrap().0 - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_baseboard_perimeter_and_area() {
        let mut s = tile_room();
        assert!(s.set_baseboard_enabled(true));
        s.set_baseboard_height_cm(Some(10.0));
        s.set_baseboard_deduction_m(Some(0.8));
        assert!((s.baseboard_net_perimeter().unwrap().0 - 17.2).abs() < 1e-12);
        assert!((s.baseboard_area().unwrap().0 - 1.72).abs() < 1e-12);

        s.set_baseboard_deduction_m(Some(50.0));
        assert_eq!(s.baseboard_net_perimeter().unwrap().0, 0.0);
    }

    #[test]
    fn test_baseboard_not_for_wall_tile() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::WallTile);
        assert!(!s.set_baseboard_enabled(true));

        s.set_covering_kind(CoveringKind::Marble);
        assert!(s.set_baseboard_enabled(true));
        s.set_application_surface(ApplicationSurface::Wall);
        assert!(s.active_baseboard().is_none());
    }

    #[test]
    fn test_effective_defaults() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Flagstone);
        assert_eq!(s.effective_joint_mm(), Some(10.0));
        assert_eq!(s.effective_thickness_mm(), Some(20.0));
        assert_eq!(s.effective_waste_percent(), 15.0);
        s.set_joint_mm(Some(5.0));
        assert_eq!(s.effective_joint_mm(), Some(5.0));
    }

    #[test]
    fn test_normalized_drops_invalid_json_values() {
        let json = r#"{
            "covering_kind": "tile",
            "surface_kind": "porcelain",
            "traffic_class": "heavy",
            "length_m": -3.0,
            "width_m": 4.0,
            "wall_count": 50,
            "waste_percent": 10.0
        }"#;
        let s = InputSnapshot::from_json(json).unwrap();
        assert_eq!(s.surface_kind(), Some(SurfaceKind::Porcelain));
        assert_eq!(s.traffic_class(), None);
        assert_eq!(s.length_m(), None);
        assert_eq!(s.width_m(), Some(4.0));
        assert_eq!(s.waste_percent(), Some(10.0));
    }

    #[test]
    fn test_perimeter_prefers_room_dimensions() {
        let mut s = InputSnapshot::new();
        s.set_covering_kind(CoveringKind::Tile);
        s.set_length_m(Some(10.0));
        s.set_width_m(Some(2.0));
        s.set_total_area_m2(Some(20.0));
        // 2 × (10 + 2), not 4 × √20
        assert!((s.computed_perimeter().unwrap().0 - 24.0).abs() < 1e-12);

        s.set_width_m(None);
        assert!((s.computed_perimeter().unwrap().0 - 4.0 * 20f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_serde_deserialize_normalizes() {
        let json = r#"{ "covering_kind": "wall_tile", "total_area_m2": -20.0, "wall_count": 99, "height_m": 2.5 }"#;
        let s: InputSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(s.total_area_m2(), None);
        assert_eq!(s.wall_count(), None);
        assert_eq!(s.height_m(), Some(2.5));
        assert_eq!(s.base_area(), None);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let s = tile_room();
        let json = serde_json::to_string(&s).unwrap();
        let back = InputSnapshot::from_json(&json).unwrap();
        assert_eq!(s, back);
    }
}
