//! # Reference Tables
//!
//! Renders the engine's lookup tables (consumption, defaults, layers,
//! packaging) as a markdown document, so estimators can audit the numbers
//! behind every line of a material list.
//!
//! The document is built from the same constants and functions the
//! calculations use; `cargo run --bin gen-tables` writes it to
//! `estimate_core/TABLES.md`.

use crate::calculations::consumption::{
    self, ADHESIVE_BASE_TABLE, ADHESIVE_MAX_KG_M2, ADHESIVE_MIN_KG_M2, GROUT_MAX_KG_M2, GROUT_MIN_KG_M2,
    LARGE_FORMAT_CM, PORCELAIN_MULTIPLIER, THICK_PIECE_MM, THICK_PIECE_MULTIPLIER,
};
use crate::calculations::pavement::{self, BaseCourse};
use crate::calculations::{extras, mosaic, stone};
use crate::model::defaults;
use crate::model::{CoveringKind, EnvironmentClass, GroutClass, MosaicFormat, SurfaceKind, TrafficClass, WaterproofingKind};
use crate::settings::EstimatorSettings;

/// Render every reference table for the given settings.
pub fn generate_tables_markdown(settings: &EstimatorSettings) -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Tessera Reference Tables

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-tables`

Every consumption rate, default and package size used by the estimator.
Quantities include the waste percentage; purchase notes round up to whole packages.

---

"#,
    );

    push_defaults(&mut output);
    push_adhesive(&mut output);
    push_grout(&mut output, settings);
    push_mosaic(&mut output);
    push_stone(&mut output, settings);
    push_pavement(&mut output, settings);
    push_waterproofing(&mut output, settings);
    push_packages(&mut output, settings);

    output
}

// ============================================================================
// Sections
// ============================================================================

fn push_defaults(output: &mut String) {
    output.push_str("## Covering Defaults\n\n");
    output.push_str("| Covering | Joint (mm) | Thickness (mm) | Waste (%) | Nominal piece (cm) |\n");
    output.push_str("|----------|------------|----------------|-----------|--------------------|\n");
    for kind in CoveringKind::ALL {
        let surface = kind.uses_surface_kind().then_some(SurfaceKind::Ceramic);
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            kind.display_name(),
            optional(defaults::default_joint_mm(kind)),
            optional(defaults::default_thickness_mm(kind, surface)),
            defaults::default_waste_percent(kind),
            defaults::nominal_piece_cm(kind)
                .map(|(l, w)| format!("{} × {}", l, w))
                .unwrap_or_else(|| "-".to_string()),
        ));
    }
    output.push_str("\nTile and wall tile thickness shown for ceramic.\n\n");
}

fn push_adhesive(output: &mut String) {
    output.push_str("## Adhesive Mortar\n\n");
    output.push_str("| Longest side up to (cm) | Base rate (kg/m²) |\n");
    output.push_str("|-------------------------|-------------------|\n");
    for (limit, rate) in ADHESIVE_BASE_TABLE {
        let limit = if limit.is_finite() {
            format!("{}", limit)
        } else {
            "larger".to_string()
        };
        output.push_str(&format!("| {} | {} |\n", limit, rate));
    }
    output.push('\n');

    output.push_str("**Multipliers:**\n");
    output.push_str(&format!("- porcelain: × {}\n", PORCELAIN_MULTIPLIER));
    output.push_str(&format!(
        "- pieces {} mm or thicker: × {}\n",
        THICK_PIECE_MM, THICK_PIECE_MULTIPLIER
    ));
    for env in EnvironmentClass::ALL {
        output.push_str(&format!(
            "- {}: × {}\n",
            env.display_name().to_lowercase(),
            consumption::environment_multiplier(Some(env))
        ));
    }
    output.push_str(&format!(
        "- result clamped to {}–{} kg/m²\n\n",
        ADHESIVE_MIN_KG_M2, ADHESIVE_MAX_KG_M2
    ));

    output.push_str("**Class:** ACIII for porcelain, wet areas, stone, mosaic and pieces from ");
    output.push_str(&format!(
        "{} cm; ACII for semi-humid areas and wall tile; otherwise ACI.\n\n",
        LARGE_FORMAT_CM
    ));
}

fn push_grout(output: &mut String, settings: &EstimatorSettings) {
    output.push_str("## Grout\n\n");
    output.push_str("**Formula:** `kg/m² = ((L + W) / (L × W)) × joint × depth × density`\n\n");
    output.push_str("| Environment | Class | Density (kg/m³) |\n");
    output.push_str("|-------------|-------|-----------------|\n");
    for env in EnvironmentClass::ALL {
        let class = consumption::grout_class(Some(env));
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            env.display_name(),
            class.code(),
            settings.densities.grout(class)
        ));
    }
    output.push_str(&format!(
        "\nUnknown environment uses {}. Rate clamped to {}–{} kg/m².\n\n",
        GroutClass::CementitiousType1.code(),
        GROUT_MIN_KG_M2,
        GROUT_MAX_KG_M2
    ));
}

fn push_mosaic(output: &mut String) {
    output.push_str("## Mosaic Formats\n\n");
    output.push_str("| Format | Sheet (cm) | Piece (cm) | Thickness (mm) | Pieces per sheet |\n");
    output.push_str("|--------|------------|------------|----------------|------------------|\n");
    for format in MosaicFormat::ALL {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            format.display_name(),
            format.sheet_side_cm(),
            format.piece_side_cm(),
            format.thickness_mm(),
            mosaic::pieces_per_sheet(format)
        ));
    }
    output.push('\n');
}

fn push_stone(output: &mut String, settings: &EstimatorSettings) {
    output.push_str("## Stone Setting Bed\n\n");
    output.push_str(&format!(
        "Sand-cement bed when unevenness ≥ {} cm or thickness ≥ {} mm, otherwise adhesive ACIII.\n\n",
        stone::SAND_CEMENT_UNEVENNESS_CM,
        stone::SAND_CEMENT_THICKNESS_MM
    ));
    output.push_str("| Unevenness (cm) | Bed (cm) |\n");
    output.push_str("|-----------------|----------|\n");
    for unevenness in [1.0, 2.0, 2.5, 3.0, 4.0, 5.0] {
        output.push_str(&format!("| {} | {} |\n", unevenness, stone::bed_thickness_cm(unevenness)));
    }
    output.push_str(&format!(
        "\nCement: {} kg per m³ of mortar. Sand: mortar volume × {}.\n\n",
        settings.densities.bed_cement_kg_per_m3, settings.constants.bed_sand_bulking
    ));
}

fn push_pavement(output: &mut String, settings: &EstimatorSettings) {
    output.push_str("## Interlocking Pavement\n\n");
    output.push_str("| Traffic | Sand bed (cm) | Base (cm) | Base course |\n");
    output.push_str("|---------|---------------|-----------|-------------|\n");
    for traffic in TrafficClass::ALL {
        let build_up = pavement::layers(traffic);
        let base = match build_up.base {
            BaseCourse::GradedCrushedStone => "graded crushed stone",
            BaseCourse::ConcreteSlab => "concrete slab + welded mesh",
        };
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            traffic.display_name(),
            build_up.sand_bed_m * 100.0,
            build_up.base_m * 100.0,
            base
        ));
    }
    let constants = &settings.constants;
    output.push_str(&format!(
        "\nMesh panels {} × {} m with {}% overlap ({} m² effective).\n\n",
        constants.mesh_panel_length_m,
        constants.mesh_panel_width_m,
        constants.mesh_overlap_percent,
        constants.mesh_panel_effective_area_m2()
    ));

    output.push_str("**Recommended waterproofing:**\n\n");
    output.push_str("| Environment |");
    for traffic in TrafficClass::ALL {
        output.push_str(&format!(" {} |", traffic.display_name()));
    }
    output.push_str("\n|-------------|");
    for _ in TrafficClass::ALL {
        output.push_str("---|");
    }
    output.push('\n');
    for env in EnvironmentClass::ALL {
        output.push_str(&format!("| {} |", env.display_name()));
        for traffic in TrafficClass::ALL {
            let name = pavement::recommended_waterproofing(env, traffic)
                .map(|k| k.display_name())
                .unwrap_or("-");
            output.push_str(&format!(" {} |", name));
        }
        output.push('\n');
    }
    output.push('\n');
}

fn push_waterproofing(output: &mut String, settings: &EstimatorSettings) {
    output.push_str("## Waterproofing\n\n");
    output.push_str("| Product | Rate per m² | Unit | Under pavers |\n");
    output.push_str("|---------|-------------|------|--------------|\n");
    for kind in WaterproofingKind::ALL {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            kind.display_name(),
            settings.constants.waterproofing_rate(kind),
            extras::waterproofing_unit(kind).symbol(),
            if kind.is_pavement_kind() { "yes" } else { "no" }
        ));
    }
    output.push_str(&format!(
        "\nFloors add a {} m upturn along the perimeter. Default product: ",
        settings.constants.waterproofing_upturn_m
    ));
    let defaults: Vec<String> = EnvironmentClass::ALL
        .iter()
        .filter_map(|env| {
            extras::default_waterproofing(*env)
                .map(|kind| format!("{} → {}", env.display_name().to_lowercase(), kind.display_name()))
        })
        .collect();
    output.push_str(&defaults.join(", "));
    output.push_str(".\n\n");
}

fn push_packages(output: &mut String, settings: &EstimatorSettings) {
    let packages = &settings.packages;
    output.push_str("## Packaging\n\n");
    output.push_str("| Material | Package sizes |\n");
    output.push_str("|----------|---------------|\n");
    let rows = [
        ("Adhesive mortar (kg)", packages.adhesive_kg.clone()),
        ("Grout (kg)", packages.grout_kg.clone()),
        ("Spacers (pc)", packages.spacers.clone()),
        ("Cement (kg)", vec![packages.cement_bag_kg]),
    ];
    for (name, sizes) in rows {
        output.push_str(&format!("| {} | {} |\n", name, sizes_list(&sizes)));
    }
    for kind in WaterproofingKind::ALL {
        output.push_str(&format!(
            "| {} ({}) | {} |\n",
            kind.display_name(),
            extras::waterproofing_unit(kind).symbol(),
            sizes_list(&packages.waterproofing_sizes(kind))
        ));
    }
    output.push('\n');
}

fn sizes_list(sizes: &[f64]) -> String {
    sizes.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ")
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
