use lookout_core::{RenderEntity, RenderRecord, Rgba, ShipType, Vessel};

pub static DARK_IN_COVERAGE_COLOR: Rgba = [220, 38, 38, 255];
pub static DARK_OUT_OF_COVERAGE_COLOR: Rgba = [107, 114, 128, 179];
pub static MILITARY_COLOR: Rgba = [239, 68, 68, 255];
pub static COMMERCIAL_COLOR: Rgba = [34, 197, 94, 255];
pub static UNKNOWN_COLOR: Rgba = [234, 179, 8, 255];

static DARK_IN_COVERAGE_RADIUS: f64 = 8000.0;
static CLUSTER_BASE_RADIUS: f64 = 12000.0;
static CLUSTER_MEMBER_RADIUS: f64 = 1000.0;
static DEFAULT_RADIUS: f64 = 4000.0;

static MILITARY_ICON: &str = "⚓";
static COMMERCIAL_ICON: &str = "🚢";
static PIN_ICON: &str = "📍";

pub fn color(vessel: &Vessel) -> Rgba {
    match (vessel.is_dark, vessel.in_coverage, vessel.ship_type) {
        (true, true, _) => DARK_IN_COVERAGE_COLOR,
        (true, false, _) => DARK_OUT_OF_COVERAGE_COLOR,
        (false, _, ShipType::Military) => MILITARY_COLOR,
        (false, _, ShipType::Commercial) => COMMERCIAL_COLOR,
        (false, _, ShipType::Unknown) => UNKNOWN_COLOR,
    }
}

/// Radius in meters, a dark vessel inside coverage is highlighted even when it represents a
/// cluster.
pub fn radius(entity: &RenderEntity) -> f64 {
    let vessel = entity.vessel();
    if vessel.is_dark && vessel.in_coverage {
        return DARK_IN_COVERAGE_RADIUS;
    }

    match entity.cluster_size() {
        Some(size) => CLUSTER_BASE_RADIUS + size as f64 * CLUSTER_MEMBER_RADIUS,
        None => DEFAULT_RADIUS,
    }
}

pub fn icon(entity: &RenderEntity) -> String {
    if let Some(size) = entity.cluster_size() {
        return format!("{PIN_ICON}{size}");
    }

    match entity.vessel().ship_type {
        ShipType::Military => MILITARY_ICON,
        ShipType::Commercial => COMMERCIAL_ICON,
        ShipType::Unknown => PIN_ICON,
    }
    .to_string()
}

pub fn to_render_record(entity: &RenderEntity, visible: bool) -> RenderRecord {
    let vessel = entity.vessel();

    RenderRecord {
        id: vessel.id(),
        position: [vessel.estimated_longitude, vessel.estimated_latitude],
        original_position: [vessel.longitude, vessel.latitude],
        color: color(vessel),
        radius: radius(entity),
        icon: icon(entity),
        visible,
        cluster_size: entity.cluster_size(),
    }
}
