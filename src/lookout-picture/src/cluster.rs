use std::{cmp::Reverse, collections::HashMap, time::Duration};

use geo::{Centroid, MultiPoint, Point};
use lookout_core::{
    Cluster, DetailLevel, RenderEntity, RenderRecord, Vessel, Viewport, ViewportBounds,
    normalize_longitude,
};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::debug;

use crate::render::to_render_record;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    /// Upper bound on the number of vessels considered for rendering.
    pub max_vessels: usize,
    /// Zoom level from which every vessel is rendered individually.
    pub no_cluster_zoom: f64,
    /// Zoom level from which the fine grid is used.
    pub fine_zoom: f64,
    pub coarse_cell_degrees: f64,
    pub fine_cell_degrees: f64,
    pub viewport_padding_degrees: f64,
    #[serde(with = "humantime_serde")]
    pub update_throttle: Duration,
    pub high_detail_zoom: f64,
    pub medium_detail_zoom: f64,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            max_vessels: 200,
            no_cluster_zoom: 8.0,
            fine_zoom: 4.0,
            coarse_cell_degrees: 0.5,
            fine_cell_degrees: 0.2,
            viewport_padding_degrees: 0.5,
            update_throttle: Duration::from_millis(100),
            high_detail_zoom: 10.0,
            medium_detail_zoom: 6.0,
        }
    }
}

/// Reduces a vessel set to a bounded number of render entities for a viewport.
#[derive(Debug, Clone)]
pub struct ClusterEngine {
    settings: ClusterSettings,
    bounds: Option<ViewportBounds>,
    last_update: Option<Instant>,
}

impl ClusterEngine {
    pub fn new(settings: ClusterSettings) -> Self {
        Self {
            settings,
            bounds: None,
            last_update: None,
        }
    }

    pub fn settings(&self) -> &ClusterSettings {
        &self.settings
    }

    pub fn bounds(&self) -> Option<&ViewportBounds> {
        self.bounds.as_ref()
    }

    pub fn update_viewport(&mut self, viewport: &Viewport) {
        self.bounds = Some(ViewportBounds::from_viewport(viewport));
    }

    /// Everything is visible until a viewport has been set.
    pub fn is_visible(&self, latitude: f64, longitude: f64) -> bool {
        match &self.bounds {
            None => true,
            Some(bounds) => {
                bounds.contains_padded(latitude, longitude, self.settings.viewport_padding_degrees)
            }
        }
    }

    /// Returns true at most once per throttle interval and records the accepted update.
    pub fn should_update(&mut self, now: Instant) -> bool {
        match self.last_update {
            Some(last) if now.saturating_duration_since(last) < self.settings.update_throttle => {
                false
            }
            _ => {
                self.last_update = Some(now);
                true
            }
        }
    }

    pub fn detail_level(&self, zoom: f64) -> DetailLevel {
        if zoom >= self.settings.high_detail_zoom {
            DetailLevel::High
        } else if zoom >= self.settings.medium_detail_zoom {
            DetailLevel::Medium
        } else {
            DetailLevel::Low
        }
    }

    pub fn cluster(&self, vessels: &[Vessel], zoom: f64) -> Vec<RenderEntity> {
        let mut candidates: Vec<&Vessel> =
            vessels.iter().filter(|v| v.has_finite_position()).collect();

        if candidates.len() > self.settings.max_vessels {
            debug!(
                "capping render set from {} to {} vessels",
                candidates.len(),
                self.settings.max_vessels
            );
            candidates.sort_by_key(|v| Reverse(v.priority_score()));
            candidates.truncate(self.settings.max_vessels);
        }

        if zoom >= self.settings.no_cluster_zoom {
            return candidates
                .into_iter()
                .map(|v| RenderEntity::Single(v.clone()))
                .collect();
        }

        let cell_degrees = if zoom < self.settings.fine_zoom {
            self.settings.coarse_cell_degrees
        } else {
            self.settings.fine_cell_degrees
        };

        let mut cell_index: HashMap<(i64, i64), usize> = HashMap::new();
        let mut cells: Vec<Vec<&Vessel>> = Vec::new();

        for vessel in candidates {
            let key = (
                (vessel.latitude / cell_degrees).floor() as i64,
                (vessel.longitude / cell_degrees).floor() as i64,
            );

            match cell_index.get(&key) {
                Some(&idx) => cells[idx].push(vessel),
                None => {
                    cell_index.insert(key, cells.len());
                    cells.push(vec![vessel]);
                }
            }
        }

        cells.into_iter().filter_map(to_entity).collect()
    }

    pub fn reduce(&mut self, vessels: &[Vessel], viewport: &Viewport) -> Vec<RenderRecord> {
        self.update_viewport(viewport);

        self.cluster(vessels, viewport.zoom)
            .iter()
            .map(|entity| {
                let vessel = entity.vessel();
                let visible = self.is_visible(vessel.latitude, vessel.longitude);
                to_render_record(entity, visible)
            })
            .collect()
    }
}

fn to_entity(members: Vec<&Vessel>) -> Option<RenderEntity> {
    match members.len() {
        0 => None,
        1 => Some(RenderEntity::Single(members[0].clone())),
        _ => {
            let priority: &Vessel = members
                .iter()
                .find(|v| v.is_military())
                .or_else(|| members.iter().find(|v| v.is_dark))
                .unwrap_or(&members[0]);

            let mut representative = priority.clone();

            if let Some(reported) = mean_position(members.iter().map(|v| v.position())) {
                representative.latitude = reported.y();
                representative.longitude = normalize_longitude(reported.x());
            }
            if let Some(estimated) =
                mean_position(members.iter().map(|v| v.estimated_position()))
            {
                representative.estimated_latitude = estimated.y();
                representative.estimated_longitude = normalize_longitude(estimated.x());
            }

            Some(RenderEntity::Cluster(Cluster {
                representative,
                members: members.into_iter().cloned().collect(),
            }))
        }
    }
}

fn mean_position(points: impl Iterator<Item = Point<f64>>) -> Option<Point<f64>> {
    points.collect::<MultiPoint<f64>>().centroid()
}
