use geo::{Rect, coord};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

/// Approximate area covered by a viewport, derived from the web mercator tile pyramid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds(Rect<f64>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum DetailLevel {
    High,
    Medium,
    Low,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            latitude: 13.0,
            longitude: 100.5,
            zoom: 5.0,
        }
    }
}

impl ViewportBounds {
    pub fn from_viewport(viewport: &Viewport) -> Self {
        let scale = 2f64.powf(viewport.zoom);
        let latitude_delta = 180.0 / scale;
        let longitude_delta = 360.0 / scale;

        Self(Rect::new(
            coord! {
                x: viewport.longitude - longitude_delta / 2.0,
                y: viewport.latitude - latitude_delta / 2.0,
            },
            coord! {
                x: viewport.longitude + longitude_delta / 2.0,
                y: viewport.latitude + latitude_delta / 2.0,
            },
        ))
    }

    pub fn west(&self) -> f64 {
        self.0.min().x
    }

    pub fn east(&self) -> f64 {
        self.0.max().x
    }

    pub fn south(&self) -> f64 {
        self.0.min().y
    }

    pub fn north(&self) -> f64 {
        self.0.max().y
    }

    /// Inclusive containment check with every edge pushed out by `padding` degrees.
    pub fn contains_padded(&self, latitude: f64, longitude: f64, padding: f64) -> bool {
        latitude >= self.south() - padding
            && latitude <= self.north() + padding
            && longitude >= self.west() - padding
            && longitude <= self.east() + padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_centered_on_viewport() {
        let bounds = ViewportBounds::from_viewport(&Viewport {
            latitude: 10.0,
            longitude: 100.0,
            zoom: 2.0,
        });

        assert_eq!(bounds.south(), 10.0 - 22.5);
        assert_eq!(bounds.north(), 10.0 + 22.5);
        assert_eq!(bounds.west(), 100.0 - 45.0);
        assert_eq!(bounds.east(), 100.0 + 45.0);
    }

    #[test]
    fn test_contains_padded_is_inclusive() {
        let bounds = ViewportBounds::from_viewport(&Viewport {
            latitude: 0.0,
            longitude: 0.0,
            zoom: 8.0,
        });

        let north = bounds.north();
        assert!(bounds.contains_padded(north + 0.5, 0.0, 0.5));
        assert!(!bounds.contains_padded(north + 0.51, 0.0, 0.5));
    }
}
