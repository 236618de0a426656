//! Collision shapes
//!
//! Each shape carries a bounding-sphere radius that fully encloses it. Pairs
//! without a precise test fall back to comparing bounding spheres.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vector::Vector2;

/// Rejected collider dimensions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid geometry: circle radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f32 },
    #[error("invalid geometry: rectangle must have positive finite size, got {width}x{height}")]
    InvalidRectangle { width: f32, height: f32 },
}

/// Shape variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    Circle { radius: f32 },
    Rectangle { half_width: f32, half_height: f32 },
}

/// An immutable collision shape owned by one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    shape: ColliderShape,
    bounding_sphere_radius: f32,
}

#[inline]
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl Collider {
    pub fn circle(radius: f32) -> Result<Self, GeometryError> {
        if !is_positive(radius) {
            return Err(GeometryError::InvalidRadius { radius });
        }
        Ok(Self {
            shape: ColliderShape::Circle { radius },
            bounding_sphere_radius: radius,
        })
    }

    /// Axis-aligned rectangle from its full width and height
    pub fn rectangle(width: f32, height: f32) -> Result<Self, GeometryError> {
        if !is_positive(width) || !is_positive(height) {
            return Err(GeometryError::InvalidRectangle { width, height });
        }
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Ok(Self {
            shape: ColliderShape::Rectangle {
                half_width,
                half_height,
            },
            // Half diagonal, so the sphere contains every corner
            bounding_sphere_radius: Vector2::new(half_width, half_height).magnitude(),
        })
    }

    #[inline]
    pub fn shape(&self) -> ColliderShape {
        self.shape
    }

    #[inline]
    pub fn bounding_sphere_radius(&self) -> f32 {
        self.bounding_sphere_radius
    }

    /// Cheap test on enclosing circles
    pub fn bounding_sphere_overlaps(
        &self,
        other: &Collider,
        self_center: Vector2,
        other_center: Vector2,
    ) -> bool {
        self_center.distance(other_center)
            < self.bounding_sphere_radius + other.bounding_sphere_radius
    }

    /// Check whether the two shapes overlap at the given centres
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Collider, self_center: Vector2, other_center: Vector2) -> bool {
        match (self.shape, other.shape) {
            (
                ColliderShape::Rectangle {
                    half_width: aw,
                    half_height: ah,
                },
                ColliderShape::Rectangle {
                    half_width: bw,
                    half_height: bh,
                },
            ) => {
                let d = self_center - other_center;
                d.x().abs() < aw + bw && d.y().abs() < ah + bh
            }
            _ => self.bounding_sphere_overlaps(other, self_center, other_center),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circle_overlap_by_distance() {
        let a = Collider::circle(5.0).unwrap();
        let b = Collider::circle(5.0).unwrap();
        let origin = Vector2::ZERO;

        // distance 8 < 10
        assert!(a.overlaps(&b, origin, Vector2::new(8.0, 0.0)));
        // distance 11 >= 10
        assert!(!a.overlaps(&b, origin, Vector2::new(11.0, 0.0)));
        // touching is not overlapping
        assert!(!a.overlaps(&b, origin, Vector2::new(10.0, 0.0)));
    }

    #[test]
    fn test_rectangle_bounding_radius_is_half_diagonal() {
        let r = Collider::rectangle(6.0, 8.0).unwrap();
        assert_eq!(r.bounding_sphere_radius(), 5.0);
        assert_eq!(
            r.shape(),
            ColliderShape::Rectangle {
                half_width: 3.0,
                half_height: 4.0
            }
        );
    }

    #[test]
    fn test_rectangle_overlap_requires_both_axes() {
        let a = Collider::rectangle(80.0, 80.0).unwrap();
        let b = Collider::rectangle(20.0, 20.0).unwrap();
        let center = Vector2::ZERO;

        // Overlapping on both axes must be satisfiable
        assert!(a.overlaps(&b, center, Vector2::new(45.0, 45.0)));
        assert!(b.overlaps(&a, Vector2::new(45.0, 45.0), center));
        // Overlap on x only
        assert!(!a.overlaps(&b, center, Vector2::new(10.0, 60.0)));
        // Overlap on y only
        assert!(!a.overlaps(&b, center, Vector2::new(60.0, 10.0)));
        // Exactly touching edge
        assert!(!a.overlaps(&b, center, Vector2::new(50.0, 0.0)));
    }

    #[test]
    fn test_rectangle_corner_miss_despite_bounding_spheres() {
        let a = Collider::rectangle(20.0, 20.0).unwrap();
        let b = Collider::rectangle(20.0, 20.0).unwrap();
        let other = Vector2::new(21.0, 5.0);
        // Bounding spheres (r ~14.1 each) overlap but the boxes do not
        assert!(a.bounding_sphere_overlaps(&b, Vector2::ZERO, other));
        assert!(!a.overlaps(&b, Vector2::ZERO, other));
    }

    #[test]
    fn test_circle_rectangle_falls_back_to_bounding_sphere() {
        let circle = Collider::circle(10.0).unwrap();
        let rect = Collider::rectangle(60.0, 80.0).unwrap(); // radius 50

        assert!(circle.overlaps(&rect, Vector2::new(0.0, 59.0), Vector2::ZERO));
        assert!(rect.overlaps(&circle, Vector2::ZERO, Vector2::new(0.0, 59.0)));
        assert!(!circle.overlaps(&rect, Vector2::new(0.0, 61.0), Vector2::ZERO));
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        assert_eq!(
            Collider::circle(0.0),
            Err(GeometryError::InvalidRadius { radius: 0.0 })
        );
        assert!(Collider::circle(-1.0).is_err());
        assert!(Collider::circle(f32::NAN).is_err());
        assert!(Collider::rectangle(0.0, 10.0).is_err());
        assert!(Collider::rectangle(10.0, -2.0).is_err());
        assert!(Collider::rectangle(f32::INFINITY, 1.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_circle_overlap_symmetric(
            ra in 0.1f32..100.0,
            rb in 0.1f32..100.0,
            ax in -500.0f32..500.0,
            ay in -500.0f32..500.0,
            bx in -500.0f32..500.0,
            by in -500.0f32..500.0,
        ) {
            let a = Collider::circle(ra).unwrap();
            let b = Collider::circle(rb).unwrap();
            let pa = Vector2::new(ax, ay);
            let pb = Vector2::new(bx, by);
            prop_assert_eq!(a.overlaps(&b, pa, pb), b.overlaps(&a, pb, pa));
        }

        #[test]
        fn prop_rectangles_separated_on_an_axis_never_overlap(
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            gap in 0.0f32..50.0,
            offset in -200.0f32..200.0,
            on_x in any::<bool>(),
        ) {
            let a = Collider::rectangle(w, h).unwrap();
            let b = Collider::rectangle(w, h).unwrap();
            let other = if on_x {
                Vector2::new(w + gap, offset)
            } else {
                Vector2::new(offset, h + gap)
            };
            prop_assert!(!a.overlaps(&b, Vector2::ZERO, other));
        }

        #[test]
        fn prop_rectangles_overlapping_on_both_axes_overlap(
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            fx in -0.99f32..0.99,
            fy in -0.99f32..0.99,
        ) {
            let a = Collider::rectangle(w, h).unwrap();
            let b = Collider::rectangle(w, h).unwrap();
            // Centres closer than the combined half extents on both axes
            let other = Vector2::new(fx * w, fy * h);
            prop_assert!(a.overlaps(&b, Vector2::ZERO, other));
        }
    }
}
