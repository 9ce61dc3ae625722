//! Point, plane, and matrix payloads carried by script values.
//!
//! [`Point4`] doubles as a plane, an axis-angle, and a quaternion. Quaternions
//! are stored vector part first and scalar part last (`{x y z w}`), so the
//! first three components always name the relevant axis.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3-component point or vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Point3 {
    /// Creates a point from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the vector from the origin.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Point3) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A 4-component value: plane, axis-angle, or quaternion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point4 {
    /// X component (plane normal x, axis x, or quaternion i).
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// W component (plane offset, angle, or quaternion scalar part).
    pub w: f64,
}

impl Point4 {
    /// Creates a 4-vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Repacks a quaternion given scalar-first (`q0 + q1 i + q2 j + q3 k`)
    /// into the vector-first storage order.
    #[must_use]
    pub const fn from_quaternion(q0: f64, q1: f64, q2: f64, q3: f64) -> Self {
        Self::new(q1, q2, q3, q0)
    }

    /// Euclidean distance in four dimensions.
    #[must_use]
    pub fn distance(&self, other: &Point4) -> f64 {
        let (dx, dy, dz, dw) = (
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        );
        (dx * dx + dy * dy + dz * dz + dw * dw).sqrt()
    }

    /// Signed distance from this plane to `point`.
    #[must_use]
    pub fn distance_to_plane(&self, point: &Point3) -> f64 {
        let normal = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        (self.x * point.x + self.y * point.y + self.z * point.z + self.w) / normal
    }
}

macro_rules! square_matrix {
    ($name:ident, $n:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name {
            /// Elements in row-major order.
            pub rows: [[f64; $n]; $n],
        }

        impl $name {
            /// Dimension of the matrix.
            pub const DIM: usize = $n;

            /// Creates the identity matrix.
            #[must_use]
            pub fn identity() -> Self {
                let mut rows = [[0.0; $n]; $n];
                for (i, row) in rows.iter_mut().enumerate() {
                    row[i] = 1.0;
                }
                Self { rows }
            }

            /// Builds a matrix from row-major elements.
            ///
            /// Returns `None` unless exactly `DIM * DIM` elements are given.
            #[must_use]
            pub fn from_elements(elements: &[f64]) -> Option<Self> {
                if elements.len() != $n * $n {
                    return None;
                }
                let mut rows = [[0.0; $n]; $n];
                for (i, row) in rows.iter_mut().enumerate() {
                    row.copy_from_slice(&elements[i * $n..(i + 1) * $n]);
                }
                Some(Self { rows })
            }

            /// Element at zero-based `row`, `col`.
            #[must_use]
            pub fn get(&self, row: usize, col: usize) -> f64 {
                self.rows[row][col]
            }

            /// Sets the element at zero-based `row`, `col`.
            pub fn set(&mut self, row: usize, col: usize, value: f64) {
                self.rows[row][col] = value;
            }

            /// Copy of a zero-based row.
            #[must_use]
            pub fn row(&self, row: usize) -> [f64; $n] {
                self.rows[row]
            }

            /// Copy of a zero-based column.
            #[must_use]
            pub fn column(&self, col: usize) -> [f64; $n] {
                let mut out = [0.0; $n];
                for (i, row) in self.rows.iter().enumerate() {
                    out[i] = row[col];
                }
                out
            }

            /// Replaces a zero-based row.
            pub fn set_row(&mut self, row: usize, data: &[f64; $n]) {
                self.rows[row] = *data;
            }

            /// Replaces a zero-based column.
            pub fn set_column(&mut self, col: usize, data: &[f64; $n]) {
                for (row, value) in self.rows.iter_mut().zip(data) {
                    row[col] = *value;
                }
            }
        }
    };
}

square_matrix!(Matrix3, 3, "A 3×3 rotation or general linear matrix.");
square_matrix!(Matrix4, 4, "A 4×4 homogeneous transform.");

impl Matrix3 {
    /// Applies the matrix to `point`.
    #[must_use]
    pub fn transform(&self, point: &Point3) -> Point3 {
        let m = &self.rows;
        Point3::new(
            m[0][0] * point.x + m[0][1] * point.y + m[0][2] * point.z,
            m[1][0] * point.x + m[1][1] * point.y + m[1][2] * point.z,
            m[2][0] * point.x + m[2][1] * point.y + m[2][2] * point.z,
        )
    }
}

impl Matrix4 {
    /// Applies the transform (rotation plus translation) to `point`.
    #[must_use]
    pub fn transform(&self, point: &Point3) -> Point3 {
        let m = &self.rows;
        Point3::new(
            m[0][0] * point.x + m[0][1] * point.y + m[0][2] * point.z + m[0][3],
            m[1][0] * point.x + m[1][1] * point.y + m[1][2] * point.z + m[1][3],
            m[2][0] * point.x + m[2][1] * point.y + m[2][2] * point.z + m[2][3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_length_and_distance() {
        let p = Point3::new(3.0, 4.0, 0.0);
        assert!((p.length() - 5.0).abs() < 1e-12);
        assert!((p.distance(&Point3::default()) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn quaternion_repack_is_vector_first() {
        let q = Point4::from_quaternion(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q, Point4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn plane_distance_to_origin() {
        let plane = Point4::new(0.0, 0.0, 2.0, 4.0);
        assert!((plane.distance_to_plane(&Point3::default()) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn matrix_rows_and_columns() {
        let mut m = Matrix3::from_elements(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        assert_eq!(m.row(1), [4.0, 5.0, 6.0]);
        assert_eq!(m.column(2), [3.0, 6.0, 9.0]);
        m.set_column(0, &[0.0, 0.0, 0.0]);
        assert_eq!(m.get(2, 0), 0.0);
        assert!(Matrix3::from_elements(&[1.0; 8]).is_none());
    }

    #[test]
    fn matrix4_transform_uses_translation() {
        let mut m = Matrix4::identity();
        m.set(0, 3, 3.0);
        m.set(1, 3, 4.0);
        assert!((m.transform(&Point3::default()).length() - 5.0).abs() < 1e-12);
    }
}
