use thiserror::Error;

use crate::data::model::{DataGroup, DataType, GroupError, NetObject};
use crate::geometry::{DirectionCosines, GeometryError, Line, Plane};

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("need at least {needed} measurements, got {got}")]
    NotEnoughData { needed: usize, got: usize },

    #[error("expected a group of {expected} data, got {found:?}")]
    WrongDataType {
        expected: DataType,
        found: Option<DataType>,
    },

    #[error("top limb proportion must lie in 0..=1, got {0}")]
    InvalidProportion(f64),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Group(#[from] GroupError),
}

// ---------------------------------------------------------------------------
// Plane ↔ pole conversion
// ---------------------------------------------------------------------------

fn expect_type(group: &DataGroup, expected: DataType) -> Result<(), AnalysisError> {
    match group.data_type() {
        Some(found) if found == expected => Ok(()),
        None if group.is_empty() => Ok(()),
        found => Err(AnalysisError::WrongDataType { expected, found }),
    }
}

/// A new line group holding the pole of every plane in `planes`.
pub fn planes_to_poles(planes: &DataGroup) -> Result<DataGroup, AnalysisError> {
    expect_type(planes, DataType::Plane)?;
    let mut out = DataGroup::with_type(format!("{} (poles)", planes.name), DataType::Line);
    out.enabled = planes.enabled;
    for netobj in planes.net_objects() {
        if let NetObject::Plane(plane) = netobj {
            out.add_net_object(NetObject::Line(plane.pole()))?;
        }
    }
    Ok(out)
}

/// A new plane group holding the plane perpendicular to every line in
/// `poles`.
pub fn poles_to_planes(poles: &DataGroup) -> Result<DataGroup, AnalysisError> {
    expect_type(poles, DataType::Line)?;
    let mut out = DataGroup::with_type(format!("{} (planes)", poles.name), DataType::Plane);
    out.enabled = poles.enabled;
    for netobj in poles.net_objects() {
        if let NetObject::Line(pole) = netobj {
            out.add_net_object(NetObject::Plane(Plane::from_pole(pole)))?;
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Fold fitting
// ---------------------------------------------------------------------------

/// Best-fit description of a cylindrical fold from bedding on both limbs.
///
/// Planes contribute their poles, lines are taken to be poles to bedding.
/// The fold axis is the direction least represented among the poles (the
/// smallest eigenvector of their orientation tensor); the profile plane is
/// perpendicular to it.
#[derive(Debug, Clone)]
pub struct Fold {
    poles: Vec<Line>,
    /// Share of the data collected on the limb lying along the profile
    /// plane's strike from the hinge. For a 090/80 profile plane that is the
    /// east limb.
    top_limb_proportion: f64,
}

impl Fold {
    pub fn new<'a>(
        items: impl IntoIterator<Item = &'a NetObject>,
        top_limb_proportion: f64,
    ) -> Result<Self, AnalysisError> {
        if !(0.0..=1.0).contains(&top_limb_proportion) {
            return Err(AnalysisError::InvalidProportion(top_limb_proportion));
        }
        let poles: Vec<Line> = items
            .into_iter()
            .filter_map(|netobj| match netobj {
                NetObject::Line(line) => Some(*line),
                NetObject::Plane(plane) => Some(plane.pole()),
                NetObject::Rotation(_) => None,
            })
            .collect();
        if poles.len() < 2 {
            return Err(AnalysisError::NotEnoughData {
                needed: 2,
                got: poles.len(),
            });
        }
        Ok(Self {
            poles,
            top_limb_proportion,
        })
    }

    /// The fold axis, pointing into the lower hemisphere.
    pub fn fold_axis(&self) -> Line {
        let tensor = orientation_tensor(self.poles.iter().map(Line::direction_cosines));
        let (values, vectors) = symmetric_eigen(tensor);
        let smallest = (0..3)
            .min_by(|&a, &b| values[a].total_cmp(&values[b]))
            .unwrap_or(0);
        let axis = DirectionCosines::new(
            vectors[0][smallest],
            vectors[1][smallest],
            vectors[2][smallest],
        );
        let axis = if axis.down < 0.0 { -axis } else { axis };
        Line::from_direction_cosines(axis)
    }

    /// The plane perpendicular to the fold axis.
    pub fn profile_plane(&self) -> Plane {
        Plane::from_pole(&self.fold_axis())
    }

    /// The plane through the fold axis and the hinge-zone pole.
    ///
    /// Poles are ordered along the profile plane's strike; the hinge sits
    /// after the first `top_limb_proportion` of them.
    pub fn axial_plane(&self) -> Result<Plane, AnalysisError> {
        let axis = self.fold_axis();
        let along_strike = Line::new(0.0, self.profile_plane().strike).direction_cosines();

        let mut ordered: Vec<DirectionCosines> =
            self.poles.iter().map(Line::direction_cosines).collect();
        ordered.sort_by(|a, b| {
            b.dot_product(&along_strike)
                .total_cmp(&a.dot_product(&along_strike))
        });

        let n = ordered.len();
        let split = (self.top_limb_proportion * n as f64).round_ties_even() as usize;
        let split = split.clamp(1, n - 1);
        let hinge: DirectionCosines = ordered[split - 1..=split].iter().sum();
        let hinge = Line::from_direction_cosines(hinge);

        Ok(Plane::from_spanning_lines(&hinge, &axis)?)
    }

    /// Profile and axial planes as a group, plus the fold axis as a group.
    pub fn to_groups(&self, name: &str) -> Result<(DataGroup, DataGroup), AnalysisError> {
        let mut planes = DataGroup::with_type(format!("{name} (fold planes)"), DataType::Plane);
        for plane in [self.profile_plane(), self.axial_plane()?] {
            planes.add_net_object(NetObject::Plane(plane))?;
        }
        let mut axis = DataGroup::with_type(format!("{name} (fold axis)"), DataType::Line);
        axis.add_net_object(NetObject::Line(self.fold_axis()))?;
        Ok((planes, axis))
    }
}

/// Sum of the outer products `v vᵀ` of unit vectors.
fn orientation_tensor(vectors: impl Iterator<Item = DirectionCosines>) -> [[f64; 3]; 3] {
    let mut tensor = [[0.0; 3]; 3];
    for v in vectors {
        let v = v.normalised();
        let v = [v.north, v.east, v.down];
        for (i, row) in tensor.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell += v[i] * v[j];
            }
        }
    }
    tensor
}

/// Jacobi eigen decomposition of a symmetric 3×3 matrix.
///
/// Returns the eigenvalues and a matrix whose columns are the matching unit
/// eigenvectors.
fn symmetric_eigen(mut a: [[f64; 3]; 3]) -> ([f64; 3], [[f64; 3]; 3]) {
    const N: usize = 3;
    let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    for _ in 0..100 {
        let off_diag: f64 = (0..N)
            .flat_map(|i| ((i + 1)..N).map(move |j| (i, j)))
            .map(|(i, j)| a[i][j].abs())
            .sum();
        if off_diag < 1e-14 {
            break;
        }

        for i in 0..N {
            for j in (i + 1)..N {
                if a[i][j].abs() < 1e-15 {
                    continue;
                }
                let tau = (a[j][j] - a[i][i]) / (2.0 * a[i][j]);
                let t = if tau >= 0.0 {
                    1.0 / (tau + (1.0 + tau * tau).sqrt())
                } else {
                    -1.0 / (-tau + (1.0 + tau * tau).sqrt())
                };
                let cos = 1.0 / (1.0 + t * t).sqrt();
                let sin = t * cos;

                let (aii, ajj, aij) = (a[i][i], a[j][j], a[i][j]);
                a[i][i] = cos * cos * aii - 2.0 * sin * cos * aij + sin * sin * ajj;
                a[j][j] = sin * sin * aii + 2.0 * sin * cos * aij + cos * cos * ajj;
                a[i][j] = 0.0;
                a[j][i] = 0.0;

                for r in 0..N {
                    if r == i || r == j {
                        continue;
                    }
                    let (ri, rj) = (a[r][i], a[r][j]);
                    a[r][i] = cos * ri - sin * rj;
                    a[i][r] = a[r][i];
                    a[r][j] = sin * ri + cos * rj;
                    a[j][r] = a[r][j];
                }

                for row in v.iter_mut() {
                    let (vi, vj) = (row[i], row[j]);
                    row[i] = cos * vi - sin * vj;
                    row[j] = sin * vi + cos * vj;
                }
            }
        }
    }

    ([a[0][0], a[1][1], a[2][2]], v)
}
