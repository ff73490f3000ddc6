/// A flat, subdivided rectangle in the xy plane, centred on the origin.
///
/// Vertices are laid out row by row from the top edge (`y = height / 2`)
/// downward; uv `(0, 1)` is the top-left corner. Each grid cell is two
/// counter-clockwise triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    /// xyz triples.
    pub positions: Vec<f32>,
    /// uv pairs.
    pub uvs: Vec<f32>,
    pub indices: Vec<u16>,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        let gx = segments_x.max(1);
        let gy = segments_y.max(1);
        let gx1 = gx + 1;
        let gy1 = gy + 1;
        let segment_w = width / gx as f32;
        let segment_h = height / gy as f32;

        let vertices = (gx1 * gy1) as usize;
        let mut positions = Vec::with_capacity(vertices * 3);
        let mut uvs = Vec::with_capacity(vertices * 2);
        for iy in 0..gy1 {
            let y = iy as f32 * segment_h - height / 2.0;
            for ix in 0..gx1 {
                let x = ix as f32 * segment_w - width / 2.0;
                positions.extend_from_slice(&[x, -y, 0.0]);
                uvs.extend_from_slice(&[ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32]);
            }
        }

        let mut indices = Vec::with_capacity((gx * gy * 6) as usize);
        for iy in 0..gy {
            for ix in 0..gx {
                let a = (ix + gx1 * iy) as u16;
                let b = (ix + gx1 * (iy + 1)) as u16;
                let c = (ix + 1 + gx1 * (iy + 1)) as u16;
                let d = (ix + 1 + gx1 * iy) as u16;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        PlaneGeometry {
            positions,
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}
