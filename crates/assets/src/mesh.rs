use crate::AssetError;
use bytemuck::{Pod, Zeroable};
use std::path::Path;

/// Vertex layout shared with the mesh shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// An indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Outward normal plus two in-face axes with `u x v == normal`.
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
];

impl MeshData {
    /// Axis-aligned cube centred on the origin with per-face normals and UVs.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        // (u sign, v sign, texcoord), counter-clockwise seen from outside.
        let corners = [
            (-1.0, -1.0, [0.0, 1.0]),
            (1.0, -1.0, [1.0, 1.0]),
            (1.0, 1.0, [1.0, 0.0]),
            (-1.0, 1.0, [0.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (n, u, v) in CUBE_FACES {
            let base = vertices.len() as u32;
            for (su, sv, uv) in corners {
                let position = [
                    (n[0] + su * u[0] + sv * v[0]) * h,
                    (n[1] + su * u[1] + sv * v[1]) * h,
                    (n[2] + su * u[2] + sv * v[2]) * h,
                ];
                vertices.push(Vertex {
                    position,
                    normal: n,
                    uv,
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self {
            name: "cube".into(),
            vertices,
            indices,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Check the mesh forms a non-empty triangle list with in-range indices.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.indices.is_empty() {
            return Err(AssetError::InvalidMesh(format!("{} has no indices", self.name)));
        }
        if self.indices.len() % 3 != 0 {
            return Err(AssetError::InvalidMesh(format!(
                "{} has {} indices, not a multiple of 3",
                self.name,
                self.indices.len()
            )));
        }
        let vertex_count = self.vertices.len();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(AssetError::InvalidMesh(format!(
                "{} index {bad} out of range for {vertex_count} vertices",
                self.name
            )));
        }
        Ok(())
    }
}

/// Import every model in a Wavefront OBJ file.
///
/// Faces are triangulated and re-indexed to a single index per vertex.
/// Missing normals and texture coordinates are zero-filled. The V coordinate
/// is flipped so `v = 0` addresses the top texture row.
pub fn import_obj(path: impl AsRef<Path>) -> Result<Vec<MeshData>, AssetError> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    };
    let (models, materials) =
        tobj::load_obj(path, &options).map_err(|e| AssetError::Import(e.to_string()))?;
    if let Err(e) = materials {
        // Materials are optional; geometry is still usable without them.
        tracing::warn!("ignoring materials for {}: {e}", path.display());
    }

    let meshes: Vec<MeshData> = models
        .into_iter()
        .filter(|model| !model.mesh.indices.is_empty())
        .map(|model| {
            let mesh = model.mesh;
            let vertex_count = mesh.positions.len() / 3;
            let vertices = (0..vertex_count)
                .map(|i| {
                    let normal = if mesh.normals.len() >= (i + 1) * 3 {
                        [
                            mesh.normals[i * 3],
                            mesh.normals[i * 3 + 1],
                            mesh.normals[i * 3 + 2],
                        ]
                    } else {
                        [0.0; 3]
                    };
                    let uv = if mesh.texcoords.len() >= (i + 1) * 2 {
                        [mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1]]
                    } else {
                        [0.0; 2]
                    };
                    Vertex {
                        position: [
                            mesh.positions[i * 3],
                            mesh.positions[i * 3 + 1],
                            mesh.positions[i * 3 + 2],
                        ],
                        normal,
                        uv,
                    }
                })
                .collect();
            MeshData {
                name: model.name,
                vertices,
                indices: mesh.indices,
            }
        })
        .collect();

    if meshes.is_empty() {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    for mesh in &meshes {
        mesh.validate()?;
    }

    tracing::info!(
        "imported {} mesh(es) from {}",
        meshes.len(),
        path.display()
    );
    Ok(meshes)
}
