use folio_core::{MeshVertex, SceneObject};
use wgpu::util::DeviceExt;

/// Vertex data for one scene object, uploaded once.
pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
    pub(crate) wireframe: bool,
}

/// Triangles for solid bodies, a line list for wireframe ones.
pub(crate) fn upload(device: &wgpu::Device, object: &SceneObject) -> GpuMesh {
    let wireframe = object.material.wireframe;
    let mesh = object.shape.build();
    let vertices: Vec<MeshVertex> = if wireframe {
        mesh.edges()
            .into_iter()
            .map(|p| MeshVertex {
                position: p,
                normal: glam::Vec3::from(p).normalize_or_zero().to_array(),
            })
            .collect()
    } else {
        mesh.vertices
    };
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(if wireframe { "wire_vb" } else { "solid_vb" }),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    GpuMesh {
        vertex_buffer,
        vertex_count: vertices.len() as u32,
        wireframe,
    }
}
