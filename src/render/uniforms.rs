use folio_core::{Camera, Light, LightKind, Material, Scene, SceneObject};

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightPacked {
    position: [f32; 4],
    color: [f32; 4],
}

impl LightPacked {
    fn from_light(light: &Light) -> Self {
        let range = match light.kind {
            LightKind::Point { range, .. } => range,
            _ => 0.0,
        };
        let p = light.position().unwrap_or_default();
        let c = light.color * light.intensity;
        Self {
            position: [p.x, p.y, p.z, range],
            color: [c.x, c.y, c.z, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    directional: [LightPacked; 2],
    point: [LightPacked; 2],
}

impl GlobalUniforms {
    pub(crate) fn new(camera: &Camera, scene: &Scene) -> Self {
        let rig = &scene.lights;
        let ambient = rig.ambient.color * rig.ambient.intensity;
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            ambient: ambient.extend(1.0).to_array(),
            directional: [
                LightPacked::from_light(&rig.key),
                LightPacked::from_light(&rig.fill),
            ],
            point: [
                LightPacked::from_light(&rig.key_point),
                LightPacked::from_light(&rig.fill_point),
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

impl ObjectUniforms {
    pub(crate) fn new(object: &SceneObject) -> Self {
        let Material {
            color,
            metalness,
            roughness,
            clearcoat,
            emissive,
            opacity,
            ..
        } = object.material;
        Self {
            model: object.model_matrix().to_cols_array_2d(),
            color: color.extend(opacity).to_array(),
            params: [metalness, roughness, clearcoat, emissive],
        }
    }
}
