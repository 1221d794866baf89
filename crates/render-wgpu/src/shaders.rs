/// WGSL shader for textured, diffusely lit meshes.
///
/// `world`, `view` and `proj` are column-major and applied right to left.
pub const MESH_SHADER: &str = r#"
struct SceneUniforms {
    world: mat4x4<f32>,
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

@group(0) @binding(1)
var diffuse_texture: texture_2d<f32>;

@group(0) @binding(2)
var diffuse_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = scene.world * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = scene.proj * (scene.view * world_pos);
    out.world_normal = (scene.world * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let albedo = textureSample(diffuse_texture, diffuse_sampler, in.uv);

    // Meshes imported without normals are drawn unlit.
    var lighting = 1.0;
    let normal_len = length(in.world_normal);
    if (normal_len > 0.0001) {
        let light_dir = normalize(vec3<f32>(0.3, 1.0, -0.5));
        let diffuse = max(dot(in.world_normal / normal_len, light_dir), 0.0);
        lighting = 0.35 + diffuse * 0.65;
    }
    return vec4<f32>(albedo.rgb * lighting, albedo.a);
}
"#;
