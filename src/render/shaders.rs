//! WGSL sources for the four pipeline variants.
//!
//! The lighting and mapping math each live in a single snippet; the
//! Gouraud and Phong programs differ only in where they invoke it (vertex
//! vs fragment) and in how they combine the texture sample, so the two
//! stages can never drift apart numerically.

use crate::material::ShadingStage;

pub(crate) const COMMON: &str = r#"
struct GlobalUniform {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
}

struct PointLight {
    position: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    attenuation: vec4<f32>,
}

struct ObjectUniform {
    model: mat4x4<f32>,
    normal: mat3x4<f32>,
    center: vec4<f32>,
    ambient: vec4<f32>,
    coefficients: vec4<f32>,
    modes: vec4<u32>,
    lights: array<PointLight, 2>,
}

@group(0) @binding(0)
var<uniform> globals: GlobalUniform;

@group(1) @binding(0)
var<uniform> object: ObjectUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

fn safe_normalize(v: vec3<f32>) -> vec3<f32> {
    let len = length(v);
    if (len == 0.0) {
        return vec3<f32>(0.0);
    }
    return v / len;
}

fn world_normal(local: vec3<f32>) -> vec3<f32> {
    let matrix = mat3x3<f32>(
        object.normal[0].xyz,
        object.normal[1].xyz,
        object.normal[2].xyz,
    );
    return safe_normalize(matrix * local);
}
"#;

pub(crate) const TEXTURE_BINDINGS: &str = r#"
@group(2) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(2) @binding(1)
var s_diffuse: sampler;
"#;

/// The shared lighting evaluator: quadratic attenuation on the diffuse and
/// specular terms, unattenuated ambient added per active light.
pub(crate) const LIGHTING: &str = r#"
fn point_radiance(light: PointLight, unit_normal: vec3<f32>, position: vec3<f32>) -> vec3<f32> {
    let ka = object.coefficients.x;
    let kd = object.coefficients.y;
    let ks = object.coefficients.z;
    let shininess = object.coefficients.w;

    let to_light = light.position.xyz - position;
    let light_dir = safe_normalize(to_light);
    let diffuse = kd * light.diffuse.rgb * max(dot(light_dir, unit_normal), 0.0);

    let to_camera = safe_normalize(globals.camera_position.xyz - position);
    let halfway = safe_normalize(to_camera + light_dir);
    let specular = ks * light.specular.rgb * pow(max(dot(halfway, unit_normal), 0.0), shininess);

    let dist = length(to_light);
    let atten = 1.0 / (light.attenuation.x + light.attenuation.y * dist + light.attenuation.z * dist * dist);

    let ambient = ka * object.ambient.rgb;
    return atten * (diffuse + specular) + ambient;
}

fn total_radiance(unit_normal: vec3<f32>, position: vec3<f32>) -> vec3<f32> {
    var radiance = vec3<f32>(0.0);
    for (var i = 0u; i < object.modes.x; i = i + 1u) {
        radiance = radiance + point_radiance(object.lights[i], unit_normal, position);
    }
    return radiance;
}
"#;

/// The shared texture projections, selected by the texture-mode uniform.
pub(crate) const MAPPING: &str = r#"
const PI: f32 = 3.14159265;

fn spherical_uv(point: vec3<f32>) -> vec2<f32> {
    let r = 2.0;
    let n = safe_normalize(point - object.center.xyz);
    let x = r * n.z;
    let y = r * n.x;
    let z = r * n.y;
    let u = (2.0 * PI + 2.0 * atan2(x, y)) / (4.0 * PI);
    let v = 2.0 * acos(z / sqrt(r * r + z * z)) / PI - 0.5;
    return vec2<f32>(u, v);
}

fn cylindrical_uv(point: vec3<f32>) -> vec2<f32> {
    let r = 4.0;
    let h = 12.0;
    let n = safe_normalize(point - object.center.xyz);
    let lambda = r / sqrt(n.z * n.z + n.x * n.x);
    let x = lambda * n.z;
    let y = lambda * n.x;
    let z = lambda * n.y;
    if (z <= -30.0 * h) {
        return vec2<f32>(0.0, 0.0);
    }
    if (z >= 30.0 * h) {
        return vec2<f32>(1.0, 1.0);
    }
    let u = (2.0 * PI + 2.0 * atan2(x, y)) / (4.0 * PI);
    let v = z / h + 0.5;
    return vec2<f32>(u, v);
}

fn surface_uv(point: vec3<f32>) -> vec2<f32> {
    if (object.modes.y == 1u) {
        return spherical_uv(point);
    }
    return cylindrical_uv(point);
}
"#;

const GOURAUD_PLAIN: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_position = object.model * vec4<f32>(input.position, 1.0);
    out.position = globals.view_proj * world_position;
    let unit_normal = world_normal(input.normal);
    out.color = vec4<f32>(total_radiance(unit_normal, world_position.xyz), 1.0);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;

const GOURAUD_TEXTURED: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_position = object.model * vec4<f32>(input.position, 1.0);
    out.position = globals.view_proj * world_position;
    let unit_normal = world_normal(input.normal);
    out.color = vec4<f32>(total_radiance(unit_normal, world_position.xyz), 1.0);
    out.uv = surface_uv(world_position.xyz);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let tex = textureSample(t_diffuse, s_diffuse, input.uv);
    return tex * input.color;
}
"#;

const PHONG_PLAIN: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_position = object.model * vec4<f32>(input.position, 1.0);
    out.position = globals.view_proj * world_position;
    out.world_pos = world_position.xyz;
    out.normal = world_normal(input.normal);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let unit_normal = safe_normalize(input.normal);
    let lit = total_radiance(unit_normal, input.world_pos);
    return vec4<f32>(lit, 1.0);
}
"#;

const PHONG_TEXTURED: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_position = object.model * vec4<f32>(input.position, 1.0);
    out.position = globals.view_proj * world_position;
    out.world_pos = world_position.xyz;
    out.normal = world_normal(input.normal);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let unit_normal = safe_normalize(input.normal);
    let lit = total_radiance(unit_normal, input.world_pos);
    let tex = textureSample(t_diffuse, s_diffuse, surface_uv(input.world_pos));
    return vec4<f32>(tex.rgb * lit, tex.a);
}
"#;

/// Assembles the WGSL module for one (stage, textured) pipeline variant.
/// Untextured variants carry no mapping code and no texture bindings.
pub fn compose(stage: ShadingStage, textured: bool) -> String {
    let mut source = String::from(COMMON);
    if textured {
        source.push_str(TEXTURE_BINDINGS);
    }
    source.push_str(LIGHTING);
    if textured {
        source.push_str(MAPPING);
    }
    source.push_str(match (stage, textured) {
        (ShadingStage::Gouraud, false) => GOURAUD_PLAIN,
        (ShadingStage::Gouraud, true) => GOURAUD_TEXTURED,
        (ShadingStage::Phong, false) => PHONG_PLAIN,
        (ShadingStage::Phong, true) => PHONG_TEXTURED,
    });
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants() -> [(ShadingStage, bool); 4] {
        [
            (ShadingStage::Gouraud, false),
            (ShadingStage::Gouraud, true),
            (ShadingStage::Phong, false),
            (ShadingStage::Phong, true),
        ]
    }

    #[test]
    fn every_variant_has_both_entry_points() {
        for (stage, textured) in variants() {
            let source = compose(stage, textured);
            assert!(source.contains("fn vs_main"), "{stage:?}/{textured}");
            assert!(source.contains("fn fs_main"), "{stage:?}/{textured}");
        }
    }

    #[test]
    fn lighting_is_defined_exactly_once_per_variant() {
        for (stage, textured) in variants() {
            let source = compose(stage, textured);
            assert_eq!(
                source.matches("fn point_radiance").count(),
                1,
                "{stage:?}/{textured}"
            );
        }
    }

    #[test]
    fn untextured_variants_skip_sampling_entirely() {
        for stage in [ShadingStage::Gouraud, ShadingStage::Phong] {
            let source = compose(stage, false);
            assert!(!source.contains("textureSample"));
            assert!(!source.contains("surface_uv"));
            assert!(!source.contains("@group(2)"));
        }
    }

    #[test]
    fn textured_variants_sample_and_map() {
        for stage in [ShadingStage::Gouraud, ShadingStage::Phong] {
            let source = compose(stage, true);
            assert!(source.contains("textureSample"));
            assert!(source.contains("fn spherical_uv"));
            assert!(source.contains("fn cylindrical_uv"));
            assert!(source.contains("@group(2)"));
        }
    }

    #[test]
    fn stages_evaluate_lighting_at_different_granularity() {
        let gouraud = compose(ShadingStage::Gouraud, false);
        let gouraud_vertex_body = gouraud
            .split("@vertex")
            .nth(1)
            .unwrap()
            .split("@fragment")
            .next()
            .unwrap();
        assert!(gouraud_vertex_body.contains("total_radiance("));

        let phong = compose(ShadingStage::Phong, false);
        let phong_vertex_body = phong
            .split("@vertex")
            .nth(1)
            .unwrap()
            .split("@fragment")
            .next()
            .unwrap();
        assert!(!phong_vertex_body.contains("total_radiance("));
        let phong_fragment_body = phong.split("@fragment").nth(1).unwrap();
        assert!(phong_fragment_body.contains("total_radiance("));
    }
}
