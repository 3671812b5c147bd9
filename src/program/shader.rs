/// Plain color extrusion program. Paint attributes (`base`, `height`,
/// `color`) arrive as per-vertex buffers next to the layout vertex.
pub const FILL_EXTRUSION_WGSL: &str = r#"
struct FillExtrusionUniforms {
    matrix: mat4x4<f32>,
    opacity: f32,
    lightcolor: vec3<f32>,
    lightpos: vec3<f32>,
    lightintensity: f32,
    vertical_gradient: f32,
}

@group(0) @binding(0)
var<uniform> u: FillExtrusionUniforms;

struct VertexInput {
    @location(0) pos: vec2<i32>,
    @location(1) normal_ed: vec4<i32>,
    @location(2) base: f32,
    @location(3) height: f32,
    @location(4) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

fn glsl_mod(x: f32, y: f32) -> f32 {
    return x - y * floor(x / y);
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    let normal = vec3<f32>(input.normal_ed.xyz);
    let base = max(0.0, input.base);
    let height = max(0.0, input.height);
    let t = glsl_mod(normal.x, 2.0);
    let z = select(base, height, t > 0.0);
    output.position = u.matrix * vec4<f32>(vec2<f32>(input.pos), z, 1.0);

    var color = input.color;
    let colorvalue = color.r * 0.2126 + color.g * 0.7152 + color.b * 0.0722;
    color = color + vec4<f32>(0.03, 0.03, 0.03, 1.0);

    var directional = clamp(dot(normal / 16384.0, u.lightpos), 0.0, 1.0);
    directional = mix(
        1.0 - u.lightintensity,
        max(1.0 - colorvalue + u.lightintensity, 1.0),
        directional
    );
    if (normal.y != 0.0) {
        directional = directional * ((1.0 - u.vertical_gradient) + u.vertical_gradient
            * clamp((t + base) * pow(height / 150.0, 0.5), mix(0.7, 0.98, 1.0 - u.lightintensity), 1.0));
    }

    let lit = clamp(
        color.rgb * directional * u.lightcolor,
        mix(vec3<f32>(0.0), vec3<f32>(0.3), vec3<f32>(1.0) - u.lightcolor),
        vec3<f32>(1.0)
    );
    output.color = vec4<f32>(lit, 1.0) * u.opacity;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;

/// Pattern textured extrusion program sampling the shared image atlas.
/// `pattern_from` / `pattern_to` hold the atlas rectangles (tl.xy, br.zw)
/// of the two crossfaded pattern images.
pub const FILL_EXTRUSION_PATTERN_WGSL: &str = r#"
struct FillExtrusionPatternUniforms {
    matrix: mat4x4<f32>,
    opacity: f32,
    scale: vec4<f32>,
    texsize: vec2<f32>,
    fade: f32,
    pixel_coord_upper: vec2<f32>,
    pixel_coord_lower: vec2<f32>,
    height_factor: f32,
    lightcolor: vec3<f32>,
    lightpos: vec3<f32>,
    lightintensity: f32,
    vertical_gradient: f32,
}

@group(0) @binding(0)
var<uniform> u: FillExtrusionPatternUniforms;
@group(0) @binding(1)
var atlas: texture_2d<f32>;
@group(0) @binding(2)
var atlas_sampler: sampler;

struct VertexInput {
    @location(0) pos: vec2<i32>,
    @location(1) normal_ed: vec4<i32>,
    @location(2) base: f32,
    @location(3) height: f32,
    @location(4) pattern_from: vec4<f32>,
    @location(5) pattern_to: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) pos_a: vec2<f32>,
    @location(1) pos_b: vec2<f32>,
    @location(2) lighting: vec4<f32>,
    @location(3) @interpolate(flat) pattern_from: vec4<f32>,
    @location(4) @interpolate(flat) pattern_to: vec4<f32>,
}

fn glsl_mod(x: f32, y: f32) -> f32 {
    return x - y * floor(x / y);
}

fn glsl_mod2(x: vec2<f32>, y: vec2<f32>) -> vec2<f32> {
    return x - y * floor(x / y);
}

// Rebuilds the tile origin from its 16-bit halves modulo the pattern size,
// so no intermediate value exceeds float precision.
fn pattern_pos(pattern_size: vec2<f32>, tile_units_to_pixels: f32, pos: vec2<f32>) -> vec2<f32> {
    let offset = glsl_mod2(
        glsl_mod2(glsl_mod2(u.pixel_coord_upper, pattern_size) * 256.0, pattern_size) * 256.0
            + u.pixel_coord_lower,
        pattern_size
    );
    return (tile_units_to_pixels * pos + offset) / pattern_size;
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    let pixel_ratio = u.scale.x;
    let tile_ratio = u.scale.y;
    let from_scale = u.scale.z;
    let to_scale = u.scale.w;

    let normal = vec3<f32>(input.normal_ed.xyz);
    let edge_distance = f32(input.normal_ed.w);
    let display_size_a = (input.pattern_from.zw - input.pattern_from.xy) / pixel_ratio;
    let display_size_b = (input.pattern_to.zw - input.pattern_to.xy) / pixel_ratio;

    let base = max(0.0, input.base);
    let height = max(0.0, input.height);
    let t = glsl_mod(normal.x, 2.0);
    let z = select(base, height, t > 0.0);
    output.position = u.matrix * vec4<f32>(vec2<f32>(input.pos), z, 1.0);

    let is_roof = normal.x == 1.0 && normal.y == 0.0 && normal.z == 16384.0;
    let pos = select(vec2<f32>(edge_distance, z * u.height_factor), vec2<f32>(input.pos), is_roof);
    output.pos_a = pattern_pos(from_scale * display_size_a, tile_ratio, pos);
    output.pos_b = pattern_pos(to_scale * display_size_b, tile_ratio, pos);

    var directional = clamp(dot(normal / 16383.0, u.lightpos), 0.0, 1.0);
    directional = mix(1.0 - u.lightintensity, max(0.5 + u.lightintensity, 1.0), directional);
    if (normal.y != 0.0) {
        directional = directional * ((1.0 - u.vertical_gradient) + u.vertical_gradient
            * clamp((t + base) * pow(height / 150.0, 0.5), mix(0.7, 0.98, 1.0 - u.lightintensity), 1.0));
    }
    let lit = clamp(
        directional * u.lightcolor,
        mix(vec3<f32>(0.0), vec3<f32>(0.3), vec3<f32>(1.0) - u.lightcolor),
        vec3<f32>(1.0)
    );
    output.lighting = vec4<f32>(lit, 1.0) * u.opacity;
    output.pattern_from = input.pattern_from;
    output.pattern_to = input.pattern_to;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let coord_a = fract(input.pos_a);
    let uv_a = mix(input.pattern_from.xy / u.texsize, input.pattern_from.zw / u.texsize, coord_a);
    let color_a = textureSample(atlas, atlas_sampler, uv_a);

    let coord_b = fract(input.pos_b);
    let uv_b = mix(input.pattern_to.xy / u.texsize, input.pattern_to.zw / u.texsize, coord_b);
    let color_b = textureSample(atlas, atlas_sampler, uv_b);

    return mix(color_a, color_b, u.fade) * input.lighting;
}
"#;
