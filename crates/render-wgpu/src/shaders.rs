/// WGSL module for the escape-time fractal: a passthrough vertex stage
/// over a clip-space quad, and a fragment stage that iterates z = z² + c
/// for every pixel. Fixed 100 iterations, escape radius² 16, grayscale
/// intensity sqrt(iterations * 0.025).
pub const ESCAPE_SHADER: &str = r#"
struct Uniforms {
    // Framebuffer size in pixels.
    viewport_size: vec2<f32>,
    _pad: vec2<f32>,
    // (imag_min, imag_max, real_min, real_max) of the visible region.
    region_bounds: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position, 0.0, 1.0);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let bounds = uniforms.region_bounds;
    let c = vec2<f32>(
        in.clip_position.x * (bounds.w - bounds.z) / uniforms.viewport_size.x + bounds.z,
        in.clip_position.y * (bounds.y - bounds.x) / uniforms.viewport_size.y + bounds.x,
    );

    var z = c;
    var iterations = 0.0;
    for (var i = 0; i < 100; i++) {
        let t = 2.0 * z.x * z.y + c.y;
        z.x = z.x * z.x - z.y * z.y + c.x;
        z.y = t;
        if (z.x * z.x + z.y * z.y > 16.0) {
            break;
        }
        iterations += 1.0;
    }

    let intensity = sqrt(iterations * 0.025);
    return vec4<f32>(intensity, intensity, intensity, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    /// CPU mirror of the fragment stage's escape loop, used to pin the
    /// shader's constants.
    fn escape_iterations(cx: f64, cy: f64) -> u32 {
        let (mut zx, mut zy) = (cx, cy);
        let mut iterations = 0;
        for _ in 0..100 {
            let t = 2.0 * zx * zy + cy;
            zx = zx * zx - zy * zy + cx;
            zy = t;
            if zx * zx + zy * zy > 16.0 {
                break;
            }
            iterations += 1;
        }
        iterations
    }

    fn intensity(iterations: u32) -> f64 {
        (iterations as f64 * 0.025).sqrt()
    }

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_iterations(0.0, 0.0), 100);
        assert!((intensity(100) - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn interior_intensity_is_not_clamped() {
        // sqrt(100 * 0.025) ≈ 1.581 is written to the target as-is.
        assert!(intensity(100) > 1.0);
    }

    #[test]
    fn far_point_escapes_immediately() {
        let iterations = escape_iterations(2.0, 2.0);
        assert!(iterations <= 1);
        assert!(intensity(iterations) < 0.2);
    }

    #[test]
    fn point_inside_main_cardioid_never_escapes() {
        assert_eq!(escape_iterations(-0.25, 0.0), 100);
    }

    #[test]
    fn shader_declares_both_entry_points() {
        assert!(ESCAPE_SHADER.contains("fn vs_main"));
        assert!(ESCAPE_SHADER.contains("fn fs_main"));
    }
}
