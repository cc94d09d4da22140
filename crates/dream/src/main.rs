use dream::{
    camera::PointCamera, config::Config, perspective_matrix, rotation, vec3, Mat44, PerlinNoise,
    Vec3f,
};

const FIELD_WIDTH: usize = 64;
const FIELD_HEIGHT: usize = 24;
const SHADES: &[u8] = b" .:-=+*#%@";

fn main() -> anyhow::Result<()> {
    dream::init_logger!();

    let config = Config::from_env()?;

    let mut camera = PointCamera::default();
    camera.set_line(vec3(0.0, 2.0, 10.0), -Vec3f::Z);
    camera.look_towards(Vec3f::ZERO);
    let view = camera.view_matrix();
    let projection =
        perspective_matrix(config.fov_radians(), config.aspect, config.near, config.far);
    let model = rotation(config.fov_radians() / 2.0, Vec3f::Y);
    let view_projection: Mat44 = projection * view;

    println!("view:\n{view:8.3}\n");
    println!("projection:\n{projection:8.3}\n");

    for corner in [
        vec3(-1.0, -1.0, -1.0),
        vec3(1.0, -1.0, -1.0),
        vec3(1.0, 1.0, 1.0),
        vec3(-1.0, 1.0, 1.0),
    ] {
        let ndc = view_projection * (model * corner);
        println!("{corner:5.1} -> {ndc:7.3}");
    }
    println!();

    let noise = PerlinNoise::new(config.noise_seed);
    for row in 0..FIELD_HEIGHT {
        let line: String = (0..FIELD_WIDTH)
            .map(|col| {
                let p = vec3(col as f32 / 4.0, row as f32 / 2.0, 0.0);
                let shade = noise.marble(4.0, p);
                let idx = (shade * (SHADES.len() - 1) as f32).round() as usize;
                char::from(SHADES[idx.min(SHADES.len() - 1)])
            })
            .collect();
        println!("{line}");
    }

    Ok(())
}
