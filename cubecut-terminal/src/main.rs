/// cubecut - A cube sliced by a random plane, rotated from the terminal
///
/// Controls:
///   - Up/Down or 1/2/3: Select the X, Y or Z slider
///   - Left/Right: Change the selected angle
///   - N: Generate a new cutting plane
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use cubecut_core::{PlaneGenerator, RotationState, Scene, SceneConfig};
use cubecut_terminal::{AsciiRenderer, TerminalApp};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser)]
#[command(name = "cubecut")]
#[command(about = "Rotatable wireframe cube cut by a random plane", long_about = None)]
struct Cli {
    /// Seed for the cutting plane (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Initial X,Y,Z angles in degrees
    #[arg(long, value_parser = parse_angles, default_value = "45,45,90")]
    angles: RotationState,

    /// Degrees added or removed per key press
    #[arg(long, default_value_t = 5.0)]
    step: f64,

    /// Half-width of the band seed coordinates and solved z values must lie in
    #[arg(long, default_value_t = PlaneGenerator::DEFAULT_BAND)]
    band: f64,

    /// Give up on plane generation after this many attempts
    #[arg(long, default_value_t = PlaneGenerator::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Print a single frame as plain text and exit
    #[arg(long)]
    snapshot: bool,

    /// Height in rows of the snapshot frame
    #[arg(long, default_value_t = 24)]
    rows: usize,
}

fn parse_angles(value: &str) -> Result<RotationState, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid angle: {e}"))?;

    match parts.as_slice() {
        [x, y, z] => Ok(RotationState::new(*x, *y, *z)),
        _ => Err(format!("expected three angles, got {}", parts.len())),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("cutting plane seed: {seed}");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let config = SceneConfig {
        initial_angles: cli.angles,
        generator: PlaneGenerator::new(cli.band, cli.max_attempts)
            .context("invalid plane generator settings")?,
        ..SceneConfig::default()
    };
    let scene = Scene::with_config(config, &mut rng).context("failed to build the scene")?;

    if cli.snapshot {
        let mut renderer = AsciiRenderer::new(cli.rows * 2, cli.rows);
        renderer.render_frame(scene.frame());
        print!("{}", renderer.to_plain_string());
        return Ok(());
    }

    let mut app = TerminalApp::new(scene, rng, cli.step).context("failed to query terminal size")?;
    app.run()
}
