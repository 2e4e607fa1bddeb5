//! Command-line demo binary for somaview.

use std::path::{Path, PathBuf};

use somaview::demo;
use somaview::engine::Engine;
use somaview::error::SomaError;
use somaview::input::InputEvent;
use somaview::options::Options;
use somaview::render::RecordingSurface;
use somaview::util::color::Rgba;

const WIDTH: f32 = 960.0;
const HEIGHT: f32 = 640.0;

fn run(out: &Path, preset: Option<&Path>) -> Result<(), SomaError> {
    let options = match preset {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let background = Rgba::from_rgb(options.colors.background);

    let mut engine = Engine::new(options, WIDTH, HEIGHT);
    demo::populate(&mut engine)?;

    // Hover the middle of the main view so the snapshot shows a highlight.
    let _ = engine.handle_input(InputEvent::CursorMoved {
        x: WIDTH * 0.5,
        y: HEIGHT * 0.5,
    });
    let _ = engine.update();

    let mut surface = RecordingSurface::new();
    for frame in engine.render_frame(&mut surface, 0.0) {
        log::info!(
            "{}: drew {} of {} faces ({} back-facing, {} outlined edges)",
            frame.view,
            frame.stats.drawn,
            frame.stats.faces,
            frame.stats.backfacing,
            frame.stats.boundary_edges,
        );
    }
    if let Some(region) = engine.selection().hovered() {
        log::info!("hovered region: {region}");
    }

    std::fs::write(out, surface.to_svg(WIDTH, HEIGHT, background))?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(out) = args.next().map(PathBuf::from) else {
        log::error!("Usage: somaview <out.svg> [preset.toml]");
        std::process::exit(1);
    };
    let preset = args.next().map(PathBuf::from);

    if let Err(e) = run(&out, preset.as_deref()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
