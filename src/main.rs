mod args;

use args::{Args, ArgsError};
use frame_vision::area::{ImageCache, RectArea};
use frame_vision::input::LogClicker;
use frame_vision::overlay::DrawContent;
use frame_vision::recognition::{RecognitionObject, VisionContext};
use frame_vision::{VisionError, VisionResult};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::parse() {
        Ok(args) => args,
        Err(ArgsError::Informational) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            eprintln!("Run with --help for usage");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::from(2)
        }
    }
}

fn load(path: &Path) -> VisionResult<image::DynamicImage> {
    image::open(path).map_err(|source| VisionError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns whether the template was found.
fn run(args: &Args) -> VisionResult<bool> {
    let screen = load(&args.screen)?.to_rgba8();
    let template = load(&args.template)?.to_rgb8();

    let (screen_w, screen_h) = screen.dimensions();
    let desktop = RectArea::desktop(
        args.capture_offset.x.max(0) + screen_w as i32,
        args.capture_offset.y.max(0) + screen_h as i32,
    );
    let capture = RectArea::from_pixels(
        screen,
        args.capture_offset.x,
        args.capture_offset.y,
        Some(&desktop),
    )
    .with_coordinate_name("CaptureArea");

    let overlay = Arc::new(DrawContent::new());
    let ctx = VisionContext::with_defaults(overlay.clone(), Arc::new(LogClicker));

    let ro = RecognitionObject::template_match(ImageCache::from_matrix(template), &args.config)
        .with_name(args.name.as_str())
        .with_region_of_interest(args.region_of_interest);

    println!(
        "🔍 Searching '{}' in {}x{} capture (threshold {:.2}, {:?})",
        ro.name, screen_w, screen_h, ro.threshold, ro.match_mode
    );

    let found = if args.click {
        ctx.find_and_click_center(&capture, &ro)?
    } else {
        ctx.find(&capture, &ro)?
    };

    if found.is_empty() {
        println!("❌ '{}' not found", ro.name);
        return Ok(false);
    }

    let in_capture = found.project_to_capture_area()?;
    let on_desktop = found.project_to_desktop()?;
    println!(
        "✅ '{}' found at capture ({},{}) {}x{}, desktop ({},{})",
        ro.name,
        in_capture.x,
        in_capture.y,
        in_capture.width,
        in_capture.height,
        on_desktop.x,
        on_desktop.y
    );
    for name in overlay.names() {
        if let Some(drawn) = overlay.get(&name) {
            println!("🟥 Overlay '{}': {:?}", name, drawn.rect);
        }
    }

    Ok(true)
}
