use frame_vision::area::{Point, Rect};
use frame_vision::config::{self, MatchConfig};
use frame_vision::recognition::TemplateMatchMode;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Why no search was configured
#[derive(Error, Debug, PartialEq)]
pub enum ArgsError {
    /// Help or version text was printed
    #[error("information requested")]
    Informational,

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug)]
pub struct Args {
    pub screen: PathBuf,
    pub template: PathBuf,
    /// Position of the capture area on the desktop
    pub capture_offset: Point,
    pub region_of_interest: Rect,
    pub name: String,
    pub config: MatchConfig,
    pub click: bool,
}

impl Args {
    pub fn parse() -> Result<Self, ArgsError> {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut screen: Option<PathBuf> = None;
        let mut template: Option<PathBuf> = None;
        let mut capture_offset = Point::default();
        let mut region_of_interest = Rect::EMPTY;
        let mut name: Option<String> = None;
        let mut config = MatchConfig::default();
        let mut threshold: Option<f32> = None;
        let mut mode: Option<TemplateMatchMode> = None;
        let mut draw = false;
        let mut click = false;

        for arg in args {
            if arg == "--help" || arg == "-h" {
                print_help();
                return Err(ArgsError::Informational);
            } else if arg == "--version" || arg == "-v" {
                println!(
                    "Frame Vision v{} (built {})",
                    env!("APP_VERSION_DISPLAY"),
                    env!("APP_BUILD_YEAR")
                );
                return Err(ArgsError::Informational);
            } else if arg == "--click" {
                click = true;
            } else if arg == "--draw" {
                draw = true;
            } else if let Some(val) = arg.strip_prefix("--screen=") {
                screen = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--template=") {
                template = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--name=") {
                name = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--preset=") {
                config = config::preset(val).ok_or_else(|| {
                    invalid(format!(
                        "Unknown preset '{}', expected default, ui or game-object",
                        val
                    ))
                })?;
            } else if let Some(val) = arg.strip_prefix("--threshold=") {
                let t = val
                    .parse::<f32>()
                    .map_err(|_| invalid(format!("Invalid threshold value: {}", val)))?;
                threshold = Some(t);
            } else if let Some(val) = arg.strip_prefix("--mode=") {
                let m = TemplateMatchMode::parse(val)
                    .ok_or_else(|| invalid(format!("Unknown mode '{}'", val)))?;
                mode = Some(m);
            } else if let Some(val) = arg.strip_prefix("--roi=") {
                region_of_interest = Rect::parse(val).ok_or_else(|| {
                    invalid(format!("Invalid region '{}', expected x,y,width,height", val))
                })?;
            } else if let Some(val) = arg.strip_prefix("--offset=") {
                capture_offset = parse_point(val)
                    .ok_or_else(|| invalid(format!("Invalid offset '{}', expected x,y", val)))?;
            } else {
                return Err(invalid(format!("Unknown argument: {}", arg)));
            }
        }

        // Individual flags win over the preset
        if let Some(t) = threshold {
            config.threshold = t;
        }
        if let Some(m) = mode {
            config.match_mode = m;
        }
        if draw {
            config.draw_on_window = true;
        }

        let (Some(screen), Some(template)) = (screen, template) else {
            return Err(invalid("Both --screen and --template are required".to_string()));
        };

        let name = name.unwrap_or_else(|| {
            template
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "template".to_string())
        });

        Ok(Args {
            screen,
            template,
            capture_offset,
            region_of_interest,
            name,
            config,
            click,
        })
    }
}

fn invalid(message: String) -> ArgsError {
    ArgsError::Invalid(message)
}

fn parse_point(value: &str) -> Option<Point> {
    let (x, y) = value.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn print_help() {
    println!("🔎 Frame Vision - find a template on a screen capture");
    println!();
    println!("USAGE:");
    println!("    frame-vision --screen=<png> --template=<png> [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --screen=PATH       Screen capture to search");
    println!("    --template=PATH     Template image to look for");
    println!("    --offset=X,Y        Desktop position of the capture (default: 0,0)");
    println!("    --roi=X,Y,W,H       Restrict the search to this part of the capture");
    println!("    --preset=NAME       default | ui | game-object");
    println!("    --threshold=N       Match quality threshold");
    println!("    --mode=MODE         sqdiff | sqdiff-normed | ccorr | ccorr-normed");
    println!("    --name=NAME         Overlay name (default: template file stem)");
    println!("    --draw              Register the match with the overlay");
    println!("    --click             Click the centre of the match");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    frame-vision --screen=cap.png --template=button.png");
    println!("    frame-vision --screen=cap.png --template=button.png --offset=0,32 --click");
    println!("    frame-vision --screen=cap.png --template=icon.png --roi=0,0,400,200 --preset=ui");
}
