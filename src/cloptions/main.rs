use cloptions::{Options, Outcome, Result};
use log::LevelFilter;
use serde_json::json;

/// Exit code for a parse that stopped on an error.
const EXIT_USAGE: i32 = 2;

fn main() {
    init_logging();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// `warn` unless RUST_LOG says otherwise.
fn init_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// "cloptions-demo 0.3.0" for releases, "cloptions-demo 0.3.0@abc1234" otherwise.
fn version_text() -> String {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    if IS_RELEASE == "true" || GIT_HASH.is_empty() {
        format!("{} {}", env!("CARGO_PKG_NAME"), VERSION)
    } else {
        format!("{} {}@{}", env!("CARGO_PKG_NAME"), VERSION, GIT_HASH)
    }
}

fn define_options() -> Result<Options> {
    let mut options = Options::new();
    options.add_config_file_param("", "", "", "#")?;
    options.add_version_param("", "", &version_text());

    options.add_string_param("n,Name", "Name of the planet.", "Unnamed")?;
    options.add_double_param("m,Mass", "This is the planet's mass (in kg).", 0.0)?;
    options.add_double_param("r,Radius", "This is the planet's radius (in meters).", 1.0)?;
    options.add_int_param("Moons", "Number of moons orbiting the planet.", 0)?;
    options.add_bool_param("Rings", "Whether the planet has rings.", false)?;
    options.add_string_param(
        "o,Output",
        "Output format: 'text' prints the planet summary, 'values' and 'detailed' dump every \
         parameter in configuration file format, 'json' prints a snapshot of all parameters.",
        "text",
    )?;
    Ok(options)
}

fn run() -> Result<i32> {
    let mut options = define_options()?;

    match options.parse(std::env::args()) {
        Outcome::Proceed => {}
        Outcome::HelpShown | Outcome::VersionShown => return Ok(0),
        Outcome::Aborted(_) => return Ok(EXIT_USAGE),
    }

    match options.as_string("Output").as_str() {
        "values" => options.print_simple()?,
        "detailed" => options.print_detailed()?,
        "json" => print_json(&options)?,
        _ => return print_planet(&options),
    }
    Ok(0)
}

fn print_json(options: &Options) -> Result<()> {
    let document = json!({
        "params": options.snapshot(),
        "operands": options.operands(),
    });
    let text = serde_json::to_string_pretty(&document).map_err(std::io::Error::from)?;
    println!("{}", text);
    Ok(())
}

fn print_planet(options: &Options) -> Result<i32> {
    let mass = options.as_double("Mass");
    let radius = options.as_double("Radius");

    if mass <= 0.0 {
        eprintln!("[ERROR] Mass must be greater than 0!");
        return Ok(1);
    }
    if radius <= 0.0 {
        eprintln!("[ERROR] Radius must be greater than 0!");
        return Ok(1);
    }

    println!("Planet parameters:");
    println!("   Name   : {}", options.as_string("Name"));
    println!("   Mass   : {} kg", mass);
    println!("   Radius : {} m", radius);
    println!("   Density: {} kg/m^3", mass / radius.powi(3));
    println!("   Moons  : {}", options.as_int("Moons"));
    if options.as_bool("Rings") {
        println!("   Has rings");
    }
    for operand in options.operands() {
        println!("   Note   : {}", operand);
    }
    Ok(0)
}
