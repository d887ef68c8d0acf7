use std::{env, error::Error, fs, path::PathBuf, process};

use placard::{
    application::render::{CardRenderService, RenderService},
    config,
    domain::types::CardRequest,
    infra::{assets::FontAssets, telemetry},
};

const USAGE: &str = "usage: render_card_dump [--config-file <path>] <request_json_path>";

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);

    let mut config_file: Option<PathBuf> = None;
    let first = args.next().expect(USAGE);
    let request_path = match first.as_str() {
        "--config-file" => {
            config_file = Some(PathBuf::from(args.next().expect(USAGE)));
            args.next().expect(USAGE)
        }
        _ => first,
    };

    if args.next().is_some() {
        panic!("{USAGE}");
    }

    let settings = config::load(config_file.as_deref())?;
    telemetry::init(&settings.logging)?;

    let fonts = match FontAssets::load(&settings.fonts) {
        Ok(fonts) => fonts,
        Err(err) => {
            eprintln!("fatal: {err}");
            process::exit(1);
        }
    };

    let raw = fs::read_to_string(&request_path)?;
    let request: CardRequest = serde_json::from_str(&raw)?;

    let renderer = CardRenderService::new(fonts, &settings.card);
    let html = renderer.render(&request)?;
    println!("{html}");
    Ok(())
}
