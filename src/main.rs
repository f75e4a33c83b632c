use clap::Parser;
use log::info;

use vitrine::app::VitrineApp;
use vitrine::cli::Args;
use vitrine::deck::Deck;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = args.engine_config();
    let deck = Deck::load(&args.deck_path)?;
    info!(
        "starting rotation: {} slides, slide {}ms, transition {}ms ({:?})",
        deck.slides.len(),
        config.slide_ms,
        config.transition_ms,
        config.strategy
    );

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 720.0])
        .with_title("vitrine");
    if args.fullscreen {
        viewport = viewport.with_fullscreen(true);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let deck_path = args.deck_path.clone();
    eframe::run_native(
        "vitrine",
        options,
        Box::new(move |_cc| Ok(Box::new(VitrineApp::new(config, deck, deck_path)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;
    Ok(())
}
