use anyhow::Context;
use clap::Parser;
use pinput::queue::KeyQueue;
use pinwheel::app::Overlay;
use pinwheel::config;
use pinwheel::sys::host::SimulatedHost;
use pinwheel::sys::runtime;

#[derive(Parser, Debug)]
#[command(version, about = "Radial quick-select overlay daemon", long_about = None)]
struct Args {
    /// Write the bundled default config if none exists, print its path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.init_config {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let host = SimulatedHost::new(KeyQueue::new());
    let mut overlay = Overlay::new(&config, host).context("Invalid wheel configuration")?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    log::info!(
        "pinwheel ready: {} items, show with {}",
        config.items.len(),
        overlay.show_keys()
    );

    // single consumer: every state change happens on this thread
    while let Ok(event) = rx.recv_blocking() {
        overlay.handle(event);
    }

    Ok(())
}
