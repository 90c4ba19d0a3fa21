// Shortcuts CLI
// Load shortcut bindings and fire them from scripted or live keyboard events

mod fire;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use parking_lot::Mutex;

use shortcuts_core::{Config, EventBus, EventSource, ShortcutService};

use fire::FireSpec;

/// Keyboard shortcut matcher
#[derive(Parser, Debug)]
#[command(name = "shortcuts")]
#[command(version)]
#[command(about = "Bind keyboard shortcuts and fire them from key events", long_about = None)]
struct Args {
    /// TOML bindings file (default: ~/.config/shortcuts/bindings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Platform name used to resolve `mod`, e.g. MacIntel or Win32
    #[arg(long, value_name = "NAME")]
    platform: Option<String>,

    /// Validate config, print the parsed bindings and exit
    #[arg(long)]
    check_config: bool,

    /// Dispatch a scripted event, ACTION:KEY[:MOD,MOD] (can be used multiple times)
    #[arg(long, value_name = "SPEC")]
    fire: Vec<FireSpec>,

    /// Read live key events from the terminal until Ctrl+C
    #[arg(long)]
    listen: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Main application state
struct Application {
    config: Config,
    args: Args,
}

impl Application {
    /// Load the bindings file named on the command line, or the default one
    fn new(args: Args) -> Result<Self, Box<dyn std::error::Error>> {
        let config = match args.config {
            Some(ref path) => {
                log::info!("Loading bindings from {}", path.display());
                Config::from_toml_path(path)?
            }
            None => Config::load_default()?,
        };

        Ok(Self { config, args })
    }

    /// Build a service listening on `source` with every configured binding
    /// applied; fired commands go to `on_fire`
    fn service<S, F>(&self, source: &mut S, on_fire: F) -> ShortcutService
    where
        S: EventSource,
        F: Fn(&str) + Send + Sync + 'static,
    {
        let platform = self.config.resolve_platform(self.args.platform.as_deref());
        let service = ShortcutService::new(source, &platform);
        self.config.apply(&service, on_fire);
        service
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut bus = EventBus::new();
        let service = self.service(&mut bus, |_| {});

        for entry in &self.config.bindings {
            let info = service.key_info(&entry.keys, entry.action);
            println!("  {:<20} {} -> {}", entry.keys, info, entry.command);
        }
        println!(
            "Configuration is valid ({} bindings)",
            service.binding_count()
        );
        Ok(())
    }

    /// Dispatch every `--fire` event and report what fired
    fn fire_all(&self) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);

        let mut bus = EventBus::new();
        let _service = self.service(&mut bus, move |command| sink.lock().push(command.to_string()));

        for spec in &self.args.fire {
            bus.dispatch(&spec.to_event());
            let commands: Vec<String> = fired.lock().drain(..).collect();
            if commands.is_empty() {
                println!("{} -> (none)", spec);
            } else {
                println!("{} -> {}", spec, commands.join(", "));
            }
        }
    }

    /// Run the interactive terminal listener
    fn listen(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut bus = EventBus::new();
        let service = self.service(&mut bus, |command| {
            print!("fired: {}\r\n", command);
        });

        if service.binding_count() == 0 {
            log::warn!("No bindings loaded; nothing will fire");
        }

        terminal::listen(&bus)?;
        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let app = Application::new(args)?;

    if app.args.check_config {
        return app.validate();
    }

    if !app.args.fire.is_empty() {
        app.fire_all();
    }

    if app.args.listen {
        return app.listen();
    }

    if app.args.fire.is_empty() {
        app.validate()?;
    }

    Ok(())
}
