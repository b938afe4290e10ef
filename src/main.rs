use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{fmt, EnvFilter};

use chatfront::app::App;
use chatfront::auth::StaticSession;
use chatfront::catalog::code_for_error;
use chatfront::config::Config;
use chatfront::event::{key_to_action, poll_event, AppEvent};
use chatfront::i18n::{Dictionaries, Locale};
use chatfront::init::{bundled, run_init};
use chatfront::router::{Request, Router};
use chatfront::server;
use chatfront::ui::{self, chat::ThreadListView};

/// Locale-aware, sign-in gated front door for the chat UI
#[derive(Parser, Debug)]
#[command(name = "chatfront", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP gate (default)
    Serve {
        /// Address to listen on (overrides CHATFRONT_BIND)
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Dictionaries directory (overrides CHATFRONT_DICTIONARIES)
        #[arg(long)]
        dictionaries: Option<PathBuf>,
    },
    /// Evaluate one request offline and print the routing decision
    Route {
        /// Request path, e.g. /chat
        path: String,

        /// Query string without the leading '?'
        #[arg(long)]
        query: Option<String>,

        /// Accept-Language header value
        #[arg(long)]
        accept_language: Option<String>,

        /// Treat the request as signed in
        #[arg(long)]
        authenticated: bool,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Terminal preview of the three-pane chat layout
    Layout {
        /// Viewport width in pixels, measured once at mount
        #[arg(long, default_value_t = 1920)]
        width: u32,

        /// Locale to render
        #[arg(long, default_value_t = Locale::DEFAULT)]
        locale: Locale,
    },
    /// List configured identity providers
    Providers,
    /// Scaffold a dictionaries directory
    Init {
        #[arg(long, default_value = "./dictionaries")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let result = run(Cli::parse());
    if let Err(err) = &result {
        if let Some(code) = code_for_error(err) {
            eprintln!("{code}: {}", code.message());
        }
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Serve {
        bind: None,
        dictionaries: None,
    });

    // The preview owns the terminal; keep log lines off it.
    if !matches!(command, Commands::Layout { .. }) {
        init_tracing();
    }

    match command {
        Commands::Serve { bind, dictionaries } => {
            let mut config = Config::load()?;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(dir) = dictionaries {
                config.dictionaries = dir;
            }
            let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
            runtime.block_on(server::run(config))
        }
        Commands::Route {
            path,
            query,
            accept_language,
            authenticated,
            json,
        } => {
            let config = Config::load()?;
            let router = Router::new(config.matcher(), Arc::new(StaticSession(authenticated)));
            let mut request = Request::new(path);
            request.query = query;
            request.accept_language = accept_language;

            let decision = router.decide(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                println!("{decision}");
            }
            Ok(())
        }
        Commands::Layout { width, locale } => run_tui(width, locale),
        Commands::Providers => {
            let config = Config::load()?;
            let providers = config.providers.validate()?;
            for provider in providers.iter() {
                let href = providers.sign_in_url(provider, None).unwrap_or_default();
                println!("{:<20} {:<24} {href}", provider.id(), provider.label());
            }
            Ok(())
        }
        Commands::Init { dir } => {
            run_init(&dir)?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn run_tui(width: u32, locale: Locale) -> Result<()> {
    let mut dictionaries = Dictionaries::default();
    for locale in Locale::ALL {
        dictionaries.insert(locale, bundled(locale)?);
    }
    let mut app = App::new(width, locale, dictionaries);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut view = ThreadListView::default();

    while app.running {
        terminal.draw(|frame| ui::draw(frame, app, &mut view))?;

        if let Some(event) = poll_event(tick_rate)? {
            match event {
                AppEvent::Key(key) => app.apply(key_to_action(key)),
                // Pane sizes are fixed at mount; the terminal redraws at the new size.
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }
    }

    Ok(())
}
