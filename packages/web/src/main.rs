use dioxus::prelude::*;

use ui::SessionProvider;
use views::{Home, Users};

mod config;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/admin/users")]
    Users {},
}

fn main() {
    init_logging();
    dioxus::launch(App);
}

/// Install the logger. A failure only costs the logs, never the launch.
fn init_logging() -> bool {
    match dioxus::logger::init(tracing::Level::INFO) {
        Ok(()) => true,
        Err(e) => {
            // No subscriber yet, so the console is the only place to say so.
            eprintln!("Logger unavailable, continuing without logs: {e}");
            false
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(config::load);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::MESSENGER_CSS }

        SessionProvider {
            config,
            Router::<Route> {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_logger_init_does_not_panic() {
        // The global subscriber can only be set once per process.
        init_logging();
        init_logging();
    }
}
