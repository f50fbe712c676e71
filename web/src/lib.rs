use clap::{Parser, ValueEnum};
use wasm_bindgen::prelude::*;
use yew::prelude::*;

mod minesweeper;
mod settings;
mod utils;

use settings::{BoardSettings, ClickSettings, Screen};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    board: BoardSettings,

    #[command(flatten)]
    clicks: ClickSettings,

    /// Which game to show first
    #[arg(long, value_enum, default_value_t)]
    start: Screen,
}

#[derive(Properties, Debug, Clone, PartialEq)]
struct AppProps {
    board: BoardSettings,
    clicks: ClickSettings,
    start: Screen,
}

/// Every screen paired with whether it is hidden while `active` is shown.
fn screen_panels(active: Screen) -> impl Iterator<Item = (Screen, bool)> {
    Screen::value_variants()
        .iter()
        .map(move |&screen| (screen, screen != active))
}

#[function_component]
fn App(props: &AppProps) -> Html {
    use click_test::ClickTestView;
    use minesweeper::MinesweeperView;

    let screen = use_state(|| props.start);

    let tab = |target: Screen| {
        let screen = screen.clone();
        let class = classes!((*screen == target).then_some("active"));
        let onclick = Callback::from(move |_: MouseEvent| {
            log::debug!("switch to {:?}", target);
            screen.set(target);
        });
        html! {
            <li><button {class} {onclick}>{target.title()}</button></li>
        }
    };

    let board = props.board.clone();
    let clicks = props.clicks.clone();

    html! {
        <>
            <header>
                <nav>
                    <ul>
                        {tab(Screen::Minesweeper)}
                        {tab(Screen::ClickTest)}
                    </ul>
                </nav>
            </header>

            <main>
                {
                    // inactive screens stay mounted, only hidden
                    for screen_panels(*screen).map(|(target, hidden)| {
                        let view = match target {
                            Screen::Minesweeper => {
                                let board = board.clone();
                                html! { <MinesweeperView ..board /> }
                            }
                            Screen::ClickTest => {
                                let clicks = clicks.clone();
                                html! { <ClickTestView ..clicks /> }
                            }
                        };
                        html! {
                            <div key={target.title()} {hidden}>{view}</div>
                        }
                    })
                }
            </main>
        </>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::parse_from([""]), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(err.to_string());
        }
    }
    if let Some(err) = parse_error {
        log::error!("Ignoring start-up options from URL fragment: {}", err);
    }
    log::debug!("start-up options: {:?}", args);

    let props = AppProps {
        board: args.board,
        clicks: args.clicks,
        start: args.start,
    };

    match document().get_element_by_id("arcade") {
        Some(root) => yew::Renderer::<App>::with_root_and_props(root, props).render(),
        None => {
            log::error!("Could not find id=\"arcade\" element, mounting on body");
            yew::Renderer::<App>::with_props(props).render()
        }
    };

    log::debug!("App started");
}
