use dioxus::prelude::*;

mod components;
mod config;
mod db;
mod session;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    // `launch` installs the tracing subscriber for the active platform.
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Karaoke Night" }
        document::Meta { name: "theme-color", content: "#030712" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Karaoke Night" }

        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
