use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::{AppContext, SessionContext};
use crate::views::{HomeView, ProgressView, ReaderView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/read/:book_id", ReaderView)] Read { book_id: u64 },
        #[route("/progress", ProgressView)] Progress {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Navbar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    rsx! {
        nav { class: "navbar",
            h1 { class: "navbar-brand", "Bookshelf" }
            ul { class: "navbar-links",
                li { Link { to: Route::Home {}, "Library" } }
                li { Link { to: Route::Progress {}, "My Progress" } }
            }
            SessionBadge {}
        }
    }
}

/// Sign-in state in the navbar corner: a token form when signed out,
/// the reader's name and a sign-out button when signed in.
#[component]
fn SessionBadge() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<SessionContext>();
    let mut token = use_signal(String::new);
    let mut rejected = use_signal(|| false);

    let on_sign_in = {
        let identity = ctx.identity();
        use_callback(move |()| {
            let identity = identity.clone();
            let entered = token().trim().to_string();
            if entered.is_empty() {
                return;
            }
            spawn(async move {
                match identity.sign_in(entered).await {
                    Ok(profile) => {
                        rejected.set(false);
                        token.set(String::new());
                        session.signed_in(profile);
                    }
                    Err(_) => {
                        rejected.set(true);
                        session.signed_out();
                    }
                }
            });
        })
    };

    match session.profile() {
        Some(profile) => rsx! {
            div { class: "session-badge",
                span { class: "session-badge-name", "Hi, {profile.name()}" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        ctx.identity().sign_out();
                        session.signed_out();
                    },
                    "Sign out"
                }
            }
        },
        None => rsx! {
            form {
                class: "session-badge session-badge-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_sign_in.call(());
                },
                input {
                    class: "session-token-input",
                    r#type: "password",
                    placeholder: "Access token",
                    value: "{token()}",
                    oninput: move |evt| token.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Sign in" }
                if rejected() {
                    span { class: "session-badge-error", "Token rejected" }
                }
            }
        },
    }
}
