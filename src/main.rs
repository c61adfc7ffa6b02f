#![allow(warnings)]
//! Household Mini App Entry Point

mod app;
mod components;
mod context;
mod firestore;
mod hooks;
mod store;
mod telegram;
mod texts;
mod viewport;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
