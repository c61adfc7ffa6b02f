//! Telegram WebApp bootstrap.
//!
//! Reads `window.Telegram.WebApp` reflectively: the app must keep working
//! in a plain browser tab where the container object is absent.

use js_sys::Reflect;
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};

use crate::texts;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct WebAppUser {
    id: i64,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

/// Telegram identity as shown in the header.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicUser {
    pub id: i64,
    pub name: String,
    pub username: Option<String>,
}

fn web_app_object() -> Option<JsValue> {
    let window = web_sys::window()?;
    let telegram = Reflect::get(&window, &"Telegram".into()).ok()?;
    if telegram.is_undefined() || telegram.is_null() {
        return None;
    }
    let web_app = Reflect::get(&telegram, &"WebApp".into()).ok()?;
    if web_app.is_undefined() || web_app.is_null() {
        return None;
    }
    Some(web_app)
}

fn call_method(object: &JsValue, name: &str) {
    if let Ok(method) = Reflect::get(object, &name.into()) {
        if let Some(function) = method.dyn_ref::<js_sys::Function>() {
            let _ = function.call0(object);
        }
    }
}

fn parse_user(web_app: &JsValue) -> Option<BasicUser> {
    let init_data = Reflect::get(web_app, &"initDataUnsafe".into()).ok()?;
    let user = Reflect::get(&init_data, &"user".into()).ok()?;
    let user: WebAppUser = serde_wasm_bindgen::from_value(user).ok()?;

    let full_name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();
    let name = if full_name.is_empty() {
        user.username.clone().unwrap_or_else(|| texts::GUEST.to_string())
    } else {
        full_name
    };

    Some(BasicUser {
        id: user.id,
        name,
        username: user.username,
    })
}

/// Signals readiness to the Telegram container, expands the viewport,
/// applies the container color scheme, and returns the current user.
/// Returns `None` outside the Mini App container.
pub fn init_web_app() -> Option<BasicUser> {
    let web_app = web_app_object()?;
    call_method(&web_app, "ready");
    call_method(&web_app, "expand");

    let color_scheme = Reflect::get(&web_app, &"colorScheme".into())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "light".to_string());
    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.class_list().add_1(&format!("tg-theme-{color_scheme}"));
    }

    parse_user(&web_app)
}
