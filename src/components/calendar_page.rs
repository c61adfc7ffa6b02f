//! Calendar Page Component
//!
//! Placeholder tab; the shared family calendar lands here later.

use leptos::prelude::*;

use crate::texts;

#[component]
pub fn CalendarPage() -> impl IntoView {
    view! {
        <div class="calendar-page">
            <h2>{texts::calendar::TITLE}</h2>
            <p class="page-empty">{texts::calendar::EMPTY}</p>
        </div>
    }
}
