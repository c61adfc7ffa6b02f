//! Budget Page Component
//!
//! Placeholder tab for the household budget section.

use leptos::prelude::*;

use crate::texts;

#[component]
pub fn BudgetPage() -> impl IntoView {
    view! {
        <div class="budget-page">
            <h2>{texts::budget::TITLE}</h2>
            <p class="page-empty">{texts::budget::PLACEHOLDER}</p>
        </div>
    }
}
