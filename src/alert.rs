//! Alert system for displaying warnings and error messages to users.
//!
//! Alerts are rendered inline at the top of the dashboard, or returned on
//! their own as the body of an error response.

use maud::{Markup, html};

/// An alert message with a short summary and a longer explanation.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something is off but the page is still usable, e.g. an empty month.
    Warning {
        /// The headline of the alert.
        message: String,
        /// The explanation shown below the headline.
        details: String,
    },
    /// The request could not be fully honoured.
    Error {
        /// The headline of the alert.
        message: String,
        /// The explanation shown below the headline.
        details: String,
    },
}

impl Alert {
    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Warning { message, details } => (
                "text-yellow-800 border-yellow-300 bg-yellow-50 \
                dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
        };

        html! {
            div
                class={"alert w-full p-4 mb-4 text-sm border rounded-lg " (style)}
                role="alert"
            {
                span class="font-medium" { (message) }
                @if !details.is_empty() {
                    p class="mt-1" { (details) }
                }
            }
        }
    }
}
