//! Root document component - the complete HTML page.

use leptos::prelude::*;

use crate::styles::{CSP, REPORT_CSS};

/// Page shell: head, inline styles, header and body slot.
#[component]
pub fn ReportDocument(
    /// Page and header title
    title: String,
    /// Line under the title (source file, schema version)
    #[prop(default = String::new())]
    meta: String,
    children: Children,
) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="UTF-8" />
                <meta http-equiv="Content-Security-Policy" content=CSP />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{title.clone()}</title>
                <style>{REPORT_CSS}</style>
            </head>
            <body>
                <div class="container">
                    <header class="report-header">
                        <h1>{title}</h1>
                        <div class="meta">{meta}</div>
                    </header>
                    {children()}
                </div>
            </body>
        </html>
    }
}

/// Error banner shown when a flow ended without results.
#[component]
pub fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert">
            <p>{message}</p>
        </div>
    }
}
