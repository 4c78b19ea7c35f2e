//! HTML fragments rendered into the page
//!
//! User- and server-supplied text is escaped everywhere except the plan body,
//! which the backend delivers as pre-rendered markup.

/// Escape text for safe inclusion in element content or attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Inner markup of the chat "thinking" placeholder
pub fn chat_loading() -> String {
    r#"<div class="spinner-border spinner-border-sm text-primary" role="status"></div> Thinking..."#
        .to_string()
}

/// Inner markup of a transcript entry: bold speaker label, then the text
pub fn chat_entry(label: &str, content: &str) -> String {
    format!(
        "<strong>{}</strong> {}",
        html_escape(label),
        html_escape(content)
    )
}

/// Result-panel markup while a plan is being generated
pub fn plan_loading() -> String {
    r#"<div class="spinner-border text-primary" role="status"></div> Generating your learning plan..."#
        .to_string()
}

/// Card wrapping a generated plan; `plan_html` is embedded verbatim
pub fn plan_card(plan_html: &str) -> String {
    format!(
        r#"<div class="card">
    <div class="card-header bg-success text-white">
        <h3 class="card-title">Your Personalized Learning Plan</h3>
    </div>
    <div class="card-body">
        {plan_html}
    </div>
</div>"#
    )
}

/// Danger banner with escaped text
pub fn error_banner(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger">{}</div>"#,
        html_escape(message)
    )
}
