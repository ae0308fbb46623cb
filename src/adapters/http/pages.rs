//! Minimal server-rendered pages.
//!
//! No templating engine: pages are plain HTML shells around the few values
//! the handlers produce. Anything user-controlled is escaped before it is
//! interpolated.

use axum::response::Html;

use crate::domain::user::User;

/// Escape text for interpolation into HTML.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn shell(title: &str, notice: Option<&str>, body: &str) -> Html<String> {
    let notice_html = notice
        .map(|n| format!("<p class=\"notice\">{}</p>", escape(n)))
        .unwrap_or_default();

    Html(format!(
        "<!doctype html><html><head><title>{title}</title></head><body>\
         <h1>{title}</h1>{notice_html}{body}</body></html>",
        title = escape(title),
        notice_html = notice_html,
        body = body,
    ))
}

pub fn login_page(notice: Option<&str>) -> Html<String> {
    shell(
        "Login",
        notice,
        "<form method=\"post\" action=\"/login\">\
         <input name=\"email\" type=\"email\" placeholder=\"Email\" required>\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\
         <button type=\"submit\">Login</button></form>\
         <p><a href=\"/register\">Register</a></p>",
    )
}

pub fn register_page(notice: Option<&str>) -> Html<String> {
    shell(
        "Register",
        notice,
        "<form method=\"post\" action=\"/register\">\
         <input name=\"email\" type=\"email\" placeholder=\"Email\" required>\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\
         <button type=\"submit\">Register</button></form>\
         <p><a href=\"/login\">Login</a></p>",
    )
}

pub fn dashboard_page(user: &User, notice: Option<&str>) -> Html<String> {
    let status = if user.is_premium {
        "Premium account"
    } else {
        "Free account \u{2014} <a href=\"/premium\">go premium</a>"
    };
    let body = format!(
        "<p>Logged in as {}</p><p>{}</p>\
         <form method=\"get\" action=\"/search\">\
         <input name=\"query\" placeholder=\"Search listings\">\
         <button type=\"submit\">Search</button></form>\
         <p><a href=\"/settings\">Settings</a> | <a href=\"/logout\">Logout</a></p>",
        escape(&user.email),
        status,
    );
    shell("Dashboard", notice, &body)
}

pub fn settings_page(user: &User, notice: Option<&str>) -> Html<String> {
    let body = format!(
        "<form method=\"post\" action=\"/settings\">\
         <input name=\"email\" type=\"email\" value=\"{}\">\
         <button type=\"submit\">Update email</button></form>\
         <form method=\"post\" action=\"/settings\">\
         <input name=\"password\" type=\"password\" placeholder=\"New password\">\
         <button type=\"submit\">Update password</button></form>\
         <p><a href=\"/dashboard\">Back</a></p>",
        escape(&user.email),
    );
    shell("Settings", notice, &body)
}

pub fn premium_page(display_price: &str, error: Option<&str>) -> Html<String> {
    let error_html = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape(e)))
        .unwrap_or_default();
    let body = format!(
        "{}<p>Premium access for {} per month.</p>\
         <form method=\"post\" action=\"/checkout\">\
         <button type=\"submit\">Subscribe</button></form>\
         <p><a href=\"/dashboard\">Back</a></p>",
        error_html,
        escape(display_price),
    );
    shell("Premium", None, &body)
}

pub fn checkout_success_page() -> Html<String> {
    shell(
        "Payment received",
        None,
        "<p>Thank you. Your premium access activates as soon as the payment \
         is confirmed.</p><p><a href=\"/dashboard\">Back to dashboard</a></p>",
    )
}

pub fn search_results_page(
    query: &str,
    items: &[serde_json::Value],
    error: Option<&str>,
) -> Html<String> {
    let mut body = String::new();
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>", escape(error)));
    }
    body.push_str(&format!("<p>Results for {}:</p><ul>", escape(query)));
    for item in items {
        body.push_str(&format!("<li><pre>{}</pre></li>", escape(&item.to_string())));
    }
    body.push_str("</ul><p><a href=\"/dashboard\">Back</a></p>");
    shell("Search results", None, &body)
}
