//! # HTML Pages
//!
//! Server-rendered pages. Every value that came from a request or the
//! store goes through [`escape_html`] before it is written out.

use std::fmt::Write;

use axum::http::StatusCode;
use voucher_core::{RedeemOutcome, Voucher, APP_NAME};

use crate::config::Settings;

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<title>{title} - {APP_NAME}</title>
<link rel="stylesheet" href="/static/style.css" />
</head>
<body>
<nav><a href="/">Vouchers</a> <a href="/about">About</a></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Voucher list with the create, redeem and delete forms.
pub fn index(vouchers: &[Voucher]) -> String {
    let mut body = String::from(
        r#"<h1>Vouchers</h1>
<form method="post" action="/voucher"><button type="submit">New voucher</button></form>
<form method="post" action="/redeem">
<input type="text" name="code" placeholder="Voucher code" autofocus />
<button type="submit">Redeem</button>
</form>
"#,
    );

    if vouchers.is_empty() {
        body.push_str("<p class=\"empty\">No vouchers yet.</p>\n");
        return layout("Vouchers", &body);
    }

    body.push_str(
        "<form method=\"post\" action=\"/delete\">\n<table>\n\
         <tr><th></th><th>Code</th><th>State</th><th>Created</th></tr>\n",
    );
    for voucher in vouchers {
        let code = escape_html(&voucher.code);
        let created = voucher
            .created_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        let state = voucher.state();

        // Writing into a String cannot fail.
        let _ = writeln!(
            body,
            "<tr class=\"{state}\"><td><input type=\"checkbox\" name=\"code\" value=\"{code}\" /></td>\
             <td><a href=\"/barcode/{code}\"><code>{code}</code></a></td>\
             <td>{label}</td><td>{created}</td></tr>",
            state = state.label(),
            label = state.label(),
        );
    }
    body.push_str("</table>\n<button type=\"submit\">Delete selected</button>\n</form>\n");

    layout("Vouchers", &body)
}

/// About page with the running server's address and files.
pub fn about(settings: &Settings) -> String {
    layout(
        "About",
        &format!(
            "<h1>About</h1>\n\
             <p>Issue single-use voucher codes and redeem them exactly once.</p>\n\
             <p>Each code is printed with a Code 93 barcode that any scanner in \
             full-ASCII mode can read back into the redeem field.</p>\n\
             <dl>\n\
             <dt>Address</dt><dd><code>{url}</code></dd>\n\
             <dt>Database</dt><dd><code>{database}</code></dd>\n\
             <dt>Log file</dt><dd><code>{log}</code></dd>\n\
             </dl>\n",
            url = escape_html(&settings.url()),
            database = escape_html(&settings.database_path.to_string_lossy()),
            log = escape_html(&settings.log_path.to_string_lossy()),
        ),
    )
}

/// Page shown after a voucher was created.
pub fn voucher_created(code: &str) -> String {
    let code = escape_html(code);
    layout(
        "New voucher",
        &format!(
            "<h1>New voucher</h1>\n\
             <p class=\"code\"><code>{code}</code></p>\n\
             <p><img src=\"/barcode/{code}\" alt=\"Barcode for {code}\" width=\"360\" height=\"60\" /></p>\n\
             <p><a href=\"/\">Back to the list</a></p>\n"
        ),
    )
}

/// Page for a redeem that did not succeed.
pub fn redeem_failed(code: &str, outcome: RedeemOutcome) -> String {
    layout(
        "Not redeemed",
        &format!(
            "<h1>Not redeemed</h1>\n\
             <p class=\"error\">Voucher <code>{code}</code> {message}.</p>\n\
             <p><a href=\"/\">Back to the list</a></p>\n",
            code = escape_html(code),
            message = outcome.message(),
        ),
    )
}

/// Immediate client-side redirect back to the list.
pub fn redirect_home() -> String {
    layout(
        "Done",
        "<meta http-equiv=\"Refresh\" content=\"0; url='/'\" />\n\
         <p><a href=\"/\">Continue</a></p>\n",
    )
}

/// Generic error page for 4xx/5xx responses.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        &format!(
            "<h1>{code} {title}</h1>\n<p class=\"error\">{message}</p>\n\
             <p><a href=\"/\">Back to the list</a></p>\n",
            code = status.as_u16(),
            title = escape_html(title),
            message = escape_html(message),
        ),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
