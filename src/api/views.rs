//! HTML views
//!
//! Plain string rendering. Anything that came from a user (emails, target
//! URLs, short codes, messages) goes through `escape_html`.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::errors::TinyAppError;
use crate::storage::User;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn header(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            r#"<nav>
  <a href="/urls">My URLs</a> | <a href="/urls/new">Create New URL</a>
  <span class="user">Logged in as: {}</span>
  <form method="POST" action="/logout" style="display:inline"><button type="submit">Logout</button></form>
</nav>"#,
            escape_html(&user.email)
        ),
        None => r#"<nav>
  <a href="/login">Login</a> | <a href="/register">Register</a>
</nav>"#
            .to_string(),
    }
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape_html(msg)))
        .unwrap_or_default()
}

fn layout(title: &str, user: Option<&User>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{} - TinyApp</title>
</head>
<body>
{}
<main>
{}
</main>
</body>
</html>"#,
        escape_html(title),
        header(user),
        body
    )
}

fn credentials_form(action: &str, button: &str) -> String {
    format!(
        r#"<form method="POST" action="{action}">
  <label for="email">Email</label>
  <input type="email" id="email" name="email">
  <label for="password">Password</label>
  <input type="password" id="password" name="password">
  <button type="submit">{button}</button>
</form>"#
    )
}

pub fn render_login(user: Option<&User>, error: Option<&str>) -> String {
    let body = format!(
        "<h1>Login</h1>\n{}\n{}",
        error_banner(error),
        credentials_form("/login", "Login")
    );
    layout("Login", user, &body)
}

pub fn render_registration(user: Option<&User>, error: Option<&str>) -> String {
    let body = format!(
        "<h1>Register</h1>\n{}\n{}",
        error_banner(error),
        credentials_form("/register", "Register")
    );
    layout("Register", user, &body)
}

pub fn render_urls_index(user: Option<&User>, urls: &BTreeMap<String, String>) -> String {
    let mut body = String::from("<h1>My URLs</h1>\n");

    if urls.is_empty() {
        body.push_str(r#"<p class="empty">You have no short URLs yet. <a href="/urls/new">Create one</a>.</p>"#);
    } else {
        body.push_str("<table>\n<tr><th>Short URL</th><th>Long URL</th><th></th><th></th></tr>\n");
        for (code, target) in urls {
            let code = escape_html(code);
            let _ = writeln!(
                body,
                r#"<tr class="url-row"><td><a href="/u/{code}">{code}</a></td><td>{}</td><td><a href="/urls/{code}">Edit</a></td><td><form method="POST" action="/urls/{code}/delete"><button type="submit">Delete</button></form></td></tr>"#,
                escape_html(target)
            );
        }
        body.push_str("</table>");
    }

    layout("My URLs", user, &body)
}

pub fn render_urls_new(user: Option<&User>) -> String {
    let body = r#"<h1>Create TinyURL</h1>
<form method="POST" action="/urls">
  <label for="longURL">Enter a URL:</label>
  <input type="text" id="longURL" name="longURL" placeholder="http://">
  <button type="submit">Submit</button>
</form>"#;
    layout("Create TinyURL", user, body)
}

pub fn render_urls_show(user: Option<&User>, short_code: &str, target_url: &str) -> String {
    let code = escape_html(short_code);
    let target = escape_html(target_url);
    let body = format!(
        r#"<h1>TinyURL for: <span class="target">{target}</span></h1>
<p>Short URL: <a href="/u/{code}">/u/{code}</a></p>
<h2>Edit</h2>
<form method="POST" action="/urls/{code}/edit">
  <label for="longURL">New URL:</label>
  <input type="text" id="longURL" name="longURL" value="{target}">
  <button type="submit">Update</button>
</form>"#
    );
    layout(short_code, user, &body)
}

pub fn render_not_found(user: Option<&User>, message: &str) -> String {
    let body = format!(
        "<h1>Not Found</h1>\n{}\n<p><a href=\"/urls\">Back to My URLs</a></p>",
        error_banner(Some(message))
    );
    layout("Not Found", user, &body)
}

pub fn render_error_page(err: &TinyAppError) -> String {
    // internal details stay in the log
    let message = if err.http_status().is_server_error() {
        "Something went wrong, please try again."
    } else {
        err.message()
    };
    let body = format!("<h1>{}</h1>\n{}", escape_html(err.error_type()), error_banner(Some(message)));
    layout("Error", None, &body)
}
