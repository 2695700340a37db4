//! Minimal server-rendered pages.
//!
//! Each page is a small string template wrapped in a shared layout. User
//! supplied values are HTML-escaped before interpolation.

use axum::response::Html;

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{body}\n</body>\n</html>\n"
    ))
}

fn flash(message: Option<&str>, error: bool) -> String {
    match message {
        Some(msg) => {
            let class = if error { "error" } else { "info" };
            format!("<p class=\"{class}\">{}</p>\n", escape(msg))
        }
        None => String::new(),
    }
}

pub fn register_page(message: Option<&str>, error: bool) -> Html<String> {
    let body = format!(
        "{}<h1>Register</h1>\n\
         <form method=\"post\" action=\"/register\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p><a href=\"/login\">Already have an account? Log in.</a></p>",
        flash(message, error)
    );
    layout("Register", &body)
}

pub fn login_page(message: Option<&str>, error: bool) -> Html<String> {
    let body = format!(
        "{}<h1>Login</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <p><a href=\"/register\">Need an account? Register.</a></p>",
        flash(message, error)
    );
    layout("Login", &body)
}

pub fn home_page(username: &str) -> Html<String> {
    let body = format!(
        "<h1>Welcome, {}!</h1>\n\
         <p><a href=\"/profile\">Profile</a> | <a href=\"/logout\">Log out</a></p>",
        escape(username)
    );
    layout("Home", &body)
}

pub fn profile_page(username: &str) -> Html<String> {
    let body = format!(
        "<h1>Profile</h1>\n<p>Logged in as {}.</p>\n\
         <p><a href=\"/home\">Home</a> | <a href=\"/logout\">Log out</a></p>",
        escape(username)
    );
    layout("Profile", &body)
}

pub fn logout_page(message: &str) -> Html<String> {
    let body = format!(
        "{}<p><a href=\"/login\">Log back in</a></p>",
        flash(Some(message), false)
    );
    layout("Logged Out", &body)
}

/// Shown when a logged-in user hits register or login.
pub fn refusal_page(message: &str) -> Html<String> {
    let body = format!(
        "{}<p><a href=\"/logout\">Log out</a> | <a href=\"/home\">Home</a></p>",
        flash(Some(message), true)
    );
    layout("Uh Oh", &body)
}

/// Generic page for storage-layer failures. Detail stays in the server log.
pub fn failure_page() -> Html<String> {
    layout(
        "Error",
        "<h1>Something went wrong</h1>\n<p>Please try again later.</p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_user_supplied_values() {
        let page = home_page("<script>alert(1)</script>");
        assert!(!page.0.contains("<script>alert"));
        assert!(page.0.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_flash_message_rendered() {
        let page = login_page(Some("Successfully created account!"), false);
        assert!(page.0.contains("Successfully created account!"));
    }

    #[test]
    fn test_no_flash_when_absent() {
        let page = login_page(None, false);
        assert!(!page.0.contains("class=\"error\""));
        assert!(!page.0.contains("class=\"info\""));
    }
}
