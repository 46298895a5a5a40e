//!
//! # HTML views
//!
//! Pure render functions: each one takes plain data and returns a complete
//! HTML document. Every piece of user-provided text goes through [`escape`].

use crate::models::Task;

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto}\
li.done span{text-decoration:line-through;color:#777}\
.notice{color:#b00}";

/// Escapes the five HTML-significant characters.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn notice(message: Option<&str>) -> String {
    message
        .map(|m| format!("<p class=\"notice\">{}</p>\n", escape(m)))
        .unwrap_or_default()
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">{submit}</button>\n</form>"
    )
}

/// Landing page for visitors without a session.
pub fn landing_page() -> String {
    layout(
        "Tasks",
        "<h1>Tasks</h1>\n<p>Keep a private list of things to do.</p>\n\
         <p><a href=\"/login\">Log in</a> or <a href=\"/signup\">sign up</a>.</p>",
    )
}

pub fn login_page(message: Option<&str>) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{}{}\n<p>No account? <a href=\"/signup\">Sign up</a>.</p>",
        notice(message),
        credentials_form("/login", "Log in"),
    );
    layout("Log in", &body)
}

pub fn signup_page(message: Option<&str>) -> String {
    let body = format!(
        "<h1>Sign up</h1>\n{}{}\n<p>Already registered? <a href=\"/login\">Log in</a>.</p>",
        notice(message),
        credentials_form("/signup", "Sign up"),
    );
    layout("Sign up", &body)
}

/// The signed-in user's list, with forms to add, complete and delete.
pub fn task_list_page(tasks: &[Task]) -> String {
    let mut body = String::from(
        "<h1>Your tasks</h1>\n<form method=\"post\" action=\"/add\">\n\
         <input type=\"text\" name=\"task\" placeholder=\"New task\">\n\
         <button type=\"submit\">Add</button>\n</form>\n",
    );

    if tasks.is_empty() {
        body.push_str("<p>Nothing to do.</p>");
    } else {
        body.push_str("<ul>\n");
        for task in tasks {
            let class = if task.done { " class=\"done\"" } else { "" };
            body.push_str(&format!("<li{class}><span>{}</span>", escape(&task.name)));
            if !task.done {
                body.push_str(&format!(
                    " <a href=\"/done/{id}\">done</a>",
                    id = task.id
                ));
            }
            body.push_str(&format!(
                " <a href=\"/delete/{id}\">delete</a></li>\n",
                id = task.id
            ));
        }
        body.push_str("</ul>");
    }

    layout("Your tasks", &body)
}

pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        "<h1>{status}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>",
        escape(message)
    );
    layout("Error", &body)
}
