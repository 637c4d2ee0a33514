//! Built-in HTML templates for the two pages.

use std::fmt::Write;

use crate::views::{DataView, InputView, TemplateRenderer};

/// Default renderer used by the binary. All user-supplied text is escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTemplates;

impl TemplateRenderer for HtmlTemplates {
    fn render_input(&self, view: &InputView) -> String {
        let mut body = String::new();
        if let Some(message) = &view.success_message {
            let _ = write!(body, r#"<p class="success">{}</p>"#, escape_html(message));
        }
        if let Some(message) = &view.error_message {
            let _ = write!(body, r#"<p class="error">{}</p>"#, escape_html(message));
        }
        body.push_str(
            r#"<form method="post" action="/input">
<label for="message">Message</label>
<textarea id="message" name="message" rows="4" cols="50"></textarea>
<button type="submit">Submit</button>
</form>
<p><a href="/data">View all messages</a></p>"#,
        );
        page("Submit a message", &body)
    }

    fn render_data(&self, view: &DataView) -> String {
        let mut body = String::new();
        if view.messages.is_empty() {
            body.push_str("<p>No messages yet.</p>");
        } else {
            let _ = write!(body, "<p>{} message(s)</p>", view.messages.len());
            body.push_str("<table>\n<tr><th>ID</th><th>Message</th><th>Timestamp</th></tr>\n");
            for message in &view.messages {
                let _ = writeln!(
                    body,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    message.id,
                    escape_html(&message.text),
                    message.created_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
            body.push_str("</table>");
        }
        body.push_str(r#"<p><a href="/input">Submit a message</a></p>"#);
        page("Messages", &body)
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
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
