//! Webview glue for the things the virtual DOM cannot reach: real focus,
//! the clipboard, inert background, and scrolling.

use dioxus::document::eval;

fn js_string_literal(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{escaped}\"")
}

/// Moves real focus to the element with the given id, if it exists.
pub async fn focus_element(element_id: &str) {
    let id_literal = js_string_literal(element_id);
    let script = format!(
        r"
        const el = document.getElementById({id_literal});
        if (el) {{ el.focus(); }}
        "
    );
    let _ = eval(&script).await;
}

/// Returns the id of `document.activeElement`, when it has one.
pub async fn active_element_id() -> Option<String> {
    let script = r"
        const el = document.activeElement;
        return el && el.id ? el.id : '';
    ";
    match eval(script).join::<String>().await {
        Ok(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

/// Marks everything outside the detail panel inert while it is open.
pub async fn set_background_inert(locked: bool) {
    let script = format!(
        r"
        const root = document.getElementById('roadmap-main');
        if (!root) {{ return; }}
        if ({locked}) {{ root.setAttribute('inert', ''); }}
        else {{ root.removeAttribute('inert'); }}
        "
    );
    let _ = eval(&script).await;
}

/// Copies text to the clipboard; false means the write was refused.
pub async fn write_clipboard_text(text: &str) -> bool {
    let text_literal = js_string_literal(text);
    let script = format!(
        r"
        try {{
            await navigator.clipboard.writeText({text_literal});
            return true;
        }} catch (e) {{
            return false;
        }}
        "
    );
    eval(&script).join::<bool>().await.unwrap_or(false)
}

/// Copies the current address (the deep link) to the clipboard.
pub async fn copy_current_location() -> bool {
    let script = r"
        try {
            await navigator.clipboard.writeText(window.location.href);
            return true;
        } catch (e) {
            return false;
        }
    ";
    eval(script).join::<bool>().await.unwrap_or(false)
}

/// Scrolls a node card into view before opening it from "next topic".
pub async fn scroll_into_view(element_id: &str) {
    let id_literal = js_string_literal(element_id);
    let script = format!(
        r"
        const el = document.getElementById({id_literal});
        if (!el) {{ return; }}
        const reduce = window.matchMedia('(prefers-reduced-motion: reduce)').matches;
        el.scrollIntoView({{ block: 'center', behavior: reduce ? 'auto' : 'smooth' }});
        "
    );
    let _ = eval(&script).await;
}
