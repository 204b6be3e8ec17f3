// file: src/server/pages.rs
// description: minimal inline HTML for the captcha, login and chat pages

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"id\"><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

fn flash(error: Option<&str>) -> String {
    error
        .map(|msg| format!("<p class=\"error\">{}</p>", escape(msg)))
        .unwrap_or_default()
}

pub fn captcha_page(error: Option<&str>) -> String {
    layout(
        "Verifikasi",
        &format!(
            "<h1>Verifikasi dulu ya</h1>{}\
             <img src=\"/captcha.svg\" alt=\"captcha\">\
             <form method=\"post\" action=\"/submit_captcha\">\
             <input name=\"captcha\" autocomplete=\"off\" autofocus>\
             <button type=\"submit\">Lanjut</button></form>",
            flash(error)
        ),
    )
}

pub fn login_page(error: Option<&str>) -> String {
    layout(
        "Login Admin",
        &format!(
            "<h1>Login Admin</h1>{}\
             <form method=\"post\" action=\"/login\">\
             <input name=\"username\" placeholder=\"username\">\
             <input name=\"password\" type=\"password\" placeholder=\"password\">\
             <button type=\"submit\">Masuk</button></form>",
            flash(error)
        ),
    )
}

pub fn chat_page() -> String {
    layout(
        "Chatbot UNDIP",
        "<h1>Chatbot UNDIP</h1><div id=\"log\"></div>\
         <form id=\"ask\"><input id=\"message\" autocomplete=\"off\"><button>Kirim</button></form>\
         <script>\
         document.getElementById('ask').addEventListener('submit', async (e) => {\
           e.preventDefault();\
           const input = document.getElementById('message');\
           const res = await fetch('/ask', {method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify({message: input.value})});\
           const data = await res.json();\
           const p = document.createElement('p'); p.textContent = data.reply;\
           document.getElementById('log').appendChild(p); input.value = '';\
         });\
         </script>",
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
