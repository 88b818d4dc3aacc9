//! Shared page shell: head, scripts, styles

use axum::response::Html;

/// Wraps page content in the full HTML document.
pub fn render_page(title: &str, content: &str) -> Html<String> {
    let html = format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{} - Marquee</title>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <script src="https://cdn.tailwindcss.com"></script>
            <script src="https://unpkg.com/htmx.org@1.9.10"></script>
            <script>
                tailwind.config = {{
                    darkMode: 'class',
                    theme: {{
                        extend: {{
                            colors: {{
                                'marquee': {{
                                    400: '#fbbf24',
                                    500: '#f59e0b',
                                    600: '#d97706'
                                }}
                            }}
                        }}
                    }}
                }}
            </script>
            <style>
                #search-button .busy-label {{ display: none; }}
                #search-button.htmx-request .busy-label {{ display: inline; }}
                #search-button.htmx-request .idle-label {{ display: none; }}
            </style>
        </head>
        <body class="bg-gray-900 text-white min-h-screen font-sans">
            <main class="max-w-6xl mx-auto p-6">
                {}
            </main>
        </body>
        </html>"#,
        title, content
    );

    Html(html)
}
