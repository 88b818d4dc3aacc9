//! Movie search components - form, alert, details block

use marquee_search::view::BUSY_LABEL;
use marquee_search::{MovieRecord, Snapshot};

use super::layout::{button, escape_html, input};

/// Element id of the swappable results region.
pub const RESULTS_ID: &str = "results";

/// Renders the search form.
///
/// Enter in the input submits the form. While a request is in flight HTMX
/// disables the button and swaps its label to the busy text; a snapshot
/// that is already busy renders that way from the server too.
pub fn search_form(snapshot: &Snapshot) -> String {
    let disabled = if snapshot.busy() { "disabled" } else { "" };
    let button_html = button(
        &format!(
            r#"<span class="idle-label">{}</span><span class="busy-label">{BUSY_LABEL}</span>"#,
            snapshot.trigger_label()
        ),
        "primary",
        Some(&format!(r#"id="search-button" type="submit" {disabled}"#)),
    );

    let input_html = input(
        "query",
        "Search for a movie...",
        &snapshot.query,
        Some(
            r#"autocomplete="off" hx-post="/htmx/query" hx-trigger="keyup changed delay:150ms" hx-swap="none""#,
        ),
    );

    format!(
        r##"<form class="flex gap-2" hx-post="/htmx/search" hx-target="#{RESULTS_ID}" hx-swap="outerHTML"
                hx-disabled-elt="#search-button" hx-indicator="#search-button">
            {input_html}
            {button_html}
        </form>"##
    )
}

/// Renders the results region for a snapshot: the alert first, then the
/// details block.
pub fn results_region(snapshot: &Snapshot) -> String {
    let content = snapshot.content();
    let mut inner = String::new();
    if let Some(message) = content.alert {
        inner.push_str(&alert(message));
    }
    if let Some(record) = content.movie {
        inner.push_str(&movie_details(record));
    }

    format!(r#"<div id="{RESULTS_ID}" class="mt-8">{inner}</div>"#)
}

/// Renders an error message in the alert region.
pub fn alert(message: &str) -> String {
    format!(
        r#"<div role="alert" class="mb-6 bg-red-900 bg-opacity-40 border border-red-600 text-red-200 rounded-lg px-4 py-3">
            {}
        </div>"#,
        escape_html(message)
    )
}

/// Renders the details block: poster, heading with year and rating, plot,
/// genres, director and cast.
pub fn movie_details(record: &MovieRecord) -> String {
    let title = escape_html(&record.title);
    let genres = escape_html(&record.genres.join(", "));

    format!(
        r#"<div class="grid md:grid-cols-3 gap-6">
            <div class="md:col-span-1">
                <img src="{poster}" alt="{title}" class="w-full rounded-lg shadow-lg" />
            </div>
            <div class="md:col-span-2">
                <h2 class="text-2xl font-bold mb-4">
                    {title} ({year})
                    <span class="ml-2 text-yellow-500">★ {rating}</span>
                </h2>
                <p class="mb-4 text-gray-300">{plot}</p>
                <div class="grid grid-cols-2 gap-4">
                    <div><strong>Genres:</strong> {genres}</div>
                    <div><strong>Director:</strong> {director}</div>
                </div>
                <div class="mt-4"><strong>Cast:</strong> {cast}</div>
            </div>
        </div>"#,
        poster = escape_html(&record.poster),
        year = record.year_label(),
        rating = escape_html(&record.rating),
        plot = escape_html(&record.plot),
        director = escape_html(&record.director),
        cast = escape_html(&record.cast),
    )
}
