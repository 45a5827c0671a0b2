//! Askama templates for the web frontend.

use askama::Template;

/// Routes listed on the index page.
pub const ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/start_date",
    "/api/v1.0/start_date/end_date",
];

/// Home page listing the available routes.
#[derive(Template)]
#[template(
    source = r#"Welcome to the Climate App!<br/><br/>
Available Routes:<br/>
{% for route in routes %}{{ route|safe }}<br/>
{% endfor %}<br/>
IMPORTANT: use the format yyyy-mm-dd for dates.<br/>
"#,
    ext = "html"
)]
pub struct IndexTemplate {
    pub routes: &'static [&'static str],
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self { routes: ROUTES }
    }
}
