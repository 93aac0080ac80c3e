//! Read-only web service over the record store.
//!
//! | Route            | Response                                  |
//! |------------------|-------------------------------------------|
//! | `/`              | `index.html` rendered with every hotel    |
//! | `/hotel/<id>`    | `hotel.html`, or 404 `Hotel no encontrado` |
//! | `/api/hoteles`   | the store as JSON                         |
//! | `/static/<path>` | files from the static directory           |
//!
//! The store is re-read on every request; templates are loaded once.

mod lifecycle;
mod response;
mod route;

use std::sync::Arc;

use anyhow::Result;
use tiny_http::{Method, Request};

use crate::config::SiteConfig;
use crate::generator::SiteRenderer;
use crate::generator::links::LinkBuilder;
use crate::hotel::{HotelRecord, store};
use crate::utils::mime;
use crate::{debug, log};

use response::{HOTEL_NOT_FOUND, Reply};
use route::{Route, resolve_static, route};

/// Request handler state shared by the whole session.
struct App<'a> {
    config: &'a SiteConfig,
    renderer: SiteRenderer,
}

impl<'a> App<'a> {
    fn new(config: &'a SiteConfig) -> Result<Self> {
        // Served pages link root-relative, whatever the configured base URL
        let renderer = SiteRenderer::new(config, LinkBuilder::with("", "", true))?;
        Ok(Self { config, renderer })
    }

    fn handle(&self, method: &Method, url: &str) -> Reply {
        if !matches!(method, Method::Get | Method::Head) {
            return Reply::method_not_allowed();
        }

        let result = match route(url) {
            Route::Index => self.index(),
            Route::Hotel(id) => self.hotel(&id),
            Route::ApiHotels => self.api(),
            Route::Static(rel) => Ok(self.static_file(&rel)),
            Route::NotFound => Ok(Reply::not_found("404 Not Found")),
        };

        result.unwrap_or_else(|err| {
            log!("error"; "{}: {:#}", url, err);
            Reply::internal_error(&err)
        })
    }

    fn load(&self) -> Result<Vec<HotelRecord>> {
        Ok(store::load(&self.config.paths.data)?)
    }

    fn index(&self) -> Result<Reply> {
        let hotels = self.load()?;
        let pages = self.renderer.prepare(&hotels)?;
        Ok(Reply::html(self.renderer.render_index(&pages, &hotels)?))
    }

    fn hotel(&self, id: &str) -> Result<Reply> {
        let hotels = self.load()?;
        let Some(position) = hotels
            .iter()
            .enumerate()
            .position(|(pos, hotel)| hotel.matches(id, pos))
        else {
            return Ok(Reply::not_found(HOTEL_NOT_FOUND));
        };

        let pages = self.renderer.prepare(&hotels)?;
        let html = self
            .renderer
            .render_detail(&pages, &pages[position], &hotels[position])?;
        Ok(Reply::html(html))
    }

    fn api(&self) -> Result<Reply> {
        let hotels = self.load()?;
        Ok(Reply::json(store::to_json(&hotels)?))
    }

    fn static_file(&self, rel: &str) -> Reply {
        let Some(path) = resolve_static(rel, &self.config.paths.static_dir) else {
            return Reply::not_found("404 Not Found");
        };
        match std::fs::read(&path) {
            Ok(body) => Reply::new(200, mime::from_path(&path), body),
            Err(err) => Reply::internal_error(&err.into()),
        }
    }
}

/// Bind the server and answer requests until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    lifecycle::setup_shutdown_handler()?;

    let app = App::new(config)?;
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if lifecycle::is_shutdown() {
            break;
        }
        if let Err(e) = handle_request(&app, request) {
            log!("serve"; "request error: {e}");
        }
    }
    Ok(())
}

fn handle_request(app: &App<'_>, request: Request) -> Result<()> {
    let reply = app.handle(request.method(), request.url());
    debug!("serve"; "{} {} {}", request.method(), request.url(), reply.status);
    response::send(request, reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::generator::site::tests::project;
    use std::fs;

    const HOTELS: &str = r#"[
  {"id": "Hotel_Test!", "nombre": "Test Hotel",
   "imagenes": {"hotel": "static/images/hotels/hotel-test/hotel.webp", "galeria": []}},
  {"id": "mar", "nombre": "Hotel Mar"}
]
"#;

    fn setup(root: &std::path::Path) -> SiteConfig {
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(root.join("data/hotels.json"), HOTELS).unwrap();
        test_config_at(root, "[site]\nbase_url = \"https://x.github.io/h\"")
    }

    fn body(reply: &Reply) -> String {
        String::from_utf8(reply.body.clone()).unwrap()
    }

    #[test]
    fn test_index_and_detail() {
        let temp = project();
        let config = setup(temp.path());
        let app = App::new(&config).unwrap();

        let index = app.handle(&Method::Get, "/");
        assert_eq!(index.status, 200);
        assert_eq!(index.content_type, mime::types::HTML);
        assert!(body(&index).contains(r#"<a href="/hotel/hotel-test/">Test Hotel</a>"#));

        let detail = app.handle(&Method::Get, "/hotel/Hotel_Test!");
        assert_eq!(detail.status, 200);
        assert!(body(&detail).contains("Test Hotel"));
        assert_eq!(app.handle(&Method::Get, "/hotel/mar/").status, 200);
    }

    #[test]
    fn test_unknown_hotel() {
        let temp = project();
        let config = setup(temp.path());
        let app = App::new(&config).unwrap();

        let reply = app.handle(&Method::Get, "/hotel/nope");
        assert_eq!(reply.status, 404);
        assert_eq!(body(&reply), HOTEL_NOT_FOUND);
    }

    #[test]
    fn test_api_reads_store_per_request() {
        let temp = project();
        let config = setup(temp.path());
        let app = App::new(&config).unwrap();

        let reply = app.handle(&Method::Get, "/api/hoteles");
        assert_eq!(reply.content_type, mime::types::JSON);
        assert_eq!(body(&reply), store::to_json(&store::load(&config.paths.data).unwrap()).unwrap());

        fs::write(&config.paths.data, "[]").unwrap();
        assert_eq!(body(&app.handle(&Method::Get, "/api/hoteles")), "[]\n");
    }

    #[test]
    fn test_static_and_errors() {
        let temp = project();
        let config = setup(temp.path());
        let app = App::new(&config).unwrap();

        let css = app.handle(&Method::Get, "/static/css/styles.css");
        assert_eq!(css.status, 200);
        assert_eq!(css.content_type, mime::types::CSS);

        assert_eq!(app.handle(&Method::Get, "/static/../data/hotels.json").status, 404);
        assert_eq!(app.handle(&Method::Get, "/nothing").status, 404);
        assert_eq!(app.handle(&Method::Post, "/").status, 405);
    }

    #[test]
    fn test_broken_store_is_500() {
        let temp = project();
        let config = setup(temp.path());
        let app = App::new(&config).unwrap();

        fs::write(&config.paths.data, "{").unwrap();
        assert_eq!(app.handle(&Method::Get, "/").status, 500);
    }
}
