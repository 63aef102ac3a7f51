use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::dispatch::App;
use crate::request::Request;
use crate::response::Response;

/// A thin hyper adapter around [`App`].
///
/// Translates the transport request into `(method, path, headers)`, runs the
/// synchronous dispatch pipeline, and writes the produced response back. The
/// router itself never touches the transport.
pub struct Server {
    app: Arc<App>,
}

impl Server {
    /// Wraps an application for serving.
    pub fn new(app: App) -> Self {
        Self { app: Arc::new(app) }
    }

    /// Serves requests on `addr` until the server fails or is dropped.
    pub async fn run(self, addr: SocketAddr) -> Result<(), hyper::Error> {
        let service = hyper::service::make_service_fn(move |_| {
            let app = self.app.clone();
            async move {
                Ok::<_, Infallible>(hyper::service::service_fn(
                    move |req: hyper::Request<hyper::Body>| {
                        let app = app.clone();
                        async move {
                            let (parts, _body) = req.into_parts();
                            let path = parts.uri.path().to_string();
                            let mut request =
                                Request::from_parts(parts.method, path, parts.headers);
                            let resp = app.dispatch(&mut request);
                            Ok::<_, Infallible>(into_hyper(resp))
                        }
                    },
                ))
            }
        });

        hyper::Server::bind(&addr).serve(service).await
    }
}

fn into_hyper(resp: Response) -> hyper::Response<hyper::Body> {
    let (status, headers, body) = resp.into_parts();
    let mut out = hyper::Response::new(hyper::Body::from(body));
    *out.status_mut() = status;
    *out.headers_mut() = headers;
    out
}
