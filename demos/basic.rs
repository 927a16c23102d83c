//! Minimal waypost demo: a nested route tree with layered middleware,
//! dispatched against a handful of in-memory requests.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! waypost does not listen on a socket; hand `Router::dispatch` to whatever
//! transport you run (hyper, a lambda shim, a test harness).

use std::time::Duration;

use waypost::handler::from_fn;
use waypost::{
    BoxedHandler, MethodMap, Request, Response, ReverseOptions, Route, RouteTable, Router, Status,
    compose, middleware,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let tree = [
        Route::new("/users", "users")
            .action(
                MethodMap::new()
                    .float(compose([middleware::trace(), middleware::timeout(Duration::from_secs(2))]))
                    .get(list_users())
                    .post(create_user()),
            )
            .child(
                Route::new("/:id", "user")
                    .action(MethodMap::new().get(get_user()).delete(delete_user()).sink(powered_by())),
            ),
        Route::new("/healthz", "health").action(from_fn(|_req, res, _next| {
            res.text("ok");
            Box::pin(async {})
        })),
    ];

    let table = match RouteTable::build_under("/api", &tree) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("bad route tree: {e}");
            return;
        }
    };

    for route in table.routes() {
        println!("{:<8} {:<8} {}", route.method(), route.key(), route.path());
    }

    match table.reverse("user", [("id", "42"), ("expand", "teams")], ReverseOptions::default()) {
        Ok(url) => println!("reverse(user, id=42) = {url}"),
        Err(e) => eprintln!("{e}"),
    }

    let router = Router::new(table);
    for (method, url) in [
        ("GET", "/api/users"),
        ("POST", "/api/users"),
        ("GET", "/api/users/42"),
        ("DELETE", "/api/users/42"),
        ("GET", "/api/healthz"),
        ("GET", "/api/nowhere"),
    ] {
        let mut req = Request::new(method, url);
        let mut res = Response::new();
        router.handle(&mut req, &mut res).await;
        println!(
            "{method:<6} {url:<16} -> {} {}",
            res.status(),
            String::from_utf8_lossy(res.body())
        );
    }
}

// GET /api/users
fn list_users() -> BoxedHandler {
    from_fn(|req, res, next| {
        res.json(br#"[{"id":"42","name":"alice"}]"#.to_vec());
        next.run(req, res)
    })
}

// POST /api/users
fn create_user() -> BoxedHandler {
    from_fn(|req, res, next| {
        res.set_status(Status::Created).set_header("location", "/api/users/99");
        res.json(br#"{"id":"99","name":"new_user"}"#.to_vec());
        next.run(req, res)
    })
}

// GET /api/users/:id
fn get_user() -> BoxedHandler {
    from_fn(|req, res, next| {
        let id = req.param("id").unwrap_or("unknown");
        res.json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes());
        next.run(req, res)
    })
}

// DELETE /api/users/:id -> 204 No Content
fn delete_user() -> BoxedHandler {
    from_fn(|req, res, next| {
        res.set_status(Status::NoContent);
        next.run(req, res)
    })
}

// Runs after every /api/users/:id handler that continues its chain.
fn powered_by() -> BoxedHandler {
    from_fn(|req, res, next| {
        res.set_header("x-powered-by", "waypost");
        next.run(req, res)
    })
}
