#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use ratemyclub::api::{
        approve_review, approved_reviews, deny_review, edit_review, get_review,
        pending_reviews, remove_review, sign_in, sign_up, submit_review, university_clubs,
        universities, user_role, vote_review,
    };
    use ratemyclub::app::*;
    use ratemyclub::db::Database;
    use ratemyclub::reviews::ReviewLifecycle;
    use std::sync::Arc;

    // Initialize the database
    let db = Database::new("ratemyclub.db").unwrap();
    db.create_schema().await.unwrap(); // Ensure the schema is created
    let db = Arc::new(db);
    let lifecycle = ReviewLifecycle::new(db.clone());
    println!("Schema created successfully!");

    // Load configuration
    let conf = get_configuration(None).await.unwrap();
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    println!("listening on http://{}", &addr);

    // Start the Actix Web server
    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;
        let db = db.clone();
        let lifecycle = lifecycle.clone();

        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(lifecycle))
            // Review lifecycle + read API, registered BEFORE Leptos server functions
            .service(
                web::scope("/api")
                    .route("/reviews", web::post().to(submit_review)) // POST /api/reviews
                    .route("/reviews/pending", web::get().to(pending_reviews)) // GET /api/reviews/pending (admin)
                    .route("/reviews/approved", web::get().to(approved_reviews)) // GET /api/reviews/approved
                    .route("/reviews/{id}/approve", web::post().to(approve_review)) // POST /api/reviews/{id}/approve (admin)
                    .route("/reviews/{id}/deny", web::post().to(deny_review)) // POST /api/reviews/{id}/deny (admin)
                    .route("/reviews/{id}/vote", web::post().to(vote_review)) // POST /api/reviews/{id}/vote
                    .route("/reviews/{id}", web::get().to(get_review)) // GET /api/reviews/{id}
                    .route("/reviews/{id}", web::put().to(edit_review)) // PUT /api/reviews/{id} (owner)
                    .route("/reviews/{id}", web::delete().to(remove_review)) // DELETE /api/reviews/{id} (owner/admin)
                    .route("/universities", web::get().to(universities)) // GET /api/universities
                    .route("/universities/{name}/clubs", web::get().to(university_clubs)) // GET /api/universities/{name}/clubs
                    .route("/auth/sign-up", web::post().to(sign_up)) // POST /api/auth/sign-up
                    .route("/auth/sign-in", web::post().to(sign_in)) // POST /api/auth/sign-in
                    .route("/users/{uid}/role", web::get().to(user_role)), // GET /api/users/{uid}/role
            )
            // Register server functions
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns())
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            // Pass Leptos options to the app
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // unless we want this to work with e.g., Trunk for pure client-side testing
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // prefer using `cargo leptos serve` instead
    // to run: `trunk serve --open --features csr`
    use ratemyclub::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
